//! One round of play: ask, answer, score, progress.
//!
//! [`Game`] bundles the strategy, scoring scheme and progression rules chosen
//! for a product variant. The driver owns the [`PlayerProgress`] and replaces
//! it with the snapshot each call returns.

use mathmaster_types::{
    GameSettings, GenerateError, LevelId, PlayerProgress, Question, SelectLevelError,
};

use crate::achievements::AchievementRule;
use crate::generator::GenerationStrategy;
use crate::progression::ProgressionEngine;
use crate::random::RandomRange;
use crate::score::ScoreEngine;

/// Everything that happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub progress: PlayerProgress,
    pub correct: bool,
    pub points: u64,
    pub expected: u64,
    pub unlocked: Option<LevelId>,
    pub badges: Vec<&'static AchievementRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    strategy: GenerationStrategy,
    scoring: ScoreEngine,
    progression: ProgressionEngine,
    hints: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl Game {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_strategy(GenerationStrategy::from_kind(settings.strategy), settings)
    }

    /// Use a custom strategy (e.g. a different band table) with `settings`.
    #[must_use]
    pub fn with_strategy(strategy: GenerationStrategy, settings: GameSettings) -> Self {
        let progression = ProgressionEngine::new(strategy.level_count(), settings.unlock);
        Self {
            strategy,
            scoring: ScoreEngine::new(settings.scoring),
            progression,
            hints: settings.hints,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> &GenerationStrategy {
        &self.strategy
    }

    #[must_use]
    pub fn scoring(&self) -> ScoreEngine {
        self.scoring
    }

    #[must_use]
    pub fn progression(&self) -> &ProgressionEngine {
        &self.progression
    }

    /// Defaults for a brand-new (or reset) player.
    #[must_use]
    pub fn fresh_progress(&self) -> PlayerProgress {
        PlayerProgress::new(self.hints)
    }

    /// A new question at the player's current level.
    pub fn next_question<R: RandomRange + ?Sized>(
        &self,
        progress: &PlayerProgress,
        rng: &mut R,
    ) -> Result<Question, GenerateError> {
        self.strategy.generate(progress.current_level, rng)
    }

    pub fn select_level(
        &self,
        progress: &PlayerProgress,
        level: u32,
    ) -> Result<PlayerProgress, SelectLevelError> {
        self.progression.select_level(progress, level)
    }

    /// Resolve raw player input. Empty or non-numeric input is ignored (`None`).
    #[must_use]
    pub fn submit(
        &self,
        progress: &PlayerProgress,
        question: &Question,
        raw: &str,
    ) -> Option<RoundOutcome> {
        let guess = parse_answer(raw)?;
        Some(self.answer(progress, question, guess))
    }

    /// Score `guess`, advance the unlock window and award badges.
    #[must_use]
    pub fn answer(&self, progress: &PlayerProgress, question: &Question, guess: i64) -> RoundOutcome {
        let correct = question.is_correct(guess);
        let update = self.scoring.update(progress.score, progress.streak, correct);

        let mut next = progress.clone();
        next.score = update.score;
        next.streak = update.streak;
        next.highest_streak = next.highest_streak.max(update.streak);
        next.attempts_in_window = next.attempts_in_window.saturating_add(1);
        next.total_attempted = next.total_attempted.saturating_add(1);
        if correct {
            next.correct_in_window = next.correct_in_window.saturating_add(1);
            next.total_correct = next.total_correct.saturating_add(1);
        }

        let mut unlocked = None;
        if let Some(report) = self.progression.close_window(&next) {
            unlocked = report.unlocked;
            next = report.progress;
        }

        let (next, badges) = self.progression.award_achievements(&next);
        tracing::debug!(
            correct,
            points = update.points,
            streak = update.streak,
            "Round resolved"
        );

        RoundOutcome {
            progress: next,
            correct,
            points: update.points,
            expected: question.answer(),
            unlocked,
            badges,
        }
    }
}

/// Parse a submitted answer, tolerating surrounding whitespace.
#[must_use]
pub fn parse_answer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathmaster_types::{Operator, ScoringScheme, StrategyKind, UnlockPolicy};

    fn question() -> Question {
        Question::evaluate(Operator::Add, vec![2, 3]).unwrap()
    }

    #[test]
    fn malformed_input_changes_nothing() {
        let game = Game::default();
        let progress = game.fresh_progress();
        for raw in ["", "   ", "five", "5x", "1.5"] {
            assert!(game.submit(&progress, &question(), raw).is_none(), "{raw:?}");
        }
    }

    #[test]
    fn correct_answer_updates_counters() {
        let game = Game::default();
        let outcome = game
            .submit(&game.fresh_progress(), &question(), " 5 ")
            .unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, 10);
        assert_eq!(outcome.expected, 5);
        let p = &outcome.progress;
        assert_eq!((p.score, p.streak, p.highest_streak), (10, 1, 1));
        assert_eq!((p.attempts_in_window, p.correct_in_window), (1, 1));
        assert_eq!((p.total_attempted, p.total_correct), (1, 1));
        let badges: Vec<&str> = outcome.badges.iter().map(|b| b.id).collect();
        assert_eq!(badges, vec!["first_steps"]);
    }

    #[test]
    fn wrong_answer_resets_streak_but_keeps_highest() {
        let game = Game::default();
        let progress = PlayerProgress {
            streak: 4,
            highest_streak: 4,
            score: 70,
            ..game.fresh_progress()
        };
        let outcome = game.answer(&progress, &question(), -5);
        assert!(!outcome.correct);
        assert_eq!(outcome.progress.streak, 0);
        assert_eq!(outcome.progress.highest_streak, 4);
        assert_eq!(outcome.progress.score, 70);
        assert_eq!(outcome.progress.correct_in_window, 0);
    }

    #[test]
    fn fifteenth_attempt_closes_window() {
        let game = Game::default();
        let progress = PlayerProgress {
            attempts_in_window: 14,
            correct_in_window: 8,
            ..game.fresh_progress()
        };
        let outcome = game.answer(&progress, &question(), 5);
        assert_eq!(outcome.unlocked, LevelId::new(2));
        assert_eq!(outcome.progress.attempts_in_window, 0);
        assert!(outcome.progress.is_unlocked(LevelId::new(2).unwrap()));
    }

    #[test]
    fn flat_scoring_variant() {
        let game = Game::new(GameSettings {
            scoring: ScoringScheme::Flat,
            ..GameSettings::default()
        });
        let progress = PlayerProgress {
            streak: 9,
            ..game.fresh_progress()
        };
        assert_eq!(game.answer(&progress, &question(), 5).points, 10);
    }

    #[test]
    fn short_window_variant_unlocks_sooner() {
        let game = Game::new(GameSettings {
            unlock: UnlockPolicy::new(1, 100).unwrap(),
            ..GameSettings::default()
        });
        let outcome = game.answer(&game.fresh_progress(), &question(), 5);
        assert_eq!(outcome.unlocked, LevelId::new(2));
    }

    #[test]
    fn band_variant_uses_band_levels() {
        let game = Game::new(GameSettings {
            strategy: StrategyKind::Bands,
            ..GameSettings::default()
        });
        assert_eq!(game.strategy().kind(), StrategyKind::Bands);
        assert_eq!(game.progression().total_levels(), 20);
    }

    #[test]
    fn fresh_progress_uses_configured_hints() {
        let game = Game::new(GameSettings {
            hints: 7,
            ..GameSettings::default()
        });
        assert_eq!(game.fresh_progress().hints_remaining, 7);
    }

    #[test]
    fn parse_answer_accepts_negative_numbers() {
        assert_eq!(parse_answer("-12"), Some(-12));
        assert_eq!(parse_answer("+7"), Some(7));
        assert_eq!(parse_answer("abc"), None);
    }
}
