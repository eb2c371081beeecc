//! End-to-end properties of the generation, scoring and progression engines.

use std::collections::BTreeSet;

use mathmaster_core::generator::requires_borrow;
use mathmaster_core::{
    Game, GenerationStrategy, ProgressionEngine, RngRange, ScoreEngine, catalog,
};
use mathmaster_types::{
    GameSettings, LevelId, Operator, PlayerProgress, ScoringScheme, StrategyKind, UnlockPolicy,
};

const SEEDS: [u64; 4] = [0, 17, 1_234, 987_654_321];

fn check_question_invariants(strategy: &GenerationStrategy) {
    for seed in SEEDS {
        let mut rng = RngRange::seeded(seed);
        for n in 1..=strategy.level_count() {
            let level = LevelId::new(n).unwrap();
            for _ in 0..100 {
                let q = strategy.generate(level, &mut rng).unwrap();
                let ops = q.operands();
                assert!(ops.len() >= 2);
                match q.operator() {
                    Operator::Add => assert_eq!(q.answer(), ops.iter().sum::<u64>()),
                    Operator::Mul => assert_eq!(q.answer(), ops.iter().product::<u64>()),
                    Operator::Sub => {
                        assert!(ops[0] >= ops[1]);
                        assert_eq!(ops[0] - ops[1], q.answer());
                    }
                    Operator::Div => {
                        assert_ne!(ops[1], 0);
                        assert_eq!(ops[0] % ops[1], 0);
                        assert_eq!(ops[0] / ops[1], q.answer());
                    }
                }
            }
        }
    }
}

#[test]
fn digit_strategy_questions_hold_invariants() {
    check_question_invariants(&GenerationStrategy::from_kind(StrategyKind::Digits));
}

#[test]
fn band_strategy_questions_hold_invariants() {
    check_question_invariants(&GenerationStrategy::from_kind(StrategyKind::Bands));
}

#[test]
fn borrowing_levels_always_borrow() {
    let strategy = GenerationStrategy::from_kind(StrategyKind::Digits);
    let borrowing: Vec<LevelId> = catalog()
        .iter()
        .zip(1..)
        .filter(|(spec, _)| spec.borrowing)
        .filter_map(|(_, n)| LevelId::new(n))
        .collect();
    assert_eq!(borrowing.len(), 2);

    let mut rng = RngRange::seeded(99);
    for level in borrowing {
        for _ in 0..500 {
            let q = strategy.generate(level, &mut rng).unwrap();
            let ops = q.operands();
            assert!(ops[0] > ops[1]);
            assert!(requires_borrow(ops[0], ops[1]));
        }
    }
}

#[test]
fn score_examples() {
    let engine = ScoreEngine::new(ScoringScheme::StreakMultiplier);
    let update = engine.update(100, 2, true);
    assert_eq!((update.score, update.streak), (115, 3));
    let update = engine.update(100, 9, true);
    assert_eq!((update.score, update.streak), (130, 10));
    let update = engine.update(345, 12, false);
    assert_eq!((update.score, update.streak), (345, 0));
}

#[test]
fn unlock_examples() {
    let engine = ProgressionEngine::new(20, UnlockPolicy::default());
    let one = LevelId::FIRST;
    let two = LevelId::new(2).unwrap();

    let progress = PlayerProgress {
        attempts_in_window: 15,
        correct_in_window: 9,
        ..PlayerProgress::default()
    };
    assert_eq!(engine.check_unlock(&progress), BTreeSet::from([one, two]));

    let progress = PlayerProgress {
        correct_in_window: 8,
        ..progress
    };
    assert_eq!(engine.check_unlock(&progress), BTreeSet::from([one]));
}

#[test]
fn achievements_are_idempotent() {
    let engine = ProgressionEngine::new(20, UnlockPolicy::default());
    let progress = PlayerProgress {
        total_attempted: 120,
        total_correct: 30,
        highest_streak: 6,
        ..PlayerProgress::default()
    };
    let (progress, first) = engine.award_achievements(&progress);
    assert!(!first.is_empty());
    let (_, second) = engine.award_achievements(&progress);
    assert!(second.is_empty());
}

#[test]
fn persistent_player_fires_exactly_once_over_a_session() {
    let game = Game::new(GameSettings::default());
    let mut rng = RngRange::seeded(5);
    let mut progress = game.fresh_progress();
    let mut fired_at = Vec::new();

    for attempt in 1..=130u64 {
        let question = game.next_question(&progress, &mut rng).unwrap();
        // Alternate right and wrong so the player stays on level 1 for a while.
        let guess = if attempt % 2 == 0 {
            question.answer() as i64
        } else {
            question.answer() as i64 + 1
        };
        let outcome = game.answer(&progress, &question, guess);
        if outcome
            .badges
            .iter()
            .any(|badge| badge.id == "persistent_player")
        {
            fired_at.push(attempt);
        }
        progress = outcome.progress;
    }

    assert_eq!(fired_at, vec![100]);
    assert_eq!(progress.total_attempted, 130);
    assert_eq!(progress.total_correct, 65);
}

#[test]
fn perfect_play_unlocks_one_level_per_window() {
    let game = Game::default();
    let mut rng = RngRange::seeded(8);
    let mut progress = game.fresh_progress();
    let mut unlocks = Vec::new();

    for _ in 0..45 {
        let question = game.next_question(&progress, &mut rng).unwrap();
        let outcome = game.answer(&progress, &question, question.answer() as i64);
        if let Some(level) = outcome.unlocked {
            unlocks.push(level.value());
            progress = game
                .select_level(&outcome.progress, level.value())
                .unwrap();
        } else {
            progress = outcome.progress;
        }
    }

    assert_eq!(unlocks, vec![2, 3, 4]);
    assert_eq!(progress.current_level.value(), 4);
    assert_eq!(progress.highest_streak, 45);
}
