//! Achievement catalog.
//!
//! Rules are plain data: an id, display strings and a [`Criterion`] evaluated
//! against a progress snapshot. Declaration order is evaluation order.

use mathmaster_types::PlayerProgress;

/// What a player has to reach for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    TotalCorrect(u64),
    TotalAttempted(u64),
    HighestStreak(u32),
    Score(u64),
    UnlockedLevels(usize),
    /// Correct answers without ever spending a hint.
    CorrectWithoutHints(u64),
}

impl Criterion {
    #[must_use]
    pub fn is_met(self, progress: &PlayerProgress) -> bool {
        match self {
            Criterion::TotalCorrect(n) => progress.total_correct >= n,
            Criterion::TotalAttempted(n) => progress.total_attempted >= n,
            Criterion::HighestStreak(n) => progress.highest_streak >= n,
            Criterion::Score(n) => progress.score >= n,
            Criterion::UnlockedLevels(n) => progress.unlocked_levels.len() >= n,
            Criterion::CorrectWithoutHints(n) => {
                progress.hints_used == 0 && progress.total_correct >= n
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementRule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub criterion: Criterion,
}

impl AchievementRule {
    #[must_use]
    pub fn is_earned(&self, progress: &PlayerProgress) -> bool {
        self.criterion.is_met(progress)
    }
}

pub static ACHIEVEMENTS: &[AchievementRule] = &[
    AchievementRule {
        id: "first_steps",
        name: "First Steps",
        description: "Answer your first question correctly.",
        criterion: Criterion::TotalCorrect(1),
    },
    AchievementRule {
        id: "on_a_roll",
        name: "On a Roll",
        description: "Reach a streak of 5.",
        criterion: Criterion::HighestStreak(5),
    },
    AchievementRule {
        id: "unstoppable",
        name: "Unstoppable",
        description: "Reach a streak of 10.",
        criterion: Criterion::HighestStreak(10),
    },
    AchievementRule {
        id: "persistent_player",
        name: "Persistent Player",
        description: "Attempt 100 problems.",
        criterion: Criterion::TotalAttempted(100),
    },
    AchievementRule {
        id: "sharpshooter",
        name: "Sharpshooter",
        description: "Answer 250 problems correctly.",
        criterion: Criterion::TotalCorrect(250),
    },
    AchievementRule {
        id: "high_scorer",
        name: "High Scorer",
        description: "Reach a score of 1000.",
        criterion: Criterion::Score(1_000),
    },
    AchievementRule {
        id: "explorer",
        name: "Explorer",
        description: "Unlock 5 levels.",
        criterion: Criterion::UnlockedLevels(5),
    },
    AchievementRule {
        id: "self_reliant",
        name: "Self-Reliant",
        description: "Answer 100 problems correctly without using a hint.",
        criterion: Criterion::CorrectWithoutHints(100),
    },
];
