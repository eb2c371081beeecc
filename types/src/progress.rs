//! Player progress snapshot.
//!
//! The driver owns exactly one of these. Engines never mutate it in place:
//! they take `&PlayerProgress` and hand back an updated copy, which the driver
//! persists and swaps in.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::LevelId;

/// Hints granted to a fresh player.
pub const DEFAULT_HINTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    pub player_name: String,
    pub current_level: LevelId,
    pub score: u64,
    pub streak: u32,
    pub highest_streak: u32,
    /// Always contains [`LevelId::FIRST`].
    #[serde(deserialize_with = "deserialize_unlocked")]
    pub unlocked_levels: BTreeSet<LevelId>,
    pub earned_badges: BTreeSet<String>,
    pub attempts_in_window: u32,
    pub correct_in_window: u32,
    pub hints_remaining: u32,
    pub hints_used: u32,
    pub total_attempted: u64,
    pub total_correct: u64,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::new(DEFAULT_HINTS)
    }
}

impl PlayerProgress {
    #[must_use]
    pub fn new(hints: u32) -> Self {
        Self {
            player_name: String::new(),
            current_level: LevelId::FIRST,
            score: 0,
            streak: 0,
            highest_streak: 0,
            unlocked_levels: BTreeSet::from([LevelId::FIRST]),
            earned_badges: BTreeSet::new(),
            attempts_in_window: 0,
            correct_in_window: 0,
            hints_remaining: hints,
            hints_used: 0,
            total_attempted: 0,
            total_correct: 0,
        }
    }

    /// Accuracy over the current unlock window, in percent. Zero with no attempts.
    #[must_use]
    pub fn window_accuracy(&self) -> f64 {
        if self.attempts_in_window == 0 {
            return 0.0;
        }
        f64::from(self.correct_in_window) / f64::from(self.attempts_in_window) * 100.0
    }

    /// Lifetime accuracy, in percent. Zero with no attempts.
    #[must_use]
    pub fn lifetime_accuracy(&self) -> f64 {
        if self.total_attempted == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_attempted as f64 * 100.0
    }

    #[must_use]
    pub fn is_unlocked(&self, level: LevelId) -> bool {
        self.unlocked_levels.contains(&level)
    }

    #[must_use]
    pub fn has_badge(&self, id: &str) -> bool {
        self.earned_badges.contains(id)
    }

    /// Drop every level above `level_count`, moving the player back to
    /// level 1 if they stood on one. Returns whether anything changed.
    pub fn clamp_to_levels(&mut self, level_count: u32) -> bool {
        let before = self.unlocked_levels.len();
        self.unlocked_levels
            .retain(|level| level.value() <= level_count);
        self.unlocked_levels.insert(LevelId::FIRST);
        let mut changed = self.unlocked_levels.len() != before;
        if self.current_level.value() > level_count {
            self.current_level = LevelId::FIRST;
            self.attempts_in_window = 0;
            self.correct_in_window = 0;
            changed = true;
        }
        changed
    }
}

fn deserialize_unlocked<'de, D>(deserializer: D) -> Result<BTreeSet<LevelId>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut levels = BTreeSet::<LevelId>::deserialize(deserializer)?;
    levels.insert(LevelId::FIRST);
    Ok(levels)
}
