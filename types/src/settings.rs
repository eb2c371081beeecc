//! Resolved game settings shared across crates.
//!
//! These types represent fully-validated configuration state. Raw TOML
//! deserialization structs stay private in `mathmaster-config`, which resolves
//! them into these types at the parse boundary.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_HINTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unlock window must be at least one attempt")]
    EmptyWindow,
    #[error("unlock threshold must be between 0 and 100 percent (got {0})")]
    ThresholdOutOfRange(u32),
}

/// Which question generator a product variant runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Per-level digit counts, operand counts and borrowing.
    #[default]
    Digits,
    /// Coarse level bands mapped to a numeric range and an operator subset.
    Bands,
}

impl StrategyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Digits => "digits",
            StrategyKind::Bands => "bands",
        }
    }
}

/// How correct answers are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringScheme {
    /// 10 points scaled by the current streak tier.
    #[default]
    #[serde(rename = "streak")]
    StreakMultiplier,
    /// A flat 10 points per correct answer.
    #[serde(rename = "flat")]
    Flat,
}

impl ScoringScheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScoringScheme::StreakMultiplier => "streak",
            ScoringScheme::Flat => "flat",
        }
    }
}

/// When and how generously the next level unlocks.
///
/// Invariant: `window >= 1` and `threshold_percent <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockPolicy {
    window: u32,
    threshold_percent: u32,
}

impl UnlockPolicy {
    pub const DEFAULT_WINDOW: u32 = 15;
    pub const DEFAULT_THRESHOLD: u32 = 60;

    pub const fn new(window: u32, threshold_percent: u32) -> Result<Self, SettingsError> {
        if window == 0 {
            return Err(SettingsError::EmptyWindow);
        }
        if threshold_percent > 100 {
            return Err(SettingsError::ThresholdOutOfRange(threshold_percent));
        }
        Ok(Self {
            window,
            threshold_percent,
        })
    }

    /// Attempts per evaluation window.
    #[must_use]
    pub const fn window(self) -> u32 {
        self.window
    }

    #[must_use]
    pub const fn threshold_percent(self) -> u32 {
        self.threshold_percent
    }
}

impl Default for UnlockPolicy {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
            threshold_percent: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Everything the core needs to run one product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub strategy: StrategyKind,
    pub scoring: ScoringScheme,
    pub unlock: UnlockPolicy,
    pub hints: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            scoring: ScoringScheme::default(),
            unlock: UnlockPolicy::default(),
            hints: DEFAULT_HINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_policy_rejects_empty_window() {
        assert_eq!(UnlockPolicy::new(0, 60), Err(SettingsError::EmptyWindow));
    }

    #[test]
    fn unlock_policy_rejects_threshold_over_100() {
        assert_eq!(
            UnlockPolicy::new(15, 101),
            Err(SettingsError::ThresholdOutOfRange(101))
        );
    }

    #[test]
    fn defaults_match_windowed_product() {
        let settings = GameSettings::default();
        assert_eq!(settings.strategy, StrategyKind::Digits);
        assert_eq!(settings.scoring, ScoringScheme::StreakMultiplier);
        assert_eq!(settings.unlock.window(), 15);
        assert_eq!(settings.unlock.threshold_percent(), 60);
        assert_eq!(settings.hints, 3);
    }
}
