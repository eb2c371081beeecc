//! Score and streak updates.
//!
//! # Streak tiers
//!
//! | Streak (after this answer) | Multiplier |
//! |---|---|
//! | 10+ | ×3 |
//! | 5-9 | ×2 |
//! | 3-4 | ×1.5 |
//! | 0-2 | ×1 |
//!
//! The flat scheme ignores tiers and always awards [`BASE_POINTS`].

use mathmaster_types::ScoringScheme;

/// Points for one correct answer before any multiplier.
pub const BASE_POINTS: u64 = 10;

/// Result of scoring one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u64,
    pub streak: u32,
    /// Points added by this answer (zero when incorrect).
    pub points: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreEngine {
    scheme: ScoringScheme,
}

impl ScoreEngine {
    #[must_use]
    pub const fn new(scheme: ScoringScheme) -> Self {
        Self { scheme }
    }

    #[must_use]
    pub const fn scheme(self) -> ScoringScheme {
        self.scheme
    }

    /// Score one answer. An incorrect answer resets the streak and leaves the score alone.
    #[must_use]
    pub fn update(self, score: u64, streak: u32, correct: bool) -> ScoreUpdate {
        if !correct {
            return ScoreUpdate {
                score,
                streak: 0,
                points: 0,
            };
        }

        let streak = streak.saturating_add(1);
        let points = match self.scheme {
            ScoringScheme::StreakMultiplier => {
                (BASE_POINTS as f64 * multiplier_for(streak)).round() as u64
            }
            ScoringScheme::Flat => BASE_POINTS,
        };
        ScoreUpdate {
            score: score.saturating_add(points),
            streak,
            points,
        }
    }
}

/// Multiplier for a streak that already includes the current answer.
#[must_use]
pub fn multiplier_for(streak: u32) -> f64 {
    match streak {
        10.. => 3.0,
        5..=9 => 2.0,
        3..=4 => 1.5,
        _ => 1.0,
    }
}
