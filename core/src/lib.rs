//! Core game logic for Math Master.
//!
//! This crate contains the synchronous, side-effect-free engines the driver
//! calls each round:
//!
//! - **`generator`**: builds questions from the level catalog or band table
//! - **`score`**: score and streak updates
//! - **`progression`**: level unlocks, level selection and achievements
//! - **`hint`**: spending hints on the current question
//! - **`round`**: ties the above together for one submitted answer
//!
//! Nothing here blocks, sleeps or touches storage. Randomness comes in
//! through [`RandomRange`] so every engine can be driven deterministically.

pub mod achievements;
pub mod catalog;
pub mod generator;
pub mod hint;
pub mod progression;
pub mod random;
pub mod round;
pub mod score;

pub use achievements::{ACHIEVEMENTS, AchievementRule, Criterion};
pub use catalog::catalog;
pub use generator::{Band, BandTable, GenerationStrategy, LevelInfo};
pub use hint::{Hint, use_hint};
pub use progression::{ProgressionEngine, WindowReport};
pub use random::{RandomRange, RngRange};
pub use round::{Game, RoundOutcome, parse_answer};
pub use score::{BASE_POINTS, ScoreEngine, ScoreUpdate, multiplier_for};
