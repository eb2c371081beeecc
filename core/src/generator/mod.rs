//! Question generation.
//!
//! Two product variants exist and exactly one runs per configuration:
//!
//! - [`GenerationStrategy::Digits`]: the level catalog drives digit counts,
//!   operand counts and borrowing ([`digits`]).
//! - [`GenerationStrategy::Bands`]: levels map to a numeric range and an
//!   operator subset ([`bands`]).
//!
//! Both produce the same [`Question`] type and honor its invariants.

pub mod bands;
pub mod digits;

use mathmaster_types::{GenerateError, LevelId, LevelSpec, Question, StrategyKind};

use crate::catalog;
use crate::random::RandomRange;

pub use bands::{Band, BandTable, generate_in_band};
pub use digits::{MAX_BORROW_ATTEMPTS, borrowing_possible, generate_for, requires_borrow};

/// Display entry for one level of the active strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelInfo {
    pub id: LevelId,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStrategy {
    Digits(&'static [LevelSpec]),
    Bands(BandTable),
}

impl Default for GenerationStrategy {
    fn default() -> Self {
        Self::from_kind(StrategyKind::default())
    }
}

impl GenerationStrategy {
    /// The built-in catalog or band table for `kind`.
    #[must_use]
    pub fn from_kind(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Digits => Self::Digits(catalog::catalog()),
            StrategyKind::Bands => Self::Bands(BandTable::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Digits(_) => StrategyKind::Digits,
            Self::Bands(_) => StrategyKind::Bands,
        }
    }

    #[must_use]
    pub fn level_count(&self) -> u32 {
        match self {
            Self::Digits(levels) => levels.len() as u32,
            Self::Bands(table) => table.level_count(),
        }
    }

    /// Generate a question for `level`.
    pub fn generate<R: RandomRange + ?Sized>(
        &self,
        level: LevelId,
        rng: &mut R,
    ) -> Result<Question, GenerateError> {
        match self {
            Self::Digits(levels) => {
                let spec = levels
                    .get(level.index())
                    .ok_or(GenerateError::InvalidLevel {
                        requested: level.value(),
                        available: self.level_count(),
                    })?;
                generate_for(spec, rng)
            }
            Self::Bands(table) => table.generate(level, rng),
        }
    }

    /// Every level of this strategy, in display order.
    #[must_use]
    pub fn levels(&self) -> Vec<LevelInfo> {
        match self {
            Self::Digits(levels) => levels
                .iter()
                .zip(1..)
                .filter_map(|(spec, n)| {
                    Some(LevelInfo {
                        id: LevelId::new(n)?,
                        category: spec.category().to_string(),
                        description: spec.description().to_string(),
                    })
                })
                .collect(),
            Self::Bands(table) => {
                let mut infos = Vec::new();
                let mut first = 1;
                for (position, band) in (1..).zip(table.bands()) {
                    let through = band.through.value();
                    infos.extend((first..=through).filter_map(LevelId::new).map(|id| {
                        LevelInfo {
                            id,
                            category: format!("Band {position}"),
                            description: format!("Level {} · {}", id.value(), band.label()),
                        }
                    }));
                    first = first.max(through + 1);
                }
                infos
            }
        }
    }

    /// Display name of `level`, if it exists.
    #[must_use]
    pub fn level_name(&self, level: LevelId) -> Option<String> {
        self.levels()
            .into_iter()
            .find(|info| info.id == level)
            .map(|info| format!("{}: {}", info.category, info.description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngRange;
    use mathmaster_types::Operator;

    #[test]
    fn digit_strategy_rejects_levels_past_catalog() {
        let strategy = GenerationStrategy::from_kind(StrategyKind::Digits);
        let mut rng = RngRange::seeded(1);
        let err = strategy
            .generate(LevelId::new(21).unwrap(), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::InvalidLevel {
                requested: 21,
                available: 20
            }
        );
    }

    #[test]
    fn both_strategies_generate_every_level() {
        let mut rng = RngRange::seeded(2);
        for kind in [StrategyKind::Digits, StrategyKind::Bands] {
            let strategy = GenerationStrategy::from_kind(kind);
            assert_eq!(strategy.kind(), kind);
            for n in 1..=strategy.level_count() {
                let level = LevelId::new(n).unwrap();
                assert!(strategy.generate(level, &mut rng).is_ok(), "{kind:?} level {n}");
            }
        }
    }

    #[test]
    fn digit_levels_follow_catalog_names() {
        let levels = GenerationStrategy::from_kind(StrategyKind::Digits).levels();
        assert_eq!(levels.len(), 20);
        assert_eq!(levels[0].category, "Addition");
        assert_eq!(levels[0].description, "1 digit × 2 numbers");
        assert_eq!(levels[19].id.value(), 20);
    }

    #[test]
    fn band_levels_name_their_band() {
        let strategy = GenerationStrategy::from_kind(StrategyKind::Bands);
        let levels = strategy.levels();
        assert_eq!(levels.len(), 20);
        assert_eq!(levels[0].category, "Band 1");
        assert_eq!(levels[5].category, "Band 2");
        assert_eq!(
            strategy.level_name(LevelId::FIRST).as_deref(),
            Some("Band 1: Level 1 · 1–10 · + −")
        );
    }

    #[test]
    fn identical_band_rows_keep_their_own_numbers() {
        let level = |n| LevelId::new(n).unwrap();
        let row = Band::new(level(2), 1, 10, &[Operator::Add]);
        let strategy = GenerationStrategy::Bands(BandTable::new(vec![
            row.clone(),
            row,
            Band::new(level(4), 1, 10, &[Operator::Add]),
        ]));

        let levels = strategy.levels();

        let categories: Vec<&str> = levels.iter().map(|info| info.category.as_str()).collect();
        assert_eq!(categories, vec!["Band 1", "Band 1", "Band 3", "Band 3"]);
        assert_eq!(levels[2].description, "Level 3 · 1–10 · +");
    }
}
