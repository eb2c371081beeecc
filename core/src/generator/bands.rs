//! Band generation: coarse level bands map to a numeric range and a subset of
//! operators. Two operands per question.

use mathmaster_types::{GenerateError, LevelId, Operator, Question};

use crate::random::RandomRange;

/// One row of a [`BandTable`]: levels up to and including `through` draw
/// operands from `[min, max]` with one of `operators`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub through: LevelId,
    pub min: u64,
    pub max: u64,
    pub operators: Vec<Operator>,
}

impl Band {
    #[must_use]
    pub fn new(through: LevelId, min: u64, max: u64, operators: &[Operator]) -> Self {
        Self {
            through,
            min: min.min(max),
            max: min.max(max),
            operators: operators.to_vec(),
        }
    }

    /// Short label for level lists, e.g. `"1–10 · + −"`.
    #[must_use]
    pub fn label(&self) -> String {
        let symbols: Vec<&str> = self.operators.iter().map(|op| op.symbol()).collect();
        format!("{}–{} · {}", self.min, self.max, symbols.join(" "))
    }
}

/// Ordered band rows; a level belongs to the first band whose `through` covers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    #[must_use]
    pub fn new(mut bands: Vec<Band>) -> Self {
        bands.sort_by_key(|band| band.through);
        Self { bands }
    }

    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    #[must_use]
    pub fn level_count(&self) -> u32 {
        self.bands.last().map_or(0, |band| band.through.value())
    }

    #[must_use]
    pub fn band_for(&self, level: LevelId) -> Option<&Band> {
        self.bands.iter().find(|band| level <= band.through)
    }

    pub fn generate<R: RandomRange + ?Sized>(
        &self,
        level: LevelId,
        rng: &mut R,
    ) -> Result<Question, GenerateError> {
        let band = self
            .band_for(level)
            .ok_or(GenerateError::InvalidLevel {
                requested: level.value(),
                available: self.level_count(),
            })?;
        generate_in_band(band, rng)
    }
}

impl Default for BandTable {
    fn default() -> Self {
        let level = |n| LevelId::new(n).unwrap_or(LevelId::FIRST);
        Self::new(vec![
            Band::new(level(5), 1, 10, &[Operator::Add, Operator::Sub]),
            Band::new(level(10), 1, 20, &[Operator::Add, Operator::Sub, Operator::Mul]),
            Band::new(level(15), 2, 50, &Operator::ALL),
            Band::new(level(20), 10, 100, &Operator::ALL),
        ])
    }
}

/// Generate one question inside `band`.
///
/// Division picks a quotient uniformly from `[2, max / min]` and derives a
/// divisor that keeps the dividend in range. When that interval is empty the
/// round silently becomes multiplication.
pub fn generate_in_band<R: RandomRange + ?Sized>(
    band: &Band,
    rng: &mut R,
) -> Result<Question, GenerateError> {
    let operator = pick_operator(band, rng);
    let (min, max) = (band.min, band.max);

    match operator {
        Operator::Add | Operator::Mul => {
            let operands = vec![rng.int_inclusive(min, max), rng.int_inclusive(min, max)];
            Ok(Question::evaluate(operator, operands)?)
        }
        Operator::Sub => {
            let a = rng.int_inclusive(min, max);
            let b = rng.int_inclusive(min, max);
            let (minuend, subtrahend) = if a < b { (b, a) } else { (a, b) };
            Ok(Question::evaluate(
                Operator::Sub,
                vec![minuend, subtrahend],
            )?)
        }
        Operator::Div => {
            let floor = min.max(1);
            let top_quotient = max / floor;
            if top_quotient < 2 {
                tracing::debug!(min, max, "No integer quotient in band; asking multiplication");
                let operands = vec![rng.int_inclusive(min, max), rng.int_inclusive(min, max)];
                return Ok(Question::evaluate(Operator::Mul, operands)?);
            }
            let quotient = rng.int_inclusive(2, top_quotient);
            let divisor = rng.int_inclusive(floor, max / quotient);
            Ok(Question::new(
                Operator::Div,
                vec![divisor * quotient, divisor],
                quotient,
            )?)
        }
    }
}

// An empty subset drills addition.
fn pick_operator<R: RandomRange + ?Sized>(band: &Band, rng: &mut R) -> Operator {
    match band.operators.len() {
        0 => Operator::Add,
        1 => band.operators[0],
        n => band.operators[rng.int_inclusive(0, n as u64 - 1) as usize],
    }
}
