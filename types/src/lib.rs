//! Core domain types for Math Master.
//!
//! This crate contains pure domain types with no IO, no randomness, and minimal dependencies.
//! The generator, scoring and progression engines in `mathmaster-core` operate on these,
//! and the driver persists [`PlayerProgress`] snapshots of them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod ids;
mod progress;
pub mod settings;

pub use ids::LevelId;
pub use progress::{DEFAULT_HINTS, PlayerProgress};
pub use settings::{GameSettings, ScoringScheme, SettingsError, StrategyKind, UnlockPolicy};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Operators
// ============================================================================

/// The four arithmetic operations a level can drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Symbol shown to the player.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "−",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
        }
    }

    /// Display group used by the level catalog (`"Addition: ..."`).
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Operator::Add => "Addition",
            Operator::Sub => "Subtraction",
            Operator::Mul => "Multiplication",
            Operator::Div => "Division",
        }
    }

    /// Apply the operator to two non-negative integers.
    ///
    /// Returns `None` when the result is not a non-negative integer: overflow,
    /// a negative difference, division by zero, or a non-exact quotient.
    #[must_use]
    pub fn apply(self, lhs: u64, rhs: u64) -> Option<u64> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Mul => lhs.checked_mul(rhs),
            Operator::Div => {
                if rhs == 0 || lhs % rhs != 0 {
                    None
                } else {
                    Some(lhs / rhs)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Level Specs
// ============================================================================

/// How many digits a generated operand should have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitSpec {
    Fixed(u32),
    /// Inclusive `[min, max]` digit-count range, sampled per operand.
    Range(u32, u32),
    /// One spec per operand position. Positions past the end use the first entry.
    PerOperand(&'static [DigitSpec]),
}

impl DigitSpec {
    /// The digit count rule for operand `index`.
    ///
    /// For a per-operand list this falls back to the first entry when the list
    /// is shorter than the operand count.
    #[must_use]
    pub fn for_operand(self, index: usize) -> DigitSpec {
        match self {
            DigitSpec::PerOperand(list) => list
                .get(index)
                .or_else(|| list.first())
                .copied()
                .unwrap_or(DigitSpec::Fixed(1)),
            other => other,
        }
    }

    #[must_use]
    pub fn min_digits(self) -> u32 {
        match self {
            DigitSpec::Fixed(d) => d,
            DigitSpec::Range(lo, hi) => lo.min(hi),
            DigitSpec::PerOperand(list) => list.iter().map(|d| d.min_digits()).min().unwrap_or(1),
        }
    }

    #[must_use]
    pub fn max_digits(self) -> u32 {
        match self {
            DigitSpec::Fixed(d) => d,
            DigitSpec::Range(lo, hi) => lo.max(hi),
            DigitSpec::PerOperand(list) => list.iter().map(|d| d.max_digits()).max().unwrap_or(1),
        }
    }
}

/// How many operands a question has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSpec {
    Fixed(u32),
    Range(u32, u32),
}

/// One difficulty tier of the digit-based catalog.
///
/// Names follow the `"Category: description"` convention so the driver can
/// group levels for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub name: &'static str,
    pub kind: Operator,
    pub digits: DigitSpec,
    pub operands: CountSpec,
    /// Subtraction only: every question must require regrouping.
    pub borrowing: bool,
}

impl LevelSpec {
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: Operator,
        digits: DigitSpec,
        operands: CountSpec,
    ) -> Self {
        Self {
            name,
            kind,
            digits,
            operands,
            borrowing: false,
        }
    }

    #[must_use]
    pub const fn with_borrowing(mut self) -> Self {
        self.borrowing = true;
        self
    }

    /// Group name before the first `": "`, or the whole name when there is none.
    #[must_use]
    pub fn category(&self) -> &'static str {
        self.name
            .split_once(": ")
            .map_or(self.name, |(category, _)| category)
    }

    /// Text after the first `": "`, or the whole name when there is none.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.name
            .split_once(": ")
            .map_or(self.name, |(_, description)| description)
    }

    /// `(answer_digits, divisor_digits)` for division levels.
    ///
    /// A two-element per-operand list is read as `[answer, divisor]`; any other
    /// spec applies to both.
    #[must_use]
    pub fn division_digits(&self) -> (DigitSpec, DigitSpec) {
        (self.digits.for_operand(0), self.digits.for_operand(1))
    }
}

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("a question needs at least two operands (got {0})")]
    TooFewOperands(usize),
    #[error("{operator} over {operands:?} has no non-negative integer result")]
    Undefined {
        operator: Operator,
        operands: Vec<u64>,
    },
    #[error("answer {claimed} does not match {operator} over {operands:?} (= {actual})")]
    AnswerMismatch {
        operator: Operator,
        operands: Vec<u64>,
        claimed: u64,
        actual: u64,
    },
}

/// A single arithmetic problem.
///
/// Invariant: folding `operator` over `operands` yields exactly `answer`. Subtraction
/// never goes negative and division is always exact, so a `Question` cannot be
/// constructed otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    operands: Vec<u64>,
    operator: Operator,
    answer: u64,
}

impl Question {
    /// Build a question whose answer is the fold of `operands` under `operator`.
    pub fn evaluate(operator: Operator, operands: Vec<u64>) -> Result<Self, QuestionError> {
        let answer = fold(operator, &operands)?;
        Ok(Self {
            operands,
            operator,
            answer,
        })
    }

    /// Build a question with an independently known answer, checking it.
    pub fn new(operator: Operator, operands: Vec<u64>, answer: u64) -> Result<Self, QuestionError> {
        let actual = fold(operator, &operands)?;
        if actual != answer {
            return Err(QuestionError::AnswerMismatch {
                operator,
                operands,
                claimed: answer,
                actual,
            });
        }
        Ok(Self {
            operands,
            operator,
            answer,
        })
    }

    #[must_use]
    pub fn operands(&self) -> &[u64] {
        &self.operands
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub const fn answer(&self) -> u64 {
        self.answer
    }

    #[must_use]
    pub fn is_correct(&self, guess: i64) -> bool {
        u64::try_from(guess).is_ok_and(|guess| guess == self.answer)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator)?;
            }
            write!(f, "{operand}")?;
        }
        Ok(())
    }
}

fn fold(operator: Operator, operands: &[u64]) -> Result<u64, QuestionError> {
    let (first, rest) = match operands {
        [first, rest @ ..] if !rest.is_empty() => (*first, rest),
        _ => return Err(QuestionError::TooFewOperands(operands.len())),
    };
    rest.iter()
        .try_fold(first, |acc, &operand| operator.apply(acc, operand))
        .ok_or_else(|| QuestionError::Undefined {
            operator,
            operands: operands.to_vec(),
        })
}

// ============================================================================
// Errors
// ============================================================================

/// Which generation guarantee could not be met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Borrowing,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Borrowing => f.write_str("borrowing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("level {requested} is outside the catalog (1..={available})")]
    InvalidLevel { requested: u32, available: u32 },
    #[error("{level}: no operands in the configured ranges satisfy the {constraint} constraint")]
    UnsatisfiableConstraint {
        level: String,
        constraint: Constraint,
    },
    #[error(transparent)]
    Malformed(#[from] QuestionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectLevelError {
    #[error("level {requested} is outside the catalog (1..={available})")]
    InvalidLevel { requested: u32, available: u32 },
    #[error("level {0} is still locked")]
    Locked(LevelId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("no hints remaining")]
    Exhausted,
}
