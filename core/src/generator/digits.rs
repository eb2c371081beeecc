//! Digit-count generation: operands are drawn by digit count, with optional
//! borrowing for subtraction and exact division by construction.

use mathmaster_types::{Constraint, DigitSpec, GenerateError, LevelSpec, Operator, Question};

use crate::random::{RandomRange, resolve_count, sample_nonzero_operand, sample_operand};

/// Ceiling on rejection-sampling rounds for borrowing subtraction.
pub const MAX_BORROW_ATTEMPTS: u32 = 10_000;

/// Generate a question satisfying `spec`.
pub fn generate_for<R: RandomRange + ?Sized>(
    spec: &LevelSpec,
    rng: &mut R,
) -> Result<Question, GenerateError> {
    match spec.kind {
        Operator::Add | Operator::Mul => fold_question(spec, rng),
        Operator::Sub => subtraction(spec, rng),
        Operator::Div => division(spec, rng),
    }
}

/// True when subtracting `subtrahend` from `minuend` needs regrouping.
///
/// Both numbers are compared as equal-length decimal strings, left-padded with
/// zeros; borrowing means some digit of the minuend is smaller than the digit
/// below it.
#[must_use]
pub fn requires_borrow(minuend: u64, subtrahend: u64) -> bool {
    let width = minuend.to_string().len().max(subtrahend.to_string().len());
    let top = format!("{minuend:0>width$}");
    let bottom = format!("{subtrahend:0>width$}");
    top.bytes().zip(bottom.bytes()).any(|(t, b)| t < b)
}

/// Whether any `minuend > subtrahend` pair drawn from these specs can borrow.
///
/// A single-digit minuend never can. Otherwise a pair exists as soon as the
/// subtrahend can be no longer than the minuend (e.g. `20 - 11`, `10 - 1`).
#[must_use]
pub fn borrowing_possible(minuend: DigitSpec, subtrahend: DigitSpec) -> bool {
    let top = minuend.max_digits();
    top >= 2 && subtrahend.min_digits() <= top
}

fn fold_question<R: RandomRange + ?Sized>(
    spec: &LevelSpec,
    rng: &mut R,
) -> Result<Question, GenerateError> {
    let count = resolve_count(rng, spec.operands) as usize;
    let operands = (0..count)
        .map(|i| sample_operand(rng, spec.digits.for_operand(i)))
        .collect();
    Ok(Question::evaluate(spec.kind, operands)?)
}

fn subtraction<R: RandomRange + ?Sized>(
    spec: &LevelSpec,
    rng: &mut R,
) -> Result<Question, GenerateError> {
    let top = spec.digits.for_operand(0);
    let bottom = spec.digits.for_operand(1);

    if !spec.borrowing {
        let a = sample_operand(rng, top);
        let b = sample_operand(rng, bottom);
        let (minuend, subtrahend) = if a < b { (b, a) } else { (a, b) };
        return Ok(Question::evaluate(
            Operator::Sub,
            vec![minuend, subtrahend],
        )?);
    }

    let unsatisfiable = || GenerateError::UnsatisfiableConstraint {
        level: spec.name.to_string(),
        constraint: Constraint::Borrowing,
    };

    if !borrowing_possible(top, bottom) {
        return Err(unsatisfiable());
    }

    for attempt in 1..=MAX_BORROW_ATTEMPTS {
        let minuend = sample_operand(rng, top);
        let subtrahend = sample_operand(rng, bottom);
        if minuend > subtrahend && requires_borrow(minuend, subtrahend) {
            tracing::trace!(attempt, minuend, subtrahend, "borrowing pair found");
            return Ok(Question::evaluate(
                Operator::Sub,
                vec![minuend, subtrahend],
            )?);
        }
    }

    tracing::warn!(
        level = spec.name,
        attempts = MAX_BORROW_ATTEMPTS,
        "No borrowing pair found; giving up"
    );
    Err(unsatisfiable())
}

fn division<R: RandomRange + ?Sized>(
    spec: &LevelSpec,
    rng: &mut R,
) -> Result<Question, GenerateError> {
    let (answer_digits, divisor_digits) = spec.division_digits();
    let divisor = sample_nonzero_operand(rng, divisor_digits);
    let answer = sample_operand(rng, answer_digits);
    let dividend = Question::evaluate(Operator::Mul, vec![divisor, answer])?.answer();
    Ok(Question::new(
        Operator::Div,
        vec![dividend, divisor],
        answer,
    )?)
}
