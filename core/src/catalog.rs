//! The digit-based level catalog.
//!
//! Display order is the play order: addition, subtraction, multiplication,
//! then division. Each name follows the `"Category: description"` convention.

use mathmaster_types::{CountSpec, DigitSpec, LevelSpec, Operator};

const ONE: DigitSpec = DigitSpec::Fixed(1);
const TWO: DigitSpec = DigitSpec::Fixed(2);
const THREE_TO_FOUR: DigitSpec = DigitSpec::Range(3, 4);
// First operand 3 digits, second 4, any further operands 3.
const THREE_THEN_FOUR: DigitSpec =
    DigitSpec::PerOperand(&[DigitSpec::Fixed(3), DigitSpec::Fixed(4)]);
const PAIR: CountSpec = CountSpec::Fixed(2);
const THREE_TO_FOUR_OPERANDS: CountSpec = CountSpec::Range(3, 4);

static LEVELS: [LevelSpec; 20] = [
    LevelSpec::new("Addition: 1 digit × 2 numbers", Operator::Add, ONE, PAIR),
    LevelSpec::new("Addition: 2 digit × 2 numbers", Operator::Add, TWO, PAIR),
    LevelSpec::new(
        "Addition: 2 digit × 3-4 numbers",
        Operator::Add,
        TWO,
        THREE_TO_FOUR_OPERANDS,
    ),
    LevelSpec::new(
        "Addition: 3-4 digit × 2 numbers",
        Operator::Add,
        THREE_TO_FOUR,
        PAIR,
    ),
    LevelSpec::new(
        "Addition: 3-4 digit × 3-4 numbers",
        Operator::Add,
        THREE_TO_FOUR,
        THREE_TO_FOUR_OPERANDS,
    ),
    LevelSpec::new("Subtraction: 1 digit × 2 numbers", Operator::Sub, ONE, PAIR),
    LevelSpec::new("Subtraction: 2 digit × 2 numbers", Operator::Sub, TWO, PAIR),
    LevelSpec::new(
        "Subtraction: 2 digit × 2 numbers (borrowing)",
        Operator::Sub,
        TWO,
        PAIR,
    )
    .with_borrowing(),
    LevelSpec::new(
        "Subtraction: 3-4 digit × 2 numbers",
        Operator::Sub,
        THREE_TO_FOUR,
        PAIR,
    ),
    LevelSpec::new(
        "Subtraction: 3-4 digit × 2 numbers (borrowing)",
        Operator::Sub,
        THREE_TO_FOUR,
        PAIR,
    )
    .with_borrowing(),
    LevelSpec::new("Multiplication: 1 digit × 1 digit", Operator::Mul, ONE, PAIR),
    LevelSpec::new(
        "Multiplication: 2 digit × 1 digit",
        Operator::Mul,
        DigitSpec::PerOperand(&[TWO, ONE]),
        PAIR,
    ),
    LevelSpec::new("Multiplication: 2 digit × 2 digit", Operator::Mul, TWO, PAIR),
    LevelSpec::new(
        "Multiplication: 3-4 digit × 1 digit",
        Operator::Mul,
        DigitSpec::PerOperand(&[THREE_TO_FOUR, ONE]),
        PAIR,
    ),
    LevelSpec::new(
        "Multiplication: 2 digit × 3-4 numbers",
        Operator::Mul,
        TWO,
        THREE_TO_FOUR_OPERANDS,
    ),
    LevelSpec::new(
        "Multiplication: 3-4 digit × 2 numbers",
        Operator::Mul,
        THREE_THEN_FOUR,
        PAIR,
    ),
    LevelSpec::new(
        "Multiplication: 3-4 digit × 3-4 numbers",
        Operator::Mul,
        THREE_THEN_FOUR,
        THREE_TO_FOUR_OPERANDS,
    ),
    LevelSpec::new("Division: 1 digit ÷ 1 digit", Operator::Div, ONE, PAIR),
    // [answer digits, divisor digits]
    LevelSpec::new(
        "Division: 2 digit ÷ 1 digit",
        Operator::Div,
        DigitSpec::PerOperand(&[TWO, ONE]),
        PAIR,
    ),
    LevelSpec::new("Division: 2 digit ÷ 2 digit", Operator::Div, TWO, PAIR),
];

/// All digit-based levels in display order. Level `n` is at index `n - 1`.
#[must_use]
pub fn catalog() -> &'static [LevelSpec] {
    &LEVELS
}
