//! Hints: spend one to learn the shape of the answer.

use std::fmt;

use mathmaster_types::{HintError, PlayerProgress, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub digits: usize,
    pub leading_digit: u8,
}

impl Hint {
    #[must_use]
    pub fn for_answer(answer: u64) -> Self {
        let text = answer.to_string();
        let leading_digit = text.bytes().next().map_or(0, |b| b - b'0');
        Self {
            digits: text.len(),
            leading_digit,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits == 1 {
            return write!(f, "The answer is a single digit.");
        }
        write!(
            f,
            "The answer has {} digits and starts with {}.",
            self.digits, self.leading_digit
        )
    }
}

/// Spend a hint on `question`.
pub fn use_hint(
    progress: &PlayerProgress,
    question: &Question,
) -> Result<(PlayerProgress, Hint), HintError> {
    if progress.hints_remaining == 0 {
        return Err(HintError::Exhausted);
    }
    let mut next = progress.clone();
    next.hints_remaining -= 1;
    next.hints_used = next.hints_used.saturating_add(1);
    Ok((next, Hint::for_answer(question.answer())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathmaster_types::Operator;

    #[test]
    fn hint_reveals_length_and_leading_digit() {
        let q = Question::evaluate(Operator::Mul, vec![47, 9]).unwrap();
        let (progress, hint) = use_hint(&PlayerProgress::new(2), &q).unwrap();
        assert_eq!(
            hint,
            Hint {
                digits: 3,
                leading_digit: 4
            }
        );
        assert_eq!(hint.to_string(), "The answer has 3 digits and starts with 4.");
        assert_eq!(progress.hints_remaining, 1);
        assert_eq!(progress.hints_used, 1);
    }

    #[test]
    fn single_digit_hint_keeps_the_answer_hidden() {
        let q = Question::evaluate(Operator::Add, vec![3, 4]).unwrap();
        let (_, hint) = use_hint(&PlayerProgress::new(1), &q).unwrap();
        assert_eq!(hint.to_string(), "The answer is a single digit.");
    }

    #[test]
    fn no_hints_left() {
        let q = Question::evaluate(Operator::Add, vec![3, 4]).unwrap();
        assert_eq!(
            use_hint(&PlayerProgress::new(0), &q),
            Err(HintError::Exhausted)
        );
    }
}
