use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::pattern::SignalPattern;
use crate::segment::Segment;

/// What a deduction step was trying to pin down when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Finding the input pattern that shows a digit.
    Digit(u8),
    /// Finding the wire that drives a segment.
    Segment(Segment),
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Step::Digit(digit) => write!(f, "the pattern for digit {}", digit),
            Step::Segment(segment) => write!(f, "the {} segment", segment),
        }
    }
}

/// Why a single entry could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line does not have the shape `p1 .. p10 | o1 .. o4`.
    #[error("malformed entry: {0}")]
    MalformedEntry(String),
    /// A deduction step produced zero or several candidates.
    #[error("inconsistent deduction: expected exactly one candidate for {step}, found {found}")]
    InconsistentDeduction { step: Step, found: usize },
    #[error("output pattern '{0}' matches none of the input patterns")]
    UnmatchedOutputPattern(SignalPattern),
}

/// A [`DecodeError`] located in the puzzle input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {source}")]
pub struct PuzzleError {
    pub line: usize,
    #[source]
    pub source: DecodeError,
}

#[test]
fn test_messages() {
    let e = DecodeError::InconsistentDeduction {
        step: Step::Segment(Segment::TopRight),
        found: 2,
    };
    assert_eq!(
        e.to_string(),
        "inconsistent deduction: expected exactly one candidate for the top-right segment, found 2"
    );
    let e = PuzzleError {
        line: 3,
        source: DecodeError::MalformedEntry("expected 10 input patterns, got 9".to_string()),
    };
    assert_eq!(
        e.to_string(),
        "line 3: malformed entry: expected 10 input patterns, got 9"
    );
}
