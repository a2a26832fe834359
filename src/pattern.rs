use std::fmt::{self, Display, Formatter};

use crate::error::DecodeError;

/// One of the seven signal wires, `a` through `g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wire(u8);

impl Wire {
    pub const ALL: [Wire; 7] = [
        Wire(0),
        Wire(1),
        Wire(2),
        Wire(3),
        Wire(4),
        Wire(5),
        Wire(6),
    ];

    pub fn from_char(ch: char) -> Option<Wire> {
        match ch {
            'a'..='g' => Some(Wire(ch as u8 - b'a')),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        char::from(b'a' + self.0)
    }

    fn bit(self) -> u8 {
        1 << self.0
    }
}

impl Display for Wire {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The set of wires lit for one displayed digit.
///
/// Stored as a bit set, so two patterns compare equal exactly when
/// they light the same wires, whatever order the letters were written
/// in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignalPattern(u8);

impl SignalPattern {
    pub const EMPTY: SignalPattern = SignalPattern(0);
    pub const ALL: SignalPattern = SignalPattern(0b111_1111);

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, wire: Wire) -> bool {
        self.0 & wire.bit() != 0
    }

    pub fn with(self, wire: Wire) -> SignalPattern {
        SignalPattern(self.0 | wire.bit())
    }

    pub fn union(self, other: SignalPattern) -> SignalPattern {
        SignalPattern(self.0 | other.0)
    }

    /// Wires lit in `self` but not in `other`.
    pub fn difference(self, other: SignalPattern) -> SignalPattern {
        SignalPattern(self.0 & !other.0)
    }

    /// The only wire in this pattern, if it holds exactly one.
    pub fn single_wire(self) -> Option<Wire> {
        if self.len() == 1 {
            self.wires().next()
        } else {
            None
        }
    }

    pub fn wires(self) -> impl Iterator<Item = Wire> {
        Wire::ALL.into_iter().filter(move |w| self.contains(*w))
    }

    /// The digit this pattern must show if its segment count is
    /// unique to that digit.
    ///
    /// | segments | digit |
    /// | -------- | ----- |
    /// | 2        | 1     |
    /// | 3        | 7     |
    /// | 4        | 4     |
    /// | 7        | 8     |
    pub fn unique_length_digit(self) -> Option<u8> {
        match self.len() {
            2 => Some(1),
            3 => Some(7),
            4 => Some(4),
            7 => Some(8),
            _ => None,
        }
    }
}

impl FromIterator<Wire> for SignalPattern {
    fn from_iter<I: IntoIterator<Item = Wire>>(iter: I) -> SignalPattern {
        iter.into_iter().fold(SignalPattern::EMPTY, SignalPattern::with)
    }
}

impl TryFrom<&str> for SignalPattern {
    type Error = DecodeError;

    fn try_from(s: &str) -> Result<SignalPattern, DecodeError> {
        if s.is_empty() {
            return Err(DecodeError::MalformedEntry(
                "empty signal pattern".to_string(),
            ));
        }
        let mut pattern = SignalPattern::EMPTY;
        for ch in s.chars() {
            match Wire::from_char(ch) {
                Some(wire) if pattern.contains(wire) => {
                    return Err(DecodeError::MalformedEntry(format!(
                        "wire '{}' appears more than once in pattern '{}'",
                        ch, s
                    )));
                }
                Some(wire) => {
                    pattern = pattern.with(wire);
                }
                None => {
                    return Err(DecodeError::MalformedEntry(format!(
                        "'{}' in pattern '{}' is not a wire (expected a-g)",
                        ch.escape_default(),
                        s
                    )));
                }
            }
        }
        Ok(pattern)
    }
}

impl Display for SignalPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for wire in self.wires() {
            write!(f, "{}", wire)?;
        }
        Ok(())
    }
}

#[cfg(test)]
fn pat(s: &str) -> SignalPattern {
    SignalPattern::try_from(s).unwrap()
}

#[test]
fn test_wire_chars() {
    assert_eq!(Wire::from_char('a').map(Wire::as_char), Some('a'));
    assert_eq!(Wire::from_char('g').map(Wire::as_char), Some('g'));
    assert_eq!(Wire::from_char('h'), None);
    assert_eq!(Wire::from_char('A'), None);
}

#[test]
fn test_pattern_is_a_set() {
    assert_eq!(pat("cdfbe"), pat("bcdef"));
    assert_eq!(pat("ab"), pat("ba"));
    assert_ne!(pat("ab"), pat("abc"));
    assert_eq!(pat("gfedcba"), SignalPattern::ALL);
    assert_eq!(pat("cdfbe").to_string(), "bcdef");
}

#[test]
fn test_pattern_rejects_bad_tokens() {
    assert!(matches!(
        SignalPattern::try_from("abx"),
        Err(DecodeError::MalformedEntry(_))
    ));
    assert!(matches!(
        SignalPattern::try_from("aba"),
        Err(DecodeError::MalformedEntry(_))
    ));
    assert!(matches!(
        SignalPattern::try_from("a1"),
        Err(DecodeError::MalformedEntry(_))
    ));
    assert!(matches!(
        SignalPattern::try_from(""),
        Err(DecodeError::MalformedEntry(_))
    ));
}

#[test]
fn test_single_wire() {
    assert_eq!(pat("dab").difference(pat("ab")).single_wire(), Wire::from_char('d'));
    assert_eq!(pat("ab").difference(pat("ab")).single_wire(), None);
    assert_eq!(pat("abc").difference(pat("a")).single_wire(), None);
}

#[test]
fn test_unique_length_digit() {
    assert_eq!(pat("ab").unique_length_digit(), Some(1));
    assert_eq!(pat("dab").unique_length_digit(), Some(7));
    assert_eq!(pat("eafb").unique_length_digit(), Some(4));
    assert_eq!(pat("acedgfb").unique_length_digit(), Some(8));
    assert_eq!(pat("cdfbe").unique_length_digit(), None);
    assert_eq!(pat("cefabd").unique_length_digit(), None);
}
