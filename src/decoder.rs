//! Recovering the wire-to-segment mapping of an entry.
//!
//! The deduction never searches.  Each step is forced by the shape of a
//! standard seven-segment display:
//!
//! 1. 1, 4, 7 and 8 are the only digits with 2, 4, 3 and 7 segments.
//! 2. 7 is 1 plus the top segment.
//! 3. Across the ten digits, bottom-left is lit 4 times, top-left 6
//!    times and bottom-right 9 times; no other segment shares those
//!    counts.
//! 4. 1 is top-right plus bottom-right.
//! 5. 2 is the only 5-segment digit without bottom-right.
//! 6. 4 is top-left, top-right, bottom-right and the middle.
//! 7. 8 lights everything, so bottom is whatever is left.
//! 8. With every segment known, 0, 3, 5, 6 and 9 can be drawn and
//!    looked up among the remaining inputs.

use tracing::{event, span, Level};

use crate::entry::Entry;
use crate::error::{DecodeError, Step};
use crate::pattern::{SignalPattern, Wire};
use crate::segment::{Segment, SegmentMap};

/// An input pattern together with the digit it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedDigit {
    pub pattern: SignalPattern,
    pub value: u8,
}

/// The fully resolved state of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoding {
    segments: SegmentMap,
    inputs: [SignalPattern; 10],
    /// `digits[d]` is the index in `inputs` of the pattern showing `d`.
    digits: [usize; 10],
}

impl Decoding {
    pub fn segments(&self) -> &SegmentMap {
        &self.segments
    }

    pub fn pattern_of(&self, digit: u8) -> Option<SignalPattern> {
        self.digits
            .get(usize::from(digit))
            .map(|index| self.inputs[*index])
    }

    pub fn digit_of(&self, pattern: SignalPattern) -> Option<u8> {
        self.digits
            .iter()
            .position(|index| self.inputs[*index] == pattern)
            .map(|digit| digit as u8)
    }

    /// All ten inputs, in digit order.
    pub fn digits(&self) -> impl Iterator<Item = DecodedDigit> + '_ {
        self.digits
            .iter()
            .zip(0u8..)
            .map(|(index, value)| DecodedDigit {
                pattern: self.inputs[*index],
                value,
            })
    }

    /// Reads the four `outputs` as a base-10 number, most significant
    /// first.
    pub fn read(&self, outputs: &[SignalPattern; 4]) -> Result<u16, DecodeError> {
        let mut number: u16 = 0;
        for output in outputs {
            match self.digit_of(*output) {
                Some(digit) => {
                    number = number * 10 + u16::from(digit);
                }
                None => {
                    return Err(DecodeError::UnmatchedOutputPattern(*output));
                }
            }
        }
        Ok(number)
    }
}

fn exactly_one<I>(step: Step, mut candidates: I) -> Result<I::Item, DecodeError>
where
    I: Iterator,
{
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(DecodeError::InconsistentDeduction { step, found: 0 }),
        (Some(_), Some(_)) => Err(DecodeError::InconsistentDeduction {
            step,
            found: 2 + candidates.count(),
        }),
    }
}

fn single_wire(segment: Segment, candidates: SignalPattern) -> Result<Wire, DecodeError> {
    candidates
        .single_wire()
        .ok_or(DecodeError::InconsistentDeduction {
            step: Step::Segment(segment),
            found: candidates.len(),
        })
}

struct Deducer<'a> {
    inputs: &'a [SignalPattern; 10],
    /// Index of the input known to show each digit.
    known: [Option<usize>; 10],
    segments: SegmentMap,
}

impl<'a> Deducer<'a> {
    fn new(inputs: &'a [SignalPattern; 10]) -> Deducer<'a> {
        Deducer {
            inputs,
            known: [None; 10],
            segments: SegmentMap::new(),
        }
    }

    fn is_known(&self, index: usize) -> bool {
        self.known.contains(&Some(index))
    }

    fn unresolved(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.inputs.len()).filter(move |index| !self.is_known(*index))
    }

    fn identify(&mut self, digit: u8, index: usize) {
        event!(
            Level::TRACE,
            "digit {} is shown by {}",
            digit,
            self.inputs[index]
        );
        self.known[usize::from(digit)] = Some(index);
    }

    fn resolve(&mut self, segment: Segment, wire: Wire) {
        event!(Level::TRACE, "{} segment is driven by wire {}", segment, wire);
        self.segments.assign(segment, wire);
    }

    fn pattern(&self, digit: u8) -> Result<SignalPattern, DecodeError> {
        self.known[usize::from(digit)]
            .map(|index| self.inputs[index])
            .ok_or(DecodeError::InconsistentDeduction {
                step: Step::Digit(digit),
                found: 0,
            })
    }

    fn wires(&self, segments: &[Segment]) -> Result<SignalPattern, DecodeError> {
        segments.iter().map(|segment| self.wire(*segment)).collect()
    }

    fn wire(&self, segment: Segment) -> Result<Wire, DecodeError> {
        self.segments
            .get(segment)
            .ok_or(DecodeError::InconsistentDeduction {
                step: Step::Segment(segment),
                found: 0,
            })
    }

    fn identify_unique_lengths(&mut self) -> Result<(), DecodeError> {
        for digit in [1, 4, 7, 8] {
            let inputs = self.inputs;
            let index = exactly_one(
                Step::Digit(digit),
                (0..inputs.len()).filter(|i| inputs[*i].unique_length_digit() == Some(digit)),
            )?;
            self.identify(digit, index);
        }
        Ok(())
    }

    fn resolve_top(&mut self) -> Result<(), DecodeError> {
        let top = single_wire(Segment::Top, self.pattern(7)?.difference(self.pattern(1)?))?;
        self.resolve(Segment::Top, top);
        Ok(())
    }

    fn resolve_by_frequency(&mut self) -> Result<(), DecodeError> {
        let counts: Vec<(Wire, usize)> = Wire::ALL
            .into_iter()
            .map(|wire| {
                let n = self.inputs.iter().filter(|p| p.contains(wire)).count();
                (wire, n)
            })
            .collect();
        event!(Level::TRACE, "wire frequencies: {:?}", counts);
        for segment in [Segment::BottomLeft, Segment::BottomRight, Segment::TopLeft] {
            let target = segment.occurrences();
            let wire = exactly_one(
                Step::Segment(segment),
                counts
                    .iter()
                    .filter(|(_, n)| *n == target)
                    .map(|(wire, _)| *wire),
            )?;
            self.resolve(segment, wire);
        }
        Ok(())
    }

    fn resolve_top_right(&mut self) -> Result<(), DecodeError> {
        let bottom_right = self.wires(&[Segment::BottomRight])?;
        let top_right = single_wire(Segment::TopRight, self.pattern(1)?.difference(bottom_right))?;
        self.resolve(Segment::TopRight, top_right);
        Ok(())
    }

    fn identify_two(&mut self) -> Result<(), DecodeError> {
        let bottom_right = self.wire(Segment::BottomRight)?;
        let index = exactly_one(
            Step::Digit(2),
            self.unresolved().filter(|i| {
                let p = self.inputs[*i];
                p.len() == 5 && !p.contains(bottom_right)
            }),
        )?;
        self.identify(2, index);
        Ok(())
    }

    fn resolve_middle(&mut self) -> Result<(), DecodeError> {
        let known = self.wires(&[Segment::TopLeft, Segment::TopRight, Segment::BottomRight])?;
        let middle = single_wire(Segment::Middle, self.pattern(4)?.difference(known))?;
        self.resolve(Segment::Middle, middle);
        Ok(())
    }

    fn resolve_bottom(&mut self) -> Result<(), DecodeError> {
        let known = self.wires(&[
            Segment::Top,
            Segment::TopLeft,
            Segment::TopRight,
            Segment::Middle,
            Segment::BottomLeft,
            Segment::BottomRight,
        ])?;
        let bottom = single_wire(Segment::Bottom, self.pattern(8)?.difference(known))?;
        self.resolve(Segment::Bottom, bottom);
        Ok(())
    }

    fn identify_remaining(&mut self) -> Result<(), DecodeError> {
        for digit in [0, 3, 5, 6, 9] {
            let expected = self.segments.pattern_for_digit(digit).ok_or(
                DecodeError::InconsistentDeduction {
                    step: Step::Digit(digit),
                    found: 0,
                },
            )?;
            let index = exactly_one(
                Step::Digit(digit),
                self.unresolved().filter(|i| self.inputs[*i] == expected),
            )?;
            self.identify(digit, index);
        }
        Ok(())
    }

    fn finish(self) -> Result<Decoding, DecodeError> {
        let mut digits = [0; 10];
        for (digit, slot) in digits.iter_mut().enumerate() {
            *slot = self.known[digit].ok_or(DecodeError::InconsistentDeduction {
                step: Step::Digit(digit as u8),
                found: 0,
            })?;
        }
        Ok(Decoding {
            segments: self.segments,
            inputs: *self.inputs,
            digits,
        })
    }
}

/// Works out which wire drives each segment for `entry`, and which
/// digit each of its inputs shows.
pub fn deduce(entry: &Entry) -> Result<Decoding, DecodeError> {
    let span = span!(Level::DEBUG, "deduce", entry = %entry);
    let _enter = span.enter();

    let mut deducer = Deducer::new(entry.inputs());
    deducer.identify_unique_lengths()?;
    deducer.resolve_top()?;
    deducer.resolve_by_frequency()?;
    deducer.resolve_top_right()?;
    deducer.identify_two()?;
    deducer.resolve_middle()?;
    deducer.resolve_bottom()?;
    // Bottom is the complement of six wires within all seven, so it
    // only resolves when those six were distinct.
    debug_assert!(deducer.segments.is_bijection());
    deducer.identify_remaining()?;
    deducer.finish()
}

/// Decodes the four output digits of `entry`.
pub fn decode(entry: &Entry) -> Result<u16, DecodeError> {
    let decoding = deduce(entry)?;
    let value = decoding.read(entry.outputs())?;
    event!(Level::DEBUG, "entry {} reads {:04}", entry, value);
    Ok(value)
}

#[cfg(test)]
const EXAMPLE: &str =
    "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

#[cfg(test)]
fn entry(s: &str) -> Entry {
    s.parse().unwrap()
}

#[cfg(test)]
fn pat(s: &str) -> SignalPattern {
    SignalPattern::try_from(s).unwrap()
}

#[cfg(test)]
fn wire(ch: char) -> Wire {
    Wire::from_char(ch).unwrap()
}

#[test]
fn test_decode_example() {
    assert_eq!(decode(&entry(EXAMPLE)), Ok(5353));
}

#[test]
fn test_deduce_example_segments() {
    let decoding = deduce(&entry(EXAMPLE)).unwrap();
    let segments = decoding.segments();
    assert!(segments.is_bijection());
    assert_eq!(segments.get(Segment::Top), Some(wire('d')));
    assert_eq!(segments.get(Segment::TopLeft), Some(wire('e')));
    assert_eq!(segments.get(Segment::TopRight), Some(wire('a')));
    assert_eq!(segments.get(Segment::Middle), Some(wire('f')));
    assert_eq!(segments.get(Segment::BottomLeft), Some(wire('g')));
    assert_eq!(segments.get(Segment::BottomRight), Some(wire('b')));
    assert_eq!(segments.get(Segment::Bottom), Some(wire('c')));
}

#[test]
fn test_deduce_example_digits() {
    let decoding = deduce(&entry(EXAMPLE)).unwrap();
    let expected = [
        "cagedb", "ab", "gcdfa", "fbcad", "eafb", "cdfbe", "cdfgeb", "dab", "acedgfb", "cefabd",
    ];
    for (digit, want) in expected.iter().enumerate() {
        assert_eq!(decoding.pattern_of(digit as u8), Some(pat(want)));
        assert_eq!(decoding.digit_of(pat(want)), Some(digit as u8));
    }
    let values: Vec<u8> = decoding.digits().map(|d| d.value).collect();
    assert_eq!(values, (0..10).collect::<Vec<u8>>());
    assert_eq!(decoding.pattern_of(10), None);
}

#[test]
fn test_decode_letter_order_is_irrelevant() {
    let reordered =
        "bcdefga ebfdc afdcg dacbf bad dbafec begfdc bfae bdegac ba | bcdef abcdf fedcb fabdc";
    assert_eq!(decode(&entry(reordered)), Ok(5353));
}

#[test]
fn test_reduced_fixture_resolves_early_steps() {
    // Six inputs only; the rest of the sample is missing.
    let e = SignalPattern::EMPTY;
    let inputs = [
        pat("ab"),
        pat("abd"),
        pat("abef"),
        pat("abcdef"),
        pat("abcdf"),
        pat("abcef"),
        e,
        e,
        e,
        e,
    ];
    let mut deducer = Deducer::new(&inputs);
    assert_eq!(
        deducer.identify_unique_lengths(),
        Err(DecodeError::InconsistentDeduction {
            step: Step::Digit(8),
            found: 0
        })
    );
    assert_eq!(deducer.pattern(1), Ok(pat("ab")));
    assert_eq!(deducer.pattern(7), Ok(pat("abd")));
    assert_eq!(deducer.pattern(4), Ok(pat("abef")));

    assert_eq!(deducer.resolve_top(), Ok(()));
    assert_eq!(deducer.segments.get(Segment::Top), Some(wire('d')));

    // Nothing is lit nine times.
    assert_eq!(
        deducer.resolve_by_frequency(),
        Err(DecodeError::InconsistentDeduction {
            step: Step::Segment(Segment::BottomRight),
            found: 0
        })
    );
}

#[test]
fn test_seven_not_one_plus_a_segment() {
    // The 3-segment pattern "acd" does not contain the 1 ("ab"), so
    // 7 minus 1 leaves two wires.
    let line =
        "acedgfb cdfbe gcdfa fbcad acd cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";
    assert_eq!(
        decode(&entry(line)),
        Err(DecodeError::InconsistentDeduction {
            step: Step::Segment(Segment::Top),
            found: 2
        })
    );
}

#[test]
fn test_identical_one_and_seven() {
    let example = entry(EXAMPLE);
    let mut deducer = Deducer::new(example.inputs());
    deducer.identify(1, 9);
    deducer.identify(7, 9);
    assert_eq!(
        deducer.resolve_top(),
        Err(DecodeError::InconsistentDeduction {
            step: Step::Segment(Segment::Top),
            found: 0
        })
    );
}

#[test]
fn test_missing_unique_length() {
    // No 2-segment input, two 3-segment ones.
    let line =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb abg | cdfeb fcadb cdfeb cdbaf";
    assert_eq!(
        decode(&entry(line)),
        Err(DecodeError::InconsistentDeduction {
            step: Step::Digit(1),
            found: 0
        })
    );
}

#[test]
fn test_unmatched_output() {
    // The last output lights only the top segment, which is no digit.
    let line = "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb d";
    assert_eq!(
        decode(&entry(line)),
        Err(DecodeError::UnmatchedOutputPattern(pat("d")))
    );
}

#[test]
fn test_output_with_unused_wire() {
    // None of these inputs uses 'g'.
    let inputs = [
        pat("ab"),
        pat("abd"),
        pat("abef"),
        pat("abcdef"),
        pat("bcdef"),
        pat("acdf"),
        pat("abcdf"),
        pat("abcde"),
        pat("acdef"),
        pat("abcef"),
    ];
    let decoding = Decoding {
        segments: SegmentMap::new(),
        inputs,
        digits: [3, 0, 4, 5, 2, 6, 7, 1, 8, 9],
    };
    assert_eq!(
        decoding.read(&[pat("ab"), pat("abd"), pat("abef"), pat("ab")]),
        Ok(1741)
    );
    assert_eq!(
        decoding.read(&[pat("ab"), pat("abg"), pat("ab"), pat("ab")]),
        Err(DecodeError::UnmatchedOutputPattern(pat("abg")))
    );
}

#[test]
fn test_read_largest_value() {
    let decoding = deduce(&entry(EXAMPLE)).unwrap();
    let nine = pat("cefabd");
    assert_eq!(decoding.read(&[nine; 4]), Ok(9999));
}

#[cfg(test)]
fn decode_example_with(inputs: &str) -> Result<u16, DecodeError> {
    decode(&entry(&format!("{} | cdfeb fcadb cdfeb cdbaf", inputs)))
}

#[cfg(test)]
fn inconsistent(step: Step, found: usize) -> Result<u16, DecodeError> {
    Err(DecodeError::InconsistentDeduction { step, found })
}

#[test]
fn test_frequency_collisions() {
    // 'c' and 'e' are each lit six times.
    assert_eq!(
        decode_example_with("acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb abdefg ab"),
        inconsistent(Step::Segment(Segment::TopLeft), 2)
    );
    // 'c' and 'g' are each lit four times.
    assert_eq!(
        decode_example_with("acedgfb cdfbe abdef abdfg dab cefabd cdfgeb eafb abdefg ab"),
        inconsistent(Step::Segment(Segment::BottomLeft), 2)
    );
}

#[test]
fn test_bottom_right_outside_one() {
    // The wire lit nine times is 'd', which the 1 does not light.
    assert_eq!(
        decode_example_with("acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb cdef cagedb ab"),
        inconsistent(Step::Segment(Segment::TopRight), 2)
    );
}

#[test]
fn test_no_two() {
    // Every 5-segment pattern lights bottom-right ('a').
    assert_eq!(
        decode_example_with("acedgfb acdef gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab"),
        inconsistent(Step::Digit(2), 0)
    );
}

#[test]
fn test_middle_not_single() {
    // The 4 lights both 'e' and 'f' outside the other three segments.
    assert_eq!(
        decode_example_with("acedgfb cdfbe adefg fbcad dab cefabd cdfgeb eafb cagedb ab"),
        inconsistent(Step::Segment(Segment::Middle), 2)
    );
}

#[test]
fn test_bottom_not_single() {
    // Bottom-left and middle both land on 'e'.
    assert_eq!(
        decode_example_with("acedgfb abcdg gcdfa fbcad dab cefabd abcdfg eafb cagedb ab"),
        inconsistent(Step::Segment(Segment::Bottom), 2)
    );
}

#[test]
fn test_remaining_digit_missing() {
    // No input lights the wires the map gives for 0.
    assert_eq!(
        decode_example_with("acedgfb cdfbe acdeg fbcad dab cefabd cdfgeb eafb cagedb ab"),
        inconsistent(Step::Digit(0), 0)
    );
}
