use std::fmt::{self, Display, Formatter};

use crate::pattern::{SignalPattern, Wire};

/// A physical position on the display.
///
/// ```text
///    top
/// tl     tr
///   middle
/// bl     br
///   bottom
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Top,
    TopLeft,
    TopRight,
    Middle,
    BottomLeft,
    BottomRight,
    Bottom,
}

use Segment::*;

impl Segment {
    pub const ALL: [Segment; 7] = [Top, TopLeft, TopRight, Middle, BottomLeft, BottomRight, Bottom];

    fn index(self) -> usize {
        self as usize
    }

    /// How many of the ten digits light this segment.
    pub fn occurrences(self) -> usize {
        DIGIT_SEGMENTS
            .iter()
            .filter(|segments| segments.contains(&self))
            .count()
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Top => "top",
            TopLeft => "top-left",
            TopRight => "top-right",
            Middle => "middle",
            BottomLeft => "bottom-left",
            BottomRight => "bottom-right",
            Bottom => "bottom",
        })
    }
}

/// The segments lit for each digit on an unscrambled display.
pub const DIGIT_SEGMENTS: [&[Segment]; 10] = [
    &[Top, TopLeft, TopRight, BottomLeft, BottomRight, Bottom],
    &[TopRight, BottomRight],
    &[Top, TopRight, Middle, BottomLeft, Bottom],
    &[Top, TopRight, Middle, BottomRight, Bottom],
    &[TopLeft, TopRight, Middle, BottomRight],
    &[Top, TopLeft, Middle, BottomRight, Bottom],
    &[Top, TopLeft, Middle, BottomLeft, BottomRight, Bottom],
    &[Top, TopRight, BottomRight],
    &[Top, TopLeft, TopRight, Middle, BottomLeft, BottomRight, Bottom],
    &[Top, TopLeft, TopRight, Middle, BottomRight, Bottom],
];

/// Which wire drives each segment, for a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentMap {
    wires: [Option<Wire>; 7],
}

impl SegmentMap {
    pub fn new() -> SegmentMap {
        SegmentMap::default()
    }

    pub fn get(&self, segment: Segment) -> Option<Wire> {
        self.wires[segment.index()]
    }

    pub fn assign(&mut self, segment: Segment, wire: Wire) {
        self.wires[segment.index()] = Some(wire);
    }

    /// The segment driven by `wire`, if it has been identified.
    pub fn segment_of(&self, wire: Wire) -> Option<Segment> {
        Segment::ALL
            .into_iter()
            .find(|segment| self.get(*segment) == Some(wire))
    }

    pub fn is_complete(&self) -> bool {
        self.wires.iter().all(Option::is_some)
    }

    /// True if every segment has a wire and no two segments share one.
    pub fn is_bijection(&self) -> bool {
        self.is_complete() && self.resolved_wires().len() == 7
    }

    /// All wires identified so far.
    pub fn resolved_wires(&self) -> SignalPattern {
        self.wires.iter().flatten().copied().collect()
    }

    /// The wires lighting `segments`, or None if any of them is still
    /// unknown.
    pub fn wires_for(&self, segments: &[Segment]) -> Option<SignalPattern> {
        segments
            .iter()
            .map(|segment| self.get(*segment))
            .collect::<Option<SignalPattern>>()
    }

    /// The scrambled pattern that shows `digit` under this mapping.
    pub fn pattern_for_digit(&self, digit: u8) -> Option<SignalPattern> {
        DIGIT_SEGMENTS
            .get(usize::from(digit))
            .and_then(|segments| self.wires_for(segments))
    }
}

#[cfg(test)]
fn identity_map() -> SegmentMap {
    let mut map = SegmentMap::new();
    for (segment, wire) in Segment::ALL.into_iter().zip(Wire::ALL) {
        map.assign(segment, wire);
    }
    map
}

#[test]
fn test_occurrences() {
    assert_eq!(Top.occurrences(), 8);
    assert_eq!(TopLeft.occurrences(), 6);
    assert_eq!(TopRight.occurrences(), 8);
    assert_eq!(Middle.occurrences(), 7);
    assert_eq!(BottomLeft.occurrences(), 4);
    assert_eq!(BottomRight.occurrences(), 9);
    assert_eq!(Bottom.occurrences(), 7);
}

#[test]
fn test_identity_patterns() {
    let map = identity_map();
    assert!(map.is_bijection());
    let expected = [
        "abcefg", "cf", "acdeg", "acdfg", "bcdf", "abdfg", "abdefg", "acf", "abcdefg", "abcdfg",
    ];
    for (digit, want) in expected.iter().enumerate() {
        let got = map
            .pattern_for_digit(digit as u8)
            .map(|p| p.to_string());
        assert_eq!(got.as_deref(), Some(*want));
    }
    assert_eq!(map.pattern_for_digit(10), None);
}

#[test]
fn test_partial_map() {
    let mut map = SegmentMap::new();
    let d = Wire::from_char('d').unwrap();
    map.assign(Top, d);
    assert!(!map.is_complete());
    assert!(!map.is_bijection());
    assert_eq!(map.segment_of(d), Some(Top));
    assert_eq!(map.pattern_for_digit(7), None);
    assert_eq!(map.wires_for(&[Top]).map(|p| p.to_string()).as_deref(), Some("d"));
}

#[test]
fn test_shared_wire_is_not_a_bijection() {
    let mut map = identity_map();
    map.assign(Bottom, Wire::from_char('a').unwrap());
    assert!(map.is_complete());
    assert!(!map.is_bijection());
}
