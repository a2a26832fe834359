//! Property tests for the segment decoder.
//!
//! Entries are built by scrambling a standard display: a random
//! permutation decides which wire drives each segment, the ten digits
//! are drawn under it and shuffled, and four random digits are shown
//! as the output.

use proptest::prelude::*;
use sevenseg::{decode, deduce, Entry, Segment, SegmentMap, SignalPattern, Wire};

fn wiring() -> impl Strategy<Value = Vec<Wire>> {
    Just(Wire::ALL.to_vec()).prop_shuffle()
}

fn digit_order() -> impl Strategy<Value = Vec<u8>> {
    Just((0..10).collect::<Vec<u8>>()).prop_shuffle()
}

fn segment_map(wires: &[Wire]) -> SegmentMap {
    let mut map = SegmentMap::new();
    for (segment, wire) in Segment::ALL.into_iter().zip(wires.iter()) {
        map.assign(segment, *wire);
    }
    map
}

fn pattern(map: &SegmentMap, digit: u8) -> SignalPattern {
    map.pattern_for_digit(digit).expect("map is complete")
}

fn scrambled_entry(map: &SegmentMap, order: &[u8], shown: [u8; 4]) -> Entry {
    let mut inputs = [SignalPattern::EMPTY; 10];
    for (slot, digit) in inputs.iter_mut().zip(order.iter()) {
        *slot = pattern(map, *digit);
    }
    Entry::new(inputs, shown.map(|d| pattern(map, d))).expect("inputs are distinct")
}

fn value_of(shown: [u8; 4]) -> u16 {
    shown.iter().fold(0, |n, d| n * 10 + u16::from(*d))
}

/// Writes `pattern` with its letters rotated by `by`.
fn spelled(pattern: SignalPattern, by: usize) -> String {
    let mut letters: Vec<char> = pattern.to_string().chars().collect();
    let n = letters.len();
    letters.rotate_left(by % n);
    letters.into_iter().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Decoding a scrambled display gives back the digits it was
    /// showing.
    #[test]
    fn prop_round_trip(
        wires in wiring(),
        order in digit_order(),
        shown in prop::array::uniform4(0u8..10),
    ) {
        let map = segment_map(&wires);
        let entry = scrambled_entry(&map, &order, shown);
        prop_assert_eq!(decode(&entry), Ok(value_of(shown)));
    }

    /// The recovered mapping is the wiring used to scramble the entry,
    /// and it uses every wire exactly once.
    #[test]
    fn prop_recovers_a_bijection(wires in wiring(), order in digit_order()) {
        let map = segment_map(&wires);
        let entry = scrambled_entry(&map, &order, [8, 8, 8, 8]);
        let decoding = deduce(&entry).unwrap();
        prop_assert!(decoding.segments().is_bijection());
        prop_assert_eq!(decoding.segments(), &map);
        let all_inputs = entry
            .inputs()
            .iter()
            .fold(SignalPattern::EMPTY, |acc, p| acc.union(*p));
        prop_assert_eq!(decoding.segments().resolved_wires(), all_inputs);
    }

    /// Every input is assigned its own digit.
    #[test]
    fn prop_inputs_get_distinct_digits(wires in wiring(), order in digit_order()) {
        let map = segment_map(&wires);
        let entry = scrambled_entry(&map, &order, [0, 1, 2, 3]);
        let decoding = deduce(&entry).unwrap();
        let mut digits: Vec<u8> = entry
            .inputs()
            .iter()
            .map(|p| decoding.digit_of(*p).unwrap())
            .collect();
        for (input, digit) in entry.inputs().iter().zip(digits.iter()) {
            prop_assert_eq!(*input, pattern(&map, *digit));
        }
        digits.sort_unstable();
        prop_assert_eq!(digits, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn prop_deterministic(
        wires in wiring(),
        order in digit_order(),
        shown in prop::array::uniform4(0u8..10),
    ) {
        let entry = scrambled_entry(&segment_map(&wires), &order, shown);
        prop_assert_eq!(decode(&entry), decode(&entry));
        prop_assert_eq!(deduce(&entry), deduce(&entry));
    }

    /// Neither the order of the inputs nor the order of letters within
    /// a pattern affects the result.
    #[test]
    fn prop_order_independent(
        wires in wiring(),
        order in digit_order(),
        shown in prop::array::uniform4(0u8..10),
        rotations in prop::collection::vec(0usize..7, 14),
    ) {
        let map = segment_map(&wires);
        let in_digit_order: Vec<u8> = (0..10).collect();
        let canonical = scrambled_entry(&map, &in_digit_order, shown);
        let shuffled = scrambled_entry(&map, &order, shown);
        prop_assert_eq!(decode(&canonical), decode(&shuffled));

        let mut words: Vec<String> = shuffled
            .inputs()
            .iter()
            .chain(shuffled.outputs().iter())
            .zip(rotations.iter())
            .map(|(p, by)| spelled(*p, *by))
            .collect();
        words.insert(10, "|".to_string());
        let respelled: Entry = words.join(" ").parse().unwrap();
        prop_assert_eq!(&respelled, &shuffled);
        prop_assert_eq!(decode(&respelled), Ok(value_of(shown)));
    }
}

#[test]
fn test_identity_wiring() {
    let map = segment_map(&Wire::ALL);
    let entry = scrambled_entry(&map, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], [1, 9, 8, 4]);
    assert_eq!(
        entry.to_string(),
        "abcefg cf acdeg acdfg bcdf abdfg abdefg acf abcdefg abcdfg | cf abcdfg abcdefg bcdf"
    );
    assert_eq!(decode(&entry), Ok(1984));
}
