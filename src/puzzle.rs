use std::str::FromStr;

use tracing::{event, Level};

use crate::decoder::decode;
use crate::entry::Entry;
use crate::error::PuzzleError;

/// A whole puzzle input, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Each entry with the 1-based line it came from.
    entries: Vec<(usize, Entry)>,
}

impl Puzzle {
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Part 1: outputs showing 1, 4, 7 or 8.
    pub fn count_unique_length_outputs(&self) -> usize {
        self.entries().map(Entry::unique_length_outputs).sum()
    }

    /// Part 2: the sum of every entry's decoded output.  The first
    /// entry that cannot be decoded fails the whole sum.
    pub fn sum_of_outputs(&self) -> Result<u64, PuzzleError> {
        let mut total: u64 = 0;
        for (line, entry) in self.entries.iter() {
            match decode(entry) {
                Ok(n) => {
                    total += u64::from(n);
                }
                Err(source) => {
                    return Err(PuzzleError {
                        line: *line,
                        source,
                    });
                }
            }
        }
        Ok(total)
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    /// Blank lines are skipped.
    fn from_str(s: &str) -> Result<Puzzle, PuzzleError> {
        let mut entries = Vec::new();
        for (line, text) in (1..).zip(s.lines()) {
            if text.trim().is_empty() {
                continue;
            }
            match text.parse::<Entry>() {
                Ok(entry) => entries.push((line, entry)),
                Err(source) => {
                    return Err(PuzzleError { line, source });
                }
            }
        }
        event!(Level::DEBUG, "parsed {} entries", entries.len());
        Ok(Puzzle { entries })
    }
}

#[cfg(test)]
const SAMPLE: &str = "\
be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe
edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc
fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg
fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb
aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea
fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb
dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe
bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef
egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb
gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce
";

#[test]
fn test_sample_part1() {
    let puzzle: Puzzle = SAMPLE.parse().unwrap();
    assert_eq!(puzzle.len(), 10);
    assert_eq!(puzzle.count_unique_length_outputs(), 26);
}

#[test]
fn test_sample_part2() {
    let puzzle: Puzzle = SAMPLE.parse().unwrap();
    assert_eq!(puzzle.sum_of_outputs(), Ok(61229));
}

#[test]
fn test_sample_each_line() {
    let expected = [8394, 9781, 1197, 9361, 4873, 8418, 4548, 1625, 8717, 4315];
    let puzzle: Puzzle = SAMPLE.parse().unwrap();
    let got: Vec<u16> = puzzle.entries().map(|e| decode(e).unwrap()).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_blank_lines_are_skipped() {
    let input = format!("\n{}\n\n", SAMPLE);
    let puzzle: Puzzle = input.parse().unwrap();
    assert_eq!(puzzle.len(), 10);
    assert!("".parse::<Puzzle>().unwrap().is_empty());
}

#[test]
fn test_parse_error_has_line_number() {
    let input = "\
acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf

acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb | cdfeb fcadb cdfeb cdbaf
";
    match input.parse::<Puzzle>() {
        Err(e) => {
            assert_eq!(e.line, 3);
            assert!(matches!(e.source, crate::DecodeError::MalformedEntry(_)));
        }
        Ok(p) => panic!("expected a parse failure, got {:?}", p),
    }
}

#[test]
fn test_decode_error_has_line_number() {
    let input = "\
acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf
acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb d
";
    let puzzle: Puzzle = input.parse().unwrap();
    let e = puzzle.sum_of_outputs().unwrap_err();
    assert_eq!(e.line, 2);
    assert!(matches!(
        e.source,
        crate::DecodeError::UnmatchedOutputPattern(_)
    ));
}
