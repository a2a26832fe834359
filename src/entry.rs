use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0, space1},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::{delimited, separated_pair},
    IResult,
};

use crate::error::DecodeError;
use crate::pattern::SignalPattern;

/// One line of puzzle input: a sample of all ten digits, then the
/// four digits shown on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    inputs: [SignalPattern; 10],
    outputs: [SignalPattern; 4],
}

impl Entry {
    /// Fails if two of the inputs light the same wires, since then
    /// they cannot cover all ten digits.
    pub fn new(
        inputs: [SignalPattern; 10],
        outputs: [SignalPattern; 4],
    ) -> Result<Entry, DecodeError> {
        for (i, pattern) in inputs.iter().enumerate() {
            if inputs[..i].contains(pattern) {
                return Err(DecodeError::MalformedEntry(format!(
                    "input pattern '{}' appears more than once",
                    pattern
                )));
            }
        }
        Ok(Entry { inputs, outputs })
    }

    pub fn inputs(&self) -> &[SignalPattern; 10] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[SignalPattern; 4] {
        &self.outputs
    }

    /// How many outputs can be read off from their length alone
    /// (the digits 1, 4, 7 and 8).
    pub fn unique_length_outputs(&self) -> usize {
        self.outputs
            .iter()
            .filter(|p| p.unique_length_digit().is_some())
            .count()
    }
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|ch: char| ch != '|' && !ch.is_whitespace())(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, token)(input)
}

fn parse_line(input: &str) -> IResult<&str, (Vec<&str>, Vec<&str>)> {
    all_consuming(delimited(
        space0,
        separated_pair(tokens, delimited(space1, char('|'), space1), tokens),
        space0,
    ))(input)
}

fn patterns<const N: usize>(
    what: &str,
    tokens: &[&str],
) -> Result<[SignalPattern; N], DecodeError> {
    if tokens.len() != N {
        return Err(DecodeError::MalformedEntry(format!(
            "expected {} {} patterns, got {}",
            N,
            what,
            tokens.len()
        )));
    }
    let mut result = [SignalPattern::EMPTY; N];
    for (slot, token) in result.iter_mut().zip(tokens) {
        *slot = SignalPattern::try_from(*token)?;
    }
    Ok(result)
}

impl FromStr for Entry {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Entry, DecodeError> {
        match parse_line(s) {
            Ok((_, (inputs, outputs))) => {
                Entry::new(patterns("input", &inputs)?, patterns("output", &outputs)?)
            }
            Err(e) => Err(DecodeError::MalformedEntry(format!(
                "expected 'patterns | patterns' in '{}': {}",
                s, e
            ))),
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for p in self.inputs.iter() {
            write!(f, "{} ", p)?;
        }
        f.write_str("|")?;
        for p in self.outputs.iter() {
            write!(f, " {}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
const EXAMPLE: &str =
    "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

#[test]
fn test_parse_entry() {
    let entry: Entry = EXAMPLE.parse().unwrap();
    assert_eq!(entry.inputs().len(), 10);
    assert_eq!(entry.outputs()[0], SignalPattern::try_from("bcdef").unwrap());
    assert_eq!(entry.outputs()[0], entry.outputs()[2]);
    assert_eq!(
        entry.to_string(),
        "abcdefg bcdef acdfg abcdf abd abcdef bcdefg abef abcdeg ab | bcdef abcdf bcdef abcdf"
    );
    // The canonical form parses back to the same entry.
    assert_eq!(entry.to_string().parse::<Entry>(), Ok(entry));
}

#[test]
fn test_parse_tolerates_extra_spacing() {
    let spaced =
        "  acedgfb  cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab\t|  cdfeb fcadb cdfeb cdbaf ";
    assert_eq!(spaced.parse::<Entry>(), EXAMPLE.parse::<Entry>());
}

#[test]
fn test_too_few_inputs() {
    let line = "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb | cdfeb fcadb cdfeb cdbaf";
    assert_eq!(
        line.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(
            "expected 10 input patterns, got 9".to_string()
        ))
    );
}

#[test]
fn test_wrong_output_count() {
    let line = "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb";
    assert!(matches!(
        line.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(_))
    ));
}

#[test]
fn test_delimiter_problems() {
    let missing =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab cdfeb fcadb cdfeb cdbaf";
    assert!(matches!(
        missing.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(_))
    ));
    let doubled =
        "acedgfb cdfbe gcdfa fbcad dab | cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";
    assert!(matches!(
        doubled.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(_))
    ));
    assert!(matches!("".parse::<Entry>(), Err(DecodeError::MalformedEntry(_))));
}

#[test]
fn test_bad_characters() {
    let line =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb a1 | cdfeb fcadb cdfeb cdbaf";
    assert!(matches!(
        line.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(_))
    ));
    let line =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaz";
    assert!(matches!(
        line.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(_))
    ));
}

#[test]
fn test_duplicate_inputs() {
    // "ba" is the same pattern as "ab".
    let line = "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb ba ab | cdfeb fcadb cdfeb cdbaf";
    assert_eq!(
        line.parse::<Entry>(),
        Err(DecodeError::MalformedEntry(
            "input pattern 'ab' appears more than once".to_string()
        ))
    );
}

#[test]
fn test_unique_length_outputs() {
    let entry: Entry =
        "be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe"
            .parse()
            .unwrap();
    assert_eq!(entry.unique_length_outputs(), 2);
}
