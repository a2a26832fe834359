//! Decoding the scrambled seven-segment displays of Advent of Code
//! 2021, day 8.
//!
//! Each [`Entry`] carries ten patterns covering the digits 0-9, with
//! the wires crossed in some unknown way, and four output patterns.
//! [`decode`] works out the wiring and reads the outputs.

mod decoder;
mod entry;
mod error;
mod pattern;
mod puzzle;
mod segment;

pub use decoder::{decode, deduce, DecodedDigit, Decoding};
pub use entry::Entry;
pub use error::{DecodeError, PuzzleError, Step};
pub use pattern::{SignalPattern, Wire};
pub use puzzle::Puzzle;
pub use segment::{Segment, SegmentMap, DIGIT_SEGMENTS};
