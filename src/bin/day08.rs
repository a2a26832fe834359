use std::fs;
use std::io;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use sevenseg::Puzzle;

/// Decode the scrambled seven-segment displays (Advent of Code 2021, day 8).
///
/// Log output is controlled by RUST_LOG (default "info").
#[derive(Parser, Debug)]
#[command(name = "day08", version)]
struct Args {
    /// Puzzle input; read from stdin if omitted
    input: Option<PathBuf>,
}

fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read input from stdin")?;
            Ok(input)
        }
    }
}

fn part1(puzzle: &Puzzle) {
    println!("Day 8 part 1: {}", puzzle.count_unique_length_outputs());
}

fn part2(puzzle: &Puzzle) -> anyhow::Result<()> {
    let total = puzzle.sum_of_outputs().context("failed to decode puzzle input")?;
    println!("Day 8 part 2: {}", total);
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = read_input(args.input.as_deref())?;
    let puzzle: Puzzle = input.parse().context("failed to parse puzzle input")?;
    event!(Level::INFO, "read {} entries", puzzle.len());
    part1(&puzzle);
    part2(&puzzle)
}

fn main() {
    let args = Args::parse();
    init_logging();
    if let Err(e) = run(&args) {
        eprintln!("day08: {:#}", e);
        std::process::exit(1);
    }
}
