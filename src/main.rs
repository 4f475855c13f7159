//! # sudoku-solver
//!
//! `sudoku-solver` is a configurable command-line Sudoku solver and puzzle
//! generator. Puzzles are given as plain text, one character per square
//! (`.` or `0` for an empty square), for board sizes 4×4, 9×9, 16×16 and
//! 25×25.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle given inline (the default command)
//! sudoku-solver 4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......
//!
//! # Solve a puzzle file and print a bordered grid
//! sudoku-solver solve --path puzzle.sdk --pretty
//!
//! # Prove or disprove that a puzzle has exactly one solution
//! sudoku-solver check --path puzzle.sdk
//!
//! # Generate three hard 9x9 puzzles from a fixed seed
//! sudoku-solver generate --difficulty hard --count 3 --seed 7
//!
//! # Solve every puzzle file under a directory
//! sudoku-solver batch --path puzzles/
//!
//! # Generate shell completion scripts
//! sudoku-solver completions zsh
//! ```
//!
//! Each run can print timing, decision/branch counters and allocator
//! statistics (`--stats`), and re-verify the produced grid against the unit
//! constraints (`--verify`).
//!
//! This file contains only the entry point; the CLI definition and the
//! command handlers live in `command_line`.

use clap::Parser;
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics reported by `--stats`.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let cli = command_line::cli::Cli::parse();
    command_line::cli::run(cli)
}
