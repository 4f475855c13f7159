//! The command-line surface: argument definitions and command handlers.
//!
//! Everything here is a thin collaborator around the `sudoku` engine: it
//! reads puzzle text, picks a board size and selection policy, and renders
//! grids and counters. The engine itself knows nothing about terminals or
//! files.

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

use sudoku_solver::sudoku::codec::{decode_grid, encode_grid, symbol_for};
use sudoku_solver::sudoku::generator::{Difficulty, Generator};
use sudoku_solver::sudoku::grid::CandidateGrid;
use sudoku_solver::sudoku::search::{Search, SearchStats};
use sudoku_solver::sudoku::selection::RandomOrder;
use sudoku_solver::sudoku::topology::{BoardSize, Topology};
use sudoku_solver::sudoku::uniqueness::{Uniqueness, UniquenessChecker};

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku-solver",
    version,
    about = "A configurable Sudoku solver and puzzle generator"
)]
pub(crate) struct Cli {
    /// An optional puzzle given directly on the command line. If provided
    /// without a subcommand, it is solved with the default options.
    pub grid: Option<String>,

    /// Specifies the subcommand to execute (e.g. `solve`, `check`,
    /// `generate`, `batch`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle.
    Solve {
        /// The puzzle as text, one character per square.
        #[arg(long)]
        grid: Option<String>,

        /// Path to a puzzle file.
        #[arg(long)]
        path: Option<PathBuf>,

        /// The square/value selection policy used while branching.
        #[arg(long, default_value_t = SelectionPolicy::Fewest)]
        selection: SelectionPolicy,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Report whether a puzzle has a unique solution, none, or several.
    Check {
        /// The puzzle as text, one character per square.
        #[arg(long)]
        grid: Option<String>,

        /// Path to a puzzle file.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate puzzles with a verified unique solution.
    Generate {
        /// Target difficulty (easy, medium, hard or expert).
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Number of puzzles to generate.
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Seed for reproducible generation; random when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file under a directory.
    Batch {
        /// Directory to scan recursively for puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Board side length (4, 9, 16 or 25).
    #[arg(long, default_value_t = 9)]
    pub(crate) size: usize,

    /// Enable printing of performance statistics after each run.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable verification of produced grids against the unit constraints.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Render grids as bordered blocks instead of single lines.
    #[arg(short, long, default_value_t = false)]
    pub(crate) pretty: bool,
}

/// The branching policy exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SelectionPolicy {
    /// Deterministic fewest-candidates selection.
    #[default]
    Fewest,
    /// Uniformly random square and value order.
    Random,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fewest => f.write_str("fewest"),
            Self::Random => f.write_str("random"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fewest" => Ok(Self::Fewest),
            "random" => Ok(Self::Random),
            _ => Err(format!("unknown selection policy '{s}'")),
        }
    }
}

/// Dispatches the parsed arguments to a command handler.
pub(crate) fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Some(Commands::Solve {
            grid,
            path,
            selection,
            common,
        }) => solve_command(grid.as_deref(), path.as_deref(), selection, &common),
        Some(Commands::Check { grid, path, common }) => {
            check_command(grid.as_deref(), path.as_deref(), &common)
        }
        Some(Commands::Generate {
            difficulty,
            count,
            seed,
            common,
        }) => generate_command(difficulty, count, seed, &common),
        Some(Commands::Batch { path, common }) => batch_command(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "sudoku-solver", &mut std::io::stdout());
            ExitCode::SUCCESS
        }
        None => match cli.grid {
            Some(grid) => solve_command(Some(&grid), None, SelectionPolicy::Fewest, &cli.common),
            None => {
                let _ = Cli::command().print_help();
                ExitCode::FAILURE
            }
        },
    }
}

fn fail(message: &str) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

fn board_size(side: usize) -> Result<BoardSize, String> {
    BoardSize::try_from(side)
        .map_err(|()| format!("unsupported board size {side}; expected 4, 9, 16 or 25"))
}

/// Reads the puzzle text from the inline argument or from a file and
/// decodes it.
fn load_grid(
    grid: Option<&str>,
    path: Option<&Path>,
    topology: &Topology,
) -> Result<CandidateGrid, String> {
    let text = match (grid, path) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        (None, None) => return Err("no puzzle given; pass --grid or --path".to_owned()),
    };
    decode_grid(&text, topology).map_err(|e| e.to_string())
}

fn solve_command(
    grid: Option<&str>,
    path: Option<&Path>,
    selection: SelectionPolicy,
    common: &CommonOptions,
) -> ExitCode {
    let size = match board_size(common.size) {
        Ok(size) => size,
        Err(e) => return fail(&e),
    };
    let topology = Topology::new(size);
    let clues = match load_grid(grid, path, &topology) {
        Ok(clues) => clues,
        Err(e) => return fail(&e),
    };

    let started = Instant::now();
    let (solution, counters) = match selection {
        SelectionPolicy::Fewest => {
            let mut search = Search::new(&topology);
            (search.solve(&clues), search.stats())
        }
        SelectionPolicy::Random => {
            let mut search = Search::with_selector(&topology, RandomOrder::new());
            (search.solve(&clues), search.stats())
        }
    };
    let elapsed = started.elapsed();

    let Some(solution) = solution else {
        println!("unsolvable");
        if common.stats {
            print_stats(elapsed, counters);
        }
        return ExitCode::FAILURE;
    };

    print_grid(&solution, common.pretty);
    if common.verify && !solution.is_valid(&topology) {
        return fail("produced grid failed verification");
    }
    if common.stats {
        print_stats(elapsed, counters);
    }
    ExitCode::SUCCESS
}

fn check_command(grid: Option<&str>, path: Option<&Path>, common: &CommonOptions) -> ExitCode {
    let size = match board_size(common.size) {
        Ok(size) => size,
        Err(e) => return fail(&e),
    };
    let topology = Topology::new(size);
    let clues = match load_grid(grid, path, &topology) {
        Ok(clues) => clues,
        Err(e) => return fail(&e),
    };

    let started = Instant::now();
    let mut checker = UniquenessChecker::new(&topology);
    let result = checker.check(&clues);
    let elapsed = started.elapsed();

    match result {
        Uniqueness::Unique(solution) => {
            println!("unique solution");
            print_grid(&solution, common.pretty);
        }
        Uniqueness::None => println!("no solution"),
        Uniqueness::Multiple => println!("multiple solutions"),
    }
    if common.stats {
        print_stats(elapsed, checker.stats());
    }
    ExitCode::SUCCESS
}

fn generate_command(
    difficulty: Difficulty,
    count: usize,
    seed: Option<u64>,
    common: &CommonOptions,
) -> ExitCode {
    let size = match board_size(common.size) {
        Ok(size) => size,
        Err(e) => return fail(&e),
    };
    let topology = Topology::new(size);
    let mut generator = seed.map_or_else(
        || Generator::new(&topology),
        |seed| Generator::with_seed(&topology, seed),
    );

    let started = Instant::now();
    for _ in 0..count {
        let puzzle = generator.generate(difficulty);
        print_grid(&puzzle, common.pretty);
    }
    if common.stats {
        println!("generated {count} puzzle(s) in {:?}", started.elapsed());
    }
    ExitCode::SUCCESS
}

fn batch_command(path: &Path, common: &CommonOptions) -> ExitCode {
    let size = match board_size(common.size) {
        Ok(size) => size,
        Err(e) => return fail(&e),
    };
    let topology = Topology::new(size);

    let mut solved = 0_usize;
    let mut unsolvable = 0_usize;
    let mut skipped = 0_usize;
    let started = Instant::now();

    for entry in WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
    {
        let file = entry.path();
        let text = match std::fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("skipping {}: {e}", file.display());
                skipped += 1;
                continue;
            }
        };
        let clues = match decode_grid(&text, &topology) {
            Ok(clues) => clues,
            Err(e) => {
                eprintln!("skipping {}: {e}", file.display());
                skipped += 1;
                continue;
            }
        };

        let file_started = Instant::now();
        let mut search = Search::new(&topology);
        match search.solve(&clues) {
            Some(solution) => {
                solved += 1;
                println!(
                    "{}: solved in {:?} ({})",
                    file.display(),
                    file_started.elapsed(),
                    encode_grid(&solution)
                );
            }
            None => {
                unsolvable += 1;
                println!("{}: unsolvable", file.display());
            }
        }
    }

    println!(
        "solved {solved}, unsolvable {unsolvable}, skipped {skipped} in {:?}",
        started.elapsed()
    );
    if common.stats {
        print_memory();
    }
    ExitCode::SUCCESS
}

fn print_grid(grid: &CandidateGrid, pretty: bool) {
    if pretty {
        print!("{}", render_grid(grid));
    } else {
        println!("{}", encode_grid(grid));
    }
}

/// Renders a grid as a bordered block, one symbol per square and rules
/// between boxes.
fn render_grid(grid: &CandidateGrid) -> String {
    let size = grid.size();
    let side = size.side();
    let n = size.box_size();
    let rule = vec!["-".repeat(2 * n); n].join("+");

    let mut out = String::new();
    for row in 0..side {
        if row > 0 && row % n == 0 {
            out.push_str(&rule);
            out.push('\n');
        }
        for col in 0..side {
            if col > 0 && col % n == 0 {
                out.push_str("| ");
            }
            let square = row * side + col;
            out.push(grid.solved_value(square).map_or('.', symbol_for));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn print_stats(elapsed: Duration, counters: SearchStats) {
    println!("time taken: {elapsed:?}");
    println!("decisions: {}", counters.decisions);
    println!("branches: {}", counters.branches);
    println!("contradictions: {}", counters.contradictions);
    print_memory();
}

fn print_memory() {
    let _ = epoch::advance();
    if let Ok(allocated) = stats::allocated::read() {
        println!("memory allocated: {allocated} bytes");
    }
}
