use std::io::Read;
use std::num::NonZero;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use slitherlink::builder::{load_compact, load_full, puzzle_rows};
use slitherlink::engine::{CompletionStatus, EngineConfig, Observer};
use slitherlink::render::Style;
use slitherlink::{SlitherDomain, SlitherSolver, SlitherState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Solve a Slither Link puzzle read from stdin.
#[derive(Parser)]
#[command(name = "slither")]
#[command(version)]
struct Cli {
    /// Print the board every N progress events, 0 to never print progress
    #[arg(short, long, default_value_t = 0)]
    speed: usize,
    /// How boards are printed: pretty, ascii or full
    #[arg(long, default_value_t = Style::Pretty)]
    format: Style,
    /// How the puzzle on stdin is written
    #[arg(long, value_enum, default_value_t = Input::Compact)]
    input: Input,
    /// Print the final board only
    #[arg(short, long)]
    result_only: bool,
    /// Print the loaded puzzle in the chosen format without solving it
    #[arg(long)]
    convert: bool,
    /// Board fingerprints remembered during search
    #[arg(long)]
    fingerprint_capacity: Option<NonZero<usize>>,
    /// Log more, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Input {
    /// One row of squares per line, digits for clues
    Compact,
    /// Dots, lines and clues, as printed with `--format full`
    Full,
}

/// Redraws the board in place every `speed` progress events.
struct Progress {
    speed: usize,
    events: usize,
    style: Style,
}

impl Observer<SlitherDomain> for Progress {
    fn progress(&mut self, state: &SlitherState, depth: usize) {
        self.events += 1;
        if self.speed != 0 && self.events % self.speed == 0 {
            // clear the screen and home the cursor
            print!("\x1b[2J\x1b[H");
            println!("progress {} at depth {}\n{}", self.events, depth, state.board.render(self.style));
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        error!("could not read the puzzle: {e}");
        return ExitCode::from(2);
    }

    let rows = puzzle_rows(&text);
    let loaded = match cli.input {
        Input::Compact => load_compact(&rows),
        Input::Full => load_full(&rows),
    };
    let board = match loaded {
        Ok(board) => board,
        Err(e) => {
            error!("could not load the puzzle: {e}");
            return ExitCode::from(2);
        }
    };

    let style = cli.format;
    let (width, height) = board.dims();
    info!(width = width.get(), height = height.get(), "puzzle loaded");

    if cli.convert {
        println!("{}", board.render(style));
        return ExitCode::SUCCESS;
    }
    if !cli.result_only {
        println!("{}\n", board.render(style));
    }

    let mut config = EngineConfig::default();
    if let Some(capacity) = cli.fingerprint_capacity {
        config.fingerprint_capacity(capacity);
    }
    let speed = if cli.result_only { 0 } else { cli.speed };
    let mut solver = SlitherSolver::with_config(config).with_observer(Progress { speed, events: 0, style });

    let start = Instant::now();
    let solved = solver.solve(board);
    let elapsed = start.elapsed();

    println!("{}", solved.board.render(style));
    if !cli.result_only {
        let stats = solver.stats();
        println!();
        println!("status: {}", solved.status);
        println!(
            "propagations: {}, trials: {}, exclusions: {}, deepest: {}, fingerprints: {}",
            stats.propagations, stats.trials, stats.exclusions, stats.deepest, solver.remembered()
        );
        println!("elapsed: {:.3}s", elapsed.as_secs_f64());
    }

    match solved.status {
        CompletionStatus::Complete => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
