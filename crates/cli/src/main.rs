//! seq2d - interpreter for a 2D concurrent stack-based esoteric language.
//!
//! Reads a program file into a grid, seeds pointer 0's stack from `-s`,
//! and runs the engine to completion against real stdin/stdout.

mod args;
mod rng;
mod stdio;
mod term;

use args::{Cli, USAGE};
use clap::Parser as ClapParser;
use seq2d_core::{Engine, Value};
use std::fs;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            e.exit();
        }
        Err(_) => {
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = match fs::read_to_string(&cli.script) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let lines: Vec<String> = source.lines().map(str::to_string).collect();
    let seed_stack: Vec<Value> = cli.seed_stack.iter().map(|s| Value::from(s.as_str())).collect();

    let _guard = match term::TerminalGuard::enable() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut engine = Engine::new(lines, seed_stack);
    let mut rng = rng::StdMirrorRng::from_seed_arg(cli.seed);
    let mut io = stdio::StdIo;

    if let Err(e) = engine.run(&mut rng, &mut io) {
        drop(_guard);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
