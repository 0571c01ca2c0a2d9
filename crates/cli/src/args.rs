//! Argument surface: `seq2d <script> [-s <v1> <v2> ...] [--seed <u64>]`.

use clap::Parser as ClapParser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: seq2d <script> [-s <vals>...] [--seed <n>]";

#[derive(ClapParser, Debug)]
#[command(name = "seq2d")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for a 2D concurrent stack-based esoteric language", long_about = None)]
pub struct Cli {
    /// Program source file
    pub script: PathBuf,

    /// Initial stack for pointer 0, leftmost value becomes the bottom
    #[arg(short = 's', num_args = 0.., allow_hyphen_values = true, value_name = "VALUE")]
    pub seed_stack: Vec<String>,

    /// Seed the RNG deterministically instead of from OS entropy
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}
