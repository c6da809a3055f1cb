pub mod discover;
pub mod normalize;
pub mod provision;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use intake_common::facts::FactSet;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Turns facts reported by booting machines into inventory records.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to $INTAKE_CONFIG, then ./intake.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reduce output, repeat for less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Show debug logs, repeat for trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import one or more fact files as discovered hosts
    #[command(alias = "d")]
    Discover {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Re-read the facts from each node's inventory API after import
        #[arg(long)]
        refresh: bool,
    },
    /// Import a fact file and promote the host to managed
    #[command(alias = "p")]
    Provision { file: PathBuf },
    /// Show the host name a string normalizes to
    #[command(alias = "n")]
    Normalize { text: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

pub fn load_facts(path: &Path) -> anyhow::Result<FactSet> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    FactSet::from_json(&raw).with_context(|| format!("parsing facts in {}", path.display()))
}
