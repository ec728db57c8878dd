pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod validate;
pub mod watch;

use clap::{Parser, Subcommand};
use log::LevelFilter;

/// stockpile - Stack SVG files into a single :target sprite sheet
#[derive(Parser, Debug)]
#[command(name = "stockpile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level selected by the `-v` count.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stack SVG files into one document
    Build(build::BuildArgs),

    /// Initialize a stockpile project (generates stockpile.yaml)
    Init(init::InitArgs),

    /// List input files and the fragment id each one gets
    List(list::ListArgs),

    /// Check input files without writing output
    Validate(validate::ValidateArgs),

    /// Rebuild whenever an input changes
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
