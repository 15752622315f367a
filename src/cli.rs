use clap::Parser;
use std::path::PathBuf;

use crate::config::{CfMetaConfig, ExtractSettings};

#[derive(Parser, Debug)]
#[command(name = "cfmeta")]
#[command(
    about = "Generate custom function metadata (functions.json) from an annotated script",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// TypeScript or JavaScript file containing the custom functions
    pub input: PathBuf,

    /// Output file (defaults to functions.json in the current directory)
    #[arg(short, long, env = "CFMETA_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Pretty-print the generated JSON
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (defaults to the nearest .cfmeta.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show skipped declarations and notes
    /// -vv: Show per-declaration decisions
    /// -vvv: Show all trace information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Log filter matching the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Merge the command line over the loaded configuration file
    pub fn into_settings(self, config: &CfMetaConfig) -> ExtractSettings {
        ExtractSettings::resolve(self.input, self.output, self.pretty, config)
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
