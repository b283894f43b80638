use std::path::PathBuf;

use clap::Parser;

use wampa::config::DEFAULT_CONFIG_FILE;

/// Wampa - watch sources and keep one concatenated document in sync
#[derive(Parser, Debug)]
#[command(name = "wampa")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Inputs may be local paths or http(s) URLs.\n\
Example: wampa -i spec.md -i https://example.com/rules.md -o context.md")]
pub struct Cli {
    /// Input file or URL (repeatable, order is kept)
    #[arg(short, long = "input", value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Output file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Config file
    #[arg(short, long, value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Use native file notifications instead of polling
    #[arg(long)]
    pub native: bool,

    /// Polling period in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: Option<u64>,

    /// Output events as NDJSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether `-c` was left at its default
    pub fn uses_default_config(&self) -> bool {
        self.config.as_os_str() == DEFAULT_CONFIG_FILE
    }
}
