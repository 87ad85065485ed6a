use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "profile-links",
    about = "Classify profile links into display labels and platform tags",
    version
)]
pub struct Cli {
    /// Raw links to classify (scheme optional)
    #[arg(value_name = "LINK")]
    pub links: Vec<String>,

    /// Read links from a file (repeatable): .json/.toml rosters, anything else
    /// one link per line; `-` reads stdin
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Config file [default: ./.profile-links/config.toml, fallback ~/.config/profile-links/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Write the json/html report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Match rule markers on whole host labels instead of raw substrings
    #[arg(long)]
    pub strict_hosts: bool,

    /// Show all links (not just warnings/errors)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Html,
}
