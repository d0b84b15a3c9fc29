//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use fomc_diff_core::{Granularity, StatementType, ViewMode};
use std::path::PathBuf;

/// fomc-diff - compare Federal Reserve FOMC statements over time
#[derive(Parser, Debug)]
#[command(name = "fomc-diff", version)]
#[command(about = "Compare Federal Reserve FOMC statements over time")]
#[command(
    long_about = "fomc-diff loads FOMC statements (Markdown files with TOML or YAML front matter, or a JSON catalog) and shows how the wording changed between two of them, word by word or sentence by sentence."
)]
pub struct Cli {
    /// Statement directory, catalog or file
    #[arg(
        long,
        global = true,
        env = "FOMC_DIFF_STATEMENTS",
        value_name = "PATH"
    )]
    pub statements: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/fomc-diff/config.toml)
    #[arg(long, global = true, env = "FOMC_DIFF_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List statements, newest first
    List {
        /// Only list statements of this type
        #[arg(short = 't', long = "type", value_enum, value_name = "TYPE")]
        kind: Option<StatementTypeArg>,

        /// Print the statements as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one statement
    Show {
        /// Statement id, as shown by `list`
        id: String,
    },
    /// Compare two statements
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Older statement id (a file path with --files)
    #[arg(required_unless_present = "latest", value_name = "OLD")]
    pub old: Option<String>,

    /// Newer statement id (a file path with --files)
    #[arg(required_unless_present = "latest", value_name = "NEW")]
    pub new: Option<String>,

    /// Treat OLD and NEW as paths to plain text files
    #[arg(long)]
    pub files: bool,

    /// Compare the two most recent statements
    #[arg(long, conflicts_with_all = ["old", "new", "files"])]
    pub latest: bool,

    /// Statement type used with --latest
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        value_name = "TYPE",
        conflicts_with_all = ["old", "new", "files"]
    )]
    pub kind: Option<StatementTypeArg>,

    /// Unit of comparison
    #[arg(short, long, value_enum)]
    pub granularity: Option<GranularityArg>,

    /// Layout of the comparison
    #[arg(long, value_enum)]
    pub view: Option<ViewModeArg>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// When to colour terminal output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Compare the texts exactly as written, without collapsing whitespace
    #[arg(long)]
    pub no_normalize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Word,
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewModeArg {
    #[value(name = "side-by-side")]
    SideBySide,
    Unified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatementTypeArg {
    Meeting,
    #[value(name = "longer-run-goals")]
    LongerRunGoals,
    Minutes,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal text
    Text,
    /// Standalone HTML page
    Html,
    /// Comparison result as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Word => Granularity::Word,
            GranularityArg::Sentence => Granularity::Sentence,
        }
    }
}

impl From<ViewModeArg> for ViewMode {
    fn from(arg: ViewModeArg) -> Self {
        match arg {
            ViewModeArg::SideBySide => ViewMode::SideBySide,
            ViewModeArg::Unified => ViewMode::Unified,
        }
    }
}

impl From<StatementTypeArg> for StatementType {
    fn from(arg: StatementTypeArg) -> Self {
        match arg {
            StatementTypeArg::Meeting => StatementType::Meeting,
            StatementTypeArg::LongerRunGoals => StatementType::LongerRunGoals,
            StatementTypeArg::Minutes => StatementType::Minutes,
            StatementTypeArg::Other => StatementType::Other,
        }
    }
}
