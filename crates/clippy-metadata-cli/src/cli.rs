use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clippy_metadata_core::Category;
use clippy_metadata_core::config::DescriptionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DescriptionArg {
    /// Fill the configured template with the lint key
    Template,
    /// Use the lint's doc comments, falling back to the template
    DocComments,
}

impl From<DescriptionArg> for DescriptionSource {
    fn from(arg: DescriptionArg) -> Self {
        match arg {
            DescriptionArg::Template => DescriptionSource::Template,
            DescriptionArg::DocComments => DescriptionSource::DocComments,
        }
    }
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.trim().parse().map_err(|_| {
        let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!(
            "unknown category '{}'. Valid values: {}",
            value,
            valid.join(", ")
        )
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "clippy-metadata",
    author,
    version,
    about = "Extracts Clippy lint metadata into a JSON catalog",
    long_about = "Scans a Clippy source tree for declare_clippy_lint! invocations and writes\n\
                  the public lints as a JSON array of key, name, url and description.\n\n\
                  Configure logging with --log-level and --log-json."
)]
pub struct Cli {
    /// Root of the Clippy lint sources, e.g. clippy_lints/src
    pub source_root: PathBuf,

    /// Where to write the JSON catalog; an existing file is replaced
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    #[arg(long, help = "Read settings from this TOML file instead of clippy-metadata.toml")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_category,
        help = "Only emit lints of these categories"
    )]
    pub category: Vec<Category>,

    #[arg(long, value_enum, help = "Where lint descriptions come from")]
    pub description: Option<DescriptionArg>,

    #[arg(long, value_enum, default_value = "info", help = "Set the log level")]
    pub log_level: LogLevel,

    #[arg(long, help = "Output logs in JSON format")]
    pub log_json: bool,
}
