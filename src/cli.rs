//! Command-line harness: gather the inputs, run the search, hand the results
//! to the configured reporter.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::info;

use crate::batch::search_many_with;
use crate::config::{Config, ConfigError};
use crate::error::{ErrorKind, KmpError};
use crate::matcher::{EmptyPatternPolicy, KmpMatcher, TraceMode};
use crate::report::{
    ConsoleReporter, CsvTraceReporter, JsonReporter, OutputFormat, ReportError, Reporter,
    SearchReport,
};

#[derive(Parser, Debug)]
#[command(name = "kmp-trace")]
#[command(about = "Find every occurrence of a pattern in a text with Knuth-Morris-Pratt")]
#[command(version)]
pub struct Cli {
    /// Pattern to search for
    pub pattern: String,

    /// Text to search (read from stdin when neither this nor --text-file is given)
    #[arg(conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short = 'f', long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Trace granularity
    #[arg(long, value_enum)]
    pub trace: Option<TraceMode>,

    /// Print the prefix table
    #[arg(long)]
    pub show_table: bool,

    /// Do not record or print the comparison steps
    #[arg(long)]
    pub no_trace: bool,

    /// Search every line of the text independently
    #[arg(long)]
    pub per_line: bool,

    /// Let an empty pattern match at every position instead of failing
    #[arg(long)]
    pub allow_empty: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The config file (or defaults) with command-line overrides applied.
    pub fn settings(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(trace) = self.trace {
            config.trace = trace;
        }
        if self.show_table {
            config.show_table = true;
        }
        if self.no_trace {
            config.show_trace = false;
        }
        if self.per_line {
            config.per_line = true;
        }
        if self.allow_empty {
            config.empty_pattern = EmptyPatternPolicy::MatchEverywhere;
        }
        if self.no_color {
            config.color = false;
        }
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    Search(#[from] KmpError),

    #[error("failed to read {what}: {source}")]
    Input {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Search(err) => match err.kind() {
                ErrorKind::InvalidInput => 2,
            },
            AppError::Config(_) | AppError::Input { .. } | AppError::Report(_) => 1,
        }
    }
}

/// Run one invocation. All searching happens before the reporter is created,
/// so invalid input never leaves partial output behind.
pub fn run<R: Read, W: Write>(cli: &Cli, stdin: R, out: W) -> Result<(), AppError> {
    let config = cli.settings()?;
    let options = config.search_options();
    let matcher = KmpMatcher::from(cli.pattern.as_str());

    if matcher.pattern().is_empty() && options.empty_pattern == EmptyPatternPolicy::Reject {
        return Err(KmpError::EmptyPattern.into());
    }

    let text = read_text(cli, stdin)?;
    info!(
        pattern_len = matcher.pattern().len(),
        text_len = text.len(),
        per_line = config.per_line,
        format = ?config.format,
        "starting search"
    );

    if config.per_line {
        let lines: Vec<&str> = text.lines().collect();
        let symbols: Vec<Vec<char>> = lines.iter().map(|line| line.chars().collect()).collect();
        let outcomes = search_many_with(&matcher, &symbols, options)?;

        let mut reporter = reporter_for(&config, out)?;
        for (index, (line, outcome)) in lines.iter().zip(&outcomes).enumerate() {
            reporter.report(&SearchReport {
                line: Some(index + 1),
                text: line,
                pattern: &cli.pattern,
                table: matcher.table(),
                outcome,
            })?;
        }
        reporter.finish()?;
    } else {
        let symbols: Vec<char> = text.chars().collect();
        let outcome = matcher.search(&symbols, options)?;

        let mut reporter = reporter_for(&config, out)?;
        reporter.report(&SearchReport {
            line: None,
            text: &text,
            pattern: &cli.pattern,
            table: matcher.table(),
            outcome: &outcome,
        })?;
        reporter.finish()?;
    }
    Ok(())
}

// Text from a file or stdin loses one trailing line ending.
fn read_text<R: Read>(cli: &Cli, mut stdin: R) -> Result<String, AppError> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }

    let mut text = match &cli.text_file {
        Some(path) => fs::read_to_string(path).map_err(|source| AppError::Input {
            what: path.display().to_string(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .map_err(|source| AppError::Input {
                    what: "stdin".to_string(),
                    source,
                })?;
            buf
        }
    };

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn reporter_for<'w, W: Write + 'w>(
    config: &Config,
    out: W,
) -> Result<Box<dyn Reporter + 'w>, ReportError> {
    Ok(match config.format {
        OutputFormat::Text => Box::new(
            ConsoleReporter::new(out)
                .show_table(config.show_table)
                .show_trace(config.show_trace)
                .color(config.color),
        ),
        OutputFormat::Json => Box::new(
            JsonReporter::new(out)
                .show_table(config.show_table)
                .show_trace(config.show_trace),
        ),
        OutputFormat::Csv => Box::new(CsvTraceReporter::new(out)?),
    })
}
