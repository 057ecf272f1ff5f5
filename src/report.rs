//! Output adapters for search results.
//!
//! The core hands back plain data; a [`Reporter`] decides how it is shown.
//! Console output mirrors the classic demo printout, JSON emits one object per
//! search, and CSV exports the pointer trace as two series for plotting.

use std::io::Write;

use clap::ValueEnum;
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matcher::{SearchOutcome, TraceStep};
use crate::prefix::PrefixTable;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV trace: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Everything a reporter may show about one search.
#[derive(Debug, Clone, Copy)]
pub struct SearchReport<'a> {
    /// 1-based line number when the input was searched line by line.
    pub line: Option<usize>,
    pub text: &'a str,
    pub pattern: &'a str,
    pub table: &'a PrefixTable,
    pub outcome: &'a SearchOutcome,
}

pub trait Reporter {
    fn report(&mut self, report: &SearchReport<'_>) -> Result<(), ReportError>;

    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

// =============================================================================
// Console
// =============================================================================

pub struct ConsoleReporter<W: Write> {
    out: W,
    show_table: bool,
    show_trace: bool,
    color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_table: false,
            show_trace: true,
            color: false,
        }
    }

    pub fn show_table(mut self, show: bool) -> Self {
        self.show_table = show;
        self
    }

    pub fn show_trace(mut self, show: bool) -> Self {
        self.show_trace = show;
        self
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    fn paint(&self, line: &str, color: Color) -> String {
        if self.color {
            line.color(color).to_string()
        } else {
            line.to_string()
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, report: &SearchReport<'_>) -> Result<(), ReportError> {
        if let Some(line) = report.line {
            let header = self.paint(&format!("Line {line}:"), Color::Cyan);
            writeln!(self.out, "{header}")?;
        }
        writeln!(self.out, "Text: {}", report.text)?;
        writeln!(self.out, "Pattern: {}", report.pattern)?;

        if self.show_table {
            writeln!(self.out, "Prefix table: {:?}", report.table.as_slice())?;
        }

        let matches = &report.outcome.matches;
        let summary = if matches.is_empty() {
            self.paint("Pattern not found in the text.", Color::Yellow)
        } else {
            self.paint(&format!("Pattern found at positions: {matches:?}"), Color::Green)
        };
        writeln!(self.out, "{summary}")?;

        if self.show_trace && !report.outcome.trace.is_empty() {
            let heading = self.paint("Comparison Steps (Text, Pattern):", Color::Blue);
            writeln!(self.out)?;
            writeln!(self.out, "{heading}")?;
            for step in &report.outcome.trace {
                writeln!(
                    self.out,
                    "Text Index: {}, Pattern Index: {}",
                    step.text, step.pattern
                )?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

// =============================================================================
// JSON lines
// =============================================================================

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    pattern: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<&'a PrefixTable>,
    matches: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a [TraceStep]>,
}

pub struct JsonReporter<W: Write> {
    out: W,
    show_table: bool,
    show_trace: bool,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_table: false,
            show_trace: true,
        }
    }

    pub fn show_table(mut self, show: bool) -> Self {
        self.show_table = show;
        self
    }

    pub fn show_trace(mut self, show: bool) -> Self {
        self.show_trace = show;
        self
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, report: &SearchReport<'_>) -> Result<(), ReportError> {
        let record = JsonRecord {
            line: report.line,
            pattern: report.pattern,
            table: self.show_table.then_some(report.table),
            matches: &report.outcome.matches,
            trace: self.show_trace.then_some(report.outcome.trace.as_slice()),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

// =============================================================================
// CSV trace export
// =============================================================================

#[derive(Serialize)]
struct TraceRow {
    line: Option<usize>,
    step: usize,
    text_pointer: usize,
    pattern_pointer: usize,
}

/// Writes the pointer trace as rows of `line,step,text_pointer,pattern_pointer`.
/// Matches are not part of this format.
pub struct CsvTraceReporter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvTraceReporter<W> {
    pub fn new(out: W) -> Result<Self, ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(["line", "step", "text_pointer", "pattern_pointer"])?;
        Ok(Self { writer })
    }
}

impl<W: Write> Reporter for CsvTraceReporter<W> {
    fn report(&mut self, report: &SearchReport<'_>) -> Result<(), ReportError> {
        for (step, point) in report.outcome.trace.iter().enumerate() {
            self.writer.serialize(TraceRow {
                line: report.line,
                step,
                text_pointer: point.text,
                pattern_pointer: point.pattern,
            })?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.writer.flush()?;
        Ok(())
    }
}
