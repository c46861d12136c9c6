//! Result rendering for plain text and JSON
//!
//! Text mode prints one row per line (or a "nothing found" line); JSON mode
//! prints pretty JSON, with `null` for absent rows and `[]` for empty lists.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// A single value that always exists.
pub fn value<W, T>(out: &mut W, format: OutputFormat, value: &T) -> Result<()>
where
    W: Write,
    T: Serialize + Display,
{
    match format {
        OutputFormat::Json => write_json(out, value),
        OutputFormat::Text => {
            writeln!(out, "{value}")?;
            Ok(())
        }
    }
}

/// A single row that may be absent.
pub fn optional<W, T>(out: &mut W, format: OutputFormat, row: Option<&T>, missing: &str) -> Result<()>
where
    W: Write,
    T: Serialize + Display,
{
    match (format, row) {
        (OutputFormat::Json, row) => write_json(out, &row),
        (OutputFormat::Text, Some(row)) => {
            writeln!(out, "{row}")?;
            Ok(())
        }
        (OutputFormat::Text, None) => {
            writeln!(out, "{missing}")?;
            Ok(())
        }
    }
}

/// A list of rows; `empty` is printed in text mode when there are none.
pub fn list<W, T>(out: &mut W, format: OutputFormat, rows: &[T], empty: &str) -> Result<()>
where
    W: Write,
    T: Serialize + Display,
{
    match format {
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Text if rows.is_empty() => {
            writeln!(out, "{empty}")?;
            Ok(())
        }
        OutputFormat::Text => {
            for row in rows {
                writeln!(out, "{row}")?;
            }
            Ok(())
        }
    }
}

/// A JSON object in JSON mode, a preformatted line otherwise.
pub fn record<W: Write>(
    out: &mut W,
    format: OutputFormat,
    json: serde_json::Value,
    text: &str,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &json),
        OutputFormat::Text => {
            writeln!(out, "{text}")?;
            Ok(())
        }
    }
}
