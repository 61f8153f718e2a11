//! Rows of the listing and their column-aligned rendering.

use chrono::{DateTime, Utc};
use std::io::{self, Write};

use crate::config::OutputConfig;
use crate::s3::ObjectEntry;

/// Timestamp shown for a prefix that could not be listed.
pub const DENIED_TIMESTAMP: &str = "0000-00-00 00:00:00 +0000 UTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRow {
    Object {
        last_modified: String,
        size: i64,
        key: String,
    },
    Denied {
        prefix: String,
    },
}

impl OutputRow {
    pub fn object(entry: &ObjectEntry) -> Self {
        Self::Object {
            last_modified: entry.last_modified.clone(),
            size: entry.size,
            key: entry.key.clone(),
        }
    }

    pub fn denied(prefix: &str) -> Self {
        Self::Denied {
            prefix: prefix.to_string(),
        }
    }

    pub fn cells(&self) -> [String; 3] {
        match self {
            Self::Object {
                last_modified,
                size,
                key,
            } => [last_modified.clone(), size.to_string(), key.clone()],
            Self::Denied { prefix } => [
                DENIED_TIMESTAMP.to_string(),
                "0".to_string(),
                format!("{} (Access Denied)", prefix),
            ],
        }
    }
}

/// Renders a UTC instant as `2024-05-01 12:30:00 +0000 UTC`.
/// Fractional seconds appear only when non-zero.
pub fn format_timestamp(secs: i64, nanos: u32) -> String {
    match DateTime::<Utc>::from_timestamp(secs, nanos) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.f %z UTC").to_string(),
        None => String::new(),
    }
}

/// Buffers rows and writes them as one aligned block.
///
/// A column is as wide as its widest cell plus `padding`, but never narrower
/// than `min_width`. Every cell is padded with spaces, the last one included.
pub struct TableWriter {
    layout: OutputConfig,
    rows: Vec<[String; 3]>,
}

impl TableWriter {
    pub fn new(layout: OutputConfig) -> Self {
        Self {
            layout,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: &OutputRow) {
        self.rows.push(row.cells());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }

        let mut widths = [0usize; 3];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count() + self.layout.padding);
            }
        }
        for width in &mut widths {
            *width = (*width).max(self.layout.min_width);
        }

        for row in self.rows.drain(..) {
            for (cell, width) in row.iter().zip(widths) {
                write!(out, "{:<width$}", cell, width = width)?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}
