//! Memory trace loading.
//!
//! A trace is a text file with one access per line: an access kind (`I` or
//! `D`, case-insensitive) and a hexadecimal address with an optional `0x`
//! prefix, separated by whitespace. Either token may come first. Blank lines
//! and lines starting with `#` are ignored.
//!
//! ```text
//! # kind address
//! I 0x00400000
//! D 7fff0010
//! 0x00400004 i
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::data::AccessKind;
use crate::common::error::TraceError;

/// One access from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Which L1 services the access.
    pub kind: AccessKind,
    /// The accessed address.
    pub addr: u32,
}

fn parse_addr(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).ok()
}

/// Parses one trace line.
///
/// # Returns
///
/// `Ok(None)` for blank and comment lines, `Ok(Some(entry))` for an access.
///
/// # Errors
///
/// [`TraceError::Parse`] if the line is neither, tagged with `line_no`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<TraceEntry>, TraceError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = || TraceError::Parse {
        line: line_no,
        content: trimmed.to_string(),
    };

    let mut tokens = trimmed.split_whitespace();
    let (Some(first), Some(second), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(malformed());
    };

    // Kind-first is the canonical order; `D` is also a valid hex address.
    let entry = |kind: &str, addr: &str| {
        Some(TraceEntry {
            kind: AccessKind::from_mnemonic(kind)?,
            addr: parse_addr(addr)?,
        })
    };
    entry(first, second)
        .or_else(|| entry(second, first))
        .map(Some)
        .ok_or_else(malformed)
}

/// Reads every access from `reader`.
///
/// # Errors
///
/// Stops at the first I/O failure or malformed line.
pub fn read_trace(reader: impl BufRead) -> Result<Vec<TraceEntry>, TraceError> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(entry) = parse_line(&line?, i + 1)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Opens and reads the trace at `path`.
///
/// # Errors
///
/// [`TraceError::Io`] if the file cannot be opened or read, otherwise as
/// [`read_trace`].
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEntry>, TraceError> {
    let file = File::open(path)?;
    read_trace(BufReader::new(file))
}
