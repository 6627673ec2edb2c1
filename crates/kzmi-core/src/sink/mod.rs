//! Output artifacts: `<name>.json` (indented) and `<name>.min.json`.
//!
//! Both files get the same unicode re-escape pass and are written to a
//! `.part` sibling first, then renamed into place.

mod escape;
mod file;

pub use escape::unescape_unicode;
pub use file::{temp_path, write_atomic, FileSink};

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io;

use crate::record::Record;

/// Indent used by the human-readable artifact.
pub const PRETTY_INDENT: &[u8] = b"    ";
/// Extension of the human-readable artifact.
pub const JSON_EXT: &str = ".json";
/// Extension of the minified artifact.
pub const MIN_JSON_EXT: &str = ".min.json";

/// Receives normalized record lists.
pub trait MapSink {
    /// Persists `records` under `name`. Does nothing if either is empty.
    fn write(&mut self, name: &str, records: &[Record]) -> Result<()>;
}

/// Serializes with a 4-space indent, then re-escapes unicode.
pub fn to_pretty_json(records: &[Record]) -> serde_json::Result<String> {
    let mut out = Vec::with_capacity(records.len() * 256);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(PRETTY_INDENT));
    records.serialize(&mut ser)?;
    let text = String::from_utf8(out)
        .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(unescape_unicode(&text))
}

/// Serializes without any whitespace, then re-escapes unicode.
pub fn to_minified_json(records: &[Record]) -> serde_json::Result<String> {
    let out = serde_json::to_string(records)?;
    Ok(unescape_unicode(&out))
}
