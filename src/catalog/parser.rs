//! Per-file metadata extraction.
//!
//! The first line of an example file carries its metadata as a JSON object
//! inside a block comment:
//!
//! ```text
//! /* {"title":"Fizz buzz","tags":["math"]} */
//! #include <stdio.h>
//! ...
//! ```
//!
//! Parsing a file yields an [`ExampleRecord`] (header fields plus the
//! computed `origin` and `source`) or a [`ParseFailure`] carrying only the
//! relative origin. Per-file failures are isolated: a broken header never
//! aborts the scan of its siblings.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeSet, fs, path::Path, sync::OnceLock};

static HEADER_RE: OnceLock<Regex> = OnceLock::new();

fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| Regex::new(r"/\*(.*)\*/").expect("valid header regex"))
}

// ============================================================================
// Records
// ============================================================================

/// One resolved, successfully parsed example.
///
/// `origin` is the identity key within a single catalog result. The header
/// schema is open: anything beyond the fields named here passes through
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRecord {
    /// Path relative to the catalog root, `/`-separated, no leading slash.
    pub origin: String,
    /// Display name, also the sort key for catalog assembly.
    pub title: String,
    /// Optional tag list; absent means "no tags".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// File text with the metadata line and its trailing newline removed.
    pub source: String,
    /// Header fields the pipeline doesn't inspect, passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExampleRecord {
    /// Platform/mode discriminator from the header, when present.
    pub fn platform(&self) -> Option<&str> {
        self.extra.get("platform").and_then(Value::as_str)
    }

    /// True when this record's tag set contains every tag in `wanted`.
    ///
    /// An empty `wanted` set matches everything, including untagged records.
    pub fn matches_tags(&self, wanted: &BTreeSet<String>) -> bool {
        wanted.iter().all(|tag| {
            self.tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| t == tag))
        })
    }
}

/// A candidate file whose header failed to parse. Only the origin survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub origin: String,
}

// ============================================================================
// Parsing
// ============================================================================

/// Header fields as they appear in the metadata line.
#[derive(Deserialize)]
struct HeaderMeta {
    title: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Read and parse one candidate file.
///
/// A read failure degrades to a [`ParseFailure`] like any other per-file
/// problem; only the directory walk itself is fatal to a scan.
pub fn parse_file(root: &Path, path: &Path) -> Result<ExampleRecord, ParseFailure> {
    let origin = relative_origin(root, path);
    let Ok(text) = fs::read_to_string(path) else {
        return Err(ParseFailure { origin });
    };
    parse_example(origin, &text)
}

/// Parse the full text of a candidate file into a record.
pub fn parse_example(origin: String, text: &str) -> Result<ExampleRecord, ParseFailure> {
    let first_line = text.lines().next().unwrap_or_default();

    let Some(captures) = header_re().captures(first_line) else {
        return Err(ParseFailure { origin });
    };
    let Ok(mut meta) = serde_json::from_str::<HeaderMeta>(&captures[1]) else {
        return Err(ParseFailure { origin });
    };

    // Header-supplied origin/source would collide with the computed fields.
    meta.extra.remove("origin");
    meta.extra.remove("source");

    let source = text
        .split_once('\n')
        .map(|(_, rest)| rest.to_owned())
        .unwrap_or_default();

    Ok(ExampleRecord {
        origin,
        title: meta.title,
        tags: meta.tags,
        source,
        extra: meta.extra,
    })
}

/// Origin of `path` relative to `root`: separators normalized to `/`, no
/// leading slash.
pub fn relative_origin(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches('/')
        .to_string()
}
