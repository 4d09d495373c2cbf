//! Example catalog pipeline.
//!
//! One [`scan`] call drives the whole pipeline for a request:
//!
//! ```text
//! scan(root, options)
//!     │
//!     ├── walker::walk_examples()      recursive candidate discovery
//!     ├── variants::resolve_variants() one path per key for the language
//!     ├── parser::parse_file()         fan-out reads, failures isolated
//!     │       (rayon, order-preserving collect)
//!     ├── sort by title                stable, deterministic
//!     └── tags::collect_tags()         distinct sorted tag set
//! ```
//!
//! The result is assembled fresh per request; nothing persists between
//! scans. A directory-walk failure is the only fatal error — every per-file
//! problem lands in `errors` instead of aborting the request.

pub mod parser;
pub mod tags;
pub mod variants;
pub mod walker;

pub use parser::{ExampleRecord, ParseFailure};
pub use variants::FALLBACK_LANG;

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Scan Types
// ============================================================================

/// Per-request scan parameters.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Requested variant language; `en` when unset.
    pub lang: Option<String>,
    /// Recognized example file extensions.
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            lang: None,
            extensions: walker::EXAMPLE_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
        }
    }
}

/// One complete catalog result: parsed examples, their distinct tags, and
/// the per-file failures encountered along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    pub examples: Vec<ExampleRecord>,
    pub tags: Vec<String>,
    pub errors: Vec<ParseFailure>,
}

/// Wire envelope for catalog responses.
///
/// Success: `{"success":true,"data":{...}}`. Fatal scan failure:
/// `{"error":"..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEnvelope {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CatalogData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CatalogEnvelope {
    pub fn success(data: CatalogData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Collapse the envelope into the payload or an error message.
    pub fn into_result(self) -> Result<CatalogData, String> {
        match self {
            Self {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Self {
                error: Some(error), ..
            } => Err(error),
            _ => Err("catalog response missing data".to_string()),
        }
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Scan the catalog root and assemble one [`CatalogData`] for the request.
///
/// Per-file reads fan out on the rayon pool; the order-preserving collect
/// plus the final stable sort make the result deterministic regardless of
/// read completion order. The call does not return until every candidate's
/// read has settled.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<CatalogData> {
    let candidates = walker::walk_examples(root, &options.extensions)?;

    let lang = options.lang.as_deref().unwrap_or(FALLBACK_LANG);
    let selected = variants::resolve_variants(root, candidates, lang);

    let outcomes: Vec<_> = selected
        .par_iter()
        .map(|path| parser::parse_file(root, path))
        .collect();

    let mut examples = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(example) => examples.push(example),
            Err(failure) => errors.push(failure),
        }
    }

    // Unicode-lowercase key approximates locale collation; the sort is
    // stable, so equal titles keep their (path-sorted) relative order.
    examples.sort_by_cached_key(|e| e.title.to_lowercase());

    let tags = tags::collect_tags(&examples);

    Ok(CatalogData {
        examples,
        tags,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn scan_lang(dir: &TempDir, lang: &str) -> CatalogData {
        let options = ScanOptions {
            lang: Some(lang.to_string()),
            ..ScanOptions::default()
        };
        scan(dir.path(), &options).unwrap()
    }

    #[test]
    fn test_scan_end_to_end_language_fallback() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "fizz.c",
            "/* {\"title\":\"Fizz\",\"tags\":[\"math\"]} */\nint main() {}\n",
        );
        write(
            &dir,
            "fizz.fr.c",
            "/* {\"title\":\"Fizz (fr)\",\"tags\":[\"math\"]} */\nint main() {}\n",
        );

        let data = scan_lang(&dir, "fr");
        assert_eq!(data.examples.len(), 1);
        assert_eq!(data.examples[0].title, "Fizz (fr)");
        assert_eq!(data.examples[0].origin, "fizz.fr.c");
        assert_eq!(data.tags, vec!["math"]);
        assert!(data.errors.is_empty());
    }

    #[test]
    fn test_scan_malformed_header_isolated() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.c", "/* {\"title\":\"Good\"} */\ncode\n");
        write(&dir, "bad.c", "no header here\n");

        let data = scan_lang(&dir, "en");
        assert_eq!(data.examples.len(), 1);
        assert_eq!(data.examples[0].title, "Good");
        assert_eq!(
            data.errors,
            vec![ParseFailure {
                origin: "bad.c".to_string()
            }]
        );
    }

    #[test]
    fn test_scan_grammar_mismatch_silently_dropped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "ok.c", "/* {\"title\":\"Ok\"} */\n");
        write(&dir, "a..c", "/* {\"title\":\"Never seen\"} */\n");

        let data = scan_lang(&dir, "en");
        assert_eq!(data.examples.len(), 1);
        assert!(data.errors.is_empty());
    }

    #[test]
    fn test_scan_sorts_by_title() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.c", "/* {\"title\":\"zebra\"} */\n");
        write(&dir, "b.c", "/* {\"title\":\"Alpha\"} */\n");
        write(&dir, "c.c", "/* {\"title\":\"mango\"} */\n");

        let data = scan_lang(&dir, "en");
        let titles: Vec<_> = data.examples.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "mango", "zebra"]);
    }

    #[test]
    fn test_scan_equal_titles_deterministic() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.c", "/* {\"title\":\"Same\"} */\n");
        write(&dir, "a.c", "/* {\"title\":\"Same\"} */\n");

        let first = scan_lang(&dir, "en");
        let second = scan_lang(&dir, "en");
        assert_eq!(first, second);
        // stable sort over path-ordered input
        assert_eq!(first.examples[0].origin, "a.c");
        assert_eq!(first.examples[1].origin, "b.c");
    }

    #[test]
    fn test_scan_missing_root_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(scan(&missing, &ScanOptions::default()).is_err());
    }

    #[test]
    fn test_scan_default_language_is_english() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.c", "/* {\"title\":\"English\"} */\n");
        write(&dir, "a.fr.c", "/* {\"title\":\"French\"} */\n");

        let data = scan(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(data.examples.len(), 1);
        assert_eq!(data.examples[0].title, "English");
    }

    #[test]
    fn test_scan_unreadable_file_becomes_error() {
        // a dangling entry between walk and read degrades to a ParseFailure;
        // simulate with invalid UTF-8, which also fails the read
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bin.c"), [0xff, 0xfe, 0x00]).unwrap();
        write(&dir, "ok.c", "/* {\"title\":\"Ok\"} */\n");

        let data = scan_lang(&dir, "en");
        assert_eq!(data.examples.len(), 1);
        assert_eq!(
            data.errors,
            vec![ParseFailure {
                origin: "bin.c".to_string()
            }]
        );
    }

    // ------------------------------------------------------------------------
    // Envelope tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_envelope_success_shape() {
        let json = serde_json::to_value(CatalogEnvelope::success(CatalogData::default())).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_some());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_envelope_failure_shape() {
        let json = serde_json::to_value(CatalogEnvelope::failure("boom")).unwrap();
        assert!(json.get("success").is_none());
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_envelope_into_result() {
        assert!(
            CatalogEnvelope::success(CatalogData::default())
                .into_result()
                .is_ok()
        );
        assert_eq!(
            CatalogEnvelope::failure("boom").into_result(),
            Err("boom".to_string())
        );

        // explicit {success:false} with no error string
        let envelope: CatalogEnvelope = serde_json::from_str("{\"success\":false}").unwrap();
        assert!(envelope.into_result().is_err());
    }
}
