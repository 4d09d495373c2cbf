//! Language-variant resolution over raw candidate paths.
//!
//! The same logical example may exist in several languages as sibling files
//! sharing a key, e.g. `fizzbuzz.c` and `fizzbuzz.fr.c`. Resolution picks
//! exactly one file per logical key for the requested language, falling back
//! to `en`, and drops the key entirely when neither exists.
//!
//! Resolution runs on raw paths, before any file is read, so a variant the
//! user didn't ask for is never parsed and can never surface as a spurious
//! parse error.
//!
//! # Filename grammar
//!
//! `<dir>/<key>[.<lang>].<ext>` where `<key>` is `[A-Za-z0-9_-]+` and
//! `<lang>` is exactly two lowercase ASCII letters. Paths that don't match
//! are silently dropped: not resolved, not parsed, not reported. Only files
//! that *look like* examples but fail metadata parsing become errors.

use regex::Regex;
use std::{
    collections::BTreeMap,
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::OnceLock,
};

/// Language assumed for variants without a `.xx` suffix, and the fallback
/// when the requested language has no variant for a key.
pub const FALLBACK_LANG: &str = "en";

static STEM_RE: OnceLock<Regex> = OnceLock::new();

fn stem_re() -> &'static Regex {
    STEM_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_-]+)(?:\.([a-z]{2}))?$").expect("valid stem regex")
    })
}

/// Decode a file stem (name without extension) into `(key, lang)`.
///
/// Returns `None` when the stem doesn't match the naming grammar.
pub fn decode_stem(stem: &str) -> Option<(&str, &str)> {
    let captures = stem_re().captures(stem)?;
    let key = captures.get(1)?.as_str();
    let lang = captures.get(2).map_or(FALLBACK_LANG, |m| m.as_str());
    Some((key, lang))
}

/// Select one path per logical example key for `lang`.
///
/// Grouping is by `(directory, key)` so identically-named examples living in
/// different directories stay distinct. Within a group the language map is
/// built last-seen-wins; duplicate language variants for one key are
/// tolerated, not an error. The returned list is sorted by path string for
/// deterministic downstream processing.
pub fn resolve_variants(root: &Path, mut candidates: Vec<PathBuf>, lang: &str) -> Vec<PathBuf> {
    // Sorted input makes last-seen-wins deterministic across walk orders.
    candidates.sort();

    let mut groups: BTreeMap<(String, String), BTreeMap<String, PathBuf>> = BTreeMap::new();
    for path in candidates {
        let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };
        let Some((key, variant_lang)) = decode_stem(stem) else {
            continue;
        };

        let dir = grouping_dir(root, &path);
        groups
            .entry((dir, key.to_string()))
            .or_default()
            .insert(variant_lang.to_string(), path);
    }

    let mut selected: Vec<PathBuf> = groups
        .into_values()
        .filter_map(|variants| {
            variants
                .get(lang)
                .or_else(|| variants.get(FALLBACK_LANG))
                .cloned()
        })
        .collect();
    selected.sort();
    selected
}

/// Parent directory of `path` relative to `root`, `/`-separated.
///
/// Empty string for files at the catalog root.
fn grouping_dir(root: &Path, path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}
