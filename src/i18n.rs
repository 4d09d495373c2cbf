//! Localized display strings for the picker UI.
//!
//! A flat key→message table per language, with an explicit fallback chain:
//! exact locale → same base language → default locale. Unknown keys resolve
//! to a `L:<key>` marker so a missing translation is visible instead of
//! silently blank. Lookups are memoized per `(language, key)`.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
};

/// Locale used when the requested one has no table.
pub const DEFAULT_LANGUAGE: &str = "en-US";

const EN_US: &[(&str, &str)] = &[
    ("LOAD_EXAMPLES_FAILED", "examples failed to load"),
    ("AVAILABLE_EXAMPLES", "Available examples"),
    ("TAG_FILTERING_MESSAGE", "Toggle filtering by clicking on tags:"),
    ("SELECT_EXAMPLE_MESSAGE", "Select an example by clicking on its title:"),
    ("NO_EXAMPLE_SELECTED", "no example selected"),
    ("USE_EXAMPLE_BUTTON", "Use"),
    ("tag:plain", "plain"),
    ("tag:arduino", "arduino"),
];

const FR_FR: &[(&str, &str)] = &[
    ("LOAD_EXAMPLES_FAILED", "le chargement des exemples a échoué"),
    ("AVAILABLE_EXAMPLES", "Exemples disponibles"),
    ("TAG_FILTERING_MESSAGE", "Filtrez en cliquant sur les étiquettes :"),
    ("SELECT_EXAMPLE_MESSAGE", "Choisissez un exemple en cliquant sur son titre :"),
    ("NO_EXAMPLE_SELECTED", "aucun exemple choisi"),
    ("USE_EXAMPLE_BUTTON", "Utiliser"),
    ("tag:plain", "simple"),
    ("tag:arduino", "arduino"),
];

const TABLES: &[(&str, &[(&str, &str)])] = &[("en-US", EN_US), ("fr-FR", FR_FR)];

static CACHE: OnceLock<Mutex<HashMap<(String, String), Arc<str>>>> = OnceLock::new();

/// Resolve a language code to a table we actually carry.
///
/// Exact match first, then the first table sharing the base language
/// (`fr` → `fr-FR`), then [`DEFAULT_LANGUAGE`].
fn resolve_language(language: &str) -> &'static str {
    if let Some((name, _)) = TABLES.iter().find(|(name, _)| *name == language) {
        return name;
    }

    let base = language.split(['-', '_']).next().unwrap_or_default();
    if !base.is_empty()
        && let Some((name, _)) = TABLES
            .iter()
            .find(|(name, _)| name.split('-').next() == Some(base))
    {
        return name;
    }

    DEFAULT_LANGUAGE
}

fn table(language: &str) -> &'static [(&'static str, &'static str)] {
    TABLES
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(EN_US, |(_, table)| table)
}

fn lookup(language: &str, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, message)| *message)
}

/// Localized message for `key`, memoized per `(language, key)`.
pub fn message(language: &str, key: &str) -> Arc<str> {
    let resolved = resolve_language(language);

    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

    cache
        .entry((resolved.to_string(), key.to_string()))
        .or_insert_with(|| {
            lookup(resolved, key)
                .or_else(|| lookup(DEFAULT_LANGUAGE, key))
                .map_or_else(|| Arc::from(format!("L:{key}")), Arc::from)
        })
        .clone()
}

/// Like [`message`], but with a caller-supplied fallback for unknown keys.
///
/// Used for tag display names, where the raw tag is a fine default.
pub fn message_or(language: &str, key: &str, default: &str) -> String {
    let resolved = message(language, key);
    if resolved.starts_with("L:") {
        default.to_string()
    } else {
        resolved.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_known_key() {
        assert_eq!(&*message("en-US", "USE_EXAMPLE_BUTTON"), "Use");
        assert_eq!(&*message("fr-FR", "USE_EXAMPLE_BUTTON"), "Utiliser");
    }

    #[test]
    fn test_message_unknown_language_falls_back() {
        assert_eq!(&*message("de-DE", "USE_EXAMPLE_BUTTON"), "Use");
    }

    #[test]
    fn test_message_base_language_resolves_region() {
        assert_eq!(&*message("fr", "USE_EXAMPLE_BUTTON"), "Utiliser");
    }

    #[test]
    fn test_message_unknown_key_marker() {
        assert_eq!(&*message("en-US", "NOT_A_KEY"), "L:NOT_A_KEY");
    }

    #[test]
    fn test_message_memoized() {
        let first = message("en-US", "AVAILABLE_EXAMPLES");
        let second = message("en-US", "AVAILABLE_EXAMPLES");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_message_or_default_for_unknown_tag() {
        assert_eq!(message_or("en-US", "tag:plain", "plain"), "plain");
        assert_eq!(message_or("fr-FR", "tag:plain", "plain"), "simple");
        assert_eq!(message_or("en-US", "tag:quantum", "quantum"), "quantum");
    }

    #[test]
    fn test_resolve_language_chain() {
        assert_eq!(resolve_language("fr-FR"), "fr-FR");
        assert_eq!(resolve_language("fr"), "fr-FR");
        assert_eq!(resolve_language("fr_CA"), "fr-FR");
        assert_eq!(resolve_language("xx"), DEFAULT_LANGUAGE);
        assert_eq!(resolve_language(""), DEFAULT_LANGUAGE);
    }
}
