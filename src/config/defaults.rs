//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [catalog] Section Defaults
// ============================================================================

pub mod catalog {
    use crate::catalog::{FALLBACK_LANG, walker::EXAMPLE_EXTENSIONS};
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn dir() -> PathBuf {
        "examples".into()
    }

    pub fn extensions() -> Vec<String> {
        EXAMPLE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
    }

    pub fn default_lang() -> String {
        FALLBACK_LANG.into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}

// ============================================================================
// [client] Section Defaults
// ============================================================================

pub mod client {
    use crate::catalog::FALLBACK_LANG;

    pub fn base_url() -> Option<String> {
        None
    }

    pub fn callback_url() -> Option<String> {
        None
    }

    pub fn lang() -> String {
        FALLBACK_LANG.into()
    }

    pub fn target() -> String {
        "_blank".into()
    }
}
