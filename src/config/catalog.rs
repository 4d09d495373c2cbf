//! `[catalog]` section configuration.
//!
//! Where the example tree lives and how candidates are recognized.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[catalog]` section in exhibit.toml - example tree settings.
///
/// # Example
/// ```toml
/// [catalog]
/// dir = "examples"
/// extensions = ["c", "py"]
/// default_lang = "en"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Project root directory (set from CLI, not usually written in the file).
    #[serde(default = "defaults::catalog::root")]
    #[educe(Default = defaults::catalog::root())]
    pub root: Option<PathBuf>,

    /// Catalog directory, relative to the project root.
    #[serde(default = "defaults::catalog::dir")]
    #[educe(Default = defaults::catalog::dir())]
    pub dir: PathBuf,

    /// Recognized example file extensions.
    #[serde(default = "defaults::catalog::extensions")]
    #[educe(Default = defaults::catalog::extensions())]
    pub extensions: Vec<String>,

    /// Variant language requested when a client supplies none.
    #[serde(default = "defaults::catalog::default_lang")]
    #[educe(Default = defaults::catalog::default_lang())]
    pub default_lang: String,
}

#[cfg(test)]
mod tests {
    use super::super::ExhibitConfig;

    #[test]
    fn test_catalog_config() {
        let config = r#"
            [catalog]
            dir = "snippets"
            extensions = ["c"]
            default_lang = "fr"
        "#;
        let config: ExhibitConfig = toml::from_str(config).unwrap();

        assert_eq!(config.catalog.dir, std::path::PathBuf::from("snippets"));
        assert_eq!(config.catalog.extensions, vec!["c"]);
        assert_eq!(config.catalog.default_lang, "fr");
    }

    #[test]
    fn test_catalog_config_defaults() {
        let config: ExhibitConfig = toml::from_str("").unwrap();

        assert_eq!(config.catalog.dir, std::path::PathBuf::from("examples"));
        assert_eq!(config.catalog.extensions, vec!["c", "py"]);
        assert_eq!(config.catalog.default_lang, "en");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [catalog]
            unknown_field = "should_fail"
        "#;
        let result: Result<ExhibitConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }
}
