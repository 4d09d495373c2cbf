//! `[client]` section configuration.
//!
//! Load-time options handed to the picker client; immutable once the
//! client initializes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[client]` section in exhibit.toml - picker client settings.
///
/// # Example
/// ```toml
/// [client]
/// base_url = "http://127.0.0.1:5277"
/// callback_url = "https://caller.example/editor"
/// tags = ["plain"]
/// lang = "fr-FR"
/// target = "_blank"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Catalog server base URL.
    #[serde(default = "defaults::client::base_url")]
    #[educe(Default = defaults::client::base_url())]
    pub base_url: Option<String>,

    /// Callback URL that receives the selected example's source.
    #[serde(default = "defaults::client::callback_url")]
    #[educe(Default = defaults::client::callback_url())]
    pub callback_url: Option<String>,

    /// Tags pre-selected in the filter.
    #[serde(default)]
    pub tags: Vec<String>,

    /// UI language, possibly with a region subtag (e.g. "fr-FR").
    #[serde(default = "defaults::client::lang")]
    #[educe(Default = defaults::client::lang())]
    pub lang: String,

    /// Navigation target context for the launch effect.
    #[serde(default = "defaults::client::target")]
    #[educe(Default = defaults::client::target())]
    pub target: String,
}
