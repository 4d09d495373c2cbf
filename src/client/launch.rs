//! The launch effect: hand a selected example to an external consumer.
//!
//! A launch takes the configured callback URL, discards any query string it
//! already carries, and attaches the example's source (and its platform
//! discriminator, when the metadata has one) as query parameters. The
//! resulting URL is opened in the configured target context through the
//! [`Navigator`] seam.

use crate::catalog::ExampleRecord;
use crate::client::ClientError;
use crate::log;

/// Build the redirect URL for `example` against `callback_url`.
///
/// Pre-existing query parameters on the callback URL are discarded before
/// `source` and the optional `platform` are appended.
pub fn launch_url(callback_url: &str, example: &ExampleRecord) -> String {
    let base = callback_url.split('?').next().unwrap_or(callback_url);

    let mut url = format!("{}?source={}", base, urlencoding::encode(&example.source));
    if let Some(platform) = example.platform() {
        url.push_str("&platform=");
        url.push_str(&urlencoding::encode(platform));
    }
    url
}

/// Navigation sink for the launch effect.
pub trait Navigator: Send + Sync + 'static {
    fn open(&self, url: &str, target: &str) -> Result<(), ClientError>;
}

/// Navigator that reports the launch instead of performing it; the default
/// for the CLI host, where the external consumer is whoever reads the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open(&self, url: &str, target: &str) -> Result<(), ClientError> {
        log!("client"; "open {url} in {target}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn example(source: &str, platform: Option<&str>) -> ExampleRecord {
        let mut extra = Map::new();
        if let Some(platform) = platform {
            extra.insert("platform".to_string(), Value::String(platform.to_string()));
        }
        ExampleRecord {
            origin: "a.c".to_string(),
            title: "A".to_string(),
            tags: None,
            source: source.to_string(),
            extra,
        }
    }

    #[test]
    fn test_launch_url_discards_existing_query() {
        let url = launch_url("https://x/y?old=1", &example("print(1)", Some("py")));

        assert!(!url.contains("old=1"));
        assert!(url.starts_with("https://x/y?"));
        assert!(url.contains("source=print%281%29"));
        assert!(url.contains("platform=py"));
    }

    #[test]
    fn test_launch_url_without_platform() {
        let url = launch_url("https://x/y", &example("code", None));
        assert_eq!(url, "https://x/y?source=code");
    }

    #[test]
    fn test_launch_url_encodes_source() {
        let url = launch_url("https://x/y", &example("a b&c=d\n", None));
        assert_eq!(url, "https://x/y?source=a%20b%26c%3Dd%0A");
    }

    #[test]
    fn test_launch_url_non_string_platform_ignored() {
        let mut extra = Map::new();
        extra.insert("platform".to_string(), Value::from(42));
        let record = ExampleRecord {
            origin: "a.c".to_string(),
            title: "A".to_string(),
            tags: None,
            source: "s".to_string(),
            extra,
        };

        assert_eq!(launch_url("https://x/y", &record), "https://x/y?source=s");
    }
}
