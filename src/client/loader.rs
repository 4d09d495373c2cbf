//! Catalog loading over HTTP.
//!
//! The store talks to the catalog through [`CatalogLoader`], so tests and
//! embedded hosts can substitute an in-process source. [`HttpLoader`] is the
//! real transport: one GET against the server's `/examples.json` route.

use crate::catalog::{CatalogData, CatalogEnvelope};
use crate::client::ClientError;
use std::future::Future;

/// Source of catalog data for the client store.
pub trait CatalogLoader: Send + Sync + 'static {
    /// Fetch the catalog for `lang` from `base_url`.
    ///
    /// Transport failures, non-2xx statuses, and `{success:false}` payloads
    /// all normalize into [`ClientError::Load`].
    fn load(
        &self,
        base_url: &str,
        lang: &str,
    ) -> impl Future<Output = Result<CatalogData, ClientError>> + Send;
}

/// HTTP loader backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpLoader {
    client: reqwest::Client,
}

impl HttpLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogLoader for HttpLoader {
    async fn load(&self, base_url: &str, lang: &str) -> Result<CatalogData, ClientError> {
        let url = format!("{}/examples.json", base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[("lang", lang)])
            .send()
            .await
            .map_err(|err| ClientError::Load(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Load(format!(
                "catalog request returned {status}"
            )));
        }

        let envelope: CatalogEnvelope = response
            .json()
            .await
            .map_err(|err| ClientError::Load(err.to_string()))?;

        envelope.into_result().map_err(ClientError::Load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogData;

    // Transport behavior is covered by the store tests with stub loaders;
    // here we pin the envelope decoding the HTTP path relies on.

    #[test]
    fn test_envelope_decode_success() {
        let body = r#"{"success":true,"data":{"examples":[],"tags":[],"errors":[]}}"#;
        let envelope: CatalogEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_result(), Ok(CatalogData::default()));
    }

    #[test]
    fn test_envelope_decode_error_payload() {
        let body = r#"{"error":"scan failed"}"#;
        let envelope: CatalogEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_result(), Err("scan failed".to_string()));
    }

    #[test]
    fn test_envelope_decode_success_false() {
        let body = r#"{"success":false}"#;
        let envelope: CatalogEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.into_result().is_err());
    }
}
