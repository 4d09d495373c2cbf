//! Catalog HTTP server.
//!
//! A lightweight server built on `tiny_http`, with three routes:
//!
//! - `/examples.json?lang=xx` - scan the catalog and return the wire
//!   envelope (`{"success":true,"data":{...}}` or `{"error":"..."}`)
//! - `/?callback=...&tags=a,b&lang=xx&target=...` - minimal index page
//!   carrying the picker options as embedded JSON for a rendering
//!   collaborator
//! - anything else - 404
//!
//! The scan runs per request; nothing is cached between requests. Request
//! handling errors are logged and never kill the server loop. The server
//! blocks until Ctrl+C.

use crate::{
    catalog::{self, CatalogEnvelope},
    client::ClientOptions,
    config::{ExhibitConfig, split_tags},
    log,
};
use anyhow::{Context, Result};
use std::{borrow::Cow, io::Cursor, net::SocketAddr, sync::Arc};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Index page HTML template (embedded at compile time)
const INDEX_TEMPLATE: &str = include_str!("embed/serve/index.html");

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the catalog server.
///
/// Binds to the configured interface and port (auto-retry on port
/// conflict), installs a Ctrl+C handler for graceful shutdown, then enters
/// the request loop.
pub fn serve_catalog(config: &'static ExhibitConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);
    log!("serve"; "catalog root: {}", config.catalog.dir.display());

    // Handle requests in main thread (blocks until Ctrl+C)
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                // Will retry silently
                continue;
            }
            Err(e) => {
                // Last attempt failed
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &ExhibitConfig) -> Result<()> {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    match path {
        "/examples.json" => serve_examples(request, config, query),
        "/" | "/index.html" => serve_index(request, config, query),
        _ => serve_not_found(request),
    }
}

/// Scan the catalog for the requested language and respond with the
/// envelope. A fatal scan failure becomes `{"error":"..."}`, never a 500
/// with no body.
fn serve_examples(request: Request, config: &ExhibitConfig, query: &str) -> Result<()> {
    let mut options = config.scan_options();
    if let Some(lang) = query_param(query, "lang") {
        options.lang = Some(lang);
    }

    let envelope = match catalog::scan(&config.catalog.dir, &options) {
        Ok(data) => CatalogEnvelope::success(data),
        Err(err) => {
            log!("error"; "scan failed: {err:#}");
            CatalogEnvelope::failure(err.to_string())
        }
    };

    serve_json(request, &envelope)
}

/// Render the index page with the picker options embedded as JSON.
fn serve_index(request: Request, config: &ExhibitConfig, query: &str) -> Result<()> {
    let options = client_options_from_query(config, query);
    serve_html(request, render_index(&options)?)
}

/// Picker options for one page load: config values overridden by the
/// request's query parameters.
fn client_options_from_query(config: &ExhibitConfig, query: &str) -> ClientOptions {
    let mut options = config.client_options();

    if let Some(callback) = query_param(query, "callback") {
        options.callback_url = callback;
    }
    if let Some(tags) = query_param(query, "tags") {
        options.tags = split_tags(&tags);
    }
    if let Some(lang) = query_param(query, "lang") {
        options.lang = lang;
    }
    if let Some(target) = query_param(query, "target") {
        options.target = target;
    }

    options
}

fn render_index(options: &ClientOptions) -> Result<String> {
    // '<' is escaped so option values can never close the inline script tag
    let json = serde_json::to_string(options)?.replace('<', "\\u003c");

    Ok(INDEX_TEMPLATE
        .replace("{title}", "Exhibit")
        .replace("{options}", &json))
}

/// Decoded value of the first query parameter named `name`.
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != name {
            return None;
        }
        let value = value.replace('+', " ");
        Some(
            urlencoding::decode(&value)
                .map(Cow::into_owned)
                .unwrap_or(value),
        )
    })
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a JSON payload.
fn serve_json<T: serde::Serialize>(request: Request, payload: &T) -> Result<()> {
    let body = serde_json::to_string(payload)?;
    let response = Response::from_string(body).with_header(
        Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap(),
    );
    request.respond(response)?;
    Ok(())
}

/// Serve HTML content.
fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // query_param tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_query_param_basic() {
        assert_eq!(query_param("lang=fr&x=1", "lang").as_deref(), Some("fr"));
        assert_eq!(query_param("lang=fr&x=1", "x").as_deref(), Some("1"));
        assert_eq!(query_param("lang=fr", "missing"), None);
        assert_eq!(query_param("", "lang"), None);
    }

    #[test]
    fn test_query_param_decodes() {
        assert_eq!(
            query_param("callback=https%3A%2F%2Fx%2Fy%3Fold%3D1", "callback").as_deref(),
            Some("https://x/y?old=1")
        );
        assert_eq!(query_param("q=a+b%20c", "q").as_deref(), Some("a b c"));
    }

    #[test]
    fn test_query_param_valueless_key() {
        assert_eq!(query_param("flag&lang=fr", "flag").as_deref(), Some(""));
    }

    // ------------------------------------------------------------------------
    // client_options_from_query tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_client_options_from_query_overrides() {
        let config = ExhibitConfig::from_str(
            r#"
            [client]
            base_url = "http://127.0.0.1:5277"
            lang = "en"
        "#,
        )
        .unwrap();

        let options = client_options_from_query(
            &config,
            "callback=https%3A%2F%2Fcaller%2Frun&tags=a,,b&lang=fr-FR&target=_self",
        );

        // base_url is server-side configuration, never client-supplied
        assert_eq!(options.base_url, "http://127.0.0.1:5277");
        assert_eq!(options.callback_url, "https://caller/run");
        assert_eq!(options.tags, vec!["a", "b"]);
        assert_eq!(options.lang, "fr-FR");
        assert_eq!(options.target, "_self");
    }

    #[test]
    fn test_client_options_from_query_empty_query() {
        let config = ExhibitConfig::from_str(
            r#"
            [client]
            tags = ["seeded"]
        "#,
        )
        .unwrap();

        let options = client_options_from_query(&config, "");
        assert_eq!(options.tags, vec!["seeded"]);
        assert_eq!(options.lang, "en");
    }

    // ------------------------------------------------------------------------
    // render_index tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_index_embeds_options() {
        let options = ClientOptions {
            base_url: "http://127.0.0.1:5277".to_string(),
            ..ClientOptions::default()
        };
        let page = render_index(&options).unwrap();

        assert!(page.contains(r#""baseUrl":"http://127.0.0.1:5277""#));
        assert!(page.contains(r#"type="application/json""#));
    }

    #[test]
    fn test_render_index_escapes_script_close() {
        let options = ClientOptions {
            callback_url: "</script><script>alert(1)".to_string(),
            ..ClientOptions::default()
        };
        let page = render_index(&options).unwrap();

        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains("\\u003c/script"));
    }
}
