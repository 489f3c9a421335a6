// Panorama XML API HTTP client
//
// Wraps `reqwest::Client` with Panorama-specific URL construction, API key
// handling, and `<response>` envelope unwrapping. Endpoint groups (device
// groups, tags) are implemented as inherent methods in separate files to
// keep this module focused on transport mechanics.

use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::xml::{self, XmlNode};

/// Header carrying the API key on every authenticated request.
const API_KEY_HEADER: &str = "X-PAN-KEY";

/// Raw HTTP client for the Panorama XML API (`/api/`).
///
/// Every response is a `<response status="..">` document. Methods return the
/// parsed envelope on `status="success"` and an [`Error`] otherwise, so callers
/// only ever see payloads.
pub struct PanoramaClient {
    http: reqwest::Client,
    base_url: Url,
    /// Key generated via `type=keygen` or supplied from configuration.
    api_key: RwLock<Option<SecretString>>,
}

impl PanoramaClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the management interface root, e.g.
    /// `https://panorama.example.com`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            api_key: RwLock::new(None),
        }
    }

    /// The management interface base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── API key management ───────────────────────────────────────────

    /// Use an existing API key for subsequent requests.
    pub fn set_api_key(&self, key: SecretString) {
        debug!("storing API key");
        *self
            .api_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(key);
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Generate an API key from administrator credentials and store it.
    ///
    /// `POST /api/` with `type=keygen&user=..&password=..`
    pub async fn keygen(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.api_url()?;
        debug!(username, "generating API key");

        let resp = self
            .http
            .post(url)
            .form(&[
                ("type", "keygen"),
                ("user", username),
                ("password", password.expose_secret()),
            ])
            .send()
            .await
            .map_err(Error::Transport)?;

        let root = self.parse_response(resp).await.map_err(|e| match e {
            Error::Api { message, .. } => Error::Authentication { message },
            other => other,
        })?;

        let key = root
            .child("result")
            .and_then(|r| r.child_text("key"))
            .ok_or_else(|| Error::Authentication {
                message: "keygen response did not contain a key".into(),
            })?;

        let key = SecretString::from(key.to_owned());
        self.set_api_key(key.clone());
        Ok(key)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/`
    pub(crate) fn api_url(&self) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Read a configuration subtree from the running configuration.
    ///
    /// `GET /api/?type=config&action=show&xpath=..`. Returns the `<result>`
    /// element (empty if the device answered without one).
    pub(crate) async fn show_config(&self, xpath: &str) -> Result<XmlNode, Error> {
        let url = self.api_url()?;
        debug!(xpath, "reading running configuration");

        let key = self
            .api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::MissingApiKey)?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, key.expose_secret())
            .query(&[("type", "config"), ("action", "show"), ("xpath", xpath)])
            .send()
            .await
            .map_err(Error::Transport)?;

        let root = self.parse_response(resp).await?;
        Ok(root
            .children
            .into_iter()
            .find(|c| c.name == "result")
            .unwrap_or_else(|| XmlNode {
                name: "result".into(),
                ..XmlNode::default()
            }))
    }

    /// Parse the `<response>` envelope, returning it on `status="success"`.
    ///
    /// HTTP 401/403 become [`Error::Authentication`], other HTTP failures
    /// [`Error::Http`]. `status="error"` envelopes become [`Error::Api`]
    /// carrying the `<msg>`/`<line>` text.
    async fn parse_response(&self, resp: reqwest::Response) -> Result<XmlNode, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, bytes = body.len(), "received response");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            let message = xml::parse(&body)
                .ok()
                .map(|root| response_message(&root))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(Error::Authentication { message });
        }

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        let root = xml::parse(&body)?;
        if root.name != "response" {
            return Err(Error::Xml {
                message: format!("expected <response> envelope, found <{}>", root.name),
                body,
            });
        }

        match root.attr("status") {
            Some("success") => Ok(root),
            _ => Err(Error::Api {
                message: response_message(&root),
                code: root.attr("code").map(str::to_owned),
            }),
        }
    }
}

/// Join all `<msg>` / `<line>` texts found in an error envelope.
fn response_message(root: &XmlNode) -> String {
    let mut lines = Vec::new();
    collect_message_lines(root, &mut lines);
    if lines.is_empty() {
        "request failed without a message".into()
    } else {
        lines.join("; ")
    }
}

fn collect_message_lines(node: &XmlNode, lines: &mut Vec<String>) {
    for child in &node.children {
        if (child.name == "msg" || child.name == "line") && child.children.is_empty() {
            let text = child.text.trim();
            if !text.is_empty() {
                lines.push(text.to_owned());
            }
        } else {
            collect_message_lines(child, lines);
        }
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_collects_nested_lines() {
        let root = xml::parse(
            r#"<response status="error" code="7"><msg><line>No such node</line><line>try again</line></msg></response>"#,
        )
        .expect("valid xml");
        assert_eq!(response_message(&root), "No such node; try again");
    }

    #[test]
    fn error_message_reads_plain_msg_under_result() {
        let root = xml::parse(
            r#"<response status="error" code="403"><result><msg>Invalid Credential</msg></result></response>"#,
        )
        .expect("valid xml");
        assert_eq!(response_message(&root), "Invalid Credential");
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let client = PanoramaClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://panorama.example.com/").expect("valid url"),
        );
        assert_eq!(
            client.api_url().expect("api url").as_str(),
            "https://panorama.example.com/api/"
        );
    }
}
