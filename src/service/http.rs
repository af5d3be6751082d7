//! HTTP implementations of the rendering services.

use super::{ImageService, MarkupService};
use crate::error::{Error, Result};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::io::Read;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use ureq::Agent;

/// Public LaTeX-to-GIF renderer used when no image endpoint is configured.
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://latex.codecogs.com/gif.latex";

/// Create an HTTP agent using native-tls and the platform's root certificates.
pub fn agent() -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .build()
        .into()
}

/// LaTeX-to-markup service reached by a JSON POST.
///
/// Sends `{"latex": <source>}` and returns the response body verbatim.
pub struct HttpMarkupService {
    endpoint: String,
    agent: Agent,
}

impl HttpMarkupService {
    /// Create a service posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_agent(endpoint, agent())
    }

    /// Create a service with a preconfigured agent.
    pub fn with_agent(endpoint: impl Into<String>, agent: Agent) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MarkupService for HttpMarkupService {
    fn latex_to_markup(&self, latex: &str) -> Result<String> {
        let body = serde_json::json!({ "latex": latex }).to_string();
        let response = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .send(body)
            .map_err(|e| Error::collaborator("markup", e))?;

        response
            .into_body()
            .read_to_string()
            .map_err(|e| Error::collaborator("markup", format!("failed to read response: {}", e)))
    }
}

/// LaTeX-to-image service reached by a GET with the source in the query.
pub struct HttpImageService {
    endpoint: String,
    agent: Agent,
}

impl HttpImageService {
    /// Create a service using `endpoint` as the base URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_agent(endpoint, agent())
    }

    /// Create a service with a preconfigured agent.
    pub fn with_agent(endpoint: impl Into<String>, agent: Agent) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    /// Build the request URL for a LaTeX source.
    pub fn url_for(&self, latex: &str) -> String {
        let wrapped = format!("{{{}}}", latex);
        format!(
            "{}?{}",
            self.endpoint,
            utf8_percent_encode(&wrapped, NON_ALPHANUMERIC)
        )
    }
}

impl Default for HttpImageService {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_ENDPOINT)
    }
}

impl ImageService for HttpImageService {
    fn fetch(&self, latex: &str) -> Result<Box<dyn Read>> {
        let url = self.url_for(latex);
        log::debug!("Requesting LaTeX image from {}", url);

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| Error::collaborator("image", e))?;

        Ok(Box::new(response.into_body().into_reader()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_encodes_source() {
        let service = HttpImageService::new("https://example.com/gif.latex");
        assert_eq!(
            service.url_for("x^2 + 1"),
            "https://example.com/gif.latex?%7Bx%5E2%20%2B%201%7D"
        );
    }

    #[test]
    fn test_default_image_endpoint() {
        let service = HttpImageService::default();
        assert!(service.url_for("a").starts_with(DEFAULT_IMAGE_ENDPOINT));
    }

    #[test]
    fn test_markup_endpoint() {
        let service = HttpMarkupService::new("http://localhost:3000/katex");
        assert_eq!(service.endpoint(), "http://localhost:3000/katex");
    }

    #[test]
    fn test_unreachable_markup_service_is_collaborator_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let service = HttpMarkupService::new("http://127.0.0.1:9/katex");
        let result = service.latex_to_markup("x");
        assert!(matches!(
            result,
            Err(Error::Collaborator {
                service: "markup",
                ..
            })
        ));
    }
}
