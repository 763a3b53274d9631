//! HTTP client for the postcode lookup service.
//!
//! Wraps `reqwest` with typed response deserialization. The service exposes
//! `GET {endpoint}{postcode}` for coordinate lookup and
//! `GET {endpoint}{postcode}/validate` for validation.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Url};

use coffeedrop_core::geo::Coordinate;

use crate::error::PostcodeError;
use crate::types::{LookupResponse, ValidateResponse};

/// Characters that must be escaped inside a URL path segment. UK postcodes
/// contain a space ("SW1A 1AA").
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Client for the postcode lookup service.
///
/// Use [`PostcodesClient::new`] with the configured endpoint, or point
/// `endpoint` at a mock server in tests.
#[derive(Debug, Clone)]
pub struct PostcodesClient {
    client: Client,
    base_url: Url,
}

impl PostcodesClient {
    /// Creates a new client for the given endpoint, e.g.
    /// `https://api.postcodes.io/postcodes/`.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PostcodeError::InvalidEndpoint`] if
    /// `endpoint` is not a parseable URL.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, PostcodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("coffeedrop/0.1 (store-locator)")
            .build()?;

        // Normalise: the endpoint must end in a slash so joined postcode
        // segments extend the path instead of replacing its last segment.
        let normalised = format!("{}/", endpoint.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PostcodeError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Checks whether the postcode is valid according to the service.
    ///
    /// Legacy semantics, preserved deliberately: any transport failure,
    /// non-200 response, or malformed body yields `false` rather than an
    /// error. Failures are logged.
    pub async fn is_valid(&self, postcode: &str) -> bool {
        let url = self.build_url(postcode, Some("validate"));

        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(postcode, error = %e, "postcode validation request failed");
                return false;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(
                postcode,
                status = %response.status(),
                "postcode validation returned non-success status"
            );
            return false;
        }

        match response.json::<ValidateResponse>().await {
            Ok(body) => body.result,
            Err(e) => {
                tracing::warn!(postcode, error = %e, "postcode validation body malformed");
                false
            }
        }
    }

    /// Resolves a postcode to its latitude/longitude.
    ///
    /// # Errors
    ///
    /// - [`PostcodeError::Http`] on network failure or non-2xx status.
    /// - [`PostcodeError::Deserialize`] if the body does not match the
    ///   expected `{ "result": { "latitude", "longitude" } }` shape.
    /// - [`PostcodeError::MissingCoordinates`] if the result carries null
    ///   coordinates.
    pub async fn lookup(&self, postcode: &str) -> Result<Coordinate, PostcodeError> {
        let url = self.build_url(postcode, None);

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: LookupResponse =
            serde_json::from_str(&body).map_err(|e| PostcodeError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        match (envelope.result.latitude, envelope.result.longitude) {
            (Some(lat), Some(lng)) => Ok(Coordinate { lat, lng }),
            _ => Err(PostcodeError::MissingCoordinates(postcode.to_owned())),
        }
    }

    /// Builds `{base}{postcode}` or `{base}{postcode}/{suffix}` with the
    /// postcode percent-encoded as a single path segment.
    fn build_url(&self, postcode: &str, suffix: Option<&str>) -> Url {
        let encoded = utf8_percent_encode(postcode, PATH_SEGMENT).to_string();
        let path = match suffix {
            Some(suffix) => format!("{encoded}/{suffix}"),
            None => encoded,
        };
        // The base URL is validated at construction and ends with '/', so
        // join cannot fail on an encoded segment.
        self.base_url
            .join(&path)
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(endpoint: &str) -> PostcodesClient {
        PostcodesClient::new(endpoint, 10).expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_postcode_to_endpoint() {
        let client = test_client("https://api.postcodes.io/postcodes/");
        let url = client.build_url("N77TJ", None);
        assert_eq!(url.as_str(), "https://api.postcodes.io/postcodes/N77TJ");
    }

    #[test]
    fn build_url_adds_validate_suffix() {
        let client = test_client("https://api.postcodes.io/postcodes");
        let url = client.build_url("N77TJ", Some("validate"));
        assert_eq!(
            url.as_str(),
            "https://api.postcodes.io/postcodes/N77TJ/validate"
        );
    }

    #[test]
    fn build_url_percent_encodes_spaces() {
        let client = test_client("https://api.postcodes.io/postcodes/");
        let url = client.build_url("SW1A 1AA", None);
        assert_eq!(
            url.as_str(),
            "https://api.postcodes.io/postcodes/SW1A%201AA"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = PostcodesClient::new("not a url", 10).expect_err("should fail");
        assert!(matches!(err, PostcodeError::InvalidEndpoint { .. }));
    }
}
