use thiserror::Error;

/// Errors returned by the postcode lookup client.
#[derive(Debug, Error)]
pub enum PostcodeError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint is not a parseable URL.
    #[error("invalid postcode endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The lookup succeeded but the result carried no latitude/longitude
    /// (some valid postcodes have no geolocation data).
    #[error("no coordinates available for postcode '{0}'")]
    MissingCoordinates(String),
}
