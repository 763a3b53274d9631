//! Wire types for the postcode service responses.

use serde::Deserialize;

/// Envelope of `GET {endpoint}{postcode}`.
#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    pub result: LookupResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Envelope of `GET {endpoint}{postcode}/validate`.
#[derive(Debug, Deserialize)]
pub(crate) struct ValidateResponse {
    pub result: bool,
}
