//! Client for the external postcode lookup service (postcodes.io wire
//! contract): postcode validation and postcode → coordinate resolution.

mod client;
mod error;
mod types;

pub use client::PostcodesClient;
pub use error::PostcodeError;
