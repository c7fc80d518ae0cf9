//! Wire-level structures for the Tibber GraphQL api.
//!
//! This crate has no networking of its own. It describes the request body sent to the api
//! and the records the api returns, so that they can be shared between transports and
//! renderers.

#![warn(missing_docs)]

#[cfg(feature = "date")]
pub mod date;
pub mod de;
pub mod home;
pub mod price;
pub mod request;

pub use home::{Address, Home, HomeFeatures};
pub use price::{PriceInfo, PriceLevel, PricePoint};
pub use request::{GraphqlRequest, Variables};

/// Timestamp type used for price points.
#[cfg(feature = "date")]
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;

/// Timestamp type used for price points. Kept as the raw api string without the `date` feature.
#[cfg(not(feature = "date"))]
pub type Timestamp = String;
