//! Client for querying homes and electricity prices from the Tibber GraphQL api.
//!
//! ```no_run
//! # async fn run() -> Result<(), powerctl::Error> {
//! let client = powerctl::Client::new("<TIBBER_TOKEN>")?;
//! for home in client.get_homes().await? {
//!     let prices = client.get_prices(&home.id).await?;
//!     println!("{}: {:?}", home.display_name(), prices.current);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate async_trait;

mod auth;
pub mod cli;
mod client;
pub mod config;
mod conn;
mod error;
pub mod output;
pub mod queries;
pub mod version;

pub use auth::Auth;
pub use client::Client;
pub use config::Config;
pub use conn::*;
pub use error::{ConfigError, Error};
pub use powerctl_protocol as protocol;
pub use powerctl_protocol::{Address, Home, HomeFeatures, PriceInfo, PriceLevel, PricePoint};
