//! Centralized constants for default endpoint, UA, and timeout.

use std::time::Duration;

/// AlphaVantage query endpoint; every function is selected via the
/// `function` query parameter on this single URL.
pub(crate) const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Identifies this crate to the provider.
pub(crate) const USER_AGENT: &str = concat!("alphavantage-rs/", env!("CARGO_PKG_VERSION"));

/// Cap on a single query round-trip.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
