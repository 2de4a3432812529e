//! alphavantage-rs: typed client for the AlphaVantage daily-adjusted time series.
//!
//! Fetches `TIME_SERIES_DAILY_ADJUSTED` for a single ticker, normalizes the
//! JSON payload into a date-indexed table, and exposes derived views such as
//! the daily closing price and yearly dividend aggregates.

pub mod client;
pub mod error;
pub mod timeseries;

pub use client::{AvClient, AvClientBuilder};
pub use error::AvError;
pub use timeseries::{Bar, DailyTable, OutputSize, TimeSeriesClient};
