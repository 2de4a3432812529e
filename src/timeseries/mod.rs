//! Daily-adjusted time-series endpoint.
//!
//! [`TimeSeriesClient`] specializes [`AvClient`] for
//! `TIME_SERIES_DAILY_ADJUSTED`: it builds the query, enforces the response
//! schema at one choke point, and owns the resulting [`DailyTable`] plus its
//! derived views.

use chrono::NaiveDate;
use tracing::debug;

use crate::client::AvClient;
use crate::error::AvError;

mod model;
mod wire;

pub use model::{Bar, DailyTable};
use wire::{DailyEnvelope, META_KEY, SERIES_KEY};

const FUNCTION_DAILY_ADJUSTED: &str = "TIME_SERIES_DAILY_ADJUSTED";

/// How much history the provider should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    /// Latest 100 trading days.
    Compact,
    /// The full history of the ticker.
    Full,
}

impl OutputSize {
    fn as_str(self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

pub struct TimeSeriesClient {
    client: AvClient,
    ticker: String,
    output_size: OutputSize,
    table: Option<DailyTable>,
}

impl TimeSeriesClient {
    /// Create a client for one ticker, in the unfetched state.
    ///
    /// The ticker must be non-empty ASCII alphanumeric (plus `.` and `-`)
    /// and is normalized to uppercase.
    pub fn new(client: AvClient, ticker: impl Into<String>) -> Result<Self, AvError> {
        let ticker = normalize_ticker(&ticker.into())?;
        Ok(Self {
            client,
            ticker,
            output_size: OutputSize::Full,
            table: None,
        })
    }

    /// Choose the history depth requested from the provider (default
    /// [`OutputSize::Full`]).
    pub fn output_size(mut self, size: OutputSize) -> Self {
        self.output_size = size;
        self
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Query the provider and replace the table with the normalized result.
    ///
    /// Construction is all-or-nothing: any schema violation discards the
    /// whole response and leaves the previous table (if any) in place.
    /// Calling `fetch` again issues a fresh HTTP request and swaps the table.
    pub async fn fetch(&mut self) -> Result<(), AvError> {
        let value = self
            .client
            .query(
                FUNCTION_DAILY_ADJUSTED,
                &[
                    ("symbol", self.ticker.as_str()),
                    ("outputsize", self.output_size.as_str()),
                ],
            )
            .await?;

        let envelope: DailyEnvelope = serde_json::from_value(value)
            .map_err(|e| AvError::Data(format!("{}: malformed envelope: {e}", self.ticker)))?;

        let meta = envelope
            .meta
            .ok_or_else(|| AvError::Data(format!("missing '{META_KEY}' for {}", self.ticker)))?;
        let symbol = meta.symbol.as_deref().ok_or_else(|| {
            AvError::Data(format!("metadata field '2. Symbol' missing for {}", self.ticker))
        })?;
        if !symbol.eq_ignore_ascii_case(&self.ticker) {
            return Err(AvError::Data(format!(
                "metadata symbol '{symbol}' does not match requested ticker '{}'",
                self.ticker
            )));
        }

        let series = envelope
            .series
            .ok_or_else(|| AvError::Data(format!("missing '{SERIES_KEY}' for {}", self.ticker)))?;

        let mut bars = Vec::with_capacity(series.len());
        for (date_str, raw_row) in series {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                AvError::Data(format!("unparseable date key '{date_str}': {e}"))
            })?;
            let row: wire::DailyRow = serde_json::from_value(raw_row)
                .map_err(|e| AvError::Data(format!("row {date_str}: {e}")))?;
            bars.push(row.into_bar(date)?);
        }

        let table = DailyTable::from_bars(bars)?;
        debug!(ticker = %self.ticker, rows = table.len(), "daily series normalized");
        self.table = Some(table);
        Ok(())
    }

    /// The normalized table, or [`AvError::Unfetched`] before `fetch()`.
    pub fn table(&self) -> Result<&DailyTable, AvError> {
        self.table.as_ref().ok_or_else(|| AvError::Unfetched {
            ticker: self.ticker.clone(),
        })
    }

    /// Closing price per trading day, date ascending.
    pub fn daily_price(&self) -> Result<Vec<(NaiveDate, f64)>, AvError> {
        Ok(self.table()?.daily_price())
    }

    /// Closing prices within `[from, to]`, both inclusive.
    pub fn daily_price_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, AvError> {
        check_range(from, to)?;
        Ok(self
            .table()?
            .bars()
            .iter()
            .filter(|b| b.date >= from && b.date <= to)
            .map(|b| (b.date, b.close))
            .collect())
    }

    /// Traded volume per trading day, date ascending.
    pub fn daily_volume(&self) -> Result<Vec<(NaiveDate, u64)>, AvError> {
        Ok(self.table()?.daily_volume())
    }

    /// Traded volume within `[from, to]`, both inclusive.
    pub fn daily_volume_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, u64)>, AvError> {
        check_range(from, to)?;
        Ok(self
            .table()?
            .bars()
            .iter()
            .filter(|b| b.date >= from && b.date <= to)
            .map(|b| (b.date, b.volume))
            .collect())
    }

    /// Dividend total per calendar year, year ascending.
    pub fn yearly_dividends(&self) -> Result<Vec<(i32, f64)>, AvError> {
        Ok(self.table()?.yearly_dividends())
    }

    /// Dividend total per (calendar year, quarter), year then quarter
    /// ascending.
    pub fn yearly_dividends_per_quarter(&self) -> Result<Vec<((i32, u32), f64)>, AvError> {
        Ok(self.table()?.yearly_dividends_per_quarter())
    }
}

fn normalize_ticker(raw: &str) -> Result<String, AvError> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        return Err(AvError::Config("ticker must be non-empty".into()));
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(AvError::Config(format!(
            "ticker '{ticker}' contains characters outside [A-Za-z0-9.-]"
        )));
    }
    Ok(ticker.to_ascii_uppercase())
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), AvError> {
    if from > to {
        return Err(AvError::Config(format!(
            "date range start {from} is after end {to}"
        )));
    }
    Ok(())
}
