//! Serde mirror of the raw `TIME_SERIES_DAILY_ADJUSTED` payload.
//!
//! The provider labels every field with a numbered prefix; the `rename`
//! attributes below bind each raw label to its canonical column. Rows arrive
//! as all-string objects and are typed in [`DailyRow::into_bar`]. Unknown
//! extra fields are ignored; missing expected fields are a hard error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::model::Bar;
use crate::error::AvError;

pub(crate) const META_KEY: &str = "Meta Data";
pub(crate) const SERIES_KEY: &str = "Time Series (Daily)";

#[derive(Deserialize)]
pub(crate) struct DailyEnvelope {
    #[serde(rename = "Meta Data")]
    pub(crate) meta: Option<MetaData>,
    // Rows keyed by `YYYY-MM-DD`; kept as raw values so row errors can be
    // reported with the row's date attached.
    #[serde(rename = "Time Series (Daily)")]
    pub(crate) series: Option<BTreeMap<String, Value>>,
}

#[derive(Deserialize)]
pub(crate) struct MetaData {
    #[serde(rename = "2. Symbol")]
    pub(crate) symbol: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct DailyRow {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. adjusted close")]
    adj_close: String,
    #[serde(rename = "6. volume")]
    volume: String,
    #[serde(rename = "7. dividend amount")]
    dividend: String,
    #[serde(rename = "8. split coefficient")]
    split_coeff: String,
}

impl DailyRow {
    /// Parse every column to its declared type, naming the offending field
    /// and row on failure.
    pub(crate) fn into_bar(self, date: NaiveDate) -> Result<Bar, AvError> {
        Ok(Bar {
            date,
            open: parse_f64("1. open", &self.open, date)?,
            high: parse_f64("2. high", &self.high, date)?,
            low: parse_f64("3. low", &self.low, date)?,
            close: parse_f64("4. close", &self.close, date)?,
            adj_close: parse_f64("5. adjusted close", &self.adj_close, date)?,
            volume: parse_u64("6. volume", &self.volume, date)?,
            dividend: parse_f64("7. dividend amount", &self.dividend, date)?,
            split_coeff: parse_f64("8. split coefficient", &self.split_coeff, date)?,
        })
    }
}

fn parse_f64(field: &str, raw: &str, date: NaiveDate) -> Result<f64, AvError> {
    raw.trim()
        .parse()
        .map_err(|_| AvError::Data(format!("field '{field}' on {date}: invalid float '{raw}'")))
}

fn parse_u64(field: &str, raw: &str, date: NaiveDate) -> Result<u64, AvError> {
    raw.trim()
        .parse()
        .map_err(|_| AvError::Data(format!("field '{field}' on {date}: invalid integer '{raw}'")))
}
