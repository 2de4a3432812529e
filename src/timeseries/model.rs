use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::AvError;

/// One trading day of the normalized daily-adjusted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
    pub dividend: f64,
    pub split_coeff: f64,
}

/// The normalized table: bars indexed by strictly ascending, unique trading
/// dates. Immutable after construction; every view borrows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTable {
    bars: Vec<Bar>,
}

impl DailyTable {
    /// Build a table from bars in any order. Sorts ascending by date and
    /// rejects duplicate dates.
    pub fn from_bars(mut bars: Vec<Bar>) -> Result<Self, AvError> {
        bars.sort_by_key(|b| b.date);
        for w in bars.windows(2) {
            if w[0].date == w[1].date {
                return Err(AvError::Data(format!(
                    "duplicate trading date {}",
                    w[0].date
                )));
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing price per trading day, date ascending.
    pub fn daily_price(&self) -> Vec<(NaiveDate, f64)> {
        self.bars.iter().map(|b| (b.date, b.close)).collect()
    }

    /// Traded volume per trading day, date ascending.
    pub fn daily_volume(&self) -> Vec<(NaiveDate, u64)> {
        self.bars.iter().map(|b| (b.date, b.volume)).collect()
    }

    /// Dividend total per calendar year, year ascending.
    ///
    /// This is a plain sum over the rows present: years with no rows are
    /// omitted, while years whose rows all carry a zero dividend report
    /// `0.0` (the provider emits an explicit amount for every trading day).
    pub fn yearly_dividends(&self) -> Vec<(i32, f64)> {
        let mut out: Vec<(i32, f64)> = Vec::new();
        for bar in &self.bars {
            let year = bar.date.year();
            match out.last_mut() {
                Some((y, sum)) if *y == year => *sum += bar.dividend,
                _ => out.push((year, bar.dividend)),
            }
        }
        out
    }

    /// Dividend total per (calendar year, quarter), ordered by year then
    /// quarter. Pairs with no underlying rows are omitted, consistent with
    /// [`DailyTable::yearly_dividends`].
    pub fn yearly_dividends_per_quarter(&self) -> Vec<((i32, u32), f64)> {
        let mut out: Vec<((i32, u32), f64)> = Vec::new();
        for bar in &self.bars {
            let key = (bar.date.year(), quarter_of(bar.date));
            match out.last_mut() {
                Some((k, sum)) if *k == key => *sum += bar.dividend,
                _ => out.push((key, bar.dividend)),
            }
        }
        out
    }
}

/// Calendar quarter of a date, in `1..=4`.
fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}
