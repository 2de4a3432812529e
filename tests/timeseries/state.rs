use crate::common;
use alphavantage_rs::{AvClient, AvError, TimeSeriesClient};
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn views_fail_before_fetch() {
    let client = AvClient::builder().api_key("k").build().unwrap();
    let ts = TimeSeriesClient::new(client, "IBM").unwrap();

    for err in [
        ts.daily_price().unwrap_err(),
        ts.daily_volume().unwrap_err(),
        ts.yearly_dividends().unwrap_err(),
        ts.yearly_dividends_per_quarter().unwrap_err(),
    ] {
        match err {
            AvError::Unfetched { ticker } => assert_eq!(ticker, "IBM"),
            other => panic!("expected Unfetched error, got {other:?}"),
        }
    }
}

#[test]
fn ticker_is_validated_and_normalized() {
    let client = AvClient::builder().api_key("k").build().unwrap();

    let ts = TimeSeriesClient::new(client.clone(), "ibm").unwrap();
    assert_eq!(ts.ticker(), "IBM");

    assert!(matches!(
        TimeSeriesClient::new(client.clone(), ""),
        Err(AvError::Config(_))
    ));
    assert!(matches!(
        TimeSeriesClient::new(client.clone(), "   "),
        Err(AvError::Config(_))
    ));
    assert!(matches!(
        TimeSeriesClient::new(client, "IBM;DROP"),
        Err(AvError::Config(_))
    ));

    // Share-class and exchange-suffix tickers are accepted.
    let client = AvClient::builder().api_key("k").build().unwrap();
    assert!(TimeSeriesClient::new(client, "BRK.B").is_ok());
}

#[test]
fn reversed_date_range_is_a_config_error() {
    let client = AvClient::builder().api_key("k").build().unwrap();
    let ts = TimeSeriesClient::new(client, "IBM").unwrap();

    let err = ts
        .daily_price_between(date("2023-06-01"), date("2023-01-01"))
        .unwrap_err();
    assert!(matches!(err, AvError::Config(_)), "got {err:?}");
}

#[tokio::test]
async fn refetch_replaces_the_table() {
    let server = common::setup_server();

    let mut first = common::mock_daily(&server, "IBM", "daily_adjusted_IBM");
    let mut ts = TimeSeriesClient::new(common::client_for(&server), "IBM").unwrap();
    ts.fetch().await.unwrap();
    assert_eq!(ts.table().unwrap().len(), 6);
    first.assert();
    first.delete();

    let second = common::mock_daily(&server, "IBM", "daily_adjusted_IBM_refreshed");
    ts.fetch().await.unwrap();
    second.assert();

    let table = ts.table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.bars()[0].date, date("2023-07-03"));
}

#[tokio::test]
async fn failed_refetch_keeps_the_previous_table() {
    let server = common::setup_server();

    let mut first = common::mock_daily(&server, "IBM", "daily_adjusted_IBM");
    let mut ts = TimeSeriesClient::new(common::client_for(&server), "IBM").unwrap();
    ts.fetch().await.unwrap();
    first.delete();

    let _second = common::mock_daily_raw(&server, "IBM", 503, "maintenance");
    assert!(ts.fetch().await.is_err());

    // The table from the first fetch is still readable.
    assert_eq!(ts.table().unwrap().len(), 6);
}
