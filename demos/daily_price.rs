use alphavantage_rs::{AvClient, TimeSeriesClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("ALPHAVANTAGE_API_KEY")?;
    let client = AvClient::builder().api_key(api_key).build()?;

    let mut ibm = TimeSeriesClient::new(client, "IBM")?;
    ibm.fetch().await?;

    println!("--- Last 5 closing prices for {} ---", ibm.ticker());
    for (date, close) in ibm.daily_price()?.iter().rev().take(5) {
        println!("  {date}  ${close:.2}");
    }

    println!("\n--- Yearly dividends for {} ---", ibm.ticker());
    for (year, total) in ibm.yearly_dividends()? {
        println!("  {year}  ${total:.4} per share");
    }

    println!("\n--- Dividends per quarter ---");
    for ((year, quarter), total) in ibm.yearly_dividends_per_quarter()? {
        println!("  {year} Q{quarter}  ${total:.4} per share");
    }

    Ok(())
}
