use stock_dashboard::config::Config;
use stock_dashboard::models::TimeRange;
use stock_dashboard::services::api::{HttpStockSource, StockSource};
use stock_dashboard::services::series::prepare_series;
use log::{info, error};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let source = HttpStockSource::new(&config.base_url, config.http_timeout)?;
    info!("Testing stocks API at {}...", source.base_url());

    let stats = match source.fetch_stats().await {
        Ok(stats) => {
            info!("SUCCESS: {} symbols in stats snapshot", stats.len());
            stats
        }
        Err(e) => {
            error!("ERROR: Failed to fetch stock stats: {}", e);
            return Err(e.into());
        }
    };

    let profiles = source.fetch_profiles().await?;
    let series = source.fetch_series().await?;

    for entry in stats.entries() {
        let summary = profiles.summary(&entry.symbol);
        info!(
            "{}: book value {:.2}, profit {:.2}%, summary {}",
            entry.symbol,
            entry.stat.book_value,
            entry.stat.profit,
            if summary.is_some() { "present" } else { "missing" }
        );

        for range in TimeRange::ALL {
            match prepare_series(&series, range, &entry.symbol, config.tz) {
                Ok(chart) => info!("  {}: {} points", range, chart.len()),
                Err(e) => error!("  {}: {}", range, e),
            }
        }
    }

    Ok(())
}
