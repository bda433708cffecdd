use nws_adapter::{get_config_info, setup_logger, Report, WeatherAdapter};
use serde::Serialize;
use slog::{debug, info};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = get_config_info()?;
    let logger = setup_logger(&cli);

    let config = cli.adapter_config();
    info!(logger, "nws-tables starting...");
    debug!(logger, "  Base URL: {}", config.base_url);
    debug!(logger, "  User agent: {}", config.user_agent);
    debug!(logger, "  Timeout: {:?}", config.timeout);

    let adapter = WeatherAdapter::new(logger.clone(), &config)?;

    match cli.report() {
        Report::Point => {
            let (latitude, longitude) = cli.coordinates()?;
            let point = adapter.resolve_point(latitude, longitude).await?;
            write_rows(&[point])?;
        }
        Report::Forecast => {
            let (latitude, longitude) = cli.coordinates()?;
            let rows = adapter
                .get_forecast(latitude, longitude, cli.hourly)
                .await?;
            write_rows(&rows)?;
        }
        Report::Observations => {
            let (latitude, longitude) = cli.coordinates()?;
            let rows = adapter
                .get_observations(latitude, longitude, cli.limit())
                .await?;
            write_rows(&rows)?;
        }
        Report::Alerts => {
            let rows = adapter.get_alerts(&cli.region()).await?;
            write_rows(&rows)?;
        }
    }

    Ok(())
}

/// One JSON object per line on stdout.
fn write_rows<T: Serialize>(rows: &[T]) -> Result<(), anyhow::Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in rows {
        serde_json::to_writer(&mut out, row)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
