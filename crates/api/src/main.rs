use anyhow::Context;

use rollstock_api::app::{self, services::AppServices};
use rollstock_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    rollstock_observability::init(&config.log_level, config.log_format);

    let services = AppServices::in_memory(config.reporting_zone)
        .with_max_window_days(config.max_window_days);
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        reporting_zone = %config.reporting_zone,
        max_window_days = config.max_window_days,
        "listening"
    );

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
