use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vartha::{
    app_state::AppState,
    config::{Config, LogFormat},
    health::check_analyzer_health,
    router::build_router,
    scoring::StyleAnalyzer,
};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format());

    let analyzer = StyleAnalyzer::new(Default::default(), config.preprocess_cache_capacity());
    info!(
        rules = analyzer.bank().len(),
        rejected = analyzer.bank().rejected(),
        "Pattern bank loaded"
    );

    // Warm-up run doubles as a startup self-check
    let health = check_analyzer_health(&analyzer);
    if !health.is_healthy() {
        anyhow::bail!("analyzer failed its startup check: {:?}", health.missing_keys);
    }

    let app = build_router(AppState::new(analyzer), &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}
