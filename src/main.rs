use std::sync::Arc;

use aangan::{
    app,
    config::Config,
    handlers::cors_middleware::OriginAllowList,
    utils::mailer::{RetryingMailer, SmtpMailer},
    AppState,
};
use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,aangan=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    let smtp = SmtpMailer::new(&config.smtp).context("failed to set up SMTP transport")?;
    let mailer = RetryingMailer::new(smtp, config.retry.clone());

    tracing::info!("Allowed CORS origins: {:?}", config.cors_origins);
    let state = Arc::new(AppState {
        mailer: Arc::new(mailer),
        allowed_origins: OriginAllowList::new(config.cors_origins.clone()),
    });

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!("Aangan server listening on http://localhost:{}", config.port);
    axum::serve(listener, app(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
