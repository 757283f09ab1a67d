use std::net::SocketAddr;
use mostrador_api::{app, AppState};
use mostrador_catalog::{AuthorizationPolicy, PriceAdjustmentEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mostrador_api=debug,mostrador_catalog=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = mostrador_core::app_config::Config::load()?;
    let policy = AuthorizationPolicy::from_settings(&config.pricing)?;
    tracing::info!(
        reason_threshold = policy.reason_threshold_percent,
        default_ceiling = policy.default_ceiling,
        "Loaded pricing policy"
    );

    let app = app(AppState::new(PriceAdjustmentEngine::new(policy)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
