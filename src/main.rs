use std::sync::Arc;

use order_sms::config::AppConfig;
use order_sms::handler::{AppState, router};
use order_sms::store::PgOrderStore;
use order_twilio::TwilioClient;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let pool = PgPool::connect(&config.database.url).await?;
    info!("connected to orders database");

    let notifier = TwilioClient::new(
        config.twilio.account_sid.clone(),
        config.twilio.auth_token.clone(),
    );
    let state = AppState {
        store: Arc::new(PgOrderStore::new(pool)),
        notifier: Arc::new(notifier),
        from_number: config.twilio.from_number.clone(),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
