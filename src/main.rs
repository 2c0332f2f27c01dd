use customers::{AppState, Config, CustomerStore, Server, routes};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<(), customers::Error> {
    // RUST_LOG overrides the default, e.g. RUST_LOG=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customers=debug")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(address = %config.server_address(), "starting customers service");

    let store = CustomerStore::connect(&config.database_url, config.database_max_connections).await?;
    store.migrate().await?;

    Server::bind(&config.server_address())?
        .serve(routes::router(AppState::new(store)))
        .await
}
