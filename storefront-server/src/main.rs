use storefront_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so Config::from_env sees it
    dotenv::dotenv().ok();

    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!("Storefront server starting...");

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
