use station_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = setup_environment()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Station server starting...");

    let state = ServerState::initialize(&config).await?;

    if let Err(e) = Server::with_state(config, state).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
