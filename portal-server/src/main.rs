use portal_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    let _ = dotenv::dotenv();

    // 2. Logging
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    tracing::info!("Vendor supply portal starting...");

    // 3. Load configuration
    let config = Config::from_env();

    // 4. Initialize server state (opens the store)
    let state = ServerState::initialize(&config)?;

    // 5. Run the HTTP server
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
