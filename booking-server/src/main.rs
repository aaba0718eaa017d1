use booking_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Booking server starting..."
    );

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
