use tracing::info;

use gymdesk::{Config, Database, Result, WebServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.validate()?;

    // Initialize logging
    if let Err(e) = gymdesk::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        gymdesk::logging::init_console_only(&config.logging.level);
    }

    info!("GYMDESK - Gym Management System");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let db = Database::open(&config.database.path).await?;

    let server = WebServer::new(&config, db)?;
    server.run().await
}
