//! `gamechat serve`: Start the HTTP API server.

use std::path::Path;

pub async fn run(config_path: Option<&Path>, port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🎮 GameChat Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Dataset:   {}", config.dataset.games_csv.display());
    println!("   Model:     {} ({})", config.model(), config.default_provider);

    gamechat_gateway::start(config).await?;

    Ok(())
}
