//! Server command implementation

use anyhow::Result;

use spendwise_core::Config;
use spendwise_server::ServerConfig;

use super::load_pipeline;

pub async fn cmd_serve(config: &Config, host: Option<&str>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or(&config.server.host);
    let port = port.unwrap_or(config.server.port);

    println!("🚀 Starting Spendwise web server...");
    println!("   Models: {}", config.artifacts.dir.display());
    println!("   Listening: http://{}:{}", host, port);

    // Fail fast: never bind with a partially loaded pipeline
    let pipeline = load_pipeline(config)?;

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("SPENDWISE_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (SPENDWISE_ALLOWED_ORIGINS)",
            allowed_origins.join(", ")
        );
    }
    println!();

    let server_config = ServerConfig { allowed_origins };
    spendwise_server::serve_with_config(pipeline, host, port, server_config).await
}
