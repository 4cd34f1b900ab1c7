//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::build_planner;

pub async fn cmd_serve(file: &Path, user: &str, buffer: f64, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting Steady web server...");
    println!("   Snapshot: {}", file.display());
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    // Allowed CORS origins, comma-separated
    let allowed_origins: Vec<String> = std::env::var("STEADY_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let planner = build_planner(file, user, buffer)?;
    let config = steady_server::ServerConfig { allowed_origins };

    steady_server::serve(planner, host, port, config).await?;

    Ok(())
}
