//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use form4_core::Settings;

use super::open_db;

pub async fn cmd_serve(
    settings: &Settings,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting form4 web server...");
    println!("   Database: {}", settings.db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if settings.db_key.is_none() {
        println!("   ⚠️  Encryption DISABLED (FORM4_DB_KEY not set)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(settings)?;

    let static_dir_str = static_dir
        .map(|p| {
            p.to_str()
                .with_context(|| format!("Static dir is not valid UTF-8: {}", p.display()))
        })
        .transpose()?;

    let config = form4_server::ServerConfig::default();
    form4_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
