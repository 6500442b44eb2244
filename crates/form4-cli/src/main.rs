//! form4 CLI - Insider trading dashboard
//!
//! Usage:
//!   form4 init                                 Create the source tables
//!   form4 dashboard --company Acme --window 30d  Show everything for one view
//!   form4 export --output trades.csv           Export filtered transactions
//!   form4 serve --port 3000                    Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so exports on stdout stay clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let settings = commands::load_settings(cli.db.as_deref(), cli.no_encrypt)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&settings),
        Commands::Status => commands::cmd_status(&commands::open_db(&settings)?),
        Commands::Companies => commands::cmd_companies(&commands::open_db(&settings)?),
        Commands::Transactions { filter } => {
            let db = commands::open_db(&settings)?;
            commands::cmd_transactions(&db, &filter.criteria())
        }
        Commands::Chart { filter } => {
            let db = commands::open_db(&settings)?;
            commands::cmd_chart(&db, &filter.criteria())
        }
        Commands::Summaries { company } => {
            let db = commands::open_db(&settings)?;
            commands::cmd_summaries(&db, &company)
        }
        Commands::Dashboard { filter, json } => {
            let db = commands::open_db(&settings)?;
            commands::cmd_dashboard(&db, &filter.criteria(), json)
        }
        Commands::Export {
            filter,
            format,
            output,
        } => {
            let db = commands::open_db(&settings)?;
            commands::cmd_export(&db, &filter.criteria(), format, output.as_deref())
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&settings, &host, port, static_dir.as_deref()).await,
    }
}
