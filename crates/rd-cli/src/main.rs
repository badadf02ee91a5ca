//! Review Desk — command-line entry point.

mod commands;

use clap::{Parser, Subcommand};
use rd_service::{ReviewDesk, ServiceConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "review-desk", version, about = "Guest review drafts and the multilingual option catalog")]
struct Cli {
    /// Override the data directory (REVIEW_DESK_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a review from a JSON request file ("-" reads stdin).
    Generate { request: PathBuf },
    /// Print the catalog projected to a language.
    Catalog {
        #[arg(long, default_value = "fr")]
        lang: String,
    },
    /// Create a flavor option (translated once, now).
    AddFlavor {
        text: String,
        #[arg(long)]
        category: String,
    },
    /// Create an atmosphere option (translated once, now).
    AddAtmosphere { text: String },
    AddServer { name: String },
    DeleteFlavor { id: i64 },
    DeleteAtmosphere { id: i64 },
    DeleteServer { name: String },
    /// Most recent generated-review records.
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ServiceConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let desk = ReviewDesk::open(&config)?;

    match cli.command {
        Command::Generate { request } => commands::review::generate(&desk, &request).await,
        Command::Catalog { lang } => commands::catalog::show(&desk, &lang),
        Command::AddFlavor { text, category } => {
            commands::admin::add_flavor(&desk, &text, &category).await
        }
        Command::AddAtmosphere { text } => commands::admin::add_atmosphere(&desk, &text).await,
        Command::AddServer { name } => commands::admin::add_server(&desk, &name),
        Command::DeleteFlavor { id } => commands::admin::delete_flavor(&desk, id),
        Command::DeleteAtmosphere { id } => commands::admin::delete_atmosphere(&desk, id),
        Command::DeleteServer { name } => commands::admin::delete_server(&desk, &name),
        Command::History { limit } => commands::catalog::history(&desk, limit),
    }
}
