mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use practice_common::config::ClientConfig;
use practice_session::HttpBackend;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "practice-cli")]
#[command(about = "Practice CLI - Browse practices and submit solutions to the judge", long_about = None)]
struct Cli {
    /// Judge service base URL (overrides PRACTICE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Basic-auth user (overrides PRACTICE_USER)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Basic-auth password (overrides PRACTICE_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every practice in the catalog
    List,

    /// Show one practice
    Show {
        /// Practice id
        #[arg(short, long)]
        id: String,

        /// Print an HTML fragment instead of text
        #[arg(long)]
        html: bool,

        /// Include the reference answers
        #[arg(short, long)]
        answers: bool,
    },

    /// Submit a solution and print the verdicts
    Submit {
        /// Practice id
        #[arg(short, long)]
        id: String,

        /// Source file, `-` reads stdin
        #[arg(short, long)]
        file: String,
    },

    /// Interactive practice session
    Session,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(user) = &self.user {
            config.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        config
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // stdout belongs to the practice view
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.client_config();
    tracing::info!(base_url = %config.base_url, "Practice CLI starting");
    let backend = HttpBackend::new(&config)?;

    match cli.command {
        Commands::List => {
            commands::list_practices(&backend).await?;
        }
        Commands::Show { id, html, answers } => {
            commands::show_practice(&backend, &id, html, answers).await?;
        }
        Commands::Submit { id, file } => {
            commands::submit_solution(&backend, &id, &file).await?;
        }
        Commands::Session => {
            commands::interactive(Arc::new(backend)).await?;
        }
    }

    Ok(())
}
