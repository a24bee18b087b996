//! SupportMe CLI - migrations, content management and secret generation.
//!
//! # Usage
//!
//! ```bash
//! # Run content store migrations (PostgreSQL)
//! sm-cli migrate
//!
//! # Print the current site content
//! sm-cli content show
//!
//! # Replace the site content from a file
//! sm-cli content import content.json
//!
//! # Generate a secret for ADMIN_SECRET_KEY or SITE_SESSION_SECRET
//! sm-cli secret generate --length 48
//! ```
//!
//! Configuration is read from the same environment variables as the site
//! (including a `.env` file).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sm-cli")]
#[command(author, version, about = "SupportMe CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations for the postgres content store
    Migrate,
    /// Inspect or replace the site content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Generate secrets
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Print the current document as JSON
    Show,
    /// Overwrite the document from a JSON file
    Import {
        /// Path to a JSON object
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum SecretAction {
    /// Print a random alphanumeric secret
    Generate {
        /// Number of characters
        #[arg(short, long, default_value_t = 48)]
        length: usize,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Content { action } => match action {
            ContentAction::Show => commands::content::show().await?,
            ContentAction::Import { file } => commands::content::import(&file).await?,
        },
        Commands::Secret { action } => match action {
            SecretAction::Generate { length } => commands::secret::print(length)?,
        },
    }
    Ok(())
}
