mod admin;
mod cart;
mod catalog;
mod opener;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::admin::AdminCommands;
use crate::cart::CartCommands;
use crate::catalog::CatalogCommands;

#[derive(Debug, Parser)]
#[command(name = "vitrina-cli")]
#[command(about = "Vitrina storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the public catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage the consultation cart
    Cart {
        /// Cart session id; a new one is created when omitted
        #[arg(long, global = true, env = "VITRINA_CART_SESSION")]
        session: Option<String>,

        #[command(subcommand)]
        command: CartCommands,
    },
    /// Catalog administration (requires `VITRINA_ADMIN_TOKEN`)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("vitrina-cli ready; see --help for commands");
        return Ok(());
    };

    let config = vitrina_core::load_app_config_from_env()?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "configuration loaded");

    match command {
        Commands::Catalog { command } => catalog::run(&config, command).await,
        Commands::Cart { session, command } => cart::run(&config, session.as_deref(), command).await,
        Commands::Admin { command } => admin::run(&config, command).await,
    }
}
