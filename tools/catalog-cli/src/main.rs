//! Catalog CLI - browse product exports and manage the admin session.
//!
//! Commands:
//! - `catalog view` - Filter, sort and page through products
//! - `catalog categories` - List categories and subcategories
//! - `catalog show` - Show one product
//! - `catalog draft` - Build the form fields for a product create or edit
//! - `catalog customers` - List customer accounts
//! - `catalog session` - Log in, log out, show session status
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CategoriesArgs, ConfigArgs, CustomersArgs, DraftArgs, SessionArgs, ShowArgs, ViewArgs,
};

/// Catalog CLI - browse and filter the admin product catalog
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and page through products
    View(ViewArgs),

    /// List categories and their subcategories
    Categories(CategoriesArgs),

    /// Show a single product
    Show(ShowArgs),

    /// Build the form fields for creating or editing a product
    Draft(DraftArgs),

    /// List customer accounts
    Customers(CustomersArgs),

    /// Manage the admin session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::View(args) => commands::view::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Draft(args) => commands::draft::run(args, &ctx).await,
        Commands::Customers(args) => commands::customers::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
