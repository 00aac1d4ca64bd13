use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{AuthCommand, CategoryCommand, ConfigCommand, ImportCommand, Reported};
use inventory_admin::config::Config;

#[derive(Parser)]
#[command(name = "invadmin")]
#[command(version)]
#[command(about = "Manage inventory categories and items", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories and their items
    Category(CategoryCommand),

    /// Bulk import from a spreadsheet
    Import(ImportCommand),

    /// Start an admin session
    Login(AuthCommand),

    /// End the admin session
    Logout,

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // console errors have already been shown through the notifier
        if e.downcast_ref::<Reported>().is_none() {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "inventory_admin=info"
    } else {
        "inventory_admin=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Category(cmd)) => {
            let mut console = commands::open_console(&config)?;
            cmd.run(&mut console).await?;
        }
        Some(Commands::Import(cmd)) => {
            let mut console = commands::open_console(&config)?;
            cmd.run(&mut console).await?;
        }
        Some(Commands::Login(cmd)) => {
            cmd.login(&config)?;
        }
        Some(Commands::Logout) => {
            commands::logout(&config)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
