mod auth_cmd;
mod category;
mod config_cmd;
mod import_cmd;

pub use auth_cmd::{logout, AuthCommand};
pub use category::CategoryCommand;
pub use config_cmd::ConfigCommand;
pub use import_cmd::ImportCommand;

use clap::ValueEnum;
use std::io::{self, Write};
use std::sync::Arc;

use inventory_admin::auth::SessionAuth;
use inventory_admin::config::Config;
use inventory_admin::confirm::Decision;
use inventory_admin::notify::TerminalNotifier;
use inventory_admin::{AdminConsole, CatalogueStore, HttpCatalogueRemote};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// An error the console has already shown to the operator.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation failed")
    }
}

impl std::error::Error for Reported {}

pub fn open_console(config: &Config) -> Result<AdminConsole, Box<dyn std::error::Error>> {
    let auth = SessionAuth::new(&config.data_dir.value, config.admin.clone());
    let remote = HttpCatalogueRemote::new(config.api_url.value.clone(), config.timeout())?;
    let store = Arc::new(CatalogueStore::new(Arc::new(remote)));
    Ok(AdminConsole::open(&auth, store, Arc::new(TerminalNotifier))?)
}

/// Asks a yes/no question on the terminal. Anything but `y` cancels.
fn confirm(prompt: &str, force: bool) -> io::Result<Decision> {
    if force {
        return Ok(Decision::Confirmed);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        Ok(Decision::Confirmed)
    } else {
        println!("Deletion cancelled.");
        Ok(Decision::Cancelled)
    }
}
