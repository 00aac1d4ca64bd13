use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::Reported;
use inventory_admin::models::SpreadsheetFile;
use inventory_admin::AdminConsole;

#[derive(Args)]
pub struct ImportCommand {
    #[command(subcommand)]
    pub command: ImportSubcommand,
}

#[derive(Subcommand)]
pub enum ImportSubcommand {
    /// Upload an .xls/.xlsx file with columns Category, Item Name, Unit
    Upload {
        /// Spreadsheet to upload
        file: PathBuf,
    },

    /// Write a sample sheet to start from
    Template {
        /// Directory to write the template into
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },
}

impl ImportCommand {
    pub async fn run(&self, console: &mut AdminConsole) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ImportSubcommand::Upload { file } => {
                let file = SpreadsheetFile::from_path(file)
                    .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
                console.select_file(file).map_err(|_| Reported)?;
                console.upload().await.map_err(|_| Reported)?;
                Ok(())
            }

            ImportSubcommand::Template { output } => {
                console.download_template(output).map_err(|_| Reported)?;
                Ok(())
            }
        }
    }
}
