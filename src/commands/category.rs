use clap::{Args, Subcommand};

use super::{confirm, OutputFormat, Reported};
use inventory_admin::draft::RowField;
use inventory_admin::models::Item;
use inventory_admin::AdminConsole;

#[derive(Args)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand)]
pub enum CategorySubcommand {
    /// List all categories with their items
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one category
    Show {
        /// Category name
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a category with its items
    Create {
        /// Category name (Dairy, Poultry, Bakery, Grocery, Fruits, Vegitables, Packaging, Mezza)
        name: String,

        /// Item as NAME=UNIT (can be repeated)
        #[arg(long = "item", value_name = "NAME=UNIT", value_parser = parse_item)]
        items: Vec<Item>,
    },

    /// Delete a category and all its items
    Delete {
        /// Category name
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Delete items from a category
    DeleteItems {
        /// Category name
        category: String,

        /// Item names to delete
        #[arg(required = true)]
        items: Vec<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

fn parse_item(s: &str) -> Result<Item, String> {
    match s.split_once('=') {
        Some((name, unit)) => Ok(Item::new(name, unit)),
        None => Err(format!("expected NAME=UNIT, got '{}'", s)),
    }
}

/// The stored name for what the operator typed. Unknown names are passed
/// through so the lookup reports them as missing.
fn lookup(console: &AdminConsole, name: &str) -> String {
    console
        .resolve_category(name)
        .unwrap_or_else(|| name.trim().to_string())
}

impl CategoryCommand {
    pub async fn run(&self, console: &mut AdminConsole) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CategorySubcommand::List { format } => {
                console.load().await.map_err(|_| Reported)?;
                let categories = console.store().categories();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&categories)?);
                    }
                    OutputFormat::Text => {
                        if categories.is_empty() {
                            println!("No categories found.");
                        } else {
                            for category in &categories {
                                print!("{}", category);
                            }
                        }
                    }
                }
                Ok(())
            }

            CategorySubcommand::Show { name, format } => {
                console.load().await.map_err(|_| Reported)?;
                let name = lookup(console, name);
                let view = console.store().view();

                match view.category(&name) {
                    Some(category) => {
                        match format {
                            OutputFormat::Json => {
                                println!("{}", serde_json::to_string_pretty(category)?);
                            }
                            OutputFormat::Text => {
                                print!("{}", category);
                            }
                        }
                        Ok(())
                    }
                    None => Err(format!("Category not found: {}", name).into()),
                }
            }

            CategorySubcommand::Create { name, items } => {
                let draft = console.draft_mut();
                draft.set_category_name(name.as_str());
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        draft.add_row();
                    }
                    draft.update_row(i, RowField::Name, item.name.as_str());
                    draft.update_row(i, RowField::Unit, item.unit.as_str());
                }

                let created = console.submit_draft().await.map_err(|_| Reported)?;
                print!("{}", created);
                Ok(())
            }

            CategorySubcommand::Delete { name, force } => {
                console.load().await.map_err(|_| Reported)?;
                let name = lookup(console, name);
                let pending = console
                    .request_delete_category(&name)
                    .map_err(|_| Reported)?;
                let decision = confirm(&pending.prompt, *force)?;
                console
                    .resolve_delete_category(pending.token, decision)
                    .await
                    .map_err(|_| Reported)?;
                Ok(())
            }

            CategorySubcommand::DeleteItems {
                category,
                items,
                force,
            } => {
                console.load().await.map_err(|_| Reported)?;
                let category = lookup(console, category);
                console.select_tab(&category).map_err(|_| Reported)?;
                console.toggle_edit_mode();
                console.mark_items(items).map_err(|_| Reported)?;

                let pending = console.request_delete_items().map_err(|_| Reported)?;
                let decision = confirm(&pending.prompt, *force)?;
                console
                    .resolve_delete_items(pending.token, decision)
                    .await
                    .map_err(|_| Reported)?;
                Ok(())
            }
        }
    }
}
