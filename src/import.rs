//! Bulk import of a spreadsheet through the authority's parser.

use std::path::{Path, PathBuf};

use crate::error::{CatalogueError, ValidationError};
use crate::models::{ImportStats, SpreadsheetFile};
use crate::store::CatalogueStore;

/// Column headers, in order, expected by the authority's parser.
pub const TEMPLATE_HEADERS: [&str; 3] = ["Category", "Item Name", "Unit"];

pub const TEMPLATE_FILE_NAME: &str = "inventory_template.csv";

const TEMPLATE_ROWS: [[&str; 3]; 3] = [
    ["Dairy", "Milk", "ltr"],
    ["Dairy", "Cheese", "gm"],
    ["Bakery", "Bread", "pc"],
];

#[derive(Debug, Default)]
pub struct ImportPipeline {
    selected: Option<SpreadsheetFile>,
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SpreadsheetFile> {
        self.selected.as_ref()
    }

    /// Accepts `.xls`/`.xlsx` files only. A rejected file leaves any earlier
    /// choice in place.
    pub fn select_file(
        &mut self,
        file: SpreadsheetFile,
    ) -> Result<&SpreadsheetFile, ValidationError> {
        if !file.is_spreadsheet() {
            return Err(ValidationError::UnsupportedFile(file.name));
        }
        tracing::debug!(file = %file.name, kb = file.size_kb(), "spreadsheet selected");
        Ok(self.selected.insert(file))
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Uploads the selected file and re-syncs the store. The file is kept
    /// after a failure so the upload can be retried.
    pub async fn upload(&mut self, store: &CatalogueStore) -> Result<ImportStats, CatalogueError> {
        let file = self
            .selected
            .as_ref()
            .ok_or(ValidationError::NoFileSelected)?;

        let guard = store.begin()?;
        let stats = store.remote().import_spreadsheet(file).await?;
        tracing::info!(
            categories = stats.categories_processed,
            items = stats.items_processed,
            "spreadsheet imported"
        );
        self.selected = None;

        if let Err(e) = store.refresh_held(&guard).await {
            tracing::warn!("refresh after import failed: {}", e);
        }
        Ok(stats)
    }
}

/// The sample sheet: a header line and three quoted example rows.
pub fn template_csv() -> String {
    let mut lines = vec![TEMPLATE_HEADERS.join(",")];
    lines.extend(TEMPLATE_ROWS.iter().map(|row| {
        row.iter()
            .map(|cell| format!("\"{}\"", cell))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines.join("\n")
}

/// Writes the template into `dir` and returns the file's path.
pub fn download_template(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(TEMPLATE_FILE_NAME);
    std::fs::write(&path, template_csv())?;
    Ok(path)
}
