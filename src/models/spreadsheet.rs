use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A file chosen for bulk import, held in memory so a failed upload can be
/// retried without choosing it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetFile {
    pub name: String,
    pub media_type: Option<String>,
    pub contents: Vec<u8>,
}

impl SpreadsheetFile {
    pub fn new(name: impl Into<String>, media_type: Option<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            contents,
        }
    }

    /// Reads a file from disk, inferring the media type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = media_type_for(&name).map(str::to_string);
        Ok(Self::new(name, media_type, contents))
    }

    /// Whether the declared media type or the name marks this as `.xls`/`.xlsx`.
    pub fn is_spreadsheet(&self) -> bool {
        let declared = matches!(
            self.media_type.as_deref(),
            Some(XLS_MEDIA_TYPE) | Some(XLSX_MEDIA_TYPE)
        );
        declared || media_type_for(&self.name).is_some()
    }

    pub fn size_kb(&self) -> f64 {
        self.contents.len() as f64 / 1024.0
    }
}

fn media_type_for(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".xlsx") {
        Some(XLSX_MEDIA_TYPE)
    } else if lower.ends_with(".xls") {
        Some(XLS_MEDIA_TYPE)
    } else {
        None
    }
}

/// Counts reported by the authority after a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportStats {
    pub categories_processed: u64,
    pub items_processed: u64,
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} categories, {} items added",
            self.categories_processed, self.items_processed
        )
    }
}
