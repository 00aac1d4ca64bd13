//! Error types shared by every catalogue operation.

use std::fmt;
use thiserror::Error;

/// The remote operation an error came from.
///
/// Each operation carries the generic message shown when the authority does
/// not supply one of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchCategories,
    CreateCategory,
    DeleteCategory,
    DeleteItems,
    ImportSpreadsheet,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchCategories => "Failed to fetch categories",
            Operation::CreateCategory => "Failed to save category",
            Operation::DeleteCategory => "Failed to delete category",
            Operation::DeleteItems => "Failed to delete items",
            Operation::ImportSpreadsheet => "Failed to upload file",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::FetchCategories => write!(f, "fetch categories"),
            Operation::CreateCategory => write!(f, "create category"),
            Operation::DeleteCategory => write!(f, "delete category"),
            Operation::DeleteItems => write!(f, "delete items"),
            Operation::ImportSpreadsheet => write!(f, "import spreadsheet"),
        }
    }
}

/// Problems caught locally, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Category name and all item fields are required")]
    IncompleteDraft,
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Category '{0}' is not in the catalogue")]
    CategoryNotFound(String),
    #[error("No category selected")]
    NoActiveCategory,
    #[error("Item '{item}' is not in category '{category}'")]
    ItemNotFound { category: String, item: String },
    #[error("Turn on edit mode before selecting items")]
    EditModeOff,
    #[error("Select at least one item to delete")]
    NothingSelected,
    #[error("Please upload a valid Excel file (.xls or .xlsx)")]
    UnsupportedFile(String),
    #[error("Please select a file first")]
    NoFileSelected,
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never produced a usable response.
    #[error("{}", network_message(.op))]
    Network { op: Operation, detail: String },

    /// The authority answered with a non-success status.
    #[error("{}", server_message(.op, .message))]
    Server {
        op: Operation,
        status: u16,
        message: Option<String>,
    },

    /// The HTTP client could not be set up; no request was made.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Another operation is still in progress")]
    Busy,

    #[error("Not logged in. Run `invadmin login` first.")]
    Unauthorized,
}

impl CatalogueError {
    pub fn network(op: Operation, detail: impl ToString) -> Self {
        CatalogueError::Network {
            op,
            detail: detail.to_string(),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, CatalogueError::Busy)
    }
}

fn network_message(op: &Operation) -> String {
    match op {
        Operation::ImportSpreadsheet => format!("Network error: {}", op.failure_message()),
        _ => op.failure_message().to_string(),
    }
}

fn server_message<'a>(op: &Operation, message: &'a Option<String>) -> &'a str {
    message.as_deref().unwrap_or(op.failure_message())
}
