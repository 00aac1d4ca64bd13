//! Access to the remote catalogue authority.
//!
//! The store only talks to the authority through [`CatalogueRemote`], so the
//! HTTP client can be swapped for an in-memory one in tests.

#[cfg(test)]
pub(crate) mod fake;
mod http;

pub use http::HttpCatalogueRemote;

use async_trait::async_trait;

use crate::error::CatalogueError;
use crate::models::{Category, ImportStats, NewCategory, SpreadsheetFile};

#[async_trait]
pub trait CatalogueRemote: Send + Sync {
    /// GET `/categories`
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueError>;

    /// POST `/categories`
    async fn create_category(&self, request: &NewCategory) -> Result<Category, CatalogueError>;

    /// DELETE `/categories/{name}`
    async fn delete_category(&self, name: &str) -> Result<(), CatalogueError>;

    /// POST `/categories/{name}/delete-items`
    async fn delete_items(&self, category: &str, items: &[String]) -> Result<(), CatalogueError>;

    /// POST `/categories/excel-upload`
    async fn import_spreadsheet(
        &self,
        file: &SpreadsheetFile,
    ) -> Result<ImportStats, CatalogueError>;
}
