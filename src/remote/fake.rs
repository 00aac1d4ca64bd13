//! In-memory authority used by the unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::CatalogueRemote;
use crate::error::{CatalogueError, Operation};
use crate::models::{Category, ImportStats, Item, NewCategory, SpreadsheetFile};

/// Lets a test hold a request open until it decides to release it.
#[derive(Default)]
pub struct Hold {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct FakeRemote {
    categories: Mutex<Vec<Category>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
    fail_next: Mutex<Option<CatalogueError>>,
    hold: Mutex<Option<Arc<Hold>>>,
    import_adds: Mutex<Vec<Category>>,
    uploads: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let remote = Self::new();
        *remote.categories.lock().unwrap() = categories;
        remote
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn fail_next(&self, err: CatalogueError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Every later request waits on the returned hold.
    pub fn hold_requests(&self) -> Arc<Hold> {
        let hold = Arc::new(Hold::default());
        *self.hold.lock().unwrap() = Some(hold.clone());
        hold
    }

    /// Lets the held request finish and stops holding new ones.
    pub fn release(&self, hold: &Hold) {
        *self.hold.lock().unwrap() = None;
        hold.release.notify_one();
    }

    pub fn on_import_add(&self, categories: Vec<Category>) {
        *self.import_adds.lock().unwrap() = categories;
    }

    async fn enter(&self) -> Result<(), CatalogueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hold = self.hold.lock().unwrap().clone();
        if let Some(hold) = hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn category(id: &str, name: &str, items: &[(&str, &str)]) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        items: items
            .iter()
            .map(|(name, unit)| Item::new(*name, *unit))
            .collect(),
    }
}

fn not_found(op: Operation, name: &str) -> CatalogueError {
    CatalogueError::Server {
        op,
        status: 404,
        message: Some(format!("Category {} not found", name)),
    }
}

#[async_trait]
impl CatalogueRemote for FakeRemote {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueError> {
        self.enter().await?;
        Ok(self.categories())
    }

    async fn create_category(&self, request: &NewCategory) -> Result<Category, CatalogueError> {
        self.enter().await?;
        let mut categories = self.categories.lock().unwrap();
        if categories.iter().any(|c| c.name == request.name.as_str()) {
            return Err(CatalogueError::Server {
                op: Operation::CreateCategory,
                status: 400,
                message: Some("Category already exists".to_string()),
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Category {
            id: format!("fake-{}", id),
            name: request.name.to_string(),
            items: request.items.clone(),
        };
        categories.push(created.clone());
        Ok(created)
    }

    async fn delete_category(&self, name: &str) -> Result<(), CatalogueError> {
        self.enter().await?;
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.name != name);
        if categories.len() == before {
            return Err(not_found(Operation::DeleteCategory, name));
        }
        Ok(())
    }

    async fn delete_items(&self, category: &str, items: &[String]) -> Result<(), CatalogueError> {
        self.enter().await?;
        let mut categories = self.categories.lock().unwrap();
        let found = categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| not_found(Operation::DeleteItems, category))?;
        found.items.retain(|item| !items.contains(&item.name));
        Ok(())
    }

    async fn import_spreadsheet(
        &self,
        file: &SpreadsheetFile,
    ) -> Result<ImportStats, CatalogueError> {
        self.enter().await?;
        self.uploads.lock().unwrap().push(file.name.clone());
        let added = self.import_adds.lock().unwrap().clone();
        let stats = ImportStats {
            categories_processed: added.len() as u64,
            items_processed: added.iter().map(|c| c.items.len() as u64).sum(),
        };
        self.categories.lock().unwrap().extend(added);
        Ok(stats)
    }
}
