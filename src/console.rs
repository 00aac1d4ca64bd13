//! The admin console: store, draft, confirmation gates and import pipeline
//! wired together, with every outcome shown through the notifier.
//!
//! Errors are reported here and then handed back to the caller unchanged.
//! Nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::auth::AuthGate;
use crate::confirm::{
    ConfirmationGate, ConfirmationRequest, ConfirmationToken, Decision, DeleteCategory,
    DeleteItems, Resolution,
};
use crate::draft::DraftEditor;
use crate::error::{CatalogueError, ValidationError};
use crate::import::{self, ImportPipeline};
use crate::models::{Category, ImportStats, SpreadsheetFile};
use crate::notify::{Notifier, Severity};
use crate::store::CatalogueStore;

/// A pending confirmation: the token to resolve and the question to ask.
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub token: ConfirmationToken,
    pub prompt: String,
}

pub struct AdminConsole {
    store: Arc<CatalogueStore>,
    notifier: Arc<dyn Notifier>,
    draft: DraftEditor,
    import: ImportPipeline,
    category_gate: ConfirmationGate<DeleteCategory>,
    items_gate: ConfirmationGate<DeleteItems>,
}

impl AdminConsole {
    /// Opens the console, refusing unless the gate reports an authorized
    /// operator.
    pub fn open(
        auth: &dyn AuthGate,
        store: Arc<CatalogueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CatalogueError> {
        if !auth.is_authorized() {
            return Err(CatalogueError::Unauthorized);
        }
        Ok(Self {
            store,
            notifier,
            draft: DraftEditor::new(),
            import: ImportPipeline::new(),
            category_gate: ConfirmationGate::new(),
            items_gate: ConfirmationGate::new(),
        })
    }

    pub fn store(&self) -> &CatalogueStore {
        &self.store
    }

    pub fn draft(&self) -> &DraftEditor {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftEditor {
        &mut self.draft
    }

    pub fn import(&self) -> &ImportPipeline {
        &self.import
    }

    fn report<T, E: std::fmt::Display>(
        &self,
        result: Result<T, E>,
        success: impl FnOnce(&T) -> Option<String>,
    ) -> Result<T, E> {
        match &result {
            Ok(value) => {
                if let Some(message) = success(value) {
                    self.notifier.notify(Severity::Success, &message);
                }
            }
            Err(e) => self.notifier.notify(Severity::Error, &e.to_string()),
        }
        result
    }

    pub async fn load(&self) -> Result<(), CatalogueError> {
        let result = self.store.refresh().await;
        self.report(result, |_| None)
    }

    pub fn select_tab(&self, name: &str) -> Result<(), ValidationError> {
        let result = self.store.select_tab(name);
        self.report(result, |_| None)
    }

    pub fn toggle_edit_mode(&self) -> bool {
        self.store.toggle_edit_mode()
    }

    pub fn toggle_item(&self, name: &str) -> Result<bool, ValidationError> {
        let result = self.store.toggle_item(name);
        self.report(result, |_| None)
    }

    pub fn mark_items(&self, names: &[String]) -> Result<(), ValidationError> {
        let result = self.store.mark_items(names);
        self.report(result, |_| None)
    }

    /// The stored name of the category `name` refers to, if any.
    pub fn resolve_category(&self, name: &str) -> Option<String> {
        self.store.view().find_category(name).map(|c| c.name.clone())
    }

    pub async fn submit_draft(&mut self) -> Result<Category, CatalogueError> {
        let result = self.draft.submit(&self.store).await;
        self.report(result, |_| Some("Category saved!".to_string()))
    }

    /// Asks for confirmation before deleting `name`.
    pub fn request_delete_category(
        &mut self,
        name: &str,
    ) -> Result<PendingConfirmation, ValidationError> {
        if self.store.view().category(name).is_none() {
            let err = ValidationError::CategoryNotFound(name.to_string());
            self.notifier.notify(Severity::Error, &err.to_string());
            return Err(err);
        }
        let request = DeleteCategory {
            name: name.to_string(),
        };
        let prompt = request.prompt();
        let token = self.category_gate.request(request);
        Ok(PendingConfirmation { token, prompt })
    }

    /// Runs the deletion when confirmed. Returns whether anything was deleted.
    pub async fn resolve_delete_category(
        &mut self,
        token: ConfirmationToken,
        decision: Decision,
    ) -> Result<bool, CatalogueError> {
        let confirmed = match self.category_gate.resolve(token, decision) {
            Resolution::Confirmed(confirmed) => confirmed,
            Resolution::Cancelled => return Ok(false),
            Resolution::Stale => {
                tracing::debug!("ignoring stale delete-category confirmation");
                return Ok(false);
            }
        };
        let result = self.store.delete_category(confirmed).await;
        self.report(result.map(|()| true), |_| {
            Some("Category deleted".to_string())
        })
    }

    /// Asks for confirmation before deleting the selected items.
    pub fn request_delete_items(&mut self) -> Result<PendingConfirmation, ValidationError> {
        let request = self.store.selected_for_deletion();
        let request = self.report(request, |_| None)?;
        let prompt = request.prompt();
        let token = self.items_gate.request(request);
        Ok(PendingConfirmation { token, prompt })
    }

    pub async fn resolve_delete_items(
        &mut self,
        token: ConfirmationToken,
        decision: Decision,
    ) -> Result<bool, CatalogueError> {
        let confirmed = match self.items_gate.resolve(token, decision) {
            Resolution::Confirmed(confirmed) => confirmed,
            Resolution::Cancelled => return Ok(false),
            Resolution::Stale => {
                tracing::debug!("ignoring stale delete-items confirmation");
                return Ok(false);
            }
        };
        let result = self.store.delete_items(confirmed).await;
        self.report(result.map(|()| true), |_| {
            Some("Item(s) deleted".to_string())
        })
    }

    pub fn select_file(&mut self, file: SpreadsheetFile) -> Result<(), ValidationError> {
        let result = self.import.select_file(file).map(|file| file.name.clone());
        let name = self.report(result, |_| None)?;
        self.notifier
            .notify(Severity::Info, &format!("File selected: {}", name));
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.import.clear();
    }

    pub async fn upload(&mut self) -> Result<ImportStats, CatalogueError> {
        let result = self.import.upload(&self.store).await;
        self.report(result, |stats| Some(format!("Success! {}", stats)))
    }

    pub fn download_template(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let result = import::download_template(dir);
        self.report(result, |path| {
            Some(format!(
                "Template downloaded to {}. You can open it in Excel and fill in your data.",
                path.display()
            ))
        })
    }
}
