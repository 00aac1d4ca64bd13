//! The working copy of the catalogue and every operation that changes it.
//!
//! [`CatalogueStore`] owns the snapshot and the busy flag. Each remote
//! operation takes the flag through a [`BusyGuard`] for its whole duration,
//! so at most one request is in flight and a second caller is refused
//! without touching the network. The guard releases the flag on every exit
//! path, including errors.
//!
//! State is kept behind a plain mutex that is never held across an await:
//! a response is applied in one step once it has fully arrived.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

use crate::confirm::{Confirmed, DeleteCategory, DeleteItems};
use crate::error::{CatalogueError, ValidationError};
use crate::models::{Category, Item, NewCategory};
use crate::remote::CatalogueRemote;
use crate::selection::Selection;

/// Everything the detail view renders: the snapshot, which category is
/// showing, and which of its items are marked.
#[derive(Debug, Clone, Default)]
pub struct CatalogueView {
    categories: Vec<Category>,
    active_tab: Option<String>,
    selection: Selection,
}

impl CatalogueView {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    pub fn active_category(&self) -> Option<&Category> {
        let tab = self.active_tab.as_deref()?;
        self.category(tab)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Finds a category by the name the operator typed. An exact match wins;
    /// otherwise the first name equal ignoring ASCII case.
    pub fn find_category(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.category(name).or_else(|| {
            self.categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
    }

    fn first_name(&self) -> Option<String> {
        self.categories.first().map(|c| c.name.clone())
    }

    /// Points the view at `tab`. Changing category drops the selection.
    fn set_active_tab(&mut self, tab: Option<String>) {
        if self.active_tab != tab {
            self.selection.reset();
            self.active_tab = tab;
        }
    }

    fn replace_snapshot(&mut self, categories: Vec<Category>) {
        self.categories = categories;

        let still_there = self.active_category().is_some();
        if self.active_tab.is_none() || !still_there {
            let first = self.first_name();
            self.set_active_tab(first);
        }

        if let Some(active) = self.active_tab.as_deref() {
            if let Some(category) = self.categories.iter().find(|c| c.name == active) {
                self.selection.retain(|name| category.has_item(name));
            }
        }
    }

    fn remove_category(&mut self, name: &str) {
        self.categories.retain(|c| c.name != name);
        if self.active_tab.as_deref() == Some(name) {
            let first = self.first_name();
            self.set_active_tab(first);
        }
    }
}

fn check_item(view: &CatalogueView, name: &str) -> Result<(), ValidationError> {
    let category = view
        .active_category()
        .ok_or(ValidationError::NoActiveCategory)?;
    if !category.has_item(name) {
        return Err(ValidationError::ItemNotFound {
            category: category.name.clone(),
            item: name.to_string(),
        });
    }
    Ok(())
}

/// Holds the busy flag until dropped.
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CatalogueError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CatalogueError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct CatalogueStore {
    remote: Arc<dyn CatalogueRemote>,
    state: Mutex<CatalogueView>,
    busy: AtomicBool,
}

impl CatalogueStore {
    pub fn new(remote: Arc<dyn CatalogueRemote>) -> Self {
        Self {
            remote,
            state: Mutex::new(CatalogueView::default()),
            busy: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, CatalogueView> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn remote(&self) -> &dyn CatalogueRemote {
        self.remote.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claims the busy flag, refusing if another operation holds it.
    pub fn begin(&self) -> Result<BusyGuard<'_>, CatalogueError> {
        BusyGuard::acquire(&self.busy)
    }

    /// A copy of the current view for rendering.
    pub fn view(&self) -> CatalogueView {
        self.state().clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state().categories.clone()
    }

    pub fn active_tab(&self) -> Option<String> {
        self.state().active_tab.clone()
    }

    pub fn active_category(&self) -> Option<Category> {
        self.state().active_category().cloned()
    }

    pub fn selection(&self) -> Selection {
        self.state().selection.clone()
    }

    /// Switches the detail view to `name`.
    pub fn select_tab(&self, name: &str) -> Result<(), ValidationError> {
        let mut state = self.state();
        if state.category(name).is_none() {
            return Err(ValidationError::CategoryNotFound(name.to_string()));
        }
        state.set_active_tab(Some(name.to_string()));
        Ok(())
    }

    /// Flips edit mode for the active category and returns the new state.
    pub fn toggle_edit_mode(&self) -> bool {
        self.state().selection.toggle_edit_mode()
    }

    /// Marks or unmarks an item of the active category.
    pub fn toggle_item(&self, name: &str) -> Result<bool, ValidationError> {
        let mut state = self.state();
        check_item(&state, name)?;
        state.selection.toggle(name)
    }

    /// Marks every named item of the active category. Names already marked,
    /// or repeated, stay marked. Nothing changes if any name is unknown.
    pub fn mark_items<S: AsRef<str>>(&self, names: &[S]) -> Result<(), ValidationError> {
        let mut state = self.state();
        for name in names {
            check_item(&state, name.as_ref())?;
        }
        if !state.selection.is_editing() {
            return Err(ValidationError::EditModeOff);
        }
        for name in names {
            state.selection.mark(name.as_ref())?;
        }
        Ok(())
    }

    /// The deletion request for the current selection, ready for the
    /// confirmation gate.
    pub fn selected_for_deletion(&self) -> Result<DeleteItems, ValidationError> {
        let state = self.state();
        let category = state
            .active_tab
            .clone()
            .ok_or(ValidationError::NoActiveCategory)?;
        if state.selection.is_empty() {
            return Err(ValidationError::NothingSelected);
        }
        Ok(DeleteItems {
            category,
            items: state.selection.items(),
        })
    }

    /// Fetches the full catalogue and replaces the snapshot.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<(), CatalogueError> {
        let guard = self.begin()?;
        self.refresh_held(&guard).await
    }

    /// Refresh for a caller that already holds the busy flag.
    pub(crate) async fn refresh_held(&self, _guard: &BusyGuard<'_>) -> Result<(), CatalogueError> {
        let categories = self.remote.list_categories().await?;
        tracing::debug!(count = categories.len(), "snapshot replaced");
        self.state().replace_snapshot(categories);
        Ok(())
    }

    /// Validates `name` and `rows`, then creates the category.
    pub async fn create_category(
        &self,
        name: &str,
        rows: &[Item],
    ) -> Result<Category, CatalogueError> {
        let request = NewCategory::validate(name, rows)?;
        self.create(request).await
    }

    #[instrument(skip_all, fields(name = %request.name))]
    pub async fn create(&self, request: NewCategory) -> Result<Category, CatalogueError> {
        let guard = self.begin()?;
        let created = self.remote.create_category(&request).await?;
        tracing::info!(id = %created.id, items = created.items.len(), "category created");

        if let Err(e) = self.refresh_held(&guard).await {
            tracing::warn!("refresh after create failed: {}", e);
        }
        self.state()
            .set_active_tab(Some(request.name.as_str().to_string()));
        Ok(created)
    }

    /// Deletes a confirmed category and drops it from the snapshot.
    #[instrument(skip_all, fields(name = %confirmed.request().name))]
    pub async fn delete_category(
        &self,
        confirmed: Confirmed<DeleteCategory>,
    ) -> Result<(), CatalogueError> {
        let request = confirmed.into_request();
        let _guard = self.begin()?;
        self.remote.delete_category(&request.name).await?;
        tracing::info!("category deleted");

        self.state().remove_category(&request.name);
        Ok(())
    }

    /// Deletes confirmed items, then re-syncs from the authority.
    #[instrument(skip_all, fields(category = %confirmed.request().category))]
    pub async fn delete_items(
        &self,
        confirmed: Confirmed<DeleteItems>,
    ) -> Result<(), CatalogueError> {
        let request = confirmed.into_request();
        if request.items.is_empty() {
            return Err(ValidationError::NothingSelected.into());
        }

        let guard = self.begin()?;
        self.remote
            .delete_items(&request.category, &request.items)
            .await?;
        tracing::info!(count = request.items.len(), "items deleted");

        self.state().selection.reset();
        if let Err(e) = self.refresh_held(&guard).await {
            tracing::warn!("refresh after item deletion failed: {}", e);
        }
        Ok(())
    }
}
