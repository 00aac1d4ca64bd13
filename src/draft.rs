use crate::error::CatalogueError;
use crate::models::{Category, Item, NewCategory};
use crate::store::CatalogueStore;

/// Which half of a row an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Name,
    Unit,
}

/// The in-progress "new category" form.
///
/// Rows are addressed by position for the lifetime of the draft. There is
/// always at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEditor {
    category_name: String,
    rows: Vec<Item>,
}

impl Default for DraftEditor {
    fn default() -> Self {
        Self {
            category_name: String::new(),
            rows: vec![Item::default()],
        }
    }
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    pub fn set_category_name(&mut self, name: impl Into<String>) {
        self.category_name = name.into();
    }

    /// Appends an empty row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Item::default());
        self.rows.len() - 1
    }

    /// Removes the row at `index`. The last remaining row is never removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() == 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn update_row(&mut self, index: usize, field: RowField, value: impl Into<String>) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        match field {
            RowField::Name => row.name = value.into(),
            RowField::Unit => row.unit = value.into(),
        }
        true
    }

    /// Back to one empty row and no category.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<NewCategory, CatalogueError> {
        Ok(NewCategory::validate(&self.category_name, &self.rows)?)
    }

    /// Sends the draft to the store. The draft is cleared only when the
    /// category was created; on any error the operator's input stays.
    pub async fn submit(&mut self, store: &CatalogueStore) -> Result<Category, CatalogueError> {
        let request = self.validate()?;
        let created = store.create(request).await?;
        self.reset();
        Ok(created)
    }
}
