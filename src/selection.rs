use std::collections::BTreeSet;

use crate::error::ValidationError;

/// Item names marked for deletion in the active category.
///
/// Names can only be toggled while edit mode is on; leaving edit mode drops
/// the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    edit_mode: bool,
    items: BTreeSet<String>,
}

impl Selection {
    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    /// Flips edit mode and returns the new state.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        if !self.edit_mode {
            self.items.clear();
        }
        self.edit_mode
    }

    /// Adds or removes `name`, returning whether it is now selected.
    pub fn toggle(&mut self, name: &str) -> Result<bool, ValidationError> {
        if !self.edit_mode {
            return Err(ValidationError::EditModeOff);
        }
        if self.items.remove(name) {
            Ok(false)
        } else {
            self.items.insert(name.to_string());
            Ok(true)
        }
    }

    /// Selects `name`, leaving it selected if it already was.
    pub fn mark(&mut self, name: &str) -> Result<(), ValidationError> {
        if !self.edit_mode {
            return Err(ValidationError::EditModeOff);
        }
        self.items.insert(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    /// Drops selected names that no longer pass `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.items.retain(|name| keep(name));
    }

    /// Leaves edit mode and forgets every selected name.
    pub fn reset(&mut self) {
        self.edit_mode = false;
        self.items.clear();
    }
}
