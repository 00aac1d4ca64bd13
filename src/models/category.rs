use serde::{Deserialize, Serialize};
use std::fmt;

use super::category_name::CategoryName;
use crate::error::ValidationError;

/// A named stock item with its unit of measurement (e.g. "Milk", "ltr").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub unit: String,
}

impl Item {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }

    /// True when both fields still contain something after trimming.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.unit.trim().is_empty()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit)
    }
}

/// A category as held by the remote authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} items)", self.name, self.items.len())?;
        for item in &self.items {
            writeln!(f, "  - {}", item)?;
        }
        Ok(())
    }
}

/// A validated creation request, ready to be sent to the authority.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub items: Vec<Item>,
}

impl NewCategory {
    /// Checks the category against the fixed enumeration and every row for
    /// blank fields. Values are sent trimmed.
    pub fn validate(name: &str, rows: &[Item]) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::IncompleteDraft);
        }
        let name: CategoryName = name
            .parse()
            .map_err(|_| ValidationError::UnknownCategory(name.trim().to_string()))?;
        if rows.is_empty() || rows.iter().any(|row| !row.is_complete()) {
            return Err(ValidationError::IncompleteDraft);
        }

        let items = rows
            .iter()
            .map(|row| Item::new(row.name.trim(), row.unit.trim()))
            .collect();
        Ok(Self { name, items })
    }
}
