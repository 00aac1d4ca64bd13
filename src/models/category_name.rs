use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of category names the creation form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryName {
    Dairy,
    Poultry,
    Bakery,
    Grocery,
    Fruits,
    Vegitables,
    Packaging,
    Mezza,
}

impl CategoryName {
    pub const ALL: [CategoryName; 8] = [
        CategoryName::Dairy,
        CategoryName::Poultry,
        CategoryName::Bakery,
        CategoryName::Grocery,
        CategoryName::Fruits,
        CategoryName::Vegitables,
        CategoryName::Packaging,
        CategoryName::Mezza,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryName::Dairy => "Dairy",
            CategoryName::Poultry => "Poultry",
            CategoryName::Bakery => "Bakery",
            CategoryName::Grocery => "Grocery",
            CategoryName::Fruits => "Fruits",
            CategoryName::Vegitables => "Vegitables",
            CategoryName::Packaging => "Packaging",
            CategoryName::Mezza => "Mezza",
        }
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CategoryName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = CategoryName::ALL.iter().map(|n| n.as_str()).collect();
                format!(
                    "Invalid category '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}
