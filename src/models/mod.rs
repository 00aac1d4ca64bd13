mod category;
mod category_name;
mod spreadsheet;

pub use category::{Category, Item, NewCategory};
pub use category_name::CategoryName;
pub use spreadsheet::{ImportStats, SpreadsheetFile, XLSX_MEDIA_TYPE, XLS_MEDIA_TYPE};
