pub mod catalog;
pub mod format;
pub mod locale;
mod tables;

pub use catalog::{Catalog, CatalogError, Category};
pub use format::{format_size, progress_bar};
pub use locale::Locale;
