pub mod builtin;
pub mod loader;
pub mod models;
pub mod service;

pub use loader::{load_catalog_file, parse_catalog, parse_catalog_bytes, CatalogError, ColumnMap};
pub use models::{Catalog, CatalogProduct};
pub use service::{CatalogService, CatalogSnapshot};
