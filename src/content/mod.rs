pub mod catalog;
pub mod seed;

pub use catalog::{load_catalog, load_catalog_file, Catalog, CatalogLoadError};
pub use seed::seed_catalog;
