pub mod search;
pub mod selection;
pub mod source;

pub use search::{CatalogFilter, search};
pub use selection::{ProductSelection, SelectionError};
pub use source::{CatalogError, CatalogLoader, CatalogQuery, CatalogSource, LoaderState};
