pub mod error;
pub mod repository;

pub use error::GroupOpError;
pub use repository::{GroupRepository, RemoveOutcome, SplitOutcome};
