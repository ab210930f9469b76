//! The external catalog collaborator and its loader state.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use resto_model::{CatalogProduct, PrescriptionType};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
}

/// Optional filters sent with a catalog request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub prescription_type: Option<PrescriptionType>,
    pub subcategory_type: Option<String>,
}

/// Something that can produce catalog pages: the REST client in the real
/// application, a fixture in tests and replays.
pub trait CatalogSource {
    fn fetch(&mut self, query: &CatalogQuery) -> Result<Vec<CatalogProduct>, CatalogError>;
}

/// Load state of the catalog panel. Failures are recoverable: the state
/// keeps the failed query so a manual `retry` can re-issue it. There is no
/// automatic retry and no timeout; grouping state is never blocked on this.
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderState {
    Idle,
    Ready(Vec<CatalogProduct>),
    Failed { query: CatalogQuery, message: String },
}

#[derive(Debug)]
pub struct CatalogLoader {
    state: LoaderState,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self {
            state: LoaderState::Idle,
        }
    }
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoaderState {
        &self.state
    }

    pub fn products(&self) -> &[CatalogProduct] {
        match &self.state {
            LoaderState::Ready(products) => products,
            _ => &[],
        }
    }

    /// Issue a query against the source and record the outcome.
    pub fn load<S: CatalogSource>(&mut self, source: &mut S, query: CatalogQuery) -> &LoaderState {
        match source.fetch(&query) {
            Ok(products) => {
                self.state = LoaderState::Ready(products);
            }
            Err(error) => {
                warn!(%error, "catalog fetch failed");
                self.state = LoaderState::Failed {
                    query,
                    message: error.to_string(),
                };
            }
        }
        &self.state
    }

    /// Manual retry of the last failed query. A no-op in any other state.
    pub fn retry<S: CatalogSource>(&mut self, source: &mut S) -> &LoaderState {
        if let LoaderState::Failed { query, .. } = &self.state {
            let query = query.clone();
            return self.load(source, query);
        }
        &self.state
    }
}
