//! Finalized connection chains.

use serde::{Deserialize, Serialize};

use crate::group::ProductType;
use crate::position::{Position, is_contiguous_chain};

/// The ordered output of a committed drag gesture. Transient: it exists
/// only between gesture commit and group creation and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionChain {
    pub positions: Vec<Position>,
    pub product_type: ProductType,
}

impl ConnectionChain {
    pub fn new(positions: Vec<Position>, product_type: ProductType) -> Self {
        Self {
            positions,
            product_type,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Full-adjacency re-check over every consecutive pair.
    pub fn is_fully_adjacent(&self) -> bool {
        is_contiguous_chain(&self.positions)
    }
}
