//! Catalog and selected product records.

use serde::{Deserialize, Serialize};

/// A product as supplied by the external catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub material: Option<String>,
    pub description: Option<String>,
}

/// A product attached to a group or an individual tooth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
}

impl SelectedProduct {
    pub fn from_catalog(product: &CatalogProduct, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
        }
    }
}
