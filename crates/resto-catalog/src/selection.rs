//! The product selection attached to one group or tooth configuration.

use thiserror::Error;
use tracing::debug;

use resto_model::{CatalogProduct, SelectedProduct};

/// Non-fatal selection refusals, surfaced as notices rather than errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("product {0} is already added")]
    AlreadyAdded(String),
    #[error("no product with id {0} in the selection")]
    NotSelected(String),
}

/// Products chosen for the active configuration. Quantities are clamped to
/// `[1, selected_teeth_count]`.
#[derive(Debug, Clone)]
pub struct ProductSelection {
    teeth_count: u32,
    items: Vec<SelectedProduct>,
}

impl Default for ProductSelection {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ProductSelection {
    pub fn new(teeth_count: u32) -> Self {
        Self {
            teeth_count: teeth_count.max(1),
            items: Vec::new(),
        }
    }

    /// Rebuild a selection from an existing product list, as when an
    /// already committed group is re-opened for editing.
    pub fn from_items(teeth_count: u32, items: Vec<SelectedProduct>) -> Self {
        Self {
            teeth_count: teeth_count.max(1),
            items,
        }
    }

    pub fn items(&self) -> &[SelectedProduct] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<SelectedProduct> {
        self.items
    }

    /// Add a catalog product at the given quantity. Selecting a product
    /// twice is refused with an `AlreadyAdded` notice and leaves the
    /// selection unchanged.
    pub fn add(
        &mut self,
        product: &CatalogProduct,
        quantity: u32,
    ) -> Result<(), SelectionError> {
        if self.items.iter().any(|item| item.product_id == product.id) {
            debug!(product = %product.name, "duplicate selection refused");
            return Err(SelectionError::AlreadyAdded(product.name.clone()));
        }
        self.items
            .push(SelectedProduct::from_catalog(product, self.clamp(quantity)));
        Ok(())
    }

    /// Manual quantity adjustment, clamped to the valid range.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<u32, SelectionError> {
        let clamped = self.clamp(quantity);
        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| SelectionError::NotSelected(product_id.to_string()))?;
        item.quantity = clamped;
        Ok(clamped)
    }

    pub fn remove(&mut self, product_id: &str) -> Result<SelectedProduct, SelectionError> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or_else(|| SelectionError::NotSelected(product_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    fn clamp(&self, quantity: u32) -> u32 {
        quantity.clamp(1, self.teeth_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            name: name.to_string(),
            category: "crown".to_string(),
            material: None,
            description: None,
        }
    }

    #[test]
    fn duplicates_are_refused_without_change() {
        let mut selection = ProductSelection::new(3);
        let crown = product("p-1", "PFM Crown");
        selection.add(&crown, 3).unwrap();
        assert_eq!(
            selection.add(&crown, 1),
            Err(SelectionError::AlreadyAdded("PFM Crown".to_string()))
        );
        assert_eq!(selection.items().len(), 1);
        assert_eq!(selection.items()[0].quantity, 3);
    }

    #[test]
    fn quantities_clamp_to_teeth_count() {
        let mut selection = ProductSelection::new(3);
        selection.add(&product("p-1", "PFM Crown"), 9).unwrap();
        assert_eq!(selection.items()[0].quantity, 3);
        assert_eq!(selection.set_quantity("p-1", 0).unwrap(), 1);
        assert_eq!(selection.set_quantity("p-1", 2).unwrap(), 2);
        assert_eq!(
            selection.set_quantity("p-9", 1),
            Err(SelectionError::NotSelected("p-9".to_string()))
        );
    }
}
