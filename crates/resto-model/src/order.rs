//! The order payload handed to the surrounding order form.
//!
//! This schema is the sole contract between the grouping engine and the
//! rest of the application.

use serde::{Deserialize, Serialize};

use crate::group::Group;
use crate::tooth::ToothDetail;

/// Cumulative product count across all groups and individual teeth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub product: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub tooth_groups: Vec<Group>,
    pub selected_teeth: Vec<ToothDetail>,
    pub restoration_products: Vec<ProductLine>,
    #[serde(default)]
    pub accessories: Vec<String>,
}
