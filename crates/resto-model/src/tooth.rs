//! Individual (ungrouped) tooth records.

use serde::{Deserialize, Serialize};

use crate::attributes::RestorationAttributes;
use crate::position::Position;
use crate::prescription::PrescriptionType;
use crate::product::SelectedProduct;

/// An ungrouped tooth with its own product selection and clinical
/// attributes. Attribute copies are stripped when the tooth joins a group
/// and the fields are promoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToothDetail {
    pub position: Position,
    #[serde(default)]
    pub selected_products: Vec<SelectedProduct>,
    #[serde(default)]
    pub attributes: RestorationAttributes,
    pub prescription: PrescriptionType,
    /// Survives group dissolution so a former bridge filler keeps its role.
    #[serde(default)]
    pub pontic: bool,
}

impl ToothDetail {
    pub fn new(position: Position, prescription: PrescriptionType) -> Self {
        Self {
            position,
            selected_products: Vec::new(),
            attributes: RestorationAttributes::default(),
            prescription,
            pontic: false,
        }
    }
}
