//! The recorded session script format.
//!
//! A script bundles an inline catalog with a sequence of engine commands.
//! Teeth are written as raw FDI numbers and validated when the script runs.

use serde::{Deserialize, Serialize};

use resto_model::{AttributeField, CatalogProduct, GroupType, ProductType, ToothRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    #[serde(default)]
    pub catalog: Vec<CatalogProduct>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Step {
    ChooseProductType { product_type: ProductType },
    /// A drag gesture across the listed teeth, in order.
    Drag { teeth: Vec<u8> },
    /// A single tap, toggling one tooth in the selection.
    Tap { tooth: u8 },
    ChooseRestorationType { group_type: GroupType },
    SelectProduct { product_id: String },
    SetQuantity { product_id: String, quantity: u32 },
    SetAttribute { field: AttributeField, value: String },
    AddAccessory { name: String },
    Finalize,
    EditGroup { group: u32 },
    SplitGroup { group: u32, edge: [u8; 2] },
    RemoveMember { group: u32, tooth: u8 },
    ConvertRole { group: u32, tooth: u8, role: ToothRole },
    JoinTooth { tooth: u8, group: u32 },
}
