//! Committed treatment groups.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::RestorationAttributes;
use crate::position::{Position, is_contiguous_chain};
use crate::product::SelectedProduct;

/// Sequential identifier assigned by the group repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the member teeth are restored together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    /// A single tooth treated on its own.
    Separate,
    /// Two or more splinted restorations.
    Joint,
    /// Abutment-anchored span with pontic fillers.
    Bridge,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Separate => "separate",
            GroupType::Joint => "joint",
            GroupType::Bridge => "bridge",
        }
    }

    /// Minimum member count for the type.
    pub fn min_members(&self) -> usize {
        match self {
            GroupType::Separate => 1,
            GroupType::Joint | GroupType::Bridge => 2,
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "separate" => Ok(GroupType::Separate),
            "joint" => Ok(GroupType::Joint),
            "bridge" => Ok(GroupType::Bridge),
            _ => Err(format!("Unknown group type: {s}")),
        }
    }
}

/// The product-type context chosen before any teeth are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Implant,
    CrownBridge,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Implant => "implant",
            ProductType::CrownBridge => "crown-bridge",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "-");
        match normalized.as_str() {
            "implant" => Ok(ProductType::Implant),
            "crown-bridge" | "crownbridge" => Ok(ProductType::CrownBridge),
            _ => Err(format!("Unknown product type: {s}")),
        }
    }
}

/// Role of a member tooth inside a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToothRole {
    Abutment,
    Pontic,
}

/// A committed multi-tooth treatment group.
///
/// The member sequence is always one contiguous adjacency chain; the pontic
/// subset is meaningful only for bridge groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub group_type: GroupType,
    pub product_type: ProductType,
    pub material: Option<String>,
    pub members: Vec<Position>,
    #[serde(default)]
    pub pontics: BTreeSet<Position>,
    #[serde(default)]
    pub attributes: RestorationAttributes,
    #[serde(default)]
    pub products: Vec<SelectedProduct>,
}

impl Group {
    pub fn contains(&self, position: Position) -> bool {
        self.members.contains(&position)
    }

    /// The first and last member of the stored chain.
    pub fn ends(&self) -> Option<(Position, Position)> {
        match (self.members.first(), self.members.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    pub fn is_end(&self, position: Position) -> bool {
        self.ends()
            .map(|(first, last)| position == first || position == last)
            .unwrap_or(false)
    }

    pub fn role_of(&self, position: Position) -> Option<ToothRole> {
        if !self.contains(position) {
            return None;
        }
        if self.pontics.contains(&position) {
            Some(ToothRole::Pontic)
        } else {
            Some(ToothRole::Abutment)
        }
    }

    pub fn abutment_count(&self) -> usize {
        self.members
            .iter()
            .filter(|p| !self.pontics.contains(p))
            .count()
    }

    /// Re-checks the contiguity invariant over the stored member order.
    pub fn is_valid_chain(&self) -> bool {
        is_contiguous_chain(&self.members)
    }
}
