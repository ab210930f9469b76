//! Prescription categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rules::ARCH_BASED_PRESCRIPTIONS;

/// Treatment category carried by individual tooth records and catalog
/// queries. The denture/guard categories are priced per arch, the rest per
/// tooth (see [`crate::rules::ARCH_BASED_PRESCRIPTIONS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrescriptionType {
    CrownBridge,
    Implant,
    CompleteDenture,
    PartialDenture,
    NightGuard,
    SportsGuard,
}

impl PrescriptionType {
    /// Returns the canonical name as it appears in catalog requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrescriptionType::CrownBridge => "crown-bridge",
            PrescriptionType::Implant => "implant",
            PrescriptionType::CompleteDenture => "complete-denture",
            PrescriptionType::PartialDenture => "partial-denture",
            PrescriptionType::NightGuard => "night-guard",
            PrescriptionType::SportsGuard => "sports-guard",
        }
    }

    /// True when product quantities for this category count arches rather
    /// than teeth.
    pub fn is_arch_based(&self) -> bool {
        ARCH_BASED_PRESCRIPTIONS.contains(self)
    }
}

impl From<crate::group::ProductType> for PrescriptionType {
    fn from(product_type: crate::group::ProductType) -> Self {
        match product_type {
            crate::group::ProductType::Implant => PrescriptionType::Implant,
            crate::group::ProductType::CrownBridge => PrescriptionType::CrownBridge,
        }
    }
}

impl fmt::Display for PrescriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrescriptionType {
    type Err = String;

    /// Parse a category string (case-insensitive, hyphen/space tolerant).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "-");
        match normalized.as_str() {
            "crown-bridge" | "crownbridge" => Ok(PrescriptionType::CrownBridge),
            "implant" => Ok(PrescriptionType::Implant),
            "complete-denture" => Ok(PrescriptionType::CompleteDenture),
            "partial-denture" => Ok(PrescriptionType::PartialDenture),
            "night-guard" | "nightguard" => Ok(PrescriptionType::NightGuard),
            "sports-guard" | "sportsguard" => Ok(PrescriptionType::SportsGuard),
            _ => Err(format!("Unknown prescription type: {s}")),
        }
    }
}
