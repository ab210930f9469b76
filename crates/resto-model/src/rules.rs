//! Declarative chart and prescription rule tables.
//!
//! The adjacency exceptions and the arch-priced prescription categories are
//! kept in one place so every consumer reads the same tables.

use crate::prescription::PrescriptionType;

/// FDI pairs that are adjacent across a quadrant boundary. All other
/// cross-quadrant pairs are non-adjacent.
pub const CROSS_MIDLINE_PAIRS: [(u8, u8); 3] = [(11, 21), (31, 41), (32, 42)];

/// Prescription categories whose product quantity unit is an arch
/// (upper/lower) rather than an individual tooth.
pub const ARCH_BASED_PRESCRIPTIONS: [PrescriptionType; 4] = [
    PrescriptionType::CompleteDenture,
    PrescriptionType::PartialDenture,
    PrescriptionType::NightGuard,
    PrescriptionType::SportsGuard,
];
