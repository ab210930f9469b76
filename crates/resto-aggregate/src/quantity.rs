//! Quantity assigned when a product is attached to a tooth selection.

use std::collections::BTreeSet;

use resto_model::{Jaw, Position, PrescriptionType};

/// The quantity a newly attached product receives.
///
/// Arch-priced categories count arches: 2 when the selection spans both
/// jaws, otherwise 1. Every other category counts distinct teeth, with a
/// minimum of 1.
pub fn assigned_quantity(prescription: PrescriptionType, selection: &[Position]) -> u32 {
    if prescription.is_arch_based() {
        let upper = selection.iter().any(|p| p.jaw() == Jaw::Upper);
        let lower = selection.iter().any(|p| p.jaw() == Jaw::Lower);
        return if upper && lower { 2 } else { 1 };
    }
    let distinct: BTreeSet<Position> = selection.iter().copied().collect();
    (distinct.len() as u32).max(1)
}
