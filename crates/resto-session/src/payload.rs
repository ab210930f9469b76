//! Assembling the order payload for the surrounding order form.

use resto_aggregate::product_totals;
use resto_group::GroupRepository;
use resto_model::OrderPayload;

/// Snapshot the repository into the payload schema consumed by the order
/// form: all committed groups, all ungrouped teeth, order-wide product
/// totals, and the accessory list.
pub fn build_payload(repository: &GroupRepository, accessories: &[String]) -> OrderPayload {
    let restoration_products =
        product_totals(repository.groups(), repository.individuals());
    OrderPayload {
        tooth_groups: repository.groups().cloned().collect(),
        selected_teeth: repository.individuals().cloned().collect(),
        restoration_products,
        accessories: accessories.to_vec(),
    }
}
