//! Promotion of per-tooth clinical attributes to the owning group.

use std::collections::BTreeMap;

use tracing::debug;

use resto_model::{AttributeField, Group, Position, RestorationAttributes, ToothDetail};

/// Promote attribute fields onto `group` and strip the member copies.
///
/// For each field the configuration form wins; a field the form leaves
/// blank falls back to the group's first member tooth. After promotion the
/// group value is the single source of truth, so the field is cleared from
/// every member record. Fields with no value anywhere keep whatever the
/// group already carried.
pub fn promote(
    group: &mut Group,
    teeth: &mut BTreeMap<Position, ToothDetail>,
    form: &RestorationAttributes,
) {
    let first_member = group.members.first().copied();
    for field in AttributeField::ALL {
        let value = form
            .get(field)
            .or_else(|| {
                first_member
                    .and_then(|p| teeth.get(&p))
                    .and_then(|tooth| tooth.attributes.get(field))
            })
            .map(str::to_string);
        if value.is_some() {
            group.attributes.set(field, value);
        }
        for position in &group.members {
            if let Some(tooth) = teeth.get_mut(position) {
                tooth.attributes.clear(field);
            }
        }
    }
    debug!(group = %group.id, "attributes promoted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use resto_model::{GroupId, GroupType, PrescriptionType, ProductType};
    use std::collections::BTreeSet;

    fn pos(fdi: u8) -> Position {
        Position::new(fdi).unwrap()
    }

    fn group(members: &[u8]) -> Group {
        Group {
            id: GroupId(1),
            group_type: GroupType::Joint,
            product_type: ProductType::CrownBridge,
            material: None,
            members: members.iter().map(|&f| pos(f)).collect(),
            pontics: BTreeSet::new(),
            attributes: RestorationAttributes::default(),
            products: Vec::new(),
        }
    }

    fn tooth_with_shade(fdi: u8, shade: &str) -> ToothDetail {
        let mut tooth = ToothDetail::new(pos(fdi), PrescriptionType::CrownBridge);
        tooth.attributes.shade = Some(shade.to_string());
        tooth
    }

    #[test]
    fn form_value_wins_over_member_value() {
        let mut g = group(&[14, 15]);
        let mut teeth = BTreeMap::new();
        teeth.insert(pos(14), tooth_with_shade(14, "B1"));

        let form = RestorationAttributes {
            shade: Some("A2".to_string()),
            ..RestorationAttributes::default()
        };
        promote(&mut g, &mut teeth, &form);
        assert_eq!(g.attributes.shade.as_deref(), Some("A2"));
        assert!(teeth[&pos(14)].attributes.shade.is_none());
    }

    #[test]
    fn blank_form_falls_back_to_first_member() {
        let mut g = group(&[14, 15]);
        let mut teeth = BTreeMap::new();
        teeth.insert(pos(14), tooth_with_shade(14, "B1"));
        teeth.insert(pos(15), tooth_with_shade(15, "C3"));

        promote(&mut g, &mut teeth, &RestorationAttributes::default());
        assert_eq!(g.attributes.shade.as_deref(), Some("B1"));
        // Member copies are stripped either way.
        assert!(teeth[&pos(14)].attributes.shade.is_none());
        assert!(teeth[&pos(15)].attributes.shade.is_none());
    }

    #[test]
    fn absent_everywhere_keeps_prior_group_value() {
        let mut g = group(&[14, 15]);
        g.attributes.pontic_design = Some("ovate".to_string());
        let mut teeth = BTreeMap::new();
        promote(&mut g, &mut teeth, &RestorationAttributes::default());
        assert_eq!(g.attributes.pontic_design.as_deref(), Some("ovate"));
    }
}
