//! Order-wide product totals.

use std::collections::BTreeMap;

use resto_model::{Group, ProductLine, ToothDetail};

/// Cumulative quantity per product name across every group and every
/// configured individual tooth. Repeated names accumulate into one line;
/// output is sorted by name.
pub fn product_totals<'a>(
    groups: impl Iterator<Item = &'a Group>,
    individuals: impl Iterator<Item = &'a ToothDetail>,
) -> Vec<ProductLine> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for group in groups {
        for product in &group.products {
            *counts.entry(product.name.clone()).or_default() += product.quantity;
        }
    }
    for tooth in individuals {
        for product in &tooth.selected_products {
            *counts.entry(product.name.clone()).or_default() += product.quantity;
        }
    }
    counts
        .into_iter()
        .map(|(product, quantity)| ProductLine { product, quantity })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resto_model::{Position, PrescriptionType, SelectedProduct};

    fn tooth_with(fdi: u8, name: &str, quantity: u32) -> ToothDetail {
        let mut tooth = ToothDetail::new(
            Position::new(fdi).unwrap(),
            PrescriptionType::CrownBridge,
        );
        tooth.selected_products.push(SelectedProduct {
            product_id: format!("p-{name}"),
            name: name.to_string(),
            quantity,
        });
        tooth
    }

    #[test]
    fn repeated_names_accumulate() {
        let teeth = [
            tooth_with(14, "Zirconia Crown", 1),
            tooth_with(15, "Zirconia Crown", 1),
        ];
        let totals = product_totals(std::iter::empty(), teeth.iter());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].product, "Zirconia Crown");
        assert_eq!(totals[0].quantity, 2);
    }

    #[test]
    fn groups_and_individuals_combine_sorted() {
        let mut group = resto_model::Group {
            id: resto_model::GroupId(1),
            group_type: resto_model::GroupType::Joint,
            product_type: resto_model::ProductType::CrownBridge,
            material: None,
            members: vec![Position::new(14).unwrap(), Position::new(15).unwrap()],
            pontics: std::collections::BTreeSet::new(),
            attributes: resto_model::RestorationAttributes::default(),
            products: Vec::new(),
        };
        group.products.push(SelectedProduct {
            product_id: "p-1".to_string(),
            name: "PFM Crown".to_string(),
            quantity: 2,
        });
        let teeth = [tooth_with(24, "Zirconia Crown", 1)];
        let totals = product_totals([group].iter(), teeth.iter());
        assert_eq!(
            totals
                .iter()
                .map(|line| (line.product.as_str(), line.quantity))
                .collect::<Vec<_>>(),
            vec![("PFM Crown", 2), ("Zirconia Crown", 1)]
        );
    }
}
