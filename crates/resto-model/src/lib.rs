pub mod attributes;
pub mod chain;
pub mod error;
pub mod group;
pub mod order;
pub mod position;
pub mod prescription;
pub mod product;
pub mod rules;
pub mod tooth;

pub use attributes::{AttributeField, RestorationAttributes};
pub use chain::ConnectionChain;
pub use error::{ModelError, Result};
pub use group::{Group, GroupId, GroupType, ProductType, ToothRole};
pub use order::{OrderPayload, ProductLine};
pub use position::{Jaw, Position, Quadrant, is_adjacent, is_contiguous_chain, same_jaw};
pub use prescription::PrescriptionType;
pub use product::{CatalogProduct, SelectedProduct};
pub use tooth::ToothDetail;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_revalidates_adjacency() {
        let positions: Vec<Position> = [18, 17, 16]
            .iter()
            .map(|&f| Position::new(f).unwrap())
            .collect();
        let chain = ConnectionChain::new(positions, ProductType::CrownBridge);
        assert_eq!(chain.len(), 3);
        assert!(chain.is_fully_adjacent());

        let broken = ConnectionChain::new(
            vec![Position::new(18).unwrap(), Position::new(16).unwrap()],
            ProductType::CrownBridge,
        );
        assert!(!broken.is_fully_adjacent());
    }

    #[test]
    fn payload_serializes_camel_case() {
        let payload = OrderPayload {
            tooth_groups: vec![],
            selected_teeth: vec![],
            restoration_products: vec![ProductLine {
                product: "Zirconia Crown".to_string(),
                quantity: 2,
            }],
            accessories: vec!["Bite registration".to_string()],
        };
        let json = serde_json::to_string(&payload).expect("serialize payload");
        assert!(json.contains("\"toothGroups\""));
        assert!(json.contains("\"selectedTeeth\""));
        assert!(json.contains("\"restorationProducts\""));
        let round: OrderPayload = serde_json::from_str(&json).expect("deserialize payload");
        assert_eq!(round.restoration_products[0].quantity, 2);
    }
}
