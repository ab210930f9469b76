//! End-to-end flows through the configuration workflow.

use resto_chart::{ChartLayout, ChartPoint};
use resto_model::{
    AttributeField, CatalogProduct, GroupType, Position, ProductType,
};
use resto_session::{ConfigSession, SessionError, SessionState};

fn pos(fdi: u8) -> Position {
    Position::new(fdi).unwrap()
}

fn point_of(layout: &ChartLayout, fdi: u8) -> ChartPoint {
    layout.point_of(pos(fdi)).unwrap()
}

fn catalog_product(id: &str, name: &str, material: &str) -> CatalogProduct {
    CatalogProduct {
        id: id.to_string(),
        name: name.to_string(),
        category: "crown".to_string(),
        material: Some(material.to_string()),
        description: None,
    }
}

fn drag(session: &mut ConfigSession, layout: &ChartLayout, fdis: &[u8]) {
    session.pointer_down(point_of(layout, fdis[0]));
    for &fdi in &fdis[1..] {
        session.pointer_move(point_of(layout, fdi));
    }
    session.pointer_up(point_of(layout, *fdis.last().unwrap()));
}

#[test]
fn joint_crown_bridge_end_to_end() {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());

    session.choose_product_type(ProductType::CrownBridge).unwrap();
    drag(&mut session, &layout, &[14, 15, 16]);
    assert_eq!(session.selected_teeth(), &[pos(14), pos(15), pos(16)]);

    session.choose_restoration_type(GroupType::Joint).unwrap();
    session
        .select_product(&catalog_product("p-1", "PFM Crown", "metal-ceramic"))
        .unwrap();
    session.set_attribute(AttributeField::Shade, "A2").unwrap();

    let payload = session.finalize().unwrap();
    assert_eq!(session.state(), SessionState::Idle);

    assert_eq!(payload.tooth_groups.len(), 1);
    let group = &payload.tooth_groups[0];
    assert_eq!(group.group_type, GroupType::Joint);
    assert_eq!(group.members, vec![pos(14), pos(15), pos(16)]);
    assert_eq!(group.products.len(), 1);
    assert_eq!(group.products[0].name, "PFM Crown");
    assert_eq!(group.products[0].quantity, 3);
    assert_eq!(group.attributes.shade.as_deref(), Some("A2"));
    assert_eq!(group.material.as_deref(), Some("metal-ceramic"));

    assert!(payload.selected_teeth.is_empty());
    assert_eq!(payload.restoration_products.len(), 1);
    assert_eq!(payload.restoration_products[0].product, "PFM Crown");
    assert_eq!(payload.restoration_products[0].quantity, 3);
}

#[test]
fn separate_teeth_become_individual_records() {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());

    session.choose_product_type(ProductType::CrownBridge).unwrap();
    session.tap_tooth(point_of(&layout, 14));
    session.tap_tooth(point_of(&layout, 24));
    session.choose_restoration_type(GroupType::Separate).unwrap();
    session
        .select_product(&catalog_product("p-2", "Zirconia Crown", "zirconia"))
        .unwrap();

    let payload = session.finalize().unwrap();
    assert!(payload.tooth_groups.is_empty());
    assert_eq!(payload.selected_teeth.len(), 2);
    for tooth in &payload.selected_teeth {
        assert_eq!(tooth.selected_products.len(), 1);
        assert_eq!(tooth.selected_products[0].quantity, 1);
    }
    // Two teeth each carrying the crown roll up to one line of two.
    assert_eq!(payload.restoration_products.len(), 1);
    assert_eq!(payload.restoration_products[0].quantity, 2);
}

#[test]
fn duplicate_product_is_a_nonfatal_notice() {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());

    session.choose_product_type(ProductType::CrownBridge).unwrap();
    drag(&mut session, &layout, &[24, 25]);
    session.choose_restoration_type(GroupType::Joint).unwrap();

    let crown = catalog_product("p-1", "PFM Crown", "metal-ceramic");
    session.select_product(&crown).unwrap();
    assert!(matches!(
        session.select_product(&crown),
        Err(SessionError::Selection(_))
    ));
    // The refusal changes nothing; the flow continues to a valid save.
    let payload = session.finalize().unwrap();
    assert_eq!(payload.tooth_groups[0].products.len(), 1);
}

#[test]
fn abandoning_leaves_the_repository_untouched() {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());

    session.choose_product_type(ProductType::Implant).unwrap();
    drag(&mut session, &layout, &[31, 41]);
    session.choose_restoration_type(GroupType::Bridge).unwrap();
    session.abandon();

    assert_eq!(session.state(), SessionState::Idle);
    let payload = session.payload();
    assert!(payload.tooth_groups.is_empty());
    assert!(payload.selected_teeth.is_empty());
}

#[test]
fn editing_an_existing_group_preloads_and_updates_in_place() {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());

    session.choose_product_type(ProductType::CrownBridge).unwrap();
    drag(&mut session, &layout, &[14, 15, 16]);
    session.choose_restoration_type(GroupType::Joint).unwrap();
    session
        .select_product(&catalog_product("p-1", "PFM Crown", "metal-ceramic"))
        .unwrap();
    session.set_attribute(AttributeField::Shade, "A2").unwrap();
    let payload = session.finalize().unwrap();
    let id = payload.tooth_groups[0].id;

    session.edit_group(id).unwrap();
    assert_eq!(session.state(), SessionState::ProductSelecting);
    assert_eq!(session.selected_teeth(), &[pos(14), pos(15), pos(16)]);
    session.set_attribute(AttributeField::Shade, "B1").unwrap();
    let payload = session.finalize().unwrap();

    assert_eq!(payload.tooth_groups.len(), 1);
    assert_eq!(payload.tooth_groups[0].id, id);
    assert_eq!(payload.tooth_groups[0].attributes.shade.as_deref(), Some("B1"));
}

#[test]
fn commands_out_of_state_are_refused() {
    let mut session = ConfigSession::default();
    assert!(matches!(
        session.choose_restoration_type(GroupType::Joint),
        Err(SessionError::InvalidState(SessionState::Idle))
    ));
    assert!(matches!(
        session.finalize(),
        Err(SessionError::InvalidState(SessionState::Idle))
    ));
    // Pointer noise outside the selection states is dropped silently.
    session.pointer_down(ChartPoint::new(50.0, 60.0));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn payload_serializes_with_camel_case_contract_keys() {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());
    session.choose_product_type(ProductType::CrownBridge).unwrap();
    drag(&mut session, &layout, &[44, 45]);
    session.choose_restoration_type(GroupType::Joint).unwrap();
    session
        .select_product(&catalog_product("p-1", "PFM Crown", "metal-ceramic"))
        .unwrap();
    session.add_accessory("Bite registration");
    let payload = session.finalize().unwrap();

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("toothGroups").is_some());
    assert!(json.get("selectedTeeth").is_some());
    assert!(json.get("restorationProducts").is_some());
    assert!(json.get("accessories").is_some());
    let group = &json["toothGroups"][0];
    assert_eq!(group["productType"], "crown-bridge");
    assert_eq!(group["groupType"], "joint");
}
