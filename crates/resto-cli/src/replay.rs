//! Driving the engine from a recorded script.

use anyhow::{Context, bail};
use tracing::{info, warn};

use resto_chart::{ChartLayout, ChartPoint};
use resto_model::{CatalogProduct, GroupId, OrderPayload, Position};
use resto_session::{ConfigSession, SessionError};

use crate::script::{ReplayScript, Step};

/// Run every step of the script and return the final order payload: the
/// output of the last finalize, or the current snapshot if the script
/// never finalizes.
pub fn run_script(script: &ReplayScript) -> anyhow::Result<OrderPayload> {
    let layout = ChartLayout::default();
    let mut session = ConfigSession::new(layout.clone());
    let mut last_payload: Option<OrderPayload> = None;

    for (index, step) in script.steps.iter().enumerate() {
        apply_step(&mut session, &layout, &script.catalog, step, &mut last_payload)
            .with_context(|| format!("script step {} failed", index + 1))?;
    }
    info!(steps = script.steps.len(), "script replayed");
    Ok(last_payload.unwrap_or_else(|| session.payload()))
}

fn apply_step(
    session: &mut ConfigSession,
    layout: &ChartLayout,
    catalog: &[CatalogProduct],
    step: &Step,
    last_payload: &mut Option<OrderPayload>,
) -> anyhow::Result<()> {
    match step {
        Step::ChooseProductType { product_type } => {
            session.choose_product_type(*product_type)?;
        }
        Step::Drag { teeth } => {
            let points = points_for(layout, teeth)?;
            let Some((&first, rest)) = points.split_first() else {
                bail!("drag step without teeth");
            };
            session.pointer_down(first);
            for &point in rest {
                session.pointer_move(point);
            }
            session.pointer_up(rest.last().copied().unwrap_or(first));
        }
        Step::Tap { tooth } => {
            let point = point_for(layout, *tooth)?;
            session.tap_tooth(point);
        }
        Step::ChooseRestorationType { group_type } => {
            session.choose_restoration_type(*group_type)?;
        }
        Step::SelectProduct { product_id } => {
            let product = catalog
                .iter()
                .find(|p| &p.id == product_id)
                .with_context(|| format!("product {product_id} not in script catalog"))?;
            match session.select_product(product) {
                // Duplicate selections are a notice in the real UI; keep
                // replays going the same way.
                Err(SessionError::Selection(notice)) => {
                    warn!(%notice, "selection notice");
                }
                other => other?,
            }
        }
        Step::SetQuantity {
            product_id,
            quantity,
        } => {
            session.set_product_quantity(product_id, *quantity)?;
        }
        Step::SetAttribute { field, value } => {
            session.set_attribute(*field, value.clone())?;
        }
        Step::AddAccessory { name } => {
            session.add_accessory(name.clone());
        }
        Step::Finalize => {
            *last_payload = Some(session.finalize()?);
        }
        Step::EditGroup { group } => {
            session.edit_group(GroupId(*group))?;
        }
        Step::SplitGroup { group, edge } => {
            let a = Position::new(edge[0])?;
            let b = Position::new(edge[1])?;
            session.split_group(GroupId(*group), (a, b))?;
        }
        Step::RemoveMember { group, tooth } => {
            session.remove_member(GroupId(*group), Position::new(*tooth)?)?;
        }
        Step::ConvertRole { group, tooth, role } => {
            session.convert_role(GroupId(*group), Position::new(*tooth)?, *role)?;
        }
        Step::JoinTooth { tooth, group } => {
            session.join_position(Position::new(*tooth)?, GroupId(*group))?;
        }
    }
    Ok(())
}

fn points_for(layout: &ChartLayout, teeth: &[u8]) -> anyhow::Result<Vec<ChartPoint>> {
    teeth.iter().map(|&fdi| point_for(layout, fdi)).collect()
}

fn point_for(layout: &ChartLayout, fdi: u8) -> anyhow::Result<ChartPoint> {
    let position = Position::new(fdi)?;
    layout
        .point_of(position)
        .with_context(|| format!("position {position} has no layout point"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crown() -> CatalogProduct {
        CatalogProduct {
            id: "p-1".to_string(),
            name: "PFM Crown".to_string(),
            category: "crown".to_string(),
            material: Some("metal-ceramic".to_string()),
            description: None,
        }
    }

    #[test]
    fn scripted_joint_session_produces_the_payload() {
        let script = ReplayScript {
            catalog: vec![crown()],
            steps: vec![
                Step::ChooseProductType {
                    product_type: resto_model::ProductType::CrownBridge,
                },
                Step::Drag {
                    teeth: vec![14, 15, 16],
                },
                Step::ChooseRestorationType {
                    group_type: resto_model::GroupType::Joint,
                },
                Step::SelectProduct {
                    product_id: "p-1".to_string(),
                },
                Step::SetAttribute {
                    field: resto_model::AttributeField::Shade,
                    value: "A2".to_string(),
                },
                Step::Finalize,
            ],
        };
        let payload = run_script(&script).unwrap();
        assert_eq!(payload.tooth_groups.len(), 1);
        assert_eq!(payload.tooth_groups[0].products[0].quantity, 3);
        assert_eq!(
            payload.tooth_groups[0].attributes.shade.as_deref(),
            Some("A2")
        );
    }

    #[test]
    fn unknown_product_fails_the_step() {
        let script = ReplayScript {
            catalog: Vec::new(),
            steps: vec![
                Step::ChooseProductType {
                    product_type: resto_model::ProductType::CrownBridge,
                },
                Step::Drag {
                    teeth: vec![14, 15],
                },
                Step::ChooseRestorationType {
                    group_type: resto_model::GroupType::Joint,
                },
                Step::SelectProduct {
                    product_id: "missing".to_string(),
                },
            ],
        };
        let error = run_script(&script).unwrap_err();
        assert!(error.to_string().contains("step 4"));
    }
}
