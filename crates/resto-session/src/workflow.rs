//! The outer configuration workflow.
//!
//! One `ConfigSession` coordinates a whole ordering dialog: it owns the
//! group repository, the chain builder, and the working state of the
//! "add a product group" flow. Commands are named after what the clinician
//! does; commands issued in the wrong state are refused without touching
//! anything.

use tracing::{debug, warn};

use resto_aggregate::{assigned_quantity, promote};
use resto_catalog::{ProductSelection, SelectionError};
use resto_chart::{ChainBuilder, ChartLayout, ChartPoint, DEFAULT_PROXIMITY_RADIUS};
use resto_group::{GroupRepository, RemoveOutcome, SplitOutcome};
use resto_model::{
    AttributeField, CatalogProduct, ConnectionChain, GroupId, GroupType, OrderPayload, Position,
    PrescriptionType, ProductType, RestorationAttributes, ToothDetail, ToothRole,
};

use crate::error::SessionError;
use crate::payload::build_payload;

/// Where the flow currently stands. `Finalized` is momentary: committing
/// returns the payload and the session is back at `Idle` for the next
/// group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    TypeSelected,
    TeethSelecting,
    RestorationTypeChosen,
    ProductSelecting,
    AttributeEditing,
}

#[derive(Debug)]
struct WorkingConfig {
    product_type: ProductType,
    selected: Vec<Position>,
    group_type: Option<GroupType>,
    /// Set when re-opening an existing group instead of building a new one.
    editing: Option<GroupId>,
    selection: ProductSelection,
    form: RestorationAttributes,
    material: Option<String>,
}

impl WorkingConfig {
    fn new(product_type: ProductType) -> Self {
        Self {
            product_type,
            selected: Vec::new(),
            group_type: None,
            editing: None,
            selection: ProductSelection::default(),
            form: RestorationAttributes::default(),
            material: None,
        }
    }

    fn prescription(&self) -> PrescriptionType {
        self.product_type.into()
    }
}

/// One interactive ordering session.
#[derive(Debug)]
pub struct ConfigSession {
    repository: GroupRepository,
    builder: ChainBuilder,
    layout: ChartLayout,
    state: SessionState,
    working: Option<WorkingConfig>,
    accessories: Vec<String>,
}

impl Default for ConfigSession {
    fn default() -> Self {
        Self::new(ChartLayout::default())
    }
}

impl ConfigSession {
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            repository: GroupRepository::new(),
            builder: ChainBuilder::new(layout.clone()),
            layout,
            state: SessionState::Idle,
            working: None,
            accessories: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn repository(&self) -> &GroupRepository {
        &self.repository
    }

    /// Teeth in the current working selection, in chain order.
    pub fn selected_teeth(&self) -> &[Position] {
        self.working
            .as_ref()
            .map(|w| w.selected.as_slice())
            .unwrap_or(&[])
    }

    /// Current engine output without committing anything.
    pub fn payload(&self) -> OrderPayload {
        build_payload(&self.repository, &self.accessories)
    }

    // --- the configuration flow ---

    /// Entry point of the flow: pick implant or crown-bridge work.
    pub fn choose_product_type(&mut self, product_type: ProductType) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        self.builder.arm(product_type);
        self.working = Some(WorkingConfig::new(product_type));
        self.state = SessionState::TypeSelected;
        debug!(%product_type, "configuration started");
        Ok(())
    }

    /// Pointer events stream through to the chain builder while teeth are
    /// being selected. Events in any other state are UI noise and are
    /// dropped without error.
    pub fn pointer_down(&mut self, point: ChartPoint) {
        if !self.selecting() {
            return;
        }
        self.state = SessionState::TeethSelecting;
        self.builder.pointer_down(point);
    }

    pub fn pointer_move(&mut self, point: ChartPoint) {
        if self.state == SessionState::TeethSelecting {
            self.builder.pointer_move(point);
        }
    }

    pub fn pointer_up(&mut self, point: ChartPoint) {
        if self.state != SessionState::TeethSelecting {
            return;
        }
        if let Some(chain) = self.builder.pointer_up(point) {
            debug!(length = chain.len(), "connection completed");
            if let Some(working) = self.working.as_mut() {
                working.selected = chain.positions;
            }
        }
    }

    /// Toggle a single tooth in or out of the selection (the tap path used
    /// for separate restorations).
    pub fn tap_tooth(&mut self, point: ChartPoint) {
        if !self.selecting() {
            return;
        }
        let Some(position) = self.layout.hit_test(point, DEFAULT_PROXIMITY_RADIUS) else {
            return;
        };
        self.state = SessionState::TeethSelecting;
        if let Some(working) = self.working.as_mut() {
            if let Some(index) = working.selected.iter().position(|&p| p == position) {
                working.selected.remove(index);
            } else {
                working.selected.push(position);
            }
        }
    }

    /// Fix the restoration type for the working selection.
    pub fn choose_restoration_type(&mut self, group_type: GroupType) -> Result<(), SessionError> {
        if self.state != SessionState::TeethSelecting {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        let Some(working) = self.working.as_mut() else {
            return Err(SessionError::InvalidState(SessionState::Idle));
        };
        if working.selected.is_empty() {
            return Err(self.refuse(SessionError::EmptySelection));
        }
        let needed = group_type.min_members();
        if working.selected.len() < needed {
            return Err(self.refuse(SessionError::SelectionTooSmall(group_type, needed)));
        }
        working.group_type = Some(group_type);
        working.selection = ProductSelection::new(working.selected.len() as u32);
        self.state = SessionState::RestorationTypeChosen;
        debug!(%group_type, teeth = working.selected.len(), "restoration type chosen");
        Ok(())
    }

    /// Attach a catalog product to the working selection. The assigned
    /// quantity follows the prescription category: arch-priced categories
    /// count spanned arches, everything else counts the selected teeth.
    pub fn select_product(&mut self, product: &CatalogProduct) -> Result<(), SessionError> {
        if !matches!(
            self.state,
            SessionState::RestorationTypeChosen | SessionState::ProductSelecting
        ) {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        let Some(working) = self.working.as_mut() else {
            return Err(SessionError::InvalidState(SessionState::Idle));
        };
        let quantity = assigned_quantity(working.prescription(), &working.selected);
        working.selection.add(product, quantity)?;
        if working.material.is_none() {
            working.material = product.material.clone();
        }
        self.state = SessionState::ProductSelecting;
        Ok(())
    }

    /// Manual quantity override for an already attached product.
    pub fn set_product_quantity(
        &mut self,
        product_id: &str,
        quantity: u32,
    ) -> Result<u32, SessionError> {
        if !matches!(
            self.state,
            SessionState::ProductSelecting | SessionState::AttributeEditing
        ) {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        let Some(working) = self.working.as_mut() else {
            return Err(SessionError::InvalidState(SessionState::Idle));
        };
        Ok(working.selection.set_quantity(product_id, quantity)?)
    }

    /// Record a clinical attribute on the configuration form.
    pub fn set_attribute(
        &mut self,
        field: AttributeField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        if !matches!(
            self.state,
            SessionState::ProductSelecting | SessionState::AttributeEditing
        ) {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        let Some(working) = self.working.as_mut() else {
            return Err(SessionError::InvalidState(SessionState::Idle));
        };
        working.form.set(field, Some(value.into()));
        self.state = SessionState::AttributeEditing;
        Ok(())
    }

    /// Commit the working configuration and hand back the updated payload.
    pub fn finalize(&mut self) -> Result<OrderPayload, SessionError> {
        if !matches!(
            self.state,
            SessionState::ProductSelecting | SessionState::AttributeEditing
        ) {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        let Some(working) = self.working.as_ref() else {
            return Err(SessionError::InvalidState(SessionState::Idle));
        };
        if working.selection.is_empty() {
            return Err(self.refuse(SessionError::NoProducts));
        }
        let group_type = working
            .group_type
            .ok_or(SessionError::InvalidState(self.state))?;
        let items = working.selection.items().to_vec();
        let form = working.form.clone();
        let material = working.material.clone();
        let selected = working.selected.clone();
        let product_type = working.product_type;
        let prescription = working.prescription();
        let editing = working.editing;

        if let Some(id) = editing {
            let (group, teeth) = self
                .repository
                .group_and_teeth_mut(id)
                .ok_or(SessionError::UnknownGroup(id))?;
            group.products = items;
            group.material = material;
            promote(group, teeth, &form);
        } else {
            match group_type {
                GroupType::Separate => {
                    for &position in &selected {
                        let mut tooth = ToothDetail::new(position, prescription);
                        tooth.attributes = form.clone();
                        tooth.selected_products = items
                            .iter()
                            .cloned()
                            .map(|mut item| {
                                item.quantity = 1;
                                item
                            })
                            .collect();
                        self.repository.add_tooth(tooth);
                    }
                }
                GroupType::Joint | GroupType::Bridge => {
                    let chain = ConnectionChain::new(selected, product_type);
                    let id = self.repository.create_group(&chain, group_type)?;
                    let Some((group, teeth)) = self.repository.group_and_teeth_mut(id) else {
                        return Err(SessionError::UnknownGroup(id));
                    };
                    group.products = items;
                    group.material = material;
                    promote(group, teeth, &form);
                }
            }
        }

        self.working = None;
        self.builder.disarm();
        self.state = SessionState::Idle;
        debug!("configuration finalized");
        Ok(self.payload())
    }

    /// Re-open an existing group with its state pre-loaded, entering the
    /// flow directly at product selection.
    pub fn edit_group(&mut self, id: GroupId) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(self.refuse(SessionError::InvalidState(self.state)));
        }
        let group = self
            .repository
            .group(id)
            .ok_or(SessionError::UnknownGroup(id))?;
        self.working = Some(WorkingConfig {
            product_type: group.product_type,
            selected: group.members.clone(),
            group_type: Some(group.group_type),
            editing: Some(id),
            selection: ProductSelection::from_items(
                group.members.len() as u32,
                group.products.clone(),
            ),
            form: group.attributes.clone(),
            material: group.material.clone(),
        });
        self.state = SessionState::ProductSelecting;
        debug!(%id, "editing existing group");
        Ok(())
    }

    /// Walk away from the current flow. Always safe; the repository is
    /// untouched and nothing of the draft survives.
    pub fn abandon(&mut self) {
        if self.state != SessionState::Idle {
            debug!("configuration abandoned");
        }
        self.builder.cancel();
        self.builder.disarm();
        self.working = None;
        self.state = SessionState::Idle;
    }

    // --- group panel commands (independent of the flow state) ---

    pub fn split_group(
        &mut self,
        id: GroupId,
        edge: (Position, Position),
    ) -> Result<SplitOutcome, SessionError> {
        Ok(self.repository.split_group(id, edge)?)
    }

    pub fn remove_member(
        &mut self,
        id: GroupId,
        position: Position,
    ) -> Result<RemoveOutcome, SessionError> {
        Ok(self.repository.remove_member(id, position)?)
    }

    pub fn convert_role(
        &mut self,
        id: GroupId,
        position: Position,
        role: ToothRole,
    ) -> Result<(), SessionError> {
        Ok(self.repository.convert_role(id, position, role)?)
    }

    pub fn join_position(&mut self, position: Position, id: GroupId) -> Result<(), SessionError> {
        Ok(self.repository.join_position(position, id)?)
    }

    pub fn remove_group(&mut self, id: GroupId) -> Result<(), SessionError> {
        self.repository.remove_group(id)?;
        Ok(())
    }

    pub fn add_accessory(&mut self, name: impl Into<String>) {
        self.accessories.push(name.into());
    }

    // --- internals ---

    fn selecting(&self) -> bool {
        matches!(
            self.state,
            SessionState::TypeSelected | SessionState::TeethSelecting
        )
    }

    fn refuse(&self, error: SessionError) -> SessionError {
        warn!(%error, state = ?self.state, "session command refused");
        error
    }
}
