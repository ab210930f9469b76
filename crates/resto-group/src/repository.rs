//! The repository of committed groups and configured teeth.
//!
//! All mutations validate against the adjacency model before touching any
//! state. A refused operation leaves the repository exactly as it was and
//! logs the reason at `warn`; nothing is surfaced to the end user.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use resto_model::{
    ConnectionChain, Group, GroupId, GroupType, Position, RestorationAttributes, ToothDetail,
    ToothRole, is_adjacent, is_contiguous_chain,
};

use crate::error::GroupOpError;

/// What a split produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub removed: GroupId,
    pub new_groups: Vec<GroupId>,
    pub dissolved: Vec<Position>,
}

/// What removing a member left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The group survives without the removed tooth.
    MemberDropped,
    /// The group dropped to one member and dissolved into this individual.
    Dissolved(Position),
    /// The removed tooth was the last member; the group is gone.
    GroupDeleted,
}

/// Owns every committed [`Group`] and every configured [`ToothDetail`] of
/// one order session. Tooth records exist for grouped members (until
/// promotion strips them) and for individually configured teeth.
#[derive(Debug, Default)]
pub struct GroupRepository {
    groups: BTreeMap<GroupId, Group>,
    teeth: BTreeMap<Position, ToothDetail>,
    next_id: u32,
}

impl GroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // --- queries ---

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn tooth(&self, position: Position) -> Option<&ToothDetail> {
        self.teeth.get(&position)
    }

    pub fn tooth_mut(&mut self, position: Position) -> Option<&mut ToothDetail> {
        self.teeth.get_mut(&position)
    }

    /// Tooth records whose position belongs to no group.
    pub fn individuals(&self) -> impl Iterator<Item = &ToothDetail> {
        self.teeth
            .values()
            .filter(|t| self.owner_of(t.position).is_none())
    }

    /// The group currently holding `position`, if any. The engine does not
    /// enforce single-group membership on the gesture path; callers that
    /// want to guard against steals can consult this first.
    pub fn owner_of(&self, position: Position) -> Option<GroupId> {
        self.groups
            .values()
            .find(|g| g.contains(position))
            .map(|g| g.id)
    }

    /// A group together with the tooth-record map, for promotion passes
    /// that write the group and strip its members in one go.
    pub fn group_and_teeth_mut(
        &mut self,
        id: GroupId,
    ) -> Option<(&mut Group, &mut BTreeMap<Position, ToothDetail>)> {
        self.groups.get_mut(&id).map(|g| (g, &mut self.teeth))
    }

    // --- mutations ---

    /// Register or replace an individually configured tooth.
    pub fn add_tooth(&mut self, tooth: ToothDetail) {
        debug!(position = %tooth.position, "tooth configured");
        self.teeth.insert(tooth.position, tooth);
    }

    /// Drop an individual tooth record. Grouped members go through
    /// [`Self::remove_member`] instead.
    pub fn remove_tooth(&mut self, position: Position) -> Option<ToothDetail> {
        self.teeth.remove(&position)
    }

    /// Commit a finalized chain as a new group. The chain must already be
    /// fully adjacent; it is re-checked here all the same.
    pub fn create_group(
        &mut self,
        chain: &ConnectionChain,
        group_type: GroupType,
    ) -> Result<GroupId, GroupOpError> {
        if !chain.is_fully_adjacent() {
            return Err(self.refuse(GroupOpError::BrokenChain));
        }
        let got = chain.len();
        if group_type == GroupType::Separate && got != 1 {
            return Err(self.refuse(GroupOpError::NotASingleTooth(got)));
        }
        let needed = group_type.min_members();
        if got < needed {
            return Err(self.refuse(GroupOpError::TooFewMembers {
                group_type,
                needed,
                got,
            }));
        }
        let id = self.fresh_id();
        let group = Group {
            id,
            group_type,
            product_type: chain.product_type,
            material: None,
            members: chain.positions.clone(),
            pontics: BTreeSet::new(),
            attributes: RestorationAttributes::default(),
            products: Vec::new(),
        };
        debug!(%id, %group_type, members = group.members.len(), "group created");
        self.groups.insert(id, group);
        Ok(id)
    }

    /// Remove the edge between two consecutive members, partitioning the
    /// group. Single-tooth parts dissolve into individuals; larger parts
    /// become new groups inheriting the parent's type, product type,
    /// material and attributes. A two-member parent leaves two individuals.
    pub fn split_group(
        &mut self,
        id: GroupId,
        edge: (Position, Position),
    ) -> Result<SplitOutcome, GroupOpError> {
        let (a, b) = edge;
        let Some(parent) = self.groups.get(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        for position in [a, b] {
            if !parent.contains(position) {
                return Err(self.refuse(GroupOpError::NotAMember {
                    group: id,
                    position,
                }));
            }
        }
        let edge_index = parent
            .members
            .windows(2)
            .position(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a));
        let Some(edge_index) = edge_index else {
            return Err(self.refuse(GroupOpError::NotAnEdge { a, b }));
        };

        let Some(parent) = self.groups.remove(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        let (left, right) = parent.members.split_at(edge_index + 1);
        debug_assert!(is_contiguous_chain(left) || left.len() == 1);
        debug_assert!(is_contiguous_chain(right) || right.len() == 1);

        let mut outcome = SplitOutcome {
            removed: id,
            new_groups: Vec::new(),
            dissolved: Vec::new(),
        };
        for part in [left, right] {
            if part.len() == 1 {
                self.dissolve(&parent, part[0]);
                outcome.dissolved.push(part[0]);
            } else {
                let child_id = self.fresh_id();
                let child = Group {
                    id: child_id,
                    group_type: parent.group_type,
                    product_type: parent.product_type,
                    material: parent.material.clone(),
                    members: part.to_vec(),
                    pontics: part
                        .iter()
                        .filter(|p| parent.pontics.contains(p))
                        .copied()
                        .collect(),
                    attributes: parent.attributes.clone(),
                    products: parent.products.clone(),
                };
                self.groups.insert(child_id, child);
                outcome.new_groups.push(child_id);
            }
        }
        debug!(
            parent = %id,
            new_groups = outcome.new_groups.len(),
            dissolved = outcome.dissolved.len(),
            "group split"
        );
        Ok(outcome)
    }

    /// Remove one end tooth from a group. Interior removals would break the
    /// contiguity invariant and are refused; interior separation is what
    /// [`Self::split_group`] is for. A group left with one member dissolves
    /// into an individual, keeping its pontic flag.
    pub fn remove_member(
        &mut self,
        id: GroupId,
        position: Position,
    ) -> Result<RemoveOutcome, GroupOpError> {
        let Some(group) = self.groups.get(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        if !group.contains(position) {
            return Err(self.refuse(GroupOpError::NotAMember {
                group: id,
                position,
            }));
        }
        if !group.is_end(position) {
            return Err(self.refuse(GroupOpError::InteriorRemoval(position)));
        }

        let remaining = {
            let Some(group) = self.groups.get_mut(&id) else {
                return Err(self.refuse(GroupOpError::UnknownGroup(id)));
            };
            group.members.retain(|&p| p != position);
            group.pontics.remove(&position);
            group.members.len()
        };
        self.teeth.remove(&position);

        if remaining == 0 {
            self.groups.remove(&id);
            debug!(%id, "group deleted with its last member");
            return Ok(RemoveOutcome::GroupDeleted);
        }
        if remaining == 1
            && let Some(group) = self.groups.remove(&id)
            && let Some(&survivor) = group.members.first()
        {
            self.dissolve(&group, survivor);
            debug!(%id, %survivor, "group dissolved");
            return Ok(RemoveOutcome::Dissolved(survivor));
        }
        debug!(%id, %position, "member removed");
        Ok(RemoveOutcome::MemberDropped)
    }

    /// Toggle a member between abutment and pontic. Bridge groups only.
    /// Nothing stops a bridge from ending up with zero abutments; that is
    /// left to the ordering clinician.
    pub fn convert_role(
        &mut self,
        id: GroupId,
        position: Position,
        role: ToothRole,
    ) -> Result<(), GroupOpError> {
        let Some(group) = self.groups.get_mut(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        if group.group_type != GroupType::Bridge {
            return Err(self.refuse(GroupOpError::NotABridge(id)));
        }
        if !group.contains(position) {
            return Err(self.refuse(GroupOpError::NotAMember {
                group: id,
                position,
            }));
        }
        match role {
            ToothRole::Pontic => {
                group.pontics.insert(position);
            }
            ToothRole::Abutment => {
                group.pontics.remove(&position);
            }
        }
        if group.abutment_count() == 0 {
            debug!(%id, "bridge has no abutments left");
        }
        Ok(())
    }

    /// Append a tooth to whichever end of the group it is adjacent to.
    pub fn join_position(
        &mut self,
        position: Position,
        id: GroupId,
    ) -> Result<(), GroupOpError> {
        let Some(group) = self.groups.get(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        if group.contains(position) {
            return Err(self.refuse(GroupOpError::AlreadyMember(position)));
        }
        let Some((first, last)) = group.ends() else {
            return Err(self.refuse(GroupOpError::NotAdjacentToEnd(position)));
        };
        let Some(group) = self.groups.get_mut(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        if is_adjacent(position, last) {
            group.members.push(position);
        } else if is_adjacent(position, first) {
            group.members.insert(0, position);
        } else {
            return Err(self.refuse(GroupOpError::NotAdjacentToEnd(position)));
        }
        debug!(%id, %position, "position joined group");
        Ok(())
    }

    /// Explicitly destroy a group and its members' tooth records.
    pub fn remove_group(&mut self, id: GroupId) -> Result<Group, GroupOpError> {
        let Some(group) = self.groups.remove(&id) else {
            return Err(self.refuse(GroupOpError::UnknownGroup(id)));
        };
        for position in &group.members {
            self.teeth.remove(position);
        }
        debug!(%id, "group removed");
        Ok(group)
    }

    // --- internals ---

    fn fresh_id(&mut self) -> GroupId {
        self.next_id += 1;
        GroupId(self.next_id)
    }

    /// Turn a group member into an individual tooth record, preserving the
    /// pontic flag and carrying the parent's products and attributes when
    /// the tooth has none of its own.
    fn dissolve(&mut self, parent: &Group, position: Position) {
        let tooth = self
            .teeth
            .entry(position)
            .or_insert_with(|| ToothDetail::new(position, parent.product_type.into()));
        tooth.pontic = parent.pontics.contains(&position);
        if tooth.selected_products.is_empty() {
            tooth.selected_products = parent.products.clone();
        }
        if tooth.attributes.is_empty() {
            tooth.attributes = parent.attributes.clone();
        }
    }

    fn refuse(&self, error: GroupOpError) -> GroupOpError {
        warn!(%error, "group operation refused");
        error
    }
}
