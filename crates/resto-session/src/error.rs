use resto_model::GroupId;
use thiserror::Error;

use crate::workflow::SessionState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("command not valid in state {0:?}")]
    InvalidState(SessionState),
    #[error("no teeth selected")]
    EmptySelection,
    #[error("{0} needs at least {1} selected teeth")]
    SelectionTooSmall(resto_model::GroupType, usize),
    #[error("at least one product must be attached before saving")]
    NoProducts,
    #[error("no group with id {0}")]
    UnknownGroup(GroupId),
    #[error(transparent)]
    Group(#[from] resto_group::GroupOpError),
    #[error(transparent)]
    Selection(#[from] resto_catalog::SelectionError),
}
