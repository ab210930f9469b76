use resto_model::{GroupId, GroupType, Position};
use thiserror::Error;

/// Why a repository operation was refused. Refused operations are no-ops:
/// the caller may inspect the reason, the end user never sees an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupOpError {
    #[error("no group with id {0}")]
    UnknownGroup(GroupId),
    #[error("position {position} is not a member of group {group}")]
    NotAMember { group: GroupId, position: Position },
    #[error("positions {a} and {b} are not a consecutive edge")]
    NotAnEdge { a: Position, b: Position },
    #[error("chain is not a contiguous adjacency sequence")]
    BrokenChain,
    #[error("{group_type} group needs at least {needed} members, got {got}")]
    TooFewMembers {
        group_type: GroupType,
        needed: usize,
        got: usize,
    },
    #[error("separate groups hold exactly one tooth, got {0}")]
    NotASingleTooth(usize),
    #[error("position {0} is not adjacent to either end of the group")]
    NotAdjacentToEnd(Position),
    #[error("position {0} is already a member of the group")]
    AlreadyMember(Position),
    #[error("removing interior position {0} would break the chain")]
    InteriorRemoval(Position),
    #[error("group {0} is not a bridge")]
    NotABridge(GroupId),
}
