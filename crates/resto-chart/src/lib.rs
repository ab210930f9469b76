pub mod builder;
pub mod layout;

pub use builder::{ChainBuilder, ChainState, DEFAULT_PROXIMITY_RADIUS};
pub use layout::{ChartLayout, ChartPoint};
