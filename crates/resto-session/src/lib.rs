pub mod error;
pub mod payload;
pub mod workflow;

pub use error::SessionError;
pub use payload::build_payload;
pub use workflow::{ConfigSession, SessionState};
