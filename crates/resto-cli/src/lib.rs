pub mod logging;
pub mod replay;
pub mod script;
