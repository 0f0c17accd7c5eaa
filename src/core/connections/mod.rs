pub mod connection_validator;
pub mod manager;

// Re-export commonly used types
pub use connection_validator::ConnectionValidator;
pub use manager::{Wire, WireStats, WireTable};
