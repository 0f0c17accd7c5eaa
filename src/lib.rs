pub mod core;

// Re-export commonly used types
pub use crate::core::builder::CompoundBuilder;
pub use crate::core::circuit::Circuit;
pub use crate::core::config::CircuitConfig;
pub use crate::core::connections::Wire;
pub use crate::core::errors::CircuitError;
pub use crate::core::execution::{CircuitObserver, DiagnosticLog, SharedDiagnostics};
pub use crate::core::gates::{Gate, GateKind, PinDirection};
pub use crate::core::snapshot::CircuitSnapshot;
pub use crate::core::types::{GateId, PinRef, Point, Rect, WireId};
