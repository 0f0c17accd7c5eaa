pub mod arena;
pub mod gate;
pub mod layout;
pub mod pin;

// Re-export commonly used types
pub use arena::GateArena;
pub use gate::{Gate, GateVariant};
pub use layout::{GateKind, GateLayout, PinSpec};
pub use pin::{Pin, PinDirection};
