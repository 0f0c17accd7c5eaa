use super::types::{GateId, PinRef};

/// Errors reported by circuit operations
///
/// None of these are fatal: the operation that produced one has left the
/// circuit unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// No gate with this handle exists
    GateNotFound(GateId),
    /// The gate exists but has no pin at this index
    PinNotFound(PinRef),
    /// A wire must run from an output pin to an input pin
    InvalidConnection { from: PinRef, to: PinRef },
    /// The input pin already has an inbound wire
    InputAlreadyUsed(PinRef),
    /// Voltage can only be switched on input sources
    NotAnInputSource(GateId),
    /// Compounds are created by grouping, never placed directly
    CannotPlaceCompound,
    /// Only top-level gates can be grouped
    NotTopLevel(GateId),
    /// Grouping produced a compound without children
    EmptyCompound,
    /// Evaluation reached this gate again while it was still being evaluated
    CyclicCircuit(GateId),
}

impl std::fmt::Display for CircuitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitError::GateNotFound(id) => write!(f, "Gate {} not found", id),
            CircuitError::PinNotFound(pin) => write!(f, "Pin {} not found", pin),
            CircuitError::InvalidConnection { .. } => {
                write!(f, "Error: you must connect an output pin to an input pin.")
            }
            CircuitError::InputAlreadyUsed(_) => write!(f, "That input is already used."),
            CircuitError::NotAnInputSource(id) => write!(f, "Gate {} is not an input source", id),
            CircuitError::CannotPlaceCompound => {
                write!(f, "Compounds can only be created by grouping gates")
            }
            CircuitError::NotTopLevel(id) => write!(f, "Gate {} is not a top-level gate", id),
            CircuitError::EmptyCompound => write!(f, "Compound would contain no gates"),
            CircuitError::CyclicCircuit(id) => {
                write!(f, "Cyclic circuit: gate {} feeds back into its own input", id)
            }
        }
    }
}

impl std::error::Error for CircuitError {}

impl CircuitError {
    /// Whether this error is a rejected wire rather than a lookup or evaluation failure
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            CircuitError::InvalidConnection { .. } | CircuitError::InputAlreadyUsed(_)
        )
    }
}
