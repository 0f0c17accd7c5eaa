use crate::core::errors::CircuitError;
use crate::core::gates::GateArena;
use crate::core::types::PinRef;

/// Centralized connection validation logic
pub struct ConnectionValidator;

impl ConnectionValidator {
    /// Validate a wire from `from` to `to`.
    ///
    /// Checks, in order: both pins exist, the directions run output -> input,
    /// and the input pin has no inbound wire yet.
    pub fn validate_connection(
        gates: &GateArena,
        from: PinRef,
        to: PinRef,
    ) -> Result<(), CircuitError> {
        let source = gates.pin(from)?;
        let target = gates.pin(to)?;

        if !source.direction().can_connect_to(&target.direction()) {
            return Err(CircuitError::InvalidConnection { from, to });
        }

        if target.is_connected() {
            return Err(CircuitError::InputAlreadyUsed(to));
        }

        Ok(())
    }

    /// Order two endpoints picked in either order so the output pin comes first.
    ///
    /// Pins of the same direction are returned unchanged; validation rejects them.
    pub fn orient(gates: &GateArena, a: PinRef, b: PinRef) -> Result<(PinRef, PinRef), CircuitError> {
        if gates.pin(a)?.is_output() {
            Ok((a, b))
        } else {
            gates.pin(b)?;
            Ok((b, a))
        }
    }
}
