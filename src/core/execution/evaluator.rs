use super::observer::CircuitObserver;
use crate::core::connections::WireTable;
use crate::core::errors::CircuitError;
use crate::core::gates::{GateArena, GateVariant};
use crate::core::types::GateId;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Pending work for the upstream walk
enum Step {
    /// Resolve this gate, expanding its drivers first if needed
    Visit(GateId),
    /// All drivers are resolved; combine them
    Combine(GateId, Vec<GateId>),
}

/// Computes gate outputs by walking upstream through the wires.
///
/// The walk is a depth-first search driven by an explicit work stack, so the
/// length of a chain is bounded by memory rather than by the thread stack.
/// Gates whose drivers are still being resolved are tracked on a path set;
/// meeting one of them again means the circuit feeds back into itself and
/// evaluation fails with [`CircuitError::CyclicCircuit`]. Results are memoised
/// for the lifetime of the evaluator, so it must not outlive a mutation of the
/// circuit.
pub struct Evaluator<'a> {
    gates: &'a GateArena,
    wires: &'a WireTable,
    observers: &'a mut [Box<dyn CircuitObserver>],
    on_path: HashSet<GateId>,
    resolved: HashMap<GateId, bool>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        gates: &'a GateArena,
        wires: &'a WireTable,
        observers: &'a mut [Box<dyn CircuitObserver>],
    ) -> Self {
        Self {
            gates,
            wires,
            observers,
            on_path: HashSet::new(),
            resolved: HashMap::new(),
        }
    }

    /// Logical output of `id` given the current wiring.
    ///
    /// Sources report their voltage, lamps the value they would display, and
    /// compounds always `true`. A gate with an unwired input yields `false`.
    pub fn evaluate(&mut self, id: GateId) -> Result<bool, CircuitError> {
        if let Some(value) = self.resolved.get(&id) {
            return Ok(*value);
        }

        let mut stack = vec![Step::Visit(id)];
        while let Some(step) = stack.pop() {
            let outcome = match step {
                Step::Visit(gate) => self.visit(gate, &mut stack),
                Step::Combine(gate, drivers) => self.combine(gate, &drivers),
            };
            if let Err(error) = outcome {
                self.on_path.clear();
                return Err(error);
            }
        }

        self.resolved
            .get(&id)
            .copied()
            .ok_or(CircuitError::GateNotFound(id))
    }

    /// Resolve leaves directly; otherwise schedule the drivers ahead of the combine step
    fn visit(&mut self, id: GateId, stack: &mut Vec<Step>) -> Result<(), CircuitError> {
        if self.resolved.contains_key(&id) {
            return Ok(());
        }
        if self.on_path.contains(&id) {
            warn!("Cyclic circuit: gate {} reached again during evaluation", id);
            for observer in self.observers.iter_mut() {
                observer.on_cycle_detected(id);
            }
            return Err(CircuitError::CyclicCircuit(id));
        }

        let gates = self.gates;
        let gate = gates.gate(id)?;
        let value = match gate.variant() {
            GateVariant::InputSource { voltage } => *voltage,
            GateVariant::Compound { .. } => true,
            _ if !gate.connected_input_pins() => {
                warn!("Not all input pins of {} gate {} connected - returned false", gate.kind(), id);
                for observer in self.observers.iter_mut() {
                    observer.on_unconnected_inputs(id, gate.kind());
                }
                false
            }
            _ => {
                let drivers = self.drivers_of(id)?;
                self.on_path.insert(id);
                // every input is visited, so a cycle is found regardless of the other inputs' values
                let pending: Vec<GateId> = drivers.iter().rev().copied().collect();
                stack.push(Step::Combine(id, drivers));
                stack.extend(pending.into_iter().map(Step::Visit));
                return Ok(());
            }
        };

        self.resolve(id, value);
        Ok(())
    }

    fn combine(&mut self, id: GateId, drivers: &[GateId]) -> Result<(), CircuitError> {
        self.on_path.remove(&id);
        let inputs = drivers
            .iter()
            .map(|driver| self.resolved.get(driver).copied().ok_or(CircuitError::GateNotFound(*driver)))
            .collect::<Result<Vec<bool>, CircuitError>>()?;

        let input = |index: usize| inputs.get(index).copied().unwrap_or(false);
        let value = match self.gates.gate(id)?.variant() {
            GateVariant::And => input(0) && input(1),
            GateVariant::Or => input(0) || input(1),
            GateVariant::Not => !input(0),
            _ => input(0),
        };
        self.resolve(id, value);
        Ok(())
    }

    fn resolve(&mut self, id: GateId, value: bool) {
        if let Some(gate) = self.gates.get(id) {
            debug!("{} gate {} evaluated to {}", gate.kind(), id, value);
        }
        self.resolved.insert(id, value);
    }

    /// The gate driving each input pin, in pin order
    fn drivers_of(&self, id: GateId) -> Result<Vec<GateId>, CircuitError> {
        let gate = self.gates.gate(id)?;
        Ok(gate
            .pins()
            .iter()
            .filter(|pin| pin.is_input())
            .filter_map(|pin| pin.inbound())
            .filter_map(|wire| self.wires.get(wire))
            .map(|wire| wire.from.gate)
            .collect())
    }
}
