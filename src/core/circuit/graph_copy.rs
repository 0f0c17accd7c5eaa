//! Duplication of gates and compound sub-circuits.
//!
//! Copies never share identity with their originals, so wiring inside a copied
//! compound is rebuilt by translating every `(gate, pin index)` endpoint
//! through the old -> new handle table filled while the gates were copied.

use super::Circuit;
use crate::core::errors::CircuitError;
use crate::core::types::{GateId, Owner, PinRef};
use log::info;
use std::collections::HashMap;

impl Circuit {
    /// Duplicate a gate, displaced by the configured clone offset.
    ///
    /// The copy is appended to the top level and becomes the only selection.
    /// Primitive gates come back unwired. For a compound every child is copied
    /// in order and each wire running between two gates of the copied subtree
    /// is recreated between the corresponding copies; wires entering the
    /// compound from outside are not copied.
    pub fn clone_gate(&mut self, id: GateId) -> Result<GateId, CircuitError> {
        let is_compound = self.gates.gate(id)?.is_compound();

        let mut mapping = HashMap::new();
        let copy = self.copy_subtree(id, &mut mapping)?;
        // a primitive never takes wires along, not even one looping back into itself
        let rewired = if is_compound {
            self.rewire_copy(id, &mapping)?
        } else {
            0
        };

        self.top_level.push(copy);
        self.select_only(copy);
        info!(
            "Cloned gate {} as {} ({} gates, {} internal wires)",
            id,
            copy,
            mapping.len(),
            rewired
        );
        Ok(copy)
    }

    /// Copy `id` and its descendants, recording each original -> copy pair
    fn copy_subtree(
        &mut self,
        id: GateId,
        mapping: &mut HashMap<GateId, GateId>,
    ) -> Result<GateId, CircuitError> {
        let offset = self.config.clone_offset;
        let original = self.gates.gate(id)?;
        let children = original.children().to_vec();
        let copy = original.duplicate(self.gates.next_id(), offset);
        let copy_id = self.gates.insert(copy);
        mapping.insert(id, copy_id);

        if children.is_empty() {
            return Ok(copy_id);
        }

        let mut copies = Vec::with_capacity(children.len());
        for child in children {
            let child_copy = self.copy_subtree(child, mapping)?;
            self.gates
                .gate_mut(child_copy)?
                .set_owner(Owner::Compound(copy_id));
            copies.push(child_copy);
        }

        let bounds = self.gates.bounds_of(&copies);
        let gate = self.gates.gate_mut(copy_id)?;
        if let Some(bounds) = bounds {
            gate.set_geometry(bounds);
        }
        if let Some(slot) = gate.children_mut() {
            *slot = copies;
        }
        Ok(copy_id)
    }

    /// Recreate the wires internal to the copied subtree. Returns how many were made.
    fn rewire_copy(
        &mut self,
        root: GateId,
        mapping: &HashMap<GateId, GateId>,
    ) -> Result<usize, CircuitError> {
        let mut internal = Vec::new();
        for original in self.gates.subtree(root) {
            let gate = self.gates.gate(original)?;
            let Some(to_copy) = mapping.get(&original) else {
                continue;
            };
            for (index, pin) in gate.pins().iter().enumerate() {
                let Some(wire) = pin.inbound().and_then(|w| self.wires.get(w)) else {
                    continue;
                };
                let Some(from_copy) = mapping.get(&wire.from.gate) else {
                    continue;
                };
                let from = PinRef::new(*from_copy, wire.from.index);
                let to = PinRef::new(*to_copy, index);
                internal.push((from, to));
            }
        }

        for (from, to) in &internal {
            self.attach_wire(*from, *to)?;
        }
        Ok(internal.len())
    }
}
