use crate::core::circuit::Circuit;
use crate::core::errors::CircuitError;
use crate::core::types::GateId;
use log::info;

/// Collects the gates that will make up a new compound
///
/// The builder is an ordinary value: start one, add gates, then `build` it
/// against the circuit. Nothing in the circuit changes until `build` succeeds.
#[derive(Debug, Default, Clone)]
pub struct CompoundBuilder {
    members: Vec<GateId>,
}

impl CompoundBuilder {
    /// Start an empty compound
    pub fn new() -> Self {
        Self { members: Vec::new() }
    }

    /// Add a gate, builder style
    pub fn with_gate(mut self, id: GateId) -> Self {
        self.add(id);
        self
    }

    /// Add several gates, builder style
    pub fn extend(mut self, ids: impl IntoIterator<Item = GateId>) -> Self {
        for id in ids {
            self.add(id);
        }
        self
    }

    /// Add a gate; adding the same gate twice has no further effect
    pub fn add(&mut self, id: GateId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    pub fn members(&self) -> &[GateId] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Absorb the collected gates into a new top-level compound.
    ///
    /// Members are taken in top-level order. A member that is itself a
    /// compound contributes its children, one level deep, and is destroyed.
    /// Every member must currently be a top-level gate.
    pub fn build(self, circuit: &mut Circuit) -> Result<GateId, CircuitError> {
        for id in &self.members {
            circuit.gate(*id)?;
            if !circuit.is_top_level(*id) {
                return Err(CircuitError::NotTopLevel(*id));
            }
        }

        let absorbed: Vec<GateId> = circuit
            .top_level()
            .iter()
            .copied()
            .filter(|id| self.members.contains(id))
            .collect();

        let mut children = Vec::new();
        for id in &absorbed {
            let gate = circuit.gate(*id)?;
            if gate.is_compound() {
                children.extend_from_slice(gate.children());
            } else {
                children.push(*id);
            }
        }
        if children.is_empty() {
            return Err(CircuitError::EmptyCompound);
        }

        let compound = circuit.absorb(&absorbed, children)?;
        info!(
            "Grouped {} gates into compound {} ({} children)",
            absorbed.len(),
            compound,
            circuit.gate(compound)?.children().len()
        );
        Ok(compound)
    }
}
