use crate::core::types::{GateId, PinRef, WireId};
use serde::Serialize;
use std::collections::HashMap;

/// A directed edge from an output pin to an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Wire {
    pub from: PinRef,
    pub to: PinRef,
}

impl Wire {
    pub fn new(from: PinRef, to: PinRef) -> Self {
        Self { from, to }
    }
}

/// Wire storage for a circuit
///
/// Wires are only ever added. Each input pin is the target of at most one
/// wire; that pin holds the wire's handle as its inbound reference.
#[derive(Debug, Default, Clone)]
pub struct WireTable {
    wires: Vec<Wire>,
    /// Reverse mapping: target input pin -> the wire driving it
    by_target: HashMap<PinRef, WireId>,
}

impl WireTable {
    /// Create an empty wire table
    pub fn new() -> Self {
        Self {
            wires: Vec::new(),
            by_target: HashMap::new(),
        }
    }

    /// Record a wire. Callers must have validated it first.
    pub(crate) fn add(&mut self, wire: Wire) -> WireId {
        let id = WireId(self.wires.len());
        debug_assert!(!self.by_target.contains_key(&wire.to));
        self.by_target.insert(wire.to, id);
        self.wires.push(wire);
        id
    }

    pub fn get(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id.0)
    }

    /// The wire whose target is `pin`, if any
    pub fn driving(&self, pin: PinRef) -> Option<WireId> {
        self.by_target.get(&pin).copied()
    }

    /// Source pin feeding `pin`
    pub fn source_of(&self, pin: PinRef) -> Option<PinRef> {
        self.driving(pin).and_then(|id| self.get(id)).map(|w| w.from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter().enumerate().map(|(i, w)| (WireId(i), w))
    }

    /// Wires whose target pin belongs to one of `gates`
    pub fn targeting<'a>(&'a self, gates: &'a [GateId]) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.iter().filter(move |w| gates.contains(&w.to.gate))
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// Get connection statistics
    pub fn stats(&self) -> WireStats {
        let mut fan_out: HashMap<PinRef, usize> = HashMap::new();
        for wire in &self.wires {
            *fan_out.entry(wire.from).or_default() += 1;
        }
        WireStats {
            wires: self.wires.len(),
            driven_inputs: self.by_target.len(),
            driving_outputs: fan_out.len(),
            max_fan_out: fan_out.values().copied().max().unwrap_or(0),
        }
    }
}

/// Wire statistics for debugging
#[derive(Debug, PartialEq, Eq)]
pub struct WireStats {
    pub wires: usize,
    pub driven_inputs: usize,
    pub driving_outputs: usize,
    pub max_fan_out: usize,
}
