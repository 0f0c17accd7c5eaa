pub mod graph_copy;

use crate::core::builder::CompoundBuilder;
use crate::core::config::CircuitConfig;
use crate::core::connections::{ConnectionValidator, Wire, WireTable};
use crate::core::errors::CircuitError;
use crate::core::execution::{CircuitObserver, Evaluator};
use crate::core::gates::{Gate, GateArena, GateKind};
use crate::core::types::{GateId, Owner, PinRef, WireId};
use log::{debug, warn};

/// The in-memory circuit: every gate, every wire, and the ordered top-level list
///
/// All operations run to completion synchronously. Failing operations return
/// a [`CircuitError`] and leave the circuit untouched.
pub struct Circuit {
    pub(crate) config: CircuitConfig,
    pub(crate) gates: GateArena,
    pub(crate) wires: WireTable,
    /// Gates not owned by any compound, in placement order
    pub(crate) top_level: Vec<GateId>,
    observers: Vec<Box<dyn CircuitObserver>>,
}

impl Circuit {
    /// Create an empty circuit with the default configuration
    pub fn new() -> Self {
        Self::with_config(CircuitConfig::default())
    }

    pub fn with_config(config: CircuitConfig) -> Self {
        Self {
            config,
            gates: GateArena::new(),
            wires: WireTable::new(),
            top_level: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// Add an observer for diagnostics
    pub fn add_observer(&mut self, observer: Box<dyn CircuitObserver>) {
        self.observers.push(observer);
    }

    pub fn gates(&self) -> &GateArena {
        &self.gates
    }

    pub fn wires(&self) -> &WireTable {
        &self.wires
    }

    pub fn top_level(&self) -> &[GateId] {
        &self.top_level
    }

    pub fn gate(&self, id: GateId) -> Result<&Gate, CircuitError> {
        self.gates.gate(id)
    }

    /// Stored voltage of a source or lamp; `None` for other kinds
    pub fn voltage(&self, id: GateId) -> Result<Option<bool>, CircuitError> {
        Ok(self.gates.gate(id)?.voltage())
    }

    pub fn is_top_level(&self, id: GateId) -> bool {
        self.top_level.contains(&id)
    }

    /// Place a new primitive gate with its top-left corner at (x, y).
    ///
    /// The new gate is appended to the top level and becomes the only selection.
    pub fn place(&mut self, kind: GateKind, x: i32, y: i32) -> Result<GateId, CircuitError> {
        if kind == GateKind::Compound {
            return Err(CircuitError::CannotPlaceCompound);
        }
        let id = self.gates.allocate(kind, x, y);
        self.top_level.push(id);
        self.select_only(id);
        debug!("Placed {} gate {} at ({}, {})", kind, id, x, y);
        Ok(id)
    }

    /// Move a gate; compounds carry their children along
    pub fn move_to(&mut self, id: GateId, x: i32, y: i32) -> Result<(), CircuitError> {
        self.gates.move_to(id, x, y)?;
        debug!("Moved gate {} to ({}, {})", id, x, y);
        Ok(())
    }

    /// Connect an output pin to a free input pin
    pub fn connect(&mut self, from: PinRef, to: PinRef) -> Result<WireId, CircuitError> {
        if let Err(error) = ConnectionValidator::validate_connection(&self.gates, from, to) {
            warn!("Rejected connection {} -> {}: {}", from, to, error);
            for observer in &mut self.observers {
                observer.on_connection_rejected(&error);
            }
            return Err(error);
        }
        let id = self.attach_wire(from, to)?;
        debug!("Connected {} -> {}", from, to);
        Ok(id)
    }

    /// Connect two pins picked in either order, as when dragging a wire from
    /// an input back to an output
    pub fn connect_pins(&mut self, a: PinRef, b: PinRef) -> Result<WireId, CircuitError> {
        let (from, to) = ConnectionValidator::orient(&self.gates, a, b)?;
        self.connect(from, to)
    }

    /// Record a wire and register it as the target pin's inbound wire
    pub(crate) fn attach_wire(&mut self, from: PinRef, to: PinRef) -> Result<WireId, CircuitError> {
        let pin = self
            .gates
            .gate_mut(to.gate)?
            .pin_mut(to.index)
            .ok_or(CircuitError::PinNotFound(to))?;
        let id = self.wires.add(Wire::new(from, to));
        pin.attach(id);
        Ok(id)
    }

    /// Toggle an input source, returning its new voltage
    pub fn switch_voltage(&mut self, id: GateId) -> Result<bool, CircuitError> {
        let voltage = self.gates.gate_mut(id)?.switch_voltage()?;
        debug!("Input source {} switched to {}", id, voltage);
        Ok(voltage)
    }

    /// Evaluate one gate.
    ///
    /// Lamps store the computed voltage. Compounds refresh the lamps among
    /// their direct children and always return `true`. Nested compounds are
    /// not descended into.
    pub fn evaluate(&mut self, id: GateId) -> Result<bool, CircuitError> {
        let gate = self.gates.gate(id)?;
        if gate.is_compound() {
            let lamps = self.direct_lamps(id);
            self.refresh_lamps(&lamps)?;
            return Ok(true);
        }
        if gate.is_lamp() {
            self.refresh_lamps(&[id])?;
            return Ok(self.gates.gate(id)?.voltage().unwrap_or(false));
        }
        let mut evaluator = Evaluator::new(&self.gates, &self.wires, &mut self.observers[..]);
        evaluator.evaluate(id)
    }

    /// Evaluate every top-level compound and lamp in top-level order.
    ///
    /// Returns how many of them were evaluated. Stops at the first error;
    /// lamps refreshed before it keep their new voltage.
    pub fn evaluate_all(&mut self) -> Result<usize, CircuitError> {
        let mut roots = 0;
        let mut lamps = Vec::new();
        for id in &self.top_level {
            let gate = self.gates.gate(*id)?;
            if gate.is_compound() {
                lamps.extend(self.direct_lamps(*id));
                roots += 1;
            } else if gate.is_lamp() {
                lamps.push(*id);
                roots += 1;
            }
        }
        self.refresh_lamps(&lamps)?;
        debug!("Evaluated {} roots, {} lamps", roots, lamps.len());
        Ok(roots)
    }

    fn direct_lamps(&self, compound: GateId) -> Vec<GateId> {
        self.gates
            .get(compound)
            .map(|gate| {
                gate.children()
                    .iter()
                    .copied()
                    .filter(|child| self.gates.get(*child).is_some_and(|g| g.is_lamp()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Recompute and store the voltage of each lamp, sharing one evaluation pass
    fn refresh_lamps(&mut self, lamps: &[GateId]) -> Result<(), CircuitError> {
        let mut updates = Vec::with_capacity(lamps.len());
        let outcome = {
            let mut evaluator = Evaluator::new(&self.gates, &self.wires, &mut self.observers[..]);
            lamps.iter().try_for_each(|lamp| {
                let voltage = evaluator.evaluate(*lamp)?;
                updates.push((*lamp, voltage));
                Ok::<(), CircuitError>(())
            })
        };

        for (lamp, voltage) in updates {
            self.gates.gate_mut(lamp)?.set_lamp_voltage(voltage);
            for observer in &mut self.observers {
                observer.on_lamp_updated(lamp, voltage);
            }
        }
        outcome
    }

    /// Group top-level gates into a new compound, flattening compounds one level
    pub fn group_into_compound(&mut self, handles: &[GateId]) -> Result<GateId, CircuitError> {
        CompoundBuilder::new().extend(handles.iter().copied()).build(self)
    }

    /// Group every selected top-level gate
    pub fn group_selection(&mut self) -> Result<GateId, CircuitError> {
        let selected = self.selected();
        self.group_into_compound(&selected)
    }

    /// First top-level gate under (x, y)
    pub fn hit_test(&self, x: i32, y: i32) -> Option<GateId> {
        self.top_level
            .iter()
            .copied()
            .find(|id| self.gates.is_mouse_on(*id, x, y))
    }

    /// First pin near (x, y), searching top-level gates in order and descending into compounds
    pub fn pin_at(&self, x: i32, y: i32) -> Option<PinRef> {
        let radius = self.config.pin_hit_radius;
        self.top_level
            .iter()
            .find_map(|id| self.gates.selected_pin(*id, x, y, radius))
    }

    pub fn select(&mut self, id: GateId) -> Result<(), CircuitError> {
        self.gates.gate_mut(id)?.set_selected(true);
        Ok(())
    }

    pub fn deselect(&mut self, id: GateId) -> Result<(), CircuitError> {
        self.gates.gate_mut(id)?.set_selected(false);
        Ok(())
    }

    pub fn is_selected(&self, id: GateId) -> Result<bool, CircuitError> {
        Ok(self.gates.gate(id)?.selected())
    }

    pub fn clear_selection(&mut self) {
        for id in &self.top_level {
            if let Some(gate) = self.gates.get_mut(*id) {
                gate.set_selected(false);
            }
        }
    }

    /// Make `id` the only selected top-level gate
    pub(crate) fn select_only(&mut self, id: GateId) {
        self.clear_selection();
        if let Some(gate) = self.gates.get_mut(id) {
            gate.set_selected(true);
        }
    }

    /// Selected top-level gates in top-level order
    pub fn selected(&self) -> Vec<GateId> {
        self.top_level
            .iter()
            .copied()
            .filter(|id| self.gates.get(*id).is_some_and(|g| g.selected()))
            .collect()
    }

    /// Move `children` into a fresh compound appended to the top level.
    ///
    /// `absorbed` are the top-level gates being replaced; absorbed compounds are
    /// destroyed once their children have been taken over.
    pub(crate) fn absorb(&mut self, absorbed: &[GateId], children: Vec<GateId>) -> Result<GateId, CircuitError> {
        let bounds = self.gates.bounds_of(&children).ok_or(CircuitError::EmptyCompound)?;

        self.top_level.retain(|id| !absorbed.contains(id));
        for id in absorbed {
            if self.gates.get(*id).is_some_and(|g| g.is_compound()) {
                self.gates.remove(*id);
            }
        }

        let id = self.gates.next_id();
        self.gates.insert(Gate::compound(id, children.clone(), bounds));
        for child in children {
            self.gates.gate_mut(child)?.set_owner(Owner::Compound(id));
        }
        self.top_level.push(id);
        self.select_only(id);
        Ok(id)
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}
