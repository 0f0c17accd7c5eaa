use crate::core::errors::CircuitError;
use crate::core::gates::GateKind;
use crate::core::types::GateId;

/// Observer trait for circuit diagnostics
///
/// Every method has an empty default so observers only implement what they
/// care about.
pub trait CircuitObserver {
    /// Called when a gate is evaluated while some of its input pins have no wire.
    /// The gate's output is taken as `false`.
    fn on_unconnected_inputs(&mut self, _gate: GateId, _kind: GateKind) {}

    /// Called when a connection attempt is rejected
    fn on_connection_rejected(&mut self, _error: &CircuitError) {}

    /// Called when evaluation reaches a gate that is already being evaluated
    fn on_cycle_detected(&mut self, _gate: GateId) {}

    /// Called after an output lamp stores a freshly evaluated voltage
    fn on_lamp_updated(&mut self, _gate: GateId, _voltage: bool) {}
}

/// Observer that keeps every notification, handy for inspection and tests
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DiagnosticLog {
    pub unconnected: Vec<(GateId, GateKind)>,
    pub rejected: Vec<CircuitError>,
    pub cycles: Vec<GateId>,
    pub lamp_updates: Vec<(GateId, bool)>,
}

impl CircuitObserver for DiagnosticLog {
    fn on_unconnected_inputs(&mut self, gate: GateId, kind: GateKind) {
        self.unconnected.push((gate, kind));
    }

    fn on_connection_rejected(&mut self, error: &CircuitError) {
        self.rejected.push(error.clone());
    }

    fn on_cycle_detected(&mut self, gate: GateId) {
        self.cycles.push(gate);
    }

    fn on_lamp_updated(&mut self, gate: GateId, voltage: bool) {
        self.lamp_updates.push((gate, voltage));
    }
}

/// Observer adapter that forwards into a shared log
///
/// Observers are owned by the circuit, so tests and UIs that want to read the
/// diagnostics back register one of these and keep the other handle.
#[derive(Debug, Default, Clone)]
pub struct SharedDiagnostics(pub std::rc::Rc<std::cell::RefCell<DiagnosticLog>>);

impl SharedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn snapshot(&self) -> DiagnosticLog {
        self.0.borrow().clone()
    }
}

impl CircuitObserver for SharedDiagnostics {
    fn on_unconnected_inputs(&mut self, gate: GateId, kind: GateKind) {
        self.0.borrow_mut().on_unconnected_inputs(gate, kind);
    }

    fn on_connection_rejected(&mut self, error: &CircuitError) {
        self.0.borrow_mut().on_connection_rejected(error);
    }

    fn on_cycle_detected(&mut self, gate: GateId) {
        self.0.borrow_mut().on_cycle_detected(gate);
    }

    fn on_lamp_updated(&mut self, gate: GateId, voltage: bool) {
        self.0.borrow_mut().on_lamp_updated(gate, voltage);
    }
}
