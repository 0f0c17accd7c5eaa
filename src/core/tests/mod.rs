mod clone_tests;

use crate::core::circuit::Circuit;
use crate::core::gates::GateKind;
use crate::core::types::GateId;

/// Installs a test logger once; repeated calls are no-ops
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two input sources wired into a two-input gate
pub(crate) fn two_input_fixture(kind: GateKind) -> (Circuit, GateId, GateId, GateId) {
    let mut circuit = Circuit::new();
    let a = circuit.place(GateKind::InputSource, 0, 0).unwrap();
    let b = circuit.place(GateKind::InputSource, 0, 60).unwrap();
    let gate = circuit.place(kind, 100, 20).unwrap();
    circuit.connect(a.pin(0), gate.pin(0)).unwrap();
    circuit.connect(b.pin(0), gate.pin(1)).unwrap();
    (circuit, a, b, gate)
}

/// Set an input source to `value`, toggling only when needed
pub(crate) fn set_source(circuit: &mut Circuit, source: GateId, value: bool) {
    if circuit.voltage(source).unwrap() != Some(value) {
        circuit.switch_voltage(source).unwrap();
    }
}
