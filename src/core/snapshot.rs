use crate::core::circuit::Circuit;
use crate::core::gates::{Gate, GateKind, PinDirection};
use crate::core::types::{GateId, PinRef, Point, Rect};
use serde::Serialize;

/// Read-only view of a circuit for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitSnapshot {
    /// Top-level gates in order, compounds carrying their children
    pub gates: Vec<GateSnapshot>,
    pub wires: Vec<WireSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateSnapshot {
    pub id: GateId,
    pub kind: GateKind,
    pub geometry: Rect,
    pub selected: bool,
    /// Source voltage or lamp lit state
    pub voltage: Option<bool>,
    pub pins: Vec<PinSnapshot>,
    pub children: Vec<GateSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinSnapshot {
    pub direction: PinDirection,
    pub position: Point,
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireSnapshot {
    pub from: PinRef,
    pub to: PinRef,
    pub start: Point,
    pub end: Point,
}

impl CircuitSnapshot {
    /// Find a gate anywhere in the snapshot
    pub fn find(&self, id: GateId) -> Option<&GateSnapshot> {
        fn search(gates: &[GateSnapshot], id: GateId) -> Option<&GateSnapshot> {
            gates.iter().find_map(|g| {
                if g.id == id {
                    Some(g)
                } else {
                    search(&g.children, id)
                }
            })
        }
        search(&self.gates, id)
    }
}

impl Circuit {
    /// Capture geometry, pins, selection, and voltages of every gate.
    ///
    /// Children of a compound are reported with the compound's selection.
    pub fn snapshot(&self) -> CircuitSnapshot {
        let gates = self
            .top_level
            .iter()
            .filter_map(|id| self.gates.get(*id))
            .map(|gate| self.gate_snapshot(gate, gate.selected()))
            .collect();

        let wires = self
            .wires
            .iter()
            .filter_map(|(_, wire)| {
                let start = self.gates.pin(wire.from).ok()?.position();
                let end = self.gates.pin(wire.to).ok()?.position();
                Some(WireSnapshot {
                    from: wire.from,
                    to: wire.to,
                    start,
                    end,
                })
            })
            .collect();

        CircuitSnapshot { gates, wires }
    }

    fn gate_snapshot(&self, gate: &Gate, selected: bool) -> GateSnapshot {
        GateSnapshot {
            id: gate.id(),
            kind: gate.kind(),
            geometry: gate.geometry(),
            selected,
            voltage: gate.voltage(),
            pins: gate
                .pins()
                .iter()
                .map(|pin| PinSnapshot {
                    direction: pin.direction(),
                    position: pin.position(),
                    connected: pin.is_connected(),
                })
                .collect(),
            children: gate
                .children()
                .iter()
                .filter_map(|child| self.gates.get(*child))
                .map(|child| self.gate_snapshot(child, selected))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reports_state() {
        let mut circuit = Circuit::new();
        let src = circuit.place(GateKind::InputSource, 0, 0).unwrap();
        let lamp = circuit.place(GateKind::OutputLamp, 100, 0).unwrap();
        circuit.connect(src.pin(0), lamp.pin(0)).unwrap();
        circuit.switch_voltage(src).unwrap();
        circuit.evaluate_all().unwrap();
        let comp = circuit.group_into_compound(&[src, lamp]).unwrap();

        let snapshot = circuit.snapshot();
        assert_eq!(snapshot.gates.len(), 1);
        let compound = &snapshot.gates[0];
        assert_eq!(compound.id, comp);
        assert!(compound.pins.is_empty());
        assert!(compound.children.iter().all(|c| c.selected));

        let lamp_view = snapshot.find(lamp).unwrap();
        assert_eq!(lamp_view.voltage, Some(true));
        assert!(lamp_view.pins[0].connected);

        assert_eq!(snapshot.wires.len(), 1);
        assert_eq!(snapshot.wires[0].start, Point::new(30, 10));
        assert_eq!(snapshot.wires[0].end, Point::new(90, 10));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut circuit = Circuit::new();
        circuit.place(GateKind::And, 10, 10).unwrap();
        let json = serde_json::to_value(circuit.snapshot()).unwrap();
        assert_eq!(json["gates"][0]["kind"], "And");
        assert_eq!(json["gates"][0]["geometry"]["left"], 10);
        assert_eq!(json["gates"][0]["pins"].as_array().unwrap().len(), 3);
    }
}
