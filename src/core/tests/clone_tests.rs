use super::init_logging;
use crate::core::circuit::Circuit;
use crate::core::config::CircuitConfig;
use crate::core::gates::GateKind;
use crate::core::types::{GateId, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Wires among `children`, expressed as (child index, pin index) endpoints
fn internal_wiring(circuit: &Circuit, children: &[GateId]) -> HashSet<((usize, usize), (usize, usize))> {
    let position = |id: GateId| children.iter().position(|c| *c == id);
    circuit
        .wires()
        .iter()
        .filter_map(|(_, wire)| {
            let from = position(wire.from.gate)?;
            let to = position(wire.to.gate)?;
            Some(((from, wire.from.index), (to, wire.to.index)))
        })
        .collect()
}

/// Place `count` random primitive gates and wire free inputs to random outputs
fn random_circuit(rng: &mut StdRng, count: usize) -> (Circuit, Vec<GateId>) {
    let mut circuit = Circuit::new();
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let kind = GateKind::PLACEABLE[rng.gen_range(0..GateKind::PLACEABLE.len())];
        let x = rng.gen_range(0..800);
        let y = rng.gen_range(0..600);
        placed.push(circuit.place(kind, x, y).unwrap());
    }

    let mut outputs = Vec::new();
    let mut inputs = Vec::new();
    for id in &placed {
        for (index, pin) in circuit.gate(*id).unwrap().pins().iter().enumerate() {
            if pin.is_output() {
                outputs.push(id.pin(index));
            } else {
                inputs.push(id.pin(index));
            }
        }
    }

    if !outputs.is_empty() {
        for input in inputs {
            if rng.gen_bool(0.6) {
                let from = outputs[rng.gen_range(0..outputs.len())];
                circuit.connect(from, input).unwrap();
            }
        }
    }
    (circuit, placed)
}

#[test]
fn test_clone_compound_preserves_children_and_wiring() {
    init_logging();
    let mut circuit = Circuit::new();
    let a = circuit.place(GateKind::InputSource, 0, 0).unwrap();
    let b = circuit.place(GateKind::InputSource, 0, 60).unwrap();
    let and = circuit.place(GateKind::And, 100, 20).unwrap();
    let lamp = circuit.place(GateKind::OutputLamp, 200, 30).unwrap();
    circuit.connect(a.pin(0), and.pin(0)).unwrap();
    circuit.connect(b.pin(0), and.pin(1)).unwrap();
    circuit.connect(and.pin(2), lamp.pin(0)).unwrap();
    let comp = circuit.group_into_compound(&[a, b, and, lamp]).unwrap();

    let copy = circuit.clone_gate(comp).unwrap();
    let originals = circuit.gate(comp).unwrap().children().to_vec();
    let copies = circuit.gate(copy).unwrap().children().to_vec();

    assert_eq!(copies.len(), 4);
    for (original, duplicate) in originals.iter().zip(&copies) {
        assert_ne!(original, duplicate);
        let original = circuit.gate(*original).unwrap();
        let duplicate = circuit.gate(*duplicate).unwrap();
        assert_eq!(original.kind(), duplicate.kind());
        assert_eq!(
            duplicate.geometry().top_left(),
            original.geometry().top_left().offset_by(Point::new(10, 10))
        );
    }
    assert_eq!(internal_wiring(&circuit, &originals), internal_wiring(&circuit, &copies));
    assert_eq!(circuit.wires().len(), 6);
    assert_eq!(circuit.top_level(), &[comp, copy]);
    assert_eq!(circuit.selected(), vec![copy]);

    // the copy works on its own
    circuit.switch_voltage(copies[0]).unwrap();
    circuit.switch_voltage(copies[1]).unwrap();
    circuit.evaluate(copy).unwrap();
    assert_eq!(circuit.voltage(copies[3]).unwrap(), Some(true));
    assert_eq!(circuit.voltage(lamp).unwrap(), Some(false));
}

#[test]
fn test_clone_of_clone_offsets_twice() {
    let mut circuit = Circuit::with_config(CircuitConfig::new().with_clone_offset(25));
    let not = circuit.place(GateKind::Not, 40, 40).unwrap();
    let first = circuit.clone_gate(not).unwrap();
    let second = circuit.clone_gate(first).unwrap();
    assert_eq!(circuit.gate(second).unwrap().geometry().top_left(), Point::new(90, 90));
    assert_eq!(circuit.top_level(), &[not, first, second]);
}

#[test]
fn test_clone_nested_compound_rewires_inner_levels() {
    let mut circuit = Circuit::new();
    let src = circuit.place(GateKind::InputSource, 0, 0).unwrap();
    let lamp = circuit.place(GateKind::OutputLamp, 100, 0).unwrap();
    circuit.connect(src.pin(0), lamp.pin(0)).unwrap();

    // inner holds the lamp; the source sits next to it in the outer compound
    let inner = circuit.group_into_compound(&[lamp]).unwrap();
    circuit.top_level.retain(|id| *id != inner);
    let wrapper = circuit.absorb(&[], vec![inner]).unwrap();
    let outer = circuit.group_into_compound(&[src, wrapper]).unwrap();

    let copy = circuit.clone_gate(outer).unwrap();
    let copies = circuit.gate(copy).unwrap().children().to_vec();
    let inner_copy = circuit.gate(copies[1]).unwrap();
    assert!(inner_copy.is_compound());
    let lamp_copy = inner_copy.children()[0];

    let inbound = circuit.gate(lamp_copy).unwrap().pins()[0].inbound().unwrap();
    assert_eq!(circuit.wires().get(inbound).unwrap().from, copies[0].pin(0));
    assert_eq!(circuit.gates().subtree(copy).len(), 4);
}

#[test]
fn test_random_compound_clones_are_isomorphic() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..25 {
        let count = rng.gen_range(1..12);
        let (mut circuit, placed) = random_circuit(&mut rng, count);
        let wires_before = circuit.wires().len();
        let comp = circuit.group_into_compound(&placed).unwrap();

        let copy = circuit.clone_gate(comp).unwrap();
        let originals = circuit.gate(comp).unwrap().children().to_vec();
        let copies = circuit.gate(copy).unwrap().children().to_vec();

        assert_eq!(originals, placed);
        assert_eq!(copies.len(), originals.len());
        let kinds = |ids: &[GateId]| -> Vec<GateKind> {
            ids.iter().map(|id| circuit.gate(*id).unwrap().kind()).collect()
        };
        assert_eq!(kinds(&originals), kinds(&copies));

        let wiring = internal_wiring(&circuit, &originals);
        assert_eq!(wiring.len(), wires_before);
        assert_eq!(internal_wiring(&circuit, &copies), wiring);
        assert_eq!(circuit.wires().len(), 2 * wires_before);
    }
}

#[test]
fn test_random_moves_keep_pin_offsets() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut circuit = Circuit::new();
    let placed: Vec<GateId> = GateKind::PLACEABLE
        .iter()
        .enumerate()
        .map(|(i, kind)| circuit.place(*kind, 100 * i as i32, 0).unwrap())
        .collect();
    let comp = circuit.group_into_compound(&placed[..2]).unwrap();

    for _ in 0..50 {
        let target = if rng.gen_bool(0.3) {
            comp
        } else {
            placed[rng.gen_range(2..placed.len())]
        };
        let x = rng.gen_range(-500..500);
        let y = rng.gen_range(-500..500);
        circuit.move_to(target, x, y).unwrap();
        assert_eq!(circuit.gate(target).unwrap().geometry().top_left(), Point::new(x, y));

        for id in circuit.gates().subtree(target) {
            let gate = circuit.gate(id).unwrap();
            for (pin, spec) in gate.pins().iter().zip(gate.kind().layout().pins) {
                assert_eq!(pin.offset(), spec.offset);
                assert_eq!(pin.position(), gate.geometry().top_left().offset_by(spec.offset));
            }
        }
    }

    // children move together, so their layout inside the compound is unchanged
    let first = circuit.gate(placed[0]).unwrap().geometry().top_left();
    let second = circuit.gate(placed[1]).unwrap().geometry().top_left();
    assert_eq!((second.x - first.x, second.y - first.y), (100, 0));
}
