/// Builds a half adder out of primitive gates, groups it, clones it, and
/// prints the lamp states for every input combination.
///
/// Run with `RUST_LOG=debug` to watch each gate being evaluated.
use csim::{Circuit, CompoundBuilder, GateId, GateKind};

struct HalfAdder {
    a: GateId,
    b: GateId,
    sum: GateId,
    carry: GateId,
    compound: GateId,
}

/// SUM = (A OR B) AND NOT (A AND B), CARRY = A AND B
fn build_half_adder(circuit: &mut Circuit) -> Result<HalfAdder, Box<dyn std::error::Error>> {
    let a = circuit.place(GateKind::InputSource, 0, 0)?;
    let b = circuit.place(GateKind::InputSource, 0, 80)?;
    let or = circuit.place(GateKind::Or, 80, 0)?;
    let and = circuit.place(GateKind::And, 80, 80)?;
    let not = circuit.place(GateKind::Not, 180, 80)?;
    let xor = circuit.place(GateKind::And, 300, 30)?;
    let sum = circuit.place(GateKind::OutputLamp, 400, 40)?;
    let carry = circuit.place(GateKind::OutputLamp, 400, 120)?;

    circuit.connect(a.pin(0), or.pin(0))?;
    circuit.connect(b.pin(0), or.pin(1))?;
    circuit.connect(a.pin(0), and.pin(0))?;
    circuit.connect(b.pin(0), and.pin(1))?;
    circuit.connect(and.pin(2), not.pin(0))?;
    circuit.connect(or.pin(2), xor.pin(0))?;
    circuit.connect(not.pin(1), xor.pin(1))?;
    circuit.connect(xor.pin(2), sum.pin(0))?;
    circuit.connect(and.pin(2), carry.pin(0))?;

    let compound = CompoundBuilder::new()
        .extend(circuit.top_level().iter().copied())
        .build(circuit)?;

    Ok(HalfAdder {
        a,
        b,
        sum,
        carry,
        compound,
    })
}

fn set(circuit: &mut Circuit, source: GateId, value: bool) -> Result<(), Box<dyn std::error::Error>> {
    if circuit.voltage(source)? != Some(value) {
        circuit.switch_voltage(source)?;
    }
    Ok(())
}

fn print_truth_table(circuit: &mut Circuit, adder: &HalfAdder, label: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} (compound {})", label, adder.compound);
    println!("  A B | SUM CARRY");
    for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
        set(circuit, adder.a, a)?;
        set(circuit, adder.b, b)?;
        circuit.evaluate(adder.compound)?;
        let sum = circuit.voltage(adder.sum)?.unwrap_or(false);
        let carry = circuit.voltage(adder.carry)?.unwrap_or(false);
        println!("  {} {} |  {}    {}", a as u8, b as u8, sum as u8, carry as u8);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut circuit = Circuit::new();
    let original = build_half_adder(&mut circuit)?;
    print_truth_table(&mut circuit, &original, "Half adder")?;

    // the clone's children line up with the original's, so look them up by position
    let copy = circuit.clone_gate(original.compound)?;
    let template = circuit.gate(original.compound)?.children().to_vec();
    let children = circuit.gate(copy)?.children().to_vec();
    let find = |id: GateId| -> Result<GateId, Box<dyn std::error::Error>> {
        template
            .iter()
            .position(|child| *child == id)
            .and_then(|index| children.get(index).copied())
            .ok_or_else(|| format!("gate {} is not part of the half adder", id).into())
    };
    let cloned = HalfAdder {
        a: find(original.a)?,
        b: find(original.b)?,
        sum: find(original.sum)?,
        carry: find(original.carry)?,
        compound: copy,
    };
    print_truth_table(&mut circuit, &cloned, "Cloned half adder")?;

    let evaluated = circuit.evaluate_all()?;
    println!("Re-evaluated {} top-level compounds and lamps", evaluated);
    let stats = circuit.wires().stats();
    println!("{} wires, max fan-out {}", stats.wires, stats.max_fan_out);
    println!("{}", serde_json::to_string_pretty(&circuit.snapshot())?);
    Ok(())
}
