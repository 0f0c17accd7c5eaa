use super::pin::PinDirection;
use crate::core::types::Point;
use serde::Serialize;

/// The six gate variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GateKind {
    And,
    Or,
    Not,
    InputSource,
    OutputLamp,
    Compound,
}

impl GateKind {
    /// Kinds that can be placed directly onto the circuit
    pub const PLACEABLE: [GateKind; 5] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::InputSource,
        GateKind::OutputLamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::InputSource => "Input",
            GateKind::OutputLamp => "Lamp",
            GateKind::Compound => "Compound",
        }
    }

    /// Fixed body size and pin layout for this kind
    pub fn layout(&self) -> GateLayout {
        match self {
            GateKind::And => GateLayout {
                width: 40,
                height: 40,
                pins: &AND_PINS,
            },
            GateKind::Or => GateLayout {
                width: 50,
                height: 40,
                pins: &OR_PINS,
            },
            GateKind::Not => GateLayout {
                width: 40,
                height: 40,
                pins: &NOT_PINS,
            },
            GateKind::InputSource => GateLayout {
                width: 20,
                height: 20,
                pins: &SOURCE_PINS,
            },
            GateKind::OutputLamp => GateLayout {
                width: 20,
                height: 20,
                pins: &LAMP_PINS,
            },
            // derived from the children
            GateKind::Compound => GateLayout {
                width: 0,
                height: 0,
                pins: &[],
            },
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pin specification: direction and offset from the gate's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSpec {
    pub direction: PinDirection,
    pub offset: Point,
}

impl PinSpec {
    const fn input(x: i32, y: i32) -> Self {
        Self {
            direction: PinDirection::Input,
            offset: Point::new(x, y),
        }
    }

    const fn output(x: i32, y: i32) -> Self {
        Self {
            direction: PinDirection::Output,
            offset: Point::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GateLayout {
    pub width: i32,
    pub height: i32,
    pub pins: &'static [PinSpec],
}

impl GateLayout {
    pub fn input_count(&self) -> usize {
        self.pins.iter().filter(|p| p.direction.is_input()).count()
    }

    pub fn output_count(&self) -> usize {
        self.pins.iter().filter(|p| p.direction.is_output()).count()
    }
}

// Inputs stick out to the left of the body, outputs to the right.
const AND_PINS: [PinSpec; 3] = [
    PinSpec::input(-10, 10),
    PinSpec::input(-10, 30),
    PinSpec::output(50, 20),
];

const OR_PINS: [PinSpec; 3] = [
    PinSpec::input(-10, 10),
    PinSpec::input(-10, 40),
    PinSpec::output(80, 25),
];

const NOT_PINS: [PinSpec; 2] = [PinSpec::input(-20, 25), PinSpec::output(70, 25)];

const SOURCE_PINS: [PinSpec; 1] = [PinSpec::output(30, 10)];

const LAMP_PINS: [PinSpec; 1] = [PinSpec::input(-10, 10)];
