use crate::core::types::{GateId, Point, WireId};
use serde::Serialize;

/// Direction of a pin relative to its gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PinDirection {
    /// Receives a signal through at most one inbound wire
    Input,
    /// Drives any number of wires
    Output,
}

impl PinDirection {
    /// Check if a wire may run from a pin of this direction to a pin of `other`
    pub fn can_connect_to(&self, other: &PinDirection) -> bool {
        matches!((self, other), (PinDirection::Output, PinDirection::Input))
    }

    pub fn is_input(&self) -> bool {
        *self == PinDirection::Input
    }

    pub fn is_output(&self) -> bool {
        *self == PinDirection::Output
    }
}

/// A connection point owned by exactly one gate
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    owner: GateId,
    direction: PinDirection,
    /// Fixed displacement from the owning gate's top-left corner
    offset: Point,
    position: Point,
    inbound: Option<WireId>,
}

impl Pin {
    pub(crate) fn new(owner: GateId, direction: PinDirection, offset: Point) -> Self {
        Self {
            owner,
            direction,
            offset,
            position: offset,
            inbound: None,
        }
    }

    pub fn owner(&self) -> GateId {
        self.owner
    }

    pub fn direction(&self) -> PinDirection {
        self.direction
    }

    pub fn is_input(&self) -> bool {
        self.direction.is_input()
    }

    pub fn is_output(&self) -> bool {
        self.direction.is_output()
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Absolute position of the pin tip
    pub fn position(&self) -> Point {
        self.position
    }

    /// The wire feeding this pin; always `None` for output pins
    pub fn inbound(&self) -> Option<WireId> {
        self.inbound
    }

    pub fn is_connected(&self) -> bool {
        self.inbound.is_some()
    }

    pub(crate) fn place_relative_to(&mut self, top_left: Point) {
        self.position = top_left.offset_by(self.offset);
    }

    /// Attach the inbound wire. Callers must have validated direction and occupancy.
    pub(crate) fn attach(&mut self, wire: WireId) {
        debug_assert!(self.is_input() && self.inbound.is_none());
        self.inbound = Some(wire);
    }

    /// Check if (x, y) lies within `radius` of the pin
    pub fn is_mouse_on(&self, x: i32, y: i32, radius: i32) -> bool {
        let r = radius as i64;
        self.position.distance_squared(x, y) <= r * r
    }
}
