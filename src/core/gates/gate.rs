use super::layout::GateKind;
use super::pin::Pin;
use crate::core::errors::CircuitError;
use crate::core::types::{GateId, Owner, Point, Rect};

/// Kind-specific state of a gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateVariant {
    And,
    Or,
    Not,
    /// Signal source toggled by the user
    InputSource { voltage: bool },
    /// Indicator caching the result of its last evaluation
    OutputLamp { voltage: bool },
    /// Ordered children forming a sub-circuit
    Compound { children: Vec<GateId> },
}

impl GateVariant {
    fn fresh(kind: GateKind) -> Self {
        match kind {
            GateKind::And => GateVariant::And,
            GateKind::Or => GateVariant::Or,
            GateKind::Not => GateVariant::Not,
            GateKind::InputSource => GateVariant::InputSource { voltage: false },
            GateKind::OutputLamp => GateVariant::OutputLamp { voltage: false },
            GateKind::Compound => GateVariant::Compound { children: Vec::new() },
        }
    }

    pub fn kind(&self) -> GateKind {
        match self {
            GateVariant::And => GateKind::And,
            GateVariant::Or => GateKind::Or,
            GateVariant::Not => GateKind::Not,
            GateVariant::InputSource { .. } => GateKind::InputSource,
            GateVariant::OutputLamp { .. } => GateKind::OutputLamp,
            GateVariant::Compound { .. } => GateKind::Compound,
        }
    }
}

/// A positioned logic unit with a fixed set of pins
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    id: GateId,
    variant: GateVariant,
    geometry: Rect,
    pins: Vec<Pin>,
    selected: bool,
    owner: Owner,
}

impl Gate {
    /// Build a gate of `kind` with its top-left corner at (x, y) and unwired pins
    pub(crate) fn new(id: GateId, kind: GateKind, x: i32, y: i32) -> Self {
        let layout = kind.layout();
        let pins = layout
            .pins
            .iter()
            .map(|spec| Pin::new(id, spec.direction, spec.offset))
            .collect();

        let mut gate = Self {
            id,
            variant: GateVariant::fresh(kind),
            geometry: Rect::new(0, 0, layout.width, layout.height),
            pins,
            // gates start out selected, as when they have just been dropped in
            selected: true,
            owner: Owner::TopLevel,
        };
        gate.move_to(x, y);
        gate
    }

    /// Build a compound over already-allocated children
    pub(crate) fn compound(id: GateId, children: Vec<GateId>, bounds: Rect) -> Self {
        Self {
            id,
            variant: GateVariant::Compound { children },
            geometry: bounds,
            pins: Vec::new(),
            selected: true,
            owner: Owner::TopLevel,
        }
    }

    pub fn id(&self) -> GateId {
        self.id
    }

    pub fn kind(&self) -> GateKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &GateVariant {
        &self.variant
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.variant, GateVariant::Compound { .. })
    }

    pub fn is_lamp(&self) -> bool {
        matches!(self.variant, GateVariant::OutputLamp { .. })
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn left(&self) -> i32 {
        self.geometry.left
    }

    pub fn top(&self) -> i32 {
        self.geometry.top
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pin(&self, index: usize) -> Option<&Pin> {
        self.pins.get(index)
    }

    pub(crate) fn pin_mut(&mut self, index: usize) -> Option<&mut Pin> {
        self.pins.get_mut(index)
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Owner) {
        self.owner = owner;
    }

    /// Children of a compound, in order; empty for every other kind
    pub fn children(&self) -> &[GateId] {
        match &self.variant {
            GateVariant::Compound { children } => children,
            _ => &[],
        }
    }

    /// Stored voltage of a source or lamp
    pub fn voltage(&self) -> Option<bool> {
        match self.variant {
            GateVariant::InputSource { voltage } | GateVariant::OutputLamp { voltage } => {
                Some(voltage)
            }
            _ => None,
        }
    }

    /// True iff every input pin has an inbound wire
    ///
    /// Only this gate is checked; upstream completeness is discovered during evaluation.
    pub fn connected_input_pins(&self) -> bool {
        self.pins.iter().filter(|p| p.is_input()).all(|p| p.is_connected())
    }

    /// Move the body to (x, y) and recompute every pin position.
    /// Compound children are translated by the arena, not here.
    pub(crate) fn move_to(&mut self, x: i32, y: i32) {
        self.geometry.left = x;
        self.geometry.top = y;
        let top_left = Point::new(x, y);
        for pin in &mut self.pins {
            pin.place_relative_to(top_left);
        }
    }

    pub(crate) fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    /// Fresh copy of a primitive gate displaced by `offset`. No wiring is copied.
    /// A compound comes back childless; its children are copied by the graph copier.
    pub(crate) fn duplicate(&self, id: GateId, offset: i32) -> Gate {
        let x = self.left().saturating_add(offset);
        let y = self.top().saturating_add(offset);
        match self.kind() {
            GateKind::Compound => {
                let bounds = Rect::new(x, y, self.geometry.width, self.geometry.height);
                Gate::compound(id, Vec::new(), bounds)
            }
            kind => Gate::new(id, kind, x, y),
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<GateId>> {
        match &mut self.variant {
            GateVariant::Compound { children } => Some(children),
            _ => None,
        }
    }

    /// Body hit-test for primitives. Compounds are hit through their children.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_compound() && self.geometry.contains(x, y)
    }

    /// Index of the first pin within `radius` of (x, y)
    pub fn pin_index_at(&self, x: i32, y: i32, radius: i32) -> Option<usize> {
        self.pins.iter().position(|p| p.is_mouse_on(x, y, radius))
    }

    /// Toggle the voltage of an input source
    pub(crate) fn switch_voltage(&mut self) -> Result<bool, CircuitError> {
        match &mut self.variant {
            GateVariant::InputSource { voltage } => {
                *voltage = !*voltage;
                Ok(*voltage)
            }
            _ => Err(CircuitError::NotAnInputSource(self.id)),
        }
    }

    pub(crate) fn set_lamp_voltage(&mut self, value: bool) {
        if let GateVariant::OutputLamp { voltage } = &mut self.variant {
            *voltage = value;
        }
    }
}
