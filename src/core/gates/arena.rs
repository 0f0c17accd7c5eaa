use super::gate::Gate;
use super::layout::GateKind;
use crate::core::errors::CircuitError;
use crate::core::types::{GateId, Owner, PinRef, Rect};

/// Storage for every gate of a circuit, addressed by stable handles
///
/// Slots are never reused, so a handle keeps naming the same gate for the
/// lifetime of the arena even after other gates are destroyed.
#[derive(Debug, Default, Clone)]
pub struct GateArena {
    slots: Vec<Option<Gate>>,
}

impl GateArena {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Reserve the handle the next inserted gate will receive
    pub(crate) fn next_id(&self) -> GateId {
        GateId(self.slots.len())
    }

    pub(crate) fn insert(&mut self, gate: Gate) -> GateId {
        let id = gate.id();
        debug_assert_eq!(id, self.next_id());
        self.slots.push(Some(gate));
        id
    }

    pub(crate) fn allocate(&mut self, kind: GateKind, x: i32, y: i32) -> GateId {
        let id = self.next_id();
        self.insert(Gate::new(id, kind, x, y))
    }

    pub(crate) fn remove(&mut self, id: GateId) -> Option<Gate> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: GateId) -> Option<&Gate> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: GateId) -> Option<&mut Gate> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn gate(&self, id: GateId) -> Result<&Gate, CircuitError> {
        self.get(id).ok_or(CircuitError::GateNotFound(id))
    }

    pub(crate) fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate, CircuitError> {
        self.get_mut(id).ok_or(CircuitError::GateNotFound(id))
    }

    pub fn contains(&self, id: GateId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live gates, nested ones included
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gate> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Look up a pin, failing with the most specific error
    pub fn pin(&self, pin: PinRef) -> Result<&super::pin::Pin, CircuitError> {
        self.gate(pin.gate)?
            .pin(pin.index)
            .ok_or(CircuitError::PinNotFound(pin))
    }

    /// The gate and all its descendants in pre-order, children in their stored order
    pub fn subtree(&self, root: GateId) -> Vec<GateId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(gate) = self.get(id) else { continue };
            order.push(id);
            stack.extend(gate.children().iter().rev().copied());
        }
        order
    }

    /// Bounding box of the given gates' bodies
    pub(crate) fn bounds_of(&self, ids: &[GateId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(|g| g.geometry())
            .reduce(|acc, r| acc.union(&r))
    }

    /// Recompute the geometry of every compound enclosing `id`
    pub(crate) fn refresh_ancestors(&mut self, id: GateId) {
        let mut current = self.get(id).map(|g| g.owner());
        while let Some(Owner::Compound(parent)) = current {
            let children = self.get(parent).map(|g| g.children().to_vec()).unwrap_or_default();
            if let Some(bounds) = self.bounds_of(&children) {
                if let Some(gate) = self.get_mut(parent) {
                    gate.set_geometry(bounds);
                }
            }
            current = self.get(parent).map(|g| g.owner());
        }
    }

    /// Move a gate so its top-left corner lands on (x, y).
    ///
    /// A compound translates every child by the same delta, preserving layout.
    pub(crate) fn move_to(&mut self, id: GateId, x: i32, y: i32) -> Result<(), CircuitError> {
        self.translate_to(id, x, y)?;
        self.refresh_ancestors(id);
        Ok(())
    }

    fn translate_to(&mut self, id: GateId, x: i32, y: i32) -> Result<(), CircuitError> {
        let gate = self.gate(id)?;
        if !gate.is_compound() {
            self.gate_mut(id)?.move_to(x, y);
            return Ok(());
        }

        // deltas can exceed i32 at the extremes; children clamp to the canvas range
        let dx = x as i64 - gate.left() as i64;
        let dy = y as i64 - gate.top() as i64;
        let shift = |v: i32, d: i64| (v as i64 + d).clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let children = gate.children().to_vec();
        for child in children {
            let (left, top) = {
                let c = self.gate(child)?;
                (c.left(), c.top())
            };
            self.translate_to(child, shift(left, dx), shift(top, dy))?;
        }
        self.gate_mut(id)?.move_to(x, y);
        Ok(())
    }

    /// Body hit-test; a compound is hit when any of its children is
    pub fn is_mouse_on(&self, id: GateId, x: i32, y: i32) -> bool {
        match self.get(id) {
            Some(gate) if gate.is_compound() => {
                gate.children().iter().any(|child| self.is_mouse_on(*child, x, y))
            }
            Some(gate) => gate.contains(x, y),
            None => false,
        }
    }

    /// First pin near (x, y) on this gate, searching compound children in order
    pub fn selected_pin(&self, id: GateId, x: i32, y: i32, radius: i32) -> Option<PinRef> {
        let gate = self.get(id)?;
        if gate.is_compound() {
            return gate
                .children()
                .iter()
                .find_map(|child| self.selected_pin(*child, x, y, radius));
        }
        gate.pin_index_at(x, y, radius).map(|index| id.pin(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point;

    fn compound_of(arena: &mut GateArena, children: Vec<GateId>) -> GateId {
        let id = arena.next_id();
        let bounds = arena.bounds_of(&children).unwrap();
        arena.insert(Gate::compound(id, children.clone(), bounds));
        for child in children {
            arena.get_mut(child).unwrap().set_owner(Owner::Compound(id));
        }
        id
    }

    #[test]
    fn test_handles_survive_removal() {
        let mut arena = GateArena::new();
        let a = arena.allocate(GateKind::And, 0, 0);
        let b = arena.allocate(GateKind::Or, 0, 0);
        arena.remove(a);
        assert!(!arena.contains(a));
        assert_eq!(arena.gate(b).unwrap().kind(), GateKind::Or);
        let c = arena.allocate(GateKind::Not, 0, 0);
        assert_ne!(c, a);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.gate(a), Err(CircuitError::GateNotFound(a)));
    }

    #[test]
    fn test_compound_move_preserves_layout() {
        let mut arena = GateArena::new();
        let a = arena.allocate(GateKind::InputSource, 10, 10);
        let b = arena.allocate(GateKind::OutputLamp, 100, 60);
        let comp = compound_of(&mut arena, vec![a, b]);
        assert_eq!(arena.gate(comp).unwrap().geometry(), Rect::new(10, 10, 110, 70));

        arena.move_to(comp, 210, 10).unwrap();
        assert_eq!(arena.gate(a).unwrap().geometry().top_left(), Point::new(210, 10));
        assert_eq!(arena.gate(b).unwrap().geometry().top_left(), Point::new(300, 60));
        assert_eq!(arena.gate(comp).unwrap().geometry(), Rect::new(210, 10, 110, 70));
        assert_eq!(arena.gate(b).unwrap().pins()[0].position(), Point::new(290, 70));
    }

    #[test]
    fn test_moving_a_child_refreshes_enclosing_bounds() {
        let mut arena = GateArena::new();
        let a = arena.allocate(GateKind::InputSource, 0, 0);
        let b = arena.allocate(GateKind::InputSource, 50, 0);
        let inner = compound_of(&mut arena, vec![a, b]);
        let c = arena.allocate(GateKind::OutputLamp, 0, 100);
        let outer = compound_of(&mut arena, vec![inner, c]);

        arena.move_to(b, 200, 0).unwrap();
        assert_eq!(arena.gate(inner).unwrap().geometry(), Rect::new(0, 0, 220, 20));
        assert_eq!(arena.gate(outer).unwrap().geometry(), Rect::new(0, 0, 220, 120));
    }

    #[test]
    fn test_move_to_extreme_coordinates_clamps() {
        let mut arena = GateArena::new();
        let a = arena.allocate(GateKind::InputSource, 0, 0);
        let b = arena.allocate(GateKind::OutputLamp, 100, 40);
        let comp = compound_of(&mut arena, vec![a, b]);

        arena.move_to(comp, i32::MAX - 10, i32::MIN).unwrap();
        assert_eq!(arena.gate(a).unwrap().geometry().top_left(), Point::new(i32::MAX - 10, i32::MIN));
        assert_eq!(arena.gate(b).unwrap().geometry().top_left(), Point::new(i32::MAX, i32::MIN + 40));
        assert_eq!(arena.gate(a).unwrap().pins()[0].position(), Point::new(i32::MAX, i32::MIN + 10));
        assert!(arena.is_mouse_on(comp, i32::MAX - 1, i32::MIN + 5));

        arena.move_to(comp, i32::MIN, i32::MAX).unwrap();
        assert_eq!(arena.gate(a).unwrap().geometry().top_left(), Point::new(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_subtree_is_preorder() {
        let mut arena = GateArena::new();
        let a = arena.allocate(GateKind::And, 0, 0);
        let b = arena.allocate(GateKind::Or, 0, 0);
        let inner = compound_of(&mut arena, vec![a, b]);
        let c = arena.allocate(GateKind::Not, 0, 0);
        let outer = compound_of(&mut arena, vec![c, inner]);
        assert_eq!(arena.subtree(outer), vec![outer, c, inner, a, b]);
    }

    #[test]
    fn test_hit_tests_descend_into_compounds() {
        let mut arena = GateArena::new();
        let a = arena.allocate(GateKind::And, 0, 0);
        let b = arena.allocate(GateKind::OutputLamp, 200, 0);
        let comp = compound_of(&mut arena, vec![a, b]);

        assert!(arena.is_mouse_on(comp, 5, 5));
        assert!(arena.is_mouse_on(comp, 205, 5));
        // inside the bounding box but between children
        assert!(!arena.is_mouse_on(comp, 120, 5));

        assert_eq!(arena.selected_pin(comp, 190, 10, 8), Some(b.pin(0)));
        assert_eq!(arena.selected_pin(comp, 50, 20, 8), Some(a.pin(2)));
        assert_eq!(arena.selected_pin(comp, 120, 100, 8), None);
    }
}
