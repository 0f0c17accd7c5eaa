use serde::Serialize;

/// Stable handle of a gate inside a circuit's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GateId(pub(crate) usize);

impl GateId {
    /// Get the raw arena index
    pub fn index(&self) -> usize {
        self.0
    }

    /// Create a handle for one of this gate's pins
    pub fn pin(&self, index: usize) -> PinRef {
        PinRef { gate: *self, index }
    }
}

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Handle of a wire in the circuit's wire table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WireId(pub(crate) usize);

impl WireId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Handle of a pin: the owning gate plus the pin's index in that gate's pin list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PinRef {
    pub gate: GateId,
    pub index: usize,
}

impl PinRef {
    pub fn new(gate: GateId, index: usize) -> Self {
        Self { gate, index }
    }
}

impl std::fmt::Display for PinRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.gate, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_by(&self, other: Point) -> Point {
        Point::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }

    /// Squared euclidean distance, which is enough for radius checks
    pub fn distance_squared(&self, x: i32, y: i32) -> i64 {
        let dx = x as i64 - self.x as i64;
        let dy = y as i64 - self.y as i64;
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

/// Axis-aligned body of a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.left <= x && x < self.right() && self.top <= y && y < self.bottom()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }
}

/// The collection a gate currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Owner {
    TopLevel,
    Compound(GateId),
}
