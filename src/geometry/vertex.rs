use geo::Coord;

/// Working vertex of one triangulation run, identified by its index in the run's vertex list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, value: f64) -> Vertex {
        Vertex { x, y, value }
    }

    pub fn coord(&self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.value.is_finite()
    }

    pub fn squared_euclidean_distance(&self, other: &Vertex) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Exact coordinate identity, -0.0 and 0.0 are the same key
    pub fn position_key(&self) -> (u64, u64) {
        ((self.x + 0.).to_bits(), (self.y + 0.).to_bits())
    }
}

/// Break-line segment between two vertex indices that must survive as a triangulation edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintEdge {
    pub from: usize,
    pub to: usize,
}

impl ConstraintEdge {
    pub fn new(from: usize, to: usize) -> ConstraintEdge {
        ConstraintEdge { from, to }
    }

    pub fn is_self_referencing(&self) -> bool {
        self.from == self.to
    }

    /// Orientation independent identity
    pub fn key(&self) -> (usize, usize) {
        (self.from.min(self.to), self.from.max(self.to))
    }
}

impl From<[usize; 2]> for ConstraintEdge {
    fn from(pair: [usize; 2]) -> Self {
        ConstraintEdge::new(pair[0], pair[1])
    }
}
