use geo::Coord;

/// Input coordinate, the elevation is optional since 2D layers are allowed
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointZ {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl PointZ {
    pub fn new(x: f64, y: f64, z: f64) -> PointZ {
        PointZ { x, y, z: Some(z) }
    }

    pub fn new_2d(x: f64, y: f64) -> PointZ {
        PointZ { x, y, z: None }
    }

    pub fn coord(&self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<(f64, f64)> for PointZ {
    fn from(xy: (f64, f64)) -> Self {
        PointZ::new_2d(xy.0, xy.1)
    }
}

impl From<(f64, f64, f64)> for PointZ {
    fn from(xyz: (f64, f64, f64)) -> Self {
        PointZ::new(xyz.0, xyz.1, xyz.2)
    }
}
