use super::PointZ;

/// The geometry kinds a source feature can carry.
/// Rings of polygons are expected to be closed, the first vertex repeated last.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(PointZ),
    MultiPoint(Vec<PointZ>),
    LineString(Vec<PointZ>),
    MultiLineString(Vec<Vec<PointZ>>),
    Polygon(Vec<Vec<PointZ>>),
    MultiPolygon(Vec<Vec<Vec<PointZ>>>),
}

impl Geometry {
    pub fn is_point_like(&self) -> bool {
        matches!(self, Geometry::Point(_) | Geometry::MultiPoint(_))
    }

    /// All vertices in storage order
    pub fn vertices(&self) -> Box<dyn Iterator<Item = &PointZ> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(p)),
            Geometry::MultiPoint(points) | Geometry::LineString(points) => Box::new(points.iter()),
            Geometry::MultiLineString(parts) | Geometry::Polygon(parts) => {
                Box::new(parts.iter().flatten())
            }
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten().flatten()),
        }
    }

    /// Every line part and every polygon ring, exterior and interior, as its own polyline.
    /// Point geometries have no linework.
    pub fn curves(&self) -> Vec<&[PointZ]> {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => vec![],
            Geometry::LineString(line) => vec![line.as_slice()],
            Geometry::MultiLineString(parts) | Geometry::Polygon(parts) => {
                parts.iter().map(|p| p.as_slice()).collect()
            }
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .flatten()
                .map(|ring| ring.as_slice())
                .collect(),
        }
    }
}
