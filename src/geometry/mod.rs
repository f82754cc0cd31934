pub mod feature_geometry;
pub mod line;
pub mod point;
pub mod vertex;

pub use self::feature_geometry::Geometry;
pub use self::line::Line;
pub use self::point::PointZ;
pub use self::vertex::{ConstraintEdge, Vertex};
pub use geo::Coord;
