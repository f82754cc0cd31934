pub mod assemble_mesh;
pub mod export_mesh;
pub mod ingest_sources;
pub mod preprocess;
pub mod triangulate;

pub use self::assemble_mesh::assemble_mesh;
pub use self::export_mesh::export_mesh;
pub use self::ingest_sources::{ingest_sources, IngestedInput};
pub use self::preprocess::{preprocess, PreparedInput};
pub use self::triangulate::{triangulate, TinPoint, TinTriangulation};
