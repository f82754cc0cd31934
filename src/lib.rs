pub mod consts;
pub mod crs;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod mesh;
pub mod parameters;
pub mod pipeline;
pub mod sources;
pub mod steps;

pub use crs::{Crs, ProjReprojector, Reprojector};
pub use error::{DriverError, Error, ReprojectionError, Result};
pub use feedback::Feedback;
pub use mesh::{DriverRegistry, Mesh, MeshDriver, MeshNode, Sms2dmDriver};
pub use parameters::{OutputParameters, SourceParameters, SourceRole, TinParameters, ValueSelector};
pub use pipeline::{build_tin_mesh, create_tin_mesh};
