pub mod driver;
#[allow(clippy::module_inception)]
pub mod mesh;
pub mod sms_2dm;

pub use self::driver::{DriverRegistry, MeshDriver};
pub use self::mesh::{Mesh, MeshNode};
pub use self::sms_2dm::Sms2dmDriver;
