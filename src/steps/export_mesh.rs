use crate::mesh::{DriverRegistry, Mesh};
use crate::parameters::OutputParameters;
use crate::Result;

use log::info;

/// Hands a validated mesh to the driver named in `output`, driver failures pass through untouched
pub fn export_mesh(mesh: &Mesh, output: &OutputParameters, drivers: &DriverRegistry) -> Result<()> {
    let driver = drivers.driver(&output.format)?;
    mesh.validate()?;

    info!(
        "Writing mesh with {} nodes and {} elements to {} as {}",
        mesh.vertex_count(),
        mesh.face_count(),
        output.path.to_string_lossy(),
        driver.format_name()
    );
    driver.write(mesh, &mesh.crs, &output.path)?;
    Ok(())
}
