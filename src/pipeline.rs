use crate::crs::Reprojector;
use crate::feedback::Feedback;
use crate::mesh::{DriverRegistry, Mesh};
use crate::parameters::{OutputParameters, SourceParameters, TinParameters};
use crate::sources::LayerProvider;
use crate::steps;
use crate::Result;

use log::info;

/// Runs ingestion, preprocessing, triangulation and assembly, returning the mesh.
/// Cancellation is polled between the stages and discards everything built so far.
pub fn build_tin_mesh<P: LayerProvider + ?Sized>(
    sources: &[SourceParameters],
    layers: &P,
    reprojector: &impl Reprojector,
    params: &TinParameters,
    feedback: &Feedback,
) -> Result<Mesh> {
    params.validate()?;

    let input = steps::ingest_sources(sources, layers, reprojector)?;
    feedback.check("ingestion")?;

    let prepared = steps::preprocess(input, params)?;
    feedback.check("preprocessing")?;

    let triangulation = steps::triangulate(prepared)?;
    feedback.check("triangulation")?;

    steps::assemble_mesh(&triangulation)
}

/// Builds the mesh and writes it with the driver named in `output`.
/// The format is checked before any work is done, and a cancelled run never reaches the driver.
pub fn create_tin_mesh<P: LayerProvider + ?Sized>(
    sources: &[SourceParameters],
    layers: &P,
    reprojector: &impl Reprojector,
    params: &TinParameters,
    output: &OutputParameters,
    drivers: &DriverRegistry,
    feedback: &Feedback,
) -> Result<Mesh> {
    drivers.driver(&output.format)?;

    let mesh = build_tin_mesh(sources, layers, reprojector, params, feedback)?;
    feedback.check("mesh assembly")?;

    steps::export_mesh(&mesh, output, drivers)?;
    info!("TIN mesh written to {}", output.path.to_string_lossy());
    Ok(mesh)
}
