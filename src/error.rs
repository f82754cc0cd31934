use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// crate specific Error enum
///
/// Every variant is terminal for the run that produced it, nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// The run parameters are missing or malformed and must be fixed by the caller
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Reprojection(#[from] ReprojectionError),
    /// Not enough usable vertices to define a triangulation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    /// An invariant the pipeline is meant to guarantee did not hold, always a defect
    #[error("Internal consistency violated: {0}")]
    InternalConsistency(String),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("The run was cancelled")]
    Cancelled,
}

/// Failure to reconcile the coordinate reference system of a source with the working one
#[derive(Error, Debug)]
pub enum ReprojectionError {
    #[error(transparent)]
    ProjError(#[from] proj4rs::errors::Error),
    #[error("EPSG:{0} has no known definition")]
    UnknownEpsg(u16),
    #[error("Cannot reconcile a layer with CRS {from} to CRS {to}")]
    Unreconcilable { from: String, to: String },
}

/// Failure reported by a mesh format driver
#[derive(Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Format(String),
}
