pub mod reproject;

pub use self::reproject::{ProjReprojector, Reprojector};

use crate::{Error, Result};

use std::fmt::Display;

/// Coordinate reference system of a layer or a mesh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Crs {
    #[default]
    Unknown,
    Epsg(u16),
}

impl Crs {
    /// Only codes with a known definition are accepted
    pub fn from_epsg(code: u16) -> Result<Crs> {
        if crs_definitions::from_code(code).is_none() {
            return Err(Error::Configuration(format!(
                "EPSG:{code} is not a recognized coordinate reference system"
            )));
        }
        Ok(Crs::Epsg(code))
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Crs::Epsg(_))
    }

    pub fn epsg(&self) -> Option<u16> {
        match self {
            Crs::Epsg(code) => Some(*code),
            Crs::Unknown => None,
        }
    }

    pub fn wkt(&self) -> Option<&'static str> {
        self.epsg()
            .and_then(crs_definitions::from_code)
            .map(|def| def.wkt)
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Unknown => f.write_str("unknown"),
            Crs::Epsg(code) => write!(f, "EPSG:{code}"),
        }
    }
}
