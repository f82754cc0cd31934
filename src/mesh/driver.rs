use super::{Mesh, Sms2dmDriver};
use crate::crs::Crs;
use crate::error::DriverError;
use crate::{Error, Result};

use std::path::Path;

/// Byte-level writer of a named mesh format
pub trait MeshDriver {
    fn format_name(&self) -> &str;

    fn file_extension(&self) -> &str;

    fn write(&self, mesh: &Mesh, crs: &Crs, path: &Path) -> std::result::Result<(), DriverError>;
}

/// Drivers available to the exporter, looked up by case-insensitive format name
pub struct DriverRegistry {
    drivers: Vec<Box<dyn MeshDriver>>,
}

impl Default for DriverRegistry {
    fn default() -> Self {
        let mut registry = DriverRegistry::empty();
        registry.register(Sms2dmDriver);
        registry
    }
}

impl DriverRegistry {
    pub fn empty() -> DriverRegistry {
        DriverRegistry { drivers: vec![] }
    }

    /// A driver registered later shadows an earlier one with the same format name
    pub fn register(&mut self, driver: impl MeshDriver + 'static) {
        self.drivers.insert(0, Box::new(driver));
    }

    pub fn find(&self, format: &str) -> Option<&dyn MeshDriver> {
        self.drivers
            .iter()
            .find(|d| d.format_name().eq_ignore_ascii_case(format))
            .map(|d| &**d)
    }

    pub fn driver(&self, format: &str) -> Result<&dyn MeshDriver> {
        self.find(format).ok_or_else(|| {
            Error::Configuration(format!(
                "No mesh driver for format '{format}', available formats: {}",
                self.format_names().join(", ")
            ))
        })
    }

    pub fn format_names(&self) -> Vec<&str> {
        self.drivers.iter().map(|d| d.format_name()).collect()
    }
}
