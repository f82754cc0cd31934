use super::{Mesh, MeshDriver};
use crate::consts::{SMS_2DM_EXTENSION, SMS_2DM_FORMAT};
use crate::crs::Crs;
use crate::error::DriverError;

use std::{
    fs::File,
    io::{BufWriter, ErrorKind, Write},
    path::Path,
};

/// SMS 2DM text format, the node value is written as the node's z.
/// The crs goes to a .prj sidecar holding its WKT.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sms2dmDriver;

impl Sms2dmDriver {
    pub fn write_to(&self, mesh: &Mesh, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "MESH2D")?;

        // ids are 1-based
        for (i, e) in mesh.elements.iter().enumerate() {
            writeln!(out, "E3T {} {} {} {} 1", i + 1, e[0] + 1, e[1] + 1, e[2] + 1)?;
        }
        for (i, n) in mesh.nodes.iter().enumerate() {
            writeln!(out, "ND {} {} {} {}", i + 1, n.x, n.y, n.value)?;
        }
        out.flush()
    }

    fn write_files(&self, mesh: &Mesh, crs: &Crs, path: &Path) -> Result<(), DriverError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(mesh, &mut out)?;

        // a sidecar from an earlier export must not describe this mesh
        let prj = path.with_extension("prj");
        match crs.wkt() {
            Some(wkt) => std::fs::write(prj, wkt)?,
            None => match std::fs::remove_file(prj) {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => (),
            },
        }
        Ok(())
    }
}

impl MeshDriver for Sms2dmDriver {
    fn format_name(&self) -> &str {
        SMS_2DM_FORMAT
    }

    fn file_extension(&self) -> &str {
        SMS_2DM_EXTENSION
    }

    fn write(&self, mesh: &Mesh, crs: &Crs, path: &Path) -> Result<(), DriverError> {
        if mesh.elements.is_empty() {
            return Err(DriverError::Format(
                "2DM files need at least one element".to_string(),
            ));
        }

        let res = self.write_files(mesh, crs, path);
        if res.is_err() {
            // no partial export is left behind, the write error is the one reported
            let _ = std::fs::remove_file(path);
        }
        res
    }
}
