use super::PreparedInput;
use crate::crs::Crs;
use crate::{Error, Result};

use log::info;
use spade::{
    handles::FixedVertexHandle, ConstrainedDelaunayTriangulation, HasPosition, Point2,
    Triangulation,
};

#[derive(Clone, Copy, Debug)]
pub struct TinPoint {
    pub pos: Point2<f64>,
    pub value: f64,
}

impl HasPosition for TinPoint {
    type Scalar = f64;

    fn position(&self) -> Point2<Self::Scalar> {
        self.pos
    }
}

pub type Cdt = ConstrainedDelaunayTriangulation<TinPoint>;

/// Constrained Delaunay triangulation whose vertex handles equal the prepared vertex indices
pub struct TinTriangulation {
    pub crs: Crs,
    pub cdt: Cdt,
}

impl TinTriangulation {
    pub fn num_vertices(&self) -> usize {
        self.cdt.num_vertices()
    }

    pub fn num_triangles(&self) -> usize {
        self.cdt.num_inner_faces()
    }

    pub fn is_constraint_edge(&self, a: usize, b: usize) -> bool {
        a < self.num_vertices()
            && b < self.num_vertices()
            && self
                .cdt
                .exists_constraint(FixedVertexHandle::from_index(a), FixedVertexHandle::from_index(b))
    }
}

/// Vertices are inserted strictly in index order so cocircular configurations
/// resolve the same way on every run with the same input order.
pub fn triangulate(prepared: PreparedInput) -> Result<TinTriangulation> {
    let PreparedInput {
        crs,
        vertices,
        constraints,
    } = prepared;

    if vertices.len() < 3 {
        return Err(Error::InsufficientData(format!(
            "A triangulation needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }

    let mut cdt = Cdt::new();
    for (i, v) in vertices.iter().enumerate() {
        let handle = cdt
            .insert(TinPoint {
                pos: Point2::new(v.x, v.y),
                value: v.value,
            })
            .map_err(|e| {
                Error::Configuration(format!(
                    "Vertex {i} at ({}, {}) is outside the supported coordinate range: {e:?}",
                    v.x, v.y
                ))
            })?;

        if handle.index() != i {
            return Err(Error::InternalConsistency(format!(
                "Vertex {i} coincides with vertex {} after deduplication",
                handle.index()
            )));
        }
    }

    if cdt.num_inner_faces() == 0 {
        return Err(Error::InsufficientData(format!(
            "All {} vertices are collinear",
            vertices.len()
        )));
    }

    for e in constraints.iter() {
        let (from, to) = (
            FixedVertexHandle::from_index(e.from),
            FixedVertexHandle::from_index(e.to),
        );
        if !cdt.can_add_constraint(from, to) {
            return Err(Error::InternalConsistency(format!(
                "Constraint edge {} - {} crosses another constraint edge",
                e.from, e.to
            )));
        }
        cdt.add_constraint(from, to);

        if !cdt.exists_constraint(from, to) {
            return Err(Error::InternalConsistency(format!(
                "Constraint edge {} - {} passes through another vertex",
                e.from, e.to
            )));
        }
    }

    info!(
        "Triangulated {} vertices into {} triangles with {} constraint edges",
        cdt.num_vertices(),
        cdt.num_inner_faces(),
        cdt.num_constraints()
    );

    Ok(TinTriangulation { crs, cdt })
}
