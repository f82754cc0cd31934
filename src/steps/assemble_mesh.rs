use super::TinTriangulation;
use crate::mesh::{Mesh, MeshNode};
use crate::{Error, Result};

use geo::{
    kernels::{Kernel, RobustKernel},
    Coord, Orientation,
};
use log::{info, warn};
use spade::Triangulation;

/// Nodes keep the triangulation's vertex order, elements are emitted counter-clockwise
/// in face order. Vertices no triangle references are dropped.
pub fn assemble_mesh(triangulation: &TinTriangulation) -> Result<Mesh> {
    let cdt = &triangulation.cdt;

    let coords: Vec<Coord> = cdt
        .vertices()
        .map(|v| Coord {
            x: v.position().x,
            y: v.position().y,
        })
        .collect();

    let mut referenced = vec![false; cdt.num_vertices()];
    let mut triangles: Vec<[usize; 3]> = Vec::with_capacity(cdt.num_inner_faces());
    let mut num_degenerate = 0;
    for face in cdt.inner_faces() {
        let mut tri = face.vertices().map(|v| v.fix().index());

        match RobustKernel::orient2d(coords[tri[0]], coords[tri[1]], coords[tri[2]]) {
            Orientation::CounterClockwise => (),
            Orientation::Clockwise => tri.swap(1, 2),
            Orientation::Collinear => {
                num_degenerate += 1;
                continue;
            }
        }
        for &i in tri.iter() {
            referenced[i] = true;
        }
        triangles.push(tri);
    }
    if num_degenerate > 0 {
        warn!("{num_degenerate} zero area triangles were excluded from the mesh");
    }
    if triangles.is_empty() {
        return Err(Error::InsufficientData(
            "The triangulation has no triangles of non-zero area".to_string(),
        ));
    }

    // vertex index -> node index, order preserving
    let mut node_index = vec![usize::MAX; referenced.len()];
    let mut nodes = Vec::with_capacity(referenced.len());
    for (v, is_referenced) in cdt.vertices().zip(referenced.iter()) {
        if !is_referenced {
            continue;
        }
        node_index[v.fix().index()] = nodes.len();
        nodes.push(MeshNode {
            x: v.position().x,
            y: v.position().y,
            value: v.data().value,
        });
    }
    let num_isolated = referenced.len() - nodes.len();
    if num_isolated > 0 {
        warn!("{num_isolated} vertices are not part of any triangle and were dropped from the mesh");
    }

    let elements = triangles
        .into_iter()
        .map(|t| t.map(|i| node_index[i]))
        .collect();

    let mesh = Mesh {
        nodes,
        elements,
        crs: triangulation.crs,
    };
    info!(
        "Assembled mesh with {} nodes and {} elements",
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}
