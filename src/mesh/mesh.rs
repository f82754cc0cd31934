use crate::crs::Crs;
use crate::{Error, Result};

use geo::{
    kernels::{Kernel, RobustKernel},
    Coord, Orientation, Rect,
};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshNode {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl MeshNode {
    pub fn coord(&self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

/// Unstructured triangular mesh, elements index into nodes and wind counter-clockwise
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub nodes: Vec<MeshNode>,
    pub elements: Vec<[usize; 3]>,
    pub crs: Crs,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn face_count(&self) -> usize {
        self.elements.len()
    }

    pub fn extent(&self) -> Option<Rect> {
        let first = self.nodes.first()?.coord();
        let (min, max) = self.nodes.iter().skip(1).fold((first, first), |(min, max), n| {
            (
                Coord {
                    x: min.x.min(n.x),
                    y: min.y.min(n.y),
                },
                Coord {
                    x: max.x.max(n.x),
                    y: max.y.max(n.y),
                },
            )
        });
        Some(Rect::new(min, max))
    }

    /// Unique undirected edges as `[low, high]` node pairs, in order of first appearance
    pub fn edges(&self) -> Vec<[usize; 2]> {
        let mut seen = HashSet::with_capacity(self.elements.len() * 2);
        let mut edges = Vec::with_capacity(self.elements.len() * 2);
        for element in self.elements.iter() {
            for i in 0..3 {
                let (a, b) = (element[i], element[(i + 1) % 3]);
                let edge = [a.min(b), a.max(b)];
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.elements.iter().any(|e| {
            (0..3).any(|i| {
                let (p, q) = (e[i], e[(i + 1) % 3]);
                (p == a && q == b) || (p == b && q == a)
            })
        })
    }

    /// Checks the mesh is fit to be handed to a driver
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self
            .nodes
            .iter()
            .position(|n| !(n.x.is_finite() && n.y.is_finite() && n.value.is_finite()))
        {
            return Err(Error::InternalConsistency(format!(
                "Mesh node {i} has a non-finite coordinate or value"
            )));
        }

        for (i, element) in self.elements.iter().enumerate() {
            if element.iter().any(|&n| n >= self.nodes.len()) {
                return Err(Error::InternalConsistency(format!(
                    "Mesh element {i} references a node outside of the {} nodes",
                    self.nodes.len()
                )));
            }
            let [a, b, c] = element.map(|n| self.nodes[n].coord());
            match RobustKernel::orient2d(a, b, c) {
                Orientation::CounterClockwise => (),
                Orientation::Clockwise => {
                    return Err(Error::InternalConsistency(format!(
                        "Mesh element {i} is wound clockwise"
                    )))
                }
                Orientation::Collinear => {
                    return Err(Error::InternalConsistency(format!(
                        "Mesh element {i} has zero area"
                    )))
                }
            }
        }
        Ok(())
    }
}
