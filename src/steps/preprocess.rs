use super::IngestedInput;
use crate::consts::{CROSSING_SNAP_RELATIVE, MAX_SPLIT_PASSES};
use crate::crs::Crs;
use crate::geometry::{ConstraintEdge, Coord, Line, Vertex};
use crate::parameters::TinParameters;
use crate::{Error, Result};

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

/// Deduplicated vertices and non-crossing constraint edges, ready for triangulation
#[derive(Clone, Debug, Default)]
pub struct PreparedInput {
    pub crs: Crs,
    pub vertices: Vec<Vertex>,
    pub constraints: Vec<ConstraintEdge>,
}

pub fn preprocess(input: IngestedInput, params: &TinParameters) -> Result<PreparedInput> {
    params.validate()?;

    let IngestedInput {
        crs,
        vertices,
        segments,
    } = input;

    // rounded crossing points land ulps off the segments they split, they are
    // snapped so the next pass does not find a sliver crossing next to them
    let magnitude = vertices
        .iter()
        .filter(|v| v.is_finite())
        .fold(1f64, |m, v| m.max(v.x.abs()).max(v.y.abs()));
    let snap = (magnitude * CROSSING_SNAP_RELATIVE).max(params.merge_tolerance);
    let mut set = VertexSet::new(params.merge_tolerance, snap);

    // old index -> merged index, None for rejected vertices
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(vertices.len());
    let mut num_rejected = 0;
    let mut num_disagreeing = 0;
    for v in vertices.iter() {
        if !v.is_finite() {
            num_rejected += 1;
            remap.push(None);
            continue;
        }
        let (index, merged) = set.insert(*v);
        if merged && set.vertices[index].value != v.value {
            num_disagreeing += 1;
        }
        remap.push(Some(index));
    }
    if num_rejected > 0 {
        warn!("{num_rejected} vertices with non-finite coordinates or values were dropped");
    }
    if num_disagreeing > 0 {
        warn!("{num_disagreeing} coincident vertices had differing values, the first seen value was kept");
    }
    debug!(
        "Merged {} input vertices into {} unique vertices",
        vertices.len() - num_rejected,
        set.vertices.len()
    );

    let mut num_degenerate = 0;
    let mut edges = Vec::with_capacity(segments.len());
    for s in segments.iter() {
        match (remap[s.from], remap[s.to]) {
            (Some(from), Some(to)) if from != to => edges.push(ConstraintEdge::new(from, to)),
            _ => num_degenerate += 1,
        }
    }
    if num_degenerate > 0 {
        warn!("{num_degenerate} break line segments were degenerate or of zero length and were dropped");
    }
    let mut edges = collapse_duplicates(edges);

    let num_input_vertices = set.vertices.len();
    let mut num_crossings = 0;
    let mut resolved = false;
    for pass in 0..MAX_SPLIT_PASSES {
        edges = split_at_vertices(&set.vertices, edges);

        let crossings = find_crossings(&set.vertices, &edges);
        if crossings.is_empty() {
            resolved = true;
            break;
        }
        debug!("Pass {pass}: resolving {} break line crossings", crossings.len());
        num_crossings += crossings.len();
        edges = split_at_crossings(&mut set, edges, crossings);
    }
    if !resolved {
        return Err(Error::InternalConsistency(format!(
            "Break line crossings were still present after {MAX_SPLIT_PASSES} splitting passes"
        )));
    }

    info!(
        "Preprocessed input: {} vertices ({} inserted at crossings), {} constraint edges, {} crossings resolved",
        set.vertices.len(),
        set.vertices.len() - num_input_vertices,
        edges.len(),
        num_crossings
    );

    Ok(PreparedInput {
        crs,
        vertices: set.vertices,
        constraints: edges,
    })
}

/// Vertex list that merges coincident insertions into the lowest indexed vertex in reach.
/// Input vertices merge within `tolerance`, 0 meaning exact equality.
/// Crossing vertices merge within `snap`, which is never below `tolerance` and is the grid cell size.
struct VertexSet {
    tolerance: f64,
    snap: f64,
    vertices: Vec<Vertex>,
    exact: HashMap<(u64, u64), usize>,
    grid: HashMap<(i64, i64), Vec<usize>>,
}

impl VertexSet {
    fn new(tolerance: f64, snap: f64) -> VertexSet {
        VertexSet {
            tolerance,
            snap,
            vertices: vec![],
            exact: HashMap::new(),
            grid: HashMap::new(),
        }
    }

    fn cell(&self, c: Coord) -> (i64, i64) {
        (
            (c.x / self.snap).floor() as i64,
            (c.y / self.snap).floor() as i64,
        )
    }

    fn find(&self, v: &Vertex, radius: f64) -> Option<usize> {
        if let Some(&i) = self.exact.get(&v.position_key()) {
            return Some(i);
        }
        if radius == 0. {
            return None;
        }

        let (cx, cy) = self.cell(v.coord());
        let max_dist = radius * radius;
        let mut best: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.grid.get(&(cx.saturating_add(dx), cy.saturating_add(dy)))
                else {
                    continue;
                };
                for &i in bucket {
                    if self.vertices[i].squared_euclidean_distance(v) <= max_dist
                        && best.map_or(true, |b| i < b)
                    {
                        best = Some(i);
                    }
                }
            }
        }
        best
    }

    /// Input vertex, returns its index and whether it was merged into an existing one
    fn insert(&mut self, v: Vertex) -> (usize, bool) {
        self.insert_within(v, self.tolerance)
    }

    /// Crossing vertex, snapped onto any vertex within the snap distance
    fn snap_insert(&mut self, v: Vertex) -> (usize, bool) {
        self.insert_within(v, self.snap)
    }

    fn insert_within(&mut self, v: Vertex, radius: f64) -> (usize, bool) {
        if let Some(i) = self.find(&v, radius) {
            return (i, true);
        }
        let i = self.vertices.len();
        self.exact.insert(v.position_key(), i);
        let cell = self.cell(v.coord());
        self.grid.entry(cell).or_default().push(i);
        self.vertices.push(v);
        (i, false)
    }
}

/// Drops self-referencing edges and edges already present in either orientation,
/// keeping the first occurrence and order.
fn collapse_duplicates(edges: Vec<ConstraintEdge>) -> Vec<ConstraintEdge> {
    let mut seen = HashSet::with_capacity(edges.len());
    edges
        .into_iter()
        .filter(|e| !e.is_self_referencing() && seen.insert(e.key()))
        .collect()
}

fn line(vertices: &[Vertex], e: &ConstraintEdge) -> Line {
    Line::new(vertices[e.from].coord(), vertices[e.to].coord())
}

/// Replaces every edge by the chain through its split points, ordered along the edge
fn apply_splits(
    vertices: &[Vertex],
    edges: Vec<ConstraintEdge>,
    mut splits: Vec<Vec<usize>>,
) -> Vec<ConstraintEdge> {
    let mut out = Vec::with_capacity(edges.len() + splits.iter().map(Vec::len).sum::<usize>());
    for (e, points) in edges.iter().zip(splits.iter_mut()) {
        if points.is_empty() {
            out.push(*e);
            continue;
        }
        let l = line(vertices, e);
        points.sort_by(|&a, &b| {
            l.parameter(vertices[a].coord())
                .total_cmp(&l.parameter(vertices[b].coord()))
                .then(a.cmp(&b))
        });
        points.dedup();

        let mut prev = e.from;
        for &p in points.iter().chain(std::iter::once(&e.to)) {
            out.push(ConstraintEdge::new(prev, p));
            prev = p;
        }
    }
    collapse_duplicates(out)
}

/// Splits edges at every vertex lying exactly in their interior
fn split_at_vertices(vertices: &[Vertex], edges: Vec<ConstraintEdge>) -> Vec<ConstraintEdge> {
    let mut by_x: Vec<usize> = (0..vertices.len()).collect();
    by_x.sort_by(|&a, &b| vertices[a].x.total_cmp(&vertices[b].x).then(a.cmp(&b)));

    let mut splits = vec![vec![]; edges.len()];
    let mut num_splits = 0;
    for (ei, e) in edges.iter().enumerate() {
        let l = line(vertices, e);
        let (min_x, max_x) = (l.min_x(), l.max_x());
        let first = by_x.partition_point(|&i| vertices[i].x < min_x);

        for &vi in by_x[first..].iter() {
            if vertices[vi].x > max_x {
                break;
            }
            if vi == e.from || vi == e.to {
                continue;
            }
            if l.contains_interior(vertices[vi].coord()) {
                splits[ei].push(vi);
                num_splits += 1;
            }
        }
    }

    if num_splits == 0 {
        return edges;
    }
    debug!("Splitting break line segments at {num_splits} vertices on their interior");
    apply_splits(vertices, edges, splits)
}

// (lower edge index, higher edge index, crossing point)
type Crossing = (usize, usize, Coord);

/// Proper crossings between edges, found by a sweep over the edges' x-extents
fn find_crossings(vertices: &[Vertex], edges: &[ConstraintEdge]) -> Vec<Crossing> {
    let lines: Vec<Line> = edges.iter().map(|e| line(vertices, e)).collect();

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&a, &b| lines[a].min_x().total_cmp(&lines[b].min_x()).then(a.cmp(&b)));

    let mut crossings = vec![];
    for (k, &a) in order.iter().enumerate() {
        let max_x = lines[a].max_x();
        for &b in order[k + 1..].iter() {
            if lines[b].min_x() > max_x {
                break;
            }
            let (ea, eb) = (&edges[a], &edges[b]);
            if ea.from == eb.from || ea.from == eb.to || ea.to == eb.from || ea.to == eb.to {
                continue;
            }
            if let Some(p) = lines[a].crossing(&lines[b]) {
                crossings.push((a.min(b), a.max(b), p));
            }
        }
    }
    crossings.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
    crossings
}

/// Inserts a vertex at every crossing and splits both edges there.
/// Crossings within snapping distance of each other or of an existing vertex share that vertex,
/// so every edge through one crossing point is split at the same index.
/// A new vertex takes its value from the lower indexed edge.
fn split_at_crossings(
    set: &mut VertexSet,
    edges: Vec<ConstraintEdge>,
    crossings: Vec<Crossing>,
) -> Vec<ConstraintEdge> {
    let mut splits = vec![vec![]; edges.len()];
    for (a, b, p) in crossings {
        let e = &edges[a];
        let (start, end) = (set.vertices[e.from], set.vertices[e.to]);
        let value = line(&set.vertices, e).interpolate(p, start.value, end.value);

        let (index, _) = set.snap_insert(Vertex::new(p.x, p.y, value));
        for ei in [a, b] {
            if index != edges[ei].from && index != edges[ei].to {
                splits[ei].push(index);
            }
        }
    }
    apply_splits(&set.vertices, edges, splits)
}
