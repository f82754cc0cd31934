use crate::crs::{Crs, Reprojector};
use crate::geometry::{ConstraintEdge, PointZ, Vertex};
use crate::parameters::{SourceParameters, SourceRole, ValueSelector};
use crate::sources::{LayerProvider, SourceLayer};
use crate::{Error, Result};

use log::{debug, info, warn};
use std::ops::Range;

/// Flat vertex list and break-line segments of all sources, in the working crs
#[derive(Clone, Debug, Default)]
pub struct IngestedInput {
    pub crs: Crs,
    pub vertices: Vec<Vertex>,
    pub segments: Vec<ConstraintEdge>,
}

enum ValueRule {
    Elevation,
    Field(usize),
}

struct ResolvedSource<'a> {
    params: &'a SourceParameters,
    layer: &'a SourceLayer,
    rule: ValueRule,
}

// consecutive run of a layer's points that is either loose vertices or one polyline
struct Part {
    range: Range<usize>,
    is_curve: bool,
}

pub fn ingest_sources<P: LayerProvider + ?Sized>(
    sources: &[SourceParameters],
    layers: &P,
    reprojector: &impl Reprojector,
) -> Result<IngestedInput> {
    if sources.is_empty() {
        return Err(Error::Configuration(
            "You need to specify at least one input layer".to_string(),
        ));
    }

    // every source is validated before any geometry is touched
    let resolved = sources
        .iter()
        .map(|params| resolve_source(params, layers))
        .collect::<Result<Vec<_>>>()?;

    let crs = resolved[0].layer.crs;
    let mut input = IngestedInput {
        crs,
        ..Default::default()
    };

    for source in resolved.iter() {
        add_source(&mut input, source, reprojector)?;
    }

    if input.vertices.is_empty() {
        return Err(Error::InsufficientData(
            "The input layers contain no usable vertices".to_string(),
        ));
    }

    info!(
        "Ingested {} vertices and {} break line segments from {} sources in crs {}",
        input.vertices.len(),
        input.segments.len(),
        sources.len(),
        input.crs
    );
    Ok(input)
}

fn resolve_source<'a, P: LayerProvider + ?Sized>(
    params: &'a SourceParameters,
    layers: &'a P,
) -> Result<ResolvedSource<'a>> {
    let layer = layers.layer(&params.source).ok_or_else(|| {
        Error::Configuration(format!("The input layer '{}' does not exist", params.source))
    })?;

    let rule = match &params.value {
        ValueSelector::Elevation => ValueRule::Elevation,
        ValueSelector::Field(name) => ValueRule::Field(layer.numeric_field_index(name)?),
    };

    Ok(ResolvedSource {
        params,
        layer,
        rule,
    })
}

fn add_source(
    input: &mut IngestedInput,
    source: &ResolvedSource,
    reprojector: &impl Reprojector,
) -> Result<()> {
    let layer = source.layer;

    let mut points: Vec<PointZ> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut parts: Vec<Part> = Vec::new();

    for (fi, feature) in layer.features.iter().enumerate() {
        let Some(geometry) = feature.geometry.as_ref() else {
            warn!("Feature {fi} of layer '{}' has no geometry, skipped", layer.name);
            continue;
        };

        let feature_value = match source.rule {
            ValueRule::Elevation => None,
            ValueRule::Field(index) => match feature.attribute(index).as_f64() {
                Some(v) => Some(v),
                None => {
                    warn!(
                        "Feature {fi} of layer '{}' has no value for {}, skipped",
                        layer.name, source.params.value
                    );
                    continue;
                }
            },
        };

        if source.params.role == SourceRole::Points || geometry.is_point_like() {
            let start = points.len();
            for p in geometry.vertices() {
                values.push(vertex_value(p, feature_value, layer, fi)?);
                points.push(*p);
            }
            parts.push(Part {
                range: start..points.len(),
                is_curve: false,
            });
        } else {
            for curve in geometry.curves() {
                let start = points.len();
                for p in curve {
                    values.push(vertex_value(p, feature_value, layer, fi)?);
                    points.push(*p);
                }
                parts.push(Part {
                    range: start..points.len(),
                    is_curve: true,
                });
            }
        }
    }

    if layer.crs != input.crs {
        debug!(
            "Reprojecting {} vertices of layer '{}' from {} to {}",
            points.len(),
            layer.name,
            layer.crs,
            input.crs
        );
        reprojector.reproject(&mut points, &layer.crs, &input.crs)?;
    }

    let offset = input.vertices.len();
    input.vertices.extend(
        points
            .iter()
            .zip(values.iter())
            .map(|(p, &v)| Vertex::new(p.x, p.y, v)),
    );

    let mut num_segments = 0;
    for part in parts.iter().filter(|p| p.is_curve) {
        if part.range.len() < 2 {
            warn!(
                "A break line of layer '{}' has fewer than two vertices, only its vertices are used",
                layer.name
            );
            continue;
        }
        for i in part.range.start..part.range.end - 1 {
            input
                .segments
                .push(ConstraintEdge::new(offset + i, offset + i + 1));
            num_segments += 1;
        }
    }

    debug!(
        "Layer '{}' as {}: {} vertices, {} break line segments",
        layer.name,
        source.params.role,
        points.len(),
        num_segments
    );
    Ok(())
}

fn vertex_value(
    p: &PointZ,
    feature_value: Option<f64>,
    layer: &SourceLayer,
    feature_index: usize,
) -> Result<f64> {
    match feature_value {
        Some(v) => Ok(v),
        None => p.z.ok_or_else(|| {
            Error::Configuration(format!(
                "Layer '{}' is set to use the Z coordinate as value, but feature {feature_index} has vertices without Z",
                layer.name
            ))
        }),
    }
}
