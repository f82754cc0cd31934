use tin_mesh::geometry::{Geometry, PointZ};
use tin_mesh::mesh::Mesh;
use tin_mesh::sources::{AttributeValue, Feature, Field, FieldKind, SourceLayer};
use tin_mesh::{
    build_tin_mesh, create_tin_mesh, steps, Crs, DriverError, DriverRegistry, Error, Feedback,
    MeshDriver, OutputParameters, ProjReprojector, Reprojector, Result, SourceParameters,
    TinParameters, ValueSelector,
};

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

fn point_layer(name: &str, points: &[(f64, f64, f64)]) -> SourceLayer {
    let mut layer = SourceLayer::new(name, Crs::Unknown, vec![Field::new("v", FieldKind::Real)]);
    for &(x, y, v) in points {
        layer.push(Feature::new(
            Geometry::Point(PointZ::new_2d(x, y)),
            vec![AttributeValue::Real(v)],
        ));
    }
    layer
}

fn line_layer(name: &str, lines: Vec<Vec<(f64, f64, f64)>>) -> SourceLayer {
    let mut layer = SourceLayer::new(name, Crs::Unknown, vec![]);
    for line in lines {
        layer.push(Feature::new(
            Geometry::LineString(line.into_iter().map(PointZ::from).collect()),
            vec![],
        ));
    }
    layer
}

fn by_field(name: &str) -> SourceParameters {
    SourceParameters::points(name, ValueSelector::Field("v".into()))
}

fn build(sources: &[SourceParameters], layers: &[SourceLayer]) -> Result<Mesh> {
    build_tin_mesh(
        sources,
        layers,
        &ProjReprojector,
        &TinParameters::default(),
        &Feedback::new(),
    )
}

fn random_points(rng: &mut fastrand::Rng, n: usize) -> Vec<(f64, f64, f64)> {
    (0..n)
        .map(|_| (rng.f64() * 100., rng.f64() * 100., rng.f64() * 10.))
        .collect()
}

// positive when d is inside the circumcircle of the ccw triangle abc
fn in_circle(a: (f64, f64), b: (f64, f64), c: (f64, f64), d: (f64, f64)) -> f64 {
    let (adx, ady) = (a.0 - d.0, a.1 - d.1);
    let (bdx, bdy) = (b.0 - d.0, b.1 - d.1);
    let (cdx, cdy) = (c.0 - d.0, c.1 - d.1);
    (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        - (bdx * bdx + bdy * bdy) * (adx * cdy - cdx * ady)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady)
}

#[test]
fn unconstrained_mesh_is_delaunay() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);
    let layers = vec![point_layer("scatter", &random_points(&mut rng, 300))];
    let mesh = build(&[by_field("scatter")], &layers)?;
    mesh.validate()?;

    let xy: Vec<(f64, f64)> = mesh.nodes.iter().map(|n| (n.x, n.y)).collect();
    for e in mesh.elements.iter() {
        for (i, &d) in xy.iter().enumerate() {
            if e.contains(&i) {
                continue;
            }
            assert!(
                in_circle(xy[e[0]], xy[e[1]], xy[e[2]], d) <= 1e-6,
                "node {i} lies inside the circumcircle of {e:?}"
            );
        }
    }
    Ok(())
}

#[test]
fn constraints_are_mesh_edges() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(7);
    let lines = (0..6).map(|_| random_points(&mut rng, 3)).collect();
    let layers = vec![
        point_layer("scatter", &random_points(&mut rng, 100)),
        line_layer("ridges", lines),
    ];
    let sources = [
        by_field("scatter"),
        SourceParameters::break_lines("ridges", ValueSelector::Elevation),
    ];

    let input = steps::ingest_sources(&sources, &layers, &ProjReprojector)?;
    let prepared = steps::preprocess(input, &TinParameters::default())?;
    let constraints = prepared.constraints.clone();
    let num_vertices = prepared.vertices.len();

    let triangulation = steps::triangulate(prepared)?;
    let mesh = steps::assemble_mesh(&triangulation)?;
    assert_eq!(mesh.vertex_count(), num_vertices);

    assert!(!constraints.is_empty());
    for c in constraints.iter() {
        assert!(mesh.contains_edge(c.from, c.to), "constraint {c:?} is missing");
    }
    mesh.validate()
}

#[test]
fn dense_survey_grid_break_lines_resolve() -> Result<()> {
    for seed in 0..64 {
        let mut rng = fastrand::Rng::with_seed(seed);
        // endpoints on a 0.1 grid, crossings mostly fall between representable values
        let lines = (0..60)
            .map(|_| {
                (0..3)
                    .map(|_| {
                        let x = rng.u32(0..=100) as f64 / 10.;
                        let y = rng.u32(0..=100) as f64 / 10.;
                        (x, y, rng.u32(0..=50) as f64 / 10.)
                    })
                    .collect()
            })
            .collect();
        let layers = vec![line_layer("survey", lines)];
        let sources = [SourceParameters::break_lines("survey", ValueSelector::Elevation)];

        let input = steps::ingest_sources(&sources, &layers, &ProjReprojector)?;
        let prepared = steps::preprocess(input, &TinParameters::default())?;
        let constraints = prepared.constraints.clone();

        let mesh = steps::assemble_mesh(&steps::triangulate(prepared)?)?;
        mesh.validate()?;
        for c in constraints.iter() {
            assert!(
                mesh.contains_edge(c.from, c.to),
                "seed {seed}: constraint {c:?} is missing"
            );
        }
    }
    Ok(())
}

#[test]
fn identical_input_gives_identical_mesh() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(3);
    let lines = (0..4).map(|_| random_points(&mut rng, 4)).collect();
    let layers = vec![
        point_layer("scatter", &random_points(&mut rng, 150)),
        line_layer("ridges", lines),
    ];
    let sources = [
        by_field("scatter"),
        SourceParameters::break_lines("ridges", ValueSelector::Elevation),
    ];

    let first = build(&sources, &layers)?;
    let second = build(&sources, &layers)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn coincident_points_give_one_node() -> Result<()> {
    let layers = vec![point_layer(
        "dups",
        &[(0., 0., 1.), (1., 0., 2.), (0., 1., 3.), (1., 0., 7.)],
    )];
    let mesh = build(&[by_field("dups")], &layers)?;
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.nodes[1].value, 2.);
    Ok(())
}

#[test]
fn crossing_break_lines_share_a_vertex() -> Result<()> {
    let layers = vec![line_layer(
        "cross",
        vec![
            vec![(0., 0., 0.), (2., 2., 2.)],
            vec![(0., 2., 5.), (2., 0., 5.)],
        ],
    )];
    let sources = [SourceParameters::break_lines("cross", ValueSelector::Elevation)];

    let input = steps::ingest_sources(&sources, &layers, &ProjReprojector)?;
    let prepared = steps::preprocess(input, &TinParameters::default())?;
    assert_eq!(prepared.vertices.len(), 5);
    assert_eq!(prepared.constraints.len(), 4);

    let mesh = steps::assemble_mesh(&steps::triangulate(prepared)?)?;
    assert_eq!(mesh.face_count(), 4);
    for corner in 0..4 {
        assert!(mesh.contains_edge(corner, 4));
    }
    assert!((mesh.nodes[4].value - 1.).abs() < 1e-12);
    Ok(())
}

#[test]
fn unit_square_has_two_triangles() -> Result<()> {
    let layers = vec![point_layer(
        "square",
        &[(0., 0., 1.), (1., 0., 2.), (1., 1., 3.), (0., 1., 4.)],
    )];
    let mesh = build(&[by_field("square")], &layers)?;

    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.edges().len(), 5);
    assert!(mesh.contains_edge(0, 2) ^ mesh.contains_edge(1, 3));
    let values: Vec<f64> = mesh.nodes.iter().map(|n| n.value).collect();
    assert_eq!(values, vec![1., 2., 3., 4.]);
    mesh.validate()
}

#[test]
fn collinear_points_are_insufficient() {
    let layers = vec![point_layer("line", &[(0., 0., 1.), (1., 1., 2.), (2., 2., 3.)])];
    assert!(matches!(
        build(&[by_field("line")], &layers),
        Err(Error::InsufficientData(_))
    ));
}

#[test]
fn empty_input_is_a_configuration_error() {
    let layers: Vec<SourceLayer> = vec![];
    assert!(matches!(build(&[], &layers), Err(Error::Configuration(_))));
}

struct CountingDriver(Rc<Cell<usize>>);

impl MeshDriver for CountingDriver {
    fn format_name(&self) -> &str {
        "counting"
    }

    fn file_extension(&self) -> &str {
        "cnt"
    }

    fn write(&self, _: &Mesh, _: &Crs, _: &Path) -> std::result::Result<(), DriverError> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

#[test]
fn cancelled_run_never_exports() {
    let calls = Rc::new(Cell::new(0));
    let mut drivers = DriverRegistry::empty();
    drivers.register(CountingDriver(calls.clone()));

    let layers = vec![point_layer(
        "square",
        &[(0., 0., 1.), (1., 0., 2.), (1., 1., 3.), (0., 1., 4.)],
    )];
    let output = OutputParameters {
        path: "unused.cnt".into(),
        format: "counting".into(),
    };

    let feedback = Feedback::new();
    feedback.cancel();
    let res = create_tin_mesh(
        &[by_field("square")],
        &layers,
        &ProjReprojector,
        &TinParameters::default(),
        &output,
        &drivers,
        &feedback,
    );
    assert!(matches!(res, Err(Error::Cancelled)));
    assert_eq!(calls.get(), 0);

    create_tin_mesh(
        &[by_field("square")],
        &layers,
        &ProjReprojector,
        &TinParameters::default(),
        &output,
        &drivers,
        &Feedback::new(),
    )
    .expect("uncancelled run succeeds");
    assert_eq!(calls.get(), 1);
}

#[test]
fn unknown_format_fails_before_ingestion() {
    let layers: Vec<SourceLayer> = vec![];
    let output = OutputParameters {
        path: "unused".into(),
        format: "NetCDF".into(),
    };
    // the missing layer would also be a configuration error, the format check comes first
    let res = create_tin_mesh(
        &[by_field("missing")],
        &layers,
        &ProjReprojector,
        &TinParameters::default(),
        &output,
        &DriverRegistry::default(),
        &Feedback::new(),
    );
    match res {
        Err(Error::Configuration(msg)) => assert!(msg.contains("NetCDF")),
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn polygon_levee_with_reprojected_points_to_2dm() -> Result<()> {
    let mut levee = SourceLayer::new(
        "levee",
        Crs::Epsg(32633),
        vec![Field::new("crest", FieldKind::Integer)],
    );
    let ring: Vec<PointZ> = [
        (500_010., 6_650_010.),
        (500_090., 6_650_010.),
        (500_090., 6_650_090.),
        (500_010., 6_650_090.),
        (500_010., 6_650_010.),
    ]
    .into_iter()
    .map(PointZ::from)
    .collect();
    levee.push(Feature::new(
        Geometry::Polygon(vec![ring]),
        vec![AttributeValue::Integer(12)],
    ));

    // the corner survey arrives in geographic coordinates
    let mut surveyed: Vec<PointZ> = [
        (500_000., 6_650_000.),
        (500_100., 6_650_000.),
        (500_100., 6_650_100.),
        (500_000., 6_650_100.),
    ]
    .into_iter()
    .map(|(x, y)| PointZ::new(x, y, 5.))
    .collect();
    ProjReprojector.reproject(&mut surveyed, &Crs::Epsg(32633), &Crs::Epsg(4326))?;

    let mut corners = SourceLayer::new("corners", Crs::Epsg(4326), vec![]);
    for p in surveyed {
        corners.push(Feature::new(Geometry::Point(p), vec![]));
    }

    let layers = vec![levee, corners];
    let sources = [
        SourceParameters::break_lines("levee", ValueSelector::Field("crest".into())),
        SourceParameters::points("corners", ValueSelector::Elevation),
    ];
    let path = std::env::temp_dir().join("tin_mesh_levee.2dm");
    let output = OutputParameters {
        path: path.clone(),
        format: "2DM".into(),
    };

    let mesh = create_tin_mesh(
        &sources,
        &layers,
        &ProjReprojector,
        &TinParameters::default(),
        &output,
        &DriverRegistry::default(),
        &Feedback::new(),
    )?;

    // closing ring vertex merged into the first one
    assert_eq!(mesh.vertex_count(), 8);
    for i in 0..4 {
        assert!(mesh.contains_edge(i, (i + 1) % 4));
    }
    assert_eq!(mesh.crs, Crs::Epsg(32633));
    let extent = mesh.extent().expect("mesh has nodes");
    assert!((extent.min().x - 500_000.).abs() < 1e-3);
    assert!((extent.max().y - 6_650_100.).abs() < 1e-3);
    assert!(mesh.nodes[4..].iter().all(|n| n.value == 5.));

    let text = std::fs::read_to_string(&path).map_err(DriverError::from)?;
    assert_eq!(text.lines().filter(|l| l.starts_with("ND ")).count(), 8);
    assert!(path.with_extension("prj").exists());

    std::fs::remove_file(&path).map_err(DriverError::from)?;
    std::fs::remove_file(path.with_extension("prj")).map_err(DriverError::from)?;
    Ok(())
}
