//! Mesh Sampling Example
//!
//! Samples points with normals from a built-in mesh and prints a summary
//! of how the samples were distributed over the triangles.

use anyhow::Context as _;
use barysample_algorithms::{ExcessCorrection, MeshSampler, NormalWeighting, SamplingConfig};
use barysample_core::{rotate_z, Point3f, TriangleMesh};
use clap::{Parser, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    /// Single right triangle in the XY plane
    Triangle,
    /// Unit cube
    Cube,
    /// Bumpy height-field grid
    Grid,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    RandomDecrement,
    LargestRemainder,
}

#[derive(Debug, Parser)]
#[command(about = "Area-weighted sampling of a built-in triangle mesh")]
struct Args {
    /// Mesh to sample
    #[arg(long, value_enum, default_value = "cube")]
    shape: Shape,

    /// Number of samples
    #[arg(short = 'n', long, default_value_t = 1000)]
    samples: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// How rounding surplus is removed
    #[arg(long, value_enum, default_value = "random-decrement")]
    strategy: Strategy,

    /// Weight vertex normals by face area
    #[arg(long)]
    area_weighted_normals: bool,

    /// Rescale interpolated normals to unit length
    #[arg(long)]
    renormalize: bool,

    /// Rotate the mesh about Z by this many degrees before sampling
    #[arg(long, default_value_t = 0.0)]
    rotate_deg: f32,

    /// Number of sampled points to print
    #[arg(long, default_value_t = 5)]
    show: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    use simplelog::LevelFilter::{Debug, Info, Off};
    simplelog::TermLogger::init(
        if args.verbose { Debug } else { Info },
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut mesh = match args.shape {
        Shape::Triangle => triangle(),
        Shape::Cube => cube(),
        Shape::Grid => grid(24),
    };
    if args.rotate_deg != 0.0 {
        mesh.vertices = rotate_z(&mesh.vertices, args.rotate_deg.to_radians());
    }
    mesh.validate().context("built-in mesh is malformed")?;
    log::info!(
        "{:?}: {} vertices, {} faces, area {:.4}",
        args.shape,
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.surface_area()?
    );

    let mut config = SamplingConfig::default()
        .with_excess_correction(match args.strategy {
            Strategy::RandomDecrement => ExcessCorrection::RandomDecrement,
            Strategy::LargestRemainder => ExcessCorrection::LargestRemainder,
        })
        .with_normal_weighting(if args.area_weighted_normals {
            NormalWeighting::AreaWeighted
        } else {
            NormalWeighting::Unweighted
        })
        .with_renormalized_normals(args.renormalize);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let sampler = MeshSampler::new(config);

    let start = Instant::now();
    let samples = sampler.sample(&mesh, args.samples)?;
    let cloud = sampler.points_from_samples(&mesh, &samples)?;
    log::info!("sampled {} points in {:?}", cloud.len(), start.elapsed());

    let runs = samples.triangle_runs();
    let areas = mesh.triangle_areas()?;
    let total_area: f64 = areas.iter().sum();
    println!("triangle  samples  expected");
    for (triangle, count) in &runs {
        let expected = args.samples as f64 * areas[*triangle] / total_area;
        println!("{triangle:>8}  {count:>7}  {expected:>8.2}");
    }
    println!("{} of {} triangles received samples", runs.len(), mesh.face_count());

    for point in cloud.iter().take(args.show) {
        let p = point.position;
        let n = point.normal;
        println!(
            "p = ({:+.4}, {:+.4}, {:+.4})  n = ({:+.4}, {:+.4}, {:+.4})  |n| = {:.4}",
            p.x, p.y, p.z, n.x, n.y, n.z, n.norm()
        );
    }

    if let Some((min, max)) = cloud.bounding_box() {
        println!("bounds: {min:?} .. {max:?}");
    }

    Ok(())
}

fn triangle() -> TriangleMesh {
    TriangleMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
}

fn cube() -> TriangleMesh {
    let vertices = (0..8)
        .map(|i| Point3f::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32))
        .collect();
    let faces = vec![
        [0, 2, 3], [0, 3, 1], // z = 0
        [4, 5, 7], [4, 7, 6], // z = 1
        [0, 1, 5], [0, 5, 4], // y = 0
        [2, 6, 7], [2, 7, 3], // y = 1
        [0, 4, 6], [0, 6, 2], // x = 0
        [1, 3, 7], [1, 7, 5], // x = 1
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn grid(size: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            mesh.add_vertex(Point3f::new(x as f32, y as f32, (fx.sin() * fy.sin()) * 2.0));
        }
    }
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            mesh.add_face([tl, bl, tr]);
            mesh.add_face([tr, bl, br]);
        }
    }
    mesh
}
