//! Icosasphere CLI - build spherical meshes and inspect their tables.
//!
//! Usage: icosasphere <COMMAND> [OPTIONS]
//!
//! Run `icosasphere --help` for available commands. Set `RUST_LOG=debug` to
//! see construction stages.

use std::collections::BTreeMap;
use std::time::Instant;

use clap::{Parser, Subcommand};

use icosasphere::algo::icosasphere::{build_icosasphere, subdivisions_for_vertex_count};
use icosasphere::error::MeshError;
use icosasphere::mesh::VertexId;
use icosasphere::tables::{TableOptions, VertexTables};

#[derive(Parser)]
#[command(name = "icosasphere")]
#[command(author, version, about = "Icosasphere mesh CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an icosasphere and display mesh information
    Info {
        /// Minimum number of vertices
        #[arg(short = 'n', long, default_value = "642")]
        min_vertices: usize,

        /// Build the vertex tables in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Print the vertex tables for one vertex
    Tables {
        /// Minimum number of vertices
        #[arg(short = 'n', long, default_value = "42")]
        min_vertices: usize,

        /// Dense index of the vertex to print
        #[arg(short, long, default_value = "0")]
        vertex: usize,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info {
            min_vertices,
            parallel,
        } => {
            cmd_info(min_vertices, parallel)?;
        }

        Commands::Tables {
            min_vertices,
            vertex,
        } => {
            cmd_tables(min_vertices, vertex)?;
        }
    }

    Ok(())
}

fn cmd_info(min_vertices: usize, parallel: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rounds = subdivisions_for_vertex_count(min_vertices)?;

    let start = Instant::now();
    let sphere = build_icosasphere(min_vertices)?;
    let build_time = start.elapsed();

    println!("Subdivision rounds: {}", rounds);
    println!("Vertices: {}", sphere.num_vertices());
    println!("Edges: {}", sphere.num_edges());
    println!("Faces: {}", sphere.num_faces());
    println!("Euler characteristic: {}", sphere.euler_characteristic());

    // Degree histogram
    let mut degrees: BTreeMap<usize, usize> = BTreeMap::new();
    for v in sphere.vertex_ids() {
        *degrees.entry(sphere.degree(v)).or_insert(0) += 1;
    }
    for (degree, count) in &degrees {
        println!("  degree {}: {} vertices", degree, count);
    }

    // Edge length statistics
    let mut min_arc = f64::MAX;
    let mut max_arc = 0.0_f64;
    for e in sphere.edge_ids() {
        let arc = sphere.edge_arc_length(e);
        min_arc = min_arc.min(arc);
        max_arc = max_arc.max(arc);
    }
    println!("Edge arc length range: [{:.6}, {:.6}]", min_arc, max_arc);

    let options = TableOptions::default().with_parallel(parallel);
    let start = Instant::now();
    let tables = VertexTables::build(&sphere, &options);
    let table_time = start.elapsed();

    let sphere_area = 4.0 * std::f64::consts::PI;
    let total_area: f64 = tables.areas.iter().sum();
    println!("Surface area (flat faces): {:.6}", sphere.surface_area());
    println!(
        "Total cell area: {:.6} (4π = {:.6}, error {:.4}%)",
        total_area,
        sphere_area,
        100.0 * (total_area - sphere_area).abs() / sphere_area
    );

    let mode = if parallel { "parallel" } else { "sequential" };
    println!(
        "Built mesh in {:.2?}, tables in {:.2?} ({})",
        build_time, table_time, mode
    );

    Ok(())
}

fn cmd_tables(min_vertices: usize, vertex: usize) -> Result<(), Box<dyn std::error::Error>> {
    let sphere = build_icosasphere(min_vertices)?;
    if vertex >= sphere.num_vertices() {
        return Err(
            MeshError::invalid_param("vertex", vertex, "not a vertex of the mesh").into(),
        );
    }

    let tables = VertexTables::build(&sphere, &TableOptions::default());
    let p = sphere.position(VertexId::new(vertex));

    println!("Vertex {} of {}", vertex, sphere.num_vertices());
    println!("Position: ({:.6}, {:.6}, {:.6})", p.x, p.y, p.z);
    let n = tables.normals[vertex];
    println!("Normal: ({:.6}, {:.6}, {:.6})", n.x, n.y, n.z);
    println!("Cell area: {:.6}", tables.areas[vertex]);
    println!();
    println!(
        "{:>3} {:>9} {:>6} {:>10} {:>10} {:>10}  edge normal",
        "k", "neighbour", "face", "distance", "half edge", "face area"
    );

    let edge_normals = &tables.edge_normals[vertex];
    for k in 0..tables.neighbours[vertex].len() {
        let en = edge_normals[k];
        println!(
            "{:>3} {:>9} {:>6} {:>10.6} {:>10.6} {:>10.6}  ({:.4}, {:.4}, {:.4})",
            k,
            tables.neighbours[vertex][k],
            tables.faces[vertex][k],
            tables.distances[vertex][k],
            tables.half_edge_lengths[vertex][k],
            tables.area_in_each_face[vertex][k],
            en.x,
            en.y,
            en.z
        );
    }

    Ok(())
}
