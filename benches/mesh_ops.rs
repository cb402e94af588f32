//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use icosasphere::prelude::*;

fn bench_sphere_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_icosasphere");
    for min_vertices in [162, 642, 2562] {
        group.bench_with_input(
            BenchmarkId::from_parameter(min_vertices),
            &min_vertices,
            |b, &n| b.iter(|| build_icosasphere(n).unwrap()),
        );
    }
    group.finish();

    let base = icosahedron().unwrap();
    let (positions, faces) = base.to_face_vertex();
    c.bench_function("build_polyhedron_icosahedron", |b| {
        b.iter(|| build_polyhedron(&positions, &faces).unwrap());
    });
}

fn bench_subdivision(c: &mut Criterion) {
    let mesh = build_icosasphere(642).unwrap();

    c.bench_function("subdivide_642", |b| {
        b.iter(|| subdivide(&mesh).unwrap());
    });
}

fn bench_tables(c: &mut Criterion) {
    let mesh = build_icosasphere(10_242).unwrap();

    c.bench_function("vertex_tables_sequential", |b| {
        b.iter(|| VertexTables::build(&mesh, &TableOptions::default()));
    });

    c.bench_function("vertex_tables_parallel", |b| {
        b.iter(|| VertexTables::build(&mesh, &TableOptions::default().with_parallel(true)));
    });

    c.bench_function("neighbours_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for v in mesh.vertex_ids() {
                count += mesh.neighbours_of(v).count();
            }
            count
        });
    });
}

criterion_group!(benches, bench_sphere_construction, bench_subdivision, bench_tables);
criterion_main!(benches);
