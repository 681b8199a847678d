//! Measures importing, ray queries and undo/redo of edits.

use criterion::{
    criterion_group, criterion_main, black_box, BatchSize, Criterion,
};
use cgmath::{Point3, Vector3};

use winged::{
    hsize,
    action::{Action, ActionFromMesh, ActionSplitEdge, MeshDefinition},
    IdGenerator, Ray, WingedMesh,
};


// ===============================================================================================
// ===== Helper utilities
// ===============================================================================================

/// A wavy `n` x `n` grid, so that the octree actually has to sort faces.
fn wavy_grid(n: hsize) -> MeshDefinition {
    let mut vertices = Vec::new();
    for y in 0..=n {
        for x in 0..=n {
            let (fx, fy) = (x as f32 / n as f32, y as f32 / n as f32);
            let z = 0.1 * (fx * 12.0).sin() * (fy * 9.0).cos();
            vertices.push(Point3::new(fx, fy, z));
        }
    }

    let idx = |x: hsize, y: hsize| y * (n + 1) + x;
    let mut indices = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let (a, b, c, d) = (idx(x, y), idx(x + 1, y), idx(x, y + 1), idx(x + 1, y + 1));
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }

    MeshDefinition::new(vertices, indices)
}

fn imported(def: &MeshDefinition) -> WingedMesh {
    let mut mesh = WingedMesh::new();
    ActionFromMesh::run(&mut mesh, def, &mut IdGenerator::new()).unwrap();
    mesh
}


// ===============================================================================================
// ===== Benchmarks
// ===============================================================================================

fn import_grid(c: &mut Criterion) {
    let def = wavy_grid(64);

    c.bench_function("import_grid_64", |b| {
        b.iter_batched(
            || WingedMesh::new(),
            |mut mesh: WingedMesh| {
                let action = ActionFromMesh::run(&mut mesh, black_box(&def), &mut IdGenerator::new());
                black_box(action.unwrap());
                mesh
            },
            BatchSize::LargeInput,
        )
    });
}

fn ray_queries(c: &mut Criterion) {
    let mesh = imported(&wavy_grid(64));

    c.bench_function("ray_queries_grid_64", |b| {
        b.iter(|| {
            for i in 0..100 {
                let t = i as f32 / 100.0;
                let ray = Ray::new(Point3::new(t, 1.0 - t, 1.0), Vector3::new(0.0, 0.0, -1.0));
                black_box(mesh.intersects_ray(black_box(&ray)));
            }
        })
    });
}

fn split_undo_redo(c: &mut Criterion) {
    let def = wavy_grid(32);

    c.bench_function("split_undo_redo_grid_32", |b| {
        b.iter_batched(
            || {
                let mut mesh = imported(&def);
                let mut ids = IdGenerator::new();
                let edge = mesh.edges().nth(100).unwrap().0;
                let action = ActionSplitEdge::run(&mut mesh, edge, &mut ids);
                (mesh, action)
            },
            |(mut mesh, mut action)| {
                action.undo(&mut mesh);
                action.redo(&mut mesh);
                (mesh, action)
            },
            BatchSize::LargeInput,
        )
    });
}


criterion_group!(benches,
    import_grid,
    ray_queries,
    split_undo_redo,
);
criterion_main!(benches);
