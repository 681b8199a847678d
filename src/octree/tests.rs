use cgmath::{Point3, Vector3};

use crate::{
    handle::{FaceHandle, Handle},
    intersection::{cube_contains_sphere, ray_triangle, sphere_triangle},
    primitive::{Ray, Sphere, Triangle},
};
use super::*;


fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
    Triangle::new(a.into(), b.into(), c.into())
}

/// Small triangle in the xy-plane at `z`, with its lower left corner at
/// `(x, y)`.
fn small_tri(x: f32, y: f32, z: f32, size: f32) -> Triangle {
    tri([x, y, z], [x + size, y, z], [x, y + size, z])
}

/// Octree with root cube `[-1, 1]³` and the given triangles inserted with
/// face handles equal to their index.
fn tree_with(triangles: &[Triangle]) -> (Octree, Vec<NodeHandle>) {
    let mut tree = Octree::new();
    tree.setup_root(Point3::new(0.0, 0.0, 0.0), 2.0);

    let nodes = triangles.iter()
        .enumerate()
        .map(|(i, t)| tree.insert(FaceHandle::from_usize(i), &t.bounding_sphere()))
        .collect();

    (tree, nodes)
}

fn grid() -> Vec<Triangle> {
    let mut out = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            let x = -0.95 + i as f32 * 0.24;
            let y = -0.95 + j as f32 * 0.24;
            let size = if (i + j) % 3 == 0 { 0.2 } else { 0.03 };
            out.push(small_tri(x, y, 0.1 * (i as f32 - 4.0), size));
        }
    }
    out
}

/// Checks that every face sits in the deepest node fully containing its
/// bounding sphere and that each face is stored exactly once.
fn assert_deepest_fit(tree: &Octree, triangles: &[Triangle]) {
    let root = tree.root().unwrap();
    let mut seen = vec![0; triangles.len()];

    for (nh, node) in tree.nodes() {
        for &f in node.faces() {
            seen[f.to_usize()] += 1;
            let sphere = triangles[f.to_usize()].bounding_sphere();

            if nh != root {
                assert!(
                    cube_contains_sphere(node.center(), node.width(), &sphere),
                    "{:?} not contained in {:?}",
                    f,
                    nh,
                );
            }

            if node.depth() < tree.max_depth() {
                for octant in 0..8 {
                    assert!(!node.child_contains(octant, &sphere), "{:?} could go deeper", f);
                }
            }
        }
    }

    assert!(seen.iter().all(|&n| n == 1), "faces stored more than once: {:?}", seen);
    assert_eq!(tree.num_faces() as usize, triangles.len());
    assert_eq!(tree.count_faces(), tree.num_faces());
}

#[test]
fn empty_tree() {
    let tree = Octree::new();
    assert!(!tree.has_root());
    assert!(tree.is_empty());

    let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(tree.intersect_ray(&ray, |_| Some(1.0)), None);

    let mut out = Vec::new();
    assert!(!tree.intersect_sphere(&Sphere::new(Point3::new(0.0, 0.0, 0.0), 10.0), |_| true, &mut out));
}

#[test]
fn big_face_stays_in_root() {
    let (tree, nodes) = tree_with(&[tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0])]);
    assert_eq!(nodes[0], tree.root().unwrap());
    assert_eq!(tree.num_nodes(), 1);
}

#[test]
fn face_outside_of_root_cube_stays_in_root() {
    let triangles = [small_tri(5.0, 5.0, 5.0, 0.1)];
    let (tree, nodes) = tree_with(&triangles);
    assert_eq!(nodes[0], tree.root().unwrap());
    assert_deepest_fit(&tree, &triangles);
}

#[test]
fn small_face_goes_deep() {
    let triangles = [small_tri(0.33, 0.41, 0.27, 0.01)];
    let (tree, nodes) = tree_with(&triangles);

    let node = tree.node(nodes[0]).unwrap();
    assert!(node.depth() > 3);
    assert!(node.width() < 0.25);
    assert_deepest_fit(&tree, &triangles);
}

#[test]
fn deepest_fit_for_grid() {
    let triangles = grid();
    let (tree, _) = tree_with(&triangles);
    assert_deepest_fit(&tree, &triangles);
}

#[test]
fn max_depth_is_respected() {
    let mut tree = Octree::with_max_depth(2);
    tree.setup_root(Point3::new(0.0, 0.0, 0.0), 2.0);

    let t = small_tri(0.33, 0.41, 0.27, 0.001);
    let node = tree.insert(FaceHandle::new(0), &t.bounding_sphere());
    assert_eq!(tree.node(node).unwrap().depth(), 2);
    assert!(tree.nodes().all(|(_, n)| n.depth() <= 2));
}

#[test]
fn delete_and_count() {
    let triangles = grid();
    let (mut tree, nodes) = tree_with(&triangles);
    let num_nodes = tree.num_nodes();

    tree.delete(FaceHandle::new(3), nodes[3]);
    tree.delete(FaceHandle::new(10), nodes[10]);

    assert_eq!(tree.num_faces() as usize, triangles.len() - 2);
    assert_eq!(tree.count_faces(), tree.num_faces());
    assert!(!tree.node(nodes[3]).unwrap().faces().contains(&FaceHandle::new(3)));

    // Empty nodes are kept
    assert_eq!(tree.num_nodes(), num_nodes);
}

#[test]
#[should_panic]
fn delete_from_wrong_node() {
    let triangles = [small_tri(0.5, 0.5, 0.5, 0.01), small_tri(-0.5, -0.5, -0.5, 0.01)];
    let (mut tree, nodes) = tree_with(&triangles);
    tree.delete(FaceHandle::new(0), nodes[1]);
}

#[test]
fn realign() {
    let mut triangles = vec![small_tri(0.33, 0.41, 0.27, 0.01)];
    let (mut tree, nodes) = tree_with(&triangles);
    let f = FaceHandle::new(0);

    // Tiny move: still fits the same node
    triangles[0] = small_tri(0.331, 0.41, 0.27, 0.01);
    let (same_node, same) = tree.realign(f, nodes[0], &triangles[0].bounding_sphere());
    assert!(same);
    assert_eq!(same_node, nodes[0]);

    // Grows over the whole root cube
    triangles[0] = tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
    let (new_node, same) = tree.realign(f, nodes[0], &triangles[0].bounding_sphere());
    assert!(!same);
    assert_eq!(new_node, tree.root().unwrap());
    assert_deepest_fit(&tree, &triangles);
}

#[test]
fn ray_returns_closest_hit() {
    let triangles = vec![
        tri([-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.0, 0.5, 0.5]),
        tri([-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.0, 0.5, -0.5]),
        small_tri(0.6, 0.6, 0.9, 0.05),
    ];
    let (tree, _) = tree_with(&triangles);

    let ray = Ray::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
    let hit = tree.intersect_ray(&ray, |f| ray_triangle(&ray, &triangles[f.to_usize()]));
    let (face, dist) = hit.unwrap();
    assert_eq!(face, FaceHandle::new(0));
    assert!((dist - 2.5).abs() < 1e-5);

    let from_below = Ray::new(Point3::new(0.0, 0.0, -3.0), Vector3::new(0.0, 0.0, 1.0));
    let hit = tree.intersect_ray(&from_below, |f| ray_triangle(&from_below, &triangles[f.to_usize()]));
    assert_eq!(hit.map(|(f, _)| f), Some(FaceHandle::new(1)));

    let miss = Ray::new(Point3::new(0.9, -0.9, 3.0), Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(tree.intersect_ray(&miss, |f| ray_triangle(&miss, &triangles[f.to_usize()])), None);
}

#[test]
fn sphere_collects_all_touching_faces() {
    let triangles = grid();
    let (tree, _) = tree_with(&triangles);
    let sphere = Sphere::new(Point3::new(-0.5, -0.5, 0.0), 0.6);

    let mut out = Vec::new();
    let found = tree.intersect_sphere(&sphere, |f| sphere_triangle(&sphere, &triangles[f.to_usize()]), &mut out);

    let mut expected: Vec<_> = (0..triangles.len())
        .filter(|&i| sphere_triangle(&sphere, &triangles[i]))
        .map(FaceHandle::from_usize)
        .collect();
    out.sort();
    expected.sort();

    assert!(found);
    assert!(!expected.is_empty());
    assert_eq!(out, expected);
}

#[test]
fn for_each_face_visits_everything_once() {
    let triangles = grid();
    let (tree, _) = tree_with(&triangles);

    let mut visited = Vec::new();
    tree.for_each_face(|f| visited.push(f));
    visited.sort();

    let all: Vec<_> = (0..triangles.len()).map(FaceHandle::from_usize).collect();
    assert_eq!(visited, all);
}

#[test]
#[should_panic]
fn setup_root_with_faces() {
    let (mut tree, _) = tree_with(&[small_tri(0.0, 0.0, 0.0, 0.1)]);
    tree.setup_root(Point3::new(0.0, 0.0, 0.0), 4.0);
}

#[test]
fn reset_removes_root() {
    let (mut tree, _) = tree_with(&grid());
    tree.reset();
    assert!(!tree.has_root());
    assert_eq!(tree.num_faces(), 0);
    assert_eq!(tree.num_nodes(), 0);
}
