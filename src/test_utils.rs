use std::{collections::HashMap, fmt::Debug};

use cgmath::Point3;

use crate::{
    hsize,
    bounding::BoundingBox,
    handle::{EdgeHandle, FaceHandle, Handle, VertexHandle},
    id::IdGenerator,
    primitive::Triangle,
    winged::{Edge, Face, Side, WingedMesh},
};


/// Macro version of `cmp_rotated` with nicer error message.
macro_rules! assert_rotated_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        if crate::test_utils::cmp_rotated(&lhs, &rhs).is_err() {
            panic!(
                "assert_rotated_eq failed:\n\
                    |  left: {:?} ({})\n\
                    | right: {:?} ({})\n",
                lhs,
                stringify!($lhs),
                rhs,
                stringify!($rhs),
            );
        }
    }};
}

/// Compares `actual` and `expected` like rings: `[a, b, c]`, `[b, c, a]` and
/// `[c, a, b]` are all equal.
///
/// If the slices are equal, `Ok(())` is returned. Otherwise, `Err(rotated)` is
/// returned, where `rotated` is `expected` rotated to look most similar to
/// `actual`.
pub(crate) fn cmp_rotated<T: Debug + PartialEq + Clone>(
    actual: &[T],
    expected: &[T],
) -> Result<(), Vec<T>> {
    let mut rotated = expected.to_vec();

    if actual.len() != expected.len() {
        return Err(rotated);
    }

    if !actual.is_empty() {
        let pos = match actual.iter().position(|e| e == &expected[0]) {
            Some(pos) => pos,
            None => return Err(rotated),
        };

        rotated.rotate_right(pos);
        if actual != &rotated[..] {
            return Err(rotated);
        }
    }

    Ok(())
}

/// Builds a mesh by directly calling the (unrecorded) mesh methods. The face
/// with index `i` in `triangles` gets the handle `F{i}`.
pub(crate) fn build(positions: &[[f32; 3]], triangles: &[[hsize; 3]]) -> WingedMesh {
    build_with(positions, triangles, &mut IdGenerator::new())
}

/// Like [`build`], but draws element ids from `ids`, so that the caller can
/// keep editing the mesh with the same generator.
pub(crate) fn build_with(
    positions: &[[f32; 3]],
    triangles: &[[hsize; 3]],
    ids: &mut IdGenerator,
) -> WingedMesh {
    let mut mesh = WingedMesh::new();

    let bb = BoundingBox::around(positions.iter().map(|&p| Point3::from(p)));
    mesh.setup_octree_root(bb.center(), bb.max_extent());
    for &p in positions {
        mesh.add_vertex(p.into(), 0);
    }

    let mut directed = HashMap::new();
    let mut cycles: Vec<(FaceHandle, [EdgeHandle; 3])> = Vec::new();
    for t in triangles {
        let vs = [VertexHandle::new(t[0]), VertexHandle::new(t[1]), VertexHandle::new(t[2])];
        let tri = Triangle::new(mesh.position(vs[0]), mesh.position(vs[1]), mesh.position(vs[2]));
        let f = mesh.add_face(Face::new(ids.next_id()), &tri);

        let mut es = [EdgeHandle::new(0); 3];
        for k in 0..3 {
            let (from, to) = (vs[k], vs[(k + 1) % 3]);
            es[k] = match directed.get(&(to, from)) {
                Some(&e) => {
                    mesh.set_edge_face(e, Side::Right, Some(f));
                    e
                }
                None => {
                    let e = mesh.add_edge(Edge::new(ids.next_id(), from, to).with_face(Side::Left, f));
                    directed.insert((from, to), e);
                    e
                }
            };

            if mesh.vertex(from).unwrap().edge().is_none() {
                mesh.set_vertex_edge(from, Some(es[k]));
            }
        }

        mesh.set_face_edge(f, Some(es[0]));
        cycles.push((f, es));
    }

    for (f, es) in cycles {
        for k in 0..3 {
            let side = mesh.edge(es[k]).unwrap().side(f);
            mesh.set_edge_link(es[k], side.successor(), Some(es[(k + 1) % 3]));
            mesh.set_edge_link(es[k], side.predecessor(), Some(es[(k + 2) % 3]));
        }
    }

    mesh.write_all_indices();
    mesh.write_all_interpolated_normals();
    mesh
}

pub(crate) fn v(idx: hsize) -> VertexHandle {
    VertexHandle::new(idx)
}

pub(crate) fn f(idx: hsize) -> FaceHandle {
    FaceHandle::new(idx)
}

pub(crate) const SINGLE_TRIANGLE: &[[f32; 3]] = &[
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Four vertices for two triangles sharing the edge `1 - 2`.
pub(crate) const QUAD: &[[f32; 3]] = &[
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
];

pub(crate) const TETRAHEDRON: &[[f32; 3]] = &[
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Counter clockwise seen from outside.
pub(crate) const TETRAHEDRON_FACES: &[[hsize; 3]] = &[
    [0, 2, 1],
    [0, 1, 3],
    [0, 3, 2],
    [1, 2, 3],
];
