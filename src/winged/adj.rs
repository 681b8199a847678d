//! Walking around faces and vertices along the winged pointers.

use smallvec::SmallVec;

use crate::{
    handle::{opt, EdgeHandle, FaceHandle, Opt, VertexHandle},
    map::DenseMap,
};
use super::Edge;


/// Iterates over the boundary edges of a face, starting with the face's
/// entry edge and following the successor links.
pub struct FaceCirculator<'a> {
    edges: &'a DenseMap<EdgeHandle, Edge>,
    face: FaceHandle,
    start: Opt<EdgeHandle>,
    current: Opt<EdgeHandle>,
}

impl<'a> FaceCirculator<'a> {
    pub(super) fn new(
        edges: &'a DenseMap<EdgeHandle, Edge>,
        face: FaceHandle,
        start: Option<EdgeHandle>,
    ) -> Self {
        let start = opt(start);
        Self {
            edges,
            face,
            start,
            current: start,
        }
    }
}

impl Iterator for FaceCirculator<'_> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.into_option()?;
        let next = self.edges[current].successor(self.face).unwrap_or_else(|| {
            panic!("bug: broken face cycle: {:?} has no successor around {:?}", current, self.face)
        });

        self.current = if self.start.into_option() == Some(next) { Opt::none() } else { Opt::some(next) };
        Some(current)
    }
}


/// Edges incident to `vertex`, in rotation order, starting with `start`.
///
/// The rotation first follows the faces in which the edges leave `vertex`.
/// If it hits a boundary before coming back to `start`, the remaining edges
/// are collected by rotating in the other direction from `start`.
pub(super) fn vertex_rotation(
    edges: &DenseMap<EdgeHandle, Edge>,
    vertex: VertexHandle,
    start: EdgeHandle,
) -> SmallVec<[EdgeHandle; 8]> {
    // Bound for corrupted meshes whose rotation never returns to `start`
    let limit = edges.num_elements() as usize;

    let mut out = SmallVec::new();
    let mut current = start;
    loop {
        out.push(current);
        assert!(out.len() <= limit, "bug: rotation around {:?} does not terminate", vertex);

        let e = &edges[current];
        debug_assert!(e.has_vertex(vertex), "bug: {:?} in rotation of {:?}", current, vertex);
        let face = match e.face(e.outgoing_side(vertex)) {
            Some(f) => f,
            None => break,
        };

        let next = e.predecessor(face).unwrap_or_else(|| {
            panic!("bug: {:?} has no predecessor around {:?}", current, face)
        });
        if next == start {
            return out;
        }
        current = next;
    }

    // Open fan: walk from `start` in the other direction
    let mut current = start;
    loop {
        let e = &edges[current];
        let face = match e.face(e.outgoing_side(vertex).opposite()) {
            Some(f) => f,
            None => break,
        };

        let next = e.successor(face).unwrap_or_else(|| {
            panic!("bug: {:?} has no successor around {:?}", current, face)
        });
        if next == start {
            break;
        }

        out.push(next);
        assert!(out.len() <= limit, "bug: rotation around {:?} does not terminate", vertex);
        current = next;
    }

    out
}
