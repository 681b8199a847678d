use cgmath::{EuclideanSpace, Point3};
use tracing::debug;

use crate::{
    buffer::RenderBuffer,
    handle::{EdgeHandle, FaceHandle, VertexHandle},
    id::IdGenerator,
    primitive::Triangle,
    winged::{Edge, End, Face, Link, Side, WingedMesh},
};
use super::{refresh, Action, ActionUnit};


/// Inserts a new vertex at `position` into `edge`, recording everything in
/// `unit`. Returns the new edge.
///
/// ```text
///        new          edge
///   v1 -------> m -------> v2
/// ```
///
/// The edge `v1 -> v2` is shortened to `m -> v2` and a new edge `v1 -> m` is
/// inserted in front of it on both faces. The two edges become siblings.
/// Afterwards, the adjacent faces are quadrangles: they have to be
/// retriangulated by the caller.
pub fn insert_edge_vertex<B: RenderBuffer>(
    unit: &mut ActionUnit,
    mesh: &mut WingedMesh<B>,
    edge: EdgeHandle,
    position: Point3<f32>,
    ids: &mut IdGenerator,
) -> EdgeHandle {
    let e = *mesh.edge(edge).expect("bug: splitting non-existing edge");
    let (v1, v2) = (e.vertex1(), e.vertex2());

    let level = 1 + vertex_level(mesh, v1).max(vertex_level(mesh, v2));
    let m = unit.add_vertex(mesh, position, level);

    let mut new = Edge::new(ids.next_id(), v1, m);
    new.is_t_edge = e.is_t_edge();
    new.face_gradient = e.face_gradient();
    new.set_link(Link::PreviousSibling, e.link(Link::PreviousSibling));
    new.set_link(Link::NextSibling, Some(edge));
    if let Some(left) = e.left_face() {
        new.set_face(Side::Left, Some(left));
        new.set_link(Link::LeftPredecessor, e.link(Link::LeftPredecessor));
        new.set_link(Link::LeftSuccessor, Some(edge));
    }
    if let Some(right) = e.right_face() {
        new.set_face(Side::Right, Some(right));
        new.set_link(Link::RightPredecessor, Some(edge));
        new.set_link(Link::RightSuccessor, e.link(Link::RightSuccessor));
    }
    let new_edge = unit.add_edge(mesh, new);

    unit.set_edge_vertex(mesh, edge, End::First, m);
    unit.set_edge_link(mesh, edge, Link::PreviousSibling, Some(new_edge));
    if let Some(prev) = e.link(Link::PreviousSibling) {
        unit.set_edge_link(mesh, prev, Link::NextSibling, Some(new_edge));
    }

    if let Some(left) = e.left_face() {
        unit.set_edge_link(mesh, edge, Link::LeftPredecessor, Some(new_edge));
        let pred = e.link(Link::LeftPredecessor).expect("bug: edge without left predecessor");
        let side = mesh.edge(pred).expect("bug: broken reference").side(left);
        unit.set_edge_link(mesh, pred, side.successor(), Some(new_edge));
    }
    if let Some(right) = e.right_face() {
        unit.set_edge_link(mesh, edge, Link::RightSuccessor, Some(new_edge));
        let succ = e.link(Link::RightSuccessor).expect("bug: edge without right successor");
        let side = mesh.edge(succ).expect("bug: broken reference").side(right);
        unit.set_edge_link(mesh, succ, side.predecessor(), Some(new_edge));
    }

    unit.set_vertex_edge(mesh, m, Some(edge));
    if mesh.vertex(v1).and_then(|v| v.edge()) == Some(edge) {
        unit.set_vertex_edge(mesh, v1, Some(new_edge));
    }

    new_edge
}

fn vertex_level<B: RenderBuffer>(mesh: &WingedMesh<B>, v: VertexHandle) -> u32 {
    mesh.vertex(v).expect("bug: broken reference").level()
}

/// Cuts the quadrangle `face`, which has `m` as one of its corners, into two
/// triangles along the diagonal starting at `m`. `old` is the geometry the
/// face had before it became a quadrangle.
///
/// The face is walked `a -> m -> w -> c -> a`, along the edges `in`, `out`,
/// `succ` and `pred`:
///
/// ```text
///   a <---- pred ---- c          a <---- pred ---- c
///   |                 ^          |              _/ ^
///  in                 |         in     face  _/d   |
///   |               succ   ==>   |        _/     succ
///   v                 |          v     _/  new     |
///   m ----- out ----> w          m --------out---> w
/// ```
///
/// The diagonal `d` runs from `m` to `c`. `face` keeps `in`, `d` and `pred`,
/// the new face gets `out`, `succ` and `d`.
fn split_quad<B: RenderBuffer>(
    unit: &mut ActionUnit,
    mesh: &mut WingedMesh<B>,
    face: FaceHandle,
    m: VertexHandle,
    old: Triangle,
    ids: &mut IdGenerator,
) -> FaceHandle {
    let cycle: Vec<_> = mesh.circulate_around_face(face).collect();
    assert_eq!(cycle.len(), 4, "bug: {:?} is not a quadrangle after inserting a vertex", face);

    let edge = |h: EdgeHandle| *mesh.edge(h).expect("bug: broken reference");
    let inn = cycle.iter()
        .copied()
        .find(|&h| edge(h).second_vertex(face) == m)
        .expect("bug: new vertex is not a corner of the face");
    let out = edge(inn).successor(face).expect("bug: broken face cycle");
    let succ = edge(out).successor(face).expect("bug: broken face cycle");
    let pred = edge(inn).predecessor(face).expect("bug: broken face cycle");

    let a = edge(inn).first_vertex(face);
    let w = edge(out).second_vertex(face);
    let c = edge(succ).second_vertex(face);
    let (out_side, succ_side) = (edge(out).side(face), edge(succ).side(face));
    let (inn_side, pred_side) = (edge(inn).side(face), edge(pred).side(face));

    let pos = |v| mesh.position(v);
    let new_tri = Triangle::new(pos(m), pos(w), pos(c));
    let face_tri = Triangle::new(pos(a), pos(m), pos(c));

    let new_face = unit.add_face(mesh, Face::new(ids.next_id()), new_tri);
    let diagonal = Edge::new(ids.next_id(), m, c)
        .with_face(Side::Left, face)
        .with_face(Side::Right, new_face)
        .with_link(Link::LeftPredecessor, inn)
        .with_link(Link::LeftSuccessor, pred)
        .with_link(Link::RightPredecessor, succ)
        .with_link(Link::RightSuccessor, out);
    let d = unit.add_edge(mesh, diagonal);

    unit.set_edge_link(mesh, inn, inn_side.successor(), Some(d));
    unit.set_edge_link(mesh, pred, pred_side.predecessor(), Some(d));

    unit.set_edge_face(mesh, out, out_side, Some(new_face));
    unit.set_edge_link(mesh, out, out_side.predecessor(), Some(d));
    unit.set_edge_face(mesh, succ, succ_side, Some(new_face));
    unit.set_edge_link(mesh, succ, succ_side.successor(), Some(d));

    unit.set_face_edge(mesh, face, Some(inn));
    unit.set_face_edge(mesh, new_face, Some(out));
    unit.realign_face(mesh, face, old, face_tri);

    new_face
}


/// Splits an edge at its midpoint and retriangulates the adjacent faces, so
/// that one face becomes two.
#[derive(Debug, Clone)]
pub struct ActionSplitEdge {
    unit: ActionUnit,
    vertex: VertexHandle,
}

impl ActionSplitEdge {
    pub fn run<B: RenderBuffer>(
        mesh: &mut WingedMesh<B>,
        edge: EdgeHandle,
        ids: &mut IdGenerator,
    ) -> Self {
        let e = *mesh.edge(edge).expect("cannot split an edge that does not exist");
        let faces: Vec<(FaceHandle, Triangle)> = [e.left_face(), e.right_face()]
            .iter()
            .filter_map(|&f| f)
            .map(|f| (f, mesh.triangle(f)))
            .collect();

        let midpoint = mesh.position(e.vertex1()).midpoint(mesh.position(e.vertex2()));

        let mut unit = ActionUnit::new();
        let new_edge = insert_edge_vertex(unit.add_unit(), mesh, edge, midpoint, ids);
        let vertex = mesh.edge(new_edge).expect("bug: new edge vanished").vertex2();

        for (face, old) in faces {
            split_quad(&mut unit, mesh, face, vertex, old, ids);
        }
        refresh(mesh);

        debug!("split edge {:?}, new vertex {:?}", edge, vertex);
        Self { unit, vertex }
    }

    /// The vertex inserted into the edge.
    pub fn vertex(&self) -> VertexHandle {
        self.vertex
    }

    pub fn unit(&self) -> &ActionUnit {
        &self.unit
    }
}

impl<B: RenderBuffer> Action<B> for ActionSplitEdge {
    fn name(&self) -> &'static str {
        "split edge"
    }

    fn undo(&mut self, mesh: &mut WingedMesh<B>) {
        self.unit.undo(mesh);
        refresh(mesh);
    }

    fn redo(&mut self, mesh: &mut WingedMesh<B>) {
        self.unit.redo(mesh);
        refresh(mesh);
    }
}
