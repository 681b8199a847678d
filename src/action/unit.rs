use cgmath::Point3;

use crate::{
    buffer::RenderBuffer,
    handle::{EdgeHandle, FaceHandle, Handle, VertexHandle},
    primitive::Triangle,
    transform::Transform,
    winged::{Edge, End, Face, FaceGradient, Link, Side, WingedMesh},
};
use super::PartialAction;


#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Partial(PartialAction),
    Unit(ActionUnit),
}

/// An ordered log of partial actions and nested units.
///
/// Undoing runs the entries in reverse order, redoing in the order they were
/// added. Actions are appended *before* they are executed: if executing one
/// panics halfway, it is still part of the log.
///
/// The helper methods (`add_vertex`, `set_edge_face`, ...) read the current
/// value from the mesh, append the matching [`PartialAction`] and execute it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionUnit {
    entries: Vec<Entry>,
}

impl ActionUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct entries (nested units count as one).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes all entries without touching any mesh.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Appends `action` without executing it and returns it, so that the
    /// caller can run it.
    pub fn add(&mut self, action: PartialAction) -> &mut PartialAction {
        self.entries.push(Entry::Partial(action));
        match self.entries.last_mut() {
            Some(Entry::Partial(action)) => action,
            _ => unreachable!(),
        }
    }

    /// Appends an empty nested unit and returns it.
    pub fn add_unit(&mut self) -> &mut ActionUnit {
        self.entries.push(Entry::Unit(ActionUnit::new()));
        match self.entries.last_mut() {
            Some(Entry::Unit(unit)) => unit,
            _ => unreachable!(),
        }
    }

    /// Iterates over all partial actions, including those of nested units,
    /// in execution order.
    pub fn partial_actions(&self) -> Box<dyn Iterator<Item = &PartialAction> + '_> {
        Box::new(self.entries.iter().flat_map(|entry| -> Box<dyn Iterator<Item = &PartialAction>> {
            match entry {
                Entry::Partial(action) => Box::new(std::iter::once(action)),
                Entry::Unit(unit) => unit.partial_actions(),
            }
        }))
    }

    pub fn undo<B: RenderBuffer>(&self, mesh: &mut WingedMesh<B>) {
        assert!(!self.is_empty(), "cannot undo an empty action unit");
        for entry in self.entries.iter().rev() {
            match entry {
                Entry::Partial(action) => action.undo(mesh),
                Entry::Unit(unit) => unit.undo(mesh),
            }
        }
    }

    pub fn redo<B: RenderBuffer>(&self, mesh: &mut WingedMesh<B>) {
        assert!(!self.is_empty(), "cannot redo an empty action unit");
        for entry in &self.entries {
            match entry {
                Entry::Partial(action) => action.redo(mesh),
                Entry::Unit(unit) => unit.redo(mesh),
            }
        }
    }

    fn run<B: RenderBuffer>(&mut self, mesh: &mut WingedMesh<B>, action: PartialAction) {
        self.add(action).redo(mesh);
    }


    // ===========================================================================================
    // ===== Recorded edits
    // ===========================================================================================

    pub fn add_vertex<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        position: Point3<f32>,
        level: u32,
    ) -> VertexHandle {
        let handle = VertexHandle::new(mesh.num_vertices());
        self.run(mesh, PartialAction::AddVertex { handle, position, level });
        handle
    }

    /// Removes the vertex added last.
    pub fn pop_vertex<B: RenderBuffer>(&mut self, mesh: &mut WingedMesh<B>) {
        let n = mesh.num_vertices();
        assert!(n > 0, "`pop_vertex` on a mesh without vertices");

        let handle = VertexHandle::new(n - 1);
        let vertex = *mesh.vertex(handle).expect("bug: last vertex does not exist");
        let position = mesh.position(handle);
        self.run(mesh, PartialAction::PopVertex { handle, position, vertex });
    }

    pub fn add_edge<B: RenderBuffer>(&mut self, mesh: &mut WingedMesh<B>, edge: Edge) -> EdgeHandle {
        let handle = mesh.next_edge_handle();
        self.run(mesh, PartialAction::AddEdge { handle, edge });
        handle
    }

    pub fn delete_edge<B: RenderBuffer>(&mut self, mesh: &mut WingedMesh<B>, handle: EdgeHandle) {
        let edge = *mesh.edge(handle).expect("bug: deleting non-existing edge");
        self.run(mesh, PartialAction::DeleteEdge { handle, edge });
    }

    pub fn add_face<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        face: Face,
        triangle: Triangle,
    ) -> FaceHandle {
        let handle = mesh.next_face_handle();
        self.run(mesh, PartialAction::AddFace { handle, face, triangle });
        handle
    }

    /// Deletes `handle`. The current geometry of the face is recorded, so the
    /// face's cycle has to be intact.
    pub fn delete_face<B: RenderBuffer>(&mut self, mesh: &mut WingedMesh<B>, handle: FaceHandle) {
        let face = *mesh.face(handle).expect("bug: deleting non-existing face");
        let triangle = mesh.triangle(handle);
        self.run(mesh, PartialAction::DeleteFace { handle, face, triangle });
    }

    /// Moves `face` to the octree node fitting `new`. `old` has to be the
    /// geometry the face was placed with. Returns `true` if the node stayed
    /// the same.
    pub fn realign_face<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        face: FaceHandle,
        old: Triangle,
        new: Triangle,
    ) -> bool {
        let node_before = mesh.face(face).and_then(|f| f.node());
        self.run(mesh, PartialAction::RealignFace { face, new, old });
        node_before == mesh.face(face).and_then(|f| f.node())
    }

    pub fn set_vertex_edge<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        vertex: VertexHandle,
        new: Option<EdgeHandle>,
    ) {
        let old = mesh.vertex(vertex).expect("bug: vertex does not exist").edge();
        self.run(mesh, PartialAction::SetVertexEdge { vertex, new, old });
    }

    pub fn set_edge_vertex<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        edge: EdgeHandle,
        end: End,
        new: VertexHandle,
    ) {
        let old = mesh.edge(edge).expect("bug: edge does not exist").vertex(end);
        self.run(mesh, PartialAction::SetEdgeVertex { edge, end, new, old });
    }

    pub fn set_edge_face<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        edge: EdgeHandle,
        side: Side,
        new: Option<FaceHandle>,
    ) {
        let old = mesh.edge(edge).expect("bug: edge does not exist").face(side);
        self.run(mesh, PartialAction::SetEdgeFace { edge, side, new, old });
    }

    pub fn set_edge_link<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        edge: EdgeHandle,
        link: Link,
        new: Option<EdgeHandle>,
    ) {
        let old = mesh.edge(edge).expect("bug: edge does not exist").link(link);
        self.run(mesh, PartialAction::SetEdgeLink { edge, link, new, old });
    }

    pub fn set_edge_t_edge<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        edge: EdgeHandle,
        new: bool,
    ) {
        let old = mesh.edge(edge).expect("bug: edge does not exist").is_t_edge();
        self.run(mesh, PartialAction::SetEdgeTEdge { edge, new, old });
    }

    pub fn set_edge_gradient<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        edge: EdgeHandle,
        new: FaceGradient,
    ) {
        let old = mesh.edge(edge).expect("bug: edge does not exist").face_gradient();
        self.run(mesh, PartialAction::SetEdgeGradient { edge, new, old });
    }

    pub fn set_face_edge<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        face: FaceHandle,
        new: Option<EdgeHandle>,
    ) {
        let old = mesh.face(face).expect("bug: face does not exist").edge();
        self.run(mesh, PartialAction::SetFaceEdge { face, new, old });
    }

    pub fn setup_octree_root<B: RenderBuffer>(
        &mut self,
        mesh: &mut WingedMesh<B>,
        center: Point3<f32>,
        width: f32,
    ) {
        self.run(mesh, PartialAction::SetupOctreeRoot { center, width });
    }

    pub fn set_transform<B: RenderBuffer>(&mut self, mesh: &mut WingedMesh<B>, new: Transform) {
        let old = *mesh.transform();
        self.run(mesh, PartialAction::SetTransform { new, old });
    }
}


#[cfg(test)]
mod tests {
    use crate::{
        id::IdGenerator,
        test_utils::{build, build_with, f, v, QUAD, SINGLE_TRIANGLE},
        winged::Vertex,
    };
    use super::*;

    fn snapshot(mesh: &WingedMesh) -> (Vec<(VertexHandle, Vertex)>, Vec<(EdgeHandle, Edge)>, Vec<Face>) {
        (
            mesh.vertices().map(|(h, v)| (h, *v)).collect(),
            mesh.edges().map(|(h, e)| (h, *e)).collect(),
            mesh.faces().map(|(_, f)| *f).collect(),
        )
    }

    #[test]
    fn field_edits_roundtrip() {
        let mut mesh = build(QUAD, &[[0, 1, 2], [2, 1, 3]]);
        let before = snapshot(&mesh);
        let (e0, e1) = (EdgeHandle::new(0), EdgeHandle::new(1));

        let mut unit = ActionUnit::new();
        unit.set_vertex_edge(&mut mesh, v(3), None);
        unit.set_edge_vertex(&mut mesh, e0, End::Second, v(3));
        unit.set_edge_face(&mut mesh, e0, Side::Right, Some(f(1)));
        unit.set_edge_link(&mut mesh, e1, Link::NextSibling, Some(e0));
        unit.set_edge_t_edge(&mut mesh, e1, true);
        unit.set_edge_gradient(&mut mesh, e1, FaceGradient::Left);
        unit.set_face_edge(&mut mesh, f(0), Some(e1));
        assert_eq!(unit.len(), 7);

        let e = *mesh.edge(e1).unwrap();
        assert!(e.is_t_edge());
        assert_eq!(e.face_gradient(), FaceGradient::Left);
        assert_eq!(e.link(Link::NextSibling), Some(e0));
        let after = snapshot(&mesh);
        assert_ne!(after, before);

        unit.undo(&mut mesh);
        assert_eq!(snapshot(&mesh), before);
        unit.redo(&mut mesh);
        assert_eq!(snapshot(&mesh), after);
    }

    #[test]
    fn elements_keep_handles_and_ids() {
        let mut ids = IdGenerator::new();
        let mut mesh = build_with(SINGLE_TRIANGLE, &[[0, 1, 2]], &mut ids);
        let id = ids.next_id();

        let mut unit = ActionUnit::new();
        let vh = unit.add_vertex(&mut mesh, Point3::new(1.0, 1.0, 0.0), 3);
        let eh = unit.add_edge(&mut mesh, Edge::new(id, v(1), vh));
        unit.delete_edge(&mut mesh, eh);
        unit.pop_vertex(&mut mesh);
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.edge_by_id(id), None);

        unit.undo(&mut mesh);
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_edges(), 3);

        unit.redo(&mut mesh);
        unit.undo(&mut mesh);

        // Undo only part of it: redo the first two actions manually
        let actions: Vec<_> = unit.partial_actions().cloned().collect();
        assert_eq!(actions.len(), 4);
        actions[0].redo(&mut mesh);
        actions[1].redo(&mut mesh);
        assert_eq!(mesh.edge_by_id(id), Some(eh));
        assert_eq!(mesh.vertex(vh).unwrap().level(), 3);
        assert_eq!(mesh.position(vh), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn faces_come_back_under_their_handle() {
        let mut mesh = build(QUAD, &[[0, 1, 2], [2, 1, 3]]);
        let face = *mesh.face(f(0)).unwrap();

        let mut unit = ActionUnit::new();
        unit.delete_face(&mut mesh, f(0));
        assert!(mesh.face(f(0)).is_none());
        assert_eq!(mesh.face_by_id(face.id()), None);

        unit.undo(&mut mesh);
        assert_eq!(mesh.face(f(0)).map(|f| f.id()), Some(face.id()));
        assert_eq!(mesh.face_by_id(face.id()), Some(f(0)));
        assert_eq!(mesh.face(f(0)).unwrap().node(), face.node());
        mesh.check_integrity();
    }

    #[test]
    fn nested_units_run_in_order() {
        let mut mesh = build(SINGLE_TRIANGLE, &[[0, 1, 2]]);
        let e0 = EdgeHandle::new(0);
        let old = mesh.edge(e0).unwrap().face_gradient();

        let mut unit = ActionUnit::new();
        unit.set_edge_gradient(&mut mesh, e0, FaceGradient::Left);
        unit.add_unit().set_edge_gradient(&mut mesh, e0, FaceGradient::Right);
        unit.set_edge_gradient(&mut mesh, e0, FaceGradient::None);
        assert_eq!(unit.len(), 3);
        assert_eq!(unit.partial_actions().count(), 3);

        unit.undo(&mut mesh);
        assert_eq!(mesh.edge(e0).unwrap().face_gradient(), old);
        unit.redo(&mut mesh);
        assert_eq!(mesh.edge(e0).unwrap().face_gradient(), FaceGradient::None);
    }

    #[test]
    fn add_does_not_execute() {
        let mut mesh = build(SINGLE_TRIANGLE, &[[0, 1, 2]]);
        let e0 = EdgeHandle::new(0);

        let mut unit = ActionUnit::new();
        let action = unit.add(PartialAction::SetEdgeTEdge { edge: e0, new: true, old: false });
        assert!(!mesh.edge(e0).unwrap().is_t_edge());
        action.redo(&mut mesh);
        assert!(mesh.edge(e0).unwrap().is_t_edge());

        unit.reset();
        assert!(unit.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty action unit")]
    fn undo_empty() {
        let mut mesh = build(SINGLE_TRIANGLE, &[[0, 1, 2]]);
        ActionUnit::new().undo(&mut mesh);
    }
}
