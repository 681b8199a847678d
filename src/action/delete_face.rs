use smallvec::SmallVec;
use tracing::debug;

use crate::{
    buffer::RenderBuffer,
    handle::{EdgeHandle, FaceHandle, VertexHandle},
    winged::{Link, WingedMesh},
};
use super::{refresh, Action, ActionUnit};


/// Removes a face from the mesh.
///
/// The face's edges lose it on their respective side. Edges that are not
/// adjacent to any face afterwards are removed as well, and vertices that
/// used one of those edges as entry point get another incident edge (or none
/// if they end up isolated). Isolated vertices stay in the mesh.
#[derive(Debug, Clone)]
pub struct ActionDeleteFace {
    unit: ActionUnit,
}

impl ActionDeleteFace {
    pub fn run<B: RenderBuffer>(mesh: &mut WingedMesh<B>, face: FaceHandle) -> Self {
        assert!(mesh.face(face).is_some(), "cannot delete {:?}: it does not exist", face);

        let edges = mesh.face_edges(face);
        let corners = mesh.face_vertices(face);
        let rotations: SmallVec<[(VertexHandle, SmallVec<[EdgeHandle; 8]>); 3]> = corners.iter()
            .map(|&v| (v, mesh.vertex_edges(v)))
            .collect();

        let mut unit = ActionUnit::new();
        unit.delete_face(mesh, face);

        let mut dangling = SmallVec::<[EdgeHandle; 3]>::new();
        for &eh in &edges {
            let side = mesh.edge(eh).expect("bug: broken reference").side(face);
            unit.set_edge_face(mesh, eh, side, None);
            unit.set_edge_link(mesh, eh, side.predecessor(), None);
            unit.set_edge_link(mesh, eh, side.successor(), None);

            let e = mesh.edge(eh).expect("bug: broken reference");
            if e.left_face().is_none() && e.right_face().is_none() {
                dangling.push(eh);
            }
        }

        for (v, rotation) in rotations {
            let current = mesh.vertex(v).and_then(|v| v.edge());
            if current.map_or(false, |e| dangling.contains(&e)) {
                let replacement = rotation.into_iter().find(|e| !dangling.contains(e));
                unit.set_vertex_edge(mesh, v, replacement);
            }
        }

        for &eh in &dangling {
            let e = *mesh.edge(eh).expect("bug: broken reference");
            if let Some(prev) = e.link(Link::PreviousSibling) {
                if mesh.edge(prev).and_then(|p| p.link(Link::NextSibling)) == Some(eh) {
                    unit.set_edge_link(mesh, prev, Link::NextSibling, None);
                }
            }
            if let Some(next) = e.link(Link::NextSibling) {
                if mesh.edge(next).and_then(|n| n.link(Link::PreviousSibling)) == Some(eh) {
                    unit.set_edge_link(mesh, next, Link::PreviousSibling, None);
                }
            }
        }
        for &eh in &dangling {
            unit.delete_edge(mesh, eh);
        }

        refresh(mesh);

        debug!("deleted {:?} and {} edges", face, dangling.len());
        Self { unit }
    }

    pub fn unit(&self) -> &ActionUnit {
        &self.unit
    }
}

impl<B: RenderBuffer> Action<B> for ActionDeleteFace {
    fn name(&self) -> &'static str {
        "delete face"
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
