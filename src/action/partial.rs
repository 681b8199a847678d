use cgmath::Point3;

use crate::{
    buffer::RenderBuffer,
    handle::{EdgeHandle, FaceHandle, VertexHandle},
    primitive::Triangle,
    transform::Transform,
    winged::{Edge, End, Face, FaceGradient, Link, Side, Vertex, WingedMesh},
};


/// A single primitive edit of a mesh that knows how to revert itself.
///
/// Every variant stores the value before the edit (`old`) next to the new
/// one, or the complete record of an element that is removed. Elements are
/// always put back under their original handle, carrying their original id.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialAction {
    AddVertex {
        handle: VertexHandle,
        position: Point3<f32>,
        level: u32,
    },
    PopVertex {
        handle: VertexHandle,
        position: Point3<f32>,
        vertex: Vertex,
    },
    AddEdge {
        handle: EdgeHandle,
        edge: Edge,
    },
    DeleteEdge {
        handle: EdgeHandle,
        edge: Edge,
    },
    AddFace {
        handle: FaceHandle,
        face: Face,
        triangle: Triangle,
    },
    DeleteFace {
        handle: FaceHandle,
        face: Face,
        triangle: Triangle,
    },
    RealignFace {
        face: FaceHandle,
        new: Triangle,
        old: Triangle,
    },
    SetVertexEdge {
        vertex: VertexHandle,
        new: Option<EdgeHandle>,
        old: Option<EdgeHandle>,
    },
    SetEdgeVertex {
        edge: EdgeHandle,
        end: End,
        new: VertexHandle,
        old: VertexHandle,
    },
    SetEdgeFace {
        edge: EdgeHandle,
        side: Side,
        new: Option<FaceHandle>,
        old: Option<FaceHandle>,
    },
    SetEdgeLink {
        edge: EdgeHandle,
        link: Link,
        new: Option<EdgeHandle>,
        old: Option<EdgeHandle>,
    },
    SetEdgeTEdge {
        edge: EdgeHandle,
        new: bool,
        old: bool,
    },
    SetEdgeGradient {
        edge: EdgeHandle,
        new: FaceGradient,
        old: FaceGradient,
    },
    SetFaceEdge {
        face: FaceHandle,
        new: Option<EdgeHandle>,
        old: Option<EdgeHandle>,
    },

    /// Undoing this resets the whole mesh: it is only valid as the very first
    /// edit of an empty mesh.
    SetupOctreeRoot {
        center: Point3<f32>,
        width: f32,
    },
    SetTransform {
        new: Transform,
        old: Transform,
    },
}

impl PartialAction {
    /// Applies the edit. Used for the first run as well as for redoing.
    pub fn redo<B: RenderBuffer>(&self, mesh: &mut WingedMesh<B>) {
        use self::PartialAction::*;

        match *self {
            AddVertex { handle, position, level } => {
                let added = mesh.add_vertex(position, level);
                assert_eq!(added, handle, "bug: vertex was added with an unexpected handle");
            }
            PopVertex { handle, .. } => {
                let (popped, _, _) = mesh.pop_vertex();
                assert_eq!(popped, handle, "bug: popped an unexpected vertex");
            }
            AddEdge { handle, edge } => mesh.insert_edge_at(handle, edge),
            DeleteEdge { handle, .. } => {
                mesh.delete_edge(handle);
            }
            AddFace { handle, face, ref triangle } => mesh.insert_face_at(handle, face, triangle),
            DeleteFace { handle, .. } => {
                mesh.delete_face(handle);
            }
            RealignFace { face, ref new, .. } => {
                mesh.realign_face(face, new);
            }
            SetVertexEdge { vertex, new, .. } => mesh.set_vertex_edge(vertex, new),
            SetEdgeVertex { edge, end, new, .. } => mesh.set_edge_vertex(edge, end, new),
            SetEdgeFace { edge, side, new, .. } => mesh.set_edge_face(edge, side, new),
            SetEdgeLink { edge, link, new, .. } => mesh.set_edge_link(edge, link, new),
            SetEdgeTEdge { edge, new, .. } => mesh.set_edge_t_edge(edge, new),
            SetEdgeGradient { edge, new, .. } => mesh.set_edge_gradient(edge, new),
            SetFaceEdge { face, new, .. } => mesh.set_face_edge(face, new),
            SetupOctreeRoot { center, width } => mesh.setup_octree_root(center, width),
            SetTransform { new, .. } => mesh.set_transform(new),
        }
    }

    /// Reverts the edit. The mesh has to be in the state right after
    /// [`PartialAction::redo`].
    pub fn undo<B: RenderBuffer>(&self, mesh: &mut WingedMesh<B>) {
        use self::PartialAction::*;

        match *self {
            AddVertex { handle, .. } => {
                let (popped, _, _) = mesh.pop_vertex();
                assert_eq!(popped, handle, "bug: popped an unexpected vertex");
            }
            PopVertex { handle, position, vertex } => {
                let added = mesh.add_vertex(position, vertex.level());
                assert_eq!(added, handle, "bug: vertex was restored with an unexpected handle");
                mesh.set_vertex_edge(added, vertex.edge());
            }
            AddEdge { handle, .. } => {
                mesh.delete_edge(handle);
            }
            DeleteEdge { handle, edge } => mesh.insert_edge_at(handle, edge),
            AddFace { handle, .. } => {
                mesh.delete_face(handle);
            }
            DeleteFace { handle, face, ref triangle } => mesh.insert_face_at(handle, face, triangle),
            RealignFace { face, ref old, .. } => {
                mesh.realign_face(face, old);
            }
            SetVertexEdge { vertex, old, .. } => mesh.set_vertex_edge(vertex, old),
            SetEdgeVertex { edge, end, old, .. } => mesh.set_edge_vertex(edge, end, old),
            SetEdgeFace { edge, side, old, .. } => mesh.set_edge_face(edge, side, old),
            SetEdgeLink { edge, link, old, .. } => mesh.set_edge_link(edge, link, old),
            SetEdgeTEdge { edge, old, .. } => mesh.set_edge_t_edge(edge, old),
            SetEdgeGradient { edge, old, .. } => mesh.set_edge_gradient(edge, old),
            SetFaceEdge { face, old, .. } => mesh.set_face_edge(face, old),
            SetupOctreeRoot { .. } => mesh.reset(),
            SetTransform { old, .. } => mesh.set_transform(old),
        }
    }
}
