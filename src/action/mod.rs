//! Undoable editing.
//!
//! Every edit of a mesh is broken down into [`PartialAction`]s, primitive
//! edits that remember the value they overwrite. They are collected in an
//! [`ActionUnit`], which can undo all of them in reverse order and redo them
//! in the original order. User level operations (importing a mesh, splitting
//! an edge, ...) own such a unit, implement [`Action`] and are stored in the
//! [`History`].

use crate::{
    buffer::RenderBuffer,
    winged::WingedMesh,
};

mod delete_face;
mod from_mesh;
mod history;
mod partial;
mod split_edge;
mod unit;

pub use self::{
    delete_face::ActionDeleteFace,
    from_mesh::{ActionFromMesh, ImportError, MeshDefinition},
    history::{Action, History},
    partial::PartialAction,
    split_edge::{insert_edge_vertex, ActionSplitEdge},
    unit::ActionUnit,
};


/// Recomputes the data derived from the topology (indices and normals) and
/// requests an upload. Idempotent.
pub fn refresh<B: RenderBuffer>(mesh: &mut WingedMesh<B>) {
    mesh.write_all_indices();
    mesh.write_all_interpolated_normals();
    mesh.buffer_data();
}
