//! A winged-edge triangle mesh engine with an octree index and undoable
//! editing.
//!
//! The central type is [`WingedMesh`]: a manifold triangle mesh in which
//! every edge knows its two endpoints, its two faces and its neighbors around
//! those faces. All faces are additionally stored in an [`Octree`] to answer
//! ray and sphere queries quickly. Vertex positions, per-vertex normals and
//! the triangle index list are written into a [`RenderBuffer`], which stands
//! in for whatever renderer consumes the mesh.
//!
//! Editing goes through the [`action`] module: every change is recorded as a
//! sequence of primitive, reversible edits so that it can be undone and
//! redone with a [`History`].
//!
//! ```
//! use winged::{
//!     action::{ActionFromMesh, History, MeshDefinition},
//!     IdGenerator, WingedMesh,
//! };
//!
//! let def = MeshDefinition::new(
//!     vec![[0.0, 0.0, 0.0].into(), [1.0, 0.0, 0.0].into(), [0.0, 1.0, 0.0].into()],
//!     vec![0, 1, 2],
//! );
//!
//! let mut mesh: WingedMesh = WingedMesh::new();
//! let mut ids = IdGenerator::new();
//! let mut history = History::new();
//!
//! let import = ActionFromMesh::run(&mut mesh, &def, &mut ids).unwrap();
//! history.push(import);
//! assert_eq!(mesh.num_faces(), 1);
//!
//! history.undo(&mut mesh);
//! assert!(mesh.is_empty());
//! ```

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod action;
pub mod bounding;
pub mod buffer;
pub mod handle;
pub mod id;
pub mod intersection;
pub mod map;
pub mod octree;
pub mod primitive;
pub mod transform;
pub mod winged;


/// The integer type used as index in all handles.
///
/// `u32` by default. With the `large-handle` feature, it is `u64`, which
/// allows for meshes with more than 4 billion elements.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


pub use self::{
    action::{Action, ActionUnit, History, PartialAction},
    buffer::{RenderBuffer, VecBuffer},
    handle::{EdgeHandle, FaceHandle, Handle, NodeHandle, VertexHandle},
    id::{Id, IdGenerator},
    octree::Octree,
    primitive::{Ray, Sphere, Triangle},
    transform::Transform,
    winged::{Edge, Face, FaceIntersection, Vertex, WingedMesh},
};
