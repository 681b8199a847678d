use crate::{
    hsize,
    handle::{opt, EdgeHandle, NodeHandle, Opt},
    id::Id,
};


/// Data stored per (triangular) face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub(crate) id: Id,

    /// One arbitrary boundary edge. Only `None` while the face is being
    /// built.
    pub(crate) edge: Opt<EdgeHandle>,

    /// The octree node the face is stored in. Assigned by the mesh when the
    /// face is added.
    pub(crate) node: Opt<NodeHandle>,

    /// Where the face's three indices start in the index buffer.
    pub(crate) first_index: hsize,
}

impl Face {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            edge: Opt::none(),
            node: Opt::none(),
            first_index: 0,
        }
    }

    pub fn with_edge(mut self, edge: EdgeHandle) -> Self {
        self.edge = Opt::some(edge);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn edge(&self) -> Option<EdgeHandle> {
        self.edge.into_option()
    }

    pub fn node(&self) -> Option<NodeHandle> {
        self.node.into_option()
    }

    pub fn first_index(&self) -> hsize {
        self.first_index
    }

    pub(crate) fn set_edge(&mut self, edge: Option<EdgeHandle>) {
        self.edge = opt(edge);
    }
}
