use crate::handle::{opt, EdgeHandle, Opt};


/// Data stored per vertex. The position lives in the render buffer, at the
/// index of the vertex handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// One arbitrary incident edge. `None` only for isolated vertices.
    pub(crate) edge: Opt<EdgeHandle>,

    /// Subdivision level. Vertices of an imported mesh have level 0; a
    /// vertex inserted on an edge is one level finer than the edge's
    /// endpoints.
    pub(crate) level: u32,
}

impl Vertex {
    pub fn new(level: u32) -> Self {
        Self {
            edge: Opt::none(),
            level,
        }
    }

    pub fn edge(&self) -> Option<EdgeHandle> {
        self.edge.into_option()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn set_edge(&mut self, edge: Option<EdgeHandle>) {
        self.edge = opt(edge);
    }
}
