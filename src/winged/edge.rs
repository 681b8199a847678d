use std::fmt;

use crate::{
    handle::{opt, EdgeHandle, FaceHandle, Opt, VertexHandle},
    id::Id,
};


/// One of the two faces of an edge.
///
/// The left face traverses the edge from `vertex1` to `vertex2`, the right
/// face from `vertex2` to `vertex1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The link to the next edge around the face on this side.
    pub fn successor(self) -> Link {
        match self {
            Side::Left => Link::LeftSuccessor,
            Side::Right => Link::RightSuccessor,
        }
    }

    /// The link to the previous edge around the face on this side.
    pub fn predecessor(self) -> Link {
        match self {
            Side::Left => Link::LeftPredecessor,
            Side::Right => Link::RightPredecessor,
        }
    }
}

/// One of the two endpoints of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    First,
    Second,
}

/// The edge-valued pointers of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    LeftPredecessor,
    LeftSuccessor,
    RightPredecessor,
    RightSuccessor,
    PreviousSibling,
    NextSibling,
}

/// Tag used by adaptive subdivision to mark on which side an edge borders a
/// coarser face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceGradient {
    None,
    Left,
    Right,
}

impl Default for FaceGradient {
    fn default() -> Self {
        FaceGradient::None
    }
}


/// Data stored per edge.
///
/// Besides its endpoints and faces, every edge stores its neighbors around
/// both of its faces ("wings"), so that walking around a face or a vertex
/// needs no search.
#[derive(Clone, Copy, PartialEq)]
pub struct Edge {
    pub(crate) id: Id,
    pub(crate) vertex1: VertexHandle,
    pub(crate) vertex2: VertexHandle,
    pub(crate) left_face: Opt<FaceHandle>,
    pub(crate) right_face: Opt<FaceHandle>,
    pub(crate) left_predecessor: Opt<EdgeHandle>,
    pub(crate) left_successor: Opt<EdgeHandle>,
    pub(crate) right_predecessor: Opt<EdgeHandle>,
    pub(crate) right_successor: Opt<EdgeHandle>,
    pub(crate) previous_sibling: Opt<EdgeHandle>,
    pub(crate) next_sibling: Opt<EdgeHandle>,
    pub(crate) is_t_edge: bool,
    pub(crate) face_gradient: FaceGradient,
}

impl Edge {
    /// Creates an edge from `vertex1` to `vertex2` without faces or links.
    pub fn new(id: Id, vertex1: VertexHandle, vertex2: VertexHandle) -> Self {
        Self {
            id,
            vertex1,
            vertex2,
            left_face: Opt::none(),
            right_face: Opt::none(),
            left_predecessor: Opt::none(),
            left_successor: Opt::none(),
            right_predecessor: Opt::none(),
            right_successor: Opt::none(),
            previous_sibling: Opt::none(),
            next_sibling: Opt::none(),
            is_t_edge: false,
            face_gradient: FaceGradient::None,
        }
    }

    pub fn with_face(mut self, side: Side, face: FaceHandle) -> Self {
        self.set_face(side, Some(face));
        self
    }

    pub fn with_link(mut self, link: Link, edge: EdgeHandle) -> Self {
        self.set_link(link, Some(edge));
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn vertex1(&self) -> VertexHandle {
        self.vertex1
    }

    pub fn vertex2(&self) -> VertexHandle {
        self.vertex2
    }

    pub fn vertex(&self, end: End) -> VertexHandle {
        match end {
            End::First => self.vertex1,
            End::Second => self.vertex2,
        }
    }

    pub fn left_face(&self) -> Option<FaceHandle> {
        self.left_face.into_option()
    }

    pub fn right_face(&self) -> Option<FaceHandle> {
        self.right_face.into_option()
    }

    pub fn face(&self, side: Side) -> Option<FaceHandle> {
        match side {
            Side::Left => self.left_face(),
            Side::Right => self.right_face(),
        }
    }

    pub fn link(&self, link: Link) -> Option<EdgeHandle> {
        match link {
            Link::LeftPredecessor => self.left_predecessor,
            Link::LeftSuccessor => self.left_successor,
            Link::RightPredecessor => self.right_predecessor,
            Link::RightSuccessor => self.right_successor,
            Link::PreviousSibling => self.previous_sibling,
            Link::NextSibling => self.next_sibling,
        }.into_option()
    }

    pub fn is_t_edge(&self) -> bool {
        self.is_t_edge
    }

    pub fn face_gradient(&self) -> FaceGradient {
        self.face_gradient
    }

    pub(crate) fn set_vertex(&mut self, end: End, vertex: VertexHandle) {
        match end {
            End::First => self.vertex1 = vertex,
            End::Second => self.vertex2 = vertex,
        }
    }

    pub(crate) fn set_face(&mut self, side: Side, face: Option<FaceHandle>) {
        match side {
            Side::Left => self.left_face = opt(face),
            Side::Right => self.right_face = opt(face),
        }
    }

    pub(crate) fn set_link(&mut self, link: Link, edge: Option<EdgeHandle>) {
        let slot = match link {
            Link::LeftPredecessor => &mut self.left_predecessor,
            Link::LeftSuccessor => &mut self.left_successor,
            Link::RightPredecessor => &mut self.right_predecessor,
            Link::RightSuccessor => &mut self.right_successor,
            Link::PreviousSibling => &mut self.previous_sibling,
            Link::NextSibling => &mut self.next_sibling,
        };
        *slot = opt(edge);
    }

    /// Returns on which side `face` lies, or `None` if the edge is not
    /// adjacent to `face`.
    pub fn side_of(&self, face: FaceHandle) -> Option<Side> {
        if self.left_face() == Some(face) {
            Some(Side::Left)
        } else if self.right_face() == Some(face) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Like [`Edge::side_of`], but panics if the edge is not adjacent to
    /// `face`.
    pub fn side(&self, face: FaceHandle) -> Side {
        match self.side_of(face) {
            Some(side) => side,
            None => panic!("bug: {:?} is not adjacent to {:?} ({:?})", self.id, face, self),
        }
    }

    /// The next edge when walking around `face`.
    pub fn successor(&self, face: FaceHandle) -> Option<EdgeHandle> {
        self.link(self.side(face).successor())
    }

    /// The previous edge when walking around `face`.
    pub fn predecessor(&self, face: FaceHandle) -> Option<EdgeHandle> {
        self.link(self.side(face).predecessor())
    }

    /// The vertex at which the walk around `face` enters this edge.
    pub fn first_vertex(&self, face: FaceHandle) -> VertexHandle {
        match self.side(face) {
            Side::Left => self.vertex1,
            Side::Right => self.vertex2,
        }
    }

    /// The vertex at which the walk around `face` leaves this edge.
    pub fn second_vertex(&self, face: FaceHandle) -> VertexHandle {
        match self.side(face) {
            Side::Left => self.vertex2,
            Side::Right => self.vertex1,
        }
    }

    pub fn has_vertex(&self, vertex: VertexHandle) -> bool {
        self.vertex1 == vertex || self.vertex2 == vertex
    }

    /// Returns the endpoint that is not `vertex`. Panics if `vertex` is not
    /// an endpoint.
    pub fn other_vertex(&self, vertex: VertexHandle) -> VertexHandle {
        if self.vertex1 == vertex {
            self.vertex2
        } else if self.vertex2 == vertex {
            self.vertex1
        } else {
            panic!("bug: {:?} is not an endpoint of edge {}", vertex, self.id);
        }
    }

    /// Returns the face on the other side of `face`.
    pub fn other_face(&self, face: FaceHandle) -> Option<FaceHandle> {
        self.face(self.side(face).opposite())
    }

    /// Returns the side on which `vertex` is the first vertex, that is, the
    /// side whose face walks this edge away from `vertex`.
    pub(crate) fn outgoing_side(&self, vertex: VertexHandle) -> Side {
        if self.vertex1 == vertex { Side::Left } else { Side::Right }
    }

    pub fn is_boundary(&self) -> bool {
        self.left_face.is_none() || self.right_face.is_none()
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Edge {{ id: {}, {:?} -> {:?}, left: {:?} ({:?} / {:?}), right: {:?} ({:?} / {:?}), \
                siblings: {:?} / {:?}, t_edge: {}, gradient: {:?} }}",
            self.id,
            self.vertex1,
            self.vertex2,
            self.left_face,
            self.left_predecessor,
            self.left_successor,
            self.right_face,
            self.right_predecessor,
            self.right_successor,
            self.previous_sibling,
            self.next_sibling,
            self.is_t_edge,
            self.face_gradient,
        )
    }
}
