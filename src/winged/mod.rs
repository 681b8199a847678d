//! The winged-edge mesh.
//!
//! Every edge knows its two endpoints, its two faces and its four neighbors
//! around those faces (the "wings"). That way, walking around a face or a
//! vertex never requires a search. Vertices and faces each store one
//! arbitrary incident edge as entry point.
//!
//! All elements live in arenas owned by [`WingedMesh`] and refer to each
//! other by handle. Vertex positions, normals and the triangle index list live
//! in a [`RenderBuffer`]; vertex handles are indices into that buffer.
//!
//! The mutating methods of [`WingedMesh`] are not recorded anywhere. To get
//! undoable edits, go through an [`ActionUnit`](crate::action::ActionUnit).
//!
//! # References
//!
//! Baumgart, Bruce G. "A polyhedron representation for computer vision."
//! Proceedings of the May 19-22, 1975, national computer conference and
//! exposition. 1975.

use std::{collections::BTreeSet, fmt};

use cgmath::{InnerSpace, Matrix, MetricSpace, Point3, Transform as _, Vector3};
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    hsize,
    buffer::{RenderBuffer, VecBuffer},
    handle::{opt, EdgeHandle, FaceHandle, Handle, VertexHandle},
    id::{Id, IdMap},
    intersection::{ray_triangle, sphere_triangle},
    map::DenseMap,
    octree::Octree,
    primitive::{Ray, Sphere, Triangle},
    transform::Transform,
};

mod adj;
mod edge;
mod face;
mod vertex;


pub use self::{
    adj::FaceCirculator,
    edge::{Edge, End, FaceGradient, Link, Side},
    face::Face,
    vertex::Vertex,
};


/// The result of a successful ray query, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceIntersection {
    pub face: FaceHandle,
    pub position: Point3<f32>,
    pub distance: f32,
    pub normal: Vector3<f32>,
}


/// A triangle mesh in winged-edge representation, indexed by an octree.
pub struct WingedMesh<B: RenderBuffer = VecBuffer> {
    buffer: B,
    vertices: DenseMap<VertexHandle, Vertex>,
    edges: DenseMap<EdgeHandle, Edge>,
    faces: DenseMap<FaceHandle, Face>,
    octree: Octree,

    /// Start indices of index buffer slots that belong to deleted faces and
    /// are not at the end of the buffer.
    free_first_indices: BTreeSet<hsize>,

    edge_ids: IdMap<EdgeHandle>,
    face_ids: IdMap<FaceHandle>,
    transform: Transform,
}

impl<B: RenderBuffer + Default> WingedMesh<B> {
    pub fn new() -> Self {
        Self::with_buffer(B::default())
    }

    /// Creates an empty mesh whose octree won't get deeper than `max_depth`.
    pub fn with_octree_depth(max_depth: u8) -> Self {
        let mut out = Self::new();
        out.octree = Octree::with_max_depth(max_depth);
        out
    }
}

impl<B: RenderBuffer + Default> Default for WingedMesh<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBuffer> WingedMesh<B> {
    /// Creates an empty mesh writing into `buffer`, which has to be empty.
    pub fn with_buffer(buffer: B) -> Self {
        assert!(
            buffer.num_vertices() == 0 && buffer.num_indices() == 0,
            "a mesh can only be created with an empty render buffer",
        );

        Self {
            buffer,
            vertices: DenseMap::new(),
            edges: DenseMap::new(),
            faces: DenseMap::new(),
            octree: Octree::new(),
            free_first_indices: BTreeSet::new(),
            edge_ids: IdMap::new(),
            face_ids: IdMap::new(),
            transform: Transform::identity(),
        }
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }


    // ===========================================================================================
    // ===== Counts and element access
    // ===========================================================================================

    pub fn num_vertices(&self) -> hsize {
        debug_assert_eq!(
            self.buffer.num_vertices(),
            self.vertices.num_elements(),
            "bug: render buffer and topology disagree on the number of vertices",
        );
        self.vertices.num_elements()
    }

    pub fn num_edges(&self) -> hsize {
        self.edges.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    pub fn num_indices(&self) -> hsize {
        self.buffer.num_indices()
    }

    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.octree.num_faces(), self.faces.num_elements());
        debug_assert!(
            !self.faces.is_empty() || self.buffer.num_indices() == 0,
            "bug: index buffer is not empty although there are no faces",
        );

        self.num_vertices() == 0 && self.edges.is_empty() && self.faces.is_empty()
    }

    pub fn vertex(&self, vertex: VertexHandle) -> Option<&Vertex> {
        self.vertices.get(vertex)
    }

    pub fn edge(&self, edge: EdgeHandle) -> Option<&Edge> {
        self.edges.get(edge)
    }

    pub fn face(&self, face: FaceHandle) -> Option<&Face> {
        self.faces.get(face)
    }

    /// Returns the vertex stored at `index` of the vertex buffer.
    pub fn vertex_at(&self, index: hsize) -> Option<VertexHandle> {
        let vh = VertexHandle::new(index);
        if self.vertices.contains_handle(vh) { Some(vh) } else { None }
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexHandle, &Vertex)> + '_ {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeHandle, &Edge)> + '_ {
        self.edges.iter()
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceHandle, &Face)> + '_ {
        self.faces.iter()
    }

    /// The handle [`WingedMesh::add_edge`] would assign next.
    pub fn next_edge_handle(&self) -> EdgeHandle {
        self.edges.next_push_handle()
    }

    /// The handle [`WingedMesh::add_face`] would assign next.
    pub fn next_face_handle(&self) -> FaceHandle {
        self.faces.next_push_handle()
    }

    pub fn edge_by_id(&self, id: Id) -> Option<EdgeHandle> {
        self.edge_ids.get(id)
    }

    pub fn face_by_id(&self, id: Id) -> Option<FaceHandle> {
        self.face_ids.get(id)
    }

    /// Start indices of the index buffer slots that are currently unused,
    /// in ascending order.
    pub fn free_index_slots(&self) -> impl Iterator<Item = hsize> + '_ {
        self.free_first_indices.iter().copied()
    }

    pub fn position(&self, vertex: VertexHandle) -> Point3<f32> {
        assert!(
            self.vertices.contains_handle(vertex),
            "bug (broken reference): {:?} does not exist",
            vertex,
        );
        self.buffer.vertex(vertex.idx())
    }


    // ===========================================================================================
    // ===== Adjacency
    // ===========================================================================================

    pub fn circulate_around_face(&self, face: FaceHandle) -> FaceCirculator<'_> {
        FaceCirculator::new(&self.edges, face, self.faces[face].edge())
    }

    /// The three boundary edges of `face`, starting with its entry edge.
    pub fn face_edges(&self, face: FaceHandle) -> [EdgeHandle; 3] {
        let mut it = self.circulate_around_face(face);
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(a), Some(b), Some(c), None) => [a, b, c],
            _ => panic!("bug: {:?} is not a closed triangle", face),
        }
    }

    /// The three corners of `face` in walking order, starting at the first
    /// vertex of its entry edge.
    pub fn face_vertices(&self, face: FaceHandle) -> [VertexHandle; 3] {
        let [a, b, c] = self.face_edges(face);
        [
            self.edges[a].first_vertex(face),
            self.edges[b].first_vertex(face),
            self.edges[c].first_vertex(face),
        ]
    }

    /// The geometry of `face` in mesh space.
    pub fn triangle(&self, face: FaceHandle) -> Triangle {
        let [a, b, c] = self.face_vertices(face);
        Triangle::new(self.position(a), self.position(b), self.position(c))
    }

    pub fn face_normal(&self, face: FaceHandle) -> Vector3<f32> {
        self.triangle(face).normal()
    }

    /// All edges incident to `vertex`, in rotation order.
    pub fn vertex_edges(&self, vertex: VertexHandle) -> SmallVec<[EdgeHandle; 8]> {
        match self.vertices[vertex].edge() {
            Some(start) => adj::vertex_rotation(&self.edges, vertex, start),
            None => SmallVec::new(),
        }
    }

    /// All faces incident to `vertex`, in rotation order.
    pub fn vertex_faces(&self, vertex: VertexHandle) -> SmallVec<[FaceHandle; 8]> {
        self.vertex_edges(vertex)
            .into_iter()
            .filter_map(|eh| {
                let e = &self.edges[eh];
                e.face(e.outgoing_side(vertex))
            })
            .collect()
    }

    /// Angle-weighted average of the normals of all faces around `vertex`.
    /// Isolated vertices get the zero vector.
    pub fn interpolated_normal(&self, vertex: VertexHandle) -> Vector3<f32> {
        let mut sum = Vector3::new(0.0, 0.0, 0.0);
        for face in self.vertex_faces(vertex) {
            let corners = self.face_vertices(face);
            let corner = corners.iter()
                .position(|&v| v == vertex)
                .expect("bug: vertex is not a corner of its adjacent face");

            let tri = self.triangle(face);
            sum += tri.normal() * tri.angle_at(corner);
        }

        if sum.magnitude2() > 0.0 {
            sum.normalize()
        } else {
            sum
        }
    }


    // ===========================================================================================
    // ===== Adding and removing elements
    // ===========================================================================================

    /// Adds a vertex at `position`. Its handle is its index in the vertex
    /// buffer.
    pub fn add_vertex(&mut self, position: Point3<f32>, level: u32) -> VertexHandle {
        let vh = VertexHandle::new(self.buffer.add_vertex(position));
        self.vertices.insert_at(vh, Vertex::new(level));
        vh
    }

    /// Removes the vertex added last and returns its record and position.
    pub fn pop_vertex(&mut self) -> (VertexHandle, Vertex, Point3<f32>) {
        let n = self.num_vertices();
        assert!(n > 0, "`pop_vertex` on a mesh without vertices");

        let vh = VertexHandle::new(n - 1);
        let vertex = self.vertices.remove(vh)
            .unwrap_or_else(|| panic!("bug: last vertex {:?} does not exist", vh));
        let position = self.buffer.vertex(vh.idx());
        self.buffer.pop_vertex();

        (vh, vertex, position)
    }

    pub fn add_edge(&mut self, edge: Edge) -> EdgeHandle {
        let handle = self.edges.next_push_handle();
        self.insert_edge_at(handle, edge);
        handle
    }

    /// Puts `edge` into the (empty) slot of `handle`.
    pub fn insert_edge_at(&mut self, handle: EdgeHandle, edge: Edge) {
        self.edge_ids.insert(edge.id, handle);
        self.edges.insert_at(handle, edge);
    }

    /// Removes `edge` and returns its record. Nothing may refer to the edge
    /// anymore.
    pub fn delete_edge(&mut self, edge: EdgeHandle) -> Edge {
        let removed = self.edges.remove(edge)
            .unwrap_or_else(|| panic!("bug (broken reference): {:?} does not exist", edge));
        self.edge_ids.remove(removed.id);
        removed
    }

    /// Adds a face with the geometry `triangle`, which determines where the
    /// face is stored in the octree.
    pub fn add_face(&mut self, face: Face, triangle: &Triangle) -> FaceHandle {
        let handle = self.faces.next_push_handle();
        self.insert_face_at(handle, face, triangle);
        handle
    }

    /// Puts `face` into the (empty) slot of `handle`. The face gets a fresh
    /// index buffer slot and octree node; whatever `face` says about those is
    /// ignored.
    pub fn insert_face_at(&mut self, handle: FaceHandle, mut face: Face, triangle: &Triangle) {
        assert!(self.octree.has_root(), "octree root has to be set up before adding faces");

        face.first_index = self.allocate_index_slot();
        face.node = opt(Some(self.octree.insert(handle, &triangle.bounding_sphere())));

        self.face_ids.insert(face.id, handle);
        self.faces.insert_at(handle, face);
    }

    /// Removes `face` from the mesh and the octree and returns its record.
    pub fn delete_face(&mut self, face: FaceHandle) -> Face {
        let removed = self.faces.remove(face)
            .unwrap_or_else(|| panic!("bug (broken reference): {:?} does not exist", face));

        let node = removed.node().expect("bug: face without octree node");
        self.octree.delete(face, node);
        self.face_ids.remove(removed.id);
        self.free_index_slot(removed.first_index);

        removed
    }

    /// Returns the start of an unused slot of three indices. Freed slots are
    /// reused (smallest first) before the buffer grows.
    fn allocate_index_slot(&mut self) -> hsize {
        match self.free_first_indices.iter().next().copied() {
            Some(first) => {
                self.free_first_indices.remove(&first);
                first
            }
            None => {
                let first = self.buffer.num_indices();
                self.buffer.allocate_indices(3);
                first
            }
        }
    }

    fn free_index_slot(&mut self, first: hsize) {
        if first + 3 != self.buffer.num_indices() {
            self.free_first_indices.insert(first);
            return;
        }

        self.buffer.pop_indices(3);

        // Freed slots that are now at the end can go as well
        while let Some(last) = self.free_first_indices.iter().next_back().copied() {
            if last + 3 != self.buffer.num_indices() {
                break;
            }
            self.free_first_indices.remove(&last);
            self.buffer.pop_indices(3);
        }
    }

    /// Moves `face` to the octree node fitting its new geometry `triangle`.
    /// Returns `true` if the face stays in the same node.
    ///
    /// Panics if one of the face's edges does not refer to the face in
    /// exactly one of its face slots.
    pub fn realign_face(&mut self, face: FaceHandle, triangle: &Triangle) -> bool {
        for eh in self.face_edges(face).iter() {
            let e = &self.edges[*eh];
            assert!(
                (e.left_face() == Some(face)) != (e.right_face() == Some(face)),
                "non-manifold corruption: {:?} does not refer to {:?} in exactly one face slot ({:?})",
                eh,
                face,
                e,
            );
        }

        let old_node = self.faces[face].node().expect("bug: face without octree node");
        let (node, same) = self.octree.realign(face, old_node, &triangle.bounding_sphere());
        self.faces[face].node = opt(Some(node));
        same
    }

    /// Creates the octree root. Only valid on an empty mesh.
    pub fn setup_octree_root(&mut self, center: Point3<f32>, width: f32) {
        assert!(self.is_empty(), "octree root can only be set up for an empty mesh");
        self.octree.setup_root(center, width);
    }

    /// Removes everything except the transform.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
        self.octree.reset();
        self.free_first_indices.clear();
        self.edge_ids.clear();
        self.face_ids.clear();
    }


    // ===========================================================================================
    // ===== Setting single fields
    // ===========================================================================================

    pub fn set_vertex_edge(&mut self, vertex: VertexHandle, edge: Option<EdgeHandle>) {
        self.vertices[vertex].set_edge(edge);
    }

    pub fn set_edge_vertex(&mut self, edge: EdgeHandle, end: End, vertex: VertexHandle) {
        self.edges[edge].set_vertex(end, vertex);
    }

    pub fn set_edge_face(&mut self, edge: EdgeHandle, side: Side, face: Option<FaceHandle>) {
        self.edges[edge].set_face(side, face);
    }

    pub fn set_edge_link(&mut self, edge: EdgeHandle, link: Link, target: Option<EdgeHandle>) {
        self.edges[edge].set_link(link, target);
    }

    pub fn set_edge_t_edge(&mut self, edge: EdgeHandle, is_t_edge: bool) {
        self.edges[edge].is_t_edge = is_t_edge;
    }

    pub fn set_edge_gradient(&mut self, edge: EdgeHandle, gradient: FaceGradient) {
        self.edges[edge].face_gradient = gradient;
    }

    pub fn set_face_edge(&mut self, face: FaceHandle, edge: Option<EdgeHandle>) {
        self.faces[face].set_edge(edge);
    }


    // ===========================================================================================
    // ===== Writing into the render buffer
    // ===========================================================================================

    /// Writes the corner indices of all faces into the index buffer. If
    /// deleted faces left holes, the buffer is repacked first: faces get
    /// consecutive slots in octree order.
    pub fn write_all_indices(&mut self) {
        if !self.free_first_indices.is_empty() {
            trace!(
                "repacking index buffer ({} faces, {} free slots)",
                self.num_faces(),
                self.free_first_indices.len(),
            );

            let mut order = Vec::with_capacity(self.faces.num_elements() as usize);
            self.octree.for_each_face(|f| order.push(f));
            for (i, &f) in order.iter().enumerate() {
                self.faces[f].first_index = 3 * i as hsize;
            }

            self.buffer.resize_indices(3 * self.num_faces());
            self.free_first_indices.clear();
        }

        let handles: Vec<_> = self.faces.handles().collect();
        for f in handles {
            let first = self.faces[f].first_index;
            let corners = self.face_vertices(f);
            for (i, v) in corners.iter().enumerate() {
                self.buffer.set_index(first + i as hsize, v.idx());
            }
        }
    }

    pub fn write_all_interpolated_normals(&mut self) {
        let handles: Vec<_> = self.vertices.handles().collect();
        for v in handles {
            let normal = self.interpolated_normal(v);
            self.buffer.set_normal(v.idx(), normal);
        }
    }

    /// Requests upload of the render buffer. The index buffer must not have
    /// holes, i.e. [`WingedMesh::write_all_indices`] has to run after
    /// deleting faces.
    pub fn buffer_data(&mut self) {
        assert!(
            self.free_first_indices.is_empty(),
            "index buffer has {} unused slots, call `write_all_indices` first",
            self.free_first_indices.len(),
        );
        self.buffer.buffer_data();
    }


    // ===========================================================================================
    // ===== Queries
    // ===========================================================================================

    /// Returns the closest face hit by the world space `ray`.
    pub fn intersects_ray(&self, ray: &Ray) -> Option<FaceIntersection> {
        let world = self.transform.world_matrix();
        let inverse = self.transform.inverse_world_matrix()?;
        let local = ray.transformed(&inverse);

        let (face, t) = self.octree.intersect_ray(&local, |f| {
            ray_triangle(&local, &self.triangle(f))
        })?;

        let position = world.transform_point(local.point_at(t));
        let normal = inverse.transpose().transform_vector(self.face_normal(face));
        let normal = if normal.magnitude2() > 0.0 { normal.normalize() } else { normal };

        Some(FaceIntersection {
            face,
            position,
            distance: ray.origin().distance(position),
            normal,
        })
    }

    /// Appends all faces touching the world space `sphere` to `out`. Returns
    /// `true` if at least one face was found.
    pub fn intersects_sphere(&self, sphere: &Sphere, out: &mut Vec<FaceHandle>) -> bool {
        let inverse = match self.transform.inverse_world_matrix() {
            Some(m) => m,
            None => return false,
        };

        // Only used for culling: under non-uniform scaling, the sphere is an
        // ellipsoid in mesh space and `local` encloses it.
        let local = Sphere::new(
            inverse.transform_point(sphere.center),
            sphere.radius / self.transform.min_scale(),
        );
        let world = self.transform.world_matrix();
        self.octree.intersect_sphere(
            &local,
            |f| sphere_triangle(sphere, &self.triangle(f).transformed(&world)),
            out,
        )
    }


    // ===========================================================================================
    // ===== Integrity check
    // ===========================================================================================

    /// Checks all references and invariants and panics with a descriptive
    /// message if one is broken. Expensive, meant for tests and debugging.
    pub fn check_integrity(&self) {
        assert_eq!(
            self.buffer.num_vertices(),
            self.vertices.num_elements(),
            "bug: render buffer has {} vertices, topology has {}",
            self.buffer.num_vertices(),
            self.vertices.num_elements(),
        );

        // Vertices
        for (vh, v) in self.vertices.iter() {
            if let Some(eh) = v.edge() {
                match self.edges.get(eh) {
                    None => panic!(
                        "bug (broken reference): [{:?}].edge = {:?}, but that edge does not exist!",
                        vh,
                        eh,
                    ),
                    Some(e) if !e.has_vertex(vh) => panic!(
                        "bug: [{:?}].edge = {:?}, but that edge connects {:?} and {:?}",
                        vh,
                        eh,
                        e.vertex1,
                        e.vertex2,
                    ),
                    _ => {}
                }
            }
        }

        // Edges
        for (eh, e) in self.edges.iter() {
            for &v in &[e.vertex1, e.vertex2] {
                if !self.vertices.contains_handle(v) {
                    panic!("bug (broken reference): {:?} refers to {:?} which does not exist!", eh, v);
                }
            }
            if e.vertex1 == e.vertex2 {
                panic!("bug: {:?} is a loop at {:?}", eh, e.vertex1);
            }
            if self.edge_ids.get(e.id) != Some(eh) {
                panic!("bug: id {} of {:?} is not registered for it", e.id, eh);
            }

            for &side in &[Side::Left, Side::Right] {
                if let Some(f) = e.face(side) {
                    if !self.faces.contains_handle(f) {
                        panic!(
                            "bug (broken reference): {:?} has {:?} on its {:?} side, but that \
                                face does not exist!",
                            eh,
                            f,
                            side,
                        );
                    }
                    if e.link(side.predecessor()).is_none() || e.link(side.successor()).is_none() {
                        panic!("bug: {:?} is missing links around {:?}", eh, f);
                    }
                }
            }
            if e.left_face.is_some() && e.left_face() == e.right_face() {
                panic!("bug: {:?} has {:?} on both sides", eh, e.left_face);
            }

            for &link in &[
                Link::LeftPredecessor,
                Link::LeftSuccessor,
                Link::RightPredecessor,
                Link::RightSuccessor,
                Link::PreviousSibling,
                Link::NextSibling,
            ] {
                if let Some(target) = e.link(link) {
                    if !self.edges.contains_handle(target) {
                        panic!(
                            "bug (broken reference): {:?}.{:?} = {:?}, but that edge does not exist!",
                            eh,
                            link,
                            target,
                        );
                    }
                }
            }
        }

        // Faces
        for (fh, f) in self.faces.iter() {
            if self.face_ids.get(f.id) != Some(fh) {
                panic!("bug: id {} of {:?} is not registered for it", f.id, fh);
            }

            let entry = match f.edge() {
                Some(e) => e,
                None => panic!("bug: {:?} has no edge", fh),
            };
            match self.edges.get(entry) {
                None => panic!(
                    "bug (broken reference): [{:?}].edge = {:?}, but that edge does not exist!",
                    fh,
                    entry,
                ),
                Some(e) if e.side_of(fh).is_none() => panic!(
                    "bug: [{:?}].edge = {:?}, but that edge is not adjacent to the face",
                    fh,
                    entry,
                ),
                _ => {}
            }

            // Walking around the face returns to the start after three steps
            let mut current = entry;
            for step in 0..3 {
                let e = &self.edges[current];
                let next = match e.successor(fh) {
                    Some(next) => next,
                    None => panic!("bug: {:?} has no successor around {:?}", current, fh),
                };
                match self.edges.get(next) {
                    Some(n) if n.side_of(fh).is_some() => {}
                    _ => panic!("bug: successor {:?} of {:?} is not adjacent to {:?}", next, current, fh),
                }
                if self.edges[next].predecessor(fh) != Some(current) {
                    panic!("bug: predecessor of {:?} around {:?} is not {:?}", next, fh, current);
                }
                if e.second_vertex(fh) != self.edges[next].first_vertex(fh) {
                    panic!("bug: {:?} and {:?} are not connected around {:?}", current, next, fh);
                }
                if (step == 2) != (next == entry) {
                    panic!("bug: the boundary of {:?} is not a triangle", fh);
                }
                current = next;
            }

            match f.node() {
                Some(node) if self.octree.node(node).map_or(false, |n| n.faces().contains(&fh)) => {}
                _ => panic!("bug: {:?} is not stored in its octree node {:?}", fh, f.node),
            }

            if f.first_index + 3 > self.buffer.num_indices() {
                panic!("bug: index slot {} of {:?} is out of bounds", f.first_index, fh);
            }
            if self.free_first_indices.contains(&f.first_index) {
                panic!("bug: index slot {} of {:?} is marked as free", f.first_index, fh);
            }
        }

        assert_eq!(self.edge_ids.len(), self.edges.num_elements() as usize, "bug: stale edge ids");
        assert_eq!(self.face_ids.len(), self.faces.num_elements() as usize, "bug: stale face ids");
        assert_eq!(
            self.octree.count_faces(),
            self.faces.num_elements(),
            "bug: octree and mesh disagree on the number of faces",
        );
        assert_eq!(self.octree.num_faces(), self.octree.count_faces());
        assert_eq!(
            3 * (self.faces.num_elements() as usize + self.free_first_indices.len()),
            self.buffer.num_indices() as usize,
            "bug: index buffer size does not match faces and free slots",
        );
    }
}

impl<B: RenderBuffer> fmt::Debug for WingedMesh<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WingedMesh")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("faces", &self.faces)
            .field("free_first_indices", &self.free_first_indices)
            .field("transform", &self.transform)
            .finish()
    }
}
