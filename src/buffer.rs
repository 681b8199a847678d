//! The flattened render buffer the mesh writes its finalized data into.
//!
//! The winged-edge topology is the source of truth. The render buffer is a
//! write-mostly sink of plain arrays (positions, normals, triangle indices)
//! that some renderer uploads to the GPU. Only vertex positions are *read*
//! back: vertices do not store their position themselves.

use cgmath::{Point3, Vector3};

use crate::hsize;


/// Array abstraction over the external render mesh.
///
/// All addressing is by plain integer index. Indices handed out by
/// `add_vertex` stay stable until the vertex is popped again.
pub trait RenderBuffer {
    /// Appends a vertex (with zero normal) and returns its index.
    fn add_vertex(&mut self, pos: Point3<f32>) -> hsize;

    /// Removes the last vertex.
    fn pop_vertex(&mut self);

    /// Appends an index value and returns its index number.
    fn add_index(&mut self, value: hsize) -> hsize;

    fn vertex(&self, i: hsize) -> Point3<f32>;
    fn normal(&self, i: hsize) -> Vector3<f32>;
    fn index(&self, i: hsize) -> hsize;

    fn set_vertex(&mut self, i: hsize, pos: Point3<f32>);
    fn set_normal(&mut self, i: hsize, normal: Vector3<f32>);
    fn set_index(&mut self, i: hsize, value: hsize);

    /// Appends `n` zero indices.
    fn allocate_indices(&mut self, n: hsize);

    /// Removes the last `n` indices.
    fn pop_indices(&mut self, n: hsize);

    /// Truncates or extends (with zeros) the index array to length `n`.
    fn resize_indices(&mut self, n: hsize);

    fn num_vertices(&self) -> hsize;
    fn num_indices(&self) -> hsize;

    /// Requests upload of the current data. Opaque to the mesh.
    fn buffer_data(&mut self);

    /// Removes all data.
    fn reset(&mut self);
}


/// A [`RenderBuffer`] that simply keeps everything in vectors. Uploading only
/// counts how often it was requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecBuffer {
    vertices: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    indices: Vec<hsize>,
    uploads: usize,
}

impl VecBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn indices(&self) -> &[hsize] {
        &self.indices
    }

    /// How many times `buffer_data` was called.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl RenderBuffer for VecBuffer {
    fn add_vertex(&mut self, pos: Point3<f32>) -> hsize {
        self.vertices.push(pos);
        self.normals.push(Vector3::new(0.0, 0.0, 0.0));
        (self.vertices.len() - 1) as hsize
    }

    fn pop_vertex(&mut self) {
        assert!(self.vertices.pop().is_some(), "`pop_vertex` on empty buffer");
        self.normals.pop();
    }

    fn add_index(&mut self, value: hsize) -> hsize {
        self.indices.push(value);
        (self.indices.len() - 1) as hsize
    }

    fn vertex(&self, i: hsize) -> Point3<f32> {
        self.vertices[i as usize]
    }

    fn normal(&self, i: hsize) -> Vector3<f32> {
        self.normals[i as usize]
    }

    fn index(&self, i: hsize) -> hsize {
        self.indices[i as usize]
    }

    fn set_vertex(&mut self, i: hsize, pos: Point3<f32>) {
        self.vertices[i as usize] = pos;
    }

    fn set_normal(&mut self, i: hsize, normal: Vector3<f32>) {
        self.normals[i as usize] = normal;
    }

    fn set_index(&mut self, i: hsize, value: hsize) {
        self.indices[i as usize] = value;
    }

    fn allocate_indices(&mut self, n: hsize) {
        let new_len = self.indices.len() + n as usize;
        self.indices.resize(new_len, 0);
    }

    fn pop_indices(&mut self, n: hsize) {
        assert!(
            n as usize <= self.indices.len(),
            "cannot pop {} of {} indices",
            n,
            self.indices.len(),
        );
        let new_len = self.indices.len() - n as usize;
        self.indices.truncate(new_len);
    }

    fn resize_indices(&mut self, n: hsize) {
        self.indices.resize(n as usize, 0);
    }

    fn num_vertices(&self) -> hsize {
        self.vertices.len() as hsize
    }

    fn num_indices(&self) -> hsize {
        self.indices.len() as hsize
    }

    fn buffer_data(&mut self) {
        self.uploads += 1;
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.indices.clear();
    }
}
