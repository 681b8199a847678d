//! Octree over the faces of a mesh.
//!
//! Every face is stored in exactly one node: the deepest node whose cube fully
//! contains the face's bounding sphere (bounded by a maximum depth). A face
//! that does not fit into any child of the root is stored in the root itself,
//! even if it pokes out of the root cube. Child nodes are created lazily the
//! first time a face descends into them and are never removed again (except
//! by [`Octree::reset`]); empty nodes are cheap and likely to be reused when
//! the mesh is edited in the same region again.
//!
//! The octree only knows face *handles*. Whoever queries it supplies a
//! closure performing the exact test against the face's geometry.

use cgmath::{Point3, Vector3};
use tracing::trace;

use crate::{
    hsize,
    handle::{opt, FaceHandle, NodeHandle, Opt},
    intersection::{cube_contains_sphere, ray_cube, sphere_cube},
    map::DenseMap,
    primitive::{Ray, Sphere},
};


#[cfg(test)]
mod tests;


/// Maximum depth used by [`Octree::new`]. The root has depth 0.
pub const DEFAULT_MAX_DEPTH: u8 = 10;


/// One cube of the octree.
#[derive(Debug, Clone)]
pub struct Node {
    center: Point3<f32>,
    width: f32,
    depth: u8,
    children: [Opt<NodeHandle>; 8],
    faces: Vec<FaceHandle>,
}

impl Node {
    fn new(center: Point3<f32>, width: f32, depth: u8) -> Self {
        Self {
            center,
            width,
            depth,
            children: [Opt::none(); 8],
            faces: Vec::new(),
        }
    }

    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Full edge length of the cube.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Faces stored directly in this node (not in its children).
    pub fn faces(&self) -> &[FaceHandle] {
        &self.faces
    }

    pub fn children(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.children.iter().filter_map(|c| c.into_option())
    }

    /// Index (0..8) of the octant `p` lies in. Bit 0, 1 and 2 are set if `p`
    /// lies on the positive side of the x, y and z axis, respectively.
    pub fn octant_of(&self, p: Point3<f32>) -> usize {
        (p.x >= self.center.x) as usize
            | ((p.y >= self.center.y) as usize) << 1
            | ((p.z >= self.center.z) as usize) << 2
    }

    /// Center of the child cube in the given octant.
    pub fn child_center(&self, octant: usize) -> Point3<f32> {
        let q = self.width / 4.0;
        let sign = |bit: usize| if octant & bit != 0 { q } else { -q };
        self.center + Vector3::new(sign(1), sign(2), sign(4))
    }

    /// Returns `true` if the cube of the child in `octant` fully contains
    /// `sphere`.
    pub fn child_contains(&self, octant: usize, sphere: &Sphere) -> bool {
        cube_contains_sphere(self.child_center(octant), self.width / 2.0, sphere)
    }
}


/// Hierarchical spatial index over face handles.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: DenseMap<NodeHandle, Node>,
    root: Option<NodeHandle>,
    num_faces: hsize,
    max_depth: u8,
}

impl Octree {
    /// Creates an octree without root. [`Octree::setup_root`] has to be called
    /// before faces can be inserted.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: u8) -> Self {
        Self {
            nodes: DenseMap::new(),
            root: None,
            num_faces: 0,
            max_depth,
        }
    }

    /// Creates the root cube. Any previous (empty) node structure is
    /// discarded.
    ///
    /// Panics if the octree still contains faces.
    pub fn setup_root(&mut self, center: Point3<f32>, width: f32) {
        assert!(
            self.num_faces == 0,
            "octree root can only be set up while the octree is empty (has {} faces)",
            self.num_faces,
        );
        assert!(width >= 0.0 && width.is_finite(), "invalid octree root width {}", width);

        self.nodes.clear();
        self.root = Some(self.nodes.push(Node::new(center, width, 0)));
    }

    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn num_faces(&self) -> hsize {
        self.num_faces
    }

    pub fn is_empty(&self) -> bool {
        self.num_faces == 0
    }

    pub fn num_nodes(&self) -> hsize {
        self.nodes.num_elements()
    }

    pub fn node(&self, node: NodeHandle) -> Option<&Node> {
        self.nodes.get(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> + '_ {
        self.nodes.iter()
    }

    /// Removes all nodes, including the root.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.num_faces = 0;
    }

    /// Stores `face` in the deepest node that fully contains `sphere` and
    /// returns that node.
    pub fn insert(&mut self, face: FaceHandle, sphere: &Sphere) -> NodeHandle {
        let node = self.fit(sphere);
        self.nodes[node].faces.push(face);
        self.num_faces += 1;
        node
    }

    /// Removes `face` from `node`. Panics if the face is not stored there.
    pub fn delete(&mut self, face: FaceHandle, node: NodeHandle) {
        let faces = &mut self.nodes[node].faces;
        match faces.iter().position(|&f| f == face) {
            Some(pos) => {
                faces.swap_remove(pos);
            }
            None => panic!("bug: {:?} is not stored in octree node {:?}", face, node),
        }
        self.num_faces -= 1;
    }

    /// Moves `face`, currently stored in `node`, to the node fitting its new
    /// bounding sphere. Returns the new node and whether it is the same as
    /// `node`.
    pub fn realign(&mut self, face: FaceHandle, node: NodeHandle, sphere: &Sphere) -> (NodeHandle, bool) {
        let target = self.fit(sphere);
        if target == node {
            (node, true)
        } else {
            self.delete(face, node);
            self.nodes[target].faces.push(face);
            self.num_faces += 1;
            (target, false)
        }
    }

    /// Finds the node `sphere` belongs to, creating missing nodes on the way.
    fn fit(&mut self, sphere: &Sphere) -> NodeHandle {
        let mut current = self.root.expect("octree root was not set up");

        loop {
            let (octant, existing) = {
                let node = &self.nodes[current];
                if node.depth >= self.max_depth {
                    return current;
                }

                let octant = node.octant_of(sphere.center);
                if !node.child_contains(octant, sphere) {
                    return current;
                }

                (octant, node.children[octant].into_option())
            };

            current = match existing {
                Some(child) => child,
                None => self.add_child(current, octant),
            };
        }
    }

    fn add_child(&mut self, parent: NodeHandle, octant: usize) -> NodeHandle {
        let (center, width, depth) = {
            let p = &self.nodes[parent];
            (p.child_center(octant), p.width / 2.0, p.depth + 1)
        };

        let child = self.nodes.push(Node::new(center, width, depth));
        self.nodes[parent].children[octant] = opt(Some(child));
        trace!("octree: created {:?} (depth {}) in octant {} of {:?}", child, depth, octant, parent);

        child
    }

    /// Returns the face with the closest hit along `ray`, and the hit
    /// distance.
    ///
    /// `test` performs the exact test against a face and returns the hit
    /// distance. Only nodes whose cube is hit by the ray are visited; the
    /// faces of the root are always tested since they may lie outside of the
    /// root cube.
    pub fn intersect_ray<F>(&self, ray: &Ray, mut test: F) -> Option<(FaceHandle, f32)>
    where
        F: FnMut(FaceHandle) -> Option<f32>,
    {
        let root = self.root?;
        let mut best: Option<(FaceHandle, f32)> = None;
        let mut stack = vec![root];

        while let Some(nh) = stack.pop() {
            let node = &self.nodes[nh];
            for &face in &node.faces {
                if let Some(d) = test(face) {
                    if best.map(|(_, best_d)| d < best_d).unwrap_or(true) {
                        best = Some((face, d));
                    }
                }
            }

            for child in node.children() {
                let c = &self.nodes[child];
                if ray_cube(ray, c.center, c.width) {
                    stack.push(child);
                }
            }
        }

        best
    }

    /// Appends all faces intersecting `sphere` to `out`. Returns `true` if at
    /// least one face was found.
    ///
    /// `test` performs the exact sphere/triangle test for a single face.
    pub fn intersect_sphere<F>(&self, sphere: &Sphere, mut test: F, out: &mut Vec<FaceHandle>) -> bool
    where
        F: FnMut(FaceHandle) -> bool,
    {
        let root = match self.root {
            Some(r) => r,
            None => return false,
        };

        let len_before = out.len();
        let mut stack = vec![root];
        while let Some(nh) = stack.pop() {
            let node = &self.nodes[nh];
            out.extend(node.faces.iter().copied().filter(|&f| test(f)));

            for child in node.children() {
                let c = &self.nodes[child];
                if sphere_cube(sphere, c.center, c.width) {
                    stack.push(child);
                }
            }
        }

        out.len() > len_before
    }

    /// Visits every stored face exactly once, depth first. Within a node, its
    /// own faces come before the faces of its children; children are visited
    /// in octant order.
    pub fn for_each_face(&self, mut visitor: impl FnMut(FaceHandle)) {
        let mut stack: Vec<NodeHandle> = self.root.into_iter().collect();
        while let Some(nh) = stack.pop() {
            let node = &self.nodes[nh];
            node.faces.iter().for_each(|&f| visitor(f));

            // Reverse so that the lowest octant is popped first
            stack.extend(node.children.iter().rev().filter_map(|c| c.into_option()));
        }
    }

    /// Number of faces counted by walking all nodes. Used to verify the
    /// incrementally maintained `num_faces`.
    pub(crate) fn count_faces(&self) -> hsize {
        self.nodes.values().map(|n| n.faces.len() as hsize).sum()
    }
}

impl Default for Octree {
    fn default() -> Self {
        Self::new()
    }
}
