use cgmath::Point3;
use failure::Fail;
use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    hsize,
    bounding::BoundingBox,
    buffer::RenderBuffer,
    handle::{EdgeHandle, Handle, VertexHandle},
    id::IdGenerator,
    primitive::Triangle,
    transform::Transform,
    winged::{Edge, Face, Side, WingedMesh},
};
use super::{refresh, Action, ActionUnit};


/// A plain triangle soup: positions, three vertex indices per triangle and
/// the transform the resulting mesh gets.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDefinition {
    pub vertices: Vec<Point3<f32>>,
    pub indices: Vec<hsize>,
    pub transform: Transform,
}

impl MeshDefinition {
    pub fn new(vertices: Vec<Point3<f32>>, indices: Vec<hsize>) -> Self {
        Self {
            vertices,
            indices,
            transform: Transform::identity(),
        }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Reasons why a [`MeshDefinition`] can't be turned into a winged-edge mesh.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum ImportError {
    #[fail(display = "mesh definition contains no triangles")]
    NoTriangles,

    #[fail(display = "number of indices ({}) is not a multiple of 3", _0)]
    IndexCount(usize),

    #[fail(display = "index {} of triangle {} is out of range ({} vertices)", index, triangle, num_vertices)]
    IndexOutOfRange {
        triangle: usize,
        index: hsize,
        num_vertices: usize,
    },

    #[fail(display = "triangle {} uses vertex {} more than once", triangle, vertex)]
    DegenerateTriangle {
        triangle: usize,
        vertex: hsize,
    },

    #[fail(
        display = "directed edge {} -> {} is used by more than one triangle (non-manifold \
            or inconsistently oriented; second use in triangle {})",
        from,
        to,
        triangle
    )]
    NonManifoldEdge {
        triangle: usize,
        from: hsize,
        to: hsize,
    },
}

/// Checks everything that could make the import fail, without touching any
/// mesh.
fn validate(def: &MeshDefinition) -> Result<(), ImportError> {
    if def.indices.is_empty() {
        return Err(ImportError::NoTriangles);
    }
    if def.indices.len() % 3 != 0 {
        return Err(ImportError::IndexCount(def.indices.len()));
    }

    let num_vertices = def.vertices.len();
    let mut directed = FxHashMap::default();
    for (triangle, t) in def.indices.chunks(3).enumerate() {
        if let Some(&index) = t.iter().find(|&&i| i as usize >= num_vertices) {
            return Err(ImportError::IndexOutOfRange { triangle, index, num_vertices });
        }
        if t[0] == t[1] || t[0] == t[2] {
            return Err(ImportError::DegenerateTriangle { triangle, vertex: t[0] });
        }
        if t[1] == t[2] {
            return Err(ImportError::DegenerateTriangle { triangle, vertex: t[1] });
        }

        for k in 0..3 {
            let (from, to) = (t[k], t[(k + 1) % 3]);
            if directed.insert((from, to), triangle).is_some() {
                return Err(ImportError::NonManifoldEdge { triangle, from, to });
            }
        }
    }

    Ok(())
}


/// Builds a winged-edge mesh from a [`MeshDefinition`].
///
/// Undoing the import leaves the mesh empty again (transform excluded).
#[derive(Debug, Clone)]
pub struct ActionFromMesh {
    unit: ActionUnit,
}

impl ActionFromMesh {
    /// Imports `def` into the empty `mesh`.
    ///
    /// The definition is validated first; on error, the mesh is not touched.
    /// Triangles have to be oriented consistently: two triangles sharing an
    /// edge have to walk it in opposite directions.
    pub fn run<B: RenderBuffer>(
        mesh: &mut WingedMesh<B>,
        def: &MeshDefinition,
        ids: &mut IdGenerator,
    ) -> Result<Self, ImportError> {
        assert!(mesh.is_empty(), "can only import into an empty mesh");
        validate(def)?;

        let mut unit = ActionUnit::new();

        let bb = BoundingBox::around(def.vertices.iter().cloned());
        unit.setup_octree_root(mesh, bb.center(), bb.max_extent());

        let vertices: Vec<VertexHandle> = def.vertices.iter()
            .map(|&p| unit.add_vertex(mesh, p, 0))
            .collect();

        // Edges by their (first vertex, second vertex) as given by the
        // triangle that created them, i.e. its left face.
        let mut edges = FxHashMap::<(VertexHandle, VertexHandle), EdgeHandle>::default();
        let mut cycles = Vec::with_capacity(def.num_triangles());

        for t in def.indices.chunks(3) {
            let vs = [
                vertices[t[0] as usize],
                vertices[t[1] as usize],
                vertices[t[2] as usize],
            ];
            let triangle = Triangle::new(
                def.vertices[t[0] as usize],
                def.vertices[t[1] as usize],
                def.vertices[t[2] as usize],
            );
            let face = unit.add_face(mesh, Face::new(ids.next_id()), triangle);

            let mut es = [EdgeHandle::new(0); 3];
            for k in 0..3 {
                let (from, to) = (vs[k], vs[(k + 1) % 3]);
                es[k] = match edges.get(&(to, from)) {
                    Some(&existing) => {
                        unit.set_edge_face(mesh, existing, Side::Right, Some(face));
                        existing
                    }
                    None => {
                        let edge = Edge::new(ids.next_id(), from, to).with_face(Side::Left, face);
                        let new = unit.add_edge(mesh, edge);
                        edges.insert((from, to), new);
                        new
                    }
                };

                if mesh.vertex(from).and_then(|v| v.edge()).is_none() {
                    unit.set_vertex_edge(mesh, from, Some(es[k]));
                }
            }

            unit.set_face_edge(mesh, face, Some(es[0]));
            cycles.push((face, es));
        }

        for (face, es) in cycles {
            for k in 0..3 {
                let side = mesh.edge(es[k]).expect("bug: edge vanished during import").side(face);
                unit.set_edge_link(mesh, es[k], side.predecessor(), Some(es[(k + 2) % 3]));
                unit.set_edge_link(mesh, es[k], side.successor(), Some(es[(k + 1) % 3]));
            }
        }

        unit.set_transform(mesh, def.transform);
        refresh(mesh);

        debug!(
            "imported mesh with {} vertices, {} edges and {} faces",
            mesh.num_vertices(),
            mesh.num_edges(),
            mesh.num_faces(),
        );

        Ok(Self { unit })
    }

    pub fn unit(&self) -> &ActionUnit {
        &self.unit
    }
}

impl<B: RenderBuffer> Action<B> for ActionFromMesh {
    fn name(&self) -> &'static str {
        "import mesh"
    }

    fn undo(&mut self, mesh: &mut WingedMesh<B>) {
        // The first recorded action sets up the octree root; undoing it
        // resets the mesh.
        self.unit.undo(mesh);
    }

    fn redo(&mut self, mesh: &mut WingedMesh<B>) {
        self.unit.redo(mesh);
        refresh(mesh);
    }
}
