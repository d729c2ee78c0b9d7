use crate::core::geometry::{Vertex, VertexOut};
use crate::core::math::transform::TransformFactory;
use crate::error::RenderError;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use serde::Deserialize;

/// How the index buffer is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveTopology {
    /// Every 3 indices form one triangle.
    #[default]
    TriangleList,
    /// Every index after the first two forms a triangle with its two predecessors;
    /// odd triangles swap their last two vertices to keep the winding.
    TriangleStrip,
}

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Model-space vertices (authoritative, never modified by rendering).
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    pub world_matrix: Matrix4<f32>,
    /// Regenerated in full by the vertex stage before every render.
    pub vertices_out: Vec<VertexOut>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world_matrix: Matrix4::identity(),
            vertices_out: Vec::new(),
        }
    }

    /// Checks that every index references an existing vertex.
    pub fn validate(&self) -> Result<(), RenderError> {
        let vertex_count = self.vertices.len();
        match self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(RenderError::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Index triples of every triangle, in the order the topology defines.
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        match self.topology {
            PrimitiveTopology::TriangleList => self
                .indices
                .chunks_exact(3)
                .map(|c| [c[0] as usize, c[1] as usize, c[2] as usize])
                .collect(),
            PrimitiveTopology::TriangleStrip => self
                .indices
                .windows(3)
                .enumerate()
                .map(|(i, w)| {
                    if i % 2 == 0 {
                        [w[0] as usize, w[1] as usize, w[2] as usize]
                    } else {
                        [w[0] as usize, w[2] as usize, w[1] as usize]
                    }
                })
                .collect(),
        }
    }

    /// Spins the mesh around its own Y axis.
    pub fn rotate_y(&mut self, angle_degrees: f32) {
        self.world_matrix = self.world_matrix * TransformFactory::rotation_y(angle_degrees.to_radians());
    }

    /// Moves the mesh in world space.
    pub fn translate(&mut self, offset: &Vector3<f32>) {
        self.world_matrix = TransformFactory::translation(offset) * self.world_matrix;
    }

    /// Derives per-vertex tangents from position and UV deltas of each triangle.
    /// Contributions are accumulated per vertex, then Gram-Schmidt-orthogonalized
    /// against the normal. Triangles with a degenerate UV mapping contribute nothing.
    pub fn compute_tangents(&mut self) {
        let mut accumulated = vec![Vector3::<f32>::zeros(); self.vertices.len()];

        for [i0, i1, i2] in self.triangle_indices() {
            let (Some(v0), Some(v1), Some(v2)) =
                (self.vertices.get(i0), self.vertices.get(i1), self.vertices.get(i2))
            else {
                continue;
            };

            let edge0 = v1.position - v0.position;
            let edge1 = v2.position - v0.position;
            let diff_x = Vector2::new(v1.uv.x - v0.uv.x, v2.uv.x - v0.uv.x);
            let diff_y = Vector2::new(v1.uv.y - v0.uv.y, v2.uv.y - v0.uv.y);

            let det = diff_x.x * diff_y.y - diff_y.x * diff_x.y;
            if det.abs() < 1e-12 {
                continue;
            }
            let r = 1.0 / det;
            let tangent = (edge0 * diff_y.y - edge1 * diff_y.x) * r;

            accumulated[i0] += tangent;
            accumulated[i1] += tangent;
            accumulated[i2] += tangent;
        }

        for (vertex, tangent) in self.vertices.iter_mut().zip(accumulated) {
            let n = vertex.normal;
            vertex.tangent = (tangent - n * n.dot(&tangent))
                .try_normalize(1e-6)
                .unwrap_or_else(Vector3::zeros);
        }
    }

    /// A 3x3 grid quad drawn as one strip with a degenerate join between rows.
    /// Facing -Z, so the default camera looking down +Z sees it.
    pub fn create_quad_strip() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let mut vertices = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                let x = -3.0 + 3.0 * col as f32;
                let y = 3.0 - 3.0 * row as f32;
                let uv = Vector2::new(0.5 * col as f32, 0.5 * row as f32);
                vertices.push(Vertex::new(Point3::new(x, y, -2.0), normal, uv).with_tangent(tangent));
            }
        }

        let indices = vec![3, 0, 4, 1, 5, 2, 2, 6, 6, 3, 7, 4, 8, 5];

        Self::new(vertices, indices, PrimitiveTopology::TriangleStrip)
    }

    /// Creates a simple red/green/blue triangle mesh for testing purposes.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), normal, Vector2::new(0.5, 0.0))
                .with_color(Vector3::new(1.0, 0.0, 0.0)),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), normal, Vector2::new(1.0, 1.0))
                .with_color(Vector3::new(0.0, 1.0, 0.0)),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), normal, Vector2::new(0.0, 1.0))
                .with_color(Vector3::new(0.0, 0.0, 1.0)),
        ];

        Self::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
    }
}
