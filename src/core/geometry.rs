use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single vertex in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Vertex color (white unless the source supplies one).
    pub color: Vector3<f32>,
    /// Texture coordinates (UV).
    pub uv: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector (xyz) for Normal Mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            color: Vector3::new(1.0, 1.0, 1.0),
            uv,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    pub fn with_color(mut self, color: Vector3<f32>) -> Self {
        self.color = color;
        self
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::zeros(), Vector2::zeros())
    }
}

/// A vertex after the transformation stage.
///
/// `position` is context dependent: NDC (x, y, z) plus clip w after the vertex stage,
/// then screen-space x/y with the same z and w right before rasterization.
/// z is the depth-test key; w is the perspective-correction divisor.
///
/// Equality is exact field-wise equality, used to reject duplicate-vertex triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

impl VertexOut {
    /// Builds a screen-space vertex with w = 1 (no perspective), mainly for
    /// feeding the rasterizer directly.
    pub fn screen(x: f32, y: f32, depth: f32, color: Vector3<f32>) -> Self {
        Self {
            position: Vector4::new(x, y, depth, 1.0),
            color,
            uv: Vector2::zeros(),
            normal: Vector3::new(0.0, 0.0, -1.0),
            tangent: Vector3::new(1.0, 0.0, 0.0),
            view_direction: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

impl Default for VertexOut {
    fn default() -> Self {
        Self {
            position: Vector4::zeros(),
            color: Vector3::new(1.0, 1.0, 1.0),
            uv: Vector2::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_direction: Vector3::zeros(),
        }
    }
}
