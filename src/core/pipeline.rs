use nalgebra::{Vector2, Vector3};

/// Per-pixel data handed from the rasterizer to the pixel shader.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    /// Pixel coordinates.
    pub x: usize,
    pub y: usize,
    /// Linearly interpolated NDC z (the value written to the depth buffer).
    pub depth: f32,
    /// Perspective-correct w used to rescale the attributes below.
    pub interpolated_w: f32,
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    /// Normalized.
    pub normal: Vector3<f32>,
    /// Normalized.
    pub tangent: Vector3<f32>,
    /// Normalized.
    pub view_direction: Vector3<f32>,
}

/// The programmable pixel stage.
///
/// Returns the linear RGB color for a covered pixel. Values above 1.0 are allowed;
/// the rasterizer rescales them with `max_to_one` before packing.
pub trait PixelShader {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32>;
}
