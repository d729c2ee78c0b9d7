use crate::core::pipeline::{Fragment, PixelShader};
use nalgebra::Vector3;

/// A simple shader that outputs the interpolated vertex color.
/// Useful for debugging the rasterization and interpolation stages.
#[derive(Debug, Default, Clone, Copy)]
pub struct VertexColorShader;

impl PixelShader for VertexColorShader {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        fragment.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn returns_fragment_color_unchanged() {
        let fragment = Fragment {
            x: 3,
            y: 4,
            depth: 0.5,
            interpolated_w: 2.0,
            color: Vector3::new(2.0, 1.0, 0.0),
            uv: Vector2::zeros(),
            normal: Vector3::z(),
            tangent: Vector3::x(),
            view_direction: Vector3::z(),
        };
        assert_eq!(VertexColorShader.shade(&fragment), Vector3::new(2.0, 1.0, 0.0));
    }
}
