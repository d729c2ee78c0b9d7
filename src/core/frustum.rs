use crate::core::geometry::VertexOut;
use crate::core::math::transform::MIN_CLIP_W;
use nalgebra::Vector4;

/// Checks whether a post-divide position lies inside the canonical view volume:
/// |x| <= 1, |y| <= 1, 0 <= z <= 1, with a positive clip w.
///
/// NaN coordinates fail every comparison and are rejected too.
#[inline]
pub fn is_in_frustum(position: &Vector4<f32>) -> bool {
    position.w > MIN_CLIP_W
        && (-1.0..=1.0).contains(&position.x)
        && (-1.0..=1.0).contains(&position.y)
        && (0.0..=1.0).contains(&position.z)
}

/// A triangle survives only if all three vertices are inside.
/// There is no partial clipping: a triangle crossing a plane is dropped whole.
#[inline]
pub fn is_triangle_in_frustum(triangle: &[VertexOut; 3]) -> bool {
    triangle.iter().all(|v| is_in_frustum(&v.position))
}
