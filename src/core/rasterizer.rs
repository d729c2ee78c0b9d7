use crate::core::color::{max_to_one, pack_rgb};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::{
    barycentric_coordinates, interpolated_w, is_inside_triangle, linear_interpolate,
    perspective_interpolate, signed_area_x2,
};
use crate::core::pipeline::{Fragment, PixelShader};
use nalgebra::{Point2, Vector3};

/// Triangles with less than this much (doubled) screen area are skipped.
const MIN_AREA: f32 = 1e-5;

/// Pixels added around the triangle's bounding box so shared edges leave no seams.
const BOUNDING_BOX_MARGIN: i32 = 1;

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterize a single triangle whose positions are already in screen space
    /// (x, y in pixels, z = NDC depth, w = clip w).
    ///
    /// Returns the number of pixels written. Degenerate triangles write nothing.
    pub fn rasterize_triangle<S: PixelShader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        triangle: &[VertexOut; 3],
    ) -> usize {
        let [v0, v1, v2] = triangle;

        // 1. Duplicate vertices mean there is no surface.
        if v0 == v1 || v1 == v2 || v2 == v0 {
            return 0;
        }

        let screen = [
            Point2::new(v0.position.x, v0.position.y),
            Point2::new(v1.position.x, v1.position.y),
            Point2::new(v2.position.x, v2.position.y),
        ];

        // 2. Zero-area guard (also protects the barycentric division below).
        if signed_area_x2(screen[0], screen[1], screen[2]).abs() < MIN_AREA {
            return 0;
        }

        let depths = [v0.position.z, v1.position.z, v2.position.z];
        let w_values = [v0.position.w, v1.position.w, v2.position.w];

        // 3. Bounding Box
        let (min_x, min_y, max_x, max_y) =
            self.compute_bounding_box(&screen, framebuffer.width, framebuffer.height);

        // 4. Pixel Loop
        let mut written = 0;
        for y in min_y..max_y {
            for x in min_x..max_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(bary) = barycentric_coordinates(pixel_center, screen[0], screen[1], screen[2])
                else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }

                // Depth-test key: linear NDC z. The perspective-correct w only drives attributes.
                let depth = linear_interpolate(depths, bary);
                let Some(interpolated_w) = interpolated_w(bary, w_values) else {
                    continue;
                };

                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let fragment = Fragment {
                    x,
                    y,
                    depth,
                    interpolated_w,
                    color: perspective_interpolate(
                        [v0.color, v1.color, v2.color],
                        bary,
                        w_values,
                        interpolated_w,
                    ),
                    uv: perspective_interpolate([v0.uv, v1.uv, v2.uv], bary, w_values, interpolated_w),
                    normal: normalize_or_zero(perspective_interpolate(
                        [v0.normal, v1.normal, v2.normal],
                        bary,
                        w_values,
                        interpolated_w,
                    )),
                    tangent: normalize_or_zero(perspective_interpolate(
                        [v0.tangent, v1.tangent, v2.tangent],
                        bary,
                        w_values,
                        interpolated_w,
                    )),
                    view_direction: normalize_or_zero(perspective_interpolate(
                        [v0.view_direction, v1.view_direction, v2.view_direction],
                        bary,
                        w_values,
                        interpolated_w,
                    )),
                };

                let color = max_to_one(shader.shade(&fragment));
                framebuffer.set_pixel(x, y, pack_rgb(color));
                written += 1;
            }
        }
        written
    }

    /// Integer bounds of the triangle, grown by the margin and clamped to the buffer.
    /// The max bounds are exclusive.
    fn compute_bounding_box(
        &self,
        points: &[Point2<f32>; 3],
        width: usize,
        height: usize,
    ) -> (usize, usize, usize, usize) {
        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i32;
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i32;
        let max_x = points[0].x.max(points[1].x).max(points[2].x).floor() as i32;
        let max_y = points[0].y.max(points[1].y).max(points[2].y).floor() as i32;

        let clamp_x = |v: i32| v.clamp(0, width as i32) as usize;
        let clamp_y = |v: i32| v.clamp(0, height as i32) as usize;

        (
            clamp_x(min_x - BOUNDING_BOX_MARGIN),
            clamp_y(min_y - BOUNDING_BOX_MARGIN),
            clamp_x(max_x + BOUNDING_BOX_MARGIN),
            clamp_y(max_y + BOUNDING_BOX_MARGIN),
        )
    }
}

#[inline]
fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
