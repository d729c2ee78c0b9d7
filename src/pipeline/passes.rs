use crate::core::framebuffer::FrameBuffer;
use crate::core::frustum::is_triangle_in_frustum;
use crate::core::geometry::{Vertex, VertexOut};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::PixelShader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};
use rayon::prelude::*;

/// Counters for one mesh draw, reported in debug logs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawStats {
    /// Every assembled triangle, culled ones included.
    pub triangles: usize,
    /// Outside the frustum or referencing a missing vertex.
    pub culled: usize,
    pub pixels: usize,
}

impl DrawStats {
    /// Triangles that reached the rasterizer.
    pub fn drawn(&self) -> usize {
        self.triangles.saturating_sub(self.culled)
    }
}

/// Vertex Transformation Pass: regenerates `mesh.vertices_out` in full.
///
/// `viewport_aspect` is width / height of the target. x is scaled by
/// `camera.aspect_ratio / viewport_aspect`, so the aspect ratio is applied exactly once
/// whether or not the camera projection already includes it.
pub fn vertex_transformation_pass(mesh: &mut Mesh, camera: &Camera, viewport_aspect: f32) {
    let world_view_projection =
        camera.projection_matrix() * camera.view_matrix() * mesh.world_matrix;
    let aspect_correction = camera.aspect_ratio() / viewport_aspect;
    let world = mesh.world_matrix;

    mesh.vertices_out = mesh
        .vertices
        .par_iter()
        .map(|vertex| transform_vertex(vertex, &world, &world_view_projection, aspect_correction))
        .collect();
}

/// Model space -> NDC for a single vertex.
/// The returned position holds NDC x, y, z and the pre-divide clip w.
pub fn transform_vertex(
    vertex: &Vertex,
    world: &Matrix4<f32>,
    world_view_projection: &Matrix4<f32>,
    aspect_correction: f32,
) -> VertexOut {
    let clip = world_view_projection * vertex.position.to_homogeneous();

    // Used later for specular: camera -> vertex, taken before the divide.
    let view_direction = clip
        .xyz()
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::z);

    // Directions only see the world matrix.
    let normal = world.transform_vector(&vertex.normal);
    let tangent = world.transform_vector(&vertex.tangent);

    let mut position = apply_perspective_division(&clip);
    position.x *= aspect_correction;

    VertexOut {
        position,
        color: vertex.color,
        uv: vertex.uv,
        normal,
        tangent,
        view_direction,
    }
}

/// Rasterization Pass: assembles triangles from the transformed vertices, drops those
/// not fully inside the frustum, maps the rest to screen space and rasterizes them.
pub fn rasterization_pass<S: PixelShader>(
    mesh: &Mesh,
    framebuffer: &mut FrameBuffer,
    rasterizer: &Rasterizer,
    shader: &S,
) -> DrawStats {
    let width = framebuffer.width as f32;
    let height = framebuffer.height as f32;
    let mut stats = DrawStats::default();

    for [i0, i1, i2] in mesh.triangle_indices() {
        stats.triangles += 1;

        let (Some(v0), Some(v1), Some(v2)) = (
            mesh.vertices_out.get(i0),
            mesh.vertices_out.get(i1),
            mesh.vertices_out.get(i2),
        ) else {
            stats.culled += 1;
            continue;
        };

        let mut triangle = [*v0, *v1, *v2];
        if !is_triangle_in_frustum(&triangle) {
            stats.culled += 1;
            continue;
        }

        for v in &mut triangle {
            let screen = ndc_to_screen(v.position.x, v.position.y, width, height);
            v.position.x = screen.x;
            v.position.y = screen.y;
        }

        stats.pixels += rasterizer.rasterize_triangle(framebuffer, shader, &triangle);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frustum::is_in_frustum;
    use crate::pipeline::shaders::unlit::VertexColorShader;
    use nalgebra::Point3;

    #[test]
    fn vertex_at_camera_origin_is_rejected_without_panicking() {
        let camera = Camera::new(45.0, Point3::new(0.0, 5.0, -64.0), 1.0);
        let mut mesh = Mesh::new(
            vec![Vertex::new(Point3::new(0.0, 5.0, -64.0), Vector3::z(), Default::default())],
            vec![],
            Default::default(),
        );
        vertex_transformation_pass(&mut mesh, &camera, 1.0);
        let out = mesh.vertices_out[0];
        assert!(out.position.w.abs() < 1e-4);
        assert!(!is_in_frustum(&out.position));
    }

    #[test]
    fn w_keeps_view_depth_and_z_is_ndc() {
        let camera = Camera::new(90.0, Point3::origin(), 1.0);
        let mut mesh = Mesh::create_test_triangle();
        mesh.translate(&Vector3::new(0.0, 0.0, 10.0));
        vertex_transformation_pass(&mut mesh, &camera, 1.0);

        for out in &mesh.vertices_out {
            assert!((out.position.w - 10.0).abs() < 1e-4);
            assert!(out.position.z > 0.0 && out.position.z < 1.0);
            assert!(is_in_frustum(&out.position));
        }
        // Top vertex: y = 0.5 at depth 10 with a 90 degree fov.
        assert!((mesh.vertices_out[0].position.y - 0.05).abs() < 1e-4);
    }

    #[test]
    fn aspect_ratio_is_applied_once() {
        let mut mesh = Mesh::create_test_triangle();
        mesh.translate(&Vector3::new(0.0, 0.0, 10.0));

        let square_cam = Camera::new(90.0, Point3::origin(), 1.0);
        vertex_transformation_pass(&mut mesh, &square_cam, 2.0);
        let x_corrected = mesh.vertices_out[1].position.x;

        let wide_cam = Camera::new(90.0, Point3::origin(), 2.0);
        vertex_transformation_pass(&mut mesh, &wide_cam, 2.0);
        let x_projected = mesh.vertices_out[1].position.x;

        assert!((x_corrected - 0.025).abs() < 1e-5);
        assert!((x_corrected - x_projected).abs() < 1e-5);
    }

    #[test]
    fn normals_ignore_translation_and_projection() {
        let camera = Camera::default();
        let mut mesh = Mesh::create_test_triangle();
        mesh.translate(&Vector3::new(3.0, 0.0, 10.0));
        mesh.rotate_y(90.0);
        vertex_transformation_pass(&mut mesh, &camera, 1.0);
        // (0, 0, -1) rotated 90 degrees around Y.
        assert!((mesh.vertices_out[0].normal - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn outside_triangle_is_culled_and_inside_is_drawn() {
        let camera = Camera::default();
        let mut fb = FrameBuffer::new(64, 64);
        fb.clear(0);

        let mut mesh = Mesh::create_test_triangle();
        mesh.translate(&Vector3::new(0.0, 0.0, 2.0));
        vertex_transformation_pass(&mut mesh, &camera, 1.0);
        let stats = rasterization_pass(&mesh, &mut fb, &Rasterizer::new(), &VertexColorShader);
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.culled, 0);
        assert!(stats.pixels > 0);

        // Behind the camera.
        let mut behind = Mesh::create_test_triangle();
        behind.translate(&Vector3::new(0.0, 0.0, -2.0));
        vertex_transformation_pass(&mut behind, &camera, 1.0);
        let stats = rasterization_pass(&behind, &mut fb, &Rasterizer::new(), &VertexColorShader);
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.pixels, 0);
    }

    #[test]
    fn missing_vertex_is_counted_as_a_culled_triangle() {
        let camera = Camera::default();
        let mut fb = FrameBuffer::new(16, 16);
        fb.clear(0);

        let mut mesh = Mesh::create_test_triangle();
        mesh.indices = vec![0, 1, 7];
        mesh.translate(&Vector3::new(0.0, 0.0, 2.0));
        vertex_transformation_pass(&mut mesh, &camera, 1.0);

        let stats = rasterization_pass(&mesh, &mut fb, &Rasterizer::new(), &VertexColorShader);
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.drawn(), 0);
        assert_eq!(stats.pixels, 0);
        assert!(fb.color_buffer.iter().all(|&p| p == 0));
    }
}
