use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::Rasterizer;
use crate::error::RenderError;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::passes::{DrawStats, rasterization_pass, vertex_transformation_pass};
use crate::pipeline::settings::RenderSettings;
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::shaders::unlit::VertexColorShader;
use crate::scene::camera::Camera;
use crate::scene::light::DirectionalLight;
use crate::scene::material::MaterialTextures;
use crate::scene::mesh::Mesh;
use crate::ui::input::InputState;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Which pixel shader the renderer runs over the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceShader {
    /// Textured Lambert + Phong with normal mapping.
    #[default]
    Phong,
    /// Interpolated vertex colors only.
    VertexColor,
}

/// The high-level renderer that orchestrates the pipeline stages.
/// Owns every per-frame resource: camera, mesh, textures and the frame buffer.
pub struct Renderer {
    pub framebuffer: FrameBuffer,
    pub rasterizer: Rasterizer,
    pub camera: Camera,
    pub mesh: Mesh,
    pub textures: MaterialTextures,
    pub settings: RenderSettings,
    pub shader: SurfaceShader,
    pub light: DirectionalLight,
    pub shininess: f32,
    /// Auto-rotation speed in degrees per second.
    pub rotation_speed: f32,
    /// Packed 0RGB clear color.
    pub background: u32,

    previous_input: InputState,
    last_stats: DrawStats,
}

impl Renderer {
    pub fn new(
        width: usize,
        height: usize,
        camera: Camera,
        mesh: Mesh,
        textures: MaterialTextures,
    ) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            rasterizer: Rasterizer::new(),
            camera,
            mesh,
            textures,
            settings: RenderSettings::default(),
            shader: SurfaceShader::default(),
            light: DirectionalLight::default(),
            shininess: 25.0,
            rotation_speed: 30.0,
            background: 0,
            previous_input: InputState::default(),
            last_stats: DrawStats::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Advances one frame of interaction: camera movement, mode toggles and auto-rotation.
    pub fn update(&mut self, delta_time: f32, input: &InputState) {
        self.camera.update(delta_time, input);

        self.settings = self.settings.apply_input(&self.previous_input, input);
        self.previous_input = *input;

        if self.settings.rotate {
            self.mesh.rotate_y(self.rotation_speed * delta_time);
        }
    }

    /// Renders one frame into the color and depth buffers.
    pub fn render(&mut self) -> DrawStats {
        self.framebuffer.clear(self.background);

        let viewport_aspect = self.width() as f32 / self.height() as f32;
        vertex_transformation_pass(&mut self.mesh, &self.camera, viewport_aspect);

        let framebuffer = &mut self.framebuffer;
        let stats = match self.shader {
            SurfaceShader::Phong => {
                let mut shader = PhongShader::new(&self.textures, self.settings);
                shader.light = self.light;
                shader.shininess = self.shininess;
                rasterization_pass(&self.mesh, framebuffer, &self.rasterizer, &shader)
            }
            SurfaceShader::VertexColor => {
                rasterization_pass(&self.mesh, framebuffer, &self.rasterizer, &VertexColorShader)
            }
        };

        debug!(
            "Frame: {} triangles, {} culled, {} pixels",
            stats.triangles, stats.culled, stats.pixels
        );
        self.last_stats = stats;
        stats
    }

    /// Stats of the most recent `render` call.
    pub fn last_stats(&self) -> DrawStats {
        self.last_stats
    }

    /// Packed 0RGB pixels, row-major, ready for display.
    pub fn color_buffer(&self) -> &[u32] {
        &self.framebuffer.color_buffer
    }

    pub fn save_buffer_to_image<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        save_buffer_to_image(self.color_buffer(), self.width(), self.height(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{pack_rgb, unpack_rgb};
    use crate::pipeline::settings::{RenderMode, ShadingMode};
    use nalgebra::{Point3, Vector3};

    fn quad_renderer() -> Renderer {
        let camera = Camera::new(45.0, Point3::new(0.0, 0.0, -10.0), 1.0);
        Renderer::new(64, 48, camera, Mesh::create_quad_strip(), MaterialTextures::default())
    }

    #[test]
    fn quad_strip_covers_the_middle() {
        let mut renderer = quad_renderer();
        let stats = renderer.render();
        assert_eq!(stats.triangles, 12);
        assert_eq!(stats.culled, 0);
        assert!(stats.pixels > 0);

        // Off the cell diagonals, which can land exactly on pixel centres here.
        let inside = renderer.framebuffer.get_pixel(28, 21).unwrap();
        assert_ne!(inside, renderer.background);
        let corner = renderer.framebuffer.get_pixel(0, 0).unwrap();
        assert_eq!(corner, renderer.background);
    }

    #[test]
    fn render_twice_gives_the_same_image() {
        let mut renderer = quad_renderer();
        renderer.render();
        let first = renderer.color_buffer().to_vec();
        renderer.render();
        assert_eq!(first, renderer.color_buffer());
    }

    #[test]
    fn ambient_mode_paints_flat_grey() {
        let mut renderer = quad_renderer();
        renderer.settings.shading_mode = ShadingMode::Ambient;
        renderer.render();
        assert_eq!(
            renderer.framebuffer.get_pixel(28, 21),
            Some(pack_rgb(Vector3::new(0.3, 0.3, 0.3)))
        );
    }

    #[test]
    fn update_applies_toggles_and_rotation() {
        let mut renderer = quad_renderer();
        let press = InputState {
            toggle_rotation: true,
            cycle_render_mode: true,
            ..Default::default()
        };
        renderer.update(0.0, &press);
        assert!(renderer.settings.rotate);
        assert_eq!(renderer.settings.render_mode, RenderMode::Buffer);

        let before = renderer.mesh.world_matrix;
        renderer.update(1.0, &InputState::default());
        assert_ne!(before, renderer.mesh.world_matrix);
        assert!(renderer.settings.rotate);
    }

    #[test]
    fn vertex_color_shader_shows_vertex_colors() {
        let camera = Camera::new(90.0, Point3::new(0.0, 0.0, -1.0), 1.0);
        let mut mesh = Mesh::create_test_triangle();
        for v in &mut mesh.vertices {
            v.color = Vector3::new(1.0, 0.0, 0.0);
        }
        let mut renderer = Renderer::new(32, 32, camera, mesh, MaterialTextures::default());
        renderer.shader = SurfaceShader::VertexColor;
        renderer.render();
        let pixel = renderer.framebuffer.get_pixel(16, 16).unwrap();
        let color = unpack_rgb(pixel);
        assert!(color.x > 0.99);
        assert_eq!((color.y, color.z), (0.0, 0.0));
    }
}
