use crate::error::RenderError;
use crate::pipeline::renderer::SurfaceShader;
use crate::pipeline::settings::{RenderMode, RenderSettings, ShadingMode};
use crate::scene::mesh::PrimitiveTopology;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    // --- Initial Modes ---
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub shading_mode: ShadingMode,
    #[serde(default = "default_true")]
    pub normal_map: bool,
    #[serde(default)]
    pub rotate: bool,
    /// Degrees per second while auto-rotation is on.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,

    // --- Lighting ---
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "default_light_direction")]
    pub light_direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub light_intensity: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            background: default_background(),
            render_mode: RenderMode::default(),
            shading_mode: ShadingMode::default(),
            normal_map: true,
            rotate: false,
            rotation_speed: default_rotation_speed(),
            shininess: default_shininess(),
            light_direction: default_light_direction(),
            light_intensity: default_light_intensity(),
        }
    }
}

impl RenderConfig {
    /// Initial runtime switches for the renderer.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            render_mode: self.render_mode,
            shading_mode: self.shading_mode,
            normal_map: self.normal_map,
            rotate: self.rotate,
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "Rasterizer_ColorBuffer.bmp".to_string()
}
fn default_background() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}
fn default_true() -> bool {
    true
}
fn default_rotation_speed() -> f32 {
    30.0
}
fn default_shininess() -> f32 {
    25.0
}
fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            origin: default_origin(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_origin() -> [f32; 3] {
    [0.0, 0.0, -10.0]
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Default, Deserialize)]
pub struct SceneConfig {
    /// OBJ file to render; the built-in quad strip is used when absent.
    pub mesh: Option<String>,
    /// Overrides the topology of the loaded mesh.
    pub topology: Option<PrimitiveTopology>,
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default)]
    pub shader: SurfaceShader,

    // --- Material Textures ---
    pub diffuse_texture: Option<String>,
    pub specular_texture: Option<String>,
    pub gloss_texture: Option<String>,
    pub normal_texture: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|e| RenderError::ConfigRead {
            path: path_ref.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, RenderError> {
        toml::from_str(content).map_err(|e| RenderError::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.output, "Rasterizer_ColorBuffer.bmp");
        assert_eq!(config.render.background, [0.0, 0.0, 0.0]);
        assert_eq!(config.render.shading_mode, ShadingMode::Combined);
        assert!(config.render.normal_map);
        assert_eq!(config.camera.fov, 45.0);
        assert!(config.scene.mesh.is_none());
    }

    #[test]
    fn parses_modes_and_scene() {
        let config = Config::from_toml(
            r#"
            [render]
            width = 800
            height = 600
            render_mode = "buffer"
            shading_mode = "observed_area"
            rotate = true

            [camera]
            origin = [0.0, 5.0, -64.0]

            [scene]
            mesh = "assets/vehicle.obj"
            topology = "triangle_list"
            translation = [0.0, 0.0, 10.0]
            shader = "vertex_color"
            diffuse_texture = "assets/vehicle_diffuse.png"
            "#,
        )
        .unwrap();

        let settings = config.render.settings();
        assert_eq!(settings.render_mode, RenderMode::Buffer);
        assert_eq!(settings.shading_mode, ShadingMode::ObservedArea);
        assert!(settings.rotate);
        assert_eq!(config.camera.origin, [0.0, 5.0, -64.0]);
        assert_eq!(config.scene.topology, Some(PrimitiveTopology::TriangleList));
        assert_eq!(config.scene.translation, [0.0, 0.0, 10.0]);
        assert_eq!(config.scene.shader, SurfaceShader::VertexColor);
        assert!(config.scene.specular_texture.is_none());
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = Config::from_toml("[render]\nshading_mode = \"toon\"").unwrap_err();
        assert!(matches!(err, RenderError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, RenderError::ConfigRead { .. }));
    }
}
