use crate::core::color::remap;
use crate::core::pipeline::{Fragment, PixelShader};
use crate::pipeline::settings::{RenderMode, RenderSettings, ShadingMode};
use crate::pipeline::shaders::brdf::{lambert, phong};
use crate::scene::light::DirectionalLight;
use crate::scene::material::MaterialTextures;
use nalgebra::{Matrix3, Vector3};

/// Depth range stretched over the full grey ramp in `RenderMode::Buffer`.
const DEPTH_VIEW_RANGE: (f32, f32) = (0.990, 1.0);
const AMBIENT_GREY: f32 = 0.3;

/// Lambert diffuse + Phong specular shader with optional normal mapping.
pub struct PhongShader<'a> {
    pub textures: &'a MaterialTextures,
    pub light: DirectionalLight,
    /// Phong exponent before scaling by the gloss map.
    pub shininess: f32,
    pub kd: f32,
    pub ks: f32,
    pub settings: RenderSettings,
}

impl<'a> PhongShader<'a> {
    pub fn new(textures: &'a MaterialTextures, settings: RenderSettings) -> Self {
        Self {
            textures,
            light: DirectionalLight::default(),
            shininess: 25.0,
            kd: 1.0,
            ks: 1.0,
            settings,
        }
    }

    /// Replaces the geometric normal with the normal-map sample in tangent space.
    fn sample_normal(&self, fragment: &Fragment) -> Vector3<f32> {
        let normal = fragment.normal;
        if !self.settings.normal_map {
            return normal;
        }

        let tangent = fragment.tangent;
        let binormal = normal.cross(&tangent);
        let tangent_space = Matrix3::from_columns(&[tangent, binormal, normal]);

        // Decode [0, 1] to [-1, 1]
        let sample = self.textures.normal.sample(fragment.uv) * 2.0 - Vector3::new(1.0, 1.0, 1.0);

        (tangent_space * sample)
            .try_normalize(f32::EPSILON)
            .unwrap_or(normal)
    }
}

impl PixelShader for PhongShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Vector3<f32> {
        if self.settings.render_mode == RenderMode::Buffer {
            let grey = remap(fragment.depth, DEPTH_VIEW_RANGE.0, DEPTH_VIEW_RANGE.1);
            return Vector3::new(grey, grey, grey);
        }

        let normal = self.sample_normal(fragment);
        let to_light = self.light.direction_to_light();

        let observed_area = normal.dot(&to_light).clamp(0.0, 1.0);
        let diffuse = lambert(self.kd, self.textures.diffuse.sample(fragment.uv));
        let exponent = self.shininess * self.textures.gloss.sample(fragment.uv).x;
        let specular = self.textures.specular.sample(fragment.uv)
            * phong(self.ks, exponent, &to_light, &fragment.view_direction, &normal);

        let intensity = self.light.intensity;
        match self.settings.shading_mode {
            ShadingMode::ObservedArea => Vector3::new(observed_area, observed_area, observed_area),
            ShadingMode::Diffuse => diffuse * (intensity * observed_area),
            ShadingMode::Specular => specular * observed_area,
            ShadingMode::Combined => diffuse * (intensity * observed_area) + specular,
            ShadingMode::Ambient => Vector3::new(AMBIENT_GREY, AMBIENT_GREY, AMBIENT_GREY),
        }
    }
}
