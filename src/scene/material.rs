use crate::scene::texture::Texture;
use nalgebra::Vector3;

/// The four texture maps the surface shader samples.
/// Exclusively owned by the renderer; always bound, so sampling never hits a missing map.
#[derive(Debug, Clone)]
pub struct MaterialTextures {
    pub diffuse: Texture,
    pub specular: Texture,
    /// Red channel scales the Phong exponent.
    pub gloss: Texture,
    /// Tangent-space normals packed into [0, 1].
    pub normal: Texture,
}

impl Default for MaterialTextures {
    /// Mid-grey diffuse, dim specular, full gloss and a flat normal map.
    fn default() -> Self {
        Self {
            diffuse: Texture::solid(Vector3::new(0.8, 0.8, 0.8)),
            specular: Texture::solid(Vector3::new(0.2, 0.2, 0.2)),
            gloss: Texture::solid(Vector3::new(1.0, 1.0, 1.0)),
            normal: Texture::solid(Vector3::new(0.5, 0.5, 1.0)),
        }
    }
}
