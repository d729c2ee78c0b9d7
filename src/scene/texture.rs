use crate::error::RenderError;
use image::RgbImage;
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// Represents a 2D texture map, decoded once into linear RGB floats.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    texels: Vec<Vector3<f32>>,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|e| RenderError::TextureLoad {
            path: path_ref.display().to_string(),
            reason: e.to_string(),
        })?;

        let texture = Self::from_image(&img.to_rgb8());
        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref, texture.width, texture.height
        );
        Ok(texture)
    }

    pub fn from_image(img: &RgbImage) -> Self {
        let texels = img
            .pixels()
            .map(|p| {
                Vector3::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                )
            })
            .collect();

        Self {
            width: img.width(),
            height: img.height(),
            texels,
        }
    }

    /// A 1x1 texture of a single color.
    pub fn solid(color: Vector3<f32>) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Samples the nearest texel. UV (0, 0) is the top-left corner of the image.
    ///
    /// Out-of-range UVs are clamped to the edge texel, so sampling never leaves the
    /// backing buffer. No filtering, no mipmapping, no gamma conversion.
    pub fn sample(&self, uv: Vector2<f32>) -> Vector3<f32> {
        let max_x = self.width.saturating_sub(1);
        let max_y = self.height.saturating_sub(1);

        // NaN casts to 0, which the clamp keeps in range.
        let x = ((uv.x * self.width as f32) as i64).clamp(0, max_x as i64) as usize;
        let y = ((uv.y * self.height as f32) as i64).clamp(0, max_y as i64) as usize;

        self.texels[y * self.width as usize + x]
    }
}
