use nalgebra::Vector3;

/// A light source that is infinitely far away (e.g., Sun). Rays are parallel.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Direction the light travels (from the light toward the scene). Normalized.
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 7.0)
    }
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(|| -Vector3::y()),
            intensity,
        }
    }

    /// Direction FROM the surface point TO the light source.
    pub fn direction_to_light(&self) -> Vector3<f32> {
        -self.direction
    }
}
