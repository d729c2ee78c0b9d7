use nalgebra::Vector3;

/// Scales the color down so its largest channel is at most 1.0.
/// Unlike a per-channel clamp, this keeps the r:g:b ratio (hue) intact.
pub fn max_to_one(color: Vector3<f32>) -> Vector3<f32> {
    let max_channel = color.x.max(color.y).max(color.z);
    if max_channel > 1.0 {
        color / max_channel
    } else {
        color
    }
}

/// Packs a linear [0, 1] color into a 0RGB u32, as consumed by the window and image writers.
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (r << 16) | (g << 8) | b
}

/// Inverse of `pack_rgb` (up to 8-bit quantization).
pub fn unpack_rgb(packed: u32) -> Vector3<f32> {
    Vector3::new(
        ((packed >> 16) & 0xFF) as f32 / 255.0,
        ((packed >> 8) & 0xFF) as f32 / 255.0,
        (packed & 0xFF) as f32 / 255.0,
    )
}

/// Remaps `value` from [min, max] to [0, 1], clamped.
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    if (max - min).abs() < f32::EPSILON {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_to_one_preserves_ratio() {
        let c = max_to_one(Vector3::new(2.0, 1.0, 0.0));
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 0.5).abs() < 1e-6);
        assert!(c.z.abs() < 1e-6);
    }

    #[test]
    fn max_to_one_leaves_in_range_colors_alone() {
        let c = Vector3::new(0.2, 0.9, 1.0);
        assert_eq!(max_to_one(c), c);
    }

    #[test]
    fn pack_layout_is_0rgb() {
        assert_eq!(pack_rgb(Vector3::new(1.0, 0.0, 0.0)), 0x00FF_0000);
        assert_eq!(pack_rgb(Vector3::new(0.0, 1.0, 0.0)), 0x0000_FF00);
        assert_eq!(pack_rgb(Vector3::new(0.0, 0.0, 1.0)), 0x0000_00FF);
        let back = unpack_rgb(pack_rgb(Vector3::new(0.5, 0.25, 1.0)));
        assert!((back.x - 0.5).abs() < 1.0 / 255.0 + 1e-6);
    }

    #[test]
    fn remap_clamps_outside_range() {
        assert_eq!(remap(0.5, 0.99, 1.0), 0.0);
        assert_eq!(remap(2.0, 0.99, 1.0), 1.0);
        assert!((remap(0.995, 0.99, 1.0) - 0.5).abs() < 1e-3);
    }
}
