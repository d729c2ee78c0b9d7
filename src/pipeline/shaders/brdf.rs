use nalgebra::Vector3;
use std::f32::consts::PI;

/// Lambertian diffuse: kd * albedo / PI.
#[inline]
pub fn lambert(kd: f32, diffuse_color: Vector3<f32>) -> Vector3<f32> {
    diffuse_color * (kd / PI)
}

/// Reflects `v` about the normal `n`.
#[inline]
pub fn reflect(v: &Vector3<f32>, n: &Vector3<f32>) -> Vector3<f32> {
    v - n * (2.0 * n.dot(v))
}

/// Phong specular lobe.
///
/// `l` points from the surface toward the light, `v` is the view direction
/// (camera toward the surface). Returns ks * max(dot(reflect(l, n), v), 0)^exp.
#[inline]
pub fn phong(ks: f32, exp: f32, l: &Vector3<f32>, v: &Vector3<f32>, n: &Vector3<f32>) -> f32 {
    let cos_alpha = reflect(l, n).dot(v).max(0.0);
    ks * cos_alpha.powf(exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lambert_divides_by_pi() {
        let c = lambert(1.0, Vector3::new(PI, PI / 2.0, 0.0));
        assert!((c - Vector3::new(1.0, 0.5, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn phong_peaks_on_mirror_direction() {
        let n = Vector3::new(0.0, 0.0, -1.0);
        // Light straight in front of the surface, camera looking straight at it.
        let l = Vector3::new(0.0, 0.0, -1.0);
        let v = Vector3::new(0.0, 0.0, 1.0);
        assert!((phong(1.0, 25.0, &l, &v, &n) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn phong_is_zero_facing_away() {
        let n = Vector3::new(0.0, 0.0, -1.0);
        let l = Vector3::new(0.0, 0.0, -1.0);
        let v = Vector3::new(0.0, 0.0, -1.0);
        assert_eq!(phong(1.0, 25.0, &l, &v, &n), 0.0);
    }
}
