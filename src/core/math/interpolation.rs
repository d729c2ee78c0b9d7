use nalgebra::{Point2, Vector2, Vector3};
use std::ops::{Add, Mul};

const EPSILON: f32 = 1e-5;

/// Types that can be blended with barycentric weights (a * wa + b * wb + c * wc).
pub trait Interpolatable: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Interpolatable for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// 2D cross product (z component of the 3D cross of two xy vectors).
#[inline(always)]
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of triangle (v0, v1, v2); the sign encodes winding.
#[inline]
pub fn signed_area_x2(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> f32 {
    cross_2d(v1 - v0, v2 - v0)
}

/// Calculates the barycentric weights (w0, w1, w2) of point p
/// with respect to triangle (v0, v1, v2) using edge functions.
///
/// Each weight is the edge function of the edge opposite that vertex,
/// divided by the signed area, so the weights are winding independent.
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let area = signed_area_x2(v0, v1, v2);
    if area.abs() < EPSILON {
        return None;
    }

    let w0 = cross_2d(v2 - v1, p - v1) / area;
    let w1 = cross_2d(v0 - v2, p - v2) / area;
    let w2 = cross_2d(v1 - v0, p - v0) / area;

    Some(Vector3::new(w0, w1, w2))
}

/// A point is inside when all three weights are strictly positive.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x > 0.0 && bary.y > 0.0 && bary.z > 0.0
}

/// Perspective-correct blend factor: 1 / (w0/W0 + w1/W1 + w2/W2),
/// where W are the per-vertex clip-space w values.
///
/// Returns `None` when the denominator collapses.
pub fn interpolated_w(bary: Vector3<f32>, w: [f32; 3]) -> Option<f32> {
    let sum = bary.x / w[0] + bary.y / w[1] + bary.z / w[2];
    if !sum.is_finite() || sum.abs() < EPSILON {
        return None;
    }
    Some(1.0 / sum)
}

/// Linear screen-space interpolation (used for the depth-test key).
#[inline]
pub fn linear_interpolate<T: Interpolatable>(values: [T; 3], bary: Vector3<f32>) -> T {
    values[0] * bary.x + values[1] * bary.y + values[2] * bary.z
}

/// Perspective-correct attribute interpolation:
/// (a0/W0 * w0 + a1/W1 * w1 + a2/W2 * w2) * interpolated_w.
#[inline]
pub fn perspective_interpolate<T: Interpolatable>(
    values: [T; 3],
    bary: Vector3<f32>,
    w: [f32; 3],
    interpolated_w: f32,
) -> T {
    (values[0] * (bary.x / w[0]) + values[1] * (bary.y / w[1]) + values[2] * (bary.z / w[2]))
        * interpolated_w
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Point2<f32>; 3] {
        [
            Point2::new(400.0, 100.0),
            Point2::new(500.0, 300.0),
            Point2::new(300.0, 300.0),
        ]
    }

    #[test]
    fn weights_sum_to_one_and_reconstruct_point() {
        let [v0, v1, v2] = tri();
        let p = Point2::new(410.5, 250.5);
        let bary = barycentric_coordinates(p, v0, v1, v2).unwrap();
        assert!(is_inside_triangle(bary));
        assert!((bary.x + bary.y + bary.z - 1.0).abs() < 1e-5);

        let rebuilt = v0.coords * bary.x + v1.coords * bary.y + v2.coords * bary.z;
        assert!((rebuilt.x - p.x).abs() < 1e-3);
        assert!((rebuilt.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn weights_are_winding_independent() {
        let [v0, v1, v2] = tri();
        let p = Point2::new(400.0, 233.0);
        let a = barycentric_coordinates(p, v0, v1, v2).unwrap();
        let b = barycentric_coordinates(p, v0, v2, v1).unwrap();
        assert!(is_inside_triangle(a));
        assert!(is_inside_triangle(b));
        assert!((a.y - b.z).abs() < 1e-5);
    }

    #[test]
    fn outside_point_fails_containment() {
        let [v0, v1, v2] = tri();
        let bary = barycentric_coordinates(Point2::new(10.5, 10.5), v0, v1, v2).unwrap();
        assert!(!is_inside_triangle(bary));
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let v = Point2::new(5.0, 5.0);
        assert!(barycentric_coordinates(Point2::new(1.0, 1.0), v, v, Point2::new(9.0, 1.0)).is_none());
    }

    #[test]
    fn equal_w_reduces_to_linear() {
        let bary = Vector3::new(0.2, 0.3, 0.5);
        let w = [2.0, 2.0, 2.0];
        let iw = interpolated_w(bary, w).unwrap();
        assert!((iw - 2.0).abs() < 1e-5);

        let values = [1.0_f32, 2.0, 3.0];
        let p = perspective_interpolate(values, bary, w, iw);
        let l = linear_interpolate(values, bary);
        assert!((p - l).abs() < 1e-5);
    }

    #[test]
    fn perspective_weights_favor_nearer_vertex() {
        let bary = Vector3::new(0.5, 0.5, 0.0);
        let w = [1.0, 4.0, 1.0];
        let iw = interpolated_w(bary, w).unwrap();
        let uv = perspective_interpolate([0.0_f32, 1.0, 0.0], bary, w, iw);
        // Halfway on screen is much closer to the near vertex in attribute space.
        assert!((uv - 0.2).abs() < 1e-5);
    }
}
