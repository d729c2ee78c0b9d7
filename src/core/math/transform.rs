use nalgebra::{Matrix4, Point2, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating various transformation matrices.
/// Manually implemented to keep control over the coordinate system:
/// Left-Handed, camera looks down +Z, NDC depth in [0, 1].
/// Matrices act on column vectors (`M * v`).
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pitch around X first, then yaw around Y (roll is unused by the camera).
    pub fn rotation_pitch_yaw(pitch_rad: f32, yaw_rad: f32) -> Matrix4<f32> {
        Self::rotation_y(yaw_rad) * Self::rotation_x(pitch_rad)
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Camera-to-world matrix built from an orthonormal basis and an origin.
    /// Its inverse is the view matrix.
    pub fn basis(
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
        origin: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Matrix4::new(
            right.x, up.x, forward.x, origin.x,
            right.y, up.y, forward.y, origin.y,
            right.z, up.z, forward.z, origin.z,
            0.0,     0.0,  0.0,       1.0,
        )
    }

    /// Creates a Perspective Projection matrix (Left-Handed).
    /// `fov_tan` is tan(fov_y / 2). Maps view depth [near, far] to NDC z [0, 1]
    /// and copies view z into clip w.
    pub fn perspective_lh(fov_tan: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        let y_scale = 1.0 / fov_tan;
        let x_scale = y_scale / aspect_ratio;
        let depth_scale = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0,         0.0,
            0.0,     y_scale, 0.0,         0.0,
            0.0,     0.0,     depth_scale, -near * depth_scale,
            0.0,     0.0,     1.0,         0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Smallest clip w that is still divided; anything at or below lies on or behind the camera plane.
pub const MIN_CLIP_W: f32 = 1e-6;

/// Performs perspective division: Clip Space -> NDC.
/// x, y, z are divided by w; w itself is kept for perspective-correct interpolation.
/// Positions with w at or below `MIN_CLIP_W` are left undivided (the frustum test rejects them).
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Vector4<f32> {
    let w = clip.w;
    if w > MIN_CLIP_W {
        Vector4::new(clip.x / w, clip.y / w, clip.z / w, w)
    } else {
        *clip
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

/// Inverse of `ndc_to_screen`.
#[inline]
pub fn screen_to_ndc(screen_x: f32, screen_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        screen_x / width * 2.0 - 1.0,
        1.0 - screen_y / height * 2.0,
    )
}
