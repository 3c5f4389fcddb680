//! Column-major 4x4 matrices for the 2D transforms.
//!
//! The chart only needs orthographic projection, translation and a screen-
//! plane rotation, so the handful of helpers here beat pulling in a linear
//! algebra crate. Layout matches WGSL `mat4x4<f32>`: each inner array is
//! one column.

pub type Mat4 = [[f32; 4]; 4];

pub fn identity() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Orthographic projection over `(0,0)..(width,height)` with y growing
/// downward, matching screen coordinates.
pub fn orthographic(width: f32, height: f32) -> Mat4 {
    let (left, right) = (0.0, width);
    let (top, bottom) = (0.0, height);
    let (near, far) = (-1.0, 1.0);

    let sx = 2.0 / (right - left);
    let sy = 2.0 / (top - bottom);
    let sz = 2.0 / (far - near);
    let tx = -(right + left) / (right - left);
    let ty = -(top + bottom) / (top - bottom);
    let tz = -(far + near) / (far - near);

    [
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, sz, 0.0],
        [tx, ty, tz, 1.0],
    ]
}

pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [x, y, z, 1.0],
    ]
}

/// Rotation about the screen-perpendicular axis `(0, 0, -1)`, in degrees.
pub fn rotation_deg(degrees: f32) -> Mat4 {
    let theta = degrees.to_radians();
    let (s, c) = theta.sin_cos();
    [
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// `a * b`: applying the product applies `b` first, then `a`.
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k][row] * b[col][k];
            }
            out[col][row] = sum;
        }
    }
    out
}

/// Apply an affine matrix to a 2D point (w = 1 assumed).
#[allow(dead_code)]
pub fn transform_point(m: &Mat4, p: [f32; 2]) -> [f32; 2] {
    [
        m[0][0] * p[0] + m[1][0] * p[1] + m[3][0],
        m[0][1] * p[0] + m[1][1] * p[1] + m[3][1],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 2], b: [f32; 2]) {
        assert!(
            (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_identity_is_noop() {
        let m = identity();
        assert_close(transform_point(&m, [3.5, -2.0]), [3.5, -2.0]);
        assert_eq!(multiply(&m, &m), m);
    }

    #[test]
    fn test_orthographic_corner_mapping() {
        let m = orthographic(900.0, 900.0);
        // Top-left of the screen maps to NDC (-1, 1), bottom-right to (1, -1).
        assert_close(transform_point(&m, [0.0, 0.0]), [-1.0, 1.0]);
        assert_close(transform_point(&m, [900.0, 900.0]), [1.0, -1.0]);
        assert_close(transform_point(&m, [450.0, 450.0]), [0.0, 0.0]);
    }

    #[test]
    fn test_translation() {
        let m = translation(10.0, -4.0, 0.0);
        assert_close(transform_point(&m, [1.0, 2.0]), [11.0, -2.0]);
    }

    #[test]
    fn test_rotation_about_negative_z() {
        // Rotating 90 degrees about (0,0,-1) takes +x to -y.
        let m = rotation_deg(90.0);
        assert_close(transform_point(&m, [1.0, 0.0]), [0.0, -1.0]);
        assert_close(transform_point(&m, [0.0, 1.0]), [1.0, 0.0]);
    }

    #[test]
    fn test_translate_rotate_composition() {
        // The string transform: rotate in local space, then translate.
        let m = multiply(&translation(100.0, 50.0, 0.0), &rotation_deg(90.0));
        assert_close(transform_point(&m, [0.0, 0.0]), [100.0, 50.0]);
        assert_close(transform_point(&m, [1.0, 0.0]), [100.0, 49.0]);
    }
}
