//! Minimal column-major 4x4 matrix support for the transform pipeline.

use std::ops::Mul;

/// Column-major 4x4 float matrix.
///
/// The flat layout matches what `uniform_matrix_4_f32_slice` expects with
/// `transpose = false`: element `(row, col)` lives at `data[col * 4 + row]`,
/// so a translation's offset occupies `data[12..15]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// Matrix elements, column by column.
    pub data: [f32; 16],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Translation by `(x, y, z)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    /// Non-uniform scale along the principal axes.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    /// Rotation around the Y axis; positive angles turn counterclockwise
    /// when viewed from +Y.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.data[0] = c;
        m.data[2] = -s;
        m.data[8] = s;
        m.data[10] = c;
        m
    }

    /// Right-handed perspective projection mapping depth to [-1, 1].
    ///
    /// `aspect` is width over height. A degenerate aspect (zero-height
    /// surface) produces non-finite entries and an empty render, not an
    /// error.
    pub fn perspective(fovy_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy_deg.to_radians() / 2.0).tan();
        let mut m = Self { data: [0.0; 16] };
        m.data[0] = f / aspect;
        m.data[5] = f;
        m.data[10] = (far + near) / (near - far);
        m.data[11] = -1.0;
        m.data[14] = (2.0 * far * near) / (near - far);
        m
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut data = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.data[k * 4 + row] * rhs.data[col * 4 + k];
                }
                data[col * 4 + row] = acc;
            }
        }
        Mat4 { data }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for i in 0..16 {
            assert!(
                (a.data[i] - b.data[i]).abs() < 1e-5,
                "element {i}: {} != {}",
                a.data[i],
                b.data[i]
            );
        }
    }

    /// Applies `m` to the point `(x, y, z, 1)` and drops w.
    fn apply(m: Mat4, p: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0; 3];
        for (row, v) in out.iter_mut().enumerate() {
            *v = m.data[row] * p[0]
                + m.data[4 + row] * p[1]
                + m.data[8 + row] * p[2]
                + m.data[12 + row];
        }
        out
    }

    #[test]
    fn test_identity_is_multiplicative_neutral() {
        let t = Mat4::translation(1.0, -2.0, 3.0);
        assert_mat_eq(Mat4::IDENTITY * t, t);
        assert_mat_eq(t * Mat4::IDENTITY, t);
    }

    #[test]
    fn test_translation_occupies_last_column() {
        let t = Mat4::translation(0.5, 0.0, -5.0);
        assert_eq!(&t.data[12..15], &[0.5, 0.0, -5.0]);
        assert_eq!(apply(t, [0.0, 0.0, 0.0]), [0.5, 0.0, -5.0]);
    }

    #[test]
    fn test_scaling_occupies_diagonal() {
        let s = Mat4::scaling(2.0, 3.0, 4.0);
        assert_eq!(s.data[0], 2.0);
        assert_eq!(s.data[5], 3.0);
        assert_eq!(s.data[10], 4.0);
        assert_eq!(apply(s, [1.0, 1.0, 1.0]), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rotation_y_zero_is_identity() {
        assert_mat_eq(Mat4::rotation_y(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let r = Mat4::rotation_y(FRAC_PI_2);
        let p = apply(r, [1.0, 0.0, 0.0]);
        assert!((p[0]).abs() < 1e-6);
        assert!((p[1]).abs() < 1e-6);
        assert!((p[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_y_preserves_y() {
        let r = Mat4::rotation_y(1.234);
        let p = apply(r, [0.3, 0.7, -0.2]);
        assert!((p[1] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_entries() {
        let p = Mat4::perspective(45.0, 4.0 / 3.0, 0.1, 100.0);
        let f = 1.0 / (45.0f32.to_radians() / 2.0).tan();

        assert!((p.data[0] - f / (4.0 / 3.0)).abs() < 1e-5);
        assert!((p.data[5] - f).abs() < 1e-5);
        assert!((p.data[10] - (100.0 + 0.1) / (0.1 - 100.0)).abs() < 1e-5);
        assert_eq!(p.data[11], -1.0);
        assert!((p.data[14] - (2.0 * 100.0 * 0.1) / (0.1 - 100.0)).abs() < 1e-5);
        assert_eq!(p.data[15], 0.0);
    }

    #[test]
    fn test_multiplication_order() {
        // translate-then-scale differs from scale-then-translate
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scaling(2.0, 2.0, 2.0);

        // t * s: scale applies first, offset survives unscaled
        assert_eq!(apply(t * s, [1.0, 0.0, 0.0]), [3.0, 0.0, 0.0]);
        // s * t: offset itself is scaled
        assert_eq!(apply(s * t, [1.0, 0.0, 0.0]), [4.0, 0.0, 0.0]);
    }
}
