//! Per-frame model/view/projection computation.
//!
//! Nothing here persists between frames: every matrix is rebuilt from the
//! elapsed wall-clock time and the current surface size, so the rotation
//! angle is derived, never integrated, and cannot drift.

use crate::mat4::Mat4;

/// Degrees of model rotation per elapsed millisecond. Negative spins the
/// pyramid clockwise when viewed from +Y.
pub const SPIN_DEG_PER_MS: f32 = -0.0005;

/// Model offset along +X.
const MODEL_OFFSET_X: f32 = 0.5;
/// Uniform model scale factor.
const MODEL_SCALE: f32 = 2.0;
/// Camera pull-back: the world moves this far along Z.
const CAMERA_Z: f32 = -5.0;
/// Vertical field of view in degrees.
const FOV_Y_DEG: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Rotation angle in degrees for a given elapsed time since startup.
pub fn rotation_angle_deg(elapsed_ms: f32) -> f32 {
    elapsed_ms * SPIN_DEG_PER_MS
}

/// The three matrices uploaded to the shader each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    /// Object-to-world transform: translate, then rotate, then scale.
    pub model: Mat4,
    /// World-to-camera transform.
    pub view: Mat4,
    /// Camera-to-clip transform.
    pub projection: Mat4,
}

impl Transforms {
    /// Computes the frame transforms for `elapsed_ms` milliseconds since
    /// startup and a surface of `size` physical pixels.
    ///
    /// The aspect ratio divides as floating point; integer division would
    /// distort any non-square surface.
    pub fn compute(elapsed_ms: f32, size: (i32, i32)) -> Self {
        let angle = rotation_angle_deg(elapsed_ms).to_radians();
        let model = Mat4::translation(MODEL_OFFSET_X, 0.0, 0.0)
            * Mat4::rotation_y(angle)
            * Mat4::scaling(MODEL_SCALE, MODEL_SCALE, MODEL_SCALE);

        let view = Mat4::translation(0.0, 0.0, CAMERA_Z);

        let aspect = size.0 as f32 / size.1 as f32;
        let projection = Mat4::perspective(FOV_Y_DEG, aspect, NEAR_PLANE, FAR_PLANE);

        Self { model, view, projection }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_angle_is_linear_in_elapsed_time() {
        let t1 = 1_000.0;
        let t2 = 7_500.0;
        let delta = rotation_angle_deg(t2) - rotation_angle_deg(t1);
        assert!((delta - SPIN_DEG_PER_MS * (t2 - t1)).abs() < 1e-6);

        assert_eq!(rotation_angle_deg(0.0), 0.0);
        assert!((rotation_angle_deg(2_000.0) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_model_at_startup_is_translate_times_scale() {
        // at zero elapsed time the rotation is identity
        let t = Transforms::compute(0.0, (800, 600));
        let expected = Mat4::translation(0.5, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        assert_eq!(t.model, expected);

        assert_eq!(t.model.data[0], 2.0);
        assert_eq!(t.model.data[5], 2.0);
        assert_eq!(t.model.data[10], 2.0);
        assert_eq!(t.model.data[12], 0.5);
    }

    #[test]
    fn test_view_pulls_world_back_five_units() {
        let t = Transforms::compute(123.0, (800, 600));
        assert_eq!(t.view, Mat4::translation(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_projection_matches_spec_constants() {
        let t = Transforms::compute(0.0, (800, 600));
        assert_eq!(
            t.projection,
            Mat4::perspective(45.0, 800.0 / 600.0, 0.1, 100.0)
        );
    }

    #[test]
    fn test_aspect_ratio_divides_as_floating_point() {
        // equal ratios at different scales produce identical projections
        let a = Transforms::compute(0.0, (800, 600)).projection;
        let b = Transforms::compute(0.0, (400, 300)).projection;
        assert_eq!(a, b);

        // a genuinely different ratio does not
        let c = Transforms::compute(0.0, (1600, 600)).projection;
        assert_ne!(a.data[0], c.data[0]);
    }

    #[test]
    fn test_transforms_are_pure_in_elapsed_time() {
        let a = Transforms::compute(5_000.0, (800, 600));
        let b = Transforms::compute(5_000.0, (800, 600));
        assert_eq!(a, b);
    }

    #[test]
    fn test_model_rotation_follows_elapsed_time() {
        // one full revolution: -0.0005 deg/ms * 720_000 ms = -360 deg
        let full_turn = Transforms::compute(720_000.0, (800, 600)).model;
        let start = Transforms::compute(0.0, (800, 600)).model;
        for i in 0..16 {
            assert!(
                (full_turn.data[i] - start.data[i]).abs() < 1e-3,
                "element {i} diverged after a full revolution"
            );
        }
    }
}
