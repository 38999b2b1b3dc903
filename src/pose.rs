//! Per-frame skeleton pose.
//!
//! A pose is a pure function of mode, frame counter, anchor and scale. It is
//! computed fresh every frame and never stored between frames.

use crate::den_constants::*;
use crate::mode::{Arms, Mode};
use glam::Vec2;

/// Joint positions of the seated figure in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub anchor: Vec2,
    pub head: Vec2,
    /// Scaled horizontal offset of the neck relative to the anchor
    pub lean: f32,
    /// Top of the spine
    pub neck: Vec2,
    pub shoulder: Vec2,
    pub arms: Arms,
    pub head_radius: f32,
}

/// Motion phase for a frame
#[inline]
pub fn phase(frame: u32) -> f32 {
    frame as f32 * SPEED_PER_FRAME
}

impl Pose {
    /// Compute the pose for a frame
    pub fn compute(anchor: Vec2, frame: u32, mode: Mode, scale: f32) -> Self {
        let def = mode.def();

        // Work in unscaled anchor-relative units, then map to screen
        let head = REST_HEAD + def.head_offset;
        let rest = Arms {
            left_elbow: REST_LEFT_ELBOW,
            left_hand: REST_LEFT_HAND,
            right_elbow: REST_RIGHT_ELBOW,
            right_hand: REST_RIGHT_HAND,
        };
        let arms = def.motion.apply(rest, phase(frame));

        // Spine and shoulder share the head's vertical offset but not its horizontal one
        let neck = Vec2::new(def.lean, head.y + NECK_DROP);
        let shoulder = Vec2::new(def.lean * SHOULDER_LEAN_FACTOR, head.y + SHOULDER_DROP);

        let to_screen = |p: Vec2| anchor + p * scale;

        Self {
            anchor,
            head: to_screen(head),
            lean: def.lean * scale,
            neck: to_screen(neck),
            shoulder: to_screen(shoulder),
            arms: Arms {
                left_elbow: to_screen(arms.left_elbow),
                left_hand: to_screen(arms.left_hand),
                right_elbow: to_screen(arms.right_elbow),
                right_hand: to_screen(arms.right_hand),
            },
            head_radius: HEAD_RADIUS * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    const EPSILON: f32 = 1e-4;
    /// Smallest phase step used by any mode
    const BASE_PHASE_STEP: f32 = SPEED_PER_FRAME * 0.5;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_coding_pose_is_deterministic() {
        let anchor = Vec2::new(400.0, 510.0);
        for frame in [0, 1, 17, 999, MAX_FRAME - 1] {
            let a = Pose::compute(anchor, frame, Mode::Coding, 0.9);
            let b = Pose::compute(anchor, frame, Mode::Coding, 0.9);
            assert_eq!(a, b);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_shoulder_follows_lean() {
        let anchor = Vec2::new(100.0, 200.0);
        let pose = Pose::compute(anchor, 0, Mode::Gaming, 1.0);

        assert!((pose.lean - 25.0).abs() < EPSILON);
        assert!(close(pose.shoulder, Vec2::new(120.0, 200.0 - 65.0 + 35.0)));
        assert!(close(pose.neck, Vec2::new(125.0, 200.0 - 65.0 + 30.0)));
        // Gaming drops the head but keeps it centred
        assert!(close(pose.head, Vec2::new(100.0, 135.0)));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_dabbing_geometry_scales() {
        let anchor = Vec2::new(0.0, 0.0);
        let pose = Pose::compute(anchor, 42, Mode::Dabbing, 0.5);

        assert!(close(pose.head, Vec2::new(7.5, -27.5)));
        assert!(close(pose.arms.right_hand, Vec2::new(45.0, -40.0)));
        assert!(close(pose.arms.left_elbow, Vec2::new(5.0, -30.0)));
        assert!((pose.head_radius - 5.0).abs() < EPSILON);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_writing_leans_back() {
        let pose = Pose::compute(Vec2::ZERO, 0, Mode::Writing, 1.0);
        assert!(pose.lean < 0.0);
        assert!(close(pose.arms.right_hand, REST_RIGHT_HAND));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_wrap_bound_is_near_full_period() {
        let tau = std::f64::consts::TAU;
        let turns = MAX_FRAME as f64 * BASE_PHASE_STEP as f64 / tau;
        let error = (turns - turns.round()).abs() * tau;
        assert!(error < 1e-3, "wrap phase error {} rad", error);
    }

    /// Largest hand displacement between two consecutive frames
    fn hand_step(mode: Mode, from: u32, to: u32) -> f32 {
        let a = Pose::compute(Vec2::ZERO, from, mode, 1.0).arms;
        let b = Pose::compute(Vec2::ZERO, to, mode, 1.0).arms;
        (a.left_hand - b.left_hand)
            .length()
            .max((a.right_hand - b.right_hand).length())
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_frame_wrap_is_continuous() {
        for mode in Mode::ALL {
            let max_step = (0..MAX_FRAME - 1)
                .map(|n| hand_step(mode, n, n + 1))
                .fold(0.0_f32, f32::max);
            let wrap_step = hand_step(mode, MAX_FRAME - 1, 0);
            assert!(
                wrap_step <= max_step + 1e-2,
                "{} wrap step {} exceeds max step {}",
                mode,
                wrap_step,
                max_step
            );
        }
    }
}
