//! Shared scene constants for the den renderer.
//!
//! All geometry is expressed in unscaled units relative to the anchor point
//! (the seat of the chair, where the spine meets the desk). The renderer
//! multiplies every offset by the viewport scale before drawing.

use glam::Vec2;

/// Phase advance per frame for the base motion speed
pub const SPEED_PER_FRAME: f32 = 0.15;

/// Frame counter wrap bound.
///
/// Writing runs at half speed, so every motion frequency is an integer
/// multiple of `SPEED_PER_FRAME / 2`. `MAX_FRAME * SPEED_PER_FRAME / 2` lies
/// within 1e-4 rad of a multiple of TAU, so wrapping back to zero looks like
/// an ordinary step to every mode.
pub const MAX_FRAME: u32 = 23_541;

// --- Figure rest pose ---
pub const REST_HEAD: Vec2 = Vec2::new(0.0, -70.0);
pub const REST_LEFT_HAND: Vec2 = Vec2::new(-20.0, -10.0);
pub const REST_RIGHT_HAND: Vec2 = Vec2::new(20.0, -10.0);
pub const REST_LEFT_ELBOW: Vec2 = Vec2::new(-25.0, -35.0);
pub const REST_RIGHT_ELBOW: Vec2 = Vec2::new(25.0, -35.0);

/// Spine top sits this far below the head centre
pub const NECK_DROP: f32 = 30.0;
/// Shoulder sits this far below the head centre
pub const SHOULDER_DROP: f32 = 35.0;
/// Fraction of the torso lean carried by the shoulder
pub const SHOULDER_LEAN_FACTOR: f32 = 0.8;

pub const HEAD_RADIUS: f32 = 10.0;

// --- Legs (mode independent) ---
pub const LEFT_KNEE: Vec2 = Vec2::new(-20.0, 40.0);
pub const LEFT_FOOT: Vec2 = Vec2::new(-25.0, 80.0);
pub const RIGHT_KNEE: Vec2 = Vec2::new(20.0, 40.0);
pub const RIGHT_FOOT: Vec2 = Vec2::new(25.0, 80.0);

// --- Furniture ---
/// Chair segments drawn back-to-front: seat, backrest, post, two feet
pub const CHAIR_SEGMENTS: [(Vec2, Vec2); 5] = [
    (Vec2::new(-25.0, 5.0), Vec2::new(25.0, 5.0)),
    (Vec2::new(-20.0, 5.0), Vec2::new(-25.0, -50.0)),
    (Vec2::new(0.0, 5.0), Vec2::new(0.0, 40.0)),
    (Vec2::new(0.0, 40.0), Vec2::new(-20.0, 50.0)),
    (Vec2::new(0.0, 40.0), Vec2::new(20.0, 50.0)),
];

pub const DESK_LEFT: Vec2 = Vec2::new(-150.0, 0.0);
pub const DESK_RIGHT: Vec2 = Vec2::new(150.0, 0.0);

pub const MONITOR_ORIGIN: Vec2 = Vec2::new(-50.0, -100.0);
pub const MONITOR_SIZE: Vec2 = Vec2::new(100.0, 60.0);

// --- Styling ---
pub const CHAIR_COLOR: &str = "#333";
pub const BODY_COLOR: &str = "#e0e0e0";
pub const HEAD_FILL: &str = "#111";

pub const CHAIR_LINE_WIDTH: f32 = 2.0;
pub const BODY_LINE_WIDTH: f32 = 2.5;

/// Glow radius around the desk and monitor (not scaled)
pub const GLOW_RADIUS: f32 = 10.0;
/// Monitor glow while celebrating
pub const GLOW_RADIUS_EMPHASIS: f32 = 20.0;
