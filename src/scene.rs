//! Den renderer: chair, desk, monitor and the seated figure.
//!
//! Draw order is fixed back-to-front. The desk and monitor glow in the mode
//! colour; the glow is reset before the skeleton so the figure stays crisp.

use crate::den_constants::*;
use crate::mode::Mode;
use crate::pose::Pose;
use crate::surface::Surface;
use glam::Vec2;

/// Render one frame of the den
pub fn render<S: Surface + ?Sized>(surface: &mut S, anchor: Vec2, frame: u32, mode: Mode, scale: f32) {
    let pose = Pose::compute(anchor, frame, mode, scale);
    let at = |p: Vec2| anchor + p * scale;

    draw_chair(surface, anchor, scale);

    // Desk and monitor carry the mode glow
    let color = mode.color();
    surface.set_glow(color, GLOW_RADIUS);
    surface.set_stroke_color(color);
    surface.set_line_width(BODY_LINE_WIDTH * scale);
    surface.stroke_line(at(DESK_LEFT), at(DESK_RIGHT));
    if mode == Mode::Dabbing {
        surface.set_glow(color, GLOW_RADIUS_EMPHASIS);
    }
    surface.stroke_rect(at(MONITOR_ORIGIN), MONITOR_SIZE * scale);

    surface.set_glow(color, 0.0);
    draw_figure(surface, &pose, scale);
}

fn draw_chair<S: Surface + ?Sized>(surface: &mut S, anchor: Vec2, scale: f32) {
    surface.set_glow(CHAIR_COLOR, 0.0);
    surface.set_stroke_color(CHAIR_COLOR);
    surface.set_line_width(CHAIR_LINE_WIDTH * scale);
    for (from, to) in CHAIR_SEGMENTS {
        surface.stroke_line(anchor + from * scale, anchor + to * scale);
    }
}

fn draw_figure<S: Surface + ?Sized>(surface: &mut S, pose: &Pose, scale: f32) {
    let at = |p: Vec2| pose.anchor + p * scale;

    surface.set_stroke_color(BODY_COLOR);
    surface.set_line_width(BODY_LINE_WIDTH * scale);

    // Spine
    surface.stroke_line(pose.anchor, pose.neck);

    // Legs: thigh then shin
    surface.stroke_line(pose.anchor, at(LEFT_KNEE));
    surface.stroke_line(at(LEFT_KNEE), at(LEFT_FOOT));
    surface.stroke_line(pose.anchor, at(RIGHT_KNEE));
    surface.stroke_line(at(RIGHT_KNEE), at(RIGHT_FOOT));

    // Arms: shoulder -> elbow -> hand
    let arms = &pose.arms;
    surface.stroke_line(pose.shoulder, arms.left_elbow);
    surface.stroke_line(arms.left_elbow, arms.left_hand);
    surface.stroke_line(pose.shoulder, arms.right_elbow);
    surface.stroke_line(arms.right_elbow, arms.right_hand);

    surface.fill_circle(pose.head, pose.head_radius, HEAD_FILL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};
    use wasm_bindgen_test::*;

    fn record(frame: u32, mode: Mode, scale: f32) -> Recorder {
        let mut recorder = Recorder::new();
        render(&mut recorder, Vec2::new(320.0, 400.0), frame, mode, scale);
        recorder
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_render_is_deterministic() {
        for frame in [0, 5, 1234] {
            assert_eq!(
                record(frame, Mode::Coding, 1.0).commands,
                record(frame, Mode::Coding, 1.0).commands
            );
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_draw_order() {
        let recorder = record(3, Mode::Gaming, 1.0);
        let shapes: Vec<_> = recorder.shapes().collect();

        // 5 chair + desk + monitor + spine + 4 leg + 4 arm + head
        assert_eq!(shapes.len(), 17);
        assert!(matches!(shapes[5], DrawCommand::Line { .. }));
        assert!(matches!(shapes[6], DrawCommand::Rect { .. }));
        assert!(matches!(shapes[16], DrawCommand::Circle { .. }));
        for shape in &shapes[7..16] {
            assert!(matches!(shape, DrawCommand::Line { .. }));
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_glow_reset_before_skeleton() {
        let recorder = record(0, Mode::Writing, 1.0);
        let rect_at = recorder
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Rect { .. }))
            .unwrap();
        let glow_after = recorder.commands[rect_at..]
            .iter()
            .find_map(|c| match c {
                DrawCommand::Glow { radius, .. } => Some(*radius),
                _ => None,
            });
        assert_eq!(glow_after, Some(0.0));
        assert!(recorder.commands[rect_at..]
            .contains(&DrawCommand::StrokeColor(BODY_COLOR.to_string())));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_monitor_glow_emphasised_when_dabbing() {
        let glows = |mode: Mode| -> Vec<f32> {
            record(0, mode, 1.0)
                .commands
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Glow { color, radius } if color == mode.color() => Some(*radius),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(glows(Mode::Dabbing), vec![GLOW_RADIUS, GLOW_RADIUS_EMPHASIS, 0.0]);
        assert_eq!(glows(Mode::Coding), vec![GLOW_RADIUS, 0.0]);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_desk_uses_body_line_width() {
        let scale = 0.75;
        let recorder = record(0, Mode::Coding, scale);
        let desk_at = recorder
            .commands
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, DrawCommand::Line { .. }))
            .nth(CHAIR_SEGMENTS.len())
            .map(|(i, _)| i)
            .unwrap();
        let width = recorder.commands[..desk_at]
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCommand::LineWidth(w) => Some(*w),
                _ => None,
            });
        assert_eq!(width, Some(BODY_LINE_WIDTH * scale));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_legs_are_mode_independent() {
        let legs = |mode: Mode| -> Vec<DrawCommand> {
            record(7, mode, 0.8).shapes().skip(8).take(4).cloned().collect()
        };
        let coding = legs(Mode::Coding);
        for mode in Mode::ALL {
            assert_eq!(legs(mode), coding);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_head_radius_scales() {
        let recorder = record(0, Mode::Coding, 0.6);
        let head = recorder.shapes().last().cloned();
        match head {
            Some(DrawCommand::Circle { radius, fill, .. }) => {
                assert!((radius - 6.0).abs() < 1e-5);
                assert_eq!(fill, HEAD_FILL);
            }
            other => panic!("expected head circle, got {:?}", other),
        }
    }
}
