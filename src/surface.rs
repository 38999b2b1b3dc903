//! 2D drawing surface abstraction.
//!
//! The renderer only issues primitives through [`Surface`]; it never owns a
//! canvas or context itself.

use glam::Vec2;

/// Primitive drawing operations used by the den renderer
pub trait Surface {
    /// Clear the region `(0, 0) .. (width, height)`
    fn clear(&mut self, width: f32, height: f32);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);
    /// Set the glow (shadow) colour and blur radius. A radius of zero disables glow.
    fn set_glow(&mut self, color: &str, radius: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2);
    /// Fill a circle, then outline it with the current stroke style
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &str);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    StrokeColor(String),
    LineWidth(f32),
    Glow { color: String, radius: f32 },
    Line { from: Vec2, to: Vec2 },
    Rect { origin: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32, fill: String },
}

/// Surface that records every call instead of drawing
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the geometry-producing commands (lines, rects, circles)
    pub fn shapes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|cmd| {
            matches!(
                cmd,
                DrawCommand::Line { .. } | DrawCommand::Rect { .. } | DrawCommand::Circle { .. }
            )
        })
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for Recorder {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_glow(&mut self, color: &str, radius: f32) {
        self.commands.push(DrawCommand::Glow {
            color: color.to_string(),
            radius,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Rect { origin, size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill: fill.to_string(),
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use super::Surface;
    use glam::Vec2;
    use web_sys::CanvasRenderingContext2d;

    /// Surface backed by a browser 2D canvas context
    pub struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasSurface {
        pub fn new(ctx: CanvasRenderingContext2d) -> Self {
            ctx.set_line_cap("round");
            Self { ctx }
        }

        /// Reset the transform so drawing happens in CSS pixels
        pub fn set_pixel_ratio(&self, pixel_ratio: f64) {
            // Only fails on non-finite input
            let _ = self
                .ctx
                .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
            self.ctx.set_line_cap("round");
        }
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn set_stroke_color(&mut self, color: &str) {
            self.ctx.set_stroke_style_str(color);
        }

        fn set_line_width(&mut self, width: f32) {
            self.ctx.set_line_width(width as f64);
        }

        fn set_glow(&mut self, color: &str, radius: f32) {
            self.ctx.set_shadow_color(color);
            self.ctx.set_shadow_blur(radius as f64);
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2) {
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }

        fn stroke_rect(&mut self, origin: Vec2, size: Vec2) {
            self.ctx
                .stroke_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &str) {
            self.ctx.begin_path();
            // arc only fails for a negative radius
            if self
                .ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    radius.max(0.0) as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .is_err()
            {
                return;
            }
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
            self.ctx.stroke();
        }
    }
}
