//! Canvas 2D backend

use std::f64::consts::PI;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{self, Shape};
use crate::consts::*;
use crate::sim::GameSession;

/// Draws display lists onto a canvas, scaled from world units to pixels
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            size: (canvas.width(), canvas.height()),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    pub fn render(&self, session: &GameSession) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let sx = self.size.0 as f64 / WORLD_WIDTH as f64;
        let sy = self.size.1 as f64 / WORLD_HEIGHT as f64;

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.clear_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);
        ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0)?;

        for shape in shapes::frame(session) {
            self.draw(&shape)?;
        }
        Ok(())
    }

    fn draw(&self, shape: &Shape) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        match shape {
            Shape::Sky { stops } => {
                let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, WORLD_HEIGHT as f64);
                let last = (stops.len() - 1) as f32;
                for (i, color) in stops.iter().enumerate() {
                    gradient.add_color_stop(i as f32 / last, color)?;
                }
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);
            }
            Shape::Rect {
                pos,
                size,
                color,
                alpha,
                glow,
                angle,
            } => {
                ctx.set_global_alpha(*alpha as f64);
                if *glow > 0.0 {
                    ctx.set_shadow_color(color);
                    ctx.set_shadow_blur(*glow as f64);
                }
                ctx.set_fill_style_str(color);
                if *angle != 0.0 {
                    let center = *pos + *size / 2.0;
                    ctx.translate(center.x as f64, center.y as f64)?;
                    ctx.rotate(*angle as f64)?;
                    ctx.fill_rect(
                        -size.x as f64 / 2.0,
                        -size.y as f64 / 2.0,
                        size.x as f64,
                        size.y as f64,
                    );
                } else {
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
            }
            Shape::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, PI * 2.0)?;
                ctx.fill();
            }
            Shape::Ring {
                center,
                radius,
                width,
                color,
                alpha,
            } => {
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, PI * 2.0)?;
                ctx.stroke();
            }
            Shape::Dome {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, PI, PI * 2.0)?;
                ctx.fill();
            }
            Shape::Triangle { points, color } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                for p in &points[1..] {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Shape::Text {
                pos,
                text,
                size,
                angle,
            } => {
                ctx.set_fill_style_str("#FFFFFF");
                ctx.set_font(&format!("{}px Arial", size));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.translate(pos.x as f64, pos.y as f64)?;
                if *angle != 0.0 {
                    ctx.rotate(*angle as f64)?;
                }
                ctx.fill_text(text, 0.0, 0.0)?;
            }
        }
        ctx.restore();
        Ok(())
    }
}
