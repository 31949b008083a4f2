//! Replays a composed frame onto the 2d context.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::assets::Assets;
use crate::render::DrawCmd;

pub fn paint(ctx: &CanvasRenderingContext2d, assets: &Assets, cmds: &[DrawCmd]) {
    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawCmd::Image { id, x, y, width, height } => {
                // Readiness was checked when composing; re-check in case the
                // element was swapped out since.
                if let Some(img) = assets.get(*id) {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, *x, *y, *width, *height).ok();
                }
            }
            DrawCmd::Text { text, x, y, font, fill, stroke, line_width } => {
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.set_fill_style(&JsValue::from_str(fill));
                ctx.set_stroke_style(&JsValue::from_str(stroke));
                ctx.set_line_width(*line_width);
                ctx.stroke_text(text, *x, *y).ok();
                ctx.fill_text(text, *x, *y).ok();
            }
        }
    }
}
