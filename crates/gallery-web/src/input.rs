use glam::Vec2;
use web_sys as web;

/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas_px(
        ev.client_x() as f32,
        ev.client_y() as f32,
        [
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ],
        [canvas.width(), canvas.height()],
    )
}

/// Map client (CSS px) coordinates into backing-store pixels.
///
/// A zero-sized rect yields non-finite coordinates, which the router ignores.
#[inline]
pub fn client_to_canvas_px(client_x: f32, client_y: f32, rect: [f32; 4], backing: [u32; 2]) -> Vec2 {
    let [left, top, width, height] = rect;
    let sx = ((client_x - left) / width) * backing[0] as f32;
    let sy = ((client_y - top) / height) * backing[1] as f32;
    Vec2::new(sx, sy)
}
