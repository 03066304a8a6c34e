use glam::Vec2;
use web_sys as web;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlayback,
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::TogglePlayback),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" | "Esc" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}

/// Map a CSS-pixel position inside `rect` to backing-store pixels.
#[inline]
pub fn css_to_backing_px(
    x_css: f32,
    y_css: f32,
    rect_w: f32,
    rect_h: f32,
    backing_w: f32,
    backing_h: f32,
) -> Vec2 {
    if rect_w <= 0.0 || rect_h <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (x_css / rect_w) * backing_w,
        (y_css / rect_h) * backing_h,
    )
}

// ---------------- Event helpers ----------------
#[inline]
pub fn mouse_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    css_to_backing_px(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
        canvas.width() as f32,
        canvas.height() as f32,
    )
}

/// Pointer position in window client space plus the window size it is
/// relative to.
#[inline]
pub fn pointer_client(ev: &web::PointerEvent) -> Option<(f32, f32, f32, f32)> {
    let window = web::window()?;
    let w = window.inner_width().ok()?.as_f64()? as f32;
    let h = window.inner_height().ok()?.as_f64()? as f32;
    Some((ev.client_x() as f32, ev.client_y() as f32, w, h))
}
