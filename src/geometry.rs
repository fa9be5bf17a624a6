//! Shared geometric primitives used across the editor and render modules.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: CanvasPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub width: u32,
    pub height: u32,
}

impl CanvasBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Integer pixel rectangle, already clamped to a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

pub fn point_in_rect(point: CanvasPoint, x: f32, y: f32, width: f32, height: f32) -> bool {
    point.x >= x && point.x <= x + width && point.y >= y && point.y <= y + height
}

pub fn point_in_circle(point: CanvasPoint, center: CanvasPoint, radius: f32) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

/// Even-odd containment test against an implicitly closed polygon.
pub fn point_in_polygon(point: CanvasPoint, vertices: &[CanvasPoint]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut previous = vertices.len() - 1;
    for current in 0..vertices.len() {
        let a = vertices[current];
        let b = vertices[previous];
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Snaps a float box to the pixel grid (outward) and clips it to the canvas.
/// Returns `None` when nothing of the box survives the clip.
pub fn clamp_box_to_canvas(
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    canvas: CanvasBounds,
) -> Option<PixelRect> {
    let max_x = canvas.width as f32;
    let max_y = canvas.height as f32;
    let clipped_left = left.floor().clamp(0.0, max_x) as u32;
    let clipped_top = top.floor().clamp(0.0, max_y) as u32;
    let clipped_right = right.ceil().clamp(0.0, max_x) as u32;
    let clipped_bottom = bottom.ceil().clamp(0.0, max_y) as u32;
    if clipped_right <= clipped_left || clipped_bottom <= clipped_top {
        return None;
    }
    Some(PixelRect::new(
        clipped_left,
        clipped_top,
        clipped_right - clipped_left,
        clipped_bottom - clipped_top,
    ))
}
