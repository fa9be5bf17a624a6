use super::region::RegionShape;
use crate::geometry::CanvasPoint;

pub const DEFAULT_HANDLE_SIZE: f32 = 8.0;
pub const DEFAULT_HANDLE_TOLERANCE: f32 = 4.0;
pub const MIN_RECT_SIZE: f32 = 20.0;
pub const MIN_CIRCLE_RADIUS: f32 = 10.0;

/// Resize handles, enumerated in hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    NwResize,
    NeResize,
    NsResize,
    EwResize,
}

impl CursorHint {
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::NwResize => "nw-resize",
            Self::NeResize => "ne-resize",
            Self::NsResize => "n-resize",
            Self::EwResize => "e-resize",
        }
    }
}

pub const fn cursor_for_handle(handle: Handle) -> CursorHint {
    match handle {
        Handle::TopLeft | Handle::BottomRight => CursorHint::NwResize,
        Handle::TopRight | Handle::BottomLeft => CursorHint::NeResize,
        Handle::Top | Handle::Bottom => CursorHint::NsResize,
        Handle::Right | Handle::Left => CursorHint::EwResize,
    }
}

/// Screen-space square drawn for one handle, for the overlay description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleBox {
    pub handle: Handle,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Handle anchor points for a shape. Rectangles expose corners plus edge
/// midpoints, circles the four axis points; freehand paths are not
/// resizable and expose none.
pub fn handle_anchor_points(shape: &RegionShape) -> Vec<(Handle, CanvasPoint)> {
    match shape {
        RegionShape::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            let right = x + width;
            let bottom = y + height;
            let mid_x = x + width / 2.0;
            let mid_y = y + height / 2.0;
            vec![
                (Handle::TopLeft, CanvasPoint::new(*x, *y)),
                (Handle::Top, CanvasPoint::new(mid_x, *y)),
                (Handle::TopRight, CanvasPoint::new(right, *y)),
                (Handle::Right, CanvasPoint::new(right, mid_y)),
                (Handle::BottomRight, CanvasPoint::new(right, bottom)),
                (Handle::Bottom, CanvasPoint::new(mid_x, bottom)),
                (Handle::BottomLeft, CanvasPoint::new(*x, bottom)),
                (Handle::Left, CanvasPoint::new(*x, mid_y)),
            ]
        }
        RegionShape::Circle { x, y, radius } => vec![
            (Handle::Top, CanvasPoint::new(*x, y - radius)),
            (Handle::Right, CanvasPoint::new(x + radius, *y)),
            (Handle::Bottom, CanvasPoint::new(*x, y + radius)),
            (Handle::Left, CanvasPoint::new(x - radius, *y)),
        ],
        RegionShape::Freehand { .. } => Vec::new(),
    }
}

pub fn handle_at_point(
    shape: &RegionShape,
    point: CanvasPoint,
    handle_size: f32,
    tolerance: f32,
) -> Option<Handle> {
    let reach = handle_size / 2.0 + tolerance;
    handle_anchor_points(shape)
        .into_iter()
        .find_map(|(handle, anchor)| {
            if (point.x - anchor.x).abs() <= reach && (point.y - anchor.y).abs() <= reach {
                Some(handle)
            } else {
                None
            }
        })
}

pub fn handle_boxes(shape: &RegionShape, handle_size: f32) -> Vec<HandleBox> {
    handle_anchor_points(shape)
        .into_iter()
        .map(|(handle, anchor)| HandleBox {
            handle,
            x: anchor.x - handle_size / 2.0,
            y: anchor.y - handle_size / 2.0,
            size: handle_size,
        })
        .collect()
}

/// Recomputes rectangle bounds so the dragged handle follows the pointer
/// while the opposite edge stays fixed. Each moving edge is clamped against
/// its fixed counterpart so the result never drops below the minimum size
/// and never inverts.
pub fn resize_rectangle(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    handle: Handle,
    pointer: CanvasPoint,
) -> (f32, f32, f32, f32) {
    let right = x + width;
    let bottom = y + height;
    let (mut next_x, mut next_width) = (x, width);
    let (mut next_y, mut next_height) = (y, height);

    match handle {
        Handle::TopLeft | Handle::Left | Handle::BottomLeft => {
            next_x = pointer.x.min(right - MIN_RECT_SIZE);
            next_width = right - next_x;
        }
        Handle::TopRight | Handle::Right | Handle::BottomRight => {
            next_width = (pointer.x - x).max(MIN_RECT_SIZE);
        }
        Handle::Top | Handle::Bottom => {}
    }

    match handle {
        Handle::TopLeft | Handle::Top | Handle::TopRight => {
            next_y = pointer.y.min(bottom - MIN_RECT_SIZE);
            next_height = bottom - next_y;
        }
        Handle::BottomLeft | Handle::Bottom | Handle::BottomRight => {
            next_height = (pointer.y - y).max(MIN_RECT_SIZE);
        }
        Handle::Left | Handle::Right => {}
    }

    (next_x, next_y, next_width, next_height)
}

/// New circle radius following the pointer from a fixed center. Results
/// below the minimum are rejected rather than clamped.
pub fn resize_circle(center: CanvasPoint, pointer: CanvasPoint) -> Option<f32> {
    let radius = center.distance_to(pointer);
    if radius < MIN_CIRCLE_RADIUS {
        return None;
    }
    Some(radius)
}
