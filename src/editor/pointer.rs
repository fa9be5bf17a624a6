//! Pointer-driven interaction: press/move/release gestures for drawing,
//! dragging, and resizing, plus the overlay a shell draws above the canvas.

use std::mem;

use crate::geometry::CanvasPoint;

use super::handles::{self, CursorHint, Handle, HandleBox};
use super::region::{RegionPatch, RegionShape, RegionSpec};
use super::{EditorSession, ToolKind};

/// In-progress pointer interaction. Lives on the session between a press and
/// the matching release. Drawing variants are pure previews; drag and resize
/// write through the regular committed updates on every step.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerGesture {
    Idle,
    DrawingRectangle {
        anchor: CanvasPoint,
        cursor: CanvasPoint,
    },
    DrawingCircle {
        anchor: CanvasPoint,
        cursor: CanvasPoint,
    },
    DrawingFreehand {
        points: Vec<CanvasPoint>,
    },
    Dragging {
        region_id: u64,
        offset_x: f32,
        offset_y: f32,
    },
    Resizing {
        region_id: u64,
        handle: Handle,
    },
}

impl PointerGesture {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Everything a shell should draw above the composited image this frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overlay {
    pub selection: Option<OverlaySelection>,
    pub preview: Option<OverlayShape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySelection {
    pub region_id: u64,
    pub outline: OverlayShape,
    pub handles: Vec<HandleBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
    },
    Path {
        points: Vec<CanvasPoint>,
        closed: bool,
    },
}

/// Mutation extracted from the gesture so the borrow on `self.gesture` ends
/// before the session methods run.
enum GestureCommand {
    Drag { region_id: u64, x: f32, y: f32 },
    Resize { region_id: u64, handle: Handle },
}

impl EditorSession {
    pub fn on_pointer_down(&mut self, point: CanvasPoint) {
        match self.active_tool {
            ToolKind::Select => self.begin_select_gesture(point),
            ToolKind::Rectangle => {
                self.gesture = PointerGesture::DrawingRectangle {
                    anchor: point,
                    cursor: point,
                };
            }
            ToolKind::Circle => {
                self.gesture = PointerGesture::DrawingCircle {
                    anchor: point,
                    cursor: point,
                };
            }
            ToolKind::Freehand => {
                self.gesture = PointerGesture::DrawingFreehand {
                    points: vec![point],
                };
            }
        }
    }

    fn begin_select_gesture(&mut self, point: CanvasPoint) {
        // Handles of the selected region win over any region body below them.
        if let Some(region) = self.selected_region() {
            if let Some(handle) = handles::handle_at_point(
                &region.shape,
                point,
                self.handle_size,
                self.handle_tolerance,
            ) {
                let region_id = region.id;
                self.gesture = PointerGesture::Resizing { region_id, handle };
                return;
            }
        }

        let hit = self
            .find_at(point)
            .map(|region| (region.id, drag_origin(&region.shape)));
        match hit {
            Some((region_id, (origin_x, origin_y))) => {
                self.selected_region_id = Some(region_id);
                self.gesture = PointerGesture::Dragging {
                    region_id,
                    offset_x: point.x - origin_x,
                    offset_y: point.y - origin_y,
                };
            }
            None => {
                self.selected_region_id = None;
                self.gesture = PointerGesture::Idle;
            }
        }
    }

    /// Advances the gesture. Drawing previews track the cursor without
    /// touching the collection; drag and resize commit on every step so undo
    /// can rewind through the movement.
    pub fn on_pointer_move(&mut self, point: CanvasPoint) {
        let command = match &mut self.gesture {
            PointerGesture::Idle => return,
            PointerGesture::DrawingRectangle { cursor, .. }
            | PointerGesture::DrawingCircle { cursor, .. } => {
                *cursor = point;
                return;
            }
            PointerGesture::DrawingFreehand { points } => {
                points.push(point);
                return;
            }
            PointerGesture::Dragging {
                region_id,
                offset_x,
                offset_y,
            } => GestureCommand::Drag {
                region_id: *region_id,
                x: point.x - *offset_x,
                y: point.y - *offset_y,
            },
            PointerGesture::Resizing { region_id, handle } => GestureCommand::Resize {
                region_id: *region_id,
                handle: *handle,
            },
        };

        match command {
            GestureCommand::Drag { region_id, x, y } => {
                if !self.update_region(region_id, &RegionPatch::position(x, y)) {
                    self.gesture = PointerGesture::Idle;
                }
            }
            GestureCommand::Resize { region_id, handle } => {
                self.apply_resize(region_id, handle, point);
            }
        }
    }

    /// Ends the gesture. Drawing gestures turn into a committed region here;
    /// drag and resize have already committed every step and just stop.
    pub fn on_pointer_up(&mut self, point: CanvasPoint) {
        let gesture = mem::replace(&mut self.gesture, PointerGesture::Idle);
        match gesture {
            PointerGesture::Idle
            | PointerGesture::Dragging { .. }
            | PointerGesture::Resizing { .. } => {}
            PointerGesture::DrawingRectangle { anchor, .. } => {
                let shape = RegionShape::Rectangle {
                    x: anchor.x.min(point.x),
                    y: anchor.y.min(point.y),
                    width: (point.x - anchor.x).abs(),
                    height: (point.y - anchor.y).abs(),
                };
                self.commit_drawn_shape(shape);
            }
            PointerGesture::DrawingCircle { anchor, .. } => {
                let shape = RegionShape::Circle {
                    x: anchor.x,
                    y: anchor.y,
                    radius: anchor.distance_to(point),
                };
                self.commit_drawn_shape(shape);
            }
            PointerGesture::DrawingFreehand { mut points } => {
                points.push(point);
                if points.len() > 2 {
                    self.commit_drawn_shape(RegionShape::Freehand { points });
                } else {
                    tracing::debug!(count = points.len(), "freehand path too short, discarded");
                }
            }
        }
    }

    /// Aborts any in-progress gesture without committing.
    pub fn on_pointer_leave(&mut self) {
        if !self.gesture.is_idle() {
            tracing::debug!("pointer left the canvas, gesture aborted");
            self.gesture = PointerGesture::Idle;
        }
    }

    /// Resize cursor to show at this point, or `None` for the default.
    pub fn cursor_hint_at(&self, point: CanvasPoint) -> Option<CursorHint> {
        if self.active_tool != ToolKind::Select {
            return None;
        }
        let region = self.selected_region()?;
        let handle = handles::handle_at_point(
            &region.shape,
            point,
            self.handle_size,
            self.handle_tolerance,
        )?;
        Some(handles::cursor_for_handle(handle))
    }

    /// Selection outline with its resize handles, plus the preview of any
    /// drawing gesture, all in canvas coordinates.
    pub fn overlay(&self) -> Overlay {
        let selection = self.selected_region().map(|region| OverlaySelection {
            region_id: region.id,
            outline: outline_for_shape(&region.shape),
            handles: handles::handle_boxes(&region.shape, self.handle_size),
        });

        let preview = match &self.gesture {
            PointerGesture::Idle
            | PointerGesture::Dragging { .. }
            | PointerGesture::Resizing { .. } => None,
            PointerGesture::DrawingRectangle { anchor, cursor } => Some(OverlayShape::Rectangle {
                x: anchor.x.min(cursor.x),
                y: anchor.y.min(cursor.y),
                width: (cursor.x - anchor.x).abs(),
                height: (cursor.y - anchor.y).abs(),
            }),
            PointerGesture::DrawingCircle { anchor, cursor } => Some(OverlayShape::Circle {
                x: anchor.x,
                y: anchor.y,
                radius: anchor.distance_to(*cursor),
            }),
            PointerGesture::DrawingFreehand { points } => Some(OverlayShape::Path {
                points: points.clone(),
                closed: false,
            }),
        };

        Overlay { selection, preview }
    }

    fn apply_resize(&mut self, region_id: u64, handle: Handle, pointer: CanvasPoint) {
        let Some(region) = self.region(region_id) else {
            self.gesture = PointerGesture::Idle;
            return;
        };
        let patch = match &region.shape {
            RegionShape::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let (x, y, width, height) =
                    handles::resize_rectangle(*x, *y, *width, *height, handle, pointer);
                RegionPatch {
                    x: Some(x),
                    y: Some(y),
                    width: Some(width),
                    height: Some(height),
                    ..RegionPatch::default()
                }
            }
            RegionShape::Circle { x, y, .. } => {
                let center = CanvasPoint::new(*x, *y);
                match handles::resize_circle(center, pointer) {
                    Some(radius) => RegionPatch {
                        radius: Some(radius),
                        ..RegionPatch::default()
                    },
                    // Below the minimum: hold the current radius, commit nothing.
                    None => return,
                }
            }
            RegionShape::Freehand { .. } => return,
        };
        self.update_region(region_id, &patch);
    }

    fn commit_drawn_shape(&mut self, shape: RegionShape) {
        let spec = RegionSpec::new(shape, self.default_opacity, self.default_blur_radius);
        if let Err(error) = self.add_region(spec) {
            tracing::warn!(%error, "drawn region rejected");
        }
    }
}

/// Reference point a drag offset is measured from.
fn drag_origin(shape: &RegionShape) -> (f32, f32) {
    match shape {
        RegionShape::Rectangle { x, y, .. } | RegionShape::Circle { x, y, .. } => (*x, *y),
        // Paths never match find_at, so a drag cannot start on one.
        RegionShape::Freehand { .. } => (0.0, 0.0),
    }
}

fn outline_for_shape(shape: &RegionShape) -> OverlayShape {
    match shape {
        RegionShape::Rectangle {
            x,
            y,
            width,
            height,
        } => OverlayShape::Rectangle {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        },
        RegionShape::Circle { x, y, radius } => OverlayShape::Circle {
            x: *x,
            y: *y,
            radius: *radius,
        },
        RegionShape::Freehand { points } => OverlayShape::Path {
            points: points.clone(),
            closed: true,
        },
    }
}
