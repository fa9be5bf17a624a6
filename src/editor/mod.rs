//! Blur-region editing session and the command surface a UI shell drives.

pub mod handles;
pub mod history;
mod operations;
mod pointer;
pub mod region;

pub use handles::{cursor_for_handle, CursorHint, Handle, HandleBox};
pub use pointer::{Overlay, OverlaySelection, OverlayShape, PointerGesture};
pub use region::{BlurRegion, RegionPatch, RegionShape, RegionSpec};

use image::RgbaImage;

use crate::config::EditorConfig;
use crate::geometry::CanvasPoint;
use history::History;

pub const MIN_BRUSH_SIZE: u8 = 1;
pub const MAX_BRUSH_SIZE: u8 = 100;
pub const DEFAULT_BRUSH_SIZE: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Select,
    Rectangle,
    Circle,
    Freehand,
}

impl ToolKind {
    pub const fn is_drawing_tool(self) -> bool {
        matches!(self, Self::Rectangle | Self::Circle | Self::Freehand)
    }
}

/// The whole editable state: base image, region collection, history,
/// selection, tool defaults, and the in-progress pointer gesture. All
/// mutation goes through the command methods; history snapshots mirror the
/// live collection after every committed change.
#[derive(Debug, Clone)]
pub struct EditorSession {
    image: Option<RgbaImage>,
    regions: Vec<BlurRegion>,
    history: History,
    active_tool: ToolKind,
    selected_region_id: Option<u64>,
    default_opacity: f32,
    default_blur_radius: u8,
    brush_size: u8,
    handle_size: f32,
    handle_tolerance: f32,
    gesture: PointerGesture,
    next_id: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            image: None,
            regions: Vec::new(),
            history: History::new(),
            active_tool: ToolKind::Select,
            selected_region_id: None,
            default_opacity: region::DEFAULT_OPACITY,
            default_blur_radius: region::DEFAULT_BLUR_RADIUS,
            brush_size: DEFAULT_BRUSH_SIZE,
            handle_size: handles::DEFAULT_HANDLE_SIZE,
            handle_tolerance: handles::DEFAULT_HANDLE_TOLERANCE,
            gesture: PointerGesture::Idle,
            next_id: 1,
        }
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        let mut session = Self::new();
        session.default_opacity = region::clamp_opacity(config.default_opacity);
        session.default_blur_radius = region::clamp_blur_radius(config.default_blur_radius);
        session.brush_size = clamp_brush_size(config.brush_size);
        session.handle_size = config.handle_size.max(1.0);
        session.handle_tolerance = config.handle_tolerance.max(0.0);
        session
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn commit_snapshot(&mut self) {
        self.history.commit(self.regions.clone());
    }

    /// Replaces the base image and starts over: regions, history, selection,
    /// and any in-progress gesture are reset while tool defaults stay.
    pub fn load_image(&mut self, image: RgbaImage) {
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "image loaded"
        );
        self.image = Some(image);
        self.regions.clear();
        self.history.reset();
        self.selected_region_id = None;
        self.gesture = PointerGesture::Idle;
    }

    /// Switches the active tool. Moving to a drawing tool drops the current
    /// selection; any in-progress gesture is aborted either way.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool.is_drawing_tool() {
            self.selected_region_id = None;
        }
        self.gesture = PointerGesture::Idle;
        if self.active_tool != tool {
            tracing::debug!(?tool, "active tool changed");
        }
        self.active_tool = tool;
    }

    pub fn select_region(&mut self, id: Option<u64>) {
        match id {
            Some(id) => {
                if self.regions.iter().any(|region| region.id == id) {
                    self.selected_region_id = Some(id);
                } else {
                    tracing::warn!(region_id = id, "select for unknown region ignored");
                }
            }
            None => self.selected_region_id = None,
        }
    }

    pub fn set_brush_size(&mut self, size: u8) {
        self.brush_size = clamp_brush_size(size);
    }

    /// Topmost region containing the point, later insertions first.
    pub fn find_at(&self, point: CanvasPoint) -> Option<&BlurRegion> {
        self.regions.iter().rev().find(|region| region.contains(point))
    }

    pub fn region(&self, id: u64) -> Option<&BlurRegion> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn regions(&self) -> &[BlurRegion] {
        &self.regions
    }

    pub fn selected_region(&self) -> Option<&BlurRegion> {
        self.region(self.selected_region_id?)
    }

    pub fn selected_region_id(&self) -> Option<u64> {
        self.selected_region_id
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn default_opacity(&self) -> f32 {
        self.default_opacity
    }

    pub fn default_blur_radius(&self) -> u8 {
        self.default_blur_radius
    }

    pub fn brush_size(&self) -> u8 {
        self.brush_size
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Composites the current region list over the loaded image. `None`
    /// until an image has been loaded.
    pub fn render(&self) -> Option<RgbaImage> {
        let base = self.image.as_ref()?;
        Some(crate::render::render(base, &self.regions))
    }
}

const fn clamp_brush_size(size: u8) -> u8 {
    if size < MIN_BRUSH_SIZE {
        MIN_BRUSH_SIZE
    } else if size > MAX_BRUSH_SIZE {
        MAX_BRUSH_SIZE
    } else {
        size
    }
}

#[cfg(test)]
impl EditorSession {
    pub(crate) fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub(crate) fn history_index(&self) -> usize {
        self.history.index()
    }

    pub(crate) fn history_entry_count(&self) -> usize {
        self.history.entry_count()
    }

    pub(crate) fn live_collection_matches_history(&self) -> bool {
        self.regions.as_slice() == self.history.current()
    }

    pub(crate) fn gesture(&self) -> &PointerGesture {
        &self.gesture
    }
}
