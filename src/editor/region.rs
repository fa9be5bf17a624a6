use crate::geometry::{point_in_circle, point_in_rect, CanvasPoint};

pub const MIN_OPACITY: f32 = 0.1;
pub const MAX_OPACITY: f32 = 1.0;
pub const MIN_BLUR_RADIUS: u8 = 1;
pub const MAX_BLUR_RADIUS: u8 = 30;
pub const DEFAULT_OPACITY: f32 = 0.8;
pub const DEFAULT_BLUR_RADIUS: u8 = 10;

/// Region geometry. The kind is fixed at creation; updates may move or
/// reshape a region but never change its variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionShape {
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
    Freehand {
        points: Vec<CanvasPoint>,
    },
}

impl RegionShape {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                x.is_finite()
                    && y.is_finite()
                    && width.is_finite()
                    && height.is_finite()
                    && *width >= 0.0
                    && *height >= 0.0
            }
            Self::Circle { x, y, radius } => {
                x.is_finite() && y.is_finite() && radius.is_finite() && *radius >= 0.0
            }
            Self::Freehand { points } => {
                points.len() >= 3
                    && points
                        .iter()
                        .all(|point| point.x.is_finite() && point.y.is_finite())
            }
        }
    }

    pub fn contains(&self, point: CanvasPoint) -> bool {
        match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => point_in_rect(point, *x, *y, *width, *height),
            Self::Circle { x, y, radius } => {
                point_in_circle(point, CanvasPoint::new(*x, *y), *radius)
            }
            // Freehand paths are paint-only and never claim clicks.
            Self::Freehand { .. } => false,
        }
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Freehand { .. } => "freehand",
        }
    }
}

/// Creation input for a region; validated and clamped by the session.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    pub shape: RegionShape,
    pub opacity: f32,
    pub blur_radius: u8,
}

impl RegionSpec {
    pub fn new(shape: RegionShape, opacity: f32, blur_radius: u8) -> Self {
        Self {
            shape,
            opacity,
            blur_radius,
        }
    }
}

/// Field-wise update merged into an existing region. Geometry fields that do
/// not apply to the region's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub points: Option<Vec<CanvasPoint>>,
    pub opacity: Option<f32>,
    pub blur_radius: Option<u8>,
}

impl RegionPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlurRegion {
    pub id: u64,
    pub shape: RegionShape,
    pub opacity: f32,
    pub blur_radius: u8,
}

impl BlurRegion {
    pub fn new(id: u64, shape: RegionShape, opacity: f32, blur_radius: u8) -> Self {
        Self {
            id,
            shape,
            opacity: clamp_opacity(opacity),
            blur_radius: clamp_blur_radius(blur_radius),
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_opacity(opacity);
    }

    pub fn set_blur_radius(&mut self, blur_radius: u8) {
        self.blur_radius = clamp_blur_radius(blur_radius);
    }

    pub fn contains(&self, point: CanvasPoint) -> bool {
        self.shape.contains(point)
    }

    pub fn apply_patch(&mut self, patch: &RegionPatch) {
        match &mut self.shape {
            RegionShape::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                if let Some(next) = patch.x {
                    *x = next;
                }
                if let Some(next) = patch.y {
                    *y = next;
                }
                if let Some(next) = patch.width {
                    *width = next.max(0.0);
                }
                if let Some(next) = patch.height {
                    *height = next.max(0.0);
                }
            }
            RegionShape::Circle { x, y, radius } => {
                if let Some(next) = patch.x {
                    *x = next;
                }
                if let Some(next) = patch.y {
                    *y = next;
                }
                if let Some(next) = patch.radius {
                    *radius = next.max(0.0);
                }
            }
            RegionShape::Freehand { points } => {
                if let Some(next) = &patch.points {
                    // A path below three points would stop being a polygon.
                    if next.len() >= 3 {
                        *points = next.clone();
                    }
                }
            }
        }
        if let Some(opacity) = patch.opacity {
            self.set_opacity(opacity);
        }
        if let Some(blur_radius) = patch.blur_radius {
            self.set_blur_radius(blur_radius);
        }
    }
}

pub(crate) fn clamp_opacity(value: f32) -> f32 {
    value.max(MIN_OPACITY).min(MAX_OPACITY)
}

pub(crate) const fn clamp_blur_radius(value: u8) -> u8 {
    if value < MIN_BLUR_RADIUS {
        MIN_BLUR_RADIUS
    } else if value > MAX_BLUR_RADIUS {
        MAX_BLUR_RADIUS
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_shape() -> RegionShape {
        RegionShape::Rectangle {
            x: 10.0,
            y: 10.0,
            width: 30.0,
            height: 20.0,
        }
    }

    #[test]
    fn region_new_clamps_opacity_and_blur_radius() {
        let region = BlurRegion::new(1, rectangle_shape(), 3.0, 200);
        assert_eq!(region.opacity, MAX_OPACITY);
        assert_eq!(region.blur_radius, MAX_BLUR_RADIUS);

        let region = BlurRegion::new(2, rectangle_shape(), 0.0, 0);
        assert_eq!(region.opacity, MIN_OPACITY);
        assert_eq!(region.blur_radius, MIN_BLUR_RADIUS);
    }

    #[test]
    fn shape_validation_flags_bad_geometry() {
        assert!(rectangle_shape().is_valid());
        assert!(!RegionShape::Rectangle {
            x: 0.0,
            y: 0.0,
            width: -1.0,
            height: 5.0,
        }
        .is_valid());
        assert!(!RegionShape::Circle {
            x: f32::NAN,
            y: 0.0,
            radius: 5.0,
        }
        .is_valid());
        assert!(!RegionShape::Freehand {
            points: vec![CanvasPoint::new(0.0, 0.0), CanvasPoint::new(5.0, 5.0)],
        }
        .is_valid());
    }

    #[test]
    fn rectangle_contains_is_edge_inclusive() {
        let shape = rectangle_shape();
        assert!(shape.contains(CanvasPoint::new(10.0, 10.0)));
        assert!(shape.contains(CanvasPoint::new(40.0, 30.0)));
        assert!(!shape.contains(CanvasPoint::new(40.5, 30.0)));
    }

    #[test]
    fn freehand_never_contains_points() {
        let shape = RegionShape::Freehand {
            points: vec![
                CanvasPoint::new(0.0, 0.0),
                CanvasPoint::new(100.0, 0.0),
                CanvasPoint::new(100.0, 100.0),
                CanvasPoint::new(0.0, 100.0),
            ],
        };
        assert!(!shape.contains(CanvasPoint::new(50.0, 50.0)));
    }

    #[test]
    fn patch_merges_only_kind_relevant_fields() {
        let mut region = BlurRegion::new(1, rectangle_shape(), 0.8, 10);
        region.apply_patch(&RegionPatch {
            x: Some(5.0),
            radius: Some(99.0),
            opacity: Some(0.5),
            ..RegionPatch::default()
        });
        assert_eq!(
            region.shape,
            RegionShape::Rectangle {
                x: 5.0,
                y: 10.0,
                width: 30.0,
                height: 20.0,
            }
        );
        assert_eq!(region.opacity, 0.5);
    }

    #[test]
    fn patch_clamps_opacity_and_negative_sizes() {
        let mut region = BlurRegion::new(1, rectangle_shape(), 0.8, 10);
        region.apply_patch(&RegionPatch {
            width: Some(-8.0),
            opacity: Some(0.01),
            blur_radius: Some(77),
            ..RegionPatch::default()
        });
        match region.shape {
            RegionShape::Rectangle { width, .. } => assert_eq!(width, 0.0),
            _ => panic!("shape kind should not change"),
        }
        assert_eq!(region.opacity, MIN_OPACITY);
        assert_eq!(region.blur_radius, MAX_BLUR_RADIUS);
    }

    #[test]
    fn patch_ignores_too_short_freehand_paths() {
        let original_points = vec![
            CanvasPoint::new(0.0, 0.0),
            CanvasPoint::new(10.0, 0.0),
            CanvasPoint::new(10.0, 10.0),
        ];
        let mut region = BlurRegion::new(
            1,
            RegionShape::Freehand {
                points: original_points.clone(),
            },
            0.8,
            10,
        );
        region.apply_patch(&RegionPatch {
            points: Some(vec![CanvasPoint::new(1.0, 1.0)]),
            ..RegionPatch::default()
        });
        assert_eq!(
            region.shape,
            RegionShape::Freehand {
                points: original_points,
            }
        );
    }
}
