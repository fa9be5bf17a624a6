mod blur;

pub use blur::box_blur;

use image::{imageops, RgbaImage};

use crate::editor::region::{BlurRegion, RegionShape};
use crate::geometry::{
    clamp_box_to_canvas, point_in_circle, point_in_polygon, point_in_rect, CanvasBounds,
    CanvasPoint, PixelRect,
};

/// Composites the region list over the base image in insertion order.
///
/// Each region lifts its bounding box out of the buffer as composited so
/// far, blurs it, and blends it back with the region's opacity, clipped to
/// the exact shape. Later regions therefore re-blur pixels earlier regions
/// already baked in where they overlap.
pub fn render(base: &RgbaImage, regions: &[BlurRegion]) -> RgbaImage {
    let mut output = base.clone();
    let canvas = CanvasBounds::new(output.width(), output.height());

    for region in regions {
        let Some(rect) = blur_box(&region.shape, canvas) else {
            tracing::debug!(
                region_id = region.id,
                kind = region.shape.kind_label(),
                "region clipped away, skipping"
            );
            continue;
        };
        let mut patch =
            imageops::crop_imm(&output, rect.x, rect.y, rect.width, rect.height).to_image();
        box_blur(&mut patch, region.blur_radius);
        blend_patch(&mut output, &patch, rect, region);
    }

    output
}

/// Pixel box a region's blur pass covers: the shape's bounding box for
/// rectangles and circles, the whole canvas for freehand paths.
fn blur_box(shape: &RegionShape, canvas: CanvasBounds) -> Option<PixelRect> {
    match shape {
        RegionShape::Rectangle {
            x,
            y,
            width,
            height,
        } => clamp_box_to_canvas(*x, *y, x + width, y + height, canvas),
        RegionShape::Circle { x, y, radius } => {
            clamp_box_to_canvas(x - radius, y - radius, x + radius, y + radius, canvas)
        }
        RegionShape::Freehand { .. } => {
            clamp_box_to_canvas(0.0, 0.0, canvas.width as f32, canvas.height as f32, canvas)
        }
    }
}

/// Paint-mask containment, tested at pixel centers. Unlike click-selection,
/// freehand paths do clip here.
fn mask_contains(shape: &RegionShape, point: CanvasPoint) -> bool {
    match shape {
        RegionShape::Rectangle {
            x,
            y,
            width,
            height,
        } => point_in_rect(point, *x, *y, *width, *height),
        RegionShape::Circle { x, y, radius } => {
            point_in_circle(point, CanvasPoint::new(*x, *y), *radius)
        }
        RegionShape::Freehand { points } => point_in_polygon(point, points),
    }
}

fn blend_patch(output: &mut RgbaImage, patch: &RgbaImage, rect: PixelRect, region: &BlurRegion) {
    let alpha = (region.opacity * 255.0).round() as u16;
    let inverse = 255 - alpha;

    for (patch_x, patch_y, blurred) in patch.enumerate_pixels() {
        let canvas_x = rect.x + patch_x;
        let canvas_y = rect.y + patch_y;
        let center = CanvasPoint::new(canvas_x as f32 + 0.5, canvas_y as f32 + 0.5);
        if !mask_contains(&region.shape, center) {
            continue;
        }
        let under = output.get_pixel_mut(canvas_x, canvas_y);
        under[0] = blend_channel(blurred[0], under[0], alpha, inverse);
        under[1] = blend_channel(blurred[1], under[1], alpha, inverse);
        under[2] = blend_channel(blurred[2], under[2], alpha, inverse);
    }
}

/// Rounded 8-bit lerp between the blurred and underlying channel values.
/// `alpha + inverse == 255`, so the sum never leaves `u16`.
fn blend_channel(over: u8, under: u8, alpha: u16, inverse: u16) -> u8 {
    ((u16::from(over) * alpha + u16::from(under) * inverse + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkerboard(width: u32, height: u32) -> RgbaImage {
        let mut base = RgbaImage::new(width, height);
        for (x, y, pixel) in base.enumerate_pixels_mut() {
            let value = if (x + y) % 2 == 0 { 0 } else { 255 };
            *pixel = Rgba([value, value, value, 255]);
        }
        base
    }

    fn region(id: u64, shape: RegionShape, opacity: f32, blur_radius: u8) -> BlurRegion {
        BlurRegion::new(id, shape, opacity, blur_radius)
    }

    #[test]
    fn empty_region_list_returns_the_base_image() {
        let base = checkerboard(16, 16);
        assert_eq!(render(&base, &[]), base);
    }

    #[test]
    fn rectangle_region_changes_only_pixels_inside_its_bounds() {
        let base = checkerboard(20, 20);
        let rendered = render(
            &base,
            &[region(
                1,
                RegionShape::Rectangle {
                    x: 4.0,
                    y: 4.0,
                    width: 8.0,
                    height: 8.0,
                },
                1.0,
                2,
            )],
        );
        assert_ne!(rendered.get_pixel(8, 8), base.get_pixel(8, 8));
        assert_eq!(rendered.get_pixel(2, 2), base.get_pixel(2, 2));
        assert_eq!(rendered.get_pixel(13, 8), base.get_pixel(13, 8));
    }

    #[test]
    fn full_canvas_rectangle_at_full_opacity_equals_the_blurred_base() {
        let base = checkerboard(12, 12);
        let rendered = render(
            &base,
            &[region(
                1,
                RegionShape::Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: 12.0,
                    height: 12.0,
                },
                1.0,
                3,
            )],
        );

        let mut expected = base.clone();
        box_blur(&mut expected, 3);
        assert_eq!(rendered, expected);
    }

    #[test]
    fn opacity_blends_blurred_pixels_against_the_base() {
        let base = checkerboard(10, 10);
        let shape = RegionShape::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let rendered = render(&base, &[region(1, shape, 0.5, 1)]);

        let mut blurred = base.clone();
        box_blur(&mut blurred, 1);
        let alpha = (0.5_f32 * 255.0).round() as u16;
        let inverse = 255 - alpha;
        let expected = ((u16::from(blurred.get_pixel(5, 5)[0]) * alpha
            + u16::from(base.get_pixel(5, 5)[0]) * inverse
            + 127)
            / 255) as u8;
        assert_eq!(rendered.get_pixel(5, 5)[0], expected);
    }

    #[test]
    fn circle_region_leaves_bounding_box_corners_untouched() {
        let base = checkerboard(30, 30);
        let rendered = render(
            &base,
            &[region(
                1,
                RegionShape::Circle {
                    x: 15.0,
                    y: 15.0,
                    radius: 8.0,
                },
                1.0,
                2,
            )],
        );
        // Inside the disk.
        assert_ne!(rendered.get_pixel(15, 15), base.get_pixel(15, 15));
        // Bounding-box corner, outside the disk.
        assert_eq!(rendered.get_pixel(8, 8), base.get_pixel(8, 8));
        assert_eq!(rendered.get_pixel(22, 22), base.get_pixel(22, 22));
    }

    #[test]
    fn freehand_region_clips_to_the_polygon() {
        let base = checkerboard(24, 24);
        let rendered = render(
            &base,
            &[region(
                1,
                RegionShape::Freehand {
                    points: vec![
                        CanvasPoint::new(2.0, 2.0),
                        CanvasPoint::new(20.0, 2.0),
                        CanvasPoint::new(2.0, 20.0),
                    ],
                },
                1.0,
                2,
            )],
        );
        // Inside the triangle.
        assert_ne!(rendered.get_pixel(5, 5), base.get_pixel(5, 5));
        // Opposite corner of the canvas, outside the triangle.
        assert_eq!(rendered.get_pixel(21, 21), base.get_pixel(21, 21));
    }

    #[test]
    fn overlapping_regions_cascade_in_insertion_order() {
        let base = checkerboard(26, 26);
        let first = region(
            1,
            RegionShape::Circle {
                x: 11.0,
                y: 13.0,
                radius: 7.0,
            },
            0.9,
            3,
        );
        let second = region(
            2,
            RegionShape::Circle {
                x: 17.0,
                y: 13.0,
                radius: 7.0,
            },
            0.9,
            5,
        );

        let combined = render(&base, &[first.clone(), second.clone()]);
        let staged = render(&render(&base, &[first]), &[second.clone()]);
        assert_eq!(combined, staged);

        // The overlap must differ from blurring the untouched base alone.
        let independent = render(&base, &[second]);
        assert_ne!(
            combined.get_pixel(14, 13),
            independent.get_pixel(14, 13),
        );
    }

    #[test]
    fn regions_clipped_off_canvas_are_skipped() {
        let base = checkerboard(10, 10);
        let rendered = render(
            &base,
            &[
                region(
                    1,
                    RegionShape::Rectangle {
                        x: 40.0,
                        y: 40.0,
                        width: 10.0,
                        height: 10.0,
                    },
                    1.0,
                    4,
                ),
                region(
                    2,
                    RegionShape::Rectangle {
                        x: 2.0,
                        y: 2.0,
                        width: 0.0,
                        height: 6.0,
                    },
                    1.0,
                    4,
                ),
            ],
        );
        assert_eq!(rendered, base);
    }

    #[test]
    fn render_is_deterministic_for_identical_inputs() {
        let base = checkerboard(18, 18);
        let regions = vec![
            region(
                1,
                RegionShape::Rectangle {
                    x: 1.0,
                    y: 1.0,
                    width: 9.0,
                    height: 9.0,
                },
                0.4,
                2,
            ),
            region(
                2,
                RegionShape::Circle {
                    x: 12.0,
                    y: 12.0,
                    radius: 5.0,
                },
                0.7,
                6,
            ),
        ];
        assert_eq!(render(&base, &regions), render(&base, &regions));
    }
}
