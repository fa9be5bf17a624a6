use image::RgbaImage;

/// Box approximation of a Gaussian blur. Every output pixel's color becomes
/// the mean of the `(2·radius+1)²` neighborhood of the input, with neighbor
/// coordinates clamped to the buffer edges so border pixels replicate. The
/// alpha channel is left untouched. A radius of zero is a no-op.
pub fn box_blur(buffer: &mut RgbaImage, radius: u8) {
    if radius == 0 || buffer.width() == 0 || buffer.height() == 0 {
        return;
    }

    // The window averages the pre-blur input, so sampling reads a snapshot.
    let source = buffer.clone();
    let max_x = (source.width() - 1) as i32;
    let max_y = (source.height() - 1) as i32;
    let reach = i32::from(radius);
    let window = u32::from(radius) * 2 + 1;
    let sample_count = window * window;

    for y in 0..source.height() {
        for x in 0..source.width() {
            let mut sum_red: u32 = 0;
            let mut sum_green: u32 = 0;
            let mut sum_blue: u32 = 0;
            for offset_y in -reach..=reach {
                let sample_y = (y as i32 + offset_y).clamp(0, max_y) as u32;
                for offset_x in -reach..=reach {
                    let sample_x = (x as i32 + offset_x).clamp(0, max_x) as u32;
                    let sample = source.get_pixel(sample_x, sample_y);
                    sum_red += u32::from(sample[0]);
                    sum_green += u32::from(sample[1]);
                    sum_blue += u32::from(sample[2]);
                }
            }
            let pixel = buffer.get_pixel_mut(x, y);
            pixel[0] = ((sum_red + sample_count / 2) / sample_count) as u8;
            pixel[1] = ((sum_green + sample_count / 2) / sample_count) as u8;
            pixel[2] = ((sum_blue + sample_count / 2) / sample_count) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient_row() -> RgbaImage {
        let mut row = RgbaImage::new(3, 1);
        row.put_pixel(0, 0, Rgba([30, 30, 30, 255]));
        row.put_pixel(1, 0, Rgba([60, 60, 60, 200]));
        row.put_pixel(2, 0, Rgba([90, 90, 90, 255]));
        row
    }

    #[test]
    fn zero_radius_leaves_pixels_unchanged() {
        let mut buffer = gradient_row();
        let original = buffer.clone();
        box_blur(&mut buffer, 0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn uniform_buffers_stay_uniform() {
        let mut buffer = RgbaImage::new(8, 8);
        for pixel in buffer.pixels_mut() {
            *pixel = Rgba([180, 120, 50, 255]);
        }
        let original = buffer.clone();
        box_blur(&mut buffer, 4);
        assert_eq!(buffer, original);
    }

    #[test]
    fn edge_pixels_replicate_into_the_window() {
        let mut buffer = gradient_row();
        box_blur(&mut buffer, 1);
        // Nine samples each; rows clamp vertically, columns replicate at
        // the ends: [30,30,60] -> 40, [30,60,90] -> 60, [60,90,90] -> 80.
        assert_eq!(buffer.get_pixel(0, 0)[0], 40);
        assert_eq!(buffer.get_pixel(1, 0)[0], 60);
        assert_eq!(buffer.get_pixel(2, 0)[0], 80);
    }

    #[test]
    fn alpha_channel_is_not_touched() {
        let mut buffer = gradient_row();
        box_blur(&mut buffer, 2);
        assert_eq!(buffer.get_pixel(0, 0)[3], 255);
        assert_eq!(buffer.get_pixel(1, 0)[3], 200);
        assert_eq!(buffer.get_pixel(2, 0)[3], 255);
    }

    #[test]
    fn interior_pixel_equals_window_average_of_the_input() {
        let mut buffer = RgbaImage::new(5, 5);
        for (x, y, pixel) in buffer.enumerate_pixels_mut() {
            let value = (x * 40 + y * 7) as u8;
            *pixel = Rgba([value, value / 2, 255 - value, 255]);
        }
        let source = buffer.clone();
        box_blur(&mut buffer, 1);

        let mut sum = 0_u32;
        for sample_y in 1..=3 {
            for sample_x in 1..=3 {
                sum += u32::from(source.get_pixel(sample_x, sample_y)[0]);
            }
        }
        let expected = ((sum + 4) / 9) as u8;
        assert_eq!(buffer.get_pixel(2, 2)[0], expected);
    }
}
