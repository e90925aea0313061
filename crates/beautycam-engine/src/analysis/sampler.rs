//! Pixel sampling: rasterizes a region polygon against a frame and
//! accumulates the statistics every feature score is built from.
//!
//! The point-in-polygon test uses the even-odd rule and is evaluated at
//! integer pixel coordinates. The rule is part of the scoring contract:
//! it decides the pixel count, and the pixel count feeds every density
//! ratio, so it must not change between frames or releases.
//!
//! Sampling is O(bounding-box area) per region and dominates the cost of
//! one analysis cycle, which is why the pipeline throttles recomputation.

use crate::frame::FrameBuffer;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one region in one frame.
///
/// Produced fresh per region per cycle; never mutated after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelStats {
    /// Pixels inside the region polygon
    pub pixel_count: u64,
    /// Pixels inside the polygon darker than the spot threshold
    pub spot_count: u64,
    /// Mean brightness of inside pixels, in `[0, 255]`
    pub average_brightness: f64,
    /// Mean absolute horizontal brightness gradient inside the polygon
    pub texture_variation: f64,
}

/// Even-odd point-in-polygon test.
fn point_in_polygon(polygon: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Sample a region polygon against a frame.
///
/// `spot_threshold` is the brightness (out of 255) below which a pixel
/// counts as a spot. A polygon enclosing zero pixels yields all-zero
/// stats; divisions are guarded so degenerate regions never produce
/// NaN or infinity.
pub fn sample_region(
    frame: &FrameBuffer<'_>,
    polygon: &[(f64, f64)],
    spot_threshold: f64,
) -> PixelStats {
    if polygon.len() < 3 {
        return PixelStats::default();
    }

    // Bounding rectangle clamped to the frame.
    let min_x = polygon.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let max_x = polygon
        .iter()
        .map(|&(x, _)| x)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_y = polygon.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max_y = polygon
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil() as i64).min(frame.width() as i64 - 1);
    let y1 = (max_y.ceil() as i64).min(frame.height() as i64 - 1);
    if x1 < x0 as i64 || y1 < y0 as i64 {
        return PixelStats::default();
    }
    let (x1, y1) = (x1 as u32, y1 as u32);

    let mut pixel_count = 0u64;
    let mut spot_count = 0u64;
    let mut brightness_sum = 0.0f64;
    let mut texture_sum = 0.0f64;

    for y in y0..=y1 {
        for x in x0..=x1 {
            if !point_in_polygon(polygon, x as f64, y as f64) {
                continue;
            }
            let Some(brightness) = frame.brightness(x, y) else {
                continue;
            };
            pixel_count += 1;
            brightness_sum += brightness;
            if brightness < spot_threshold {
                spot_count += 1;
            }
            // Horizontal gradient against the left neighbor; the neighbor
            // does not need to be inside the polygon itself.
            if x > 0 {
                if let Some(left) = frame.brightness(x - 1, y) {
                    texture_sum += (brightness - left).abs();
                }
            }
        }
    }

    let denominator = pixel_count.max(1) as f64;
    PixelStats {
        pixel_count,
        spot_count,
        average_brightness: brightness_sum / denominator,
        texture_variation: texture_sum / denominator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;

    fn uniform_frame(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; (width * height * 3) as usize]
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<(f64, f64)> {
        vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    }

    #[test]
    fn test_white_frame_has_no_spots() {
        let data = uniform_frame(8, 8, 255);
        let frame = FrameBuffer::new(&data, 8, 8, PixelFormat::Rgb24).unwrap();
        let stats = sample_region(&frame, &square(0.0, 0.0, 8.0, 8.0), 70.0);

        assert!(stats.pixel_count > 0);
        assert_eq!(stats.spot_count, 0);
        assert_eq!(stats.average_brightness, 255.0);
        assert_eq!(stats.texture_variation, 0.0);
    }

    #[test]
    fn test_black_frame_is_all_spots() {
        let data = uniform_frame(8, 8, 0);
        let frame = FrameBuffer::new(&data, 8, 8, PixelFormat::Rgb24).unwrap();
        let stats = sample_region(&frame, &square(0.0, 0.0, 8.0, 8.0), 70.0);

        assert_eq!(stats.spot_count, stats.pixel_count);
        assert_eq!(stats.average_brightness, 0.0);
    }

    #[test]
    fn test_even_odd_pixel_count_is_stable() {
        // 4x4 square at the origin encloses exactly 16 integer coordinates
        // under the even-odd rule; this count is load-bearing for density
        // ratios, so pin it.
        let data = uniform_frame(8, 8, 128);
        let frame = FrameBuffer::new(&data, 8, 8, PixelFormat::Rgb24).unwrap();
        let stats = sample_region(&frame, &square(0.0, 0.0, 4.0, 4.0), 70.0);
        assert_eq!(stats.pixel_count, 16);
    }

    #[test]
    fn test_texture_counts_left_neighbor_outside_polygon() {
        // Columns 0..4 are black, columns 4..8 white. Sample only the white
        // half: the pixels at x=4 still see the black neighbor at x=3.
        let mut data = uniform_frame(8, 8, 255);
        for y in 0..8usize {
            for x in 0..4usize {
                let off = (y * 8 + x) * 3;
                data[off..off + 3].copy_from_slice(&[0, 0, 0]);
            }
        }
        let frame = FrameBuffer::new(&data, 8, 8, PixelFormat::Rgb24).unwrap();
        let stats = sample_region(&frame, &square(4.0, 0.0, 8.0, 8.0), 70.0);

        // 8 rows of the x=4 column contribute 255 each; 32 inside pixels.
        assert_eq!(stats.pixel_count, 32);
        assert!((stats.texture_variation - (8.0 * 255.0) / 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_polygon_is_guarded() {
        let data = uniform_frame(8, 8, 128);
        let frame = FrameBuffer::new(&data, 8, 8, PixelFormat::Rgb24).unwrap();
        // All vertices coincide: encloses no pixels.
        let stats = sample_region(&frame, &[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0)], 70.0);

        assert_eq!(stats.pixel_count, 0);
        assert_eq!(stats.spot_count, 0);
        assert_eq!(stats.average_brightness, 0.0);
        assert_eq!(stats.texture_variation, 0.0);
    }

    #[test]
    fn test_polygon_off_frame_is_empty() {
        let data = uniform_frame(4, 4, 128);
        let frame = FrameBuffer::new(&data, 4, 4, PixelFormat::Rgb24).unwrap();
        let stats = sample_region(&frame, &square(10.0, 10.0, 20.0, 20.0), 70.0);
        assert_eq!(stats, PixelStats::default());
    }

    #[test]
    fn test_spot_threshold_boundary() {
        let data = uniform_frame(4, 4, 70);
        let frame = FrameBuffer::new(&data, 4, 4, PixelFormat::Rgb24).unwrap();
        // Brightness exactly at the threshold is not a spot.
        let stats = sample_region(&frame, &square(0.0, 0.0, 4.0, 4.0), 70.0);
        assert_eq!(stats.spot_count, 0);

        let darker = uniform_frame(4, 4, 69);
        let frame = FrameBuffer::new(&darker, 4, 4, PixelFormat::Rgb24).unwrap();
        let stats = sample_region(&frame, &square(0.0, 0.0, 4.0, 4.0), 70.0);
        assert_eq!(stats.spot_count, stats.pixel_count);
    }
}
