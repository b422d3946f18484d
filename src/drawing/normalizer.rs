//! Turns canvas strokes into the fixed-size intensity grid the network reads.
//!
//! Pipeline: scale points to the grid and round them, stamp each stroke as
//! a round-capped polyline onto an 8-bit surface, Gaussian-smooth, zero
//! everything under the noise threshold, and collapse near-empty results to
//! the blank tensor.

use image::{imageops, GrayImage, ImageBuffer, Luma};

use crate::config::CanvasConfig;
use crate::drawing::stroke::{Point, Stroke};

const INK: Luma<u8> = Luma([255]);

/// Square row-major grid of intensities in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    side: usize,
    pixels: Vec<f64>,
}

impl ImageTensor {
    pub fn zeros(side: usize) -> ImageTensor {
        ImageTensor { side, pixels: vec![0.0; side * side] }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Flattened row-major view, ready for `Network::forward`.
    pub fn as_slice(&self) -> &[f64] {
        &self.pixels
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.pixels
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.pixels[row * self.side + col]
    }

    pub fn sum(&self) -> f64 {
        self.pixels.iter().sum()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&v| v == 0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: CanvasConfig,
}

impl Normalizer {
    pub fn new(config: CanvasConfig) -> Normalizer {
        Normalizer { config }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Normalized tensor for the completed strokes plus the in-progress one.
    pub fn normalize(&self, strokes: &[Stroke], in_progress: Option<&[Point]>) -> ImageTensor {
        let side = self.config.grid_size as usize;
        let has_ink = strokes.iter().any(|s| !s.is_empty())
            || in_progress.map_or(false, |points| !points.is_empty());
        if !has_ink {
            return ImageTensor::zeros(side);
        }

        let surface = self.rasterize(strokes, in_progress);
        let unit: ImageBuffer<Luma<f32>, Vec<f32>> =
            ImageBuffer::from_fn(surface.width(), surface.height(), |x, y| {
                Luma([surface.get_pixel(x, y).0[0] as f32 / 255.0])
            });
        // blur() substitutes sigma = 1.0 for non-positive values.
        let smoothed = if self.config.blur_sigma > 0.0 {
            imageops::blur(&unit, self.config.blur_sigma)
        } else {
            unit
        };

        let threshold = self.config.noise_threshold;
        let pixels: Vec<f64> = smoothed
            .pixels()
            .map(|p| {
                let v = (p.0[0] as f64).clamp(0.0, 1.0);
                if v < threshold { 0.0 } else { v }
            })
            .collect();

        if pixels.iter().sum::<f64>() < self.config.min_total_intensity {
            return ImageTensor::zeros(side);
        }
        ImageTensor { side, pixels }
    }

    /// Draws every stroke onto a black `grid_size²` surface in white.
    ///
    /// Points are scaled by `grid_size / canvas_size` and rounded to the
    /// nearest cell. A cell is inked when its centre lies within
    /// `brush_width / 2` of the polyline, which gives round caps and joins; a
    /// one-point stroke becomes a dot.
    pub fn rasterize(&self, strokes: &[Stroke], in_progress: Option<&[Point]>) -> GrayImage {
        let side = self.config.grid_size;
        let mut surface = GrayImage::new(side, side);
        let scale = self.config.scale();
        let radius = self.config.brush_width / 2.0;

        let paths = strokes.iter().map(Stroke::points).chain(in_progress);
        for points in paths {
            let grid: Vec<(f64, f64)> = points
                .iter()
                .map(|p| ((p.x * scale).round(), (p.y * scale).round()))
                .collect();
            match grid.as_slice() {
                [] => {}
                [dot] => stamp_segment(&mut surface, *dot, *dot, radius),
                _ => {
                    for pair in grid.windows(2) {
                        stamp_segment(&mut surface, pair[0], pair[1], radius);
                    }
                }
            }
        }
        surface
    }
}

/// Convenience entry point with default tunables and the given canvas size.
pub fn normalize(strokes: &[Stroke], in_progress: Option<&[Point]>, canvas_size: f64) -> ImageTensor {
    let config = CanvasConfig { canvas_size, ..CanvasConfig::default() };
    Normalizer::new(config).normalize(strokes, in_progress)
}

fn stamp_segment(surface: &mut GrayImage, a: (f64, f64), b: (f64, f64), radius: f64) {
    let last = (surface.width() - 1) as f64;
    let lo_x = (a.0.min(b.0) - radius).floor().max(0.0);
    let hi_x = (a.0.max(b.0) + radius).ceil().min(last);
    let lo_y = (a.1.min(b.1) - radius).floor().max(0.0);
    let hi_y = (a.1.max(b.1) + radius).ceil().min(last);
    if lo_x > hi_x || lo_y > hi_y {
        return;
    }

    let reach = radius * radius + 1e-9;
    for y in lo_y as u32..=hi_y as u32 {
        for x in lo_x as u32..=hi_x as u32 {
            if distance_sq_to_segment((x as f64, y as f64), a, b) <= reach {
                surface.put_pixel(x, y, INK);
            }
        }
    }
}

fn distance_sq_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - cx).powi(2) + (p.1 - cy).powi(2)
}
