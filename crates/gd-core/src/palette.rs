//! Approximate dominant-color extraction.
//!
//! This is a coarse frequency histogram, not color science: the upload is
//! resampled onto a small square grid, every `stride`-th sample is bucketed
//! per channel, and the most common buckets win.

use crate::config::PaletteConfig;
use crate::ingest::DecodedImage;
use crate::model::{Palette, Rgb};
use std::collections::HashMap;

/// Round a channel to the nearest multiple of `step`, saturating at 255.
fn quantize(channel: u8, step: u8) -> u8 {
    if step <= 1 {
        return channel;
    }
    let step = f32::from(step);
    let bucket = (f32::from(channel) / step).round() * step;
    bucket.min(255.0) as u8
}

/// Largest sampling grid side honored; larger configured values are capped.
pub const MAX_GRID: u32 = 4096;

/// Extract up to `config.max_colors` dominant colors, most frequent first.
/// Colors with equal counts keep the order in which they were first sampled.
pub fn extract_palette(image: &DecodedImage, config: &PaletteConfig) -> Palette {
    let grid = config.grid.clamp(1, MAX_GRID);
    let stride = config.stride.max(1);
    let total = u64::from(grid).pow(2);

    let mut buckets: Vec<(Rgb, usize)> = Vec::new();
    let mut index: HashMap<Rgb, usize> = HashMap::new();

    for k in (0..total).step_by(stride) {
        let gx = (k % u64::from(grid)) as u32;
        let gy = (k / u64::from(grid)) as u32;
        // Nearest-neighbour resample onto the grid.
        let sx = (u64::from(gx) * u64::from(image.width) / u64::from(grid)) as u32;
        let sy = (u64::from(gy) * u64::from(image.height) / u64::from(grid)) as u32;
        let [r, g, b, a] = image.pixel(sx, sy);
        if a <= config.alpha_threshold {
            continue;
        }

        let color = Rgb::new(
            quantize(r, config.quantize_step),
            quantize(g, config.quantize_step),
            quantize(b, config.quantize_step),
        );
        match index.get(&color) {
            Some(&i) => buckets[i].1 += 1,
            None => {
                index.insert(color, buckets.len());
                buckets.push((color, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    buckets.sort_by(|a, b| b.1.cmp(&a.1));
    buckets
        .into_iter()
        .take(config.max_colors)
        .map(|(color, _)| color)
        .collect()
}
