//! Row-block partitioning for parallel rendering.
//!
//! The image is cut into one horizontal band per worker. Each band is a
//! contiguous run of rows, so its pixels form one contiguous slice of the
//! row-major output buffer.

use umbra_core::Color;

use crate::tracer::trace_ray;
use crate::Scene;

/// A horizontal band of whole rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    /// First row of the block
    pub y: u32,
    /// Number of rows in the block
    pub height: u32,
    /// Index of this block, top to bottom
    pub index: usize,
}

impl RowBlock {
    pub fn new(y: u32, height: u32, index: usize) -> Self {
        Self { y, height, index }
    }

    /// Get the total number of pixels in this block for a given image width.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.height as usize * width as usize
    }
}

/// Split `height` rows into one block per worker.
///
/// Every block gets `height / workers` rows and the last one also takes the
/// remainder. The worker count is clamped to `[1, height]`, so no block is
/// ever empty. A zero height yields no blocks.
pub fn generate_row_blocks(height: u32, workers: usize) -> Vec<RowBlock> {
    if height == 0 {
        return Vec::new();
    }

    let workers = workers.clamp(1, height as usize) as u32;
    let rows = height / workers;

    (0..workers)
        .map(|i| {
            let y = i * rows;
            let block_height = if i == workers - 1 { height - y } else { rows };
            RowBlock::new(y, block_height, i as usize)
        })
        .collect()
}

/// Render one block into `pixels`, the block's own rows of the image.
pub fn render_block(scene: &Scene, block: &RowBlock, width: u32, pixels: &mut [Color]) {
    debug_assert_eq!(pixels.len(), block.pixel_count(width));

    let camera = scene.camera();
    for (local_y, row) in pixels.chunks_mut(width as usize).enumerate() {
        let y = block.y + local_y as u32;
        for (x, pixel) in row.iter_mut().enumerate() {
            let ray = camera.ray_for_pixel(x as u32, y);
            *pixel = trace_ray(scene, &ray);
        }
    }
}
