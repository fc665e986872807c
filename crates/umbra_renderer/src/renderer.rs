//! Parallel block renderer and image output.
//!
//! Rendering splits the image into row blocks, one per worker, and runs
//! them on a dedicated rayon pool. Each worker owns a disjoint slice of the
//! output buffer, so no locking is needed.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use umbra_core::Color;

use crate::block::{generate_row_blocks, render_block};
use crate::Scene;

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Cannot render an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// 8-bit RGB pixel, laid out for direct byte casting.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Convert a color to 8-bit RGB. Channels are clamped to [0, 1] and
/// truncated.
pub fn color_to_rgb(color: Color) -> Rgb8 {
    let channel = |c: f64| (255.0 * c.clamp(0.0, 1.0)) as u8;
    Rgb8 {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to packed 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<Rgb8> {
        self.pixels.iter().map(|&color| color_to_rgb(color)).collect()
    }

    /// Write the image as an 8-bit RGB PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let rgb = self.to_rgb8();
        image::save_buffer(
            path,
            bytemuck::cast_slice(&rgb),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the scene with the worker count from its settings.
pub fn render(scene: &Scene) -> RenderResult<ImageBuffer> {
    render_with_workers(scene, scene.settings().threads)
}

/// Render the scene on `workers` threads, one row block each.
///
/// The result does not depend on the worker count.
pub fn render_with_workers(scene: &Scene, workers: usize) -> RenderResult<ImageBuffer> {
    let width = scene.camera().image_width;
    let height = scene.camera().image_height;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }

    let blocks = generate_row_blocks(height, workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(blocks.len())
        .thread_name(|i| format!("umbra-render-{}", i))
        .build()?;

    log::info!(
        "Rendering {}x{} with {} workers ({} primitives)",
        width,
        height,
        blocks.len(),
        scene.primitive_count()
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);

    pool.scope(|s| {
        let mut rest: &mut [Color] = &mut image.pixels;
        for block in &blocks {
            let (pixels, tail) = std::mem::take(&mut rest).split_at_mut(block.pixel_count(width));
            rest = tail;
            s.spawn(move |_| {
                let block_start = Instant::now();
                render_block(scene, block, width, pixels);
                log::debug!(
                    "Block {} (rows {}..{}) done in {:.2?}",
                    block.index,
                    block.y,
                    block.y + block.height,
                    block_start.elapsed()
                );
            });
        }
    });

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Appearance, Camera, Light, LightModel, RenderSettings};
    use umbra_math::DVec3;

    const GREY: Color = Color::new(0.6, 0.6, 0.6);

    fn top_down_scene(light: DVec3, width: u32, height: u32) -> Scene {
        let settings = RenderSettings {
            width,
            height,
            light_model: LightModel::None,
            shadow_factor: 0.25,
            ..RenderSettings::default()
        };
        let mut scene = Scene::new(
            Camera::new(DVec3::new(0.0, 0.0, 20.0), DVec3::ZERO, 0.0),
            Light::new(light),
            settings,
        );
        scene.add_plane(DVec3::ZERO, DVec3::Z, 1.0, 0.0, Appearance::Flat(GREY));
        scene
    }

    fn with_sphere(mut scene: Scene) -> Scene {
        scene.add_sphere(
            DVec3::new(0.0, 0.0, 2.0),
            1.0,
            DVec3::Z,
            0.0,
            Appearance::Flat(Color::ONE),
        );
        scene
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), Rgb8 { r: 0, g: 0, b: 0 });
        assert_eq!(color_to_rgb(Color::ONE), Rgb8 { r: 255, g: 255, b: 255 });
        assert_eq!(
            color_to_rgb(Color::new(-0.5, 0.5, 7.0)),
            Rgb8 { r: 0, g: 127, b: 255 }
        );
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(4, 3);
        assert_eq!(image.pixels.len(), 12);
        image.set(3, 2, Color::ONE);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.pixels[11], Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_uniform_plane_from_above() {
        let scene = top_down_scene(DVec3::new(0.0, 0.0, 30.0), 16, 12);
        let image = render_with_workers(&scene, 3).unwrap();
        assert_eq!(image.pixels.len(), 16 * 12);
        assert!(image.pixels.iter().all(|&c| c == GREY));
    }

    #[test]
    fn test_sphere_shadows_plane() {
        let light = DVec3::new(5.0, 0.0, 10.0);
        let in_shadow = |image: &ImageBuffer| {
            image
                .pixels
                .iter()
                .filter(|&&c| (c - GREY * 0.25).length() < 1e-12)
                .count()
        };

        let bare = render_with_workers(&top_down_scene(light, 64, 64), 4).unwrap();
        assert_eq!(in_shadow(&bare), 0);

        let shaded = render_with_workers(&with_sphere(top_down_scene(light, 64, 64)), 4).unwrap();
        assert!(in_shadow(&shaded) > 0);

        // The sphere itself is visible in the middle of the image
        assert_eq!(shaded.get(32, 32), Color::ONE);
    }

    #[test]
    fn test_worker_count_does_not_change_image() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scene = with_sphere(top_down_scene(DVec3::new(3.0, -2.0, 12.0), 37, 29));
        let single = render_with_workers(&scene, 1).unwrap();
        for workers in [2, 5, 8, 64] {
            let parallel = render_with_workers(&scene, workers).unwrap();
            assert_eq!(single.pixels, parallel.pixels, "workers = {}", workers);
        }
    }

    #[test]
    fn test_render_uses_settings_threads() {
        let scene = with_sphere(top_down_scene(DVec3::new(0.0, 0.0, 30.0), 8, 8));
        let image = render(&scene).unwrap();
        assert_eq!((image.width, image.height), (8, 8));
    }

    #[test]
    fn test_empty_image_is_an_error() {
        let scene = top_down_scene(DVec3::new(0.0, 0.0, 30.0), 0, 10);
        assert!(matches!(
            render_with_workers(&scene, 2),
            Err(RenderError::EmptyImage { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut image = ImageBuffer::new(5, 2);
        image.set(4, 1, Color::new(1.0, 0.5, 0.0));
        image.save_png(&path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 2));
        assert_eq!(decoded.get_pixel(4, 1).0, [255, 127, 0]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
