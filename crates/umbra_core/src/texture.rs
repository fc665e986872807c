//! Texture loading, caching and sampling.
//!
//! Textures are decoded once, stored as RGB floats and shared between
//! primitives through `Arc` handles. Sampling is a pure read, so a texture
//! can be queried from every render thread at once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to open texture {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels or a size mismatch")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Decoded RGB image used to color primitives.
#[derive(Clone, Debug)]
pub struct Texture {
    pub width: u32,
    pub height: u32,

    /// RGB in [0, 1], row-major, top row first
    pub pixels: Vec<[f64; 3]>,

    /// Where the texture came from, for logs
    pub path: String,
}

impl Texture {
    /// Wrap raw pixels. Fails if the buffer does not match the size.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<[f64; 3]>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(TextureError::Empty(path));
        }
        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Single texel texture, handy for tests and flat procedural surfaces.
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color.to_array()],
            path: "<solid>".to_string(),
        }
    }

    /// Bilinear lookup at fractional coordinates.
    ///
    /// Coordinates are divided by `scale` and wrapped into [0, 1), so the
    /// image repeats every `scale` units. A non-positive scale counts as 1.
    /// `v = 0` is the bottom row.
    pub fn sample(&self, u: f64, v: f64, scale: f64) -> Color {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let u = (u / scale).rem_euclid(1.0);
        let v = (v / scale).rem_euclid(1.0);

        let x = u * (self.width - 1) as f64;
        let y = (1.0 - v) * (self.height - 1) as f64;

        let (x0, y0) = (x.floor() as u32, y.floor() as u32);
        let (x1, y1) = ((x0 + 1).min(self.width - 1), (y0 + 1).min(self.height - 1));
        let (fx, fy) = (x.fract(), y.fract());

        let upper = self.texel(x0, y0).lerp(self.texel(x1, y0), fx);
        let lower = self.texel(x0, y1).lerp(self.texel(x1, y1), fx);
        upper.lerp(lower, fy)
    }

    fn texel(&self, x: u32, y: u32) -> Color {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels
            .get(index)
            .map_or(Color::ZERO, |&rgb| Color::from_array(rgb))
    }

    /// Approximate memory held by the pixels.
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of_val(self.pixels.as_slice())
    }
}

/// Loaded textures keyed by resolved path.
///
/// Primitives naming the same file share one decoded copy.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<PathBuf, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the texture at `path`, decoding it on first use.
    pub fn load(&mut self, path: &Path) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(Arc::clone(texture));
        }

        let texture = Arc::new(decode(path)?);
        log::debug!(
            "Loaded texture {} ({}x{}, {:.1} KB)",
            path.display(),
            texture.width,
            texture.height,
            texture.size_bytes() as f64 / 1024.0
        );
        self.textures.insert(path.to_path_buf(), Arc::clone(&texture));

        Ok(texture)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Decode an image file into RGB floats. Colors are taken as stored, with no
/// gamma conversion.
fn decode(path: &Path) -> TextureResult<Texture> {
    let rgb = image::open(path)
        .map_err(|source| TextureError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let (width, height) = rgb.dimensions();
    let pixels = rgb
        .pixels()
        .map(|p| p.0.map(|c| c as f64 / 255.0))
        .collect();

    Texture::from_pixels(width, height, pixels, path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // Top row: red, green. Bottom row: blue, white.
        Texture::from_pixels(
            2,
            2,
            vec![
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
            ],
            "checker",
        )
        .unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Color::new(1.0, 0.5, 0.0));
        assert_eq!((tex.width, tex.height), (1, 1));

        for (u, v) in [(0.0, 0.0), (0.5, 0.5), (-3.2, 7.9)] {
            assert_eq!(tex.sample(u, v, 1.0), Color::new(1.0, 0.5, 0.0));
        }
    }

    #[test]
    fn test_sample_corners() {
        let tex = checker();
        // v = 0 is the bottom row
        assert_eq!(tex.sample(0.0, 0.0, 1.0), Color::new(0.0, 0.0, 1.0));
        let top_right = tex.sample(0.999_999, 0.999_999, 1.0);
        assert!((top_right - Color::new(0.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_sample_blends_between_texels() {
        let tex = checker();
        let middle = tex.sample(0.5, 0.5, 1.0);
        assert!((middle - Color::new(0.5, 0.5, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_sample_wraps() {
        let tex = checker();
        assert_eq!(tex.sample(1.0, 0.0, 1.0), tex.sample(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(-2.0, 3.0, 1.0), tex.sample(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_sample_scale_tiles() {
        let tex = checker();
        // With scale 4, coordinate 2.0 is the middle of the first tile.
        assert_eq!(tex.sample(2.0, 2.0, 4.0), tex.sample(0.5, 0.5, 1.0));
        // Non-positive scale falls back to 1.
        assert_eq!(tex.sample(0.25, 0.25, 0.0), tex.sample(0.25, 0.25, 1.0));
    }

    #[test]
    fn test_from_pixels_rejects_mismatch() {
        assert!(Texture::from_pixels(2, 2, vec![[0.0; 3]], "bad").is_err());
        assert!(Texture::from_pixels(0, 0, Vec::new(), "empty").is_err());
    }

    #[test]
    fn test_texture_cache_shares_handles() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripe.png");
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let mut cache = TextureCache::new();
        assert!(cache.is_empty());

        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        assert_eq!((first.width, first.height), (2, 1));
        assert_eq!(first.sample(0.0, 0.0, 1.0), Color::new(1.0, 0.0, 0.0));
        assert_eq!(first.size_bytes(), 2 * 24);
    }

    #[test]
    fn test_texture_cache_missing_file() {
        let mut cache = TextureCache::new();
        let err = cache.load(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, TextureError::Open { .. }));
        assert!(cache.is_empty());
    }
}
