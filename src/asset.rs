//! Obstacle image loading.
//!
//! The image is decoded once and shrunk to a small texel grid; the terminal
//! renderer samples that grid per cell.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::error::AssetError;

/// Edge length of the downsampled texel grid.
pub const TEXTURE_SIZE: u32 = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleTexture {
    width: u32,
    height: u32,
    texels: Vec<[u8; 3]>,
}

impl ObstacleTexture {
    /// Build a texture from row-major RGB texels.
    pub fn from_texels(width: u32, height: u32, texels: Vec<[u8; 3]>) -> Result<Self, AssetError> {
        let expected = (width as usize).checked_mul(height as usize);
        if width == 0 || height == 0 || expected != Some(texels.len()) {
            return Err(AssetError::Empty);
        }
        Ok(ObstacleTexture { width, height, texels })
    }

    /// Decode an image file and downsample it to `TEXTURE_SIZE` squared.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let rgb = image::open(path)?.to_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(AssetError::Empty);
        }
        let small = imageops::resize(&rgb, TEXTURE_SIZE, TEXTURE_SIZE, FilterType::Triangle);
        let texels = small.pixels().map(|p| p.0).collect();
        Self::from_texels(TEXTURE_SIZE, TEXTURE_SIZE, texels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel at normalised `(u, v)`; out-of-range inputs are clamped.
    pub fn sample(&self, u: f64, v: f64) -> [u8; 3] {
        let col = ((u.clamp(0.0, 1.0) * self.width as f64) as u32).min(self.width - 1);
        let row = ((v.clamp(0.0, 1.0) * self.height as f64) as u32).min(self.height - 1);
        self.texels[(row * self.width + col) as usize]
    }
}

pub type LoadResult = Result<ObstacleTexture, AssetError>;

/// Load `path` on a background thread.  The returned receiver yields exactly
/// one result; if the thread dies first the channel disconnects instead.
pub fn spawn_loader(path: PathBuf) -> mpsc::Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        debug!(path = %path.display(), "loading obstacle image");
        let _ = tx.send(ObstacleTexture::load(&path));
    });
    rx
}
