// Asset adapter: loads PNG sprites from disk, with a placeholder fallback.

use crate::domain::{AssetError, AssetLoader, LoadedAsset, Rect, Sprite, Vec2};
use image::ImageError;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads `<root>/<path>` and scales it exactly to the requested size.
#[derive(Debug, Clone)]
pub struct ImageAssetLoader {
    root: PathBuf,
}

impl ImageAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetLoader for ImageAssetLoader {
    fn load(
        &self,
        position: Vec2,
        width: u32,
        height: u32,
        path: &str,
    ) -> Result<LoadedAsset, AssetError> {
        let full_path = self.root.join(path);
        let image = image::open(&full_path).map_err(|e| match e {
            ImageError::IoError(io) => AssetError::Open {
                path: full_path.clone(),
                reason: io.to_string(),
            },
            other => AssetError::Decode {
                path: full_path.clone(),
                reason: other.to_string(),
            },
        })?;
        let pixels = image
            .resize_exact(width, height, FilterType::Nearest)
            .to_rgba8();
        debug!(path = %full_path.display(), width, height, "sprite loaded");

        Ok(LoadedAsset {
            sprite: Sprite::new(path, pixels),
            rect: Rect::centered(position, width as f32, height as f32),
        })
    }
}

/// Wraps a loader and substitutes a solid placeholder when loading fails.
#[derive(Debug, Clone)]
pub struct FallbackAssetLoader<L> {
    primary: L,
}

impl<L> FallbackAssetLoader<L> {
    pub fn new(primary: L) -> Self {
        Self { primary }
    }
}

impl<L: AssetLoader> AssetLoader for FallbackAssetLoader<L> {
    fn load(
        &self,
        position: Vec2,
        width: u32,
        height: u32,
        path: &str,
    ) -> Result<LoadedAsset, AssetError> {
        self.primary
            .load(position, width, height, path)
            .or_else(|e| {
                warn!(error = %e, path, "using placeholder sprite");
                Ok(placeholder(position, width, height, path))
            })
    }
}

/// Solid-colour sprite whose colour is derived from `label`, so different
/// assets stay distinguishable on screen.
pub fn placeholder(position: Vec2, width: u32, height: u32, label: &str) -> LoadedAsset {
    let hash = label
        .bytes()
        .fold(0x811c_9dc5_u32, |acc, b| (acc ^ u32::from(b)).wrapping_mul(0x0100_0193));
    let [r, g, b, _] = hash.to_le_bytes();
    LoadedAsset {
        sprite: Sprite::solid(label, width, height, [r, g, b, 255]),
        rect: Rect::centered(position, width as f32, height as f32),
    }
}
