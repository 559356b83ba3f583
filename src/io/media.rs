// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Board image loading.
//!
//! This module decodes board photographs and converts them to RGBA pixel
//! data suitable for display in egui.

use anyhow::{Context, Result};
use std::path::Path;

/// Image file extensions offered in file dialogs.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// A decoded image in RGBA8 layout.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        anyhow::bail!("Image {} has no pixels", path.display());
    }
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}
