// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PNG import and export of pictures.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

use crate::error::{SessionError, io_err};

/// Decodes a picture file into straight-alpha RGBA8 image data.
pub fn load_image(path: &Path) -> Result<ImageData, SessionError> {
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("loaded {width}x{height} picture from {}", path.display());
    Ok(ImageData {
        data: Blob::from(rgba.into_raw()),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::Alpha,
        width,
        height,
    })
}

/// Name of a picture exported at `at`: `<prefix>_<yyyyMMdd_HHmmss>.png`.
#[must_use]
pub fn export_file_name(prefix: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `image` as a PNG into `dir`, named after `prefix` and `at`.
///
/// The directory is created if needed. Returns the path written.
pub fn export_png(
    image: &ImageData,
    dir: &Path,
    prefix: &str,
    at: NaiveDateTime,
) -> Result<PathBuf, SessionError> {
    let unsupported = || SessionError::UnsupportedImage {
        width: image.width,
        height: image.height,
    };
    if image.format != ImageFormat::Rgba8 || image.alpha_type != ImageAlphaType::Alpha {
        return Err(unsupported());
    }
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.data.data().to_vec())
        .ok_or_else(unsupported)?;

    std::fs::create_dir_all(dir).map_err(io_err("create directory", dir))?;
    let path = dir.join(export_file_name(prefix, at));
    buffer.save_with_format(&path, image::ImageFormat::Png)?;
    log::info!("exported picture to {}", path.display());
    Ok(path)
}
