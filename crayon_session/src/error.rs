// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::{Path, PathBuf};

use crayon_canvas::DocumentError;

/// Errors produced by session file handling.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A file system operation failed.
    #[error("{op} `{}`: {source}", path.display())]
    Io {
        /// What was being attempted.
        op: &'static str,
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The history file exists but could not be decoded.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// A picture could not be decoded or encoded.
    #[error(transparent)]
    Image(#[from] image::ImageError),
    /// The pixel data is not straight-alpha RGBA8 of the stated size.
    #[error("unsupported pixel layout for a {width}x{height} image")]
    UnsupportedImage {
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
    },
    /// A background worker thread could not be started.
    #[error("cannot start worker thread: {0}")]
    Spawn(#[source] io::Error),
}

pub(crate) fn io_err(op: &'static str, path: &Path) -> impl FnOnce(io::Error) -> SessionError {
    let path = path.to_path_buf();
    move |source| SessionError::Io { op, path, source }
}
