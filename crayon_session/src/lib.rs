// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crayon Session: the file side of a drawing screen.
//!
//! - [`Session`] keeps the undo/redo history across interruptions. Saves and
//!   loads run on worker threads over owned [`HistoryDocument`] snapshots.
//! - A session marker detects sessions that ended uncleanly; their history
//!   is discarded on the next [`Session::open`].
//! - [`load_image`] and [`export_png`] move pictures in and out as PNG.
//! - [`PALETTE`] and [`BRUSH_SIZES`] are the brush presets offered to users.
//!
//! ```no_run
//! use crayon_canvas::DrawingSurface;
//! use crayon_session::{Session, SessionConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::open("/tmp/crayon-cache", SessionConfig::default())?;
//! let mut surface = DrawingSurface::new();
//!
//! // Going to the background: snapshot on the UI thread, write elsewhere.
//! let pending = session.save_history(surface.serialize())?;
//! pending.join().expect("save worker panicked")?;
//!
//! // Coming back: parse elsewhere, apply on the UI thread.
//! if let Some(doc) = session.load_history()?.join().expect("load worker panicked")? {
//!     surface.restore(doc)?;
//! }
//! session.end()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod picture;
mod presets;
mod session;

pub use config::SessionConfig;
pub use crayon_canvas::HistoryDocument;
pub use error::SessionError;
pub use picture::{export_file_name, export_png, load_image};
pub use presets::{BRUSH_SIZES, BrushPreset, ColorPreset, PALETTE};
pub use session::Session;
