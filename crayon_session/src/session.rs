// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use chrono::Local;
use crayon_canvas::HistoryDocument;
use peniko::ImageData;

use crate::config::SessionConfig;
use crate::error::{SessionError, io_err};
use crate::picture::export_png;

/// A drawing session rooted in a cache directory.
///
/// While a session is open, a marker file sits in the cache directory. A
/// marker found at [`Session::open`] means the previous session never ended
/// cleanly, so its saved history is thrown away instead of restored.
///
/// History saves and loads run on worker threads and work on owned
/// snapshots, so the drawing surface is never touched off its own thread.
#[derive(Debug)]
pub struct Session {
    cache_dir: PathBuf,
    config: SessionConfig,
    recovered_stale: bool,
}

impl Session {
    /// Opens a session in `cache_dir`, clearing leftovers of a session that
    /// did not end cleanly, and writes the session marker.
    pub fn open(
        cache_dir: impl Into<PathBuf>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let cache_dir = cache_dir.into();
        let mut session = Self {
            cache_dir,
            config,
            recovered_stale: false,
        };

        let flag = session.flag_path();
        if flag.exists() {
            log::warn!(
                "previous session did not end cleanly, discarding {}",
                session.history_dir().display()
            );
            remove_dir_if_present(&session.history_dir())?;
            fs::remove_file(&flag)
                .map_err(io_err("remove session flag", &flag))?;
            session.recovered_stale = true;
        }

        fs::create_dir_all(&session.cache_dir)
            .map_err(io_err("create cache directory", &session.cache_dir))?;
        fs::write(&flag, "active")
            .map_err(io_err("write session flag", &flag))?;
        log::debug!("session opened in {}", session.cache_dir.display());
        Ok(session)
    }

    /// Returns `true` if opening this session discarded a stale history.
    #[must_use]
    pub fn recovered_stale(&self) -> bool {
        self.recovered_stale
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Directory holding the history file.
    #[must_use]
    pub fn history_dir(&self) -> PathBuf {
        self.cache_dir.join(&self.config.history_dir_name)
    }

    /// Path of the history file.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.history_dir().join(&self.config.history_file)
    }

    /// Path of the session marker.
    #[must_use]
    pub fn flag_path(&self) -> PathBuf {
        self.cache_dir.join(&self.config.session_flag)
    }

    /// Writes `doc` to the history file on a worker thread.
    ///
    /// Take the snapshot with `DrawingSurface::serialize` on the UI thread
    /// and hand it over by value. The file is replaced atomically.
    pub fn save_history(
        &self,
        doc: HistoryDocument,
    ) -> Result<JoinHandle<Result<(), SessionError>>, SessionError> {
        let dir = self.history_dir();
        let path = self.history_path();
        thread::Builder::new()
            .name("crayon-history-save".into())
            .spawn(move || write_history(&dir, &path, &doc))
            .map_err(SessionError::Spawn)
    }

    /// Reads and parses the history file on a worker thread.
    ///
    /// Resolves to `Ok(None)` when there is no saved history. Apply the
    /// result with `DrawingSurface::restore` back on the UI thread.
    pub fn load_history(
        &self,
    ) -> Result<JoinHandle<Result<Option<HistoryDocument>, SessionError>>, SessionError> {
        let path = self.history_path();
        thread::Builder::new()
            .name("crayon-history-load".into())
            .spawn(move || read_history(&path))
            .map_err(SessionError::Spawn)
    }

    /// Exports a flattened picture into `dir`, stamped with the local time.
    pub fn export(&self, image: &ImageData, dir: &Path) -> Result<PathBuf, SessionError> {
        let now = Local::now().naive_local();
        export_png(image, dir, &self.config.export_prefix, now)
    }

    /// Ends the session cleanly: removes the marker and the saved history.
    pub fn end(self) -> Result<(), SessionError> {
        let flag = self.flag_path();
        match fs::remove_file(&flag) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(io_err("remove session flag", &flag)(err)),
        }
        remove_dir_if_present(&self.history_dir())?;
        log::debug!("session in {} ended", self.cache_dir.display());
        Ok(())
    }
}

fn write_history(dir: &Path, path: &Path, doc: &HistoryDocument) -> Result<(), SessionError> {
    let text = doc.to_json()?;
    fs::create_dir_all(dir).map_err(io_err("create history directory", dir))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).map_err(io_err("write history", &tmp))?;
    fs::rename(&tmp, path).map_err(io_err("replace history", path))?;
    log::debug!("saved {} strokes to {}", doc.len(), path.display());
    Ok(())
}

fn read_history(path: &Path) -> Result<Option<HistoryDocument>, SessionError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("no saved history at {}", path.display());
            return Ok(None);
        }
        Err(err) => return Err(io_err("read history", path)(err)),
    };
    let doc = HistoryDocument::from_json(&text).inspect_err(|err| {
        log::warn!("ignoring unreadable history at {}: {err}", path.display());
    })?;
    Ok(Some(doc))
}

fn remove_dir_if_present(dir: &Path) -> Result<(), SessionError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err("remove directory", dir)(err)),
    }
}
