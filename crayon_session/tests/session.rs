// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session lifecycle, background history persistence and PNG export.

use std::fs;

use chrono::NaiveDate;
use crayon_canvas::{Argb, DrawingSurface};
use crayon_session::{
    HistoryDocument, PALETTE, Session, SessionConfig, SessionError, export_png, load_image,
};
use crayon_touch::{TouchEvent, TouchPhase};
use kurbo::Point;
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

fn scribble(surface: &mut DrawingSurface, y: f64) {
    for (phase, x) in [
        (TouchPhase::Down, 1.0),
        (TouchPhase::Move, 4.0),
        (TouchPhase::Up, 9.0),
    ] {
        surface.handle_touch(&TouchEvent::single(phase, Point::new(x, y)));
    }
}

fn white(width: u32, height: u32) -> ImageData {
    ImageData {
        data: Blob::from(vec![255_u8; (width * height * 4) as usize]),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::Alpha,
        width,
        height,
    }
}

#[test]
fn history_survives_a_pause() {
    let cache = tempfile::tempdir().unwrap();
    let session = Session::open(cache.path(), SessionConfig::default()).unwrap();
    assert!(!session.recovered_stale());
    assert!(session.flag_path().exists());

    let mut surface = DrawingSurface::new();
    surface.set_brush_color(PALETTE[4].color);
    scribble(&mut surface, 2.0);
    scribble(&mut surface, 5.0);
    surface.undo();

    session
        .save_history(surface.serialize())
        .unwrap()
        .join()
        .unwrap()
        .unwrap();
    assert!(session.history_path().exists());

    let doc = session.load_history().unwrap().join().unwrap().unwrap();
    let mut resumed = DrawingSurface::new();
    resumed.restore(doc.unwrap()).unwrap();
    assert_eq!(resumed.strokes(), surface.strokes());
    assert_eq!(resumed.undone(), surface.undone());
    assert_eq!(resumed.strokes()[0].color(), Argb(0xFFA3_63D9));
}

#[test]
fn missing_history_loads_as_none() {
    let cache = tempfile::tempdir().unwrap();
    let session = Session::open(cache.path(), SessionConfig::default()).unwrap();
    let loaded = session.load_history().unwrap().join().unwrap().unwrap();
    assert!(loaded.is_none());
}

#[test]
fn corrupt_history_is_reported() {
    let cache = tempfile::tempdir().unwrap();
    let session = Session::open(cache.path(), SessionConfig::default()).unwrap();
    fs::create_dir_all(session.history_dir()).unwrap();
    fs::write(session.history_path(), "{\"strokes\": [{]").unwrap();

    let loaded = session.load_history().unwrap().join().unwrap();
    assert!(matches!(loaded, Err(SessionError::Document(_))));
}

#[test]
fn stale_session_history_is_discarded() {
    let cache = tempfile::tempdir().unwrap();
    let config = SessionConfig::default();

    // A session that was killed without `end`.
    let crashed = Session::open(cache.path(), config.clone()).unwrap();
    crashed
        .save_history(HistoryDocument::default())
        .unwrap()
        .join()
        .unwrap()
        .unwrap();
    let history = crashed.history_path();
    drop(crashed);
    assert!(history.exists());

    let session = Session::open(cache.path(), config).unwrap();
    assert!(session.recovered_stale());
    assert!(!history.exists());
    assert!(session.flag_path().exists());
}

#[test]
fn clean_end_removes_marker_and_history() {
    let cache = tempfile::tempdir().unwrap();
    let session = Session::open(cache.path(), SessionConfig::default()).unwrap();
    session
        .save_history(HistoryDocument::default())
        .unwrap()
        .join()
        .unwrap()
        .unwrap();
    let flag = session.flag_path();
    let dir = session.history_dir();

    session.end().unwrap();
    assert!(!flag.exists());
    assert!(!dir.exists());

    let next = Session::open(cache.path(), SessionConfig::default()).unwrap();
    assert!(!next.recovered_stale());
}

#[test]
fn exported_picture_reloads_with_the_ink() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut surface = DrawingSurface::new();
    surface.set_base_image(white(12, 12));
    surface.set_brush_color(Argb::BLACK);
    surface.set_brush_size(4.0);
    scribble(&mut surface, 6.0);

    let flat = surface.flatten().unwrap();
    let at = NaiveDate::from_ymd_opt(2025, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 58)
        .unwrap();
    let path = export_png(&flat, out_dir.path(), "ArtAttack", at).unwrap();
    assert_eq!(path.file_name().unwrap(), "ArtAttack_20251231_235958.png");

    let back = load_image(&path).unwrap();
    assert_eq!((back.width, back.height), (12, 12));
    assert_eq!(back.data.data(), flat.data.data());
}

#[test]
fn export_rejects_short_pixel_buffers() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut image = white(4, 4);
    image.data = Blob::from(vec![0_u8; 8]);
    let at = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = export_png(&image, out_dir.path(), "ArtAttack", at).unwrap_err();
    assert!(matches!(err, SessionError::UnsupportedImage { .. }));
}
