// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted drawing session, without a window.
//!
//! Plays a fixed sequence of touches against a zoom controller and a drawing
//! surface wired the way an app screen wires them, persists the history
//! through a session and exports the flattened picture as PNG.
//!
//! ```text
//! RUST_LOG=debug cargo run -p crayon_demos --bin scripted_session -- [picture.png] [out-dir]
//! ```

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, anyhow, ensure};
use crayon_canvas::DrawingSurface;
use crayon_imaging_ref::RefBackend;
use crayon_session::{BRUSH_SIZES, PALETTE, Session, SessionConfig, load_image};
use crayon_touch::{Routing, TouchEvent, TouchPhase, TouchTarget, dispatch};
use crayon_view::ZoomController;
use kurbo::{Affine, Point, Size};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

const VIEWPORT: Size = Size::new(800.0, 600.0);

/// One drawing screen: the controller owns the transform and the surface
/// receives every change after each input event.
struct Screen {
    zoom: ZoomController,
    surface: DrawingSurface,
    pending: Rc<Cell<Option<Affine>>>,
}

impl Screen {
    fn new() -> Self {
        let pending = Rc::new(Cell::new(None));
        let sink = pending.clone();
        let mut zoom = ZoomController::default();
        zoom.set_listener(move |xf| sink.set(Some(xf)));
        Self {
            zoom,
            surface: DrawingSurface::new(),
            pending,
        }
    }

    fn show_picture(&mut self, image: ImageData) {
        let size = Size::new(f64::from(image.width), f64::from(image.height));
        self.surface.set_base_image(image);
        self.zoom.fit_to_viewport(size, VIEWPORT);
        self.sync();
    }

    fn touch(&mut self, phase: TouchPhase, points: &[Point]) -> Routing {
        let event = TouchEvent::new(phase, points.iter().copied());
        let surface: &mut dyn TouchTarget = &mut self.surface;
        let routing = dispatch(&event, &mut [surface, &mut self.zoom]);
        self.sync();
        routing
    }

    fn sync(&mut self) {
        if let Some(xf) = self.pending.take() {
            self.surface.set_transform(xf);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, steps: u32) {
        self.touch(TouchPhase::Down, &[from]);
        for i in 1..steps {
            let t = f64::from(i) / f64::from(steps);
            self.touch(TouchPhase::Move, &[from.lerp(to, t)]);
        }
        self.touch(TouchPhase::Up, &[to]);
    }

    fn pinch(&mut self, center: Point, from_span: f64, to_span: f64) {
        let fingers = |span: f64| {
            [
                center - (span / 2.0, 0.0),
                center + (span / 2.0, 0.0),
            ]
        };
        self.touch(TouchPhase::PointerDown, &fingers(from_span));
        for i in 1..=8 {
            let span = from_span + (to_span - from_span) * f64::from(i) / 8.0;
            self.touch(TouchPhase::Move, &fingers(span));
        }
        self.touch(TouchPhase::PointerUp, &fingers(to_span));
    }

    fn frame(&mut self) {
        if !self.surface.take_redraw_request() {
            return;
        }
        let mut backend = RefBackend::default();
        self.surface.render(&mut backend);
        log::debug!(
            "frame: {} ops at scale {:.2}",
            backend.ops().len(),
            self.zoom.scale()
        );
    }
}

fn checkerboard(width: u32, height: u32) -> ImageData {
    let mut bytes = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let light = ((x / 32) + (y / 32)) % 2 == 0;
            let v = if light { 0xF4 } else { 0xDD };
            bytes.extend_from_slice(&[v, v, v, 0xFF]);
        }
    }
    ImageData {
        data: Blob::from(bytes),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::Alpha,
        width,
        height,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let picture = args.next().map(PathBuf::from);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "crayon-out".into()));
    let cache_dir = std::env::temp_dir().join("crayon-demo-cache");

    let session = Session::open(&cache_dir, SessionConfig::default())
        .with_context(|| format!("opening session in {}", cache_dir.display()))?;
    if session.recovered_stale() {
        log::info!("discarded history from a session that did not end cleanly");
    }

    let base = match &picture {
        Some(path) => load_image(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => checkerboard(640, 480),
    };

    let mut screen = Screen::new();
    screen.show_picture(base);
    screen.frame();

    screen.surface.set_brush_color(PALETTE[1].color);
    screen.surface.set_brush_size(BRUSH_SIZES[2].width);
    screen.draw_line(Point::new(120.0, 150.0), Point::new(600.0, 420.0), 12);
    screen.frame();

    screen.pinch(Point::new(400.0, 300.0), 120.0, 300.0);
    screen.frame();

    screen.surface.set_brush_color(PALETTE[4].color);
    screen.surface.set_brush_size(BRUSH_SIZES[0].width);
    screen.draw_line(Point::new(200.0, 500.0), Point::new(650.0, 90.0), 20);
    screen.draw_line(Point::new(100.0, 100.0), Point::new(700.0, 120.0), 6);
    ensure!(screen.surface.undo(), "nothing to undo");
    screen.frame();

    // Background, then foreground: round-trip the history through the session.
    let snapshot = screen.surface.serialize();
    session
        .save_history(snapshot)?
        .join()
        .map_err(|_| anyhow!("history save worker panicked"))??;

    let loaded = session
        .load_history()?
        .join()
        .map_err(|_| anyhow!("history load worker panicked"))??
        .context("history file vanished")?;
    let mut resumed = DrawingSurface::new();
    resumed.restore(loaded)?;
    ensure!(
        resumed.strokes() == screen.surface.strokes()
            && resumed.undone() == screen.surface.undone(),
        "restored history differs"
    );
    log::info!(
        "history restored: {} strokes, {} undone",
        resumed.strokes().len(),
        resumed.undone().len()
    );

    let flat = screen
        .surface
        .flatten()
        .context("the picture is too large to flatten")?;
    let path = session.export(&flat, &out_dir)?;
    println!("wrote {}", path.display());

    session.end()?;
    Ok(())
}
