//! Native front end: opens the window, owns the event loop and the frame
//! clock, and drives the core renderer once per display refresh.

mod cli;
mod window;

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Context as _, Report, Result};
use pyra_core::{GlslVersion, Pyramid, Renderer, Transforms};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use crate::{cli::Cli, window::GlWindow};

fn main() -> Result<()> {
    // panic hook
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pyra starting up");

    let event_loop = EventLoop::new().wrap_err("failed to create event loop")?;
    let mut app = App::new(cli);
    event_loop.run_app(&mut app).wrap_err("event loop failed")?;

    // a startup failure inside the loop surfaces here, after the loop has
    // wound down, so the process still exits non-zero with a report
    match app.startup_error {
        Some(report) => Err(report),
        None => Ok(()),
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

struct App {
    cli: Cli,
    state: Option<AppState>,
    startup_error: Option<Report>,
}

/// Everything the event loop owns once startup succeeded.
///
/// Single-threaded by construction: the loop thread is the only writer
/// and the only reader of all of this.
struct AppState {
    win: GlWindow,
    renderer: Renderer,
    pyramid: Pyramid,
    started: Instant,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self { cli, state: None, startup_error: None }
    }

    /// One-time startup: window + context, then shader program and
    /// geometry, in that order, before the first frame.
    fn init(&self, event_loop: &ActiveEventLoop) -> Result<AppState> {
        let win = GlWindow::new(
            event_loop,
            &self.cli.title,
            (self.cli.width, self.cli.height),
            !self.cli.no_vsync,
        )?;
        tracing::debug!(size = ?win.physical_size(), "GL context up");

        let renderer = Renderer::new(&win.gl, win.physical_size());
        let pyramid = Pyramid::create(&win.gl, GlslVersion::Gl330, renderer.surface_size())
            .wrap_err("failed to create pyramid resources")?;
        tracing::debug!("shader program linked, geometry uploaded");

        Ok(AppState { win, renderer, pyramid, started: Instant::now() })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(report) => {
                tracing::error!("startup failed: {report:#}");
                self.startup_error = Some(report);
                event_loop.exit();
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            // release GPU resources exactly once, then leave the loop
            if let Some(state) = self.state.take() {
                state.pyramid.delete(&state.win.gl);
            }
            tracing::info!("window closed, shutting down");
            event_loop.exit();
            return;
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                // dimensions and viewport always track the event; the
                // surface itself cannot go zero-area
                state.win.resize_surface(new_size);
                state.renderer.resize(
                    &state.win.gl,
                    new_size.width as i32,
                    new_size.height as i32,
                );
                tracing::trace!(width = new_size.width, height = new_size.height, "resized");
            },
            WindowEvent::RedrawRequested => {
                state.render_frame();
            },
            _ => {},
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // continuous animation: schedule the next frame unconditionally,
        // independent of what the draw itself did
        if let Some(state) = self.state.as_ref() {
            state.win.window.request_redraw();
        }
    }
}

impl AppState {
    fn render_frame(&mut self) {
        // the angle is a pure function of elapsed time, never integrated
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1_000.0;
        let transforms = Transforms::compute(elapsed_ms as f32, self.renderer.surface_size());
        self.pyramid.set_transforms(transforms);

        self.renderer.begin_frame(&self.win.gl);
        self.renderer.render(&self.win.gl, &self.pyramid);
        self.win.swap_buffers();
    }
}
