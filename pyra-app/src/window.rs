//! glutin / winit plumbing: one window, one double-buffered RGBA+depth
//! surface, one OpenGL 3.3 core context, loaded into a [`glow::Context`].

use std::num::NonZeroU32;

use color_eyre::eyre::{Context as _, ContextCompat, Result, eyre};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::{
    dpi::LogicalSize,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

/// The native window together with its current GL context, surface, and
/// loaded function table.
///
/// The thread that creates a `GlWindow` owns the context; all GL work
/// must stay on it.
pub struct GlWindow {
    /// The winit window.
    pub window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    /// GL function table loaded from the context's display.
    pub gl: glow::Context,
}

impl GlWindow {
    /// Opens the window and brings up a current OpenGL 3.3 core context.
    ///
    /// This is the function-loading path: any failure here (no display,
    /// no matching config, context refused, missing entry points) aborts
    /// startup with a diagnostic.
    pub fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: (u32, u32),
        vsync: bool,
    ) -> Result<Self> {
        let window_attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(size.0, size.1));

        // double-buffered RGBA with a depth attachment
        let config_template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attrs))
            .build(event_loop, config_template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() { config } else { accum }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| eyre!("failed to build display: {e}"))?;

        let window = window.context("failed to create window")?;
        let gl_display = gl_config.display();

        let window_handle = window
            .window_handle()
            .map_err(|e| eyre!("failed to get window handle: {e}"))?;

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(window_handle.into()));

        let not_current_context = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .wrap_err("failed to create GL context")?;

        let inner = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window_handle.into(),
            NonZeroU32::new(inner.width).context("window width is zero")?,
            NonZeroU32::new(inner.height).context("window height is zero")?,
        );

        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .wrap_err("failed to create GL surface")?;

        let gl_context = not_current_context
            .make_current(&gl_surface)
            .wrap_err("failed to make GL context current")?;

        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        let _ = gl_surface.set_swap_interval(&gl_context, interval);

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        Ok(Self { window, gl_context, gl_surface, gl })
    }

    /// Current window size in physical pixels.
    pub fn physical_size(&self) -> (i32, i32) {
        let s = self.window.inner_size();
        (s.width as i32, s.height as i32)
    }

    /// Resizes the GL surface. Callers must skip zero-area sizes; the
    /// surface itself cannot represent them.
    pub fn resize_surface(&self, new_size: winit::dpi::PhysicalSize<u32>) {
        let (Some(width), Some(height)) =
            (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
    }

    /// Presents the completed frame.
    pub fn swap_buffers(&self) {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .expect("failed to swap buffers");
    }
}
