use glow::HasContext;

use crate::gl::context::GlState;

/// Rendering context that provides access to GL state.
pub struct RenderContext<'a> {
    /// Raw GL function table.
    pub gl: &'a glow::Context,
    /// Cached GL state.
    pub state: &'a mut GlState,
}

/// Trait for objects that can be rendered.
pub trait Drawable {
    /// Prepares the object for rendering.
    ///
    /// This method should set up all necessary GL state, bind shaders and
    /// vertex data, and upload any per-frame uniforms.
    fn prepare(&self, context: &mut RenderContext);

    /// Performs the actual rendering.
    ///
    /// This method should issue draw calls. All necessary state should
    /// already be set up from the `prepare()` call.
    fn draw(&self, context: &mut RenderContext);

    /// Cleans up after rendering.
    ///
    /// This method should unbind any resources that were bound during
    /// `prepare()` so subsequent operations start from a clean slate.
    fn cleanup(&self, context: &mut RenderContext);
}

/// Per-surface rendering front: viewport bookkeeping and frame setup.
///
/// The renderer does not own the GL context; the windowing layer passes
/// it in. It does own the state cache and the current surface size, which
/// the transform pipeline reads for its aspect ratio.
#[derive(Debug)]
pub struct Renderer {
    state: GlState,
    surface_size: (i32, i32),
}

impl Renderer {
    /// Creates a renderer for a surface of `size` physical pixels and
    /// points the viewport at it.
    pub fn new(gl: &glow::Context, size: (i32, i32)) -> Self {
        let mut renderer = Self { state: GlState::new(), surface_size: (0, 0) };
        renderer.resize(gl, size.0, size.1);
        renderer
    }

    /// Updates the stored dimensions and the viewport.
    ///
    /// Zero-area sizes are stored and applied like any other; the frame
    /// simply renders nothing. Repeated identical calls do not re-issue
    /// the viewport change.
    pub fn resize(&mut self, gl: &glow::Context, width: i32, height: i32) {
        self.surface_size = (width, height);
        self.state.viewport(gl, 0, 0, width, height);
    }

    /// Current surface size in physical pixels.
    pub fn surface_size(&self) -> (i32, i32) {
        self.surface_size
    }

    /// Starts a frame: depth testing on, color and depth buffers cleared.
    pub fn begin_frame(&mut self, gl: &glow::Context) {
        self.state.depth_test(gl, true);
        self.state.clear_color(gl, 0.0, 0.0, 0.0, 1.0);
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Renders a drawable object.
    ///
    /// Calls the drawable's prepare, draw, and cleanup methods in
    /// sequence, providing it with a render context.
    pub fn render(&mut self, gl: &glow::Context, drawable: &impl Drawable) {
        let mut context = RenderContext { gl, state: &mut self.state };

        drawable.prepare(&mut context);
        drawable.draw(&mut context);
        drawable.cleanup(&mut context);
    }
}
