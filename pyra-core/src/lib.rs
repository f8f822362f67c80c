//! Platform-agnostic rendering core for a rotating colored pyramid.
//!
//! All GPU work goes through [`glow`], so the crate runs against any
//! OpenGL 3.3 core or OpenGL ES 3.0 context a front end provides. The
//! front end owns the window, the context, and the frame clock; this
//! crate owns the shader program, the geometry, and the per-frame
//! transform math.

pub mod error;
pub mod gl;
mod mat4;
mod transform;

pub use error::Error;
pub use gl::{Drawable, GlState, Pyramid, RenderContext, Renderer};
pub use mat4::Mat4;
pub use transform::{Transforms, rotation_angle_deg};

/// GL shader language target for version injection.
///
/// Shader sources are stored without a `#version` line; the preamble for
/// the active target is prepended at program build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslVersion {
    /// WebGL2 / OpenGL ES 3.0: `#version 300 es`
    Es300,
    /// OpenGL 3.3 Core: `#version 330 core`
    Gl330,
}

impl GlslVersion {
    /// Preamble prepended to vertex shader sources.
    pub fn vertex_preamble(&self) -> &'static str {
        match self {
            Self::Es300 => "#version 300 es\nprecision highp float;\n",
            Self::Gl330 => "#version 330 core\n",
        }
    }

    /// Preamble prepended to fragment shader sources.
    pub fn fragment_preamble(&self) -> &'static str {
        match self {
            Self::Es300 => "#version 300 es\nprecision mediump float;\n",
            Self::Gl330 => "#version 330 core\n",
        }
    }
}
