//! GL-facing half of the crate: state caching, shader program
//! construction, and the pyramid's GPU resources.

mod buffer;
mod context;
mod program;
mod pyramid;
mod renderer;

pub use context::GlState;
pub use pyramid::{Pyramid, Vertex};
pub use renderer::{Drawable, RenderContext, Renderer};
