use std::mem::offset_of;

use glow::HasContext;

use crate::{
    GlslVersion,
    error::Error,
    gl::{
        Drawable, RenderContext,
        buffer::buffer_upload_array,
        program::ShaderProgram,
    },
    transform::Transforms,
};

/// A single interleaved mesh vertex.
///
/// # Memory Layout
/// 24 bytes per vertex:
/// - Bytes 0-11: position (3 x f32)
/// - Bytes 12-23: color (3 x f32)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Linear RGB color, interpolated across the triangle.
    pub color: [f32; 3],
}

const fn v(x: f32, y: f32, z: f32, r: f32, g: f32, b: f32) -> Vertex {
    Vertex { position: [x, y, z], color: [r, g, b] }
}

/// The square-base pyramid: 6 independent triangles over 5 corner points
/// (apex on top, base split along one diagonal), each face solid-colored.
#[rustfmt::skip]
const VERTICES: [Vertex; 18] = [
    // red side
    v(-0.5, -0.5, -0.5,  1.0, 0.0, 0.0),
    v( 0.5, -0.5, -0.5,  1.0, 0.0, 0.0),
    v( 0.0,  0.5,  0.0,  1.0, 0.0, 0.0),
    // green side
    v( 0.0,  0.5,  0.0,  0.0, 1.0, 0.0),
    v(-0.5, -0.5, -0.5,  0.0, 1.0, 0.0),
    v(-0.5, -0.5,  0.5,  0.0, 1.0, 0.0),
    // blue side
    v(-0.5, -0.5,  0.5,  0.0, 0.0, 1.0),
    v( 0.5, -0.5,  0.5,  0.0, 0.0, 1.0),
    v( 0.0,  0.5,  0.0,  0.0, 0.0, 1.0),
    // magenta side
    v( 0.0,  0.5,  0.0,  1.0, 0.0, 1.0),
    v( 0.5, -0.5,  0.5,  1.0, 0.0, 1.0),
    v( 0.5, -0.5, -0.5,  1.0, 0.0, 1.0),
    // yellow base, first half
    v( 0.5, -0.5, -0.5,  1.0, 1.0, 0.0),
    v(-0.5, -0.5, -0.5,  1.0, 1.0, 0.0),
    v(-0.5, -0.5,  0.5,  1.0, 1.0, 0.0),
    // yellow base, second half
    v( 0.5, -0.5, -0.5,  1.0, 1.0, 0.0),
    v(-0.5, -0.5,  0.5,  1.0, 1.0, 0.0),
    v( 0.5, -0.5,  0.5,  1.0, 1.0, 0.0),
];

const VERTEX_COUNT: i32 = VERTICES.len() as i32;

/// Vertex attribute locations, matching the `layout(location = N)`
/// declarations in the vertex shader.
mod attrib {
    pub(super) const POSITION: u32 = 0;
    pub(super) const COLOR: u32 = 1;
}

/// Uniform names resolved against the linked program. Part of the shader
/// interface; renaming them breaks the vertex stage.
const UNIFORM_MODEL: &str = "model";
const UNIFORM_VIEW: &str = "view";
const UNIFORM_PROJECTION: &str = "projection";

/// The rotating pyramid and its GPU resources.
///
/// Geometry is uploaded exactly once at creation; per frame only the
/// three transform uniforms change. The owning thread must be the one
/// that holds the GL context current.
#[derive(Debug)]
#[must_use = "call `delete(gl)` before dropping to avoid GPU resource leaks"]
pub struct Pyramid {
    gpu: GpuResources,
    transforms: Transforms,
}

/// GL-side resources: shader program, vertex array, vertex buffer, and
/// the cached uniform locations.
#[derive(Debug)]
struct GpuResources {
    shader: ShaderProgram,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    model_loc: glow::UniformLocation,
    view_loc: glow::UniformLocation,
    projection_loc: glow::UniformLocation,
}

impl GpuResources {
    const FRAGMENT_GLSL: &'static str = include_str!("../shaders/pyramid.frag");
    const VERTEX_GLSL: &'static str = include_str!("../shaders/pyramid.vert");

    fn new(gl: &glow::Context, glsl_version: GlslVersion) -> Result<Self, Error> {
        // Create and setup the Vertex Array Object
        let vao =
            unsafe { gl.create_vertex_array() }.map_err(Error::vertex_array_creation_failed)?;
        unsafe { gl.bind_vertex_array(Some(vao)) };

        let vbo = setup_vertex_buffer(gl)?;

        // Unbind VAO to prevent accidental modification
        unsafe { gl.bind_vertex_array(None) };

        // Setup shader with version-injected sources
        let vertex_source = format!("{}{}", glsl_version.vertex_preamble(), Self::VERTEX_GLSL);
        let fragment_source = format!(
            "{}{}",
            glsl_version.fragment_preamble(),
            Self::FRAGMENT_GLSL
        );
        let shader = ShaderProgram::create(gl, &vertex_source, &fragment_source)?;
        shader.use_program(gl);

        let model_loc = uniform_location(gl, shader.program, UNIFORM_MODEL)?;
        let view_loc = uniform_location(gl, shader.program, UNIFORM_VIEW)?;
        let projection_loc = uniform_location(gl, shader.program, UNIFORM_PROJECTION)?;

        Ok(Self { shader, vao, vbo, model_loc, view_loc, projection_loc })
    }

    fn delete(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
        self.shader.delete(gl);
    }
}

impl Pyramid {
    /// Uploads the pyramid geometry and builds its shader program.
    ///
    /// Runs once, before the first frame. `surface_size` seeds the
    /// initial transforms; the front end replaces them every frame via
    /// [`Pyramid::set_transforms`].
    ///
    /// # Errors
    /// Returns [`Error`] when a GL resource cannot be created, the
    /// program fails to link, or a transform uniform is missing from the
    /// linked program.
    pub fn create(
        gl: &glow::Context,
        glsl_version: GlslVersion,
        surface_size: (i32, i32),
    ) -> Result<Self, Error> {
        let gpu = GpuResources::new(gl, glsl_version)?;
        let transforms = Transforms::compute(0.0, surface_size);

        Ok(Self { gpu, transforms })
    }

    /// Replaces the transforms uploaded on the next render.
    pub fn set_transforms(&mut self, transforms: Transforms) {
        self.transforms = transforms;
    }

    /// Releases the vertex buffer, vertex array, and shader program.
    pub fn delete(&self, gl: &glow::Context) {
        self.gpu.delete(gl);
    }
}

impl Drawable for Pyramid {
    fn prepare(&self, context: &mut RenderContext) {
        let gl = context.gl;

        self.gpu.shader.use_program(gl);

        unsafe {
            gl.bind_vertex_array(Some(self.gpu.vao));

            // column-major upload, no transpose
            gl.uniform_matrix_4_f32_slice(
                Some(&self.gpu.model_loc),
                false,
                &self.transforms.model.data,
            );
            gl.uniform_matrix_4_f32_slice(
                Some(&self.gpu.view_loc),
                false,
                &self.transforms.view.data,
            );
            gl.uniform_matrix_4_f32_slice(
                Some(&self.gpu.projection_loc),
                false,
                &self.transforms.projection.data,
            );
        }
    }

    fn draw(&self, context: &mut RenderContext) {
        let gl = context.gl;

        // 18 sequential vertices, 6 independent triangles; no index buffer
        unsafe {
            gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT);
        }
    }

    fn cleanup(&self, context: &mut RenderContext) {
        let gl = context.gl;
        unsafe {
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }
    }
}

fn setup_vertex_buffer(gl: &glow::Context) -> Result<glow::Buffer, Error> {
    let buffer = unsafe { gl.create_buffer() }
        .map_err(|e| Error::buffer_creation_failed("vertex", e))?;

    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
    }
    buffer_upload_array(gl, glow::ARRAY_BUFFER, &VERTICES, glow::STATIC_DRAW);

    // interleaved attributes (while VAO is bound)
    let stride = size_of::<Vertex>() as i32;
    enable_vertex_attrib(gl, attrib::POSITION, 3, offset_of!(Vertex, position) as i32, stride);
    enable_vertex_attrib(gl, attrib::COLOR, 3, offset_of!(Vertex, color) as i32, stride);

    Ok(buffer)
}

fn enable_vertex_attrib(gl: &glow::Context, index: u32, size: i32, offset: i32, stride: i32) {
    unsafe {
        gl.enable_vertex_attrib_array(index);
        gl.vertex_attrib_pointer_f32(index, size, glow::FLOAT, false, stride, offset);
    }
}

fn uniform_location(
    gl: &glow::Context,
    program: glow::Program,
    name: &str,
) -> Result<glow::UniformLocation, Error> {
    unsafe { gl.get_uniform_location(program, name) }
        .ok_or_else(|| Error::uniform_location_failed(name))
}
