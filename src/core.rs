use crate::backend::GlBackend;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::shader::{build_program, ShaderSources};

use glutin::dpi::LogicalSize;
use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{ContextBuilder, PossiblyCurrent, WindowedContext};

use gl::types::*;

/// One triangle, three `(x, y, z)` positions in clip space.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -1.0, -1.0, 0.0,
    1.0, -1.0, 0.0,
    0.0, 1.0, 0.0,
];

/// Create a window and make its GL context current, then load the GL function pointers.
pub fn init_glutin_context<T>(
    config: &Config,
    event_loop: &EventLoop<T>,
) -> Result<WindowedContext<PossiblyCurrent>> {
    let (width, height) = config.window_size;
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(config.resizable);

    let context = ContextBuilder::new()
        .with_vsync(config.vsync)
        .build_windowed(window, event_loop)?;

    let context = unsafe { context.make_current().map_err(|(_, err)| err)? };

    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
    log::info!(
        "Created {:?} context for window \"{}\"",
        context.get_api(),
        config.window_title
    );

    Ok(context)
}

/// The GPU objects behind the triangle.
///
/// Created once by [`Triangle::load`] and released once by [`Triangle::destroy`], which takes
/// `self` so the handles cannot be used afterwards.
#[derive(Debug, PartialEq, Eq)]
pub struct Triangle {
    pub program: GLuint,
    pub vao: GLuint,
    pub vbo: GLuint,
}

impl Triangle {
    /// Build the program from `sources` and upload [`TRIANGLE_VERTICES`].
    ///
    /// Leaves the program, vertex array and buffer bound.
    pub fn load<G: GlBackend>(gl: &mut G, sources: &ShaderSources) -> Result<Triangle> {
        let program = build_program(gl, sources)?;
        log::info!("Linked shader program {}", program);

        let vao = gl.gen_vertex_array();
        if vao == 0 {
            gl.delete_program(program);
            return Err(Error::ObjectCreation("vertex array"));
        }
        gl.bind_vertex_array(vao);

        let vbo = gl.gen_buffer();
        if vbo == 0 {
            gl.delete_vertex_array(vao);
            gl.delete_program(program);
            return Err(Error::ObjectCreation("buffer"));
        }
        gl.bind_array_buffer(vbo);
        gl.upload_static(&TRIANGLE_VERTICES);
        gl.declare_position_attribute();
        log::debug!("Uploaded {} vertices to buffer {} (vao {})", TRIANGLE_VERTICES.len() / 3, vbo, vao);

        Ok(Triangle { program, vao, vbo })
    }

    /// Clear, then draw the three vertices. Presenting is up to the caller.
    pub fn render<G: GlBackend>(&self, gl: &mut G) {
        gl.clear_color_buffer();
        gl.use_program(self.program);
        gl.draw_triangles(0, 3);
    }

    pub fn destroy<G: GlBackend>(self, gl: &mut G) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_program(self.program);
        log::info!("Released program {}, buffer {} and vao {}", self.program, self.vbo, self.vao);
    }
}

/// Map the whole window.
pub fn resize_viewport<G: GlBackend>(gl: &mut G, width: u32, height: u32) {
    log::debug!("Resizing viewport to {}x{}", width, height);
    gl.viewport(0, 0, width as GLsizei, height as GLsizei);
}
