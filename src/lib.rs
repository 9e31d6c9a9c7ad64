//! Opens a window, compiles a vertex/fragment shader pair read from disk, uploads one triangle
//! and draws it every frame.
//!
//! Powered by OpenGL. The context and window come from glutin, but everything that touches the
//! GPU goes through [`GlBackend`], so the loader and renderer can be driven without a window.
//!
//! The quickest way in is [`run`]:
//!
//! ```no_run
//! mini_gl_triangle::run(mini_gl_triangle::config! {
//!     window_title: "Hello triangle!".to_string(),
//! }).unwrap();
//! ```
//!
//! which reads `Shader.vert` and `Shader.frag` from the working directory.

#[macro_use]
extern crate rustic_gl;
#[macro_use]
extern crate derive_builder;

pub extern crate gl;
pub extern crate glutin;

pub mod app;
pub mod backend;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod shader;

pub use crate::app::{action_for, Action, App};
pub use crate::backend::{GlBackend, RawGl};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::core::{Triangle, TRIANGLE_VERTICES};
pub use crate::error::{Error, Result};
pub use crate::shader::{build_program, compile_shader, link_program, ShaderSources, ShaderStage};

use crate::core::init_glutin_context;

use glutin::dpi::PhysicalSize;
use glutin::event_loop::{ControlFlow, EventLoop};

/// Creates the window, loads the shaders and the triangle, then hands the thread over to the
/// event loop.
///
/// Only returns if something fails before the loop starts. Once it is running, closing the window
/// or releasing Escape exits the process after the GPU objects have been released.
pub fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::new();
    let context = init_glutin_context(&config, &event_loop)?;

    // The context was made current above and stays current on this thread.
    let gl = unsafe { RawGl::new() };
    let mut app = App::load(gl, &config)?;

    let size = context.window().inner_size();
    app.resize(size.width, size.height);

    event_loop.run(move |event, _, control_flow| {
        if *control_flow != ControlFlow::Exit {
            *control_flow = ControlFlow::Poll;
        }

        let action = match action_for(&event) {
            Some(action) => action,
            None => return,
        };
        match action {
            Action::RequestRedraw => context.window().request_redraw(),
            Action::Render => {
                app.render();
                if let Err(err) = context.swap_buffers() {
                    log::error!("Failed to present frame: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            Action::Resize { width, height } => {
                context.resize(PhysicalSize::new(width, height));
                app.resize(width, height);
            }
            Action::Exit => {
                log::info!("Window closed");
                *control_flow = ControlFlow::Exit;
            }
            Action::Teardown => app.teardown(),
        }
    })
}
