//! Application state and the translation from window events to things the app does.

use crate::backend::GlBackend;
use crate::config::Config;
use crate::core::{resize_viewport, Triangle};
use crate::error::Result;
use crate::shader::ShaderSources;

use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};

/// What the event loop should do in response to one event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Draw a frame and present it.
    Render,
    /// Ask the window for a redraw once the current batch of events is handled.
    RequestRedraw,
    /// The window's client area is now this many physical pixels.
    Resize { width: u32, height: u32 },
    Exit,
    /// The loop is going away; release GPU objects now while the context still exists.
    Teardown,
}

pub fn action_for<T>(event: &Event<T>) -> Option<Action> {
    match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(VirtualKeyCode::Escape),
                        state: ElementState::Released,
                        ..
                    },
                ..
            } => Some(Action::Exit),
            WindowEvent::Resized(size) => Some(Action::Resize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => Some(Action::Resize {
                width: new_inner_size.width,
                height: new_inner_size.height,
            }),
            _ => None,
        },
        Event::MainEventsCleared => Some(Action::RequestRedraw),
        Event::RedrawRequested(_) => Some(Action::Render),
        Event::LoopDestroyed => Some(Action::Teardown),
        _ => None,
    }
}

/// Owns the GL backend and everything loaded through it.
///
/// Built by [`App::load`]; from then on the handles stay valid until [`App::teardown`], after
/// which `render` and `resize` do nothing.
#[derive(Debug)]
pub struct App<G: GlBackend> {
    gl: G,
    triangle: Option<Triangle>,
}

impl<G: GlBackend> App<G> {
    /// Read the shader pair named by `config` and load the triangle.
    pub fn load(gl: G, config: &Config) -> Result<Self> {
        let sources = ShaderSources::read(&config.vertex_shader, &config.fragment_shader)?;
        Self::from_sources(gl, &sources, config.clear_color)
    }

    pub fn from_sources(mut gl: G, sources: &ShaderSources, clear_color: Option<[f32; 4]>) -> Result<Self> {
        if let Some(rgba) = clear_color {
            gl.clear_color(rgba);
        }
        let triangle = Triangle::load(&mut gl, sources)?;
        Ok(App {
            gl,
            triangle: Some(triangle),
        })
    }

    pub fn render(&mut self) {
        if let Some(triangle) = &self.triangle {
            triangle.render(&mut self.gl);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.triangle.is_some() {
            resize_viewport(&mut self.gl, width, height);
        }
    }

    /// Release every GPU object. Only the first call does anything.
    pub fn teardown(&mut self) {
        if let Some(triangle) = self.triangle.take() {
            triangle.destroy(&mut self.gl);
        }
    }
}

#[cfg(test)]
impl<G: GlBackend> App<G> {
    fn is_loaded(&self) -> bool {
        self.triangle.is_some()
    }

    fn triangle(&self) -> Option<&Triangle> {
        self.triangle.as_ref()
    }

    fn gl(&self) -> &G {
        &self.gl
    }

    fn gl_mut(&mut self) -> &mut G {
        &mut self.gl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Call, RecordingGl};
    use crate::shader::tests::{FRAGMENT, VERTEX};
    use crate::Error;

    use glutin::dpi::PhysicalSize;
    use glutin::event::{DeviceId, ModifiersState};
    use glutin::window::WindowId;

    use std::env;
    use std::fs;
    use std::process;

    fn app() -> App<RecordingGl> {
        App::from_sources(RecordingGl::new(), &ShaderSources::new(VERTEX, FRAGMENT), None).unwrap()
    }

    fn window_event(event: WindowEvent) -> Event<()> {
        Event::WindowEvent {
            window_id: unsafe { WindowId::dummy() },
            event,
        }
    }

    #[test]
    fn events_map_to_actions() {
        assert_eq!(action_for(&window_event(WindowEvent::CloseRequested)), Some(Action::Exit));
        assert_eq!(
            action_for(&window_event(WindowEvent::Resized(PhysicalSize::new(800, 600)))),
            Some(Action::Resize { width: 800, height: 600 })
        );
        assert_eq!(action_for(&window_event(WindowEvent::Focused(true))), None);
        assert_eq!(action_for::<()>(&Event::MainEventsCleared), Some(Action::RequestRedraw));
        assert_eq!(
            action_for::<()>(&Event::RedrawRequested(unsafe { WindowId::dummy() })),
            Some(Action::Render)
        );
        assert_eq!(action_for::<()>(&Event::LoopDestroyed), Some(Action::Teardown));
    }

    #[allow(deprecated)]
    fn key(state: ElementState, keycode: VirtualKeyCode) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 1,
                state,
                virtual_keycode: Some(keycode),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    #[test]
    fn escape_exits_on_release_only() {
        assert_eq!(
            action_for(&window_event(key(ElementState::Released, VirtualKeyCode::Escape))),
            Some(Action::Exit)
        );
        assert_eq!(action_for(&window_event(key(ElementState::Pressed, VirtualKeyCode::Escape))), None);
        assert_eq!(action_for(&window_event(key(ElementState::Released, VirtualKeyCode::Space))), None);
    }

    #[test]
    fn scale_factor_change_resizes_to_new_inner_size() {
        let mut size = PhysicalSize::new(800, 600);
        let event = window_event(WindowEvent::ScaleFactorChanged {
            scale_factor: 2.0,
            new_inner_size: &mut size,
        });
        assert_eq!(action_for(&event), Some(Action::Resize { width: 800, height: 600 }));
    }

    #[test]
    fn loaded_app_holds_a_program() {
        let app = app();
        assert!(app.is_loaded());
        assert_ne!(app.triangle().unwrap().program, 0);
    }

    #[test]
    fn clear_color_is_applied_before_loading() {
        let app = App::from_sources(
            RecordingGl::new(),
            &ShaderSources::new(VERTEX, FRAGMENT),
            Some([0.2, 0.3, 0.3, 1.0]),
        )
        .unwrap();
        assert_eq!(app.gl().calls.first(), Some(&Call::ClearColor([0.2, 0.3, 0.3, 1.0])));
    }

    #[test]
    fn render_issues_one_clear_and_one_draw() {
        let mut app = app();
        app.gl_mut().forget_calls();

        app.render();

        let gl = app.gl();
        assert_eq!(gl.count(&Call::Clear), 1);
        assert_eq!(gl.count(&Call::DrawTriangles(0, 3)), 1);
        let clear = gl.calls.iter().position(|c| *c == Call::Clear).unwrap();
        let draw = gl.calls.iter().position(|c| *c == Call::DrawTriangles(0, 3)).unwrap();
        assert!(clear < draw);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut app = app();
        app.gl_mut().forget_calls();

        app.resize(800, 600);

        assert_eq!(app.gl().calls, vec![Call::Viewport(0, 0, 800, 600)]);
    }

    #[test]
    fn teardown_runs_once() {
        let mut app = app();
        let triangle = app.triangle().map(|t| (t.program, t.vao, t.vbo)).unwrap();
        app.gl_mut().forget_calls();

        app.teardown();
        app.teardown();
        app.render();
        app.resize(1, 1);

        let (program, vao, vbo) = triangle;
        assert!(!app.is_loaded());
        assert_eq!(
            app.gl().calls,
            vec![
                Call::DeleteVertexArray(vao),
                Call::DeleteBuffer(vbo),
                Call::DeleteProgram(program),
            ]
        );
    }

    #[test]
    fn load_reads_the_configured_files() {
        let dir = env::temp_dir().join(format!("mini_gl_triangle_app_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Shader.vert"), VERTEX).unwrap();
        fs::write(dir.join("Shader.frag"), "void main() {").unwrap();

        let config = Config {
            vertex_shader: dir.join("Shader.vert"),
            fragment_shader: dir.join("Shader.frag"),
            ..Default::default()
        };
        match App::load(RecordingGl::new(), &config) {
            Err(Error::ShaderCompilation { log, .. }) => assert!(log.contains("syntax error")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }

        fs::write(dir.join("Shader.frag"), FRAGMENT).unwrap();
        assert!(App::load(RecordingGl::new(), &config).unwrap().is_loaded());

        fs::remove_dir_all(&dir).unwrap();
    }
}
