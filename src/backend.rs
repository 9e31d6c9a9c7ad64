//! The handful of OpenGL entry points the triangle needs.
//!
//! Everything above this module talks to a [`GlBackend`] instead of calling into `gl` directly.
//! [`RawGl`] forwards to the loaded function pointers; tests substitute a recorder.

use gl::types::*;

use std::mem::size_of_val;

type PositionFormat = buffer_layout!([f32; 3]);

pub trait GlBackend {
    /// Returns 0 if the driver could not allocate a shader.
    fn create_shader(&mut self, kind: GLenum) -> GLuint;
    fn shader_source(&mut self, shader: GLuint, source: &str);
    fn compile_shader(&mut self, shader: GLuint);
    fn shader_info_log(&mut self, shader: GLuint) -> String;
    fn delete_shader(&mut self, shader: GLuint);

    /// Returns 0 if the driver could not allocate a program.
    fn create_program(&mut self) -> GLuint;
    fn attach_shader(&mut self, program: GLuint, shader: GLuint);
    fn detach_shader(&mut self, program: GLuint, shader: GLuint);
    fn link_program(&mut self, program: GLuint);
    fn program_info_log(&mut self, program: GLuint) -> String;
    fn use_program(&mut self, program: GLuint);
    fn delete_program(&mut self, program: GLuint);

    fn gen_vertex_array(&mut self) -> GLuint;
    fn bind_vertex_array(&mut self, vao: GLuint);
    fn delete_vertex_array(&mut self, vao: GLuint);

    fn gen_buffer(&mut self) -> GLuint;
    fn bind_array_buffer(&mut self, buffer: GLuint);
    /// Uploads `data` to the bound array buffer as `STATIC_DRAW` storage.
    fn upload_static(&mut self, data: &[f32]);
    fn delete_buffer(&mut self, buffer: GLuint);

    /// Declares attribute 0 as three tightly packed floats and enables it.
    fn declare_position_attribute(&mut self);

    fn clear_color(&mut self, rgba: [f32; 4]);
    fn clear_color_buffer(&mut self);
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn draw_triangles(&mut self, first: i32, count: i32);
}

/// Calls straight into the `gl` crate.
///
/// Only construct this after `gl::load_with` has run against a current context, otherwise every
/// call lands on a null function pointer.
#[derive(Debug)]
pub struct RawGl {
    _private: (),
}

impl RawGl {
    /// # Safety
    ///
    /// The GL function pointers must be loaded and the context must stay current on this thread
    /// for as long as the returned value is used.
    pub unsafe fn new() -> Self {
        RawGl { _private: () }
    }
}

impl GlBackend for RawGl {
    fn create_shader(&mut self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&mut self, shader: GLuint, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
        }
    }

    fn compile_shader(&mut self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_info_log(&mut self, shader: GLuint) -> String {
        unsafe {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            read_info_log(len, |capacity, written, buf| {
                gl::GetShaderInfoLog(shader, capacity, written, buf)
            })
        }
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&mut self) -> GLuint {
        rustic_gl::raw::create_program().unwrap_or(0)
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&mut self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_info_log(&mut self, program: GLuint) -> String {
        unsafe {
            let mut len = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            read_info_log(len, |capacity, written, buf| {
                gl::GetProgramInfoLog(program, capacity, written, buf)
            })
        }
    }

    fn use_program(&mut self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&mut self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn gen_vertex_array(&mut self) -> GLuint {
        rustic_gl::raw::create_vao().unwrap_or(0)
    }

    fn bind_vertex_array(&mut self, vao: GLuint) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn delete_vertex_array(&mut self, vao: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, &vao) }
    }

    fn gen_buffer(&mut self) -> GLuint {
        rustic_gl::raw::create_buffer().unwrap_or(0)
    }

    fn bind_array_buffer(&mut self, buffer: GLuint) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer) }
    }

    fn upload_static(&mut self, data: &[f32]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(data) as GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
    }

    fn delete_buffer(&mut self, buffer: GLuint) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
    }

    fn declare_position_attribute(&mut self) {
        unsafe {
            PositionFormat::declare(0);
        }
    }

    fn clear_color(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear_color_buffer(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) }
    }
}

/// `len` is the driver-reported log length, which counts the trailing nul.
unsafe fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    if written == 0 && !buf.is_empty() {
        // Some drivers don't report the written length; fall back to the nul.
        written = buf.iter().position(|&b| b == 0).unwrap_or(buf.len()) as GLsizei;
    }
    buf.truncate(written as usize);
    String::from_utf8_lossy(&buf).into_owned()
}
