//! Shader sources, compilation and linking.

use crate::backend::GlBackend;
use crate::error::{Error, Result};

use gl::types::*;

use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Fragment => "Fragment",
        })
    }
}

/// The text of both stages, read fully into memory before anything touches the GPU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new<V: Into<String>, F: Into<String>>(vertex: V, fragment: F) -> Self {
        ShaderSources {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn read<V: AsRef<Path>, F: AsRef<Path>>(vertex: V, fragment: F) -> Result<Self> {
        Ok(ShaderSources {
            vertex: read_source(vertex.as_ref())?,
            fragment: read_source(fragment.as_ref())?,
        })
    }
}

fn read_source(path: &Path) -> Result<String> {
    log::debug!("Reading shader source from {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Compiles one stage. Any text in the info log counts as a failure, and the shader object is
/// deleted before the error is returned.
pub fn compile_shader<G: GlBackend>(gl: &mut G, stage: ShaderStage, source: &str) -> Result<GLuint> {
    let shader = gl.create_shader(stage.gl_enum());
    if shader == 0 {
        return Err(Error::ObjectCreation("shader"));
    }
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    let log = gl.shader_info_log(shader);
    if !log.is_empty() {
        gl.delete_shader(shader);
        return Err(Error::ShaderCompilation { stage, log });
    }
    log::debug!("Compiled {} shader {}", stage, shader);
    Ok(shader)
}

/// Links `shaders` into a new program, then detaches and deletes them whether or not the link
/// succeeded. The shaders are consumed either way.
pub fn link_program<G: GlBackend>(gl: &mut G, shaders: &[GLuint]) -> Result<GLuint> {
    let program = gl.create_program();
    if program == 0 {
        delete_shaders(gl, shaders);
        return Err(Error::ObjectCreation("program"));
    }
    for &shader in shaders {
        gl.attach_shader(program, shader);
    }
    gl.link_program(program);
    let log = gl.program_info_log(program);

    for &shader in shaders {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }

    if !log.is_empty() {
        gl.delete_program(program);
        return Err(Error::ProgramLink { log });
    }
    Ok(program)
}

/// Compiles both stages and links them. No shader object outlives this call.
pub fn build_program<G: GlBackend>(gl: &mut G, sources: &ShaderSources) -> Result<GLuint> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, &sources.vertex)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, &sources.fragment) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(vertex);
            return Err(err);
        }
    };
    link_program(gl, &[vertex, fragment])
}

fn delete_shaders<G: GlBackend>(gl: &mut G, shaders: &[GLuint]) {
    for &shader in shaders {
        gl.delete_shader(shader);
    }
}
