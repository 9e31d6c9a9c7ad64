//! The error type shared by the loader and the bootstrap.

use glutin::{ContextError, CreationError};

use crate::shader::ShaderStage;

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A shader source file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The compiler left something in the shader's info log.
    ShaderCompilation { stage: ShaderStage, log: String },
    /// The linker left something in the program's info log.
    ProgramLink { log: String },
    /// The driver handed back a zero name for the named kind of object.
    ObjectCreation(&'static str),
    ContextCreation(CreationError),
    Context(ContextError),
}

impl Error {
    /// The raw diagnostic text, for compile and link failures.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Error::ShaderCompilation { log, .. } | Error::ProgramLink { log } => Some(log),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, .. } => write!(f, "Failed to read shader source {}", path.display()),
            Error::ShaderCompilation { stage, log } => {
                write!(f, "{} shader compiled with error: {}", stage, log)
            }
            Error::ProgramLink { log } => write!(f, "Program failed to link with error: {}", log),
            Error::ObjectCreation(kind) => write!(f, "OpenGL returned no name for a new {}", kind),
            Error::ContextCreation(_) => write!(f, "Failed to create a window with a GL context"),
            Error::Context(_) => write!(f, "GL context error"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::ContextCreation(err) => Some(err),
            Error::Context(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CreationError> for Error {
    fn from(err: CreationError) -> Self {
        Error::ContextCreation(err)
    }
}

impl From<ContextError> for Error {
    fn from(err: ContextError) -> Self {
        Error::Context(err)
    }
}
