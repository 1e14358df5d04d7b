//! Error types for the Kaleido engine
//!
//! This module defines the error types used throughout the engine,
//! covering shader compilation and linking, context management, and
//! initialization.

use std::fmt;

use crate::context::ShaderStage;

/// Result type for Kaleido engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kaleido engine errors
///
/// Shader failures carry the driver's diagnostic log verbatim: the log is
/// the primary debugging aid for shader work, so it is always surfaced to
/// the caller rather than handed out on request.
#[derive(Debug, Clone)]
pub enum Error {
    /// A shader stage failed to compile
    CompileFailed { stage: ShaderStage, log: String },

    /// Compiled stages failed to link into a program
    LinkFailed { log: String },

    /// Operation on a shader program that is not in the Valid state
    NotInitialized,

    /// Backend-specific error (OpenGL, SDL, etc.)
    BackendError(String),

    /// Initialization failed (engine, context, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileFailed { stage, log } => {
                write!(f, "{:?} shader compilation failed: {}", stage, log)
            }
            Error::LinkFailed { log } => write!(f, "Shader program linking failed: {}", log),
            Error::NotInitialized => write!(f, "Shader program is not initialized"),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build a `BackendError`, logging it through the engine logger first
///
/// # Example
///
/// ```ignore
/// let error = engine_err!("kaleido::opengl", "CreateShader returned no object");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        $crate::engine_error!($source, "{}", msg);
        $crate::kaleido::Error::BackendError(msg)
    }};
}

/// Return early with a logged `BackendError`
///
/// # Example
///
/// ```ignore
/// if program == 0 {
///     engine_bail!("kaleido::opengl", "CreateProgram returned no object");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
