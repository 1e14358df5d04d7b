/*!
# Kaleido Engine

Core traits and types for the Kaleido rendering bootstrap.

This crate provides the platform-agnostic API: the GPU context is a trait
seam, so the shader-program lifecycle and everything built on it can run
against a real driver or against a mock in tests. Backend implementations
(OpenGL today) live in separate crates.

## Architecture

- **GraphicsContext**: trait over the GPU context that owns every
  driver-assigned handle and the single "currently active program" slot
- **ShaderProgram**: compilation, linking, activation, and teardown of a
  vertex + fragment shader program
- **Engine**: singleton manager for the context and the logger

Backend implementations provide a concrete `GraphicsContext` type.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod context;
pub mod shader;

// Main kaleido namespace module
pub mod kaleido {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // GPU context seam
    pub use crate::context::{
        BufferHandle, GraphicsContext, PrimitiveMode, ProgramHandle, ShaderStage, StageHandle,
        VertexArrayHandle,
    };

    // Shader program lifecycle
    pub use crate::shader::ShaderProgram;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: engine_* macros are NOT re-exported here - they live at the crate root
    }
}

// Flat re-exports for backend crates
pub use context::{
    BufferHandle, GraphicsContext, PrimitiveMode, ProgramHandle, ShaderStage, StageHandle,
    VertexArrayHandle,
};
pub use engine::Engine;
pub use error::{Error, Result};
pub use shader::ShaderProgram;

// Re-export math library at crate root
pub use glam;
