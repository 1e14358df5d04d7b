/// ShaderStage / PrimitiveMode to OpenGL enum mapping

use gl::types::GLenum;
use kaleido_engine::{PrimitiveMode, ShaderStage};

/// OpenGL shader object type for a stage
pub(crate) fn stage_to_gl(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

/// OpenGL primitive mode for a draw call
pub(crate) fn mode_to_gl(mode: PrimitiveMode) -> GLenum {
    match mode {
        PrimitiveMode::LineLoop => gl::LINE_LOOP,
        PrimitiveMode::TriangleFan => gl::TRIANGLE_FAN,
    }
}

#[cfg(test)]
#[path = "opengl_format_tests.rs"]
mod tests;
