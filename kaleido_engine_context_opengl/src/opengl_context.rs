/// OpenGlContext - OpenGL implementation of the GraphicsContext trait
///
/// Wraps the raw driver calls behind the context seam. The GL context must
/// be current on the calling thread before any operation runs; the
/// embedding application owns context creation and teardown.

use std::ffi::{c_void, CStr, CString};
use std::ptr;

use gl::types::{GLchar, GLint, GLsizeiptr, GLuint};
use glam::Vec4;

use kaleido_engine::{
    engine_bail, engine_debug, engine_info,
    BufferHandle, Error, GraphicsContext, PrimitiveMode, ProgramHandle, Result, ShaderStage,
    StageHandle, VertexArrayHandle,
};

use crate::opengl_format::{mode_to_gl, stage_to_gl};

/// OpenGL graphics context backend
///
/// Holds the explicit mirror of the context-wide active-program slot so
/// the single-active-program state is visible to callers instead of
/// living only inside the driver.
pub struct OpenGlContext {
    active_program: Option<ProgramHandle>,
}

impl OpenGlContext {
    /// Load the OpenGL function pointers and wrap the current context
    ///
    /// `loader` resolves driver entry points by name (for SDL, the video
    /// subsystem's `gl_get_proc_address`). The GL context must already be
    /// current on this thread.
    pub fn load<F>(mut loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));

        let context = Self { active_program: None };
        engine_info!("kaleido::opengl", "OpenGL version: {}", version_string());
        context
    }
}

impl GraphicsContext for OpenGlContext {
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageHandle> {
        let source = CString::new(source).map_err(|_| Error::CompileFailed {
            stage,
            log: "shader source contains an interior NUL byte".to_string(),
        })?;

        unsafe {
            let shader = gl::CreateShader(stage_to_gl(stage));
            if shader == 0 {
                engine_bail!("kaleido::opengl", "CreateShader returned no object");
            }

            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut status = gl::FALSE as GLint;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = shader_info_log(shader);
                gl::DeleteShader(shader);
                return Err(Error::CompileFailed { stage, log });
            }

            engine_debug!("kaleido::opengl", "Compiled {:?} stage as object {}", stage, shader);
            Ok(StageHandle::new(shader))
        }
    }

    fn link_stages(&mut self, stages: &[StageHandle]) -> Result<ProgramHandle> {
        unsafe {
            let program = gl::CreateProgram();
            if program == 0 {
                engine_bail!("kaleido::opengl", "CreateProgram returned no object");
            }

            for stage in stages {
                gl::AttachShader(program, stage.raw());
            }
            gl::LinkProgram(program);
            // A linked program keeps the compiled code; detach so the
            // caller can delete the stage objects immediately.
            for stage in stages {
                gl::DetachShader(program, stage.raw());
            }

            let mut status = gl::FALSE as GLint;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = program_info_log(program);
                gl::DeleteProgram(program);
                return Err(Error::LinkFailed { log });
            }

            Ok(ProgramHandle::new(program))
        }
    }

    fn destroy_stage(&mut self, stage: StageHandle) {
        unsafe {
            gl::DeleteShader(stage.raw());
        }
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        if self.active_program == Some(program) {
            unsafe {
                gl::UseProgram(0);
            }
            self.active_program = None;
        }
        unsafe {
            gl::DeleteProgram(program.raw());
        }
    }

    fn bind_program(&mut self, program: ProgramHandle) {
        unsafe {
            gl::UseProgram(program.raw());
        }
        self.active_program = Some(program);
    }

    fn active_program(&self) -> Option<ProgramHandle> {
        self.active_program
    }

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle> {
        unsafe {
            let mut array: GLuint = 0;
            gl::GenVertexArrays(1, &mut array);
            if array == 0 {
                engine_bail!("kaleido::opengl", "GenVertexArrays returned no object");
            }
            Ok(VertexArrayHandle::new(array))
        }
    }

    fn bind_vertex_array(&mut self, array: VertexArrayHandle) {
        unsafe {
            gl::BindVertexArray(array.raw());
        }
    }

    fn destroy_vertex_array(&mut self, array: VertexArrayHandle) {
        unsafe {
            let raw = array.raw();
            gl::DeleteVertexArrays(1, &raw);
        }
    }

    fn create_vertex_buffer(&mut self, data: &[u8]) -> Result<BufferHandle> {
        unsafe {
            let mut buffer: GLuint = 0;
            gl::GenBuffers(1, &mut buffer);
            if buffer == 0 {
                engine_bail!("kaleido::opengl", "GenBuffers returned no object");
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, buffer);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
            Ok(BufferHandle::new(buffer))
        }
    }

    fn destroy_buffer(&mut self, buffer: BufferHandle) {
        unsafe {
            let raw = buffer.raw();
            gl::DeleteBuffers(1, &raw);
        }
    }

    fn vertex_attribute(&mut self, index: u32, components: u32, buffer: BufferHandle) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer.raw());
            gl::VertexAttribPointer(
                index,
                components as GLint,
                gl::FLOAT,
                gl::FALSE,
                0,
                ptr::null(),
            );
        }
    }

    fn enable_attribute(&mut self, index: u32) {
        unsafe {
            gl::EnableVertexAttribArray(index);
        }
    }

    fn set_clear_color(&mut self, color: Vec4) {
        unsafe {
            gl::ClearColor(color.x, color.y, color.z, color.w);
        }
    }

    fn clear(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn draw_arrays(&mut self, mode: PrimitiveMode, first: i32, count: i32) {
        unsafe {
            gl::DrawArrays(mode_to_gl(mode), first, count);
        }
    }
}

// ============================================================================
// Driver string helpers
// ============================================================================

fn version_string() -> String {
    unsafe {
        let raw = gl::GetString(gl::VERSION);
        if raw.is_null() {
            return "unknown".to_string();
        }
        CStr::from_ptr(raw.cast()).to_string_lossy().into_owned()
    }
}

fn shader_info_log(shader: GLuint) -> String {
    unsafe {
        let mut length: GLint = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length);
        if length <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u8; length as usize];
        let mut written: GLint = 0;
        gl::GetShaderInfoLog(shader, length, &mut written, buffer.as_mut_ptr() as *mut GLchar);
        buffer.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buffer).trim_end().to_string()
    }
}

fn program_info_log(program: GLuint) -> String {
    unsafe {
        let mut length: GLint = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length);
        if length <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u8; length as usize];
        let mut written: GLint = 0;
        gl::GetProgramInfoLog(program, length, &mut written, buffer.as_mut_ptr() as *mut GLchar);
        buffer.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buffer).trim_end().to_string()
    }
}
