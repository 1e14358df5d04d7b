/// ShaderProgram - GPU shader program lifecycle
///
/// Owns compilation, linking, activation, and teardown of a program built
/// from a vertex-stage and fragment-stage source pair. The program handle
/// exists if and only if both stages compiled and the link succeeded; an
/// instance without a handle can never be activated.

use std::sync::{Arc, Mutex};

use crate::context::{GraphicsContext, ProgramHandle, ShaderStage};
use crate::error::{Error, Result};

/// A GPU shader program built from vertex and fragment stage sources
///
/// The instance keeps a shared handle to the context that owns its GPU
/// resources, so the program handle is released on `Drop` as well as
/// through [`ShaderProgram::release`].
///
/// State machine: `Uninitialized -> (initialize ok) -> Valid ->
/// (release) -> Uninitialized`. A failed `initialize` stays
/// `Uninitialized` and leaves no driver resource alive.
pub struct ShaderProgram {
    context: Arc<Mutex<dyn GraphicsContext>>,
    vertex_source: String,
    fragment_source: String,
    program: Option<ProgramHandle>,
}

impl ShaderProgram {
    /// Create an uninitialized program from its stage sources
    ///
    /// No driver resource is touched until [`ShaderProgram::initialize`].
    pub fn new(
        context: Arc<Mutex<dyn GraphicsContext>>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            context,
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            program: None,
        }
    }

    /// Whether `initialize` has succeeded and `release` has not been called
    pub fn is_valid(&self) -> bool {
        self.program.is_some()
    }

    /// The linked program handle, if the instance is valid
    pub fn handle(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Compile both stages and link them into an executable program
    ///
    /// The stages are compiled independently; the intermediate stage
    /// handles are destroyed after linking regardless of the outcome (a
    /// linked program retains the compiled code). Re-initializing an
    /// already-valid instance releases the existing program first.
    ///
    /// # Errors
    ///
    /// * `CompileFailed` - a stage did not compile (or its source is
    ///   empty); carries the stage and the driver's compile log. Any
    ///   stage handle already created is destroyed first.
    /// * `LinkFailed` - both stages compiled but did not link; carries
    ///   the driver's link log. Both stage handles and the unlinked
    ///   program are destroyed.
    ///
    /// On every error path the instance remains `Uninitialized`.
    pub fn initialize(&mut self) -> Result<()> {
        let mut context = lock(&self.context)?;

        if let Some(old) = self.program.take() {
            context.destroy_program(old);
        }

        if self.vertex_source.trim().is_empty() {
            return Err(Error::CompileFailed {
                stage: ShaderStage::Vertex,
                log: "shader source is empty".to_string(),
            });
        }
        if self.fragment_source.trim().is_empty() {
            return Err(Error::CompileFailed {
                stage: ShaderStage::Fragment,
                log: "shader source is empty".to_string(),
            });
        }

        let vertex = context.compile_stage(ShaderStage::Vertex, &self.vertex_source)?;
        let fragment = match context.compile_stage(ShaderStage::Fragment, &self.fragment_source) {
            Ok(handle) => handle,
            Err(error) => {
                context.destroy_stage(vertex);
                return Err(error);
            }
        };

        let linked = context.link_stages(&[vertex, fragment]);

        // Transient either way: the program keeps the compiled code, and a
        // failed link leaves nothing worth keeping.
        context.destroy_stage(vertex);
        context.destroy_stage(fragment);

        let program = linked?;
        self.program = Some(program);
        crate::engine_debug!("kaleido::ShaderProgram", "Program {} linked", program.raw());
        Ok(())
    }

    /// Make this program the context's active program
    ///
    /// # Errors
    ///
    /// `NotInitialized` if the instance is not valid; the context's
    /// active-program slot is left untouched in that case.
    pub fn activate(&self) -> Result<()> {
        let program = self.program.ok_or(Error::NotInitialized)?;
        lock(&self.context)?.bind_program(program);
        Ok(())
    }

    /// Delete the program handle and mark the instance uninitialized
    ///
    /// Idempotent: releasing an already-released or never-initialized
    /// instance is a no-op. Must run before the owning context is
    /// destroyed or the handle leaks until context teardown.
    pub fn release(&mut self) {
        if let Some(program) = self.program.take() {
            if let Ok(mut context) = self.context.lock() {
                context.destroy_program(program);
            }
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.release();
    }
}

fn lock(
    context: &Arc<Mutex<dyn GraphicsContext>>,
) -> Result<std::sync::MutexGuard<'_, dyn GraphicsContext + 'static>> {
    context
        .lock()
        .map_err(|_| Error::BackendError("Graphics context lock poisoned".to_string()))
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
