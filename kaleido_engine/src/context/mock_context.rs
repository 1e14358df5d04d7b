/// Mock GraphicsContext for unit tests (no GPU required)
///
/// The mock hands out monotonically increasing handles, records every
/// operation, and can be scripted to fail the next compile of a given
/// stage or the next link with a chosen driver log. Tests use the
/// recorded state for leak checks: a failed initialize must leave no
/// stage or program handle alive.

use glam::Vec4;

use crate::context::{
    BufferHandle, GraphicsContext, PrimitiveMode, ProgramHandle, ShaderStage, StageHandle,
    VertexArrayHandle,
};
use crate::error::{Error, Result};

/// Mock context that records operations instead of talking to a driver
#[derive(Debug, Default)]
pub struct MockContext {
    next_handle: u32,

    /// Stage handles created and not yet destroyed
    pub live_stages: Vec<StageHandle>,
    /// Program handles created and not yet destroyed
    pub live_programs: Vec<ProgramHandle>,
    /// Buffer handles created and not yet destroyed
    pub live_buffers: Vec<BufferHandle>,
    /// Vertex array handles created and not yet destroyed
    pub live_vertex_arrays: Vec<VertexArrayHandle>,

    /// Every stage handle ever destroyed
    pub destroyed_stages: Vec<StageHandle>,
    /// Every program handle ever destroyed
    pub destroyed_programs: Vec<ProgramHandle>,

    /// The context-wide active program slot
    pub active: Option<ProgramHandle>,
    /// The currently bound vertex array
    pub bound_vertex_array: Option<VertexArrayHandle>,

    /// Current clear color
    pub clear_color: Vec4,
    /// Number of clear calls
    pub clears: u32,
    /// Recorded draw calls as (mode, first, count)
    pub draws: Vec<(PrimitiveMode, i32, i32)>,
    /// Every (stage, source) pair handed to compile_stage
    pub compiled_sources: Vec<(ShaderStage, String)>,
    /// Attribute indices enabled on the bound vertex array
    pub enabled_attributes: Vec<u32>,

    fail_compile: Option<(ShaderStage, String)>,
    fail_link: Option<String>,
}

impl MockContext {
    /// Create a new mock context
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next compile of `stage` to fail with `log`
    pub fn fail_next_compile(&mut self, stage: ShaderStage, log: &str) {
        self.fail_compile = Some((stage, log.to_string()));
    }

    /// Script the next link to fail with `log`
    pub fn fail_next_link(&mut self, log: &str) {
        self.fail_link = Some(log.to_string());
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl GraphicsContext for MockContext {
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageHandle> {
        self.compiled_sources.push((stage, source.to_string()));

        if let Some((fail_stage, log)) = self.fail_compile.clone() {
            if fail_stage == stage {
                self.fail_compile = None;
                return Err(Error::CompileFailed { stage, log });
            }
        }

        let handle = StageHandle::new(self.next());
        self.live_stages.push(handle);
        Ok(handle)
    }

    fn link_stages(&mut self, stages: &[StageHandle]) -> Result<ProgramHandle> {
        debug_assert!(
            stages.iter().all(|stage| self.live_stages.contains(stage)),
            "link_stages called with a destroyed or unknown stage handle"
        );

        if let Some(log) = self.fail_link.take() {
            return Err(Error::LinkFailed { log });
        }

        let handle = ProgramHandle::new(self.next());
        self.live_programs.push(handle);
        Ok(handle)
    }

    fn destroy_stage(&mut self, stage: StageHandle) {
        self.live_stages.retain(|live| *live != stage);
        self.destroyed_stages.push(stage);
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        self.live_programs.retain(|live| *live != program);
        self.destroyed_programs.push(program);
        if self.active == Some(program) {
            self.active = None;
        }
    }

    fn bind_program(&mut self, program: ProgramHandle) {
        self.active = Some(program);
    }

    fn active_program(&self) -> Option<ProgramHandle> {
        self.active
    }

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle> {
        let handle = VertexArrayHandle::new(self.next());
        self.live_vertex_arrays.push(handle);
        Ok(handle)
    }

    fn bind_vertex_array(&mut self, array: VertexArrayHandle) {
        self.bound_vertex_array = Some(array);
    }

    fn destroy_vertex_array(&mut self, array: VertexArrayHandle) {
        self.live_vertex_arrays.retain(|live| *live != array);
        if self.bound_vertex_array == Some(array) {
            self.bound_vertex_array = None;
        }
    }

    fn create_vertex_buffer(&mut self, _data: &[u8]) -> Result<BufferHandle> {
        let handle = BufferHandle::new(self.next());
        self.live_buffers.push(handle);
        Ok(handle)
    }

    fn destroy_buffer(&mut self, buffer: BufferHandle) {
        self.live_buffers.retain(|live| *live != buffer);
    }

    fn vertex_attribute(&mut self, _index: u32, _components: u32, _buffer: BufferHandle) {
        // Recorded implicitly through enable_attribute; nothing to simulate.
    }

    fn enable_attribute(&mut self, index: u32) {
        if !self.enabled_attributes.contains(&index) {
            self.enabled_attributes.push(index);
        }
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_arrays(&mut self, mode: PrimitiveMode, first: i32, count: i32) {
        self.draws.push((mode, first, count));
    }
}

#[cfg(test)]
#[path = "mock_context_tests.rs"]
mod tests;
