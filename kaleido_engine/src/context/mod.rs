/// Context module - the GPU context seam and its handles

// Module declarations
pub mod context;
#[cfg(test)]
pub mod mock_context;

// Re-export everything from context.rs
pub use context::*;
