/// The demo quad: four positions and four colors in two vertex buffers
/// under one vertex array.

use std::sync::{Arc, Mutex, MutexGuard};

use kaleido_engine::glam::{Vec3, Vec4};
use kaleido_engine::kaleido::{
    BufferHandle, Error, GraphicsContext, PrimitiveMode, Result, VertexArrayHandle,
};

/// Attribute index for vertex positions
const POSITION_ATTRIBUTE: u32 = 0;
/// Attribute index for vertex colors
const COLOR_ATTRIBUTE: u32 = 1;

/// One position per corner, in clip space
const POSITIONS: [Vec3; 4] = [
    Vec3::new(-0.5, 0.5, 0.5),  // Top left
    Vec3::new(0.5, 0.5, 0.5),   // Top right
    Vec3::new(0.5, -0.5, 0.5),  // Bottom right
    Vec3::new(-0.5, -0.5, 0.5), // Bottom left
];

/// One RGBA color per corner
const COLORS: [Vec4; 4] = [
    Vec4::new(0.0, 1.0, 0.0, 1.0), // Top left
    Vec4::new(1.0, 1.0, 0.0, 1.0), // Top right
    Vec4::new(1.0, 0.0, 0.0, 1.0), // Bottom right
    Vec4::new(0.0, 0.0, 1.0, 1.0), // Bottom left
];

/// The quad's GPU resources
///
/// Holds the owning context so the buffers and the vertex array are
/// destroyed when the quad is dropped.
pub struct Quad {
    context: Arc<Mutex<dyn GraphicsContext>>,
    vertex_array: VertexArrayHandle,
    position_buffer: BufferHandle,
    color_buffer: BufferHandle,
}

impl Quad {
    /// Upload the quad data
    ///
    /// The position attribute is enabled here; the color attribute is
    /// described but stays disabled until [`Quad::enable_colors`], so the
    /// first draw pass runs without per-vertex color.
    pub fn upload(context: Arc<Mutex<dyn GraphicsContext>>) -> Result<Self> {
        let (vertex_array, position_buffer, color_buffer) = {
            let mut ctx = lock(&context)?;

            let vertex_array = ctx.create_vertex_array()?;
            ctx.bind_vertex_array(vertex_array);

            let position_buffer = ctx.create_vertex_buffer(bytemuck::cast_slice(&POSITIONS))?;
            ctx.vertex_attribute(POSITION_ATTRIBUTE, 3, position_buffer);
            ctx.enable_attribute(POSITION_ATTRIBUTE);

            let color_buffer = ctx.create_vertex_buffer(bytemuck::cast_slice(&COLORS))?;
            ctx.vertex_attribute(COLOR_ATTRIBUTE, 4, color_buffer);

            (vertex_array, position_buffer, color_buffer)
        };

        Ok(Self {
            context,
            vertex_array,
            position_buffer,
            color_buffer,
        })
    }

    /// Enable the per-vertex color attribute
    pub fn enable_colors(&self) -> Result<()> {
        lock(&self.context)?.enable_attribute(COLOR_ATTRIBUTE);
        Ok(())
    }

    /// Draw the quad as a closed outline
    pub fn draw_outline(&self) -> Result<()> {
        lock(&self.context)?.draw_arrays(PrimitiveMode::LineLoop, 0, POSITIONS.len() as i32);
        Ok(())
    }

    /// Draw the quad filled
    pub fn draw_filled(&self) -> Result<()> {
        lock(&self.context)?.draw_arrays(PrimitiveMode::TriangleFan, 0, POSITIONS.len() as i32);
        Ok(())
    }
}

impl Drop for Quad {
    fn drop(&mut self) {
        if let Ok(mut ctx) = self.context.lock() {
            ctx.destroy_buffer(self.position_buffer);
            ctx.destroy_buffer(self.color_buffer);
            ctx.destroy_vertex_array(self.vertex_array);
        }
    }
}

fn lock(
    context: &Arc<Mutex<dyn GraphicsContext>>,
) -> Result<MutexGuard<'_, dyn GraphicsContext + 'static>> {
    context
        .lock()
        .map_err(|_| Error::BackendError("Graphics context lock poisoned".to_string()))
}
