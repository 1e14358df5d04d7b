/*!
# Kaleido Engine - OpenGL Context Backend

OpenGL implementation of the Kaleido graphics-context seam.

This crate provides the `GraphicsContext` backend over the `gl`
function-pointer loader. The OpenGL context itself (window, pixel format,
current-context state) is created by the embedding application; this crate
only loads the function pointers and wraps the driver calls.
*/

// OpenGL implementation modules
mod opengl_context;
mod opengl_format;

pub use opengl_context::OpenGlContext;
