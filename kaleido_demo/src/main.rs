/*!
# Project Kaleidoscope demo

Minimal OpenGL/SDL bootstrap: opens a window, uploads a quad, draws it as
an outline and then filled, and runs a keyboard-driven event loop that
changes the background clear color (R/G/B keys; Escape quits).
*/

mod quad;
mod window;

use std::sync::{Arc, Mutex, MutexGuard};

use kaleido_engine::engine_error;
use kaleido_engine::engine_info;
use kaleido_engine::glam::Vec4;
use kaleido_engine::kaleido::{Engine, Error, GraphicsContext, Result, ShaderProgram};
use kaleido_engine_context_opengl::OpenGlContext;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use crate::quad::Quad;
use crate::window::SdlWindow;

const VERTEX_SHADER: &str = include_str!("../shaders/quad.vert");
const FRAGMENT_SHADER: &str = include_str!("../shaders/quad.frag");

fn main() {
    if let Err(error) = run() {
        engine_error!("kaleido::demo", "Fatal: {}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    Engine::initialize()?;

    let window = SdlWindow::new()?;
    Engine::create_context(OpenGlContext::load(|symbol| {
        window.video.gl_get_proc_address(symbol) as *const std::os::raw::c_void
    }))?;
    let context = Engine::context()?;

    let mut events = window.event_pump()?;

    // First frame: plain black, before any geometry exists.
    {
        let mut ctx = lock(&context)?;
        ctx.set_clear_color(Vec4::new(0.0, 0.0, 0.0, 1.0));
        ctx.clear();
    }
    window.swap();

    engine_info!("kaleido::demo", "Setting up vertex buffers");
    let quad = Quad::upload(context.clone())?;

    let mut shader = ShaderProgram::new(context.clone(), VERTEX_SHADER, FRAGMENT_SHADER);
    shader.initialize()?;
    shader.activate()?;

    engine_info!("kaleido::demo", "Rendering");

    // Pass 1: outline on gray.
    {
        let mut ctx = lock(&context)?;
        ctx.set_clear_color(Vec4::new(0.5, 0.5, 0.5, 1.0));
        ctx.clear();
    }
    quad.draw_outline()?;
    window.swap();

    // Pass 2: filled with per-vertex colors, on black.
    quad.enable_colors()?;
    {
        let mut ctx = lock(&context)?;
        ctx.set_clear_color(Vec4::new(0.0, 0.0, 0.0, 0.0));
        ctx.clear();
    }
    quad.draw_filled()?;
    window.swap();

    run_event_loop(&window, &context, &mut events)?;

    // Release GPU resources before the GL context goes away.
    shader.release();
    drop(quad);
    Engine::destroy_context()?;
    Engine::shutdown();
    Ok(())
}

/// Poll events until quit; R/G/B repaint the background
fn run_event_loop(
    window: &SdlWindow,
    context: &Arc<Mutex<dyn GraphicsContext>>,
    events: &mut EventPump,
) -> Result<()> {
    'running: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    let color = match key {
                        Keycode::R => Some(Vec4::new(1.0, 0.0, 0.0, 1.0)),
                        Keycode::G => Some(Vec4::new(0.0, 1.0, 0.0, 1.0)),
                        Keycode::B => Some(Vec4::new(0.0, 0.0, 1.0, 1.0)),
                        _ => None,
                    };
                    if let Some(color) = color {
                        {
                            let mut ctx = lock(context)?;
                            ctx.set_clear_color(color);
                            ctx.clear();
                        }
                        window.swap();
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn lock(
    context: &Arc<Mutex<dyn GraphicsContext>>,
) -> Result<MutexGuard<'_, dyn GraphicsContext + 'static>> {
    context
        .lock()
        .map_err(|_| Error::BackendError("Graphics context lock poisoned".to_string()))
}
