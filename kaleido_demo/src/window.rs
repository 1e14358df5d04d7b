/// SDL2 window and OpenGL context setup
///
/// Thin wrapper over sdl2: video subsystem, GL attribute negotiation,
/// window creation, and buffer swapping. The GL context is kept alive for
/// the lifetime of the window.

use kaleido_engine::kaleido::{Error, Result};
use kaleido_engine::{engine_info, engine_warn};
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};
use sdl2::{EventPump, Sdl, VideoSubsystem};

const WINDOW_TITLE: &str = "Project Kaleidoscope";
const WINDOW_WIDTH: u32 = 512;
const WINDOW_HEIGHT: u32 = 512;

/// SDL window with a current OpenGL context
pub struct SdlWindow {
    sdl: Sdl,
    /// The video subsystem, exposed for GL proc-address lookup
    pub video: VideoSubsystem,
    window: Window,
    // Dropping the GLContext destroys the GL context; hold it until the
    // window goes away.
    _gl_context: GLContext,
}

impl SdlWindow {
    /// Create a centered window with a current core-profile GL context
    pub fn new() -> Result<Self> {
        let sdl = sdl2::init().map_err(Error::InitializationFailed)?;
        let video = sdl.video().map_err(Error::InitializationFailed)?;

        // Core profile: deprecated fixed-function entry points are absent.
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(24);

        let window = video
            .window(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
            .position_centered()
            .opengl()
            .build()
            .map_err(|error| {
                log_sdl_error();
                Error::InitializationFailed(format!("Failed to create window: {}", error))
            })?;

        let gl_context = window.gl_create_context().map_err(|error| {
            log_sdl_error();
            Error::InitializationFailed(format!("Failed to create GL context: {}", error))
        })?;

        // Swap synchronized with the monitor's vertical refresh.
        if let Err(error) = video.gl_set_swap_interval(SwapInterval::VSync) {
            engine_warn!("kaleido::demo", "VSync unavailable: {}", error);
        }

        let (major, minor) = gl_attr.context_version();
        engine_info!("kaleido::demo", "GL context version: {}.{}", major, minor);

        Ok(Self {
            sdl,
            video,
            window,
            _gl_context: gl_context,
        })
    }

    /// The SDL event pump (one per application)
    pub fn event_pump(&self) -> Result<EventPump> {
        self.sdl.event_pump().map_err(Error::InitializationFailed)
    }

    /// Present the back buffer
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}

/// Log and clear the pending SDL error string, if any
pub fn log_sdl_error() {
    let error = sdl2::get_error();
    if !error.is_empty() {
        engine_warn!("kaleido::demo", "SDL error: {}", error);
        sdl2::clear_error();
    }
}
