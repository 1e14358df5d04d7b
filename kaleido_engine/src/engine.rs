/// Kaleido Engine - Singleton manager for engine subsystems
///
/// Global singleton management for the graphics context and the logger.
/// Thread-safe static storage with RwLock; the context itself is still a
/// single-thread resource and every GPU operation must run on the thread
/// that owns the underlying driver context.

use std::sync::{Arc, Mutex, OnceLock, RwLock};
use std::time::SystemTime;

use crate::context::GraphicsContext;
use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Graphics context singleton
    context: RwLock<Option<Arc<Mutex<dyn GraphicsContext>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            context: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the engine subsystems (graphics context,
/// logger) using a singleton pattern with thread-safe access.
///
/// # Example
///
/// ```ignore
/// use kaleido_engine::kaleido::Engine;
/// use kaleido_engine_context_opengl::OpenGlContext;
///
/// // Initialize engine
/// Engine::initialize()?;
///
/// // Create the graphics context singleton
/// Engine::create_context(OpenGlContext::load(|symbol| loader(symbol)))?;
///
/// // Access it globally
/// let context = Engine::context()?;
///
/// // Cleanup
/// Engine::destroy_context()?;
/// Engine::shutdown();
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("kaleido::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("kaleido::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("kaleido::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    /// Initialize the engine
    ///
    /// Must be called once at application startup before creating any
    /// subsystems. Idempotent.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine and drop all singletons
    ///
    /// Call at application shutdown. After this, `initialize()` must run
    /// again before new subsystems are created.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut context) = state.context.write() {
                *context = None;
            }
        }
    }

    /// Create and register the graphics context singleton
    ///
    /// Wraps the context in `Arc<Mutex<_>>` and registers it globally.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A context already exists
    /// - The context lock is poisoned
    pub fn create_context<C: GraphicsContext + 'static>(context: C) -> Result<()> {
        let arc_context: Arc<Mutex<dyn GraphicsContext>> = Arc::new(Mutex::new(context));

        Self::register_context(arc_context)?;

        crate::engine_info!("kaleido::Engine", "Graphics context singleton created");

        Ok(())
    }

    /// Register a graphics context singleton (internal use)
    pub(crate) fn register_context(context: Arc<Mutex<dyn GraphicsContext>>) -> Result<()> {
        let state = ENGINE_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Engine not initialized. Call Engine::initialize() first.".to_string(),
            ))
        })?;

        let mut lock = state.context.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Context lock poisoned".to_string()))
        })?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                "Graphics context already exists. Call Engine::destroy_context() first."
                    .to_string(),
            )));
        }

        *lock = Some(context);
        Ok(())
    }

    /// Get the graphics context singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The context has not been created
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kaleido_engine::kaleido::Engine;
    ///
    /// let context = Engine::context()?;
    /// let mut guard = context.lock().unwrap();
    /// // Use guard...
    /// # Ok::<(), kaleido_engine::Error>(())
    /// ```
    pub fn context() -> Result<Arc<Mutex<dyn GraphicsContext>>> {
        let state = ENGINE_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Engine not initialized. Call Engine::initialize() first.".to_string(),
            ))
        })?;

        let lock = state.context.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Context lock poisoned".to_string()))
        })?;

        lock.clone().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Graphics context not created. Call Engine::create_context() first.".to_string(),
            ))
        })
    }

    /// Destroy the graphics context singleton
    ///
    /// Removes the singleton, allowing a new one to be created. Existing
    /// references stay valid until dropped; GPU resources owned through
    /// them must be released before the underlying driver context dies.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_context() -> Result<()> {
        let state = ENGINE_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Engine not initialized".to_string(),
            ))
        })?;

        let mut lock = state.context.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Context lock poisoned".to_string()))
        })?;

        *lock = None;

        crate::engine_info!("kaleido::Engine", "Graphics context singleton destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut context) = state.context.write() {
                *context = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replaces the default logger with a custom implementation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kaleido_engine::kaleido::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset the logger to `DefaultLogger`
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by the engine_trace!/engine_debug!/engine_info!/engine_warn!
    /// macros.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information
    ///
    /// Used by the engine_error! macro to include the source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
