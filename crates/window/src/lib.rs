//! Thin windowing wrapper over winit: event-loop setup, window creation,
//! keyboard state, and frame timing.
//!
//! # Invariants
//! - Windows are created hidden; the caller shows them once the first frame
//!   is ready.
//! - Input state changes only when the caller feeds it events.

mod config;
mod input;
mod timing;

pub use config::{WindowConfig, center, create_window, set_fullscreen};
pub use input::InputState;
pub use timing::FrameTimer;

use winit::event_loop::{ControlFlow, EventLoop};

/// Errors from event-loop and window setup.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Create(#[from] winit::error::OsError),
}

/// Create the event loop that drives all windows, polling continuously.
pub fn init() -> Result<EventLoop<()>, WindowError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    Ok(event_loop)
}

pub fn crate_info() -> &'static str {
    "glint-window v0.1.0"
}
