use crate::WindowError;
use std::sync::Arc;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

/// Initial window settings.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 852,
            height: 480,
            title: "glint".into(),
            fullscreen: false,
        }
    }
}

impl WindowConfig {
    /// Map to winit attributes. Windows start hidden so the caller can show
    /// them once the first frame is ready.
    pub fn attributes(&self) -> WindowAttributes {
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_visible(false);
        if self.fullscreen {
            attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
        } else {
            attributes
        }
    }
}

/// Create a window from the config. Windowed (non-fullscreen) windows are
/// centered on their monitor.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
) -> Result<Arc<Window>, WindowError> {
    let window = Arc::new(event_loop.create_window(config.attributes())?);
    if !config.fullscreen {
        center(&window);
    }
    tracing::debug!("created {}x{} window", config.width, config.height);
    Ok(window)
}

/// Move the window to the center of its monitor.
pub fn center(window: &Window) {
    let Some(monitor) = window.current_monitor() else {
        return;
    };
    let monitor_size = monitor.size();
    let monitor_position = monitor.position();
    let window_size = window.outer_size();

    window.set_outer_position(PhysicalPosition::new(
        monitor_position.x + (monitor_size.width.saturating_sub(window_size.width) / 2) as i32,
        monitor_position.y + (monitor_size.height.saturating_sub(window_size.height) / 2) as i32,
    ));
}

/// Switch the window in or out of borderless fullscreen on its monitor.
pub fn set_fullscreen(window: &Window, fullscreen: bool) {
    if fullscreen {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        window.set_fullscreen(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 852);
        assert_eq!(config.height, 480);
        assert!(!config.fullscreen);
    }

    #[test]
    fn windows_start_hidden() {
        let attributes = WindowConfig::default().attributes();
        assert!(!attributes.visible);
    }

    #[test]
    fn fullscreen_maps_to_borderless() {
        let config = WindowConfig {
            fullscreen: true,
            ..WindowConfig::default()
        };
        assert!(matches!(
            config.attributes().fullscreen,
            Some(Fullscreen::Borderless(None))
        ));
        assert!(WindowConfig::default().attributes().fullscreen.is_none());
    }
}
