use anyhow::Result;
use clap::Parser;
use glint_matrix::Matrix;
use glint_render_wgpu::{GpuContext, QuadRenderer, RenderError};
use glint_window::{FrameTimer, InputState, WindowConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(
    name = "glint-viewer",
    about = "Spinning-quad demo for the glint support layer"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in pixels
    #[arg(long, default_value = "852")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Start in borderless fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Spin speed in radians per second
    #[arg(long, default_value = "1.0")]
    spin: f32,
}

/// Per-frame demo state: where the quad sits and how far it has spun.
struct DemoState {
    input: InputState,
    timer: FrameTimer,
    spin: f32,
    angle: f32,
    position: [f32; 3],
    fullscreen: bool,
}

impl DemoState {
    fn new(spin: f32, fullscreen: bool) -> Self {
        Self {
            input: InputState::new(),
            timer: FrameTimer::new(),
            spin,
            angle: 0.0,
            position: [0.0; 3],
            fullscreen,
        }
    }

    fn update(&mut self, dt: f32) {
        if self.input.is_held(KeyCode::ArrowLeft) {
            self.position[0] -= dt;
        }
        if self.input.is_held(KeyCode::ArrowRight) {
            self.position[0] += dt;
        }
        if self.input.is_held(KeyCode::ArrowUp) {
            self.position[1] += dt;
        }
        if self.input.is_held(KeyCode::ArrowDown) {
            self.position[1] -= dt;
        }
        if self.input.just_pressed(KeyCode::KeyR) {
            self.position = [0.0; 3];
            self.angle = 0.0;
        }
        self.angle += self.spin * dt;
    }

    /// Model-view-projection for the quad this frame: orthographic projection
    /// times translation times spin about the z axis.
    fn mvp(&self, aspect: f32) -> Result<Matrix> {
        let projection = Matrix::orthographic(-aspect, aspect, 1.0, -1.0, -1.0, 1.0)?;
        let half = self.angle / 2.0;
        let rotation = Matrix::rotation(half.cos(), 0.0, 0.0, half.sin())?;
        let translation =
            Matrix::translation(self.position[0], self.position[1], self.position[2])?;

        let model = translation.multiply(&rotation)?;
        Ok(projection.multiply(&model)?)
    }
}

struct ViewerApp {
    config: WindowConfig,
    state: DemoState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<QuadRenderer>,
}

impl ViewerApp {
    fn new(cli: &Cli) -> Self {
        Self {
            config: WindowConfig {
                width: cli.width,
                height: cli.height,
                title: "glint-viewer".into(),
                fullscreen: cli.fullscreen,
            },
            state: DemoState::new(cli.spin, cli.fullscreen),
            window: None,
            gpu: None,
            renderer: None,
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let dt = self.state.timer.tick();
        self.state.update(dt);

        if self.state.input.just_pressed(KeyCode::F11) {
            if let Some(window) = &self.window {
                self.state.fullscreen = !self.state.fullscreen;
                glint_window::set_fullscreen(window, self.state.fullscreen);
            }
        }

        let (Some(gpu), Some(renderer)) = (&self.gpu, &self.renderer) else {
            return Ok(());
        };

        let frame = match gpu.current_frame() {
            Ok(frame) => frame,
            Err(RenderError::Surface(
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
            )) => {
                gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let mvp = self.state.mvp(gpu.aspect())?;
        renderer.render(
            gpu.device(),
            gpu.queue(),
            &frame.view,
            &mvp,
            [0.0, 1.0, 0.0, 1.0],
        )?;
        frame.present();

        self.state.input.end_frame();
        Ok(())
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window =
            glint_window::create_window(event_loop, &self.config).expect("create window");
        let gpu = GpuContext::new(window.clone()).expect("initialize gpu");
        let renderer = QuadRenderer::new(gpu.device(), gpu.queue(), gpu.surface_format());

        window.set_visible(true);
        window.request_redraw();

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.state
                    .input
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    tracing::error!("frame failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("glint-viewer starting");
    tracing::debug!(
        "{} / {} / {}",
        glint_matrix::crate_info(),
        glint_window::crate_info(),
        glint_render_wgpu::crate_info()
    );

    let event_loop = glint_window::init()?;
    let mut app = ViewerApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
