use anyhow::{Context, Result};
use clap::Parser;
use marchview_camera::CameraConfig;
use marchview_control::{FrameRequest, FrameScheduler, FrameSlot, RenderLoop};
use marchview_render_wgpu::{ShaderSources, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "marchview-desktop", about = "Fly a camera through a fragment shader scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Vertex shader source (WGSL)
    #[arg(long, default_value = "shaders/scene.vert.wgsl")]
    vertex: PathBuf,

    /// Fragment shader source (WGSL)
    #[arg(long, default_value = "shaders/scene.frag.wgsl")]
    fragment: PathBuf,

    /// Optional YAML camera config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Frame scheduler backed by window redraw requests.
///
/// winit coalesces redraw requests, cannot withdraw one, and also sends
/// redraws of its own (expose, resize). The slot tells a redraw we asked for
/// apart from the rest; only the former ticks the loop.
struct RedrawScheduler {
    window: Arc<Window>,
    slot: FrameSlot,
}

impl RedrawScheduler {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            slot: FrameSlot::new(),
        }
    }

    /// Whether the redraw being handled answers an outstanding request.
    fn take_fired(&mut self) -> bool {
        self.slot.take().is_some()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let request = self.slot.request();
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        tracing::trace!(?request, "frame cancelled");
        self.slot.cancel(request);
    }
}

/// Host key string for a logical key: the typed character, or the named
/// key's variant name (`ArrowUp`, `Escape`).
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

struct Viewer {
    window: Arc<Window>,
    renderer: WgpuRenderer,
    frame_loop: RenderLoop<RedrawScheduler>,
}

struct App {
    sources: ShaderSources,
    camera: CameraConfig,
    size: PhysicalSize<u32>,
    viewer: Option<Viewer>,
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(sources: ShaderSources, camera: CameraConfig, size: PhysicalSize<u32>) -> Self {
        Self {
            sources,
            camera,
            size,
            viewer: None,
            startup_error: None,
        }
    }

    fn init_viewer(&self, event_loop: &ActiveEventLoop) -> Result<Viewer> {
        let attrs = Window::default_attributes()
            .with_title("marchview")
            .with_inner_size(self.size);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let size = window.inner_size();
        let mut renderer = WgpuRenderer::new(window.clone(), size.width, size.height, &self.sources)?;

        let mut frame_loop =
            RenderLoop::new(self.camera.camera(), RedrawScheduler::new(window.clone()));
        frame_loop.start(&mut renderer)?;

        Ok(Viewer {
            window,
            renderer,
            frame_loop,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        match self.init_viewer(event_loop) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                viewer.renderer.resize(new_size.width, new_size.height);
                viewer.window.request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if repeat {
                    return;
                }
                let Some(key) = key_name(&logical_key) else {
                    return;
                };
                match state {
                    ElementState::Pressed => viewer.frame_loop.key_down(&key),
                    ElementState::Released => viewer.frame_loop.key_up(&key),
                }
            }
            WindowEvent::Focused(false) => {
                // Key-up events are lost while unfocused.
                let held: Vec<String> = viewer.frame_loop.input().held().map(String::from).collect();
                for key in &held {
                    viewer.frame_loop.key_up(key);
                }
            }
            WindowEvent::RedrawRequested => {
                let fired = viewer.frame_loop.scheduler_mut().take_fired();
                let result = viewer.frame_loop.on_redraw(fired, &mut viewer.renderer);
                if let Err(e) = result {
                    tracing::error!("render error: {e}");
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("marchview-desktop starting");

    let camera = match &cli.config {
        Some(path) => CameraConfig::load(path)
            .with_context(|| format!("loading camera config {}", path.display()))?,
        None => CameraConfig::default(),
    };
    let sources = ShaderSources::load(&cli.vertex, &cli.fragment)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(sources, camera, PhysicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.startup_error.take() {
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{NamedKey, SmolStr};

    #[test]
    fn arrow_keys_map_to_host_names() {
        assert_eq!(
            key_name(&Key::Named(NamedKey::ArrowUp)).as_deref(),
            Some("ArrowUp")
        );
        assert_eq!(
            key_name(&Key::Named(NamedKey::ArrowLeft)).as_deref(),
            Some("ArrowLeft")
        );
    }

    #[test]
    fn characters_map_verbatim() {
        assert_eq!(key_name(&Key::Character(SmolStr::new("w"))).as_deref(), Some("w"));
        assert_eq!(key_name(&Key::Character(SmolStr::new("W"))).as_deref(), Some("W"));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["marchview-desktop"]);
        assert_eq!(cli.vertex, PathBuf::from("shaders/scene.vert.wgsl"));
        assert_eq!(cli.fragment, PathBuf::from("shaders/scene.frag.wgsl"));
        assert_eq!((cli.width, cli.height), (1280, 720));
        assert!(cli.config.is_none());
    }
}
