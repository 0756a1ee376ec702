//! Voxpaint - interactive voxel placement

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use voxpaint::core::types::Vec2;
use voxpaint::core::{
    config::ToolConfig, input::InputState, logging, orbit::OrbitController,
};
use voxpaint::editor::{EditorSession, ViewMode};
use voxpaint::render::{GpuContext, Renderer};

struct App {
    config: ToolConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    session: EditorSession,
    orbit: OrbitController,
    input: InputState,
}

impl App {
    fn new(config: ToolConfig) -> Self {
        let session = EditorSession::new(&config);
        let mut orbit = OrbitController::new(config.orbit_sensitivity, config.zoom_speed);
        orbit.sync_from_camera(session.camera());

        Self {
            config,
            window: None,
            gpu: None,
            renderer: None,
            session,
            orbit,
            input: InputState::new(),
        }
    }

    /// Current pointer position as normalized device coordinates
    fn pointer_ndc(&self) -> Option<Vec2> {
        let window = self.window.as_ref()?;
        let size = window.inner_size();
        Some(
            self.input
                .pointer_ndc(size.width.max(1), size.height.max(1)),
        )
    }

    /// The orbit state moved: apply it in the perspective view, and in the
    /// fixed views just ask for a redraw.
    fn orbit_changed(&mut self) {
        if self.session.view().mode().is_perspective() {
            self.orbit.apply_to(self.session.view_mut().camera_mut());
        }
        self.session.request_render();
    }

    fn select_view(&mut self, mode: ViewMode) {
        self.session.select_view(mode);
        if mode.is_perspective() {
            // The camera was re-homed; continue orbiting from there
            self.orbit.sync_from_camera(self.session.camera());
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool, event_loop: &ActiveEventLoop) {
        match code {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.session.set_erase_mode(pressed);
            }
            KeyCode::Escape if pressed => event_loop.exit(),
            KeyCode::Digit1 if pressed => self.select_view(ViewMode::OrthoFront),
            KeyCode::Digit2 if pressed => self.select_view(ViewMode::OrthoSide),
            KeyCode::Digit3 if pressed => self.select_view(ViewMode::OrthoTop),
            KeyCode::Digit4 if pressed => self.select_view(ViewMode::Perspective),
            _ => {}
        }
    }

    fn render_frame(&mut self) {
        if let (Some(gpu), Some(renderer)) = (self.gpu.as_ref(), self.renderer.as_mut()) {
            let result = renderer.render(
                gpu,
                self.session.set(),
                self.session.camera(),
                self.session.preview(),
            );
            if let Err(e) = result {
                log::error!("Render failed: {}", e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone()))
            .expect("Failed to create GPU context");

        let size = window.inner_size();
        self.session.set_viewport(size.width, size.height);

        log::info!("Window created: {}x{}", size.width, size.height);
        log::info!("GPU: {}", gpu.adapter.get_info().name);
        log::info!("Click: place, Shift+click: erase, right-drag: orbit, 1/2/3/4: views");

        let renderer = Renderer::new(&gpu, &self.config);

        // First frame must be requested explicitly; the loop otherwise waits
        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.gpu = Some(gpu);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                        if let Some(renderer) = &mut self.renderer {
                            renderer.resize(gpu);
                        }
                    }
                    self.session.set_viewport(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(code, event.state.is_pressed(), event_loop);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => {
                    if state.is_pressed() {
                        if let Some(ndc) = self.pointer_ndc() {
                            self.session.pointer_down(ndc);
                        }
                    }
                }
                MouseButton::Right => {
                    self.orbit.set_dragging(state.is_pressed());
                }
                _ => {}
            },
            WindowEvent::CursorMoved { .. } => {
                let drag = self.input.take_cursor_delta();
                if self.orbit.is_dragging() && self.orbit.update(drag, 0.0) {
                    self.orbit_changed();
                }
                if let Some(ndc) = self.pointer_ndc() {
                    self.session.pointer_moved(ndc);
                }
            }
            WindowEvent::MouseWheel { .. } => {
                let scroll = self.input.take_scroll();
                if self.orbit.update(Vec2::ZERO, scroll) {
                    self.orbit_changed();
                }
            }
            WindowEvent::RedrawRequested => {
                // Drain the flag so the post-event check below does not
                // immediately schedule another frame
                self.session.take_render_request();
                self.render_frame();
            }
            _ => {}
        }

        if self.session.take_render_request() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn main() {
    logging::init();
    log::info!("Voxpaint starting...");

    let args: Vec<String> = std::env::args().collect();
    let config = match parse_config_arg(&args) {
        Some(path) => match ToolConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => ToolConfig::default(),
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}

/// Parse --config argument from command line
fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}
