// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod error;
pub mod frame;
pub mod label_side;
pub mod labels;
pub mod orientation;
pub mod projection;
pub mod ref_axis;
pub mod render;
pub mod scene;
pub mod state;
pub mod viewport;

// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use config::{ClinometerConfig, Color, Palette};
pub use error::ClinometerError;
pub use frame::{ClinometerCommand, FrameState};
pub use orientation::{DisplayRotation, Orientation};
pub use projection::{project, LayoutParams};
pub use ref_axis::{PointerEvent, RefAxis};
pub use scene::{Primitive, Scene, Style, TextMetrics};
pub use state::ViewState;
pub use viewport::{ScaleModel, Viewport};

use render::{Canvas, Renderer};
use scene::Point;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Windowed clinometer view - the primary public interface
#[derive(Debug, Clone)]
pub struct Clinometer {
    config: ClinometerConfig,
    orientation: Orientation,
}

impl Clinometer {
    pub fn new(config: ClinometerConfig) -> Self {
        Self {
            config,
            orientation: Orientation::default(),
        }
    }

    pub fn config(&self) -> &ClinometerConfig {
        &self.config
    }

    /// Orientation shown until the first command arrives.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn show(&mut self) -> Result<(), ClinometerError> {
        self.run_window(None)
    }

    pub fn show_with_commands(&mut self, receiver: Receiver<ClinometerCommand>) -> Result<(), ClinometerError> {
        self.run_window(Some(receiver))
    }

    fn run_window(&self, receiver: Option<Receiver<ClinometerCommand>>) -> Result<(), ClinometerError> {
        self.config.validate()?;
        let mut renderer = Renderer::new(&self.config, self.config.load_font()?);

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut frame = FrameState::new(&self.config, size.width, size.height);
        frame.set_orientation(self.orientation);
        tracing::info!(
            width = size.width,
            height = size.height,
            font = renderer.has_font(),
            "clinometer window opened"
        );

        let window_clone = window.clone();
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();
        let mut cursor = PhysicalPosition::new(0.0, 0.0);

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            // Minimised: keep the old buffer, draw nothing.
                            frame.resize(0, 0);
                            return;
                        }
                        let resized = pixels
                            .resize_buffer(new_size.width, new_size.height)
                            .and_then(|()| pixels.resize_surface(new_size.width, new_size.height));
                        if let Err(err) = resized {
                            tracing::error!(error = %err, "failed to resize pixel buffer");
                            window_target.exit();
                            return;
                        }
                        frame.resize(new_size.width, new_size.height);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = position;
                        frame.pointer(PointerEvent::Move(Point::new(position.x, position.y)));
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => {
                        let at = Point::new(cursor.x, cursor.y);
                        let event = match state {
                            ElementState::Pressed => PointerEvent::PrimaryPress(at),
                            ElementState::Released => PointerEvent::Release(at),
                        };
                        frame.pointer(event);
                    }
                    WindowEvent::Touch(Touch { phase, location, .. }) => {
                        let at = Point::new(location.x, location.y);
                        let event = match phase {
                            TouchPhase::Started => PointerEvent::PrimaryPress(at),
                            TouchPhase::Moved => PointerEvent::Move(at),
                            TouchPhase::Ended | TouchPhase::Cancelled => PointerEvent::Release(at),
                        };
                        frame.pointer(event);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            frame.drain(receiver);
                        }
                        if frame.viewport().is_degenerate() {
                            return;
                        }

                        let scene = frame.next_scene(&renderer);
                        let (width, height) = (frame.viewport().width as usize, frame.viewport().height as usize);
                        let mut canvas = Canvas::new(pixels.frame_mut(), width, height);
                        renderer.render(&scene, &mut canvas);
                        if let Err(err) = pixels.render() {
                            tracing::error!(error = %err, "failed to present frame");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
