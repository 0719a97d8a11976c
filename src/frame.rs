//! Per-frame driver: owns the view state between frames and turns queued
//! commands into the next scene.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use std::sync::mpsc::Receiver;

use crate::config::ClinometerConfig;
use crate::orientation::{DisplayRotation, Orientation};
use crate::projection::{self, LayoutParams};
use crate::ref_axis::PointerEvent;
use crate::scene::{Point, Scene, TextMetrics};
use crate::state::ViewState;
use crate::viewport::{ScaleModel, ScaleParams, Viewport};

/// Command enum for type-safe view updates
#[derive(Debug, Clone, PartialEq)]
pub enum ClinometerCommand {
    SetOrientation(Orientation),
    SetDisplayRotation(DisplayRotation),
    /// Primary press in physical pixels.
    Press { x: f64, y: f64 },
}

#[derive(Debug, Clone)]
pub struct FrameState {
    viewport: Viewport,
    scale_params: ScaleParams,
    scale: ScaleModel,
    layout: LayoutParams,
    label_threshold: f64,
    orientation: Orientation,
    view: ViewState,
}

impl FrameState {
    pub fn new(config: &ClinometerConfig, width: u32, height: u32) -> Self {
        let viewport = Viewport::new(width, height).with_rotation(config.initial_display_rotation);
        let scale_params = config.scale_params();
        Self {
            viewport,
            scale: ScaleModel::compute_with(&viewport, &scale_params),
            scale_params,
            layout: config.layout_params(),
            label_threshold: config.label_switch_threshold,
            orientation: Orientation::default(),
            view: ViewState::default(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scale(&self) -> &ScaleModel {
        &self.scale
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.viewport.width, self.viewport.height) {
            return;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.scale = ScaleModel::compute_with(&self.viewport, &self.scale_params);
        tracing::debug!(
            width,
            height,
            ring_radius = self.scale.ring_pixel_radius,
            rings = self.scale.ring_count,
            "viewport resized"
        );
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn apply(&mut self, command: ClinometerCommand) {
        match command {
            ClinometerCommand::SetOrientation(orientation) => self.set_orientation(orientation),
            ClinometerCommand::SetDisplayRotation(rotation) => {
                if rotation != self.viewport.display_rotation {
                    tracing::info!(rotation = rotation.degrees(), "display rotation changed");
                }
                self.viewport.display_rotation = rotation;
            }
            ClinometerCommand::Press { x, y } => {
                self.pointer(PointerEvent::PrimaryPress(Point::new(x, y)));
            }
        }
    }

    /// Applies every queued command without blocking. Later orientations
    /// overwrite earlier ones, so only the newest reaches the frame.
    pub fn drain(&mut self, receiver: &Receiver<ClinometerCommand>) -> usize {
        let mut applied = 0;
        while let Ok(command) = receiver.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Returns true when the reference axis changed.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        self.view.handle_pointer(event, &self.viewport, &self.scale)
    }

    /// Runs the label hysteresis step, then projects the frame.
    pub fn next_scene<M: TextMetrics + ?Sized>(&mut self, metrics: &M) -> Scene {
        self.view
            .observe(&self.orientation, self.viewport.display_rotation, self.label_threshold);
        projection::project(
            &self.orientation,
            &self.viewport,
            &self.scale,
            &self.view,
            &self.layout,
            metrics,
        )
    }
}
