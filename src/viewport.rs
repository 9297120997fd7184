//! Viewport transform and pan/zoom gesture handling.
//!
//! Screen coordinates here are canvas-local pixels (origin at the canvas'
//! top-left corner). The UI layer subtracts the canvas rectangle's origin
//! before handing pointer positions to the engine.

use crate::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use eframe::egui;

/// Pan offset plus zoom factor mapping world space to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Screen-space translation applied after scaling
    pub pan: egui::Vec2,
    /// Scale factor (1.0 = 100%)
    pub zoom: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pan: egui::Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Transform {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    ///
    /// # Arguments
    ///
    /// * `screen_pos` - Canvas-local position in screen space (pixels)
    ///
    /// # Returns
    ///
    /// The corresponding position in world space
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.pan) / self.zoom
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    ///
    /// # Arguments
    ///
    /// * `world_pos` - Position in world space
    ///
    /// # Returns
    ///
    /// The corresponding canvas-local position in screen space (pixels)
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        world_pos * self.zoom + self.pan
    }

    /// Returns the transform that keeps `anchor` visually fixed while switching to `new_zoom`.
    pub fn zoomed_about(&self, anchor: egui::Pos2, new_zoom: f32) -> Self {
        let anchor_world = self.screen_to_world(anchor);
        Self {
            pan: anchor - anchor_world * new_zoom,
            zoom: new_zoom,
        }
    }
}

/// Size of the visible canvas, independent of any rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFrame {
    /// Width and height of the canvas in screen pixels
    pub size: egui::Vec2,
}

impl Default for ViewportFrame {
    fn default() -> Self {
        Self {
            size: egui::vec2(1200.0, 800.0),
        }
    }
}

impl ViewportFrame {
    /// Canvas-local center of the frame.
    pub fn center(&self) -> egui::Pos2 {
        (self.size / 2.0).to_pos2()
    }

    /// Returns true if the canvas-local point lies inside the frame.
    pub fn contains(&self, screen_pos: egui::Pos2) -> bool {
        egui::Rect::from_min_size(egui::Pos2::ZERO, self.size).contains(screen_pos)
    }
}

/// Closed range of permitted zoom factors plus the step between zoom levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// Lowest zoom factor
    pub min: f32,
    /// Highest zoom factor
    pub max: f32,
    /// Factor applied per zoom step
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

impl ZoomLimits {
    /// Clamps a zoom factor into `[min, max]`.
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Multiply the zoom by the step factor
    In,
    /// Divide the zoom by the step factor
    Out,
}

/// Pan gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    /// No pan in progress
    #[default]
    Idle,
    /// Primary button held on the background
    Panning {
        /// Last pointer position seen during the pan
        last: egui::Pos2,
    },
}

/// Owns the viewport transform and the pan state machine.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    transform: Transform,
    frame: ViewportFrame,
    limits: ZoomLimits,
    pan_state: PanState,
    pan_velocity: egui::Vec2,
}

impl ViewportController {
    /// Creates a controller at zoom 1 and zero pan with the given zoom limits.
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    /// Current transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.transform.zoom
    }

    /// Current pan offset.
    pub fn pan(&self) -> egui::Vec2 {
        self.transform.pan
    }

    /// Zoom limits in effect.
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Current frame.
    pub fn frame(&self) -> ViewportFrame {
        self.frame
    }

    /// Updates the frame size, e.g. after the window was resized.
    pub fn set_frame(&mut self, frame: ViewportFrame) {
        self.frame = frame;
    }

    /// Current pan gesture state.
    pub fn pan_state(&self) -> PanState {
        self.pan_state
    }

    /// Returns true while a pan gesture is active.
    pub fn is_panning(&self) -> bool {
        matches!(self.pan_state, PanState::Panning { .. })
    }

    /// Delta applied by the most recent pan move.
    pub fn pan_velocity(&self) -> egui::Vec2 {
        self.pan_velocity
    }

    /// Converts a canvas-local screen point to world space with the current transform.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        self.transform.screen_to_world(screen_pos)
    }

    /// Converts a world point to canvas-local screen space with the current transform.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        self.transform.world_to_screen(world_pos)
    }

    /// Idle -> Panning: records the press point and zeroes the velocity.
    pub fn begin_pan(&mut self, screen_pos: egui::Pos2) {
        self.pan_state = PanState::Panning { last: screen_pos };
        self.pan_velocity = egui::Vec2::ZERO;
    }

    /// Applies the delta since the last recorded point while panning.
    ///
    /// # Returns
    ///
    /// `true` if a pan was in progress and the move was applied
    pub fn pan_move(&mut self, screen_pos: egui::Pos2) -> bool {
        let PanState::Panning { last } = self.pan_state else {
            return false;
        };
        let delta = screen_pos - last;
        self.transform.pan += delta;
        self.pan_velocity = delta;
        self.pan_state = PanState::Panning { last: screen_pos };
        true
    }

    /// Panning -> Idle. Safe to call while idle.
    pub fn end_pan(&mut self) {
        self.pan_state = PanState::Idle;
    }

    /// Zooms one step about a canvas-local anchor point.
    ///
    /// The world point under `anchor` stays under `anchor`. Zoom and pan
    /// are replaced together.
    ///
    /// # Returns
    ///
    /// `true` if the zoom changed, `false` if it was already at the limit
    pub fn zoom_at(&mut self, anchor: egui::Pos2, direction: ZoomDirection) -> bool {
        let old_zoom = self.transform.zoom;
        let new_zoom = match direction {
            ZoomDirection::In => self.limits.clamp(old_zoom * self.limits.step),
            ZoomDirection::Out => self.limits.clamp(old_zoom / self.limits.step),
        };
        if (new_zoom - old_zoom).abs() <= f32::EPSILON {
            return false;
        }
        self.transform = self.transform.zoomed_about(anchor, new_zoom);
        true
    }

    /// Zooms one step in about the frame center.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.frame.center(), ZoomDirection::In)
    }

    /// Zooms one step out about the frame center.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.frame.center(), ZoomDirection::Out)
    }

    /// Sets zoom to 1 and pan to the origin.
    pub fn reset(&mut self) {
        self.transform = Transform::default();
        self.pan_velocity = egui::Vec2::ZERO;
    }

    /// Centers a world point in the frame without changing the zoom.
    pub fn pan_to(&mut self, world_pos: egui::Pos2) {
        let center = self.frame.center();
        self.transform.pan = center - world_pos * self.transform.zoom;
        self.pan_velocity = egui::Vec2::ZERO;
    }
}
