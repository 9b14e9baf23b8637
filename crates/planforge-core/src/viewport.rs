//! Viewport pan/zoom controller and world↔screen mapping.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom cap when fitting the whole plan.
pub const FIT_ALL_MAX_ZOOM: f64 = 2.0;

/// View transform state for the canvas.
///
/// The viewport is consulted by the host for coordinate conversion; it
/// never touches element data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan) in screen units.
    pub pan_offset: Vec2,
    /// Current zoom level, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// World → screen transform: `p · zoom + pan`.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan_offset) * Affine::scale(self.zoom)
    }

    /// Screen → world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.pan_offset)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform() * world
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.inverse_transform() * screen
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Set the zoom level directly, clamped; the pan offset is untouched.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by a factor, keeping the given screen anchor fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let ratio = new_zoom / self.zoom;
        self.zoom = new_zoom;
        // pan' = anchor - (anchor - pan) * ratio keeps the world point
        // under the anchor stationary.
        self.pan_offset = Vec2::new(
            anchor.x - (anchor.x - self.pan_offset.x) * ratio,
            anchor.y - (anchor.y - self.pan_offset.y) * ratio,
        );
    }

    pub fn reset(&mut self) {
        self.pan_offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit the view to the given world bounds, capping zoom at `max_zoom`.
    ///
    /// A degenerate axis (a single axis-aligned wall) puts no constraint
    /// on zoom; the other axis still does, and the bounds stay centered.
    pub fn fit_to_bounds(&mut self, bounds: Rect, canvas: Size, padding: f64, max_zoom: f64) {
        let usable = Size::new(
            (canvas.width - padding * 2.0).max(1.0),
            (canvas.height - padding * 2.0).max(1.0),
        );
        let scale_x = if bounds.width() > 0.0 {
            usable.width / bounds.width()
        } else {
            max_zoom
        };
        let scale_y = if bounds.height() > 0.0 {
            usable.height / bounds.height()
        } else {
            max_zoom
        };
        self.zoom = scale_x.min(scale_y).min(max_zoom).clamp(MIN_ZOOM, MAX_ZOOM);

        let center = bounds.center();
        self.pan_offset = Vec2::new(
            canvas.width / 2.0 - center.x * self.zoom,
            canvas.height / 2.0 - center.y * self.zoom,
        );
    }
}
