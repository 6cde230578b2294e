//! Rendering seam. The pipeline produces a [`VisualSpec`]; an adapter owns
//! pushing it to an actual rendering surface and reporting the surface's
//! live state back.

use crate::core::spec::{DataZoomSpec, VisualSpec};

pub trait RenderAdapter {
    /// Whether a surface exists and holds state worth preserving.
    fn is_live(&self) -> bool;

    /// Pushes a finished spec to the surface. `reinit` tears the surface
    /// down first instead of merging.
    fn apply(&mut self, spec: &VisualSpec, reinit: bool);

    /// The surface's current zoom windows, in spec order.
    fn current_zoom(&self) -> Vec<DataZoomSpec>;

    /// Moves one zoom control to a percent window.
    fn dispatch_zoom(&mut self, idx: usize, start: f64, end: f64);

    fn clear_brush(&mut self) {}

    fn resize(&mut self) {}

    fn dispose(&mut self) {}
}

/// Adapter that records what it was asked to do without rendering anything.
/// Serves headless runs and the test suite.
#[derive(Debug, Default)]
pub struct NullRenderAdapter {
    applied: Vec<VisualSpec>,
    zoom: Vec<DataZoomSpec>,
    reinit_count: usize,
    resize_count: usize,
    brush_clear_count: usize,
    disposed: bool,
}

impl NullRenderAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_applied(&self) -> Option<&VisualSpec> {
        self.applied.last()
    }

    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    #[must_use]
    pub fn reinit_count(&self) -> usize {
        self.reinit_count
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    #[must_use]
    pub fn brush_clear_count(&self) -> usize {
        self.brush_clear_count
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Test hook: pretend the user dragged a zoom window on the surface.
    pub fn set_zoom_window(&mut self, idx: usize, start: Option<f64>, end: Option<f64>) {
        if let Some(zoom) = self.zoom.get_mut(idx) {
            zoom.start = start;
            zoom.end = end;
        }
    }
}

impl RenderAdapter for NullRenderAdapter {
    fn is_live(&self) -> bool {
        !self.disposed && !self.applied.is_empty()
    }

    fn apply(&mut self, spec: &VisualSpec, reinit: bool) {
        if reinit {
            self.reinit_count += 1;
            self.applied.clear();
        }
        self.zoom = spec.data_zoom.to_vec();
        self.applied.push(spec.clone());
    }

    fn current_zoom(&self) -> Vec<DataZoomSpec> {
        self.zoom.clone()
    }

    fn dispatch_zoom(&mut self, idx: usize, start: f64, end: f64) {
        if let Some(zoom) = self.zoom.get_mut(idx) {
            zoom.start = Some(start);
            zoom.end = Some(end);
            zoom.start_value = None;
            zoom.end_value = None;
        }
    }

    fn clear_brush(&mut self) {
        self.brush_clear_count += 1;
    }

    fn resize(&mut self) {
        self.resize_count += 1;
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}
