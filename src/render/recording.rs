use crate::foundation::core::{Rect, Rgba8, Size, sanitize_device_pixel_ratio};
use crate::foundation::error::RippleResult;
use crate::render::backend::Surface;

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
    /// `resize(logical, device_pixel_ratio)`.
    Resize {
        /// Logical size.
        logical: Size,
        /// Sanitized device pixel ratio.
        device_pixel_ratio: f64,
    },
    /// `clear_rect(rect)`.
    ClearRect(Rect),
    /// `set_fill_color(color)`.
    SetFillColor(Rgba8),
    /// `set_global_alpha(alpha)`.
    SetGlobalAlpha(f32),
    /// `fill_rect(rect)`, with the alpha in effect at the time.
    FillRect {
        /// Filled rectangle in logical units.
        rect: Rect,
        /// Global alpha applied to the fill.
        alpha: f32,
    },
}

/// A [`Surface`] that records calls instead of drawing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    logical: Size,
    alpha: f32,
    calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            logical: Size::ZERO,
            alpha: 1.0,
            calls: Vec::new(),
        }
    }
}

impl RecordingSurface {
    /// Empty, zero-sized recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drop the recorded calls.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Fills recorded since the last full clear.
    pub fn fills_since_clear(&self) -> Vec<(Rect, f32)> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::ClearRect(_)))
            .map_or(0, |i| i + 1);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { rect, alpha } => Some((*rect, *alpha)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, logical: Size, device_pixel_ratio: f64) -> RippleResult<()> {
        self.logical = logical;
        self.calls.push(DrawCall::Resize {
            logical,
            device_pixel_ratio: sanitize_device_pixel_ratio(device_pixel_ratio),
        });
        Ok(())
    }

    fn logical_size(&self) -> Size {
        self.logical
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::ClearRect(rect));
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.calls.push(DrawCall::SetFillColor(color));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.calls.push(DrawCall::SetGlobalAlpha(alpha));
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::FillRect {
            rect,
            alpha: self.alpha,
        });
    }
}
