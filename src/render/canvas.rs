use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::RippleResult;
use crate::render::backend::{CellRenderer, OPACITY_EPSILON, RenderFrame, Surface};

/// Rasterizes cells straight onto a [`Surface`].
#[derive(Debug)]
pub struct CanvasRenderer<S> {
    surface: S,
}

impl<S: Surface> CanvasRenderer<S> {
    /// Wrap a surface.
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Borrow the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the underlying surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Unwrap the surface.
    pub fn into_inner(self) -> S {
        self.surface
    }
}

impl<S: Surface> CellRenderer for CanvasRenderer<S> {
    fn resize(&mut self, logical: Size, device_pixel_ratio: f64) -> RippleResult<()> {
        self.surface.resize(logical, device_pixel_ratio)
    }

    fn render(&mut self, frame: &RenderFrame<'_>) -> RippleResult<()> {
        let full = Rect::from_origin_size(Point::ZERO, self.surface.logical_size());
        self.surface.clear_rect(full);
        self.surface.set_fill_color(frame.fill);

        for cell in frame.cells {
            if cell.opacity <= OPACITY_EPSILON {
                continue;
            }
            self.surface.set_global_alpha(cell.opacity);
            self.surface.fill_rect(cell.snapped_rect());
        }

        // Alpha must not leak into unrelated draws on the same surface.
        self.surface.set_global_alpha(1.0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
