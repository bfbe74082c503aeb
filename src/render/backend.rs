use crate::foundation::core::{Rect, Rgba8, Size};
use crate::foundation::error::RippleResult;
use crate::pixel::grid::Cell;

/// Cells at or below this opacity are not drawn.
pub const OPACITY_EPSILON: f32 = 0.01;

/// A rendered surface as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in physical pixels.
    pub width: u32,
    /// Frame height in physical pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// A 2D raster drawing target.
///
/// Coordinates are logical units. Implementations apply the device pixel ratio once, when
/// the surface is sized, never per draw call.
pub trait Surface {
    /// Size the backing store for `logical` units at `device_pixel_ratio` physical pixels
    /// per unit. Drops any previous content.
    fn resize(&mut self, logical: Size, device_pixel_ratio: f64) -> RippleResult<()>;
    /// Current logical size.
    fn logical_size(&self) -> Size;
    /// Make `rect` fully transparent.
    fn clear_rect(&mut self, rect: Rect);
    /// Color used by subsequent [`Surface::fill_rect`] calls.
    fn set_fill_color(&mut self, color: Rgba8);
    /// Alpha multiplier applied to subsequent fills.
    fn set_global_alpha(&mut self, alpha: f32);
    /// Current alpha multiplier.
    fn global_alpha(&self) -> f32;
    /// Fill `rect` with the current color and alpha.
    fn fill_rect(&mut self, rect: Rect);
}

/// Inputs for painting one frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    /// Cells with their opacity for this frame.
    pub cells: &'a [Cell],
    /// Fill color of lit cells.
    pub fill: Rgba8,
    /// Host timestamp of the frame in milliseconds.
    pub now_ms: f64,
}

/// Paints the Wave Animator's opacity state.
///
/// Implementations differ in how cells reach the screen, but all of them consume the same
/// per-cell opacity values and treat opacity `<= OPACITY_EPSILON` as invisible.
pub trait CellRenderer {
    /// Resize the output to match the surface.
    fn resize(&mut self, logical: Size, device_pixel_ratio: f64) -> RippleResult<()>;
    /// Paint one frame.
    fn render(&mut self, frame: &RenderFrame<'_>) -> RippleResult<()>;
}
