use crate::foundation::core::{Rect, Rgba8, Size, sanitize_device_pixel_ratio};
use crate::foundation::error::{RippleError, RippleResult};
use crate::foundation::math::premul_over_in_place;
use crate::render::backend::{FrameRGBA, Surface};

/// A [`Surface`] rasterized on the CPU with `vello_cpu`.
///
/// Fills are recorded into a render context and rasterized lazily. `vello_cpu` renders into a
/// fresh buffer, so pending fills are composited over the committed pixels whenever they are
/// flushed (on `clear_rect` and on readback).
pub struct CpuSurface {
    logical: Size,
    device_pixel_ratio: f64,
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
    committed: Option<vello_cpu::Pixmap>,
    scratch: Option<vello_cpu::Pixmap>,
    pending_fills: usize,
    fill: Rgba8,
    alpha: f32,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("logical", &self.logical)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pending_fills", &self.pending_fills)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Allocate a surface of `logical` units at `device_pixel_ratio`.
    pub fn new(logical: Size, device_pixel_ratio: f64) -> RippleResult<Self> {
        let mut out = Self {
            logical: Size::ZERO,
            device_pixel_ratio: 1.0,
            width: 0,
            height: 0,
            ctx: None,
            committed: None,
            scratch: None,
            pending_fills: 0,
            fill: Rgba8::WHITE,
            alpha: 1.0,
        };
        out.resize(logical, device_pixel_ratio)?;
        Ok(out)
    }

    /// Physical width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Physical height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Scale factor from logical units to physical pixels.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Premultiplied RGBA8 at physical pixel `(x, y)`, if in bounds.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.flush();
        let pm = self.committed.as_ref()?;
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = pm.data_as_u8_slice().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Rasterize pending fills and read back the physical pixels.
    pub fn snapshot(&mut self) -> RippleResult<FrameRGBA> {
        self.flush();
        let data = match &self.committed {
            Some(pm) => pm.data_as_u8_slice().to_vec(),
            None => Vec::new(),
        };
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if data.len() != expected {
            return Err(RippleError::render("surface readback size mismatch"));
        }
        Ok(FrameRGBA {
            width: self.width(),
            height: self.height(),
            data,
            premultiplied: true,
        })
    }

    /// Like [`CpuSurface::snapshot`], with the pixels unpremultiplied for image encoders.
    pub fn snapshot_straight(&mut self) -> RippleResult<FrameRGBA> {
        let mut frame = self.snapshot()?;
        for px in frame.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        frame.premultiplied = false;
        Ok(frame)
    }

    fn flush(&mut self) {
        if self.pending_fills == 0 {
            return;
        }
        self.pending_fills = 0;
        let (width, height) = (self.width, self.height);
        let (Some(ctx), Some(committed)) = (self.ctx.as_mut(), self.committed.as_mut()) else {
            return;
        };
        let scratch = self
            .scratch
            .get_or_insert_with(|| vello_cpu::Pixmap::new(width, height));
        scratch.data_as_u8_slice_mut().fill(0);

        ctx.flush();
        ctx.render_to_pixmap(scratch);
        if !premul_over_in_place(committed.data_as_u8_slice_mut(), scratch.data_as_u8_slice()) {
            tracing::warn!("cpu surface composite skipped: buffer size mismatch");
        }
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::scale(self.device_pixel_ratio));
    }

    fn physical_px_rect(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let s = self.device_pixel_ratio;
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let x0 = (rect.x0 * s).floor().clamp(0.0, w) as usize;
        let y0 = (rect.y0 * s).floor().clamp(0.0, h) as usize;
        let x1 = (rect.x1 * s).ceil().clamp(0.0, w) as usize;
        let y1 = (rect.y1 * s).ceil().clamp(0.0, h) as usize;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, logical: Size, device_pixel_ratio: f64) -> RippleResult<()> {
        let dpr = sanitize_device_pixel_ratio(device_pixel_ratio);
        let to_px = |v: f64, axis: &str| -> RippleResult<u16> {
            let px = if v.is_finite() { (v.max(0.0) * dpr).ceil() } else { 0.0 };
            if px > f64::from(u16::MAX) {
                return Err(RippleError::render(format!(
                    "surface {axis} of {px} physical pixels exceeds u16"
                )));
            }
            Ok(px as u16)
        };
        let width = to_px(logical.width, "width")?;
        let height = to_px(logical.height, "height")?;

        self.logical = logical;
        self.device_pixel_ratio = dpr;
        self.width = width;
        self.height = height;
        self.pending_fills = 0;
        self.scratch = None;

        if width == 0 || height == 0 {
            self.ctx = None;
            self.committed = None;
            return Ok(());
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        // Logical-to-physical scale, set once per sizing.
        ctx.set_transform(vello_cpu::kurbo::Affine::scale(dpr));
        self.ctx = Some(ctx);
        self.committed = Some(vello_cpu::Pixmap::new(width, height));
        tracing::debug!(width, height, dpr, "sized cpu surface");
        Ok(())
    }

    fn logical_size(&self) -> Size {
        self.logical
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.flush();
        let Some((x0, y0, x1, y1)) = self.physical_px_rect(rect) else {
            return;
        };
        let stride = (self.width as usize) * 4;
        let full = x0 == 0 && y0 == 0 && x1 == self.width as usize && y1 == self.height as usize;
        let Some(pm) = self.committed.as_mut() else {
            return;
        };
        let data = pm.data_as_u8_slice_mut();
        if full {
            data.fill(0);
            return;
        }
        for row in y0..y1 {
            data[row * stride + x0 * 4..row * stride + x1 * 4].fill(0);
        }
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.fill = color;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn fill_rect(&mut self, rect: Rect) {
        let c = self.fill.with_alpha_mul(self.alpha);
        if c.a == 0 {
            return;
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        self.pending_fills += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
