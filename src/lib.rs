//! Pointer-driven pixel ripple transitions.
//!
//! A container surface is divided into a sparse grid of square cells. On pointer activation
//! each cell gets a normalized distance from the entry point, and a banded wave sweeps outward
//! (revealing a second content layer) or inward (hiding it again):
//!
//! - Build a [`TransitionController`] over a [`CellRenderer`] and a [`FrameScheduler`]
//! - Size it with [`TransitionController::resize`]
//! - Feed it [`PointerEvent`]s and deliver frame callbacks via [`TransitionController::on_frame`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod pixel;
pub(crate) mod render;
pub(crate) mod wave;

pub use crate::foundation::core::{
    Affine, Point, Rect, Rgba8, Size, Vec2, sanitize_device_pixel_ratio,
};
pub use crate::foundation::error::{RippleError, RippleResult};

pub use crate::animation::ease::{Ease, OpacityTween};
pub use crate::config::{RippleConfig, RippleSettings};
pub use crate::controller::input::{PointerEvent, PointerKind};
pub use crate::controller::scheduler::{FrameHandle, FrameScheduler, FrameToken, ManualScheduler};
pub use crate::controller::session::{Session, SessionId};
pub use crate::controller::transition::{
    FrameOutcome, LayerState, LayerVisibility, Phase, TransitionController,
};
pub use crate::pixel::field::{band_for_distance, band_width, update_distances};
pub use crate::pixel::grid::{Cell, PixelGrid};
pub use crate::render::backend::{
    CellRenderer, FrameRGBA, OPACITY_EPSILON, RenderFrame, Surface,
};
pub use crate::render::canvas::CanvasRenderer;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::nodes::{NodeRenderer, PixelNode};
pub use crate::render::recording::{DrawCall, RecordingSurface};
pub use crate::wave::animator::{
    Direction, WaveParams, cell_opacity, clear, lit_count, progress_at, step,
};
