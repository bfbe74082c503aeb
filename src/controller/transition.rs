use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{RippleConfig, RippleSettings};
use crate::controller::input::{PointerEvent, PointerKind};
use crate::controller::scheduler::{FrameScheduler, FrameToken};
use crate::controller::session::{Session, SessionId};
use crate::foundation::core::{Point, Rect, Size, sanitize_device_pixel_ratio};
use crate::foundation::error::RippleResult;
use crate::pixel::field::update_distances;
use crate::pixel::grid::{Cell, PixelGrid};
use crate::render::backend::{CellRenderer, RenderFrame};
use crate::wave::animator::{self, Direction};

/// Visibility and interactivity of one content layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerState {
    /// Whether the layer is shown.
    pub visible: bool,
    /// Whether the layer receives pointer input.
    pub interactive: bool,
}

impl LayerState {
    /// Visible and interactive.
    pub const SHOWN: Self = Self {
        visible: true,
        interactive: true,
    };
    /// Hidden and non-interactive.
    pub const HIDDEN: Self = Self {
        visible: false,
        interactive: false,
    };
}

/// State of the two overlaid content layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerVisibility {
    /// Content shown at rest.
    pub first: LayerState,
    /// Content revealed by the ripple.
    pub second: LayerState,
}

impl LayerVisibility {
    /// Layers for the revealed (`true`) or resting (`false`) state.
    pub fn for_revealed(revealed: bool) -> Self {
        if revealed {
            Self {
                first: LayerState::HIDDEN,
                second: LayerState::SHOWN,
            }
        } else {
            Self {
                first: LayerState::SHOWN,
                second: LayerState::HIDDEN,
            }
        }
    }

    /// Whether the second layer is the one on show.
    pub fn is_revealed(&self) -> bool {
        self.second.visible
    }
}

/// Where the controller is in its state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No session in flight.
    Idle {
        /// Whether the second layer is on show.
        revealed: bool,
    },
    /// Revealing sweep in flight.
    Expanding,
    /// Hiding sweep in flight.
    Contracting,
}

/// Result of delivering one frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// The token did not belong to the live session; nothing changed.
    Stale,
    /// The sweep advanced and another frame was requested.
    Running {
        /// Normalized progress in `[0, 1)`.
        progress: f64,
    },
    /// The sweep finished, the cells were cleared and the layers swapped.
    Completed {
        /// Direction of the finished sweep.
        direction: Direction,
        /// Layer state after the swap.
        layers: LayerVisibility,
    },
}

/// Drives pixel ripple transitions for one mounted container.
///
/// Owns the cell set, the single live [`Session`] and its frame-callback chain. All methods
/// run to completion synchronously; the only asynchrony is the host delivering frame tokens.
pub struct TransitionController<R, S> {
    settings: RippleSettings,
    renderer: R,
    scheduler: S,
    rng: SmallRng,
    grid: PixelGrid,
    surface: Option<Size>,
    device_pixel_ratio: f64,
    phase: Phase,
    active: bool,
    entry: Option<Point>,
    field_dirty: bool,
    session: Option<Session>,
    next_session: u64,
    layers: LayerVisibility,
    clock_ms: f64,
}

impl<R: CellRenderer, S: FrameScheduler> TransitionController<R, S> {
    /// Create an unmounted controller. Input is ignored until [`Self::resize`] sizes it.
    pub fn new(config: &RippleConfig, renderer: R, scheduler: S) -> Self {
        let settings = config.sanitized();
        Self {
            rng: rng_for(settings.seed),
            settings,
            renderer,
            scheduler,
            grid: PixelGrid::default(),
            surface: None,
            device_pixel_ratio: 1.0,
            phase: Phase::Idle { revealed: false },
            active: false,
            entry: None,
            field_dirty: true,
            session: None,
            next_session: 0,
            layers: LayerVisibility::for_revealed(false),
            clock_ms: 0.0,
        }
    }

    /// Size (or resize) the container. Rebuilds the cell set and drops any in-flight session.
    ///
    /// An interrupted sweep restarts on the rebuilt grid, so the layers catch up with the
    /// active flag. If the renderer rejects the size, nothing changes.
    pub fn resize(&mut self, logical: Size, device_pixel_ratio: f64) -> RippleResult<()> {
        let dpr = sanitize_device_pixel_ratio(device_pixel_ratio);
        self.renderer.resize(logical, dpr)?;
        self.cancel_session_quiet();
        self.surface = Some(logical);
        self.device_pixel_ratio = dpr;
        self.rebuild_grid();
        self.paint()?;
        self.resume_intent()
    }

    /// Apply a new configuration. Always cancels the session; rebuilds the grid when the
    /// resolution, density or seed changed.
    pub fn set_config(&mut self, config: &RippleConfig) -> RippleResult<()> {
        let next = config.sanitized();
        let rebuild = self.settings.grid_changed(&next);
        let reseed = self.settings.seed != next.seed;
        self.cancel_session_quiet();
        self.settings = next;
        if reseed {
            self.rng = rng_for(next.seed);
        }
        if rebuild && self.surface.is_some() {
            self.rebuild_grid();
        }
        self.field_dirty = true;
        self.paint()?;
        self.resume_intent()
    }

    /// React to a pointer event. `bounds` is the container rectangle in client coordinates.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        now_ms: f64,
    ) -> RippleResult<()> {
        if self.surface.is_none() {
            tracing::trace!(kind = ?event.kind, "pointer event before surface is ready");
            return Ok(());
        }
        self.clock_ms = now_ms;
        let local = event.local(bounds);
        match event.kind {
            PointerKind::Enter if self.active => {
                tracing::trace!("enter ignored: already active");
                Ok(())
            }
            PointerKind::Leave if !self.active => {
                tracing::trace!("leave ignored: not active");
                Ok(())
            }
            PointerKind::Enter => self.activate(local, now_ms),
            PointerKind::Leave => self.deactivate(now_ms),
            PointerKind::Click if self.active => self.deactivate(now_ms),
            PointerKind::Click => self.activate(local, now_ms),
        }
    }

    /// Deliver a scheduled frame callback.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64) -> RippleResult<FrameOutcome> {
        let Some(session) = self.session.as_mut().filter(|s| s.owns(token)) else {
            tracing::trace!(session = token.session.0, "discarding stale frame");
            return Ok(FrameOutcome::Stale);
        };
        session.frame_fired();
        let direction = session.direction();
        let elapsed = session.elapsed_ms(now_ms);
        self.clock_ms = now_ms;

        let progress = animator::step(
            &mut self.grid.cells,
            direction,
            elapsed,
            self.settings.duration_ms,
            &self.settings.wave,
        );

        if progress >= 1.0 {
            animator::clear(&mut self.grid.cells);
            self.session = None;
            let revealed = direction == Direction::Expanding;
            self.phase = Phase::Idle { revealed };
            self.layers = LayerVisibility::for_revealed(revealed);
            tracing::debug!(?direction, "ripple session completed");
            self.paint()?;
            return Ok(FrameOutcome::Completed {
                direction,
                layers: self.layers,
            });
        }

        if let Err(e) = self.paint() {
            self.cancel_session_quiet();
            return Err(e);
        }
        if let Some(session) = self.session.as_mut() {
            session.schedule_next(&mut self.scheduler);
        }
        Ok(FrameOutcome::Running { progress })
    }

    /// Cancel any in-flight session, clearing its partial frame.
    ///
    /// The active flag falls back to match the layers, so the sweep is not restarted later.
    pub fn cancel(&mut self) -> RippleResult<()> {
        self.active = self.layers.is_revealed();
        if self.cancel_session_quiet() {
            self.paint()?;
        }
        Ok(())
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Logical activation flag (the intent, not the visual state).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current content layer state.
    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    /// Entry point of the current or last activation.
    pub fn entry(&self) -> Option<Point> {
        self.entry
    }

    /// Live session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current cells.
    pub fn cells(&self) -> &[Cell] {
        &self.grid.cells
    }

    /// Current grid.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Effective settings.
    pub fn settings(&self) -> &RippleSettings {
        &self.settings
    }

    /// Device pixel ratio the surface was last sized with.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Borrow the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutably borrow the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn activate(&mut self, local: Point, now_ms: f64) -> RippleResult<()> {
        self.active = true;
        self.entry = Some(local);
        self.field_dirty = true;
        self.start(Direction::Expanding, now_ms)
    }

    fn deactivate(&mut self, now_ms: f64) -> RippleResult<()> {
        self.active = false;
        // The entry point is kept so the contraction collapses toward where expansion began.
        self.start(Direction::Contracting, now_ms)
    }

    fn start(&mut self, direction: Direction, now_ms: f64) -> RippleResult<()> {
        if self.cancel_session_quiet() {
            self.paint()?;
        }
        let Some(surface) = self.surface else {
            return Ok(());
        };
        let entry = *self
            .entry
            .get_or_insert_with(|| Point::new(surface.width / 2.0, surface.height / 2.0));
        if self.field_dirty {
            update_distances(
                &mut self.grid.cells,
                entry,
                surface,
                self.settings.wave.band_count,
            );
            self.field_dirty = false;
        }

        self.next_session += 1;
        let id = SessionId(self.next_session);
        self.session = Some(Session::start(
            id,
            direction,
            entry,
            now_ms,
            &mut self.scheduler,
        ));
        self.phase = match direction {
            Direction::Expanding => Phase::Expanding,
            Direction::Contracting => Phase::Contracting,
        };
        tracing::debug!(
            session = id.0,
            ?direction,
            x = entry.x,
            y = entry.y,
            "started ripple session"
        );
        Ok(())
    }

    /// Start a fresh sweep when the active flag and the layers disagree and nothing is running.
    fn resume_intent(&mut self) -> RippleResult<()> {
        if self.session.is_some() || self.active == self.layers.is_revealed() {
            return Ok(());
        }
        let direction = if self.active {
            Direction::Expanding
        } else {
            Direction::Contracting
        };
        tracing::debug!(?direction, "restarting interrupted ripple session");
        self.field_dirty = true;
        self.start(direction, self.clock_ms)
    }

    /// Drop the live session without painting. Returns whether one was live.
    fn cancel_session_quiet(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.cancel(&mut self.scheduler);
        animator::clear(&mut self.grid.cells);
        self.phase = Phase::Idle {
            revealed: self.layers.is_revealed(),
        };
        tracing::debug!(session = session.id().0, "cancelled ripple session");
        true
    }

    fn rebuild_grid(&mut self) {
        let surface = self.surface.unwrap_or(Size::ZERO);
        self.grid = PixelGrid::build(
            surface,
            self.settings.grid_resolution,
            self.settings.density,
            &mut self.rng,
        );
        self.field_dirty = true;
    }

    fn paint(&mut self) -> RippleResult<()> {
        if self.surface.is_none() {
            return Ok(());
        }
        self.renderer.render(&RenderFrame {
            cells: &self.grid.cells,
            fill: self.settings.fill_color,
            now_ms: self.clock_ms,
        })
    }
}

fn rng_for(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/transition.rs"]
mod tests;
