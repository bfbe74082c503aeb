use crate::pixel::grid::Cell;
use crate::render::backend::OPACITY_EPSILON;

/// Sweep direction of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Wave travels from the entry point outward; reveals the second layer.
    Expanding,
    /// Wave travels from the perimeter inward to the entry point; hides the second layer.
    Contracting,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Expanding => Self::Contracting,
            Self::Contracting => Self::Expanding,
        }
    }
}

/// Shape parameters of the wave.
///
/// The defaults are the tuned aesthetic values; none of them carries deeper meaning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Number of concentric distance bands.
    pub band_count: u32,
    /// How many bands the visible wave spans at once.
    pub wave_width: f64,
    /// Scale of the per-cell jitter offset applied to band progress.
    pub jitter_spread: f64,
    /// Candidate cells are lit only when `jitter > visibility_threshold`.
    pub visibility_threshold: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            band_count: 8,
            wave_width: 2.0,
            jitter_spread: 1.5,
            visibility_threshold: 0.4,
        }
    }
}

/// Normalized progress for `elapsed_ms` of a `total_ms` sweep, in `[0, 1]`.
///
/// `elapsed_ms == total_ms` yields exactly `1.0`; a non-positive duration completes at once.
pub fn progress_at(elapsed_ms: f64, total_ms: f64) -> f64 {
    if total_ms.is_nan() || total_ms <= 0.0 || elapsed_ms.is_nan() {
        return 1.0;
    }
    (elapsed_ms.max(0.0) / total_ms).min(1.0)
}

/// Opacity of a single cell at `progress`.
pub fn cell_opacity(cell: &Cell, direction: Direction, progress: f64, params: &WaveParams) -> f32 {
    let band_count = params.band_count.max(1);
    let band = cell.band.min(band_count - 1);
    let effective_band = match direction {
        Direction::Expanding => band,
        Direction::Contracting => band_count - 1 - band,
    };

    let band_progress =
        progress * (f64::from(band_count) + params.wave_width) - f64::from(effective_band);
    let adjusted = band_progress + (cell.jitter - 0.5) * params.jitter_spread;

    let in_window = adjusted >= 0.0 && adjusted < params.wave_width;
    if in_window && cell.jitter > params.visibility_threshold {
        1.0
    } else {
        0.0
    }
}

/// Advance the wave: write every cell's opacity for `elapsed_ms` and return the progress.
///
/// When the returned progress is `>= 1` the caller must [`clear`] the cells; the last frame's
/// values are transient and not the finished state.
pub fn step(
    cells: &mut [Cell],
    direction: Direction,
    elapsed_ms: f64,
    total_ms: f64,
    params: &WaveParams,
) -> f64 {
    let progress = progress_at(elapsed_ms, total_ms);
    for cell in cells.iter_mut() {
        cell.opacity = cell_opacity(cell, direction, progress, params);
    }
    progress
}

/// Force every opacity to exactly zero.
pub fn clear(cells: &mut [Cell]) {
    for cell in cells.iter_mut() {
        cell.opacity = 0.0;
    }
}

/// Number of cells currently drawn (above the render threshold).
pub fn lit_count(cells: &[Cell]) -> usize {
    cells.iter().filter(|c| c.opacity > OPACITY_EPSILON).count()
}

#[cfg(test)]
#[path = "../../tests/unit/wave/animator.rs"]
mod tests;
