use std::f64::consts::SQRT_2;

use crate::foundation::core::{Point, Size};
use crate::pixel::grid::Cell;

/// Width of one distance band in normalized units.
pub fn band_width(band_count: u32) -> f64 {
    SQRT_2 / f64::from(band_count.max(1))
}

/// Band index for a normalized distance, always in `[0, band_count - 1]`.
pub fn band_for_distance(distance: f64, band_count: u32) -> u32 {
    let last = band_count.max(1) - 1;
    if !distance.is_finite() {
        return last;
    }
    let raw = (distance.max(0.0) / band_width(band_count)).floor();
    if raw >= f64::from(last) {
        last
    } else {
        raw as u32
    }
}

/// Recompute every cell's normalized distance from `entry` and its band, then stable-sort
/// the cells nearest-first.
///
/// The ordering is for inspection only; animation and rendering visit every cell each frame.
/// Must run once per new entry point, before any frame reads `band`.
#[tracing::instrument(skip(cells), fields(cells = cells.len()), level = "debug")]
pub fn update_distances(cells: &mut [Cell], entry: Point, surface: Size, band_count: u32) {
    if surface.width <= 0.0 || surface.height <= 0.0 {
        return;
    }
    let nx = entry.x / surface.width;
    let ny = entry.y / surface.height;

    for cell in cells.iter_mut() {
        let c = cell.center();
        let dx = c.x / surface.width - nx;
        let dy = c.y / surface.height - ny;
        let d = (dx * dx + dy * dy).sqrt();
        cell.distance = if d.is_finite() {
            d.clamp(0.0, SQRT_2)
        } else {
            SQRT_2
        };
        cell.band = band_for_distance(cell.distance, band_count);
    }

    cells.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/field.rs"]
mod tests;
