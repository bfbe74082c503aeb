use rand::Rng;

use crate::foundation::core::{Point, Rect, Size};

/// One grid unit tracked for opacity, distance and band state.
///
/// This is not a display pixel: a cell covers `size x size` logical units of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Row-major slot index in the grid that produced this cell; stable across re-sorts.
    pub slot: u32,
    /// Top-left corner in surface-local logical units.
    pub origin: Point,
    /// Edge length, including the 1-unit overlap that hides seams between neighbours.
    pub size: f64,
    /// Current visibility in `[0, 1]`.
    pub opacity: f32,
    /// Normalized distance from the active entry point, in `[0, sqrt(2)]`.
    pub distance: f64,
    /// Distance band index.
    pub band: u32,
    /// Fixed random value in `[0, 1)` drawn at creation.
    pub jitter: f64,
}

impl Cell {
    /// Center of the cell in surface-local units.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size / 2.0,
            self.origin.y + self.size / 2.0,
        )
    }

    /// Device-aligned rectangle covering the cell: floored origin, ceiled extent.
    pub fn snapped_rect(&self) -> Rect {
        let x = self.origin.x.floor();
        let y = self.origin.y.floor();
        let s = self.size.ceil();
        Rect::new(x, y, x + s, y + s)
    }
}

/// A rebuilt-on-resize set of cells plus the grid geometry that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelGrid {
    /// Surface the grid was built for.
    pub surface: Size,
    /// Edge length of one grid slot (without overlap).
    pub cell_size: f64,
    /// Number of columns.
    pub cols: u32,
    /// Number of rows.
    pub rows: u32,
    /// Cells that survived the density draw.
    pub cells: Vec<Cell>,
}

impl PixelGrid {
    /// Partition `surface` into square cells.
    ///
    /// Each grid slot is kept with probability `density / 100`, so the resulting count is a
    /// statistical target rather than an exact one. `density >= 100` keeps every slot and
    /// `density <= 0` keeps none. Empty or non-finite surfaces yield an empty grid.
    #[tracing::instrument(skip(rng), level = "debug")]
    pub fn build<R: Rng>(
        surface: Size,
        grid_resolution: u32,
        density: f64,
        rng: &mut R,
    ) -> Self {
        let (w, h) = (surface.width, surface.height);
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Self {
                surface,
                ..Self::default()
            };
        }

        let cell_size = w.max(h) / f64::from(grid_resolution.max(1));
        let cols = slot_span(w, cell_size);
        let rows = slot_span(h, cell_size);
        let keep_p = if density.is_finite() {
            (density / 100.0).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let mut cells = Vec::with_capacity((rows as usize) * (cols as usize));
        for row in 0..rows {
            for col in 0..cols {
                if !keep_slot(keep_p, rng) {
                    continue;
                }
                cells.push(Cell {
                    slot: row * cols + col,
                    origin: Point::new(f64::from(col) * cell_size, f64::from(row) * cell_size),
                    size: cell_size + 1.0,
                    opacity: 0.0,
                    distance: 0.0,
                    band: 0,
                    jitter: rng.random::<f64>(),
                });
            }
        }

        tracing::debug!(cols, rows, cells = cells.len(), "built pixel grid");
        Self {
            surface,
            cell_size,
            cols,
            rows,
            cells,
        }
    }

    /// Number of grid slots, kept or not.
    pub fn slot_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// Division noise must not add a sliver column on an exact fit.
fn slot_span(extent: f64, cell_size: f64) -> u32 {
    (extent / cell_size - 1e-9).ceil().max(1.0) as u32
}

fn keep_slot<R: Rng>(p: f64, rng: &mut R) -> bool {
    if p >= 1.0 {
        true
    } else if p <= 0.0 {
        false
    } else {
        rng.random::<f64>() < p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/grid.rs"]
mod tests;
