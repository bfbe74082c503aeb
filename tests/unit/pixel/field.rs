use super::*;
use crate::pixel::grid::PixelGrid;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn grid_300() -> PixelGrid {
    PixelGrid::build(
        Size::new(300.0, 300.0),
        10,
        100.0,
        &mut SmallRng::seed_from_u64(3),
    )
}

#[test]
fn bands_and_distances_stay_in_bounds_for_many_entry_points() {
    let mut grid = PixelGrid::build(
        Size::new(400.0, 250.0),
        12,
        100.0,
        &mut SmallRng::seed_from_u64(9),
    );
    for entry in [
        Point::new(0.0, 0.0),
        Point::new(400.0, 250.0),
        Point::new(400.0, 0.0),
        Point::new(123.4, 201.7),
        Point::new(-50.0, 900.0),
    ] {
        update_distances(&mut grid.cells, entry, grid.surface, 8);
        for cell in &grid.cells {
            assert!(cell.band < 8);
            assert!((0.0..=SQRT_2).contains(&cell.distance));
            assert_eq!(cell.band, band_for_distance(cell.distance, 8));
        }
    }
}

#[test]
fn center_entry_keeps_cells_within_half_diagonal() {
    let mut grid = grid_300();
    update_distances(&mut grid.cells, Point::new(150.0, 150.0), grid.surface, 8);
    for cell in &grid.cells {
        assert!(cell.distance <= 0.5f64.sqrt());
    }
    // Sorted nearest-first: the cells around the center lead and sit in band 0.
    assert_eq!(grid.cells[0].band, 0);
    assert!(grid.cells.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn corner_entry_puts_opposite_corner_in_last_band() {
    let mut grid = grid_300();
    update_distances(&mut grid.cells, Point::new(0.0, 0.0), grid.surface, 8);
    let far = grid.cells.last().unwrap();
    assert_eq!(far.origin, Point::new(270.0, 270.0));
    assert_eq!(far.band, 7);
}

#[test]
fn band_for_distance_clamps() {
    assert_eq!(band_for_distance(0.0, 8), 0);
    assert_eq!(band_for_distance(SQRT_2, 8), 7);
    assert_eq!(band_for_distance(10.0, 8), 7);
    assert_eq!(band_for_distance(f64::NAN, 8), 7);
    assert_eq!(band_for_distance(band_width(8) * 2.5, 8), 2);
    assert_eq!(band_for_distance(1.0, 0), 0);
}

#[test]
fn empty_surface_is_a_no_op() {
    let mut cells = grid_300().cells;
    let before = cells.clone();
    update_distances(&mut cells, Point::new(1.0, 1.0), Size::ZERO, 8);
    assert_eq!(cells, before);
}
