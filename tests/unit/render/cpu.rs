use super::*;

fn white_surface(w: f64, h: f64, dpr: f64) -> CpuSurface {
    let mut s = CpuSurface::new(Size::new(w, h), dpr).unwrap();
    s.set_fill_color(Rgba8::WHITE);
    s
}

#[test]
fn fill_rect_covers_its_pixels_only() {
    let mut s = white_surface(10.0, 10.0, 1.0);
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    assert_eq!(s.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(4, 4), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(7, 7), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(10, 0), None);
}

#[test]
fn device_pixel_ratio_scales_the_backing_store() {
    let mut s = white_surface(10.0, 8.0, 2.0);
    assert_eq!((s.width(), s.height()), (20, 16));
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    assert_eq!(s.pixel(9, 9), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(11, 11), Some([0, 0, 0, 0]));
}

#[test]
fn global_alpha_scales_fill_coverage() {
    let mut s = white_surface(4.0, 4.0, 1.0);
    s.set_global_alpha(0.5);
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    let [_, _, _, a] = s.pixel(1, 1).unwrap();
    assert!((127..=129).contains(&a), "alpha={a}");
}

#[test]
fn fills_accumulate_across_flushes() {
    let mut s = white_surface(10.0, 10.0, 1.0);
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 10.0));
    assert_eq!(s.pixel(1, 1), Some([255, 255, 255, 255]));
    s.fill_rect(Rect::new(5.0, 0.0, 10.0, 10.0));
    assert_eq!(s.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(8, 8), Some([255, 255, 255, 255]));
}

#[test]
fn clear_rect_handles_partial_and_full_regions() {
    let mut s = white_surface(10.0, 10.0, 1.0);
    s.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    s.clear_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(3, 3), Some([255, 255, 255, 255]));
    s.clear_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(s.snapshot().unwrap().data.iter().all(|&b| b == 0));
}

#[test]
fn oversized_surface_is_rejected() {
    let err = CpuSurface::new(Size::new(40_000.0, 10.0), 2.0).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn zero_sized_surface_is_inert() {
    let mut s = white_surface(0.0, 10.0, 1.0);
    s.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    s.clear_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    let frame = s.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (0, 10));
    assert!(frame.data.is_empty());
}

#[test]
fn straight_snapshot_unpremultiplies() {
    let mut s = CpuSurface::new(Size::new(2.0, 2.0), 1.0).unwrap();
    s.set_fill_color(Rgba8::new(200, 100, 0, 255));
    s.set_global_alpha(0.5);
    s.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
    let frame = s.snapshot_straight().unwrap();
    assert!(!frame.premultiplied);
    let px = &frame.data[0..4];
    assert!((198..=202).contains(&px[0]), "r={}", px[0]);
    assert!((98..=102).contains(&px[1]), "g={}", px[1]);
    assert_eq!(px[2], 0);
}
