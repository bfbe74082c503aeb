use super::*;

#[test]
fn defaults_match_documented_values() {
    let s = RippleConfig::default().sanitized();
    assert_eq!(s.grid_resolution, 10);
    assert_eq!(s.density, 100.0);
    assert_eq!(s.duration_ms, 300.0);
    assert_eq!(s.wave.band_count, 8);
    assert_eq!(s.wave.wave_width, 2.0);
    assert_eq!(s.wave.jitter_spread, 1.5);
    assert_eq!(s.wave.visibility_threshold, 0.4);
    assert_eq!(s.fill_color, Rgba8::WHITE);
}

#[test]
fn out_of_range_values_are_clamped() {
    let cfg = RippleConfig {
        grid_resolution: -3,
        density: 250.0,
        duration_ms: -10.0,
        band_count: 0,
        wave_width: f64::NAN,
        visibility_threshold: 4.0,
        ..Default::default()
    };
    let s = cfg.sanitized();
    assert_eq!(s.grid_resolution, 1);
    assert_eq!(s.density, 100.0);
    assert_eq!(s.duration_ms, 0.0);
    assert_eq!(s.wave.band_count, 1);
    assert_eq!(s.wave.wave_width, 2.0);
    assert_eq!(s.wave.visibility_threshold, 1.0);

    let s = RippleConfig {
        grid_resolution: 1_000_000,
        density: -1.0,
        ..Default::default()
    }
    .sanitized();
    assert_eq!(s.grid_resolution, 512);
    assert_eq!(s.density, 0.0);
}

#[test]
fn json_missing_fields_take_defaults() {
    let cfg = RippleConfig::from_json_str(r##"{ "grid_resolution": 20, "fill_color": "#ff0000" }"##)
        .unwrap();
    assert_eq!(cfg.grid_resolution, 20);
    assert_eq!(cfg.fill_color, Rgba8::new(255, 0, 0, 255));
    assert_eq!(cfg.density, 100.0);
    assert_eq!(cfg.seed, None);
}

#[test]
fn json_rejects_unknown_fields_and_bad_colors() {
    let err = RippleConfig::from_json_str(r#"{ "gridResolution": 4 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
    assert!(RippleConfig::from_json_str(r#"{ "fill_color": "red" }"#).is_err());
}

#[test]
fn pretty_json_parses_back() {
    let cfg = RippleConfig {
        seed: Some(7),
        ..Default::default()
    };
    let back = RippleConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn grid_changed_tracks_resolution_density_and_seed_only() {
    let a = RippleConfig::default().sanitized();
    let mut b = a;
    b.duration_ms = 1000.0;
    b.fill_color = Rgba8::new(0, 0, 0, 255);
    assert!(!a.grid_changed(&b));
    b.density = 50.0;
    assert!(a.grid_changed(&b));
    let mut c = a;
    c.grid_resolution = 11;
    assert!(a.grid_changed(&c));
}
