use super::*;

#[test]
fn parse_hex_accepts_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_hex("1e90ff").unwrap(),
        Rgba8::new(0x1e, 0x90, 0xff, 255)
    );
    assert_eq!(
        Rgba8::parse_hex("#10203080").unwrap(),
        Rgba8::new(0x10, 0x20, 0x30, 0x80)
    );
}

#[test]
fn parse_hex_rejects_garbage() {
    assert!(Rgba8::parse_hex("#12").is_err());
    assert!(Rgba8::parse_hex("#zzzzzz").is_err());
    assert!(Rgba8::parse_hex("#ééé").is_err());
}

#[test]
fn hex_serde_is_symmetric() {
    let c = Rgba8::new(1, 2, 3, 4);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#01020304\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn alpha_mul_scales_and_clamps() {
    let half = Rgba8::WHITE.with_alpha_mul(0.5);
    assert_eq!(half.a, 128);
    assert_eq!((half.r, half.g, half.b), (255, 255, 255));
    assert_eq!(Rgba8::WHITE.with_alpha_mul(7.0).a, 255);
}

#[test]
fn device_pixel_ratio_is_sanitized() {
    assert_eq!(sanitize_device_pixel_ratio(2.0), 2.0);
    assert_eq!(sanitize_device_pixel_ratio(0.0), 1.0);
    assert_eq!(sanitize_device_pixel_ratio(f64::NAN), 1.0);
    assert_eq!(sanitize_device_pixel_ratio(100.0), 8.0);
}
