use super::*;

#[test]
fn frame_range_contains_is_half_open() {
    let r = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
    assert!(!r.contains(FrameIndex(9)));
    assert!(r.contains(FrameIndex(10)));
    assert!(r.contains(FrameIndex(19)));
    assert!(!r.contains(FrameIndex(20)));
    assert_eq!(r.len_frames(), 10);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
}

#[test]
fn frame_range_clip_to_total() {
    let r = FrameRange::new(FrameIndex(10), FrameIndex(500)).unwrap();
    let c = r.clip_to(100);
    assert_eq!(c.start, FrameIndex(10));
    assert_eq!(c.end, FrameIndex(100));

    let past = FrameRange::new(FrameIndex(200), FrameIndex(300))
        .unwrap()
        .clip_to(100);
    assert!(past.is_empty());
}

#[test]
fn fps_conversions() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(4.5), 135);
    assert_eq!(fps.secs_to_frames_round(0.6), 18);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);
    assert!((fps.frames_to_secs(45.0) - 1.5).abs() < 1e-12);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn color_parses_hex_and_css() {
    assert_eq!(Color::parse("#22c55e").unwrap(), Color::rgb(0x22, 0xc5, 0x5e));
    assert_eq!(
        Color::parse("#0000ff80").unwrap(),
        Color::rgba(0, 0, 255, 0x80)
    );
    assert_eq!(
        Color::parse("rgba(239, 68, 68, 0.1)").unwrap(),
        Color::rgba(239, 68, 68, 26)
    );
    assert_eq!(Color::parse("rgb(1,2,3)").unwrap(), Color::rgb(1, 2, 3));
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("blue").is_err());
}

#[test]
fn color_serde_uses_hex_strings() {
    let c = Color::rgb(0xfb, 0xbf, 0x24);
    let v = serde_json::to_value(c).unwrap();
    assert_eq!(v, serde_json::json!("#fbbf24ff"));
    let back: Color = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);
}

#[test]
fn color_with_opacity_scales_alpha() {
    assert_eq!(Color::WHITE.with_opacity(0.5).a, 128);
    assert_eq!(Color::WHITE.with_opacity(2.0).a, 255);
}
