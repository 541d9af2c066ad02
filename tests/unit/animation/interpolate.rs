use super::*;

fn lin() -> ([f64; 2], [f64; 2]) {
    ([0.0, 30.0], [0.0, 10.0])
}

#[test]
fn maps_interior_linearly() {
    let (b, v) = lin();
    let i = Interpolator::new(&b, &v).unwrap();
    assert_eq!(i.sample(15.0), 5.0);
    assert_eq!(i.sample(0.0), 0.0);
    assert_eq!(i.sample(30.0), 10.0);
    assert!((i.sample(7.5) - 2.5).abs() < 1e-12);
}

#[test]
fn clamps_outside_range() {
    let (b, v) = lin();
    let i = Interpolator::new(&b, &v).unwrap();
    assert_eq!(i.sample(-5.0), 0.0);
    assert_eq!(i.sample(100.0), 10.0);
    for f in [-1e9, -1.0, -0.001] {
        assert_eq!(i.sample(f), 0.0);
    }
    for f in [30.001, 31.0, 1e9] {
        assert_eq!(i.sample(f), 10.0);
    }
}

#[test]
fn multi_segment_fade_in_hold_fade_out() {
    let b = [10.0, 25.0, 115.0, 130.0];
    let v = [0.0, 1.0, 1.0, 0.0];
    let i = Interpolator::new(&b, &v).unwrap();
    assert_eq!(i.sample(0.0), 0.0);
    assert!((i.sample(17.5) - 0.5).abs() < 1e-12);
    assert_eq!(i.sample(70.0), 1.0);
    assert!((i.sample(122.5) - 0.5).abs() < 1e-12);
    assert_eq!(i.sample(200.0), 0.0);
}

#[test]
fn every_segment_is_the_linear_blend_of_its_endpoints() {
    let b = [0.0, 4.0, 10.0, 11.0];
    let v = [2.0, -2.0, 8.0, 9.0];
    let i = Interpolator::new(&b, &v).unwrap();
    for seg in 0..3 {
        for k in 0..=8 {
            let t = f64::from(k) / 8.0;
            let f = b[seg] + (b[seg + 1] - b[seg]) * t;
            let expected = v[seg] + (v[seg + 1] - v[seg]) * t;
            assert!((i.sample(f) - expected).abs() < 1e-9, "seg {seg} t {t}");
        }
    }
}

#[test]
fn zero_length_segment_is_a_step() {
    let b = [0.0, 10.0, 10.0, 20.0];
    let v = [0.0, 1.0, 5.0, 6.0];
    let i = Interpolator::new(&b, &v).unwrap();
    assert!((i.sample(9.999) - 0.9999).abs() < 1e-9);
    assert_eq!(i.sample(10.0), 5.0);
    assert!((i.sample(15.0) - 5.5).abs() < 1e-12);

    let step = Interpolator::new(&[5.0, 5.0], &[0.0, 1.0]).unwrap();
    assert_eq!(step.sample(4.0), 0.0);
    assert_eq!(step.sample(5.0), 1.0);
    assert_eq!(step.sample(6.0), 1.0);
}

#[test]
fn sampling_is_idempotent_and_order_independent() {
    let b = [0.0, 12.0, 40.0];
    let v = [3.0, 9.0, -1.0];
    let i = Interpolator::new(&b, &v).unwrap();
    let forward: Vec<f64> = (0..50).map(|f| i.sample(f64::from(f))).collect();
    let backward: Vec<f64> = (0..50).rev().map(|f| i.sample(f64::from(f))).collect();
    let again: Vec<f64> = (0..50).map(|f| i.sample(f64::from(f))).collect();
    assert_eq!(forward, again);
    assert!(
        forward
            .iter()
            .zip(backward.iter().rev())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    );
}

#[test]
fn extend_and_identity_extrapolation() {
    let (b, v) = lin();
    let opts = InterpolateOpts {
        left: Extrapolate::Extend,
        right: Extrapolate::Identity,
        ease: Ease::Linear,
    };
    let i = Interpolator::new(&b, &v).unwrap();
    assert!((i.sample_with(-30.0, opts) + 10.0).abs() < 1e-12);
    assert_eq!(i.sample_with(100.0, opts), 100.0);
}

#[test]
fn easing_applies_inside_segments_only() {
    let (b, v) = lin();
    let opts = InterpolateOpts::clamped().with_ease(Ease::InQuad);
    let i = Interpolator::new(&b, &v).unwrap();
    assert!((i.sample_with(15.0, opts) - 2.5).abs() < 1e-12);
    assert_eq!(i.sample_with(-1.0, opts), 0.0);
    assert_eq!(i.sample_with(31.0, opts), 10.0);
}

#[test]
fn single_breakpoint_is_constant() {
    let i = Interpolator::new(&[3.0], &[7.0]).unwrap();
    assert_eq!(i.sample(-100.0), 7.0);
    assert_eq!(i.sample(3.0), 7.0);
    assert_eq!(i.sample(100.0), 7.0);
}

#[test]
fn structural_errors_are_rejected() {
    assert!(Interpolator::new(&[], &[]).is_err());
    assert!(Interpolator::new(&[0.0, 1.0], &[0.0]).is_err());
    assert!(Interpolator::new(&[0.0, f64::INFINITY], &[0.0, 1.0]).is_err());
    assert!(Interpolator::new(&[0.0, 1.0], &[f64::NAN, 1.0]).is_err());
}

#[test]
fn non_monotonic_tables_are_reported_not_rejected() {
    let b = [0.0, 20.0, 10.0];
    let v = [0.0, 1.0, 2.0];
    let i = Interpolator::new(&b, &v).unwrap();
    assert!(!i.is_monotonic());
    let a = i.sample(12.0);
    assert_eq!(a.to_bits(), i.sample(12.0).to_bits());
    assert!(Interpolator::new(&[0.0, 0.0, 1.0], &v).unwrap().is_monotonic());
}

#[test]
fn one_shot_helper_matches_table() {
    assert_eq!(
        interpolate(15.0, &[0.0, 30.0], &[0.0, 10.0], InterpolateOpts::default()).unwrap(),
        5.0
    );
    assert!(interpolate(1.0, &[0.0], &[0.0, 1.0], InterpolateOpts::default()).is_err());
}

#[test]
fn ramps() {
    assert_eq!(fade_in(-1.0, 0.0, 15.0), 0.0);
    assert!((fade_in(7.5, 0.0, 15.0) - 0.5).abs() < 1e-12);
    assert_eq!(fade_in(99.0, 0.0, 15.0), 1.0);
    assert_eq!(fade_in(3.0, 3.0, 3.0), 1.0);
    assert!((ramp(5.0, 0.0, 10.0, 1.0, 0.95) - 0.975).abs() < 1e-12);
}
