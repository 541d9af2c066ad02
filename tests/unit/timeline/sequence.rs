use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn window_is_half_open_and_rebased() {
    let s = Sequence::new(180, 240);
    assert_eq!(s.local_frame(179), None);
    assert_eq!(s.local_frame(180), Some(0));
    assert_eq!(s.local_frame(419), Some(239));
    assert_eq!(s.local_frame(420), None);
    assert_eq!(s.end(), Some(420));
}

#[test]
fn open_window_never_ends() {
    let s = Sequence::open(90);
    assert!(!s.contains(89));
    assert_eq!(s.local_frame(1_000_000), Some(999_910));
    assert_eq!(s.end(), None);
}

#[test]
fn zero_duration_is_never_mounted() {
    let s = Sequence::new(10, 0);
    assert!((0..30).all(|f| !s.contains(f)));
}

#[test]
fn negative_duration_is_rejected() {
    assert!(Sequence::from_signed(0, -1).is_err());
    assert_eq!(Sequence::from_signed(-5, 10).unwrap(), Sequence::new(-5, 10));
}

#[test]
fn nested_sequences_add_offsets() {
    let root = TimeCtx::root(FrameIndex(400), 1200, fps30());
    let main = root.enter(Sequence::new(90, 1110)).unwrap();
    assert_eq!(main.frame, 310);
    let css = main.enter(Sequence::new(300, 300)).unwrap();
    assert_eq!(css.frame, 10);
    assert_eq!(css.duration, Some(300));
    assert!(main.enter(Sequence::new(600, 300)).is_none());
}

#[test]
fn child_window_is_capped_by_parent() {
    let root = TimeCtx::root(FrameIndex(0), 100, fps30());
    let parent = root.enter(Sequence::new(0, 50)).unwrap();

    let child_at = |f: u64| {
        TimeCtx::root(FrameIndex(f), 100, fps30())
            .enter(Sequence::new(0, 50))
            .and_then(|p| p.enter(Sequence::new(40, 100)))
    };
    assert_eq!(parent.enter(Sequence::new(40, 100)), None);
    let c = child_at(45).unwrap();
    assert_eq!(c.frame, 5);
    assert_eq!(c.duration, Some(10));
    assert!(child_at(50).is_none());

    let open_child = TimeCtx::root(FrameIndex(60), 100, fps30())
        .enter(Sequence::open(20))
        .unwrap();
    assert_eq!(open_child.duration, Some(80));
}

#[test]
fn progress_and_seconds() {
    let ctx = TimeCtx::root(FrameIndex(45), 90, fps30());
    assert_eq!(ctx.progress(), 0.5);
    assert_eq!(ctx.secs(), 1.5);
    assert_eq!(ctx.frames(2.0), 60);

    let open = TimeCtx {
        frame: 10,
        duration: None,
        fps: fps30(),
    };
    assert_eq!(open.progress(), 0.0);
}
