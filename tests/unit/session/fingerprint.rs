use super::*;
use crate::compositions::Composition;
use crate::compositions::strings_walkthrough::StringsWalkthrough;
use crate::foundation::core::FrameIndex;

fn scene(frame: u64) -> SceneGraph {
    StringsWalkthrough::new().render(FrameIndex(frame)).unwrap()
}

#[test]
fn fingerprint_ignores_frame_index() {
    let a = scene(0);
    let b = scene(1);
    assert_ne!(a.frame, b.frame);
    assert_eq!(fingerprint_scene(&a), fingerprint_scene(&b));
}

#[test]
fn fingerprint_is_stable_across_calls() {
    let a = scene(100);
    assert_eq!(fingerprint_scene(&a), fingerprint_scene(&a.clone()));
}

#[test]
fn fingerprint_tracks_visual_and_content_changes() {
    let base = scene(0);
    let fp = fingerprint_scene(&base);

    let mut faded = base.clone();
    faded.nodes[1].visual.opacity = 0.5;
    assert_ne!(fingerprint_scene(&faded), fp);

    assert_ne!(fingerprint_scene(&scene(90)), fp);
}

#[test]
fn fingerprint_displays_as_hex() {
    let fp = SceneFingerprint { hi: 1, lo: 0xff };
    assert_eq!(fp.to_string(), "000000000000000100000000000000ff");
}
