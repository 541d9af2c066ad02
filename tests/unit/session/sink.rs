use super::*;
use crate::compositions::Composition;
use crate::compositions::strings_walkthrough::StringsWalkthrough;
use crate::foundation::core::Canvas;
use crate::session::fingerprint::fingerprint_scene;

fn cfg(frames: u64) -> SinkConfig {
    SinkConfig {
        composition: "StringsWalkthrough".to_owned(),
        canvas: Canvas::HD_LANDSCAPE,
        fps: Fps::whole(30),
        frames,
    }
}

#[test]
fn json_lines_writes_header_then_scenes() {
    let comp = StringsWalkthrough::new();
    let mut sink = JsonLinesSink::new(Vec::new(), false);
    sink.begin(cfg(2)).unwrap();
    for f in 0..2 {
        let scene = comp.render(FrameIndex(f)).unwrap();
        let fp = fingerprint_scene(&scene);
        sink.push_scene(FrameIndex(f), &scene, fp, f == 0).unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.written(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["composition"], "StringsWalkthrough");
    assert_eq!(lines[0]["frames"], 2);
    assert_eq!(lines[2]["scene"]["frame"], 1);
    assert_eq!(lines[1]["fingerprint"], lines[2]["fingerprint"]);
}

#[test]
fn json_lines_changes_only_skips_repeats() {
    let comp = StringsWalkthrough::new();
    let mut sink = JsonLinesSink::new(Vec::new(), true);
    sink.begin(cfg(3)).unwrap();
    for (f, changed) in [(0, true), (1, false), (90, true)] {
        let scene = comp.render(FrameIndex(f)).unwrap();
        sink.push_scene(FrameIndex(f), &scene, fingerprint_scene(&scene), changed)
            .unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.written(), 2);
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().next().unwrap().contains("\"changes_only\":true"));
}

#[test]
fn in_memory_sink_resets_on_begin() {
    let comp = StringsWalkthrough::new();
    let scene = comp.render(FrameIndex(0)).unwrap();
    let fp = fingerprint_scene(&scene);

    let mut sink = InMemorySink::new();
    sink.begin(cfg(1)).unwrap();
    sink.push_scene(FrameIndex(0), &scene, fp, true).unwrap();
    sink.end().unwrap();
    assert!(sink.is_finished());
    assert_eq!(sink.scenes.len(), 1);

    sink.begin(cfg(1)).unwrap();
    assert!(sink.scenes.is_empty());
    assert!(!sink.is_finished());
    assert_eq!(sink.config().unwrap().frames, 1);
}
