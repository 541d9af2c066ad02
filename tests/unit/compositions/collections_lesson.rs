use super::*;
use crate::foundation::core::FrameIndex;
use kurbo::Vec2;
use serde_json::json;

fn small_script() -> serde_json::Value {
    json!({
        "title": "Day 1",
        "intro": { "title_secs": 2.0, "subtitles": [{ "text": "Welcome", "secs": 1.0 }] },
        "sections": [{
            "title": "Counter",
            "subtitle": "Counting things",
            "code": "print(1)",
            "output": "1",
            "code_secs": 2.0,
            "output_secs": 1.0,
            "extra_subtitle": "Done",
            "extra_secs": 2.0
        }],
        "tasks_intro": "Your turn",
        "tasks": [],
        "outro": ["Bye", "See you"]
    })
}

#[test]
fn builtin_script_lays_out_end_to_end() {
    let lesson = CollectionsLesson::new(LessonScript::builtin().unwrap()).unwrap();
    assert_eq!(lesson.meta().duration_in_frames, 10260);
    assert_eq!(lesson.section_start(0), Some(525));
    assert_eq!(lesson.script().sections.len(), 4);
    assert_eq!(lesson.script().tasks.len(), 15);
    assert!(lesson.task_start(14).unwrap() > lesson.section_start(3).unwrap());
    assert_eq!(lesson.section_start(4), None);
}

#[test]
fn stage_slides_in_from_above() {
    let lesson = CollectionsLesson::new(LessonScript::builtin().unwrap()).unwrap();
    let g = lesson.render(FrameIndex(0)).unwrap();
    assert_eq!(g.find("stage").unwrap().visual.translate, Vec2::new(0.0, -1080.0));
    assert!(g.contains("stage/title/text"));
    let g = lesson.render(FrameIndex(18)).unwrap();
    assert_eq!(g.find("stage").unwrap().visual.translate, Vec2::ZERO);
}

#[test]
fn sections_follow_the_intro() {
    let lesson = CollectionsLesson::new(LessonScript::builtin().unwrap()).unwrap();
    let g = lesson.render(FrameIndex(525)).unwrap();
    assert!(g.contains("stage/section-0-title/title"));
    assert!(!g.contains("stage/intro-2"));
    assert_eq!(g.find("stage/section-0-title/title").unwrap().visual.opacity, 0.0);

    let g = lesson.render(FrameIndex(630)).unwrap();
    assert!(!g.contains("stage/section-0-title"));
    assert_eq!(g.find("stage/section-0-example/output").unwrap().visual.opacity, 0.0);
}

#[test]
fn custom_script_from_props() {
    let comp = create(Some(small_script())).unwrap();
    assert_eq!(comp.meta().duration_in_frames, 795);

    // Example window opens at 7 s; typing takes 2 s and the output fades in over the next.
    let g = comp.render(FrameIndex(270)).unwrap();
    match &g.find("stage/section-0-example/code/source").unwrap().kind {
        ElementKind::Code(block) => {
            assert_eq!(block.text(), "print(1)");
            assert!(!block.cursor);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(g.find("stage/section-0-example/output").unwrap().visual.opacity, 0.0);
    let g = comp.render(FrameIndex(300)).unwrap();
    assert_eq!(g.find("stage/section-0-example/output").unwrap().visual.opacity, 1.0);

    let g = comp.render(FrameIndex(794)).unwrap();
    assert_eq!(g.text_of("stage/outro/text"), Some("Bye\nSee you"));
}

#[test]
fn null_props_use_builtin_script() {
    let comp = create(Some(serde_json::Value::Null)).unwrap();
    assert_eq!(comp.meta().duration_in_frames, 10260);
}

#[test]
fn negative_timings_are_rejected() {
    let mut script = small_script();
    script["sections"][0]["code_secs"] = json!(-1.0);
    let err = create(Some(script)).err().unwrap();
    assert!(matches!(err, ReelError::Validation(_)));
}
