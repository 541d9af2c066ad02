use super::*;
use crate::foundation::core::FrameIndex;
use crate::scene::model::SceneGraph;

fn render(frame: u64) -> SceneGraph {
    ButtonTutorial::new().render(FrameIndex(frame)).unwrap()
}

#[test]
fn sections_run_back_to_back() {
    let comp = ButtonTutorial::new();
    let starts: Vec<_> = comp.plan().phases().iter().map(|p| p.start).collect();
    assert_eq!(starts, vec![0, 90, 390, 690, 1050, 1410]);
    assert_eq!(comp.meta().duration_in_frames, 1560);
}

#[test]
fn click_before_press_is_idle() {
    let s = click_state(-10.0, FPS).unwrap();
    assert_eq!(s.button_scale, 1.0);
    assert_eq!(s.message_opacity, 0.0);
    assert!(!s.message_shown);
}

#[test]
fn click_presses_then_releases() {
    let pressed = click_state(5.0, FPS).unwrap();
    assert!((pressed.button_scale - 0.95).abs() < 1e-3);
    let released = click_state(10.0, FPS).unwrap();
    assert!((released.button_scale - 1.0).abs() < 1e-3);
    assert!(!released.message_shown);
}

#[test]
fn message_fades_in_holds_and_fades_out() {
    assert!(click_state(11.0, FPS).unwrap().message_shown);
    assert_eq!(click_state(25.0, FPS).unwrap().message_opacity, 1.0);
    assert_eq!(click_state(100.0, FPS).unwrap().message_opacity, 1.0);
    let gone = click_state(130.0, FPS).unwrap();
    assert_eq!(gone.message_opacity, 0.0);
    assert!(gone.message_shown);
}

#[test]
fn intro_then_main_layout() {
    let g = render(0);
    assert!(g.contains("intro/title"));
    assert_eq!(g.text_of("intro/subtitle"), Some(""));
    assert!(!g.contains("main"));

    let g = render(90);
    assert!(!g.contains("intro"));
    assert!(g.contains("main/layout/html/typing/code"));
    assert!(!g.contains("main/layout/css/typing"));
    assert_eq!(g.text_of("main/layout/subtitles/html/text"), Some(""));
    assert_eq!(g.find("main/layout/preview/button").unwrap().visual.scale, 1.0);
}

#[test]
fn html_finishes_typing_two_seconds_early() {
    let g = render(90 + 240);
    match &g.find("main/layout/html/typing/code").unwrap().kind {
        ElementKind::Code(block) => {
            assert_eq!(block.text(), HTML_CODE);
            assert!(!block.cursor);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn button_click_is_visible_in_preview() {
    let g = render(905);
    let scale = g.find("main/layout/preview/button").unwrap().visual.scale;
    assert!((scale - 0.95).abs() < 1e-3);

    let g = render(930);
    assert_eq!(g.text_of("main/layout/preview/message"), Some("Button clicked!"));
    assert_eq!(g.find("main/layout/preview/message").unwrap().visual.opacity, 1.0);

    let g = render(1290);
    assert_eq!(
        g.text_of("main/layout/preview/mini_task/message"),
        Some("You pressed the button!")
    );
}

#[test]
fn outro_replaces_main_layout() {
    let g = render(1410);
    assert!(!g.contains("main"));
    assert!(g.text_of("outro/line-0").unwrap().contains("Day 17"));
    assert!(g.contains("outro/line-4"));
}
