use super::*;
use crate::foundation::core::FrameIndex;
use crate::scene::highlight::LineClass;
use crate::scene::model::SceneGraph;

fn listing(g: &SceneGraph) -> &[crate::scene::highlight::CodeLine] {
    match &g.find("code/listing").unwrap().kind {
        ElementKind::Code(block) => &block.lines,
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn one_step_every_three_seconds() {
    let w = StringsWalkthrough::new();
    assert_eq!(w.meta().duration_in_frames, 810);
    assert_eq!(w.step_at(0), 0);
    assert_eq!(w.step_at(89), 0);
    assert_eq!(w.step_at(90), 1);
    assert_eq!(w.step_at(-5), 0);
    assert_eq!(w.step_at(10_000), 8);
}

#[test]
fn terminal_accumulates_non_empty_outputs() {
    let w = StringsWalkthrough::new();
    assert!(w.terminal_lines(2).is_empty());
    assert_eq!(w.terminal_lines(4), vec!["a_str = 'Hello World'", "Hello World"]);
    let all = w.terminal_lines(8);
    assert_eq!(all.len(), 5);
    assert!(all.last().unwrap().starts_with("TypeError"));
}

#[test]
fn step_lines_point_at_their_code() {
    let lines: Vec<_> = CODE.split('\n').collect();
    let w = StringsWalkthrough::new();
    assert!(lines[w.steps()[3].code_line as usize - 1].starts_with("a_str = "));
    assert!(lines[w.steps()[6].code_line as usize - 1].contains("[0:5]"));
}

#[test]
fn render_highlights_current_line() {
    let w = StringsWalkthrough::new();
    let g = w.render(FrameIndex(0)).unwrap();
    let focused: Vec<_> = listing(&g).iter().filter(|l| l.highlighted).collect();
    assert_eq!(focused.len(), 1);
    assert_eq!(focused[0].number, 1);
    assert_eq!(focused[0].class, LineClass::Comment);
    assert_eq!(
        g.text_of("subtitle/text"),
        Some("Let's explore Python's String Data Type.")
    );

    let g = w.render(FrameIndex(7 * 90)).unwrap();
    let focused = listing(&g).iter().find(|l| l.highlighted).unwrap();
    assert_eq!(focused.number, 14);
    assert_eq!(focused.class, LineClass::Error);
}

#[test]
fn last_frame_holds_final_step() {
    let w = StringsWalkthrough::new();
    let g = w.render(FrameIndex(809)).unwrap();
    assert!(g.text_of("subtitle/text").unwrap().starts_with("This means"));
    assert!(w.render(FrameIndex(810)).is_err());
}
