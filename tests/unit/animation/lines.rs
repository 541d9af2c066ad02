use super::*;

#[test]
fn one_line_per_second() {
    let lines = ["Max of [3, 7, 2, 9, 1, 5]: 9", "Max of empty array: None"];
    let r = LineReveal::one_per_second(100, Fps::new(30, 1).unwrap());

    let at = |f| r.reveal(&lines, f);
    assert!(at(100).visible.is_empty());
    assert!(!at(100).prompt_cursor);
    assert_eq!(at(129).visible.len(), 0);
    assert_eq!(at(130).visible.len(), 1);
    assert!(!at(130).prompt_cursor);
    assert_eq!(at(160).visible.len(), 2);
    assert!(at(160).prompt_cursor);
    assert_eq!(at(10_000).visible.len(), 2);
}

#[test]
fn empty_output_never_shows_prompt() {
    let r = LineReveal::new(0, 30).unwrap();
    let none: [&str; 0] = [];
    assert!(!r.reveal(&none, 1000).prompt_cursor);
}

#[test]
fn count_is_non_decreasing() {
    let r = LineReveal::new(-20, 7).unwrap();
    let mut prev = 0;
    for f in -100..200 {
        let n = r.count_at(5, f);
        assert!(n >= prev);
        prev = n;
    }
    assert_eq!(prev, 5);
}

#[test]
fn zero_pace_is_rejected() {
    assert!(LineReveal::new(0, 0).is_err());
}
