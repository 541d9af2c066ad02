use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::lines::LineReveal;
use crate::animation::typewriter::TypewriterReveal;
use crate::compositions::parts::{self, CodeStyle};
use crate::compositions::{Composition, CompositionMeta, props_or_default};
use crate::foundation::core::{Canvas, Color, Fps};
use crate::foundation::error::ReelResult;
use crate::scene::builder::SceneBuilder;
use crate::scene::highlight::Language;
use crate::scene::model::{CodeTone, ElementKind, TerminalTone, TextRole, Visual};
use crate::timeline::phases::PhasePlan;
use crate::timeline::sequence::Sequence;

pub(crate) const ID: &str = "ProgrammerChallenge";
pub(crate) const SHORT_ID: &str = "ProgrammerChallengeShort";

const FPS: Fps = Fps::whole(30);
const BACKGROUND: Color = Color::rgb(0x1a, 0x1a, 0x1a);
const EDITOR_FILL: Color = Color::rgb(0x2d, 0x2d, 0x2d);
const EDGE: Color = Color::rgb(0x4a, 0x4a, 0x4a);
const BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);
const AMBER: Color = Color::rgb(0xfb, 0xbf, 0x24);
const GREEN: Color = Color::rgb(0x22, 0xc5, 0x5e);
const RED: Color = Color::rgb(0xef, 0x44, 0x44);

/// Props shared by both challenge cuts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChallengeProps {
    /// Day number in the 100-day series.
    pub day: u32,
    /// Challenge statement.
    pub challenge: String,
}

impl Default for ChallengeProps {
    fn default() -> Self {
        Self {
            day: 1,
            challenge: "Write a function that finds the maximum number in an array".to_owned(),
        }
    }
}

const INITIAL: &str = r#"def find_max(numbers):
    # We'll use a variable to track the maximum
    max_value = numbers[0]
    
    for num in numbers:
        if num > max_value:
            max_value = num
    
    return max_value"#;

const WITH_TEST: &str = r#"def find_max(numbers):
    # We'll use a variable to track the maximum
    max_value = numbers[0]
    
    for num in numbers:
        if num > max_value:
            max_value = num
    
    return max_value

# Test our function
test_array = [3, 7, 2, 9, 1, 5]
result = find_max(test_array)
print(f"Maximum value: {result}")"#;

const WITH_ERROR: &str = r#"def find_max(numbers):
    # We'll use a variable to track the maximum
    max_value = numbers[0]  # This will cause an error!
    
    for num in numbers:
        if num > max_value:
            max_value = num
    
    return max_value

# Test with empty array
empty_array = []
result = find_max(empty_array)
print(f"Maximum value: {result}")"#;

const FIXED: &str = r#"def find_max(numbers):
    if not numbers:  # Check for empty array
        return None
    
    max_value = numbers[0]
    
    for num in numbers:
        if num > max_value:
            max_value = num
    
    return max_value

# Test both cases
test_array = [3, 7, 2, 9, 1, 5]
empty_array = []

print(f"Max of {test_array}: {find_max(test_array)}")
print(f"Max of empty array: {find_max(empty_array)}")"#;

const SHORT_CODE: &str = r#"def find_max(numbers):
    if not numbers:
        return None
    
    max_value = numbers[0]
    for num in numbers:
        if num > max_value:
            max_value = num
    return max_value

print(find_max([3,7,2,9,1]))"#;

const PHASES: [(&str, f64); 7] = [
    ("hook", 6.0),
    ("thinking", 8.0),
    ("coding", 12.0),
    ("testing", 8.0),
    ("error", 10.0),
    ("fixing", 12.0),
    ("recap", 4.0),
];

const HOOK: usize = 0;
const THINKING: usize = 1;
const CODING: usize = 2;
const TESTING: usize = 3;
const ERROR: usize = 4;
const FIXING: usize = 5;
const RECAP: usize = 6;

/// Sixty-second challenge walkthrough: hook, live coding, a failing edge case and the fix.
#[derive(Clone, Debug)]
pub struct ProgrammerChallenge {
    meta: CompositionMeta,
    props: ChallengeProps,
    plan: PhasePlan,
    subtitles: Vec<String>,
}

impl ProgrammerChallenge {
    /// Composition for `props`.
    pub fn new(props: ChallengeProps) -> Self {
        let plan = PhasePlan::back_to_back(FPS, PHASES);
        let subtitles = vec![
            format!("Your task for Day {}: {}", props.day, props.challenge),
            "Let's start by defining our function and thinking through the approach".to_owned(),
            "We'll use a variable to track the maximum value as we iterate".to_owned(),
            "Now let's test it with some sample data".to_owned(),
            "Oops! What happens if we pass an empty array? Let's see the error".to_owned(),
            "Let's fix this by adding proper error handling".to_owned(),
            "Perfect! Remember: always handle edge cases like empty inputs".to_owned(),
        ];
        Self {
            meta: CompositionMeta {
                id: ID,
                fps: FPS,
                canvas: Canvas::HD_LANDSCAPE,
                duration_in_frames: plan.total_frames(),
                background: BACKGROUND,
            },
            props,
            plan,
            subtitles,
        }
    }

    /// Phase layout.
    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    fn build_editor(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        let phases = self.plan.phases();
        let code = CodeStyle::new(Language::Python, GREEN);

        b.sequence("hook", phases[HOOK].sequence(), |b| {
            let scale = pulse(b.frame(), FPS.secs_to_frames_round(2.0))?;
            b.text(
                "challenge",
                self.props.challenge.as_str(),
                TextRole::Heading,
                AMBER,
                Visual::default().with_scale(scale),
            )?;
            Ok(())
        })?;

        let snippets = [
            (
                "initial",
                phases[THINKING].sequence_through(phases[CODING].duration),
                INITIAL,
                20.0,
                CodeTone::Normal,
            ),
            ("with_test", phases[TESTING].sequence(), WITH_TEST, 25.0, CodeTone::Normal),
            ("with_error", phases[ERROR].sequence(), WITH_ERROR, 25.0, CodeTone::Error),
            (
                "fixed",
                phases[FIXING].sequence_through(phases[RECAP].duration),
                FIXED,
                25.0,
                CodeTone::Normal,
            ),
        ];
        for (key, window, text, cps, tone) in snippets {
            b.sequence(key, window, |b| {
                let color = if tone == CodeTone::Error { RED } else { GREEN };
                let reveal = TypewriterReveal::chars_per_second(0, cps)?;
                parts::typed_code(
                    b,
                    "code",
                    text,
                    reveal,
                    CodeStyle { color, ..code }.tone(tone),
                    Visual::default(),
                )?;
                Ok(())
            })?;
        }
        Ok(())
    }

    fn build_terminal(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        let phases = self.plan.phases();
        let secs = |s: f64| FPS.secs_to_frames_round(s);
        let after = |idx: usize, lead: u64| {
            let p = &phases[idx];
            Sequence::new(
                i64::try_from(p.start + lead).unwrap_or(i64::MAX),
                p.duration.saturating_sub(lead),
            )
        };

        let outputs: [(&str, Sequence, &[&str], TerminalTone); 3] = [
            ("success", after(TESTING, secs(4.0)), &["Maximum value: 9"], TerminalTone::Success),
            (
                "error",
                after(ERROR, secs(4.0)),
                &["IndexError: list index out of range"],
                TerminalTone::Error,
            ),
            (
                "fixed",
                after(FIXING, secs(6.0)),
                &["Max of [3, 7, 2, 9, 1, 5]: 9", "Max of empty array: None"],
                TerminalTone::Success,
            ),
        ];
        for (key, window, lines, tone) in outputs {
            b.sequence(key, window, |b| {
                parts::terminal(b, "output", lines, LineReveal::one_per_second(0, FPS), tone)?;
                Ok(())
            })?;
        }
        Ok(())
    }
}

/// Scale of a looping pulse: `1 -> 1.05 -> 1` every `period` frames.
fn pulse(frame: i64, period: u64) -> ReelResult<f64> {
    let period = i64::try_from(period.max(1)).unwrap_or(i64::MAX);
    let phase = frame.rem_euclid(period) as f64;
    let period = period as f64;
    interpolate(
        phase,
        &[0.0, period / 2.0, period],
        &[1.0, 1.05, 1.0],
        InterpolateOpts::clamped(),
    )
}

impl Composition for ProgrammerChallenge {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn build(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        let frame = b.frame();

        b.container(
            "header",
            parts::panel(None, Some(BLUE), None),
            Visual::default(),
            |b| {
                b.text(
                    "title",
                    format!("Think Like a Programmer – Day {} Challenge", self.props.day),
                    TextRole::Title,
                    Color::WHITE,
                    Visual::default(),
                )?;
                Ok(())
            },
        )?;
        b.text(
            "badge",
            format!("🎯 Day {}/100", self.props.day),
            TextRole::Badge,
            Color::BLACK,
            Visual::default(),
        )?;

        b.container(
            "editor",
            parts::panel(Some("📝 Code Editor - challenge.py"), Some(EDITOR_FILL), Some(EDGE)),
            Visual::default(),
            |b| self.build_editor(b),
        )?;
        b.container(
            "terminal",
            parts::panel(Some("💻 Terminal Output"), Some(Color::BLACK), Some(EDGE)),
            Visual::default(),
            |b| self.build_terminal(b),
        )?;

        b.group("subtitles", Visual::default(), |b| {
            for (phase, text) in self.plan.phases().iter().zip(&self.subtitles) {
                b.sequence(&phase.name, phase.sequence(), |b| {
                    parts::subtitle(b, "text", text, AMBER)?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;

        b.group("progress", Visual::default(), |b| {
            for (i, active) in self.plan.indicator(frame).into_iter().enumerate() {
                b.add(
                    &format!("dot-{i}"),
                    ElementKind::Indicator { active },
                    Visual::default(),
                )?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

/// Fifteen-second vertical teaser for the same challenge.
#[derive(Clone, Debug)]
pub struct ProgrammerChallengeShort {
    meta: CompositionMeta,
    props: ChallengeProps,
}

impl ProgrammerChallengeShort {
    /// Composition for `props`.
    pub fn new(props: ChallengeProps) -> Self {
        Self {
            meta: CompositionMeta {
                id: SHORT_ID,
                fps: FPS,
                canvas: Canvas::HD_PORTRAIT,
                duration_in_frames: FPS.secs_to_frames_round(15.0),
                background: BACKGROUND,
            },
            props,
        }
    }
}

impl Composition for ProgrammerChallengeShort {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn build(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        let secs = |s: f64| FPS.secs_to_frames_round(s);
        let at = |s: f64| i64::try_from(secs(s)).unwrap_or(i64::MAX);

        b.container("header", parts::panel(None, Some(BLUE), None), Visual::default(), |b| {
            b.text(
                "title",
                "Think Like a Programmer",
                TextRole::Title,
                Color::WHITE,
                Visual::default(),
            )?;
            b.text(
                "day",
                format!("Day {} Challenge", self.props.day),
                TextRole::Heading,
                AMBER,
                Visual::default(),
            )?;
            Ok(())
        })?;

        b.container(
            "hook",
            parts::panel(None, Some(BLUE.with_opacity(0.1)), Some(BLUE)),
            Visual::default(),
            |b| {
                b.sequence("intro", Sequence::new(0, secs(4.0)), |b| {
                    b.text(
                        "challenge",
                        self.props.challenge.as_str(),
                        TextRole::Heading,
                        AMBER,
                        Visual::default(),
                    )?;
                    Ok(())
                })?;
                Ok(())
            },
        )?;

        b.container(
            "preview",
            parts::panel(None, Some(EDITOR_FILL), None),
            Visual::default(),
            |b| {
                b.sequence("typing", Sequence::new(at(2.0), secs(6.0)), |b| {
                    parts::typed_code(
                        b,
                        "code",
                        SHORT_CODE,
                        TypewriterReveal::chars_per_second(0, 30.0)?,
                        CodeStyle::new(Language::Python, GREEN),
                        Visual::default(),
                    )?;
                    Ok(())
                })?;
                Ok(())
            },
        )?;

        b.container(
            "output",
            parts::panel(None, Some(Color::BLACK), None),
            Visual::default(),
            |b| {
                b.sequence("run", Sequence::new(at(10.0), secs(5.0)), |b| {
                    parts::terminal(
                        b,
                        "lines",
                        &["Output: 9"],
                        LineReveal::one_per_second(0, FPS),
                        TerminalTone::Success,
                    )?;
                    Ok(())
                })?;
                Ok(())
            },
        )?;

        b.sequence("cta", Sequence::new(at(12.0), secs(3.0)), |b| {
            let scale = pulse(b.frame(), secs(1.0))?;
            b.text(
                "text",
                "Watch the full solution! 👆",
                TextRole::CallToAction,
                AMBER,
                Visual::default().with_scale(scale),
            )?;
            Ok(())
        })?;
        Ok(())
    }
}

pub(crate) fn create(
    props: Option<serde_json::Value>,
) -> ReelResult<Box<dyn Composition>> {
    Ok(Box::new(ProgrammerChallenge::new(props_or_default(props)?)))
}

pub(crate) fn create_short(
    props: Option<serde_json::Value>,
) -> ReelResult<Box<dyn Composition>> {
    Ok(Box::new(ProgrammerChallengeShort::new(props_or_default(props)?)))
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/programmer_challenge.rs"]
mod tests;
