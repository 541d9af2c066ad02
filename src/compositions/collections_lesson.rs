use crate::animation::interpolate::ramp;
use crate::animation::typewriter::TypewriterReveal;
use crate::compositions::parts::{self, CodeStyle};
use crate::compositions::{Composition, CompositionMeta};
use crate::foundation::core::{Canvas, Color, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::builder::SceneBuilder;
use crate::scene::highlight::Language;
use crate::scene::model::{ElementKind, TerminalTone, TextRole, Visual};
use crate::timeline::phases::TimeCursor;
use crate::timeline::sequence::Sequence;

pub(crate) const ID: &str = "CollectionsLesson";

const FPS: Fps = Fps::whole(30);
const BACKGROUND: Color = Color::rgb(0x2a, 0x2a, 0x2a);
const GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);
const CODE_FILL: Color = Color::rgb(0x1e, 0x1e, 0x1e);
const CODE_EDGE: Color = Color::rgb(0x44, 0x44, 0x44);
const TERMINAL_GREEN: Color = Color::rgb(0x00, 0xff, 0x00);

const BUILTIN_SCRIPT: &str = include_str!("../../fixtures/collections_day15.json");

/// Seconds for the stage to slide in from above.
const SLIDE_IN_SECS: f64 = 0.6;
const TEXT_FADE_SECS: f64 = 0.5;
const SECTION_TITLE_SECS: f64 = 3.0;
/// Pause after code and output before the panel leaves.
const SECTION_PAUSE_SECS: f64 = 4.0;
const TASK_SUBTITLE_SECS: f64 = 4.5;
const TASK_PAUSE_SECS: f64 = 4.5;
const TASKS_INTRO_SECS: f64 = 3.0;
const OUTRO_SECS: f64 = 6.0;
const GAP_SECS: f64 = 0.5;

/// Timed narration line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedText {
    /// Text.
    pub text: String,
    /// On-screen time.
    pub secs: f64,
}

/// Opening title card and narration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LessonIntro {
    /// Title card time.
    pub title_secs: f64,
    /// Narration shown after the title, one after another.
    pub subtitles: Vec<TimedText>,
}

/// One taught topic: title card, typed code with its output, then a takeaway.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LessonSection {
    /// Topic name.
    pub title: String,
    /// Line shown under the topic name.
    pub subtitle: String,
    /// Example source.
    pub code: String,
    /// Output of running `code`.
    pub output: String,
    /// Typing time.
    pub code_secs: f64,
    /// Time the output stays up after typing ends.
    pub output_secs: f64,
    /// Takeaway shown after the example.
    pub extra_subtitle: String,
    /// Takeaway time.
    pub extra_secs: f64,
}

/// Exercise with its solution.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LessonTask {
    /// Exercise statement.
    pub subtitle: String,
    /// Solution source.
    pub code: String,
    /// Output of the solution.
    pub output: String,
    /// Typing time.
    pub code_secs: f64,
    /// Time the output stays up after typing ends.
    pub output_secs: f64,
}

/// Everything a lesson video says and shows, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LessonScript {
    /// Title card text.
    pub title: String,
    /// Opening.
    pub intro: LessonIntro,
    /// Taught topics.
    pub sections: Vec<LessonSection>,
    /// Line introducing the exercises.
    pub tasks_intro: String,
    /// Exercises.
    pub tasks: Vec<LessonTask>,
    /// Closing call to action, one entry per line.
    pub outro: Vec<String>,
}

impl LessonScript {
    /// The Day 15 `collections` module lesson bundled with the crate.
    pub fn builtin() -> ReelResult<Self> {
        Ok(serde_json::from_str(BUILTIN_SCRIPT)?)
    }

    /// Reject negative or non-finite timings.
    pub fn validate(&self) -> ReelResult<()> {
        let check = |what: &str, secs: f64| {
            if secs.is_finite() && secs >= 0.0 {
                Ok(())
            } else {
                Err(ReelError::validation(format!(
                    "lesson {what} time must be finite and >= 0, got {secs}"
                )))
            }
        };
        check("intro title", self.intro.title_secs)?;
        for s in &self.intro.subtitles {
            check("intro subtitle", s.secs)?;
        }
        for s in &self.sections {
            check("section code", s.code_secs)?;
            check("section output", s.output_secs)?;
            check("section takeaway", s.extra_secs)?;
        }
        for t in &self.tasks {
            check("task code", t.code_secs)?;
            check("task output", t.output_secs)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SectionSlots {
    title: Sequence,
    example: Sequence,
    takeaway: Sequence,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TaskSlots {
    statement: Sequence,
    example: Sequence,
}

/// Frame windows of every scripted item.
#[derive(Clone, Debug, PartialEq)]
struct LessonTimeline {
    title: Sequence,
    intro_subtitles: Vec<Sequence>,
    sections: Vec<SectionSlots>,
    tasks_intro: Sequence,
    tasks: Vec<TaskSlots>,
    outro: Sequence,
    total_frames: u64,
}

fn window(fps: Fps, start_secs: f64, secs: f64) -> Sequence {
    let from = fps.secs_to_frames_round(start_secs);
    Sequence::new(
        i64::try_from(from).unwrap_or(i64::MAX),
        fps.secs_to_frames_round(secs),
    )
}

impl LessonTimeline {
    fn lay_out(script: &LessonScript, fps: Fps) -> Self {
        let mut cur = TimeCursor::new();
        let slot = |cur: &mut TimeCursor, secs: f64| window(fps, cur.take(secs), secs);

        let title = slot(&mut cur, script.intro.title_secs);
        let intro_subtitles = script
            .intro
            .subtitles
            .iter()
            .map(|s| {
                let w = slot(&mut cur, s.secs);
                cur.skip(GAP_SECS);
                w
            })
            .collect();

        let sections = script
            .sections
            .iter()
            .map(|s| {
                let title = slot(&mut cur, SECTION_TITLE_SECS);
                cur.skip(GAP_SECS);
                let example = slot(&mut cur, s.code_secs + s.output_secs + SECTION_PAUSE_SECS);
                let takeaway = slot(&mut cur, s.extra_secs);
                cur.skip(2.0 * GAP_SECS);
                SectionSlots {
                    title,
                    example,
                    takeaway,
                }
            })
            .collect();

        let tasks_intro = slot(&mut cur, TASKS_INTRO_SECS);
        cur.skip(GAP_SECS);

        let tasks = script
            .tasks
            .iter()
            .map(|t| {
                let statement = slot(&mut cur, TASK_SUBTITLE_SECS);
                let example = slot(&mut cur, t.code_secs + t.output_secs + TASK_PAUSE_SECS);
                cur.skip(GAP_SECS);
                TaskSlots { statement, example }
            })
            .collect();

        let outro = slot(&mut cur, OUTRO_SECS);
        Self {
            title,
            intro_subtitles,
            sections,
            tasks_intro,
            tasks,
            outro,
            total_frames: fps.secs_to_frames_round(cur.now()),
        }
    }
}

/// Script-driven lesson: intro, taught sections, a run of mini tasks and an outro.
#[derive(Clone, Debug)]
pub struct CollectionsLesson {
    meta: CompositionMeta,
    script: LessonScript,
    timeline: LessonTimeline,
}

impl CollectionsLesson {
    /// Lesson for `script`; its length follows from the script's timings.
    pub fn new(script: LessonScript) -> ReelResult<Self> {
        script.validate()?;
        let timeline = LessonTimeline::lay_out(&script, FPS);
        if timeline.total_frames == 0 {
            return Err(ReelError::validation("lesson script has zero length"));
        }
        Ok(Self {
            meta: CompositionMeta {
                id: ID,
                fps: FPS,
                canvas: Canvas::HD_LANDSCAPE,
                duration_in_frames: timeline.total_frames,
                background: BACKGROUND,
            },
            script,
            timeline,
        })
    }

    /// The script being played.
    pub fn script(&self) -> &LessonScript {
        &self.script
    }

    /// First frame of section `idx`'s title card.
    pub fn section_start(&self, idx: usize) -> Option<u64> {
        self.timeline
            .sections
            .get(idx)
            .and_then(|s| u64::try_from(s.title.from).ok())
    }

    /// First frame of task `idx`'s statement.
    pub fn task_start(&self, idx: usize) -> Option<u64> {
        self.timeline
            .tasks
            .get(idx)
            .and_then(|t| u64::try_from(t.statement.from).ok())
    }
}

fn narration(b: &mut SceneBuilder, key: &str, text: &str, role: TextRole, color: Color) -> ReelResult<()> {
    let opacity = parts::fade(b, 0.0, TEXT_FADE_SECS);
    b.text(key, text, role, color, Visual::faded(opacity))?;
    Ok(())
}

// Code typed over `code_secs`, output fading in during the second after typing ends.
fn example(b: &mut SceneBuilder, code: &str, output: &str, code_secs: f64) -> ReelResult<()> {
    let code_opacity = parts::fade(b, 0.0, 1.0);
    let output_opacity = parts::fade(b, code_secs, code_secs + 1.0);

    b.container(
        "code",
        parts::panel(None, Some(CODE_FILL), Some(CODE_EDGE)),
        Visual::faded(code_opacity),
        |b| {
            let reveal = TypewriterReveal::over_frames(0, FPS.secs_to_frames(code_secs))?;
            parts::typed_code(
                b,
                "source",
                code,
                reveal,
                CodeStyle::new(Language::Python, Color::WHITE),
                Visual::default(),
            )?;
            Ok(())
        },
    )?;
    b.container(
        "output",
        parts::panel(None, Some(Color::BLACK), Some(TERMINAL_GREEN)),
        Visual::faded(output_opacity),
        |b| {
            b.add(
                "lines",
                ElementKind::Terminal {
                    lines: output.lines().map(str::to_owned).collect(),
                    tone: TerminalTone::Success,
                    prompt_cursor: false,
                },
                Visual::default(),
            )?;
            Ok(())
        },
    )?;
    Ok(())
}

impl Composition for CollectionsLesson {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn build(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        let t = b.time();
        let height = f64::from(self.meta.canvas.height);
        let slide = ramp(t.frame_f64(), 0.0, t.fps.secs_to_frames(SLIDE_IN_SECS), -height, 0.0);
        let tl = &self.timeline;
        let script = &self.script;

        b.group("stage", Visual::default().with_translate(0.0, slide), |b| {
            b.sequence("title", tl.title, |b| {
                narration(b, "text", &script.title, TextRole::Title, GOLD)
            })?;
            for (i, (w, s)) in tl.intro_subtitles.iter().zip(&script.intro.subtitles).enumerate() {
                b.sequence(&format!("intro-{i}"), *w, |b| {
                    narration(b, "text", &s.text, TextRole::Subtitle, Color::WHITE)
                })?;
            }

            for (i, (slots, s)) in tl.sections.iter().zip(&script.sections).enumerate() {
                b.sequence(&format!("section-{i}-title"), slots.title, |b| {
                    narration(b, "title", &s.title, TextRole::Heading, GOLD)?;
                    narration(b, "subtitle", &s.subtitle, TextRole::Subtitle, Color::WHITE)
                })?;
                b.sequence(&format!("section-{i}-example"), slots.example, |b| {
                    example(b, &s.code, &s.output, s.code_secs)
                })?;
                b.sequence(&format!("section-{i}-takeaway"), slots.takeaway, |b| {
                    narration(b, "text", &s.extra_subtitle, TextRole::Subtitle, Color::WHITE)
                })?;
            }

            b.sequence("tasks-intro", tl.tasks_intro, |b| {
                narration(b, "text", &script.tasks_intro, TextRole::Subtitle, Color::WHITE)
            })?;
            for (i, (slots, task)) in tl.tasks.iter().zip(&script.tasks).enumerate() {
                b.sequence(&format!("task-{i}-statement"), slots.statement, |b| {
                    narration(b, "text", &task.subtitle, TextRole::Subtitle, Color::WHITE)
                })?;
                b.sequence(&format!("task-{i}-example"), slots.example, |b| {
                    example(b, &task.code, &task.output, task.code_secs)
                })?;
            }

            b.sequence("outro", tl.outro, |b| {
                narration(b, "text", &script.outro.join("\n"), TextRole::CallToAction, Color::WHITE)
            })?;
            Ok(())
        })?;
        Ok(())
    }
}

pub(crate) fn create(props: Option<serde_json::Value>) -> ReelResult<Box<dyn Composition>> {
    let script = match props {
        Some(v) if !v.is_null() => serde_json::from_value(v)?,
        _ => LessonScript::builtin()?,
    };
    Ok(Box::new(CollectionsLesson::new(script)?))
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/collections_lesson.rs"]
mod tests;
