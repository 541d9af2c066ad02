use crate::compositions::parts::{self, CodeStyle};
use crate::compositions::{Composition, CompositionMeta, no_props};
use crate::foundation::core::{Canvas, Color, Fps};
use crate::foundation::error::ReelResult;
use crate::scene::builder::SceneBuilder;
use crate::scene::highlight::Language;
use crate::scene::model::{ElementKind, TerminalTone, TextRole, Visual};

pub(crate) const ID: &str = "StringsWalkthrough";

const FPS: Fps = Fps::whole(30);
const BACKGROUND: Color = Color::rgb(0x11, 0x18, 0x27);
const PANEL_FILL: Color = Color::rgb(0x1f, 0x29, 0x37);
const HEADER_FILL: Color = Color::rgb(0x37, 0x41, 0x51);

const STEP_SECS: f64 = 3.0;
/// Terminal scrollback.
const MAX_TERMINAL_LINES: usize = 10;

const CODE: &str = "# Section 2.1: String Data Type

# Strings are identified as a contiguous set of characters represented in the quotation marks.
# Python allows for either pairs of single or double quotes.
# Strings are immutable sequence data type, i.e each time one makes any changes
# to a string, completely new string object is created.

a_str = 'Hello World'
print(a_str)
print(a_str[0])
print(a_str[0:5])

# Attempting to modify a string directly will result in an error
# a_str[0] = 'J' # This line would cause a TypeError: 'str' object does not support item assignment
";

/// One narrated beat: the focused line, what the terminal prints, what the narrator says.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Focused 1-based line of the listing.
    pub code_line: u32,
    /// Appended to the terminal when non-empty.
    pub terminal_output: &'static str,
    /// Narration.
    pub subtitle: &'static str,
}

const STEPS: [Step; 9] = [
    Step {
        code_line: 1,
        terminal_output: "",
        subtitle: "Let's explore Python's String Data Type.",
    },
    Step {
        code_line: 4,
        terminal_output: "",
        subtitle: "Strings are sequences of characters, enclosed in single or double quotes.",
    },
    Step {
        code_line: 5,
        terminal_output: "",
        subtitle: "An important characteristic is that strings are immutable.",
    },
    Step {
        code_line: 8,
        terminal_output: "a_str = 'Hello World'",
        subtitle: "Here, we assign the string 'Hello World' to the variable `a_str`.",
    },
    Step {
        code_line: 9,
        terminal_output: "Hello World",
        subtitle: "Printing `a_str` outputs the entire string.",
    },
    Step {
        code_line: 10,
        terminal_output: "H",
        subtitle: "We can access individual characters using indexing. `a_str[0]` gives the first character.",
    },
    Step {
        code_line: 11,
        terminal_output: "Hello",
        subtitle: "Slicing allows us to extract substrings. `a_str[0:5]` gets characters from index 0 up to (but not including) 5.",
    },
    Step {
        code_line: 14,
        terminal_output: "TypeError: 'str' object does not support item assignment",
        subtitle: "Attempting to change a character directly will result in a TypeError, as strings are immutable.",
    },
    Step {
        code_line: 15,
        terminal_output: "",
        subtitle: "This means any operation that seems to 'change' a string actually creates a new one.",
    },
];

/// Fixed-cadence walkthrough of a code listing: one step every three seconds.
#[derive(Clone, Debug)]
pub struct StringsWalkthrough {
    meta: CompositionMeta,
    step_frames: u64,
}

impl Default for StringsWalkthrough {
    fn default() -> Self {
        Self::new()
    }
}

impl StringsWalkthrough {
    /// The walkthrough with its fixed listing.
    pub fn new() -> Self {
        let step_frames = FPS.secs_to_frames_round(STEP_SECS).max(1);
        Self {
            meta: CompositionMeta {
                id: ID,
                fps: FPS,
                canvas: Canvas::HD_LANDSCAPE,
                duration_in_frames: step_frames * STEPS.len() as u64,
                background: BACKGROUND,
            },
            step_frames,
        }
    }

    /// All steps in order.
    pub fn steps(&self) -> &'static [Step] {
        &STEPS
    }

    /// Step active at `frame`; the last step holds to the end.
    pub fn step_at(&self, frame: i64) -> usize {
        let idx = frame.max(0) as u64 / self.step_frames;
        usize::try_from(idx)
            .unwrap_or(usize::MAX)
            .min(STEPS.len() - 1)
    }

    /// Terminal contents once steps `0..=step` have run, newest last.
    pub fn terminal_lines(&self, step: usize) -> Vec<&'static str> {
        let printed: Vec<_> = STEPS
            .iter()
            .take(step.saturating_add(1))
            .map(|s| s.terminal_output)
            .filter(|o| !o.is_empty())
            .collect();
        let skip = printed.len().saturating_sub(MAX_TERMINAL_LINES);
        printed[skip..].to_vec()
    }
}

impl Composition for StringsWalkthrough {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn build(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        let step_idx = self.step_at(b.frame());
        let step = &STEPS[step_idx];

        b.container(
            "code",
            parts::panel(Some("Python Code (Section 2.1)"), Some(PANEL_FILL), Some(HEADER_FILL)),
            Visual::default(),
            |b| {
                parts::static_code(
                    b,
                    "listing",
                    CODE,
                    Some(step.code_line),
                    CodeStyle::new(Language::Python, Color::WHITE),
                )?;
                Ok(())
            },
        )?;

        b.container(
            "terminal",
            parts::panel(Some("Terminal Output"), Some(Color::BLACK), Some(HEADER_FILL)),
            Visual::default(),
            |b| {
                b.add(
                    "output",
                    ElementKind::Terminal {
                        lines: self
                            .terminal_lines(step_idx)
                            .into_iter()
                            .map(str::to_owned)
                            .collect(),
                        tone: TerminalTone::Plain,
                        prompt_cursor: false,
                    },
                    Visual::default(),
                )?;
                Ok(())
            },
        )?;

        b.container(
            "subtitle",
            parts::panel(None, Some(HEADER_FILL), None),
            Visual::default(),
            |b| {
                b.text("text", step.subtitle, TextRole::Subtitle, Color::WHITE, Visual::default())?;
                Ok(())
            },
        )?;
        Ok(())
    }
}

pub(crate) fn create(props: Option<serde_json::Value>) -> ReelResult<Box<dyn Composition>> {
    no_props(ID, props)?;
    Ok(Box::new(StringsWalkthrough::new()))
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/strings_walkthrough.rs"]
mod tests;
