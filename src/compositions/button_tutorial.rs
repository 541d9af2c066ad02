use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig};
use crate::animation::typewriter::TypewriterReveal;
use crate::compositions::parts::{self, CodeStyle};
use crate::compositions::{Composition, CompositionMeta, no_props};
use crate::foundation::core::{Canvas, Color, Fps};
use crate::foundation::error::ReelResult;
use crate::scene::builder::SceneBuilder;
use crate::scene::highlight::Language;
use crate::scene::model::{CodeTone, ElementKind, TextRole, Visual};
use crate::timeline::phases::{Phase, PhasePlan};
use crate::timeline::sequence::Sequence;

pub(crate) const ID: &str = "ButtonTutorial";

const FPS: Fps = Fps::whole(30);
const BACKGROUND: Color = Color::rgb(0x03, 0x07, 0x12);
const PANEL_FILL: Color = Color::rgb(0x1f, 0x29, 0x37);
const PANEL_EDGE: Color = Color::rgb(0x37, 0x41, 0x51);
const GREEN: Color = Color::rgb(0x4a, 0xde, 0x80);
const GREEN_EDGE: Color = Color::rgb(0x16, 0xa3, 0x4a);
const BLUE: Color = Color::rgb(0x60, 0xa5, 0xfa);
const YELLOW: Color = Color::rgb(0xfa, 0xcc, 0x15);
const PURPLE: Color = Color::rgb(0xc0, 0x84, 0xfc);

const SECTIONS: [(&str, f64); 6] = [
    ("intro", 3.0),
    ("html", 10.0),
    ("css", 10.0),
    ("js", 12.0),
    ("mini_task", 12.0),
    ("outro", 5.0),
];

const INTRO: usize = 0;
const HTML: usize = 1;
const CSS: usize = 2;
const JS: usize = 3;
const MINI_TASK: usize = 4;
const OUTRO: usize = 5;

/// Seconds into a section at which the simulated button is pressed.
const PRESS_AT_SECS: f64 = 7.0;
/// Typing ends this long before its section does.
const CODE_TAIL_SECS: f64 = 2.0;
const SUBTITLE_TAIL_SECS: f64 = 0.5;

const HTML_CODE: &str = r#"<body>
    <div class="container">
        <h1>Web Interaction Example</h1>
        <button id="myButton">Click on me</button>
        <div id="messageBox">
            <!-- Message will appear here -->
        </div>
    </div>
</body>"#;

const CSS_CODE: &str = "body { display: flex; justify-content: center; align-items: center; }\n\n.container {\n    background-color: #2a2a2a;\n    border-radius: 16px;\n    display: flex; flex-direction: column;\n    align-items: center; justify-content: center;\n}\n\n.button-style {\n    background-color: #4CAF50;\n    padding: 15px 30px;\n    border-radius: 8px;\n}\n\n.message-box {\n    background-color: #1e1e1e;\n    border: 1px solid #0f0;\n    opacity: 0; /* Initially hidden */\n    transition: opacity 0.5s ease-in-out;\n}\n.message-box.show { opacity: 1; }";

const JS_CODE: &str = "const myButton = document.getElementById('myButton');\nconst messageBox = document.getElementById('messageBox');\n\nfunction showCustomMessage(message) {\n    messageBox.textContent = message;\n    messageBox.classList.add('show');\n    setTimeout(() => {\n        messageBox.classList.remove('show');\n    }, 3000);\n}\n\nmyButton.addEventListener('click', () => {\n    showCustomMessage(\"Button clicked!\");\n});";

const MINI_TASK_CODE: &str = "\n// Mini-Task Update\nmyButton.addEventListener('click', () => {\n    showCustomMessage(\"You pressed the button!\");\n});";

const SUBTITLES: [(usize, &str); 5] = [
    (
        INTRO,
        "Welcome to Day 16! Today, we build our first interactive web element! We'll create a button that displays a message when clicked, using HTML, CSS, and JavaScript.",
    ),
    (
        HTML,
        "HTML provides the structure: a container, a button, and a message box. The `id` attributes are crucial for JavaScript to find these elements.",
    ),
    (
        CSS,
        "CSS makes it look good: centering, button appearance, and message box style. We use flexbox for centering and transitions for smooth appearance.",
    ),
    (
        JS,
        "JavaScript brings it to life: it listens for clicks and updates the message box. Watch as the button is clicked and the message appears!",
    ),
    (
        MINI_TASK,
        "Time for a mini-task: Change the button's text and message! See the updated interaction.",
    ),
];

const OUTRO_LINES: [&str; 5] = [
    "🆕 Follow for Day 17: More Web Dev!",
    "❤️ Like if you're building awesome web pages!",
    "💬 Comment: What web element do you want to animate next?",
    "🔥 Share with fellow coders!",
    "👾 Join my Discord, link in description.",
];

/// Button and message box state `frames_since_press` frames after a simulated click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickState {
    /// Button scale: pressed down over 5 frames, released over the next 5.
    pub button_scale: f64,
    /// Message box opacity: in over 15 frames, held 3 s, out over 15 frames.
    pub message_opacity: f64,
    /// Message text is set one frame after the release.
    pub message_shown: bool,
}

/// Animate a button press at `frames_since_press = 0`.
pub fn click_state(frames_since_press: f64, fps: Fps) -> ReelResult<ClickState> {
    let stiff = SpringConfig {
        damping: 200.0,
        stiffness: 1000.0,
        mass: 0.5,
        overshoot_clamping: false,
    };
    let press = Spring::new(stiff)?.between(1.0, 0.95).duration(5.0, fps);
    let release = Spring::new(stiff)?.between(0.95, 1.0).duration(5.0, fps);
    let t = frames_since_press;

    let button_scale = interpolate(
        t,
        &[0.0, 5.0, 10.0],
        &[1.0, press.sample(t, fps), release.sample(t - 5.0, fps)],
        InterpolateOpts::clamped(),
    )?;

    let hold = fps.secs_to_frames(3.0);
    let message_opacity = interpolate(
        t,
        &[10.0, 25.0, 25.0 + hold, 40.0 + hold],
        &[0.0, 1.0, 1.0, 0.0],
        InterpolateOpts::clamped(),
    )?;
    let message_shown =
        interpolate(t, &[10.0, 11.0], &[0.0, 1.0], InterpolateOpts::clamped())? > 0.0;

    Ok(ClickState {
        button_scale,
        message_opacity,
        message_shown,
    })
}

/// Four-panel HTML/CSS/JS tutorial that ends with a simulated button click.
#[derive(Clone, Debug)]
pub struct ButtonTutorial {
    meta: CompositionMeta,
    plan: PhasePlan,
}

impl Default for ButtonTutorial {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonTutorial {
    /// The tutorial with its fixed script.
    pub fn new() -> Self {
        let plan = PhasePlan::back_to_back(FPS, SECTIONS);
        Self {
            meta: CompositionMeta {
                id: ID,
                fps: FPS,
                canvas: Canvas::HD_LANDSCAPE,
                duration_in_frames: plan.total_frames(),
                background: BACKGROUND,
            },
            plan,
        }
    }

    /// Section layout.
    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    fn section(&self, idx: usize) -> &Phase {
        &self.plan.phases()[idx]
    }

    // Window of section `idx` in the main layout's clock, which starts with the HTML section.
    fn in_main(&self, idx: usize) -> Sequence {
        let p = self.section(idx);
        let from = p.start.saturating_sub(self.section(HTML).start);
        Sequence::new(i64::try_from(from).unwrap_or(i64::MAX), p.duration)
    }

    fn typing(&self, idx: usize, tail_secs: f64) -> ReelResult<TypewriterReveal> {
        let frames = self.section(idx).duration as f64 - FPS.secs_to_frames(tail_secs);
        TypewriterReveal::over_frames(0, frames.max(0.0))
    }

    fn code_panel(
        &self,
        b: &mut SceneBuilder,
        key: &str,
        title: &str,
        f: impl FnOnce(&mut SceneBuilder) -> ReelResult<()>,
    ) -> ReelResult<()> {
        b.container(
            key,
            parts::panel(Some(title), Some(PANEL_FILL), Some(PANEL_EDGE)),
            Visual::default(),
            f,
        )?;
        Ok(())
    }

    fn build_main(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        self.code_panel(b, "html", "HTML Code", |b| {
            b.sequence("typing", self.in_main(HTML), |b| {
                let style = CodeStyle::new(Language::Plain, GREEN);
                parts::typed_code(b, "code", HTML_CODE, self.typing(HTML, CODE_TAIL_SECS)?, style, Visual::default())?;
                Ok(())
            })?;
            Ok(())
        })?;

        self.code_panel(b, "css", "CSS Code", |b| {
            b.sequence("typing", self.in_main(CSS), |b| {
                let style = CodeStyle::new(Language::Plain, BLUE);
                parts::typed_code(b, "code", CSS_CODE, self.typing(CSS, CODE_TAIL_SECS)?, style, Visual::default())?;
                Ok(())
            })?;
            Ok(())
        })?;

        self.code_panel(b, "js", "JavaScript Code", |b| {
            b.sequence("typing", self.in_main(JS), |b| {
                let style = CodeStyle::new(Language::JavaScript, YELLOW);
                parts::typed_code(b, "code", JS_CODE, self.typing(JS, CODE_TAIL_SECS)?, style, Visual::default())?;
                Ok(())
            })?;
            b.sequence("mini_task", self.in_main(MINI_TASK), |b| {
                let style = CodeStyle::new(Language::JavaScript, PURPLE).tone(CodeTone::Accent);
                parts::typed_code(
                    b,
                    "code",
                    MINI_TASK_CODE,
                    self.typing(MINI_TASK, CODE_TAIL_SECS)?,
                    style,
                    Visual::default(),
                )?;
                Ok(())
            })?;
            Ok(())
        })?;

        b.container(
            "preview",
            parts::panel(None, Some(PANEL_FILL), Some(GREEN_EDGE)),
            Visual::default(),
            |b| {
                b.text(
                    "heading",
                    "Web Interaction Example",
                    TextRole::Heading,
                    Color::WHITE,
                    Visual::default(),
                )?;
                let press_at = self.in_main(JS).from as f64 + FPS.secs_to_frames(PRESS_AT_SECS);
                let click = click_state(b.time().frame_f64() - press_at, FPS)?;
                simulated_button(b, "Click on me", "Button clicked!", click)?;

                b.sequence("mini_task", self.in_main(MINI_TASK), |b| {
                    let press_at = FPS.secs_to_frames(PRESS_AT_SECS);
                    let click = click_state(b.time().frame_f64() - press_at, FPS)?;
                    simulated_button(b, "Press Me", "You pressed the button!", click)
                })?;
                Ok(())
            },
        )?;

        b.group("subtitles", Visual::default(), |b| {
            for (idx, text) in SUBTITLES.iter().skip(1) {
                b.sequence(self.section(*idx).name.as_str(), self.in_main(*idx), |b| {
                    let reveal = self.typing(*idx, SUBTITLE_TAIL_SECS)?;
                    let t = b.time();
                    let shown = reveal.reveal(text, t.frame, t.fps);
                    b.text("text", shown.visible, TextRole::Subtitle, Color::WHITE, Visual::default())?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

fn simulated_button(
    b: &mut SceneBuilder,
    label: &str,
    message: &str,
    click: ClickState,
) -> ReelResult<()> {
    b.add(
        "button",
        ElementKind::Button {
            label: label.to_owned(),
        },
        Visual::default().with_scale(click.button_scale),
    )?;
    b.text(
        "message",
        if click.message_shown { message } else { "" },
        TextRole::Body,
        GREEN,
        Visual::faded(click.message_opacity),
    )?;
    Ok(())
}

impl Composition for ButtonTutorial {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    fn build(&self, b: &mut SceneBuilder) -> ReelResult<()> {
        // Springs on the absolute clock: the layout fades in from frame 30 to 60.
        let layout_opacity = Spring::default()
            .delay(30.0)
            .duration(30.0, FPS)
            .sample(b.time().frame_f64(), FPS);

        b.sequence("intro", self.section(INTRO).sequence(), |b| {
            b.text(
                "title",
                "100 Days of Code: Day 16\nWeb Tutorial: Button Click",
                TextRole::Title,
                YELLOW,
                Visual::default(),
            )?;
            let reveal = self.typing(INTRO, SUBTITLE_TAIL_SECS)?;
            let t = b.time();
            let shown = reveal.reveal(SUBTITLES[0].1, t.frame, t.fps);
            b.text("subtitle", shown.visible, TextRole::Subtitle, Color::WHITE, Visual::default())?;
            Ok(())
        })?;

        let html = self.section(HTML);
        let main_frames = self.section(OUTRO).start.saturating_sub(html.start);
        let main = Sequence::new(i64::try_from(html.start).unwrap_or(i64::MAX), main_frames);
        b.sequence("main", main, |b| {
            b.group("layout", Visual::faded(layout_opacity), |b| self.build_main(b))?;
            Ok(())
        })?;

        b.sequence("outro", self.section(OUTRO).sequence(), |b| {
            for (i, line) in OUTRO_LINES.iter().enumerate() {
                let role = if i == 0 { TextRole::CallToAction } else { TextRole::Body };
                b.text(&format!("line-{i}"), *line, role, Color::WHITE, Visual::default())?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

pub(crate) fn create(props: Option<serde_json::Value>) -> ReelResult<Box<dyn Composition>> {
    no_props(ID, props)?;
    Ok(Box::new(ButtonTutorial::new()))
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/button_tutorial.rs"]
mod tests;
