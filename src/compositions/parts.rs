//! Building blocks shared by the built-in compositions.
//!
//! Every helper reads the builder's current clock, so inside a sequence it animates from the
//! sequence's first frame.

use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, fade_in, interpolate};
use crate::animation::lines::LineReveal;
use crate::animation::typewriter::TypewriterReveal;
use crate::foundation::core::Color;
use crate::foundation::error::ReelResult;
use crate::scene::builder::SceneBuilder;
use crate::scene::highlight::{Language, annotate};
use crate::scene::model::{
    CodeBlock, CodeTone, ElementKind, NodeId, TerminalTone, TextRole, Visual,
};

/// Seconds a subtitle takes to fade in.
pub(crate) const SUBTITLE_FADE_SECS: f64 = 0.5;
/// Pixels a subtitle rises while fading in.
const SUBTITLE_RISE_PX: f64 = 10.0;

/// Look of a code panel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CodeStyle {
    pub(crate) language: Language,
    pub(crate) tone: CodeTone,
    pub(crate) color: Color,
}

impl CodeStyle {
    pub(crate) const fn new(language: Language, color: Color) -> Self {
        Self {
            language,
            tone: CodeTone::Normal,
            color,
        }
    }

    pub(crate) const fn tone(mut self, tone: CodeTone) -> Self {
        self.tone = tone;
        self
    }
}

/// Boxed container element.
pub(crate) fn panel(title: Option<&str>, fill: Option<Color>, border: Option<Color>) -> ElementKind {
    ElementKind::Panel {
        title: title.map(str::to_owned),
        fill,
        border,
    }
}

/// Code typed out by `reveal` on the current clock.
pub(crate) fn typed_code(
    b: &mut SceneBuilder,
    key: &str,
    code: &str,
    reveal: TypewriterReveal,
    style: CodeStyle,
    visual: Visual,
) -> ReelResult<NodeId> {
    let t = b.time();
    let shown = reveal.reveal(code, t.frame, t.fps);
    let block = CodeBlock {
        lines: annotate(shown.visible, style.language, None),
        cursor: shown.cursor,
        tone: style.tone,
        color: style.color,
    };
    b.add(key, ElementKind::Code(block), visual)
}

/// Code shown in full, with one focused line.
pub(crate) fn static_code(
    b: &mut SceneBuilder,
    key: &str,
    code: &str,
    highlight_line: Option<u32>,
    style: CodeStyle,
) -> ReelResult<NodeId> {
    let block = CodeBlock {
        lines: annotate(code, style.language, highlight_line),
        cursor: false,
        tone: style.tone,
        color: style.color,
    };
    b.add(key, ElementKind::Code(block), Visual::default())
}

/// Terminal lines revealed one at a time by `reveal` on the current clock.
pub(crate) fn terminal(
    b: &mut SceneBuilder,
    key: &str,
    lines: &[&str],
    reveal: LineReveal,
    tone: TerminalTone,
) -> ReelResult<NodeId> {
    let shown = reveal.reveal(lines, b.frame());
    b.add(
        key,
        ElementKind::Terminal {
            lines: shown.visible.iter().map(|l| (*l).to_owned()).collect(),
            tone,
            prompt_cursor: shown.prompt_cursor,
        },
        Visual::default(),
    )
}

/// Narration line that eases in and rises into place at the start of the current clock.
pub(crate) fn subtitle(
    b: &mut SceneBuilder,
    key: &str,
    text: &str,
    color: Color,
) -> ReelResult<NodeId> {
    let t = b.time();
    let fade_frames = t.fps.secs_to_frames(SUBTITLE_FADE_SECS);
    let opacity = interpolate(
        t.frame_f64(),
        &[0.0, fade_frames],
        &[0.0, 1.0],
        InterpolateOpts::clamped().with_ease(Ease::EaseIn),
    )?;
    let visual = Visual::faded(opacity).with_translate(0.0, SUBTITLE_RISE_PX * (1.0 - opacity));
    b.text(key, text, TextRole::Subtitle, color, visual)
}

/// Linear fade on the current clock between two offsets in seconds.
pub(crate) fn fade(b: &SceneBuilder, start_secs: f64, end_secs: f64) -> f64 {
    let t = b.time();
    fade_in(
        t.frame_f64(),
        t.fps.secs_to_frames(start_secs),
        t.fps.secs_to_frames(end_secs),
    )
}
