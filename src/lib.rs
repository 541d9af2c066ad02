//! codereel describes programming-tutorial videos as pure functions of the frame index.
//!
//! Every built-in [`Composition`] turns a frame number into a [`SceneGraph`]: typed code, terminal
//! output, narration and progress widgets with their animated opacity, scale and position. Nothing
//! is rasterized here; a host draws the scene graph.
//!
//! - Pick a composition from the [`Registry`]
//! - Evaluate single frames, or stream a range through a [`RenderSession`] into a [`SceneSink`]
//! - Build your own from the animation primitives: [`interpolate`], [`TypewriterReveal`],
//!   [`Spring`] and [`Sequence`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compositions;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod timeline;

pub use crate::foundation::core::{Canvas, Color, Fps, FrameIndex, FrameRange, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOpts, Interpolator, fade_in, interpolate, ramp,
};
pub use crate::animation::lines::{LineReveal, RevealedLines};
pub use crate::animation::spring::{DEFAULT_SETTLE_THRESHOLD, Spring, SpringConfig, measure_spring};
pub use crate::animation::typewriter::{RevealRate, Revealed, TypewriterReveal, char_prefix};
pub use crate::compositions::button_tutorial::{ButtonTutorial, ClickState, click_state};
pub use crate::compositions::collections_lesson::{
    CollectionsLesson, LessonIntro, LessonScript, LessonSection, LessonTask, TimedText,
};
pub use crate::compositions::programmer_challenge::{
    ChallengeProps, ProgrammerChallenge, ProgrammerChallengeShort,
};
pub use crate::compositions::strings_walkthrough::{Step, StringsWalkthrough};
pub use crate::compositions::{Composition, CompositionMeta, Registry};
pub use crate::scene::builder::SceneBuilder;
pub use crate::scene::highlight::{
    CodeLine, Language, LineClass, Token, TokenKind, annotate, tokenize_line,
};
pub use crate::scene::model::{
    CodeBlock, CodeTone, ElementKind, NodeId, SceneGraph, SceneNode, TerminalTone, TextRole,
    Visual,
};
pub use crate::session::fingerprint::{SceneFingerprint, fingerprint_scene};
pub use crate::session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
pub use crate::session::sink::{
    FingerprintSink, InMemorySink, JsonLinesSink, SceneSink, SinkConfig,
};
pub use crate::timeline::phases::{Phase, PhasePlan, TimeCursor};
pub use crate::timeline::sequence::{Sequence, TimeCtx};
