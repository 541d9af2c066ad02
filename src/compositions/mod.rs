pub(crate) mod button_tutorial;
pub(crate) mod collections_lesson;
pub(crate) mod parts;
pub(crate) mod programmer_challenge;
pub(crate) mod strings_walkthrough;

use serde::de::DeserializeOwned;

use crate::foundation::core::{Canvas, Color, Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::builder::SceneBuilder;
use crate::scene::model::SceneGraph;

/// Static description of a composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompositionMeta {
    /// Registry id.
    pub id: &'static str,
    /// Frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
    /// Total frames; valid frames are `0..duration_in_frames`.
    pub duration_in_frames: u64,
    /// Canvas background.
    pub background: Color,
}

impl CompositionMeta {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration_in_frames as f64)
    }
}

/// A video whose every frame is a pure function of the frame index.
pub trait Composition: Send + Sync {
    /// Static description.
    fn meta(&self) -> &CompositionMeta;

    /// Add this frame's nodes to `b`. The builder's root clock is the absolute frame.
    fn build(&self, b: &mut SceneBuilder) -> ReelResult<()>;

    /// Scene graph for `frame`.
    fn render(&self, frame: FrameIndex) -> ReelResult<SceneGraph> {
        let meta = self.meta();
        if frame.0 >= meta.duration_in_frames {
            return Err(ReelError::evaluation(format!(
                "frame {} is out of bounds for '{}' ({} frames)",
                frame.0, meta.id, meta.duration_in_frames
            )));
        }
        let mut b = SceneBuilder::new(
            meta.id,
            frame,
            meta.canvas,
            meta.fps,
            meta.duration_in_frames,
            meta.background,
        );
        self.build(&mut b)?;
        Ok(b.finish())
    }
}

type Factory = fn(Option<serde_json::Value>) -> ReelResult<Box<dyn Composition>>;

struct RegistryEntry {
    id: &'static str,
    summary: &'static str,
    factory: Factory,
}

/// Lookup table of the built-in compositions.
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Every composition shipped with the crate.
    pub fn builtin() -> Self {
        let entries = vec![
            RegistryEntry {
                id: programmer_challenge::ID,
                summary: "Think Like a Programmer daily challenge, 16:9",
                factory: programmer_challenge::create,
            },
            RegistryEntry {
                id: programmer_challenge::SHORT_ID,
                summary: "Think Like a Programmer teaser, 9:16",
                factory: programmer_challenge::create_short,
            },
            RegistryEntry {
                id: button_tutorial::ID,
                summary: "HTML/CSS/JS button click walkthrough",
                factory: button_tutorial::create,
            },
            RegistryEntry {
                id: collections_lesson::ID,
                summary: "Scripted Python lesson with sections and mini tasks",
                factory: collections_lesson::create,
            },
            RegistryEntry {
                id: strings_walkthrough::ID,
                summary: "Step-by-step Python strings walkthrough",
                factory: strings_walkthrough::create,
            },
        ];
        Self { entries }
    }

    /// Registered ids in listing order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// One-line description of `id`.
    pub fn summary(&self, id: &str) -> Option<&'static str> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.summary)
    }

    /// Instantiate `id` with JSON `props`, or its defaults when `None`.
    #[tracing::instrument(skip(self, props))]
    pub fn create(
        &self,
        id: &str,
        props: Option<serde_json::Value>,
    ) -> ReelResult<Box<dyn Composition>> {
        let entry = self.entries.iter().find(|e| e.id == id).ok_or_else(|| {
            let known: Vec<_> = self.ids().collect();
            ReelError::validation(format!(
                "unknown composition '{id}' (known: {})",
                known.join(", ")
            ))
        })?;
        (entry.factory)(props)
    }
}

pub(crate) fn props_or_default<T: DeserializeOwned + Default>(
    props: Option<serde_json::Value>,
) -> ReelResult<T> {
    match props {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(v) => Ok(serde_json::from_value(v)?),
    }
}

pub(crate) fn no_props(id: &str, props: Option<serde_json::Value>) -> ReelResult<()> {
    match props {
        None | Some(serde_json::Value::Null) => Ok(()),
        Some(serde_json::Value::Object(m)) if m.is_empty() => Ok(()),
        Some(_) => Err(ReelError::validation(format!(
            "composition '{id}' takes no props"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/registry.rs"]
mod tests;
