use std::io::Write;

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::SceneGraph;
use crate::session::fingerprint::SceneFingerprint;

/// Configuration provided to a [`SceneSink`] at the start of a range render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Composition id.
    pub composition: String,
    /// Output size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Frames that will be pushed.
    pub frames: u64,
}

/// Sink contract for consuming evaluated scenes in timeline order.
///
/// Ordering contract: `push_scene` is called in strictly increasing `FrameIndex` order within the
/// requested render range.
pub trait SceneSink {
    /// Called once before the first scene.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Called once per frame. `changed` is `false` when the scene matches the previous frame's.
    fn push_scene(
        &mut self,
        idx: FrameIndex,
        scene: &SceneGraph,
        fingerprint: SceneFingerprint,
        changed: bool,
    ) -> ReelResult<()>;
    /// Called once after the last scene.
    fn end(&mut self) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Scenes in timeline order.
    pub scenes: Vec<(FrameIndex, SceneGraph)>,
    /// Fingerprints, parallel to `scenes`.
    pub fingerprints: Vec<SceneFingerprint>,
    ended: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config received in `begin`.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl SceneSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.scenes.clear();
        self.fingerprints.clear();
        self.ended = false;
        Ok(())
    }

    fn push_scene(
        &mut self,
        idx: FrameIndex,
        scene: &SceneGraph,
        fingerprint: SceneFingerprint,
        _changed: bool,
    ) -> ReelResult<()> {
        self.scenes.push((idx, scene.clone()));
        self.fingerprints.push(fingerprint);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Keeps only fingerprints; enough to compare two runs over long ranges.
#[derive(Debug, Default)]
pub struct FingerprintSink {
    /// Fingerprints in timeline order.
    pub fingerprints: Vec<(FrameIndex, SceneFingerprint)>,
}

impl SceneSink for FingerprintSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.fingerprints.clear();
        self.fingerprints
            .reserve(usize::try_from(cfg.frames).unwrap_or(0));
        Ok(())
    }

    fn push_scene(
        &mut self,
        idx: FrameIndex,
        _scene: &SceneGraph,
        fingerprint: SceneFingerprint,
        _changed: bool,
    ) -> ReelResult<()> {
        self.fingerprints.push((idx, fingerprint));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Writes one JSON object per line: a header, then one scene per frame.
///
/// With `changes_only`, frames whose scene matches the previous frame are skipped; a reader
/// holds the last scene until the next line's frame.
pub struct JsonLinesSink<W: Write> {
    out: W,
    changes_only: bool,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Sink writing to `out`.
    pub fn new(out: W, changes_only: bool) -> Self {
        Self {
            out,
            changes_only,
            written: 0,
        }
    }

    /// Scene lines written so far, header excluded.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, v: &impl serde::Serialize) -> ReelResult<()> {
        serde_json::to_writer(&mut self.out, v)?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ReelError::Other(anyhow::anyhow!("write scene line: {e}")))
    }
}

#[derive(serde::Serialize)]
struct Header<'a> {
    composition: &'a str,
    canvas: Canvas,
    fps: Fps,
    frames: u64,
    changes_only: bool,
}

#[derive(serde::Serialize)]
struct SceneLine<'a> {
    fingerprint: String,
    scene: &'a SceneGraph,
}

impl<W: Write> SceneSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.written = 0;
        let header = Header {
            composition: &cfg.composition,
            canvas: cfg.canvas,
            fps: cfg.fps,
            frames: cfg.frames,
            changes_only: self.changes_only,
        };
        self.write_line(&header)
    }

    fn push_scene(
        &mut self,
        _idx: FrameIndex,
        scene: &SceneGraph,
        fingerprint: SceneFingerprint,
        changed: bool,
    ) -> ReelResult<()> {
        if self.changes_only && !changed {
            return Ok(());
        }
        self.write_line(&SceneLine {
            fingerprint: fingerprint.to_string(),
            scene,
        })?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.out
            .flush()
            .map_err(|e| ReelError::Other(anyhow::anyhow!("flush scene lines: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sink.rs"]
mod tests;
