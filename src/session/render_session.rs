use rayon::prelude::*;

use crate::compositions::Composition;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::model::SceneGraph;
use crate::session::fingerprint::{SceneFingerprint, fingerprint_scene};
use crate::session::sink::{SceneSink, SinkConfig};

/// Options controlling `RenderSession` range rendering behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Evaluate frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames evaluated per batch before they are handed to the sink.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames whose scene differs from the previous frame's. The first frame always counts.
    pub frames_changed: u64,
}

/// Evaluates frames of one composition, singly or as an ordered range.
pub struct RenderSession {
    comp: Box<dyn Composition>,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Session over `comp`.
    pub fn new(comp: Box<dyn Composition>, opts: RenderSessionOpts) -> ReelResult<Self> {
        if comp.meta().duration_in_frames == 0 {
            return Err(ReelError::validation(format!(
                "composition '{}' has no frames",
                comp.meta().id
            )));
        }
        Ok(Self { comp, opts })
    }

    /// The composition being rendered.
    pub fn composition(&self) -> &dyn Composition {
        self.comp.as_ref()
    }

    /// Options in use.
    pub fn opts(&self) -> &RenderSessionOpts {
        &self.opts
    }

    /// All frames of the composition.
    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.comp.meta().duration_in_frames),
        }
    }

    /// Evaluate a single frame.
    #[tracing::instrument(skip(self), fields(comp = self.comp.meta().id))]
    pub fn render_frame(&self, frame: FrameIndex) -> ReelResult<SceneGraph> {
        self.comp.render(frame)
    }

    /// Evaluate a frame range and stream scenes into a sink.
    ///
    /// The sink receives scenes in strictly increasing frame index order. When `parallel` is
    /// enabled, each chunk is evaluated on the pool and delivered in order once complete, so
    /// the sink sees exactly what a sequential run produces.
    #[tracing::instrument(skip(self, sink), fields(comp = self.comp.meta().id))]
    pub fn render_range(
        &self,
        range: FrameRange,
        sink: &mut dyn SceneSink,
    ) -> ReelResult<RenderStats> {
        let meta = self.comp.meta();
        if range.is_empty() {
            return Err(ReelError::validation("render_range range must be non-empty"));
        }
        if range.end.0 > meta.duration_in_frames {
            return Err(ReelError::validation(
                "render_range range must be within composition duration",
            ));
        }

        let chunk_size = normalized_chunk_size(self.opts.chunk_size).min(range.len_frames());
        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };

        sink.begin(SinkConfig {
            composition: meta.id.to_owned(),
            canvas: meta.canvas,
            fps: meta.fps,
            frames: range.len_frames(),
        })?;

        let mut stats = RenderStats::default();
        let mut prev: Option<SceneFingerprint> = None;
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let evaluated = match pool.as_ref() {
                Some(pool) => self.eval_chunk_parallel(pool, chunk_start, chunk_end)?,
                None => (chunk_start..chunk_end)
                    .map(|f| self.eval_one(f))
                    .collect::<ReelResult<Vec<_>>>()?,
            };
            tracing::debug!(start = chunk_start, end = chunk_end, "evaluated chunk");

            for (f, (scene, fp)) in (chunk_start..chunk_end).zip(evaluated) {
                let changed = prev != Some(fp);
                if changed {
                    stats.frames_changed += 1;
                }
                sink.push_scene(FrameIndex(f), &scene, fp, changed)?;
                prev = Some(fp);
            }
            stats.frames_total += chunk_end - chunk_start;
            chunk_start = chunk_end;
        }

        sink.end()?;
        tracing::info!(
            frames = stats.frames_total,
            changed = stats.frames_changed,
            parallel = self.opts.parallel,
            "rendered range"
        );
        Ok(stats)
    }

    fn eval_one(&self, f: u64) -> ReelResult<(SceneGraph, SceneFingerprint)> {
        let scene = self.comp.render(FrameIndex(f))?;
        let fp = fingerprint_scene(&scene);
        Ok((scene, fp))
    }

    fn eval_chunk_parallel(
        &self,
        pool: &rayon::ThreadPool,
        start: u64,
        end: u64,
    ) -> ReelResult<Vec<(SceneGraph, SceneFingerprint)>> {
        pool.install(|| {
            (start..end)
                .into_par_iter()
                .map(|f| self.eval_one(f))
                .collect::<ReelResult<Vec<_>>>()
        })
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
