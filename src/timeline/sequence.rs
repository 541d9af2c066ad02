use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Declarative visibility window `[from, from + duration)` in the parent's clock.
///
/// A subtree gated by a sequence is mounted only inside the window, and sees a local clock that
/// starts at zero on `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    /// First frame of the window, in the parent's clock. May be negative.
    pub from: i64,
    /// Window length in frames; `None` is open ended.
    pub duration: Option<u64>,
}

impl Sequence {
    /// Window of `duration` frames starting at `from`.
    pub const fn new(from: i64, duration: u64) -> Self {
        Self {
            from,
            duration: Some(duration),
        }
    }

    /// Open-ended window starting at `from`.
    pub const fn open(from: i64) -> Self {
        Self {
            from,
            duration: None,
        }
    }

    /// Window from signed inputs; negative durations are rejected.
    pub fn from_signed(from: i64, duration: i64) -> ReelResult<Self> {
        let duration = u64::try_from(duration).map_err(|_| {
            ReelError::validation(format!(
                "sequence at frame {from} has negative duration {duration}"
            ))
        })?;
        Ok(Self::new(from, duration))
    }

    /// Exclusive end frame, or `None` when open ended.
    pub fn end(self) -> Option<i64> {
        self.duration
            .map(|d| self.from.saturating_add(i64::try_from(d).unwrap_or(i64::MAX)))
    }

    /// `true` when `frame` (parent clock) is inside the window.
    pub fn contains(self, frame: i64) -> bool {
        frame >= self.from && self.end().is_none_or(|end| frame < end)
    }

    /// Local frame for `frame` (parent clock), or `None` when the window is not mounted.
    pub fn local_frame(self, frame: i64) -> Option<i64> {
        self.contains(frame).then(|| frame - self.from)
    }
}

/// Rebased clock of a subtree: its local frame, window length and the composition fps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeCtx {
    /// Local frame; `0` on the first frame of the enclosing window.
    pub frame: i64,
    /// Length of the enclosing window, capped by every ancestor. `None` is open ended.
    pub duration: Option<u64>,
    /// Composition frame rate.
    pub fps: Fps,
}

impl TimeCtx {
    /// Clock of a composition root.
    pub fn root(frame: FrameIndex, duration_in_frames: u64, fps: Fps) -> Self {
        Self {
            frame: frame.as_i64(),
            duration: Some(duration_in_frames),
            fps,
        }
    }

    /// Enter a nested sequence. Returns `None` when it is not mounted at this frame.
    ///
    /// The child's window is cut to what remains of this window after `seq.from`.
    pub fn enter(self, seq: Sequence) -> Option<Self> {
        let remaining = match self.duration {
            Some(d) => {
                let left = i64::try_from(d).unwrap_or(i64::MAX).saturating_sub(seq.from);
                Some(u64::try_from(left).unwrap_or(0))
            }
            None => None,
        };
        let duration = match (seq.duration, remaining) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let gated = Sequence {
            from: seq.from,
            duration,
        };
        let frame = gated.local_frame(self.frame)?;
        Some(Self {
            frame,
            duration,
            fps: self.fps,
        })
    }

    /// Local frame as `f64`, for interpolation.
    pub fn frame_f64(self) -> f64 {
        self.frame as f64
    }

    /// Local time in seconds.
    pub fn secs(self) -> f64 {
        self.fps.frames_to_secs(self.frame_f64())
    }

    /// Whole frames for `secs` at this clock's fps.
    pub fn frames(self, secs: f64) -> u64 {
        self.fps.secs_to_frames_round(secs)
    }

    /// Progress through the window in `[0, 1]`; `0` for open-ended or empty windows.
    pub fn progress(self) -> f64 {
        match self.duration {
            Some(d) if d > 0 => (self.frame_f64() / d as f64).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequence.rs"]
mod tests;
