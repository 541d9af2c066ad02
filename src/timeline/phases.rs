use smallvec::SmallVec;

use crate::foundation::core::Fps;
use crate::timeline::sequence::Sequence;

/// A named stretch of the timeline, in absolute frames.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    /// Display / lookup name.
    pub name: String,
    /// First frame.
    pub start: u64,
    /// Length in frames.
    pub duration: u64,
}

impl Phase {
    /// Exclusive end frame.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }

    /// Window covering this phase.
    pub fn sequence(&self) -> Sequence {
        Sequence::new(i64::try_from(self.start).unwrap_or(i64::MAX), self.duration)
    }

    /// Window covering this phase and the `extra` frames after it.
    pub fn sequence_through(&self, extra: u64) -> Sequence {
        Sequence::new(
            i64::try_from(self.start).unwrap_or(i64::MAX),
            self.duration.saturating_add(extra),
        )
    }

    /// `true` when `frame` falls inside the phase.
    pub fn contains(&self, frame: i64) -> bool {
        self.sequence().contains(frame)
    }
}

/// Ordered phases laid back to back.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhasePlan {
    phases: Vec<Phase>,
}

impl PhasePlan {
    /// Lay `(name, seconds)` pairs back to back from frame 0.
    pub fn back_to_back<'a>(fps: Fps, durations: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut cursor = 0u64;
        let phases = durations
            .into_iter()
            .map(|(name, secs)| {
                let duration = fps.secs_to_frames_round(secs);
                let phase = Phase {
                    name: name.to_owned(),
                    start: cursor,
                    duration,
                };
                cursor = cursor.saturating_add(duration);
                phase
            })
            .collect();
        Self { phases }
    }

    /// All phases in order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Phase by position.
    pub fn phase(&self, idx: usize) -> Option<&Phase> {
        self.phases.get(idx)
    }

    /// Phase by name.
    pub fn get(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Total frames covered by the plan.
    pub fn total_frames(&self) -> u64 {
        self.phases.iter().map(Phase::end).max().unwrap_or(0)
    }

    /// First phase containing `frame`.
    pub fn active(&self, frame: i64) -> Option<(usize, &Phase)> {
        self.phases.iter().enumerate().find(|(_, p)| p.contains(frame))
    }

    /// Progress dots: one flag per phase, lit while `frame` is inside it.
    pub fn indicator(&self, frame: i64) -> SmallVec<[bool; 8]> {
        self.phases.iter().map(|p| p.contains(frame)).collect()
    }
}

/// Running clock in seconds used to lay out scripted sections one after another.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeCursor {
    secs: f64,
}

impl TimeCursor {
    /// Cursor at `0s`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in seconds.
    pub fn now(&self) -> f64 {
        self.secs
    }

    /// Reserve `secs` and return where the reservation starts.
    pub fn take(&mut self, secs: f64) -> f64 {
        let start = self.secs;
        self.secs += secs.max(0.0);
        start
    }

    /// Leave a gap of `secs`.
    pub fn skip(&mut self, secs: f64) {
        self.secs += secs.max(0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phases.rs"]
mod tests;
