use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Reveals whole lines of terminal output at a fixed pace.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineReveal {
    /// Frame (in the caller's clock) at which output starts.
    pub start_frame: i64,
    /// Frames between consecutive lines (`> 0`).
    pub frames_per_line: u64,
}

/// Visible lines at one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealedLines<'a, T> {
    /// Lines currently shown.
    pub visible: &'a [T],
    /// Idle prompt shown after the last line has appeared.
    pub prompt_cursor: bool,
}

impl LineReveal {
    /// Reveal one line every `frames_per_line` frames.
    pub fn new(start_frame: i64, frames_per_line: u64) -> ReelResult<Self> {
        if frames_per_line == 0 {
            return Err(ReelError::animation("frames_per_line must be > 0"));
        }
        Ok(Self {
            start_frame,
            frames_per_line,
        })
    }

    /// One line per second at `fps`.
    pub fn one_per_second(start_frame: i64, fps: Fps) -> Self {
        Self {
            start_frame,
            frames_per_line: fps.secs_to_frames_round(1.0).max(1),
        }
    }

    /// Number of lines (out of `total`) visible at `frame`.
    pub fn count_at(&self, total: usize, frame: i64) -> usize {
        let elapsed = frame.saturating_sub(self.start_frame).max(0) as u64;
        let n = elapsed / self.frames_per_line.max(1);
        usize::try_from(n).unwrap_or(usize::MAX).min(total)
    }

    /// Visible prefix of `lines` at `frame`.
    pub fn reveal<'a, T>(&self, lines: &'a [T], frame: i64) -> RevealedLines<'a, T> {
        let n = self.count_at(lines.len(), frame);
        RevealedLines {
            visible: &lines[..n],
            prompt_cursor: n > 0 && n == lines.len(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lines.rs"]
mod tests;
