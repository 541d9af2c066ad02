use crate::animation::interpolate::Interpolator;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// How fast a [`TypewriterReveal`] uncovers its text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealRate {
    /// Constant typing speed; total length scales with the text.
    CharsPerSecond(f64),
    /// Fixed reveal window regardless of text length. `0` shows everything at once.
    OverFrames(f64),
}

/// Progressive character reveal of a fixed string, keyed by elapsed frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypewriterReveal {
    /// Frame (in the caller's clock) at which typing starts.
    pub start_frame: i64,
    /// Reveal speed.
    pub rate: RevealRate,
}

/// Result of a reveal at one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Revealed<'a> {
    /// Revealed prefix of the text.
    pub visible: &'a str,
    /// Number of characters in `visible`.
    pub chars_shown: usize,
    /// Number of characters in the full text.
    pub total_chars: usize,
    /// Typing cursor is shown while the text is incomplete.
    pub cursor: bool,
}

impl Revealed<'_> {
    /// `true` once every character is visible.
    pub fn is_complete(&self) -> bool {
        self.chars_shown == self.total_chars
    }
}

impl TypewriterReveal {
    /// Reveal at a constant `chars_per_second`.
    pub fn chars_per_second(start_frame: i64, chars_per_second: f64) -> ReelResult<Self> {
        if !(chars_per_second.is_finite() && chars_per_second > 0.0) {
            return Err(ReelError::animation(
                "typewriter chars_per_second must be finite and > 0",
            ));
        }
        Ok(Self {
            start_frame,
            rate: RevealRate::CharsPerSecond(chars_per_second),
        })
    }

    /// Reveal the whole text over `frames` frames.
    pub fn over_frames(start_frame: i64, frames: f64) -> ReelResult<Self> {
        if !(frames.is_finite() && frames >= 0.0) {
            return Err(ReelError::animation(
                "typewriter duration must be finite and >= 0",
            ));
        }
        Ok(Self {
            start_frame,
            rate: RevealRate::OverFrames(frames),
        })
    }

    /// Frames needed to reveal `total_chars` characters at `fps`.
    pub fn duration_frames(&self, total_chars: usize, fps: Fps) -> f64 {
        match self.rate {
            RevealRate::CharsPerSecond(cps) => total_chars as f64 / cps * fps.as_f64(),
            RevealRate::OverFrames(frames) => frames,
        }
    }

    /// Number of characters visible at `frame`, out of `total_chars`.
    pub fn chars_at(&self, total_chars: usize, frame: i64, fps: Fps) -> usize {
        if total_chars == 0 || frame < self.start_frame {
            return 0;
        }
        let elapsed = frame.saturating_sub(self.start_frame) as f64;
        let duration = self.duration_frames(total_chars, fps);
        let breakpoints = [0.0, duration];
        let values = [0.0, total_chars as f64];
        let shown = match Interpolator::new(&breakpoints, &values) {
            Ok(i) => i.sample(elapsed),
            // Only reachable with a hand-built non-finite rate.
            Err(_) => 0.0,
        };
        (shown.floor().max(0.0) as usize).min(total_chars)
    }

    /// Reveal `text` at `frame`.
    pub fn reveal<'a>(&self, text: &'a str, frame: i64, fps: Fps) -> Revealed<'a> {
        let total_chars = text.chars().count();
        let chars_shown = self.chars_at(total_chars, frame, fps);
        Revealed {
            visible: char_prefix(text, chars_shown),
            chars_shown,
            total_chars,
            cursor: chars_shown < total_chars,
        }
    }
}

/// The first `n` characters of `s`, never splitting a code point.
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/typewriter.rs"]
mod tests;
