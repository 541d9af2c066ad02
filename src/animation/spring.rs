use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Settling threshold used to measure the natural length of a spring.
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

// Upper bound for natural-duration scans, in seconds.
const MAX_SETTLE_SECS: f64 = 600.0;

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient (`>= 0`).
    pub damping: f64,
    /// Mass (`> 0`).
    pub mass: f64,
    /// Stiffness (`> 0`).
    pub stiffness: f64,
    /// Never move past the target.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Validate physical parameters.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ReelError::animation("spring mass must be > 0"));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(ReelError::animation("spring stiffness must be > 0"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ReelError::animation("spring damping must be >= 0"));
        }
        Ok(())
    }

    /// Normalized displacement `0 -> 1` after `t_secs`, starting at rest.
    ///
    /// May exceed 1 for under-damped springs unless overshoot clamping is on.
    pub fn progress_at(&self, t_secs: f64) -> f64 {
        if t_secs <= 0.0 {
            return 0.0;
        }
        let w0 = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping / (2.0 * (self.stiffness * self.mass).sqrt());

        // Remaining distance to the target, starting at 1 with zero velocity.
        let x = if (zeta - 1.0).abs() < 1e-9 {
            (-w0 * t_secs).exp() * (1.0 + w0 * t_secs)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            (-zeta * w0 * t_secs).exp()
                * ((wd * t_secs).cos() + (zeta * w0 / wd) * (wd * t_secs).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            (r2 * (r1 * t_secs).exp() - r1 * (r2 * t_secs).exp()) / (r2 - r1)
        };

        let p = 1.0 - x;
        if self.overshoot_clamping {
            p.clamp(0.0, 1.0)
        } else {
            p
        }
    }
}

/// Number of frames until the spring stays within `threshold` of its target for one second.
///
/// Springs that never settle (no damping) report the scan cap.
pub fn measure_spring(config: &SpringConfig, fps: Fps, threshold: f64) -> u64 {
    let fps_f = fps.as_f64();
    let cap = (MAX_SETTLE_SECS * fps_f).ceil() as u64;
    let window = fps_f.ceil().max(1.0) as u64;

    let mut settled_since: Option<u64> = None;
    for f in 0..=cap {
        let p = config.progress_at(fps.frames_to_secs(f as f64));
        if (1.0 - p).abs() < threshold {
            let start = *settled_since.get_or_insert(f);
            if f - start >= window {
                return start;
            }
        } else {
            settled_since = None;
        }
    }
    cap
}

/// A spring animation between two values, sampled by frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    /// Physical parameters.
    #[serde(default)]
    pub config: SpringConfig,
    /// Value at rest before the spring starts.
    #[serde(default)]
    pub from: f64,
    /// Target value.
    #[serde(default = "one")]
    pub to: f64,
    /// Frames to wait before starting.
    #[serde(default)]
    pub delay: f64,
    /// Stretch time so the spring settles at this many frames.
    #[serde(default)]
    pub duration_in_frames: Option<f64>,
    #[serde(skip)]
    natural: Option<NaturalDuration>,
}

/// Settle time of the unstretched spring for one config and fps.
#[derive(Clone, Copy, Debug, PartialEq)]
struct NaturalDuration {
    config: SpringConfig,
    fps: Fps,
    frames: f64,
}

impl NaturalDuration {
    fn measure(config: &SpringConfig, fps: Fps) -> Self {
        Self {
            config: *config,
            fps,
            frames: measure_spring(config, fps, DEFAULT_SETTLE_THRESHOLD) as f64,
        }
    }
}

fn one() -> f64 {
    1.0
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            duration_in_frames: None,
            natural: None,
        }
    }
}

impl Spring {
    /// Spring with validated `config`, animating `0 -> 1`.
    pub fn new(config: SpringConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Set start and target values.
    pub fn between(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Delay the start by `frames`.
    pub fn delay(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Stretch the natural duration to `frames` at `fps`.
    ///
    /// The natural duration is measured here once; sampling at another fps measures again.
    pub fn duration(mut self, frames: f64, fps: Fps) -> Self {
        self.duration_in_frames = Some(frames);
        self.natural = Some(NaturalDuration::measure(&self.config, fps));
        self
    }

    /// Natural settle time in frames at `fps`; cached by [`Spring::duration`].
    pub fn natural_frames(&self, fps: Fps) -> f64 {
        match self.natural {
            Some(n) if n.fps == fps && n.config == self.config => n.frames,
            _ => NaturalDuration::measure(&self.config, fps).frames,
        }
    }

    /// Validate the whole spring.
    pub fn validate(&self) -> ReelResult<()> {
        self.config.validate()?;
        if let Some(d) = self.duration_in_frames
            && !(d.is_finite() && d > 0.0)
        {
            return Err(ReelError::animation("spring duration_in_frames must be > 0"));
        }
        if !(self.from.is_finite() && self.to.is_finite() && self.delay.is_finite()) {
            return Err(ReelError::animation("spring values must be finite"));
        }
        Ok(())
    }

    /// Normalized progress at `frame`; `0` before the delay has elapsed.
    pub fn progress(&self, frame: f64, fps: Fps) -> f64 {
        let local = frame - self.delay;
        if local <= 0.0 {
            return 0.0;
        }
        let local = match self.duration_in_frames {
            Some(d) if d > 0.0 => local * self.natural_frames(fps) / d,
            _ => local,
        };
        self.config.progress_at(fps.frames_to_secs(local))
    }

    /// Value at `frame`.
    pub fn sample(&self, frame: f64, fps: Fps) -> f64 {
        self.from + (self.to - self.from) * self.progress(frame, fps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
