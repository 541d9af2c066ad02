//! Piecewise-linear mapping from a frame (or any scalar input) to a value.
//!
//! Sampling is a pure function of `(input, breakpoints, values, opts)`. There are no counters or
//! caches, so any frame can be sampled in any order, any number of times.

use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};

/// Behaviour outside the breakpoint range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the boundary value.
    #[default]
    Clamp,
    /// Continue the slope of the boundary segment.
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`Interpolator::sample_with`] and [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    /// Handling of inputs below the first breakpoint.
    #[serde(default)]
    pub left: Extrapolate,
    /// Handling of inputs above the last breakpoint.
    #[serde(default)]
    pub right: Extrapolate,
    /// Easing applied to progress within each segment.
    #[serde(default)]
    pub ease: Ease,
}

impl InterpolateOpts {
    /// Clamp on both sides, linear segments.
    pub fn clamped() -> Self {
        Self::default()
    }

    /// Same options with a different easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Borrowed breakpoint/value table.
///
/// Construction checks structure only: equal lengths, at least one entry, finite numbers.
/// Breakpoint ordering is not enforced; non-monotonic tables sample deterministically but the
/// result is unspecified. Use [`Interpolator::is_monotonic`] to detect them.
#[derive(Clone, Copy, Debug)]
pub struct Interpolator<'a> {
    breakpoints: &'a [f64],
    values: &'a [f64],
}

impl<'a> Interpolator<'a> {
    /// Validate and wrap a breakpoint/value table.
    pub fn new(breakpoints: &'a [f64], values: &'a [f64]) -> ReelResult<Self> {
        if breakpoints.is_empty() {
            return Err(ReelError::animation(
                "interpolation needs at least one breakpoint",
            ));
        }
        if breakpoints.len() != values.len() {
            return Err(ReelError::animation(format!(
                "breakpoints ({}) and values ({}) must have the same length",
                breakpoints.len(),
                values.len()
            )));
        }
        if !breakpoints.iter().chain(values).all(|v| v.is_finite()) {
            return Err(ReelError::animation(
                "breakpoints and values must be finite",
            ));
        }
        Ok(Self {
            breakpoints,
            values,
        })
    }

    /// `true` when breakpoints are non-decreasing.
    pub fn is_monotonic(&self) -> bool {
        self.breakpoints.windows(2).all(|w| w[0] <= w[1])
    }

    /// Sample with clamping on both sides and linear segments.
    pub fn sample(&self, input: f64) -> f64 {
        self.sample_with(input, InterpolateOpts::clamped())
    }

    /// Sample with explicit extrapolation and easing.
    pub fn sample_with(&self, input: f64, opts: InterpolateOpts) -> f64 {
        let b = self.breakpoints;
        let v = self.values;
        let n = b.len();
        if n == 1 || input.is_nan() {
            return v[0];
        }

        if input < b[0] {
            return match opts.left {
                Extrapolate::Clamp => v[0],
                Extrapolate::Identity => input,
                Extrapolate::Extend => extend(b[0], b[1], v[0], v[1], input),
            };
        }
        if input > b[n - 1] {
            return match opts.right {
                Extrapolate::Clamp => v[n - 1],
                Extrapolate::Identity => input,
                Extrapolate::Extend => extend(b[n - 2], b[n - 1], v[n - 2], v[n - 1], input),
            };
        }

        // First breakpoint strictly after `input`; equal breakpoints resolve to the later value,
        // which makes zero-length segments a right-continuous step.
        let idx = b.partition_point(|&x| x <= input);
        if idx == 0 {
            return v[0];
        }
        if idx >= n {
            return v[n - 1];
        }

        let (b0, b1) = (b[idx - 1], b[idx]);
        let (v0, v1) = (v[idx - 1], v[idx]);
        let span = b1 - b0;
        if span <= 0.0 {
            return v0;
        }
        let t = opts.ease.apply((input - b0) / span);
        v0 + (v1 - v0) * t
    }
}

fn extend(b0: f64, b1: f64, v0: f64, v1: f64, input: f64) -> f64 {
    let span = b1 - b0;
    if span <= 0.0 {
        return if input < b0 { v0 } else { v1 };
    }
    v0 + (v1 - v0) * ((input - b0) / span)
}

/// One-shot interpolation of `input` over `breakpoints -> values`.
pub fn interpolate(
    input: f64,
    breakpoints: &[f64],
    values: &[f64],
    opts: InterpolateOpts,
) -> ReelResult<f64> {
    Ok(Interpolator::new(breakpoints, values)?.sample_with(input, opts))
}

/// Clamped fade from 0 to 1 over `[start, end]`, the most common opacity ramp.
///
/// Degenerate windows (`end <= start`) step to 1 at `start`.
pub fn fade_in(input: f64, start: f64, end: f64) -> f64 {
    ramp(input, start, end, 0.0, 1.0)
}

/// Clamped linear ramp `from -> to` over `[start, end]`. Total for any finite window.
pub fn ramp(input: f64, start: f64, end: f64, from: f64, to: f64) -> f64 {
    if input < start {
        return from;
    }
    if input >= end {
        return to;
    }
    from + (to - from) * ((input - start) / (end - start))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
