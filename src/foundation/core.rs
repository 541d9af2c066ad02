use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::Vec2;

/// Absolute 0-based frame index in composition timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Signed view of the frame, used when rebasing into sequence-local time.
    pub fn as_i64(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Intersect with `[0, total)`, used to trim CLI-supplied ranges to a composition.
    pub fn clip_to(self, total: u64) -> Self {
        let end = self.end.0.min(total);
        let start = self.start.0.min(end);
        Self {
            start: FrameIndex(start),
            end: FrameIndex(end),
        }
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number frame rate, the common case for tutorial videos.
    pub const fn whole(num: u32) -> Self {
        Self { num, den: 1 }
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames * f64::from(self.den) / f64::from(self.num)
    }

    /// Seconds to fractional frames, no rounding.
    pub fn secs_to_frames(self, secs: f64) -> f64 {
        secs * self.as_f64()
    }

    /// Seconds to whole frames, rounded to nearest. Negative input yields 0.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        self.secs_to_frames(secs).round().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Landscape 1080p.
    pub const HD_LANDSCAPE: Self = Self {
        width: 1920,
        height: 1080,
    };
    /// Portrait 1080p, for shorts.
    pub const HD_PORTRAIT: Self = Self {
        width: 1080,
        height: 1920,
    };
}

/// Straight-alpha RGBA8 color carried by scene nodes.
///
/// Parses `#RRGGBB`, `#RRGGBBAA` and CSS `rgba(r, g, b, a)` strings, and serializes back as
/// `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Parse a color literal.
    pub fn parse(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(body) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return parse_css_rgba(body);
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return parse_css_rgba(body);
        }
        Err(ReelError::validation(format!(
            "unsupported color literal \"{s}\""
        )))
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

fn parse_hex(s: &str) -> ReelResult<Color> {
    fn hex_byte(pair: &str) -> ReelResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ReelError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(ReelError::validation("hex color must be ASCII"));
    }
    match s.len() {
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(ReelError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

fn parse_css_rgba(body: &str) -> ReelResult<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ReelError::validation(
            "rgba() needs 3 or 4 comma separated components",
        ));
    }
    let channel = |p: &str| -> ReelResult<u8> {
        let v: f64 = p
            .parse()
            .map_err(|_| ReelError::validation(format!("invalid color channel \"{p}\"")))?;
        Ok(v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match parts.get(3) {
        Some(p) => {
            let v: f64 = p
                .parse()
                .map_err(|_| ReelError::validation(format!("invalid alpha \"{p}\"")))?;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Ok(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
