/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// CSS `ease-in`, i.e. `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`, i.e. `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Arbitrary CSS cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier {
        /// First control point x, clamped to `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, clamped to `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::EaseIn => cubic_bezier(t, 0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => cubic_bezier(t, 0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => cubic_bezier(t, 0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                cubic_bezier(t, x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2)
            }
        }
    }
}

fn cubic_bezier(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    fn curve(a1: f64, a2: f64, u: f64) -> f64 {
        let omu = 1.0 - u;
        3.0 * omu * omu * u * a1 + 3.0 * omu * u * u * a2 + u * u * u
    }
    fn curve_derivative(a1: f64, a2: f64, u: f64) -> f64 {
        let omu = 1.0 - u;
        3.0 * omu * omu * a1 + 6.0 * omu * u * (a2 - a1) + 3.0 * u * u * (1.0 - a2)
    }

    // Newton-Raphson on bx(u) = x, fixed iteration count.
    let mut u = x;
    for _ in 0..8 {
        let err = curve(x1, x2, u) - x;
        let d = curve_derivative(x1, x2, u);
        if d.abs() < 1e-7 {
            break;
        }
        u = (u - err / d).clamp(0.0, 1.0);
    }

    // Bisection refine; bx is monotonic for x1, x2 in [0, 1].
    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..16 {
        let bx = curve(x1, x2, u);
        if (bx - x).abs() < 1e-9 {
            break;
        }
        if bx < x {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }

    curve(y1, y2, u)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
