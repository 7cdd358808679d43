use kurbo::Point;

use crate::error::{KakijunError, KakijunResult};

/// CSS-style cubic Bezier timing curve with endpoints pinned to
/// (0,0) and (1,1). Maps normalized elapsed time x to eased progress y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub pt1: Point,
    pub ct1: Point,
    pub ct2: Point,
    pub pt2: Point,
}

// Thresholds below which the cubic collapses to a quadratic/linear solve.
const COEF_EPS: f64 = 1e-9;
const NORM_EPS: f64 = 1e-10;
// Roots slightly left of zero are still accepted (floating-point slop at x=0).
const ROOT_MIN: f64 = -1e-9;

fn sqrt_or_zero(x: f64) -> f64 {
    if x > 0.0 { x.sqrt() } else { 0.0 }
}

fn sq(x: f64) -> f64 {
    x * x
}

fn cb(x: f64) -> f64 {
    x * x * x
}

impl CubicBezier {
    pub fn unit(ct1: Point, ct2: Point) -> Self {
        Self {
            pt1: Point::new(0.0, 0.0),
            ct1,
            ct2,
            pt2: Point::new(1.0, 1.0),
        }
    }

    /// Invert the curve's x polynomial at the given x, returning the curve
    /// parameter t.
    ///
    /// The cubic degenerates when control x-coordinates are collinear, so the
    /// solve cascades cubic -> quadratic -> linear on near-zero leading
    /// coefficients rather than dividing through by them. In the
    /// three-real-roots regime the smallest root >= -1e-9 wins; when no
    /// candidate qualifies the inflection shift is the defined fallback.
    fn solve_t(&self, x: f64) -> f64 {
        let a = self.pt1.x - 3.0 * self.ct1.x + 3.0 * self.ct2.x - self.pt2.x;
        let b = 3.0 * self.ct1.x - 6.0 * self.ct2.x + 3.0 * self.pt2.x;
        let c = 3.0 * self.ct2.x - 3.0 * self.pt2.x;
        let d = self.pt2.x - x;

        if a.abs() < COEF_EPS {
            if b.abs() < COEF_EPS {
                return -d / c;
            }

            let qb = c / b;
            let qc = d / b;
            let tmp = sqrt_or_zero(sq(qb) - 4.0 * qc);
            // Pick the root sign that avoids cancellation.
            let signed = if qb > 0.0 || qc < 0.0 { tmp } else { -tmp };
            return (-qb + signed) / 2.0;
        }

        let p = -sq(b) / (3.0 * sq(a)) + c / a;
        let q = 2.0 * cb(b / (3.0 * a)) - b * c / (3.0 * sq(a)) + d / a;
        let addcoef = -b / (3.0 * a);

        let lambda = sq(q) / 4.0 + cb(p) / 27.0;
        if lambda >= 0.0 {
            // One real root. The sqrt term takes the sign opposite to q for
            // numerical stability.
            let sqlambda = sqrt_or_zero(lambda);
            let tmp = f64::cbrt(-q / 2.0 + if q < 0.0 { sqlambda } else { -sqlambda });
            if tmp == 0.0 {
                // p and q both vanished: triple root at the inflection shift.
                return addcoef;
            }
            return tmp - p / (3.0 * tmp) + addcoef;
        }

        // Three real roots, trigonometric method.
        let norm = sqrt_or_zero(sq(q) / 4.0 - lambda);
        if norm < NORM_EPS {
            return addcoef;
        }

        let angle = (-q / (2.0 * norm)).acos() / 3.0;
        let fact = 2.0 * f64::cbrt(norm);
        let mut t = f64::INFINITY;
        for i in -1..2 {
            let tmp = fact * (angle + f64::from(i) * std::f64::consts::PI * 2.0 / 3.0).cos()
                + addcoef;
            if tmp >= ROOT_MIN && tmp < t {
                t = tmp;
            }
        }

        if t.is_finite() { t } else { addcoef }
    }

    /// Eased progress at normalized time x.
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = self.solve_t(x);
        cb(t) * self.pt1.y
            + 3.0 * sq(t) * (1.0 - t) * self.ct1.y
            + 3.0 * t * sq(1.0 - t) * self.ct2.y
            + cb(1.0 - t) * self.pt2.y
    }
}

/// The named timing-function presets.
///
/// Control points match the CSS timing-function definitions; `Linear`
/// bypasses the solver entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timing {
    Linear,
    Ease,
    EaseIn,
    EaseInOut,
    EaseOut,
}

impl Default for Timing {
    fn default() -> Self {
        Self::EaseInOut
    }
}

impl Timing {
    pub fn parse(name: &str) -> KakijunResult<Self> {
        match name {
            "linear" => Ok(Self::Linear),
            "ease" => Ok(Self::Ease),
            "ease-in" => Ok(Self::EaseIn),
            "ease-in-out" => Ok(Self::EaseInOut),
            "ease-out" => Ok(Self::EaseOut),
            other => Err(KakijunError::config(format!(
                "unknown timing function '{other}' (expected one of linear, ease, ease-in, ease-in-out, ease-out)"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseInOut => "ease-in-out",
            Self::EaseOut => "ease-out",
        }
    }

    fn curve(self) -> Option<CubicBezier> {
        match self {
            Self::Linear => None,
            Self::Ease => Some(CubicBezier::unit(
                Point::new(0.25, 0.1),
                Point::new(0.25, 1.0),
            )),
            Self::EaseIn => Some(CubicBezier::unit(
                Point::new(0.42, 0.0),
                Point::new(1.0, 1.0),
            )),
            Self::EaseInOut => Some(CubicBezier::unit(
                Point::new(0.42, 0.0),
                Point::new(0.58, 1.0),
            )),
            Self::EaseOut => Some(CubicBezier::unit(
                Point::new(0.0, 0.0),
                Point::new(0.58, 1.0),
            )),
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self.curve() {
            None => x,
            Some(curve) => curve.evaluate(x),
        }
    }
}
