//! Linear interpolators evaluated along a variant family's progression.
use serde::{Deserialize, Serialize};

use crate::numbers::{round_f64_to_i64, round_half_even_f64_to_i64};
use crate::value::Value;

/// Tie-breaking rule for rounded interpolation at exact `.5` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round to the nearest integer, ties away from zero
    #[default]
    Nearest,
    /// Round to the nearest integer, ties to the even neighbour
    HalfEven,
}

impl Rounding {
    #[must_use]
    pub fn apply(self, value: f64) -> i64 {
        match self {
            Self::Nearest => round_f64_to_i64(value),
            Self::HalfEven => round_half_even_f64_to_i64(value),
        }
    }
}

/// `a + x * (b - a)`
#[must_use]
pub fn lerp(start: f64, end: f64, position: f64) -> f64 {
    start + position * (end - start)
}

/// A pure function of progression position built from two endpoints.
///
/// Serialized as `{"lerp": [start, end]}` or `{"lerpr": [start, end]}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interpolator {
    /// Continuous interpolation producing a real value
    #[serde(rename = "lerp")]
    Linear(f64, f64),
    /// Interpolation rounded to a whole value
    #[serde(rename = "lerpr")]
    Rounded(f64, f64),
}

impl Interpolator {
    #[must_use]
    pub const fn linear(start: f64, end: f64) -> Self {
        Self::Linear(start, end)
    }

    #[must_use]
    pub const fn rounded(start: f64, end: f64) -> Self {
        Self::Rounded(start, end)
    }

    /// Evaluate at `position`, using `rounding` for the rounded flavor.
    #[must_use]
    pub fn eval(&self, position: f64, rounding: Rounding) -> Value {
        match *self {
            Self::Linear(start, end) => Value::Real(lerp(start, end, position)),
            Self::Rounded(start, end) => Value::Int(rounding.apply(lerp(start, end, position))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(value: &Value) -> f64 {
        match value {
            Value::Real(v) => *v,
            other => panic!("expected real, got {other:?}"),
        }
    }

    #[test]
    fn linear_hits_both_endpoints() {
        for (a, b) in [(8.0, 17.0), (750.0, 900.0), (5.0, 5.0), (3000.0, -12.5)] {
            let f = Interpolator::linear(a, b);
            assert!((real(&f.eval(0.0, Rounding::Nearest)) - a).abs() < 1e-9);
            assert!((real(&f.eval(1.0, Rounding::Nearest)) - b).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_midpoints_follow_the_line() {
        let f = Interpolator::linear(8.0, 17.0);
        assert!((real(&f.eval(0.5, Rounding::Nearest)) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn rounded_hits_rounded_endpoints() {
        let g = Interpolator::rounded(0.0, 20_000.0);
        assert_eq!(g.eval(0.0, Rounding::Nearest), Value::Int(0));
        assert_eq!(g.eval(1.0, Rounding::Nearest), Value::Int(20_000));

        let g = Interpolator::rounded(2.6, 7.4);
        assert_eq!(g.eval(0.0, Rounding::HalfEven), Value::Int(3));
        assert_eq!(g.eval(1.0, Rounding::HalfEven), Value::Int(7));
    }

    #[test]
    fn rounded_ties_depend_on_rule() {
        let g = Interpolator::rounded(0.0, 5.0);
        assert_eq!(g.eval(0.5, Rounding::Nearest), Value::Int(3));
        assert_eq!(g.eval(0.5, Rounding::HalfEven), Value::Int(2));

        let absorb = Interpolator::rounded(59.0, 80.0);
        assert_eq!(absorb.eval(0.5, Rounding::Nearest), Value::Int(70));
        assert_eq!(absorb.eval(0.5, Rounding::HalfEven), Value::Int(70));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let f = Interpolator::linear(1700.0, 2400.0);
        let x = 1.0 / 3.0;
        assert_eq!(f.eval(x, Rounding::Nearest), f.eval(x, Rounding::Nearest));
    }

    #[test]
    fn serde_uses_short_tags() {
        let parsed: Interpolator = serde_json::from_str(r#"{"lerpr": [0, 20e3]}"#).unwrap();
        assert_eq!(parsed, Interpolator::rounded(0.0, 20_000.0));
        let json = serde_json::to_string(&Interpolator::linear(8.0, 17.0)).unwrap();
        assert_eq!(json, r#"{"lerp":[8.0,17.0]}"#);
    }
}
