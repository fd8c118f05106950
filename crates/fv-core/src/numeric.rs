use crate::FvError;

/// Floating point type used throughout the layout and render pipeline.
pub type Real = f64;

/// Absolute/relative tolerance pair.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FvError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FvError::NonFinite { what, value: v })
    }
}

/// Format a number the way it is shown in labels: integers without a
/// trailing `.0`, everything else with the shortest round-trip form.
pub fn format_number(v: Real) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Format a coordinate for drawing output, rounded to hundredths.
pub fn format_coord(v: Real) -> String {
    format_number((v * 100.0).round() / 100.0)
}
