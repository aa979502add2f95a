//! Univariate B-spline basis over a local knot vector.
//!
//! A T-spline blending function is the product of two univariate basis
//! functions, each defined by the `degree + 2` knots collected around a
//! node. The recursion below is Cox–de Boor restricted to that one
//! function.

use super::TOLERANCE;

/// Highest polynomial degree supported by [`local_basis`].
pub const MAX_DEGREE: usize = 9;

const MAX_KNOTS: usize = MAX_DEGREE + 2;

/// Evaluates the single B-spline whose knot vector is `knots` at `u`.
///
/// The degree is `knots.len() - 2`. Spans are half-open `[kᵢ, kᵢ₊₁)`, except
/// the last non-empty span, which also contains its right end so that a
/// function clamped at the domain end evaluates to 1 there. Zero-length
/// spans contribute nothing (`0 / 0 = 0`).
#[must_use]
pub fn local_basis(knots: &[f64], u: f64) -> f64 {
    let count = knots.len();
    if !(2..=MAX_KNOTS).contains(&count) {
        return 0.0;
    }
    let first = knots[0];
    let last = knots[count - 1];
    if u < first || u > last {
        return 0.0;
    }

    let spans = count - 1;
    let closing = if u >= last {
        match knots.windows(2).rposition(|w| w[1] > w[0]) {
            Some(span) => Some(span),
            None => return 0.0,
        }
    } else {
        None
    };

    let mut n = [0.0_f64; MAX_KNOTS];
    for (i, value) in n.iter_mut().enumerate().take(spans) {
        let inside = knots[i] <= u && u < knots[i + 1];
        if inside || closing == Some(i) {
            *value = 1.0;
        }
    }

    for p in 1..spans {
        for i in 0..spans - p {
            let left = ratio(u - knots[i], knots[i + p] - knots[i]) * n[i];
            let right =
                ratio(knots[i + p + 1] - u, knots[i + p + 1] - knots[i + 1]) * n[i + 1];
            n[i] = left + right;
        }
    }
    n[0]
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() <= TOLERANCE {
        0.0
    } else {
        numerator / denominator
    }
}
