use super::{Parameter, TOLERANCE};

/// Orientation of a closed loop in the `(s, t)` plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

/// Computes the signed area of a parametric polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Parameter]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Winding of a polygon, or `None` when it encloses no area.
#[must_use]
pub fn winding(points: &[Parameter]) -> Option<Winding> {
    let area = signed_area_2d(points);
    if area > TOLERANCE {
        Some(Winding::CounterClockwise)
    } else if area < -TOLERANCE {
        Some(Winding::Clockwise)
    } else {
        None
    }
}
