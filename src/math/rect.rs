use super::{Parameter, PARAMETER_TOLERANCE};

/// An axis-aligned rectangle in the `(s, t)` domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRect {
    pub s_min: f64,
    pub s_max: f64,
    pub t_min: f64,
    pub t_max: f64,
}

impl ParameterRect {
    /// Creates a rectangle from its bounds.
    #[must_use]
    pub fn new(s_min: f64, s_max: f64, t_min: f64, t_max: f64) -> Self {
        Self {
            s_min,
            s_max,
            t_min,
            t_max,
        }
    }

    /// Smallest rectangle containing every parameter, or `None` if empty.
    #[must_use]
    pub fn enclosing(parameters: impl IntoIterator<Item = Parameter>) -> Option<Self> {
        let mut iter = parameters.into_iter();
        let first = iter.next()?;
        let mut rect = Self::new(first.x, first.x, first.y, first.y);
        for p in iter {
            rect.s_min = rect.s_min.min(p.x);
            rect.s_max = rect.s_max.max(p.x);
            rect.t_min = rect.t_min.min(p.y);
            rect.t_max = rect.t_max.max(p.y);
        }
        Some(rect)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.s_max - self.s_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Returns `true` if the two rectangles share a region of positive area.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.s_min.max(other.s_min) + PARAMETER_TOLERANCE < self.s_max.min(other.s_max)
            && self.t_min.max(other.t_min) + PARAMETER_TOLERANCE < self.t_max.min(other.t_max)
    }

    /// Returns `true` if `p` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, p: &Parameter) -> bool {
        p.x >= self.s_min - PARAMETER_TOLERANCE
            && p.x <= self.s_max + PARAMETER_TOLERANCE
            && p.y >= self.t_min - PARAMETER_TOLERANCE
            && p.y <= self.t_max + PARAMETER_TOLERANCE
    }

    /// Returns `true` if `p` lies on the border.
    #[must_use]
    pub fn on_border(&self, p: &Parameter) -> bool {
        self.contains(p)
            && (super::same_coordinate(p.x, self.s_min)
                || super::same_coordinate(p.x, self.s_max)
                || super::same_coordinate(p.y, self.t_min)
                || super::same_coordinate(p.y, self.t_max))
    }
}
