pub mod basis;
pub mod polygon_2d;
pub mod rect;

pub use polygon_2d::Winding;
pub use rect::ParameterRect;

/// A location `(s, t)` in the parametric domain.
pub type Parameter = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Homogeneous 4-vector `(x·w, y·w, z·w, w)`.
pub type Vector4 = nalgebra::Vector4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance used when comparing parametric coordinates.
pub const PARAMETER_TOLERANCE: f64 = 1e-9;

/// Returns `true` if two parametric coordinates coincide.
#[must_use]
pub fn same_coordinate(a: f64, b: f64) -> bool {
    (a - b).abs() <= PARAMETER_TOLERANCE
}
