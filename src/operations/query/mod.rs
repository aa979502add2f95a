mod evaluate_point;
mod face_winding;
mod validate_image;

pub use evaluate_point::EvaluatePoint;
pub use face_winding::FaceWinding;
pub use validate_image::ValidateImage;
