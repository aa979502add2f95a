pub mod construction;
pub mod preparation;
pub mod query;
