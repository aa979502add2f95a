//! A T-spline surface kernel.
//!
//! A surface is built in a [`TopologyStore`](topology::TopologyStore) as a
//! planar graph in `(s, t)` plus a graph of blending nodes, prepared by the
//! passes in [`operations::preparation`], and evaluated into a polygon mesh
//! by [`Tessellator`](tessellation::Tessellator).

pub mod error;
pub mod import;
pub mod math;
pub mod operations;
pub mod spline;
pub mod tessellation;
pub mod topology;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{Result, TsplineError};
