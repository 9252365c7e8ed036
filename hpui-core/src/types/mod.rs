//! Fundamental data types shared across HPUI crates.

pub mod geometry;

pub use geometry::SurfaceRect;
pub use glam::{Vec2, Vec3};
