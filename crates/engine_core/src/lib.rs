//! Core engine types and utilities for the space explorer showcase.
//!
//! This crate provides the foundational types used across all crates:
//! - Transform and spatial placement
//! - Rays for pointer picking
//! - Frame clock with a fixed-step accumulator
//! - Hex color parsing
//! - Pointer interaction components for ECS

pub mod color;
pub mod components;
pub mod ray;
pub mod time;
pub mod transform;

pub use color::*;
pub use components::*;
pub use ray::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
