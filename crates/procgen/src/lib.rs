//! Procedural generation for the scene background: starfield and night backdrop.

pub mod backdrop;
pub mod starfield;

pub use backdrop::*;
pub use starfield::*;
