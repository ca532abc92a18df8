//! Rendering system using wgpu for the space explorer showcase.

pub mod camera;
pub mod font;
pub mod mesh;
pub mod overlay;
pub mod pipeline;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use camera::*;
pub use font::*;
pub use mesh::*;
pub use overlay::*;
pub use pipeline::*;
pub use renderer::*;
pub use texture::*;
pub use vertex::*;
