//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into one triangle list per frame and
//! drawn with a single flat-color pipeline.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use pipeline::RenderState;
pub use vertex::Vertex;
