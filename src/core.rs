pub mod color;
pub mod framebuffer;
pub mod frustum;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod rasterizer;
