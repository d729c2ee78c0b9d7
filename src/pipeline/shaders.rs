pub mod brdf;
pub mod phong;
pub mod unlit;
