use thiserror::Error;

/// Errors surfaced by resource loading and output.
/// The per-frame pipeline itself never fails; bad triangles are skipped locally.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },
    #[error("failed to load OBJ '{path}': {reason}")]
    ObjLoad { path: String, reason: String },
    #[error("failed to read config file '{path}': {reason}")]
    ConfigRead { path: String, reason: String },
    #[error("failed to parse TOML: {0}")]
    ConfigParse(String),
    #[error("failed to save image to '{path}': {reason}")]
    ImageSave { path: String, reason: String },
    #[error("index {index} out of range for mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("window creation failed: {0}")]
    Window(String),
}
