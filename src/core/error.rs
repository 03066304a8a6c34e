use thiserror::Error;

/// Failures while turning fetched bytes into scene data.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("glTF decode failed: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("HDR decode failed: {0}")]
    Hdr(#[from] image::ImageError),
    #[error("mesh {mesh} references missing buffer data")]
    MissingBuffer { mesh: usize },
    #[error("model contains no renderable geometry")]
    EmptyModel,
}
