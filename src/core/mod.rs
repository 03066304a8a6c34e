pub mod anim;
pub mod buttons;
pub mod constants;
pub mod environment;
pub mod error;
pub mod layout;
pub mod model;
pub mod playback;
pub mod pointer;
pub mod projection;
pub mod scene;
pub mod tween;
pub mod waveform;

pub use constants::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
