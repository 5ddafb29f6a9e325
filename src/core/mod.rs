pub mod animate;
pub mod audio_state;
pub mod constants;
pub mod interaction;
pub mod params;
pub mod scene;

pub use animate::*;
pub use audio_state::*;
pub use interaction::*;
pub use params::*;
pub use scene::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
