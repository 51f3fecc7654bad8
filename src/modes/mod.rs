pub mod play;

pub use play::{Bell, PlayMode};
