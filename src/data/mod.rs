//! External (non-CSV) assets.

pub mod animation;

pub use animation::{fetch_animation, AnimationAsset};
