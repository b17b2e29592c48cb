//! Frame sequencing for actor sprites.
//!
//! What is animating lives here; what gets drawn is read out through
//! [`AnimationSet::current_frame`] by the renderer.

pub mod directional;
pub mod sequence;
pub mod set;

pub use directional::{DirectionalFrames, DirectionalTiles};
pub use sequence::AnimationSequence;
pub use set::{ActorPose, AnimationId, AnimationSet, FrameResolver};
