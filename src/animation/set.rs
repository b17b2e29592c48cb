use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use glam::Vec2;
use tracing::{trace, warn};

use crate::animation::sequence::AnimationSequence;
use crate::direction::Direction;
use crate::error::AnimationError;
use crate::sprites::SpriteRegion;

/// Keys naming the animations of one actor. Usually a small fieldless enum.
pub trait AnimationId: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> AnimationId for T where T: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// The transient actor state a [`FrameResolver`] may use to pick sprites.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorPose {
    pub facing: Direction,
    pub moving: bool,
    pub velocity: Vec2,
}

/// Chooses the concrete frames used to draw an animation for the actor's current pose.
///
/// The same animation id can need different sprites depending on state the id does not
/// encode, such as Pac-Man munching left versus right.
pub trait FrameResolver<A>: Send + Sync {
    /// Returns replacement frames for `id`, or `None` to keep the sequence's own frames.
    fn resolve(&self, id: A, pose: &ActorPose) -> Option<&[SpriteRegion]>;
}

/// The animations available to one actor, with at most one selected at a time.
pub struct AnimationSet<A: AnimationId> {
    sequences: HashMap<A, AnimationSequence>,
    selected: Option<A>,
    resolver: Option<Arc<dyn FrameResolver<A>>>,
}

// Clones share the resolver; it only reads its frame tables.
impl<A: AnimationId> Clone for AnimationSet<A> {
    fn clone(&self) -> Self {
        Self {
            sequences: self.sequences.clone(),
            selected: self.selected,
            resolver: self.resolver.clone(),
        }
    }
}

impl<A: AnimationId> Default for AnimationSet<A> {
    fn default() -> Self {
        Self {
            sequences: HashMap::new(),
            selected: None,
            resolver: None,
        }
    }
}

impl<A: AnimationId> fmt::Debug for AnimationSet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationSet")
            .field("ids", &self.sequences.keys().collect::<Vec<_>>())
            .field("selected", &self.selected)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl<A: AnimationId> AnimationSet<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sequence under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::DuplicateId`] if `id` is already present.
    pub fn insert(&mut self, id: A, sequence: AnimationSequence) -> Result<(), AnimationError> {
        if self.sequences.contains_key(&id) {
            return Err(AnimationError::DuplicateId(format!("{id:?}")));
        }
        self.sequences.insert(id, sequence);
        Ok(())
    }

    /// Builder form of [`AnimationSet::insert`].
    pub fn with(mut self, id: A, sequence: AnimationSequence) -> Result<Self, AnimationError> {
        self.insert(id, sequence)?;
        Ok(self)
    }

    pub fn with_resolver(mut self, resolver: impl FrameResolver<A> + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn contains(&self, id: A) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn selected(&self) -> Option<A> {
        self.selected
    }

    /// Selects `id`, starting it on its first frame. See [`AnimationSet::select_at`].
    pub fn select(&mut self, id: A) -> bool {
        self.select_at(id, 0)
    }

    /// Selects `id` and rewinds it to `start_frame`.
    ///
    /// Re-selecting the current id does nothing, so per-tick scene code can call this freely
    /// without restarting the animation. An unknown id is logged and the selection is left as is.
    ///
    /// Returns whether the selection changed.
    pub fn select_at(&mut self, id: A, start_frame: usize) -> bool {
        if self.selected == Some(id) {
            return false;
        }

        let Some(sequence) = self.sequences.get_mut(&id) else {
            warn!(id = ?id, selected = ?self.selected, "Unknown animation id, selection unchanged");
            return false;
        };

        sequence.set_frame_index(start_frame);
        trace!(id = ?id, previous = ?self.selected, start_frame, "Selected animation");
        self.selected = Some(id);
        true
    }

    pub fn current(&self) -> Option<&AnimationSequence> {
        self.selected.and_then(|id| self.sequences.get(&id))
    }

    pub fn current_mut(&mut self) -> Option<&mut AnimationSequence> {
        self.selected.and_then(|id| self.sequences.get_mut(&id))
    }

    pub fn get(&self, id: A) -> Option<&AnimationSequence> {
        self.sequences.get(&id)
    }

    /// The frame the renderer should draw, if anything is selected.
    pub fn current_frame(&self) -> Option<SpriteRegion> {
        self.current().map(AnimationSequence::current_frame)
    }

    /// Advances the selected sequence by one tick.
    pub fn advance(&mut self) {
        if let Some(sequence) = self.current_mut() {
            sequence.advance();
        }
    }

    pub fn start(&mut self) {
        if let Some(sequence) = self.current_mut() {
            sequence.start();
        }
    }

    pub fn stop(&mut self) {
        if let Some(sequence) = self.current_mut() {
            sequence.stop();
        }
    }

    /// Runs the resolver hook and substitutes its frames into the selected sequence.
    pub fn resolve_frames(&mut self, pose: &ActorPose) {
        let (Some(id), Some(resolver)) = (self.selected, self.resolver.as_deref()) else {
            return;
        };
        let Some(frames) = resolver.resolve(id, pose) else {
            return;
        };
        if let Some(sequence) = self.sequences.get_mut(&id) {
            if let Err(error) = sequence.replace_frames(frames) {
                warn!(id = ?id, %error, "Resolver produced unusable frames");
            }
        }
    }
}
