use crate::error::AnimationError;
use crate::sprites::SpriteRegion;

/// An ordered run of sprite frames, each held for a fixed number of ticks.
///
/// A looping sequence wraps back to its first frame. A one-shot sequence stops on its last
/// frame and stays there; it is never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSequence {
    frames: Vec<SpriteRegion>,
    ticks_per_frame: u32,
    looping: bool,
    index: usize,
    frame_ticks: u32,
    playing: bool,
}

impl AnimationSequence {
    /// Creates a playing sequence positioned on its first frame.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::EmptySequence`] for an empty frame list and
    /// [`AnimationError::ZeroFrameHold`] if `ticks_per_frame` is zero.
    pub fn new(frames: Vec<SpriteRegion>, ticks_per_frame: u32, looping: bool) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptySequence);
        }
        if ticks_per_frame == 0 {
            return Err(AnimationError::ZeroFrameHold);
        }

        Ok(Self {
            frames,
            ticks_per_frame,
            looping,
            index: 0,
            frame_ticks: 0,
            playing: true,
        })
    }

    pub fn looping(frames: Vec<SpriteRegion>, ticks_per_frame: u32) -> Result<Self, AnimationError> {
        Self::new(frames, ticks_per_frame, true)
    }

    pub fn once(frames: Vec<SpriteRegion>, ticks_per_frame: u32) -> Result<Self, AnimationError> {
        Self::new(frames, ticks_per_frame, false)
    }

    /// A single still frame. Advancing it never changes anything.
    pub fn still(frame: SpriteRegion) -> Self {
        Self {
            frames: vec![frame],
            ticks_per_frame: 1,
            looping: false,
            index: 0,
            frame_ticks: 0,
            playing: true,
        }
    }

    pub fn current_frame(&self) -> SpriteRegion {
        self.frames[self.index]
    }

    /// Advances the sequence by one tick. Does nothing while stopped.
    pub fn advance(&mut self) {
        if !self.playing {
            return;
        }

        self.frame_ticks += 1;
        if self.frame_ticks < self.ticks_per_frame {
            return;
        }

        self.frame_ticks = 0;
        self.index = if self.looping {
            (self.index + 1) % self.frames.len()
        } else {
            (self.index + 1).min(self.frames.len() - 1)
        };
    }

    pub fn start(&mut self) {
        self.playing = true;
    }

    /// Freezes the sequence on its current frame.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Rewinds to the first frame.
    pub fn reset(&mut self) {
        self.set_frame_index(0);
    }

    /// Jumps to a frame (clamped to the last one) and restarts its hold.
    pub fn set_frame_index(&mut self, index: usize) {
        self.index = index.min(self.frames.len() - 1);
        self.frame_ticks = 0;
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[SpriteRegion] {
        &self.frames
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// True once a one-shot sequence has reached its last frame. Looping sequences never complete.
    pub fn is_complete(&self) -> bool {
        !self.looping && self.index == self.frames.len() - 1
    }

    /// Ticks needed to play every frame once.
    pub fn total_ticks(&self) -> u64 {
        self.frames.len() as u64 * self.ticks_per_frame as u64
    }

    /// Swaps in a different frame list while keeping the playback position.
    ///
    /// Used when the same animation must be drawn with other sprites (e.g. a different facing).
    /// The frame index is clamped into the new list.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::EmptySequence`] if `frames` is empty; the sequence is left unchanged.
    pub fn replace_frames(&mut self, frames: &[SpriteRegion]) -> Result<(), AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptySequence);
        }
        if self.frames != frames {
            self.frames.clear();
            self.frames.extend_from_slice(frames);
            self.index = self.index.min(self.frames.len() - 1);
        }
        Ok(())
    }
}
