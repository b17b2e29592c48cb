//! Centralized error types for the choreography engine.
//!
//! Most engine failures are caller bugs rather than runtime conditions, so every
//! fatal path has a checked `try_*` form that returns one of these errors and an
//! unchecked form that logs and panics.

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("State machine error: {0}")]
    State(#[from] StateError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

/// Errors related to tick timers.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The operation needs a finite duration.
    #[error("Timer has an indefinite duration")]
    Indefinite,
}

/// Errors related to animation sequences and sets.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Animation sequence must contain at least one frame")]
    EmptySequence,

    #[error("Animation frames must be held for at least one tick")]
    ZeroFrameHold,

    #[error("Animation id already present in set: {0}")]
    DuplicateId(String),
}

/// Errors related to the closed state set of a state machine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("State {state} is not declared in machine '{machine}'")]
    Undeclared { machine: String, state: String },

    #[error("State {state} is declared twice in machine '{machine}'")]
    AlreadyDeclared { machine: String, state: String },
}

/// Errors found while validating a choreography script at load time.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Script has two cues at tick {0}")]
    DuplicateTick(u64),

    #[error("Script cue at tick {tick} follows a cue at tick {previous}")]
    OutOfOrder { previous: u64, tick: u64 },

    /// State timers have ticked once before a script first runs, so tick 0 is never reached.
    #[error("Script cue at tick 0 can never fire; the first reachable tick is 1")]
    ZeroTick,
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
