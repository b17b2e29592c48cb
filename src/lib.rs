//! A deterministic, tick-driven choreography engine for arcade intro screens and cutscenes.

pub mod actor;
pub mod animation;
pub mod app;
pub mod config;
pub mod constants;
pub mod direction;
pub mod director;
pub mod error;
pub mod formatter;
pub mod fsm;
pub mod input;
pub mod logging;
pub mod scene;
pub mod scenes;
pub mod script;
pub mod sprites;
pub mod timer;
