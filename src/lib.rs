//! # Delve
//!
//! A small 2D roguelike engine: a hero explores rooms joined by procedurally
//! placed corridors, fights creatures, and descends through scripted levels.
//!
//! ## Architecture Overview
//!
//! - **Geometry**: axis-aligned rectangle and point primitives used by both
//!   the generator and the movement resolver
//! - **Generation System**: explicit room placement, the "magnetic pathway"
//!   corridor connector, and an optional random growth layout
//! - **Game Core**: the entity model, the creature behavior state machine,
//!   per-tick movement resolution, combat hitboxes, and the trigger/event
//!   system that scripts level behavior
//! - **Rendering/Input**: thin macroquad adapters; the core only exposes
//!   drawable state and consumes a "is this key held" capability
//!
//! All level mutation requests raised deep inside the entity graph travel as
//! [`Signal`](game::Signal) values through a single dispatcher on the level,
//! never as panics or ad-hoc callbacks.

pub mod content;
pub mod game;
pub mod generation;
pub mod geometry;
pub mod input;
pub mod rendering;

pub use game::{
    Brain, Creature, CreatureStats, Facing, GameObject, GameOutcome, GameState, Hitbox,
    Interaction, Level, LevelFactory, Signal, Transition, Trigger, TriggerCondition,
    WatchSnapshot,
};
pub use generation::{GrowthConfig, LevelBlueprint, ObjectFactory, Pathway, PathwayId, Room};
pub use geometry::{Point, Rect};
pub use input::{Control, InputState, KeySet};

/// Core error type for the delve engine.
///
/// These are the fatal, defect-class conditions of level construction. The
/// routine per-tick control flow (death, level transitions, object swaps) is
/// *not* an error: it travels as [`game::Signal`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// Two rooms are diagonal or coincident, so no straight corridor exists
    #[error("impossible pathway between rooms at {0} and {1}")]
    ImpossiblePathway(Rect, Rect),

    /// Random placement exhausted its attempt budget
    #[error("could not place {what} after {attempts} attempts")]
    Unplaceable { what: String, attempts: u32 },

    /// Level content is malformed (wrong start-room count, unknown ids, ...)
    #[error("invalid level content: {0}")]
    InvalidContent(String),
}

/// Result type used throughout the delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Window width in pixels
    pub const WINDOW_WIDTH: i32 = 640;

    /// Window height in pixels
    pub const WINDOW_HEIGHT: i32 = 480;

    /// Wall thickness unit; pathway thickness and room borders derive from it
    pub const WALL_UNIT: i32 = 10;

    /// Fixed simulation timestep in seconds
    pub const TICK_INTERVAL: f32 = 0.1;

    /// Gap between an attacker's bounding box and its spawned hitbox
    pub const HITBOX_GAP: i32 = 3;

    /// Discrete step choices for roaming creatures; zeros bias toward drift
    pub const ROAM_STEPS: [i32; 5] = [-1, 0, 0, 0, 1];

    /// Per-tick probability that an uncommitted roamer picks a new direction
    pub const ROAM_RATE: f64 = 0.1;

    /// Attempt budget for random entity placement before giving up
    pub const PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Footprint of a one-glyph entity, in pixels
    pub const GLYPH_WIDTH: i32 = 8;

    /// Footprint of a one-glyph entity, in pixels
    pub const GLYPH_HEIGHT: i32 = 14;
}
