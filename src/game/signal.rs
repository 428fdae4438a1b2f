//! # Signal Algebra
//!
//! Level-mutation requests raised during update passes.
//!
//! Objects deep in the entity graph never hold a reference to the level that
//! owns them. When an interaction or a trigger wants to mutate level state —
//! swap an object, queue a message, open a corridor — it raises a [`Signal`]
//! and the level's single dispatcher applies it. Signals compose through
//! [`Signal::List`], so one reaction can atomically chain several effects.
//!
//! Signals are routine dataflow, not errors: the closed set of variants here
//! replaces what a dynamic-language engine might do with control-flow
//! exceptions.

use crate::game::ObjectId;
use crate::generation::{ObjectFactory, Pathway, PathwayId};

/// A level-mutation request.
#[derive(Debug, Clone)]
pub enum Signal {
    /// Swap the object carrying `target` for a freshly built one, keeping the
    /// old object's position. Silently ignored if no such object exists.
    Replace { target: ObjectId, with: ObjectFactory },

    /// Add a new object at the coordinates its factory embeds.
    Create(ObjectFactory),

    /// Queue a message for the UI log.
    Message(String),

    /// Open a corridor.
    AddPathway(Pathway),

    /// Seal the corridor carrying this id.
    RemovePathway(PathwayId),

    /// Ask the outer controller to advance one level.
    NextLevel,

    /// Ask the outer controller to go back one level.
    PreviousLevel,

    /// End the game; `defeat` distinguishes death from victory.
    GameOver { defeat: bool },

    /// Apply every contained signal, in order.
    List(Vec<Signal>),
}

impl Signal {
    /// Convenience constructor for a message signal.
    pub fn message(text: impl Into<String>) -> Self {
        Signal::Message(text.into())
    }
}

/// Outward signals the level itself cannot resolve.
///
/// The per-tick dispatcher consumes every other [`Signal`] variant; these
/// three propagate one layer up to [`GameState`](crate::game::GameState),
/// which tears the level down and builds the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NextLevel,
    PreviousLevel,
    GameOver { defeat: bool },
}
