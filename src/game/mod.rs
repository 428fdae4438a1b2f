//! # Game Module
//!
//! The level simulation core: entity model, creature behavior, movement
//! resolution, combat hitboxes, triggers, and the per-tick level orchestrator.

pub mod creature;
pub mod entity;
pub mod level;
pub mod signal;
pub mod state;
pub mod trigger;

pub use creature::*;
pub use entity::*;
pub use level::*;
pub use signal::*;
pub use state::*;
pub use trigger::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Level-designer-assigned identifier for scriptable objects.
///
/// Most objects carry no id; triggers and replace events address the ones
/// that do. Two values are reserved: [`HERO_ID`] and [`ASCEND_STAIRS_ID`].
pub type ObjectId = i32;

/// Reserved id of the hero.
pub const HERO_ID: ObjectId = -1;

/// Reserved id of the ascending stairs object.
pub const ASCEND_STAIRS_ID: ObjectId = -2;

/// Unique runtime identity of a placed entity.
///
/// Distinct from [`ObjectId`]: designer ids are optional, reused across
/// levels, and script-facing, while every placed entity gets exactly one
/// `EntityUid` for collision self-exclusion and trigger resolution.
pub type EntityUid = Uuid;

/// Creates a new unique entity uid.
pub fn new_entity_uid() -> EntityUid {
    Uuid::new_v4()
}

/// Horizontal facing component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    East,
    West,
}

/// Vertical facing component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vertical {
    North,
    South,
}

/// The direction a creature faces, as independent axis components.
///
/// Diagonals are the combination of both components; either may be unset.
/// Attacks spawn their hitbox offset along whichever components are set.
///
/// # Examples
///
/// ```
/// use delve::Facing;
/// use delve::game::{Horizontal, Vertical};
///
/// let mut f = Facing::default();
/// f.set_from_step(1, -1);
/// assert_eq!(f.horizontal, Some(Horizontal::East));
/// assert_eq!(f.vertical, Some(Vertical::South));
///
/// // A zero step leaves the previous facing untouched
/// f.set_from_step(0, 0);
/// assert_eq!(f.horizontal, Some(Horizontal::East));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing {
    pub horizontal: Option<Horizontal>,
    pub vertical: Option<Vertical>,
}

impl Default for Facing {
    /// Fresh creatures face north.
    fn default() -> Self {
        Self {
            horizontal: None,
            vertical: Some(Vertical::North),
        }
    }
}

impl Facing {
    /// Re-orients along a step direction; `(0, 0)` is ignored.
    pub fn set_from_step(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.horizontal = match dx.signum() {
            1 => Some(Horizontal::East),
            -1 => Some(Horizontal::West),
            _ => None,
        };
        self.vertical = match dy.signum() {
            1 => Some(Vertical::North),
            -1 => Some(Vertical::South),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_uid_uniqueness() {
        assert_ne!(new_entity_uid(), new_entity_uid());
    }

    #[test]
    fn test_facing_from_step() {
        let mut f = Facing::default();
        f.set_from_step(-3, 0);
        assert_eq!(f.horizontal, Some(Horizontal::West));
        assert_eq!(f.vertical, None);

        f.set_from_step(1, 5);
        assert_eq!(f.horizontal, Some(Horizontal::East));
        assert_eq!(f.vertical, Some(Vertical::North));
    }

    #[test]
    fn test_facing_zero_step_is_noop() {
        let mut f = Facing::default();
        f.set_from_step(0, -1);
        let before = f;
        f.set_from_step(0, 0);
        assert_eq!(f, before);
    }
}
