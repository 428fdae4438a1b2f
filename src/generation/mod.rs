//! # Generation Module
//!
//! Level space construction: explicit room placement, magnetic corridors,
//! and an optional procedural growth layout.
//!
//! The level-designer-facing surface is [`LevelBlueprint`]: the fixed bundle
//! of rooms (with their spawn lists), pathways, level-wide objects and
//! creatures, and trigger definitions from which a live
//! [`Level`](crate::game::Level) is built.

pub mod layout;
pub mod rooms;

pub use layout::*;
pub use rooms::*;

use crate::game::{Creature, GameObject, Trigger};
use crate::{DelveError, DelveResult};

/// Builds a fresh object, used by replace/create signals after level build.
///
/// A plain function pointer: factories are bound in level content and carry
/// no captured state, which keeps [`Signal`](crate::game::Signal) cheap to
/// clone.
pub type ObjectFactory = fn() -> GameObject;

/// The content bundle a level is constructed from.
///
/// # Examples
///
/// ```
/// use delve::{LevelBlueprint, Room};
///
/// let bp = LevelBlueprint::new(vec![Room::new(0, 0, 100, 100).start()], vec![]);
/// assert!(bp.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LevelBlueprint {
    pub rooms: Vec<Room>,
    pub pathways: Vec<Pathway>,
    /// Level-wide objects; those left at the origin get a random position
    pub objects: Vec<GameObject>,
    /// Level-wide creatures, placed anywhere in the walkable network
    pub creatures: Vec<Creature>,
    pub triggers: Vec<Trigger>,
}

impl LevelBlueprint {
    pub fn new(rooms: Vec<Room>, pathways: Vec<Pathway>) -> Self {
        Self {
            rooms,
            pathways,
            objects: Vec::new(),
            creatures: Vec::new(),
            triggers: Vec::new(),
        }
    }

    pub fn objects(mut self, objects: Vec<GameObject>) -> Self {
        self.objects = objects;
        self
    }

    pub fn creatures(mut self, creatures: Vec<Creature>) -> Self {
        self.creatures = creatures;
        self
    }

    pub fn triggers(mut self, triggers: Vec<Trigger>) -> Self {
        self.triggers = triggers;
        self
    }

    /// Checks the structural rules the rest of the engine assumes: exactly
    /// one start room.
    pub fn validate(&self) -> DelveResult<()> {
        let starts = self.rooms.iter().filter(|r| r.start).count();
        if starts != 1 {
            return Err(DelveError::InvalidContent(format!(
                "expected exactly one start room, found {starts}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_one_start_room() {
        let none = LevelBlueprint::new(vec![Room::new(0, 0, 50, 50)], vec![]);
        assert!(none.validate().is_err());

        let two = LevelBlueprint::new(
            vec![
                Room::new(0, 0, 50, 50).start(),
                Room::new(200, 0, 50, 50).start(),
            ],
            vec![],
        );
        assert!(two.validate().is_err());

        let one = LevelBlueprint::new(vec![Room::new(0, 0, 50, 50).start()], vec![]);
        assert!(one.validate().is_ok());
    }
}
