//! # Entity Model
//!
//! Placed game objects, their interaction behavior, and combat hitboxes.

use crate::config::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::game::{new_entity_uid, EntityUid, ObjectId, Signal};
use crate::geometry::{Point, Rect};

/// Interaction behavior of an object, supplied at construction.
///
/// This is the closed set of reactions an object can have to the hero's
/// interact key. Behaviors that fire a signal hand it to the level's
/// dispatcher; [`Interaction::EmitOnce`] exhausts itself after the first use.
#[derive(Debug, Clone)]
pub enum Interaction {
    /// Nothing happens.
    None,
    /// Queue a fixed message.
    Message(String),
    /// Raise a clone of the signal every time.
    Emit(Signal),
    /// Raise the signal the first time only.
    EmitOnce(Option<Signal>),
}

impl Interaction {
    /// Creates a message interaction.
    pub fn message(text: impl Into<String>) -> Self {
        Interaction::Message(text.into())
    }

    /// Creates a one-shot signal interaction.
    pub fn once(signal: Signal) -> Self {
        Interaction::EmitOnce(Some(signal))
    }

    /// Runs the behavior, returning the signal to dispatch, if any.
    pub fn interact(&mut self) -> Option<Signal> {
        match self {
            Interaction::None => None,
            Interaction::Message(text) => Some(Signal::Message(text.clone())),
            Interaction::Emit(signal) => Some(signal.clone()),
            Interaction::EmitOnce(signal) => signal.take(),
        }
    }
}

/// An object placed in a level.
///
/// Everything that occupies level space is (or embeds) a `GameObject`:
/// furniture, stairs, levers, and the body of every creature. Position is the
/// bottom-left corner of the bounding box; the footprint defaults to one
/// glyph.
///
/// # Examples
///
/// ```
/// use delve::{GameObject, Interaction, Signal};
///
/// let stairs = GameObject::new('>', "descending stairs")
///     .id(2)
///     .go_through(true)
///     .interaction(Interaction::Emit(Signal::NextLevel));
/// assert!(stairs.go_through);
/// ```
#[derive(Debug, Clone)]
pub struct GameObject {
    /// Unique runtime identity, for collision self-exclusion
    pub uid: EntityUid,
    /// Optional script-facing id
    pub id: Option<ObjectId>,
    /// Display glyph
    pub symbol: char,
    /// Human-readable description
    pub description: String,
    /// Whether the object skips solidity/collision checks
    pub go_through: bool,
    /// Interaction/attack radius
    pub range: i32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// What happens when the hero interacts with this object
    pub interaction: Interaction,
}

impl GameObject {
    /// Creates an object at the origin with a one-glyph footprint.
    ///
    /// Objects left at the origin are assigned a random walkable position
    /// when the level is built.
    pub fn new(symbol: char, description: impl Into<String>) -> Self {
        Self {
            uid: new_entity_uid(),
            id: None,
            symbol,
            description: description.into(),
            go_through: false,
            range: 1,
            x: 0,
            y: 0,
            w: GLYPH_WIDTH,
            h: GLYPH_HEIGHT,
            interaction: Interaction::None,
        }
    }

    pub fn id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn go_through(mut self, go_through: bool) -> Self {
        self.go_through = go_through;
        self
    }

    pub fn range(mut self, range: i32) -> Self {
        self.range = range;
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = interaction;
        self
    }

    /// Bounding rectangle at the current position.
    pub fn rect(&self) -> Rect {
        Rect::from_dimensions(self.x, self.y, self.w, self.h)
    }

    /// Center of the bounding rectangle.
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn set_location(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// True if `other`'s center is within `distance` of this object's
    /// center, inflated by half this object's own larger dimension.
    pub fn within_distance(&self, other: Rect, distance: i32) -> bool {
        let reach = distance as f64 + (self.w.max(self.h) as f64) / 2.0;
        self.center().distance_to(other.center()) <= reach
    }

    /// True if `other` is inside this object's interaction range.
    pub fn within_range(&self, other: Rect) -> bool {
        self.within_distance(other, self.range)
    }
}

impl std::fmt::Display for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.symbol)
    }
}

/// A transient axis-aligned hit volume spawned by an attack.
///
/// Created by `Creature::attack`, harvested by the level once per tick, and
/// discarded after a single evaluation pass against every creature.
#[derive(Debug, Clone)]
pub struct Hitbox {
    pub rect: Rect,
    /// Damage dealt on hit, copied from the attacker
    pub strength: i32,
    /// The attacker, excluded from its own hitbox
    pub origin: EntityUid,
}

impl Hitbox {
    pub fn new(rect: Rect, strength: i32, origin: EntityUid) -> Self {
        Self {
            rect,
            strength,
            origin,
        }
    }

    /// True if `target` overlaps the volume and is not the attacker itself.
    pub fn hit(&self, target_rect: Rect, target_uid: EntityUid) -> bool {
        target_uid != self.origin && self.rect.overlaps(&target_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_builder() {
        let lever = GameObject::new('L', "lever")
            .id(4)
            .go_through(true)
            .range(5)
            .at(389, 210);
        assert_eq!(lever.id, Some(4));
        assert!(lever.go_through);
        assert_eq!(lever.range, 5);
        assert_eq!(lever.rect().origin(), Point::new(389, 210));
    }

    #[test]
    fn test_within_range_uses_own_radius() {
        let mut a = GameObject::new('a', "a").range(10);
        a.set_location(0, 0);
        // Center-to-center distance 20; reach is 10 + h/2 = 17
        let far = Rect::from_dimensions(20, 0, a.w, a.h);
        assert!(!a.within_range(far));
        let near = Rect::from_dimensions(12, 0, a.w, a.h);
        assert!(a.within_range(near));
    }

    #[test]
    fn test_interaction_once_exhausts() {
        let mut i = Interaction::once(Signal::NextLevel);
        assert!(matches!(i.interact(), Some(Signal::NextLevel)));
        assert!(i.interact().is_none());
    }

    #[test]
    fn test_interaction_emit_repeats() {
        let mut i = Interaction::Emit(Signal::message("hi"));
        assert!(i.interact().is_some());
        assert!(i.interact().is_some());
    }

    #[test]
    fn test_hitbox_excludes_origin() {
        let uid = new_entity_uid();
        let hb = Hitbox::new(Rect::from_dimensions(0, 0, 10, 10), 5, uid);
        let inside = Rect::from_dimensions(5, 5, 4, 4);
        assert!(!hb.hit(inside, uid));
        assert!(hb.hit(inside, new_entity_uid()));
        let outside = Rect::from_dimensions(50, 50, 4, 4);
        assert!(!hb.hit(outside, new_entity_uid()));
    }
}
