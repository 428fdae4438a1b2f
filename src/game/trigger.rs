//! # Triggers
//!
//! Declarative one-shot scripting over level state.
//!
//! A trigger pairs a condition with a pre-bound reaction [`Signal`]. The
//! level evaluates all triggers once per tick; the first tick a condition
//! holds, the reaction is dispatched and the trigger is spent forever
//! (run-once semantics).
//!
//! Conditions never hold references into the entity lists. Watched object
//! ids are resolved once at level-build time, and each tick the level
//! refreshes a [`WatchSnapshot`] per watched entity. When a watched entity
//! is removed its snapshot simply stops updating, so predicates observing
//! long-dead entities keep seeing their final state — deliberately tolerated,
//! not an error.

use crate::game::ObjectId;
use crate::game::Signal;
use crate::geometry::Rect;

/// The last observed state of a watched entity.
#[derive(Debug, Clone, Copy)]
pub struct WatchSnapshot {
    pub id: ObjectId,
    /// Bounding rect at the last refresh
    pub rect: Rect,
    /// Vision radius (zero for plain objects)
    pub light_radius: i32,
    /// True once the entity died; frozen after removal
    pub dead: bool,
}

impl WatchSnapshot {
    /// True if `other` falls within this entity's vision radius, measured
    /// center to center and inflated by half this entity's larger dimension.
    pub fn sees(&self, other: &WatchSnapshot) -> bool {
        let w = self.rect.width();
        let h = self.rect.height();
        let reach = self.light_radius as f64 + (w.max(h) as f64) / 2.0;
        self.rect.center().distance_to(other.rect.center()) <= reach
    }
}

/// Boolean test over the watched entities' snapshots, in declaration order.
pub type PredicateFn = fn(&[WatchSnapshot]) -> bool;

/// When a trigger fires.
#[derive(Debug, Clone)]
pub enum TriggerCondition {
    /// The hero's bounding rect overlaps a region
    HeroInRegion(Rect),
    /// A predicate over named objects holds
    Watch {
        ids: Vec<ObjectId>,
        predicate: PredicateFn,
    },
}

/// A scripted event that fires its reaction at most once per level lifetime.
///
/// # Examples
///
/// ```
/// use delve::{Rect, Signal, Trigger, TriggerCondition};
///
/// let t = Trigger::run_once(
///     Signal::message("?????: Hold him!"),
///     TriggerCondition::HeroInRegion(Rect::from_dimensions(350, 190, 100, 10)),
/// );
/// assert!(!t.used());
/// ```
#[derive(Debug, Clone)]
pub struct Trigger {
    pub condition: TriggerCondition,
    pub reaction: Signal,
    used: bool,
}

impl Trigger {
    pub fn run_once(reaction: Signal, condition: TriggerCondition) -> Self {
        Self {
            condition,
            reaction,
            used: false,
        }
    }

    pub fn used(&self) -> bool {
        self.used
    }

    /// Watched ids this trigger needs resolved (the hero region condition
    /// implicitly watches the hero, which the level always tracks).
    pub fn watched_ids(&self) -> &[ObjectId] {
        match &self.condition {
            TriggerCondition::HeroInRegion(_) => &[],
            TriggerCondition::Watch { ids, .. } => ids,
        }
    }

    /// Evaluates the condition against the given snapshots. Fires at most
    /// once: the reaction signal is returned on the first true evaluation
    /// and the trigger is marked used.
    ///
    /// `resolve` maps a watched id to its current snapshot; the level
    /// guarantees at build time that every watched id resolves.
    pub fn update(
        &mut self,
        hero: &WatchSnapshot,
        resolve: impl Fn(ObjectId) -> Option<WatchSnapshot>,
    ) -> Option<Signal> {
        if self.used {
            return None;
        }
        let fired = match &self.condition {
            TriggerCondition::HeroInRegion(region) => hero.rect.overlaps(region),
            TriggerCondition::Watch { ids, predicate } => {
                let watched: Vec<WatchSnapshot> =
                    ids.iter().filter_map(|&id| resolve(id)).collect();
                // Build-time resolution means a shorter list only happens on
                // a level-content defect; the predicate just sees fewer rows.
                watched.len() == ids.len() && predicate(&watched)
            }
        };
        if fired {
            self.used = true;
            log::debug!("trigger fired: {:?}", self.reaction);
            Some(self.reaction.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_at(x: i32, y: i32) -> WatchSnapshot {
        WatchSnapshot {
            id: crate::game::HERO_ID,
            rect: Rect::from_dimensions(x, y, 8, 14),
            light_radius: 30,
            dead: false,
        }
    }

    #[test]
    fn test_hero_region_fires_once() {
        let region = Rect::from_dimensions(100, 100, 10, 10);
        let mut t = Trigger::run_once(
            Signal::message("welcome"),
            TriggerCondition::HeroInRegion(region),
        );

        assert!(t.update(&hero_at(0, 0), |_| None).is_none());
        assert!(t.update(&hero_at(102, 102), |_| None).is_some());
        // Condition still true, but the trigger is spent
        for _ in 0..5 {
            assert!(t.update(&hero_at(102, 102), |_| None).is_none());
        }
        assert!(t.used());
    }

    #[test]
    fn test_watch_predicate_over_snapshots() {
        fn any_dead(watched: &[WatchSnapshot]) -> bool {
            watched.iter().any(|w| w.dead)
        }

        let mut t = Trigger::run_once(
            Signal::message("it is slain"),
            TriggerCondition::Watch {
                ids: vec![3],
                predicate: any_dead,
            },
        );

        let alive = WatchSnapshot {
            id: 3,
            rect: Rect::from_dimensions(0, 0, 8, 14),
            light_radius: 60,
            dead: false,
        };
        assert!(t.update(&hero_at(0, 0), |_| Some(alive)).is_none());

        let dead = WatchSnapshot { dead: true, ..alive };
        assert!(t.update(&hero_at(0, 0), |_| Some(dead)).is_some());
    }

    #[test]
    fn test_snapshot_sees() {
        let a = WatchSnapshot {
            id: -1,
            rect: Rect::from_dimensions(0, 0, 8, 14),
            light_radius: 30,
            dead: false,
        };
        let near = WatchSnapshot {
            id: 4,
            rect: Rect::from_dimensions(20, 0, 8, 14),
            light_radius: 0,
            dead: false,
        };
        let far = WatchSnapshot {
            id: 4,
            rect: Rect::from_dimensions(200, 0, 8, 14),
            light_radius: 0,
            dead: false,
        };
        assert!(a.sees(&near));
        assert!(!a.sees(&far));
    }
}
