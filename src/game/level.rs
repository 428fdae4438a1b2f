//! # Level Orchestrator
//!
//! Owns the rooms, pathways, objects, and creatures of one level, runs the
//! per-tick update order, and interprets every [`Signal`] raised along the
//! way.
//!
//! Tick order: creature updates (AI decisions and the hero's input become
//! position intents) → movement resolution over all creatures → hitbox
//! evaluation → hero interaction → trigger evaluation. Every pass funnels
//! its signals through [`Level::handle_signal`], the single dispatcher;
//! level-transition and game-over signals bubble out of `update` as a
//! [`Transition`] for the outer controller.
//!
//! Passes that can add or remove entities never mutate the list they are
//! iterating: deaths are collected during the creature pass and applied
//! after it, and trigger reactions are collected before dispatch.

use crate::config::PLACEMENT_ATTEMPTS;
use crate::game::{
    Brain, Creature, EntityUid, GameObject, Hitbox, ObjectId, Signal, Transition, Trigger,
    WatchSnapshot, HERO_ID,
};
use crate::generation::{LevelBlueprint, Pathway, Room};
use crate::geometry::Rect;
use crate::input::InputState;
use crate::{DelveError, DelveResult};
use rand::Rng;
use std::collections::HashMap;

/// A live game level.
#[derive(Debug)]
pub struct Level {
    pub rooms: Vec<Room>,
    pub pathways: Vec<Pathway>,
    pub objects: Vec<GameObject>,
    /// All creatures, hero included
    pub creatures: Vec<Creature>,
    pub triggers: Vec<Trigger>,
    /// Hit volumes harvested this tick, kept for drawing until the next one
    pub hitboxes: Vec<Hitbox>,
    messages: Vec<String>,
    hero_uid: EntityUid,
    /// Designer id to runtime uid, resolved once at build time
    watch_uids: HashMap<ObjectId, EntityUid>,
    /// Last observed state per watched id; frozen once the entity is gone
    watches: HashMap<ObjectId, WatchSnapshot>,
}

impl Level {
    /// Builds a level from its content bundle, placing the hero in the start
    /// room and every spawn list entry at a random free position.
    ///
    /// Fails on malformed content: zero or multiple start rooms, a watched
    /// trigger id that resolves to nothing, or any entity whose random
    /// placement exhausts its attempt budget.
    pub fn build<R: Rng + ?Sized>(
        blueprint: LevelBlueprint,
        hero: Creature,
        rng: &mut R,
    ) -> DelveResult<Level> {
        blueprint.validate()?;
        let LevelBlueprint {
            mut rooms,
            pathways,
            objects,
            creatures,
            triggers,
        } = blueprint;

        // Spawn lists leave the rooms here; rooms stay immutable afterwards.
        let room_spawns: Vec<(Vec<GameObject>, Vec<Creature>)> = rooms
            .iter_mut()
            .map(|r| (std::mem::take(&mut r.objects), std::mem::take(&mut r.creatures)))
            .collect();

        let mut level = Level {
            rooms,
            pathways,
            objects: Vec::new(),
            creatures: Vec::new(),
            triggers,
            hitboxes: Vec::new(),
            messages: Vec::new(),
            hero_uid: hero.body.uid,
            watch_uids: HashMap::new(),
            watches: HashMap::new(),
        };

        // Level-wide content first; entities left at the origin get a random
        // walkable position, explicitly positioned ones keep their spot.
        for mut obj in objects {
            if (obj.x, obj.y) == (0, 0) {
                let (x, y) = level.sample_position(&obj, None, rng)?;
                obj.set_location(x, y);
            }
            level.objects.push(obj);
        }
        for mut creature in creatures {
            if (creature.body.x, creature.body.y) == (0, 0) {
                let (x, y) = level.sample_position(&creature.body, None, rng)?;
                creature.set_location(x, y);
            }
            level.creatures.push(creature);
        }

        // Room spawns; the hero goes into the start room.
        let mut hero = Some(hero);
        for (index, (spawn_objects, spawn_creatures)) in room_spawns.into_iter().enumerate() {
            let room_inner = level.rooms[index].inner;
            if level.rooms[index].start {
                let mut h = hero.take().ok_or_else(|| {
                    DelveError::InvalidContent("duplicate start room".to_string())
                })?;
                let (x, y) = level.sample_position(&h.body, Some(room_inner), rng)?;
                h.set_location(x, y);
                level.creatures.push(h);
            }
            for mut creature in spawn_creatures {
                let (x, y) = level.sample_position(&creature.body, Some(room_inner), rng)?;
                creature.set_location(x, y);
                level.creatures.push(creature);
            }
            for mut obj in spawn_objects {
                let (x, y) = level.sample_position(&obj, Some(room_inner), rng)?;
                obj.set_location(x, y);
                level.objects.push(obj);
            }
        }

        // Hostile creatures hunt the hero.
        for creature in &mut level.creatures {
            if creature.hostile {
                creature.has_target = true;
            }
        }

        level.resolve_watches()?;
        log::info!(
            "level built: {} rooms, {} pathways, {} objects, {} creatures, {} triggers",
            level.rooms.len(),
            level.pathways.len(),
            level.objects.len(),
            level.creatures.len(),
            level.triggers.len()
        );
        Ok(level)
    }

    /// Runs one simulation tick. Returns the first transition signal raised,
    /// if any; the caller tears this level down in response.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        input: &dyn InputState,
        rng: &mut R,
    ) -> Option<Transition> {
        self.hitboxes.clear();
        let mut transition: Option<Transition> = None;

        // Creature pass. Death is checked at the top of each creature's own
        // update: a creature that died last tick is removed now, after its
        // final attack and movement already took effect.
        let hero_rect = self.hero().map(|h| h.body.rect());
        let mut dead: Vec<EntityUid> = Vec::new();
        for i in 0..self.creatures.len() {
            if self.creatures[i].dead() {
                if self.creatures[i].brain == Brain::Player {
                    transition.get_or_insert(Transition::GameOver { defeat: true });
                } else {
                    log::debug!("{} dies", self.creatures[i].body);
                    let (id, rect) = {
                        let c = &self.creatures[i];
                        (c.body.id, c.body.rect())
                    };
                    if let Some(id) = id {
                        if let Some(watch) = self.watches.get_mut(&id) {
                            watch.rect = rect;
                            watch.dead = true;
                        }
                    }
                    dead.push(self.creatures[i].body.uid);
                }
                continue;
            }
            match self.creatures[i].brain {
                Brain::Player => self.creatures[i].update_player(input),
                Brain::Ai => {
                    let target = if self.creatures[i].has_target {
                        hero_rect
                    } else {
                        None
                    };
                    self.creatures[i].update_ai(target, rng);
                }
            }
        }

        // Movement resolution pass.
        for i in 0..self.creatures.len() {
            if !dead.contains(&self.creatures[i].body.uid) {
                self.resolve_movement(i);
            }
        }

        // Harvest this tick's hitboxes, then drop the dead. The snapshot of
        // dead uids means removal never races the passes above.
        for creature in &mut self.creatures {
            if let Some(hitbox) = creature.hitbox.take() {
                self.hitboxes.push(hitbox);
            }
        }
        self.creatures.retain(|c| !dead.contains(&c.body.uid));

        // Hitbox evaluation pass: every hitbox against every creature, the
        // attacker excluded from its own volume.
        for hitbox in &self.hitboxes {
            for creature in &mut self.creatures {
                if hitbox.hit(creature.body.rect(), creature.body.uid) {
                    creature.be_attacked(hitbox.strength);
                }
            }
        }

        // Hero interaction pass: one interaction per tick, first in-range
        // object wins (measured by the object's own range).
        if let Some(signal) = self.hero_interact() {
            if let Some(t) = self.handle_signal(signal) {
                transition.get_or_insert(t);
            }
        }

        // Trigger pass: refresh watched snapshots, evaluate, then dispatch
        // the collected reactions.
        self.refresh_watches();
        let fired: Vec<Signal> = if let Some(hero) = self.watches.get(&HERO_ID).copied() {
            self.triggers
                .iter_mut()
                .filter_map(|t| t.update(&hero, |id| self.watches.get(&id).copied()))
                .collect()
        } else {
            Vec::new()
        };
        for signal in fired {
            if let Some(t) = self.handle_signal(signal) {
                transition.get_or_insert(t);
            }
        }

        transition
    }

    /// Applies one signal to the level's collections. Transition signals are
    /// returned instead of applied; an event list is unpacked recursively,
    /// every member applied in order.
    pub fn handle_signal(&mut self, signal: Signal) -> Option<Transition> {
        match signal {
            Signal::Replace { target, with } => {
                // Fail silently if the target id is not present (it may have
                // been replaced already).
                if let Some(index) = self.objects.iter().position(|o| o.id == Some(target)) {
                    let old = self.objects.remove(index);
                    let mut new = with();
                    new.set_location(old.x, old.y);
                    log::debug!("replaced {} with {}", old, new);
                    self.objects.push(new);
                }
                None
            }
            Signal::Create(factory) => {
                self.objects.push(factory());
                None
            }
            Signal::Message(text) => {
                log::debug!("message: {text}");
                self.messages.push(text);
                None
            }
            Signal::AddPathway(pathway) => {
                self.pathways.push(pathway);
                None
            }
            Signal::RemovePathway(id) => {
                self.pathways.retain(|p| p.id != Some(id));
                None
            }
            Signal::NextLevel => Some(Transition::NextLevel),
            Signal::PreviousLevel => Some(Transition::PreviousLevel),
            Signal::GameOver { defeat } => Some(Transition::GameOver { defeat }),
            Signal::List(signals) => {
                let mut transition = None;
                for signal in signals {
                    if let Some(t) = self.handle_signal(signal) {
                        transition.get_or_insert(t);
                    }
                }
                transition
            }
        }
    }

    pub fn hero(&self) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.body.uid == self.hero_uid)
    }

    pub fn hero_mut(&mut self) -> Option<&mut Creature> {
        let uid = self.hero_uid;
        self.creatures.iter_mut().find(|c| c.body.uid == uid)
    }

    /// Removes the hero so it can carry over into the next level. The level
    /// is torn down right after; a hero-less level is never updated.
    pub fn take_hero(&mut self) -> Option<Creature> {
        let index = self
            .creatures
            .iter()
            .position(|c| c.body.uid == self.hero_uid)?;
        Some(self.creatures.remove(index))
    }

    /// Messages queued since the last drain, oldest first.
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// True if the rect lies fully inside at least one room or pathway
    /// floor.
    pub fn contained_in_network(&self, rect: &Rect) -> bool {
        self.rooms.iter().any(|r| r.inner.contains(rect))
            || self.pathways.iter().any(|p| p.inner.contains(rect))
    }

    /// True if the rect overlaps any solid placed entity other than
    /// `exclude`.
    pub fn collides_with_placeables(&self, rect: &Rect, exclude: Option<EntityUid>) -> bool {
        let blocks = |body: &GameObject| {
            !body.go_through && Some(body.uid) != exclude && rect.overlaps(&body.rect())
        };
        self.objects.iter().any(|o| blocks(o)) || self.creatures.iter().any(|c| blocks(&c.body))
    }

    /// Samples a free position for an entity's footprint: inside `within` if
    /// given, anywhere in the walkable network otherwise. Solid entities
    /// additionally require no collision with already placed solids.
    ///
    /// Exhausting the attempt budget is a level-design defect, not a
    /// recoverable condition.
    fn sample_position<R: Rng + ?Sized>(
        &self,
        body: &GameObject,
        within: Option<Rect>,
        rng: &mut R,
    ) -> DelveResult<(i32, i32)> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let region = match within {
                Some(r) => r,
                None => self.random_region(rng),
            };
            let x = rng.gen_range(region.left..=region.right);
            let y = rng.gen_range(region.bottom..=region.top);
            let rect = Rect::from_dimensions(x, y, body.w, body.h);
            let contained = match within {
                Some(r) => r.contains(&rect),
                None => self.contained_in_network(&rect),
            };
            if !contained {
                continue;
            }
            if body.go_through || !self.collides_with_placeables(&rect, None) {
                return Ok((x, y));
            }
        }
        Err(DelveError::Unplaceable {
            what: body.to_string(),
            attempts: PLACEMENT_ATTEMPTS,
        })
    }

    /// Uniformly picks one of the walkable floors (rooms and pathways).
    fn random_region<R: Rng + ?Sized>(&self, rng: &mut R) -> Rect {
        let index = rng.gen_range(0..self.rooms.len() + self.pathways.len());
        if index < self.rooms.len() {
            self.rooms[index].inner
        } else {
            self.pathways[index - self.rooms.len()].inner
        }
    }

    /// Validates the creature's intended position: scan the swept cells
    /// nearest-the-intent-first and take the first cell whose bounding box
    /// is inside the walkable network and collides with nothing solid. If
    /// no cell qualifies the creature stays put this tick.
    fn resolve_movement(&mut self, index: usize) {
        let (go_through, uid, w, h, current, intended) = {
            let c = &self.creatures[index];
            (
                c.body.go_through,
                c.body.uid,
                c.body.w,
                c.body.h,
                (c.body.x, c.body.y),
                (c.intended_x, c.intended_y),
            )
        };
        if current == intended {
            return;
        }
        if go_through {
            // Nothing blocks a pass-through entity.
            self.creatures[index].body.set_location(intended.0, intended.1);
            return;
        }
        let cells = self.creatures[index].candidate_cells();
        let destination = cells.into_iter().find(|&(x, y)| {
            let rect = Rect::from_dimensions(x, y, w, h);
            self.contained_in_network(&rect) && !self.collides_with_placeables(&rect, Some(uid))
        });
        if let Some((x, y)) = destination {
            self.creatures[index].body.set_location(x, y);
        }
    }

    fn hero_interact(&mut self) -> Option<Signal> {
        let hero_rect = {
            let hero = self.hero()?;
            if !hero.intended_interact {
                return None;
            }
            hero.body.rect()
        };
        for obj in &mut self.objects {
            if obj.within_range(hero_rect) {
                return obj.interaction.interact();
            }
        }
        let hero_uid = self.hero_uid;
        for creature in &mut self.creatures {
            if creature.body.uid != hero_uid && creature.body.within_range(hero_rect) {
                return creature.body.interaction.interact();
            }
        }
        None
    }

    /// Resolves every watched trigger id to a live entity, once. An id with
    /// no entity behind it is a content defect.
    fn resolve_watches(&mut self) -> DelveResult<()> {
        self.watch_uids.insert(HERO_ID, self.hero_uid);
        let watched: Vec<ObjectId> = self
            .triggers
            .iter()
            .flat_map(|t| t.watched_ids().iter().copied())
            .collect();
        for id in watched {
            let uid = self
                .objects
                .iter()
                .find(|o| o.id == Some(id))
                .map(|o| o.uid)
                .or_else(|| {
                    self.creatures
                        .iter()
                        .find(|c| c.body.id == Some(id))
                        .map(|c| c.body.uid)
                })
                .ok_or_else(|| {
                    DelveError::InvalidContent(format!("trigger watches unknown object id {id}"))
                })?;
            self.watch_uids.insert(id, uid);
        }
        self.refresh_watches();
        Ok(())
    }

    /// Re-reads the state of every watched entity that still exists;
    /// snapshots of removed entities stay frozen at their last value.
    fn refresh_watches(&mut self) {
        for (&id, &uid) in &self.watch_uids {
            let snapshot = self
                .objects
                .iter()
                .find(|o| o.uid == uid)
                .map(|o| WatchSnapshot {
                    id,
                    rect: o.rect(),
                    light_radius: 0,
                    dead: false,
                })
                .or_else(|| {
                    self.creatures
                        .iter()
                        .find(|c| c.body.uid == uid)
                        .map(|c| WatchSnapshot {
                            id,
                            rect: c.body.rect(),
                            light_radius: c.light_radius,
                            dead: c.dead(),
                        })
                });
            if let Some(snapshot) = snapshot {
                self.watches.insert(id, snapshot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GLYPH_HEIGHT, GLYPH_WIDTH};
    use crate::game::{CreatureStats, Interaction, TriggerCondition};
    use crate::input::{Control, KeySet};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(20130817)
    }

    fn wolf_stats(health: i32) -> CreatureStats {
        CreatureStats {
            health,
            speed: 2,
            strength: 3,
            light_radius: 30,
            range: 10,
            cooldown: 5,
        }
    }

    /// One big square start room, plenty of free floor.
    fn open_blueprint() -> LevelBlueprint {
        LevelBlueprint::new(vec![Room::new(50, 50, 200, 200).start()], Vec::new())
    }

    fn open_level() -> Level {
        Level::build(open_blueprint(), Creature::hero(), &mut rng()).unwrap()
    }

    fn any_dead(watched: &[WatchSnapshot]) -> bool {
        watched.iter().any(|w| w.dead)
    }

    #[test]
    fn build_places_spawns_inside_the_network_without_overlap() {
        let room = Room::new(50, 50, 200, 200)
            .start()
            .objects(vec![GameObject::new('$', "treasure chest")])
            .creatures(vec![
                Creature::new('w', "wolf", wolf_stats(10)),
                Creature::new('w', "wolf", wolf_stats(10)),
            ]);
        let blueprint = LevelBlueprint::new(vec![room], Vec::new())
            .objects(vec![GameObject::new('%', "boulder")]);
        let level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();

        assert_eq!(level.creatures.len(), 3);
        assert_eq!(level.objects.len(), 2);
        let mut rects = Vec::new();
        for c in &level.creatures {
            assert!(level.contained_in_network(&c.body.rect()), "{}", c.body);
            rects.push(c.body.rect());
        }
        for o in &level.objects {
            assert!(level.contained_in_network(&o.rect()), "{o}");
            rects.push(o.rect());
        }
        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                assert!(!rects[i].overlaps(&rects[j]));
            }
        }
    }

    #[test]
    fn hostile_spawns_target_the_hero() {
        let room = Room::new(50, 50, 200, 200)
            .start()
            .creatures(vec![Creature::new('w', "wolf", wolf_stats(10))]);
        let blueprint = LevelBlueprint::new(vec![room], Vec::new());
        let level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();
        let wolf = level
            .creatures
            .iter()
            .find(|c| c.brain == Brain::Ai)
            .unwrap();
        assert!(wolf.has_target);
    }

    #[test]
    fn overfull_room_fails_placement() {
        // Floor is 20x20, barely two glyphs worth of space.
        let room = Room::new(50, 50, 20, 20).start().creatures(vec![
            Creature::new('w', "wolf", wolf_stats(10)),
            Creature::new('w', "wolf", wolf_stats(10)),
            Creature::new('w', "wolf", wolf_stats(10)),
            Creature::new('w', "wolf", wolf_stats(10)),
            Creature::new('w', "wolf", wolf_stats(10)),
        ]);
        let blueprint = LevelBlueprint::new(vec![room], Vec::new());
        let err = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap_err();
        assert!(matches!(err, DelveError::Unplaceable { .. }), "{err}");
    }

    #[test]
    fn unknown_watched_id_fails_build() {
        let blueprint = open_blueprint().triggers(vec![Trigger::run_once(
            Signal::message("ghost"),
            TriggerCondition::Watch {
                ids: vec![42],
                predicate: any_dead,
            },
        )]);
        let err = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap_err();
        assert!(matches!(err, DelveError::InvalidContent(_)), "{err}");
    }

    #[test]
    fn held_key_moves_the_hero_one_step() {
        let mut level = open_level();
        let mut rng = rng();
        level.hero_mut().unwrap().set_location(100, 100);
        let mut input = KeySet::new();
        input.press(Control::East);
        assert!(level.update(&input, &mut rng).is_none());
        let hero = level.hero().unwrap();
        assert_eq!((hero.body.x, hero.body.y), (103, 100));
    }

    #[test]
    fn wall_stops_the_hero() {
        let mut level = open_level();
        let mut rng = rng();
        // Flush against the west wall of the room floor.
        level.hero_mut().unwrap().set_location(60, 100);
        let mut input = KeySet::new();
        input.press(Control::West);
        level.update(&input, &mut rng);
        let hero = level.hero().unwrap();
        assert_eq!((hero.body.x, hero.body.y), (60, 100));
    }

    #[test]
    fn solid_object_clamps_movement_to_the_nearest_free_cell() {
        let blueprint =
            open_blueprint().objects(vec![GameObject::new('%', "boulder").at(111, 100)]);
        let mut level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();
        let mut rng = rng();
        level.hero_mut().unwrap().set_location(100, 100);
        let mut input = KeySet::new();
        input.press(Control::East);
        level.update(&input, &mut rng);
        // Intent was x = 103, but the glyph would touch the boulder there;
        // the sweep settles one cell short of contact.
        let hero = level.hero().unwrap();
        assert_eq!((hero.body.x, hero.body.y), (102, 100));
        let boulder = level.objects[0].rect();
        assert!(!hero.body.rect().overlaps(&boulder));
    }

    #[test]
    fn hitbox_damage_accumulates_and_removes_next_tick() {
        let room = Room::new(50, 50, 200, 200).start().creatures(vec![
            Creature::new('w', "wolf", wolf_stats(10))
                .hostile(false)
                .stationary(true),
            Creature::new('k', "swordsman", wolf_stats(100))
                .hostile(false)
                .stationary(true),
            Creature::new('k', "swordsman", wolf_stats(100))
                .hostile(false)
                .stationary(true),
        ]);
        let blueprint = LevelBlueprint::new(vec![room], Vec::new());
        let mut level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();
        let mut rng = rng();

        level.hero_mut().unwrap().set_location(60, 60);
        let mut positions = [(150, 150), (200, 200), (220, 200)].into_iter();
        let mut wolf_uid = None;
        for creature in &mut level.creatures {
            if creature.brain == Brain::Ai {
                let (x, y) = positions.next().unwrap();
                creature.set_location(x, y);
                if creature.body.symbol == 'w' {
                    wolf_uid = Some(creature.body.uid);
                }
            }
        }
        let wolf_uid = wolf_uid.unwrap();
        // Both hits land in the same tick and stack.
        let strike = Rect::from_dimensions(150, 150, GLYPH_WIDTH, GLYPH_HEIGHT);
        let mut strengths = [6, 5].into_iter();
        for creature in &mut level.creatures {
            if creature.brain == Brain::Ai && creature.body.uid != wolf_uid {
                creature.hitbox = Some(Hitbox::new(
                    strike,
                    strengths.next().unwrap(),
                    creature.body.uid,
                ));
            }
        }

        let input = KeySet::new();
        assert!(level.update(&input, &mut rng).is_none());
        let wolf = level
            .creatures
            .iter()
            .find(|c| c.body.uid == wolf_uid)
            .unwrap();
        assert_eq!(wolf.health, -1);

        // Removal happens at the top of the following tick.
        level.update(&input, &mut rng);
        assert!(!level.creatures.iter().any(|c| c.body.uid == wolf_uid));
    }

    #[test]
    fn hero_death_ends_the_game_in_defeat() {
        let mut level = open_level();
        let mut rng = rng();
        level.hero_mut().unwrap().health = 0;
        let input = KeySet::new();
        assert_eq!(
            level.update(&input, &mut rng),
            Some(Transition::GameOver { defeat: true })
        );
        // The hero is not removed; the controller tears the level down.
        assert!(level.hero().is_some());
    }

    #[test]
    fn interaction_emits_once_and_respects_cooldown() {
        let blueprint = open_blueprint().objects(vec![GameObject::new('/', "lever")
            .at(120, 100)
            .range(20)
            .interaction(Interaction::once(Signal::message("click")))]);
        let mut level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();
        let mut rng = rng();
        level.hero_mut().unwrap().set_location(100, 100);

        let mut input = KeySet::new();
        input.press(Control::Interact);
        level.update(&input, &mut rng);
        assert_eq!(level.drain_messages(), vec!["click".to_string()]);

        // Held past the cooldown, the lever is already spent.
        for _ in 0..6 {
            level.update(&input, &mut rng);
        }
        assert!(level.drain_messages().is_empty());
    }

    #[test]
    fn region_trigger_fires_exactly_once() {
        let blueprint = open_blueprint().triggers(vec![Trigger::run_once(
            Signal::message("a cold draft"),
            TriggerCondition::HeroInRegion(Rect::from_dimensions(50, 50, 220, 220)),
        )]);
        let mut level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();
        let mut rng = rng();
        let input = KeySet::new();
        level.update(&input, &mut rng);
        assert_eq!(level.drain_messages(), vec!["a cold draft".to_string()]);
        level.update(&input, &mut rng);
        assert!(level.drain_messages().is_empty());
    }

    #[test]
    fn watch_trigger_sees_a_death_after_removal() {
        let room = Room::new(50, 50, 200, 200).start().creatures(vec![
            Creature::new('w', "wolf", wolf_stats(10))
                .with_id(3)
                .hostile(false)
                .stationary(true),
        ]);
        let blueprint = LevelBlueprint::new(vec![room], Vec::new()).triggers(vec![
            Trigger::run_once(
                Signal::message("the howling stops"),
                TriggerCondition::Watch {
                    ids: vec![3],
                    predicate: any_dead,
                },
            ),
        ]);
        let mut level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();
        let mut rng = rng();
        let input = KeySet::new();

        level.update(&input, &mut rng);
        assert!(level.drain_messages().is_empty());

        for creature in &mut level.creatures {
            if creature.body.id == Some(3) {
                creature.health = 0;
            }
        }
        // Same tick: the wolf is removed and its frozen snapshot reports the
        // death to the trigger.
        level.update(&input, &mut rng);
        assert!(!level.creatures.iter().any(|c| c.body.id == Some(3)));
        assert_eq!(level.drain_messages(), vec!["the howling stops".to_string()]);
    }

    #[test]
    fn replace_keeps_the_old_position() {
        fn open_shaft() -> GameObject {
            GameObject::new('_', "open shaft").id(1).go_through(true)
        }
        let blueprint =
            open_blueprint().objects(vec![GameObject::new('#', "closed shaft").id(1).at(111, 100)]);
        let mut level = Level::build(blueprint, Creature::hero(), &mut rng()).unwrap();

        assert!(level
            .handle_signal(Signal::Replace {
                target: 1,
                with: open_shaft,
            })
            .is_none());
        let shaft = level.objects.iter().find(|o| o.id == Some(1)).unwrap();
        assert_eq!(shaft.symbol, '_');
        assert_eq!((shaft.x, shaft.y), (111, 100));
    }

    #[test]
    fn replace_of_a_missing_target_is_ignored() {
        let mut level = open_level();
        fn anything() -> GameObject {
            GameObject::new('?', "anything")
        }
        assert!(level
            .handle_signal(Signal::Replace {
                target: 99,
                with: anything,
            })
            .is_none());
        assert!(level.objects.is_empty());
    }

    #[test]
    fn event_list_applies_every_member_and_keeps_the_first_transition() {
        let mut level = open_level();
        let transition = level.handle_signal(Signal::List(vec![
            Signal::AddPathway(Pathway::horizontal(300, 100, 80).with_id(7)),
            Signal::message("the ground rumbles"),
            Signal::NextLevel,
            Signal::PreviousLevel,
        ]));
        assert_eq!(transition, Some(Transition::NextLevel));
        assert!(level.pathways.iter().any(|p| p.id == Some(7)));
        assert_eq!(level.drain_messages(), vec!["the ground rumbles".to_string()]);

        assert!(level.handle_signal(Signal::RemovePathway(7)).is_none());
        assert!(!level.pathways.iter().any(|p| p.id == Some(7)));
    }

    #[test]
    fn take_hero_carries_the_creature_out() {
        let mut level = open_level();
        let uid = level.hero().unwrap().body.uid;
        let hero = level.take_hero().unwrap();
        assert_eq!(hero.body.uid, uid);
        assert_eq!(hero.brain, Brain::Player);
        assert!(level.hero().is_none());
    }
}
