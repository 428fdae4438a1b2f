//! # Creatures
//!
//! The behavior state machine shared by every creature, including the hero.
//!
//! Per tick a non-stationary hostile creature with an assigned target checks
//! its states in strict precedence: dead, attack (target in range), chase
//! (target visible), roam (fallback). Movement never mutates position
//! directly — it records an *intended* position which the level's movement
//! resolver validates against rooms, pathways, and other solid entities.
//!
//! The hero is the same struct with [`Brain::Player`]: its update reads the
//! key-state capability instead of running the AI.

use crate::config::{HITBOX_GAP, ROAM_RATE, ROAM_STEPS};
use crate::game::{
    Facing, GameObject, Hitbox, Horizontal, Interaction, ObjectId, Vertical, HERO_ID,
};
use crate::geometry::Rect;
use crate::input::{Control, InputState};
use rand::seq::SliceRandom;
use rand::Rng;

/// What drives a creature's per-tick decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brain {
    /// The roam/chase/attack state machine
    Ai,
    /// External key state
    Player,
}

/// Combat and perception numbers for a creature.
#[derive(Debug, Clone, Copy)]
pub struct CreatureStats {
    pub health: i32,
    pub speed: i32,
    pub strength: i32,
    /// Vision/aggro radius, and how long a chosen direction is committed
    pub light_radius: i32,
    pub range: i32,
    /// Ticks between attacks (and between hero interactions)
    pub cooldown: i32,
}

/// A creature: a placed object plus health, perception, and behavior state.
#[derive(Debug, Clone)]
pub struct Creature {
    pub body: GameObject,
    pub brain: Brain,
    pub health: i32,
    /// Health at full; the health bar draws the proportion
    pub health_total: i32,
    pub speed: i32,
    pub strength: i32,
    pub light_radius: i32,
    pub hostile: bool,
    pub stationary: bool,
    pub roaming: bool,
    /// Set by the level for hostile creatures once the hero is known
    pub has_target: bool,
    pub cooldown: i32,
    pub cooldown_total: i32,
    pub facing: Facing,
    /// Where the creature wants to be after this tick
    pub intended_x: i32,
    pub intended_y: i32,
    /// Hero only: the interact key fired this tick
    pub intended_interact: bool,
    /// Set by an attack, harvested and cleared by the level every tick
    pub hitbox: Option<Hitbox>,
    last_direction: (i32, i32),
    last_speed: i32,
    change_countdown: i32,
}

impl Creature {
    /// Creates a hostile, roaming AI creature at the origin.
    pub fn new(symbol: char, description: impl Into<String>, stats: CreatureStats) -> Self {
        Self {
            body: GameObject::new(symbol, description).range(stats.range),
            brain: Brain::Ai,
            health: stats.health,
            health_total: stats.health,
            speed: stats.speed,
            strength: stats.strength,
            light_radius: stats.light_radius,
            hostile: true,
            stationary: false,
            roaming: true,
            has_target: false,
            cooldown: 0,
            cooldown_total: stats.cooldown,
            facing: Facing::default(),
            intended_x: 0,
            intended_y: 0,
            intended_interact: false,
            hitbox: None,
            last_direction: (0, 0),
            last_speed: 1,
            change_countdown: 0,
        }
    }

    /// Creates the player-controlled hero.
    pub fn hero() -> Self {
        let mut hero = Self::new(
            '@',
            "you",
            CreatureStats {
                health: 100,
                speed: 3,
                strength: 3,
                light_radius: 30,
                range: 10,
                cooldown: 3,
            },
        )
        .with_id(HERO_ID)
        .hostile(false)
        .roaming(false);
        hero.brain = Brain::Player;
        hero
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.body.id = Some(id);
        self
    }

    pub fn hostile(mut self, hostile: bool) -> Self {
        self.hostile = hostile;
        self
    }

    pub fn stationary(mut self, stationary: bool) -> Self {
        self.stationary = stationary;
        self
    }

    pub fn roaming(mut self, roaming: bool) -> Self {
        self.roaming = roaming;
        self
    }

    pub fn go_through(mut self, go_through: bool) -> Self {
        self.body.go_through = go_through;
        self
    }

    pub fn interaction(mut self, interaction: Interaction) -> Self {
        self.body.interaction = interaction;
        self
    }

    pub fn dead(&self) -> bool {
        self.health <= 0
    }

    /// Applies one hitbox's damage.
    pub fn be_attacked(&mut self, strength: i32) {
        self.health -= strength;
    }

    /// Places the creature, resetting its intent to the new position.
    pub fn set_location(&mut self, x: i32, y: i32) {
        self.body.set_location(x, y);
        self.intended_x = x;
        self.intended_y = y;
    }

    /// Runs one AI tick. `target` is the hero's bounding rect, present only
    /// if the level has assigned the hero as this creature's target.
    ///
    /// Death is *not* checked here: the level tests [`Creature::dead`] before
    /// calling update and removes the creature instead.
    pub fn update_ai<R: Rng + ?Sized>(&mut self, target: Option<Rect>, rng: &mut R) {
        self.tick_cooldown();
        if self.stationary {
            return;
        }
        if self.hostile {
            if let Some(t) = target {
                if self.body.within_range(t) {
                    let (dx, dy) = self.direction_toward(t.left, t.bottom);
                    self.facing.set_from_step(dx, dy);
                    self.attack();
                    return;
                }
                if self.body.within_distance(t, self.light_radius) {
                    self.chase(t);
                    return;
                }
            }
        }
        if self.roaming {
            self.roam(rng);
        }
    }

    /// Runs one hero tick driven by the key-state capability.
    ///
    /// The four directional keys combine freely, so diagonals are just two
    /// keys held at once. Interact is edge-triggered through the shared
    /// cooldown; attack is throttled by the same cooldown inside `attack`.
    pub fn update_player(&mut self, input: &dyn InputState) {
        self.tick_cooldown();
        self.intended_interact = false;

        let mut horizontal = None;
        let mut vertical = None;
        if input.is_down(Control::North) {
            self.intended_y = self.body.y + self.speed;
            vertical = Some(Vertical::North);
        }
        if input.is_down(Control::South) {
            self.intended_y = self.body.y - self.speed;
            vertical = Some(Vertical::South);
        }
        if input.is_down(Control::West) {
            self.intended_x = self.body.x - self.speed;
            horizontal = Some(Horizontal::West);
        }
        if input.is_down(Control::East) {
            self.intended_x = self.body.x + self.speed;
            horizontal = Some(Horizontal::East);
        }
        if horizontal.is_some() || vertical.is_some() {
            self.facing = Facing {
                horizontal,
                vertical,
            };
        }

        if input.is_down(Control::Interact) && self.cooldown == 0 {
            self.intended_interact = true;
            self.cooldown = self.cooldown_total;
        }
        if input.is_down(Control::Attack) {
            self.attack();
        }
    }

    /// Attempts an attack: no-op while cooling down, otherwise resets the
    /// cooldown, cancels this tick's movement, and spawns a hitbox just
    /// outside the bounding box on the facing side.
    pub fn attack(&mut self) {
        if self.cooldown > 0 {
            return;
        }
        self.cooldown = self.cooldown_total;
        self.intended_x = self.body.x;
        self.intended_y = self.body.y;
        self.hitbox = Some(self.make_hitbox());
    }

    fn make_hitbox(&self) -> Hitbox {
        let size = self.body.range;
        let mut x = self.body.x;
        let mut y = self.body.y;
        match self.facing.horizontal {
            Some(Horizontal::East) => x += self.body.w + HITBOX_GAP,
            Some(Horizontal::West) => x -= size + HITBOX_GAP,
            None => {}
        }
        match self.facing.vertical {
            Some(Vertical::North) => y += self.body.h + HITBOX_GAP,
            Some(Vertical::South) => y -= size + HITBOX_GAP,
            None => {}
        }
        Hitbox::new(
            Rect::from_dimensions(x, y, size, size),
            self.strength,
            self.body.uid,
        )
    }

    /// Chases the target: commits to the step direction toward it for
    /// `light_radius` ticks and moves at full speed toward its position.
    fn chase(&mut self, target: Rect) {
        let (dx, dy) = self.direction_toward(target.left, target.bottom);
        self.set_last_direction(dx, dy, self.speed);
        self.move_towards(target.left, target.bottom);
    }

    /// Roams: keeps a committed direction while the countdown runs, with a
    /// small chance of re-rolling a new one, always at unit step speed.
    fn roam<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.change_countdown -= 1;
        if self.change_countdown <= 0 && rng.gen_bool(ROAM_RATE) {
            let dx = ROAM_STEPS.choose(rng).copied().unwrap_or(0);
            let dy = ROAM_STEPS.choose(rng).copied().unwrap_or(0);
            self.set_last_direction(dx, dy, 1);
        }
        let (dx, dy) = self.last_direction;
        self.move_towards(
            self.body.x + dx * self.last_speed,
            self.body.y + dy * self.last_speed,
        );
    }

    fn set_last_direction(&mut self, dx: i32, dy: i32, speed: i32) {
        self.last_direction = (dx, dy);
        self.last_speed = speed;
        self.change_countdown = self.light_radius;
        self.facing.set_from_step(dx, dy);
    }

    fn direction_toward(&self, x: i32, y: i32) -> (i32, i32) {
        ((x - self.body.x).signum(), (y - self.body.y).signum())
    }

    /// Records the intent to move toward `(x, y)`, at most `speed` cells on
    /// each axis this tick.
    fn move_towards(&mut self, x: i32, y: i32) {
        let step_x = (x - self.body.x).abs().min(self.speed) * (x - self.body.x).signum();
        let step_y = (y - self.body.y).abs().min(self.speed) * (y - self.body.y).signum();
        self.intended_x = self.body.x + step_x;
        self.intended_y = self.body.y + step_y;
    }

    /// All grid cells between the current and intended position, nearest the
    /// intended position first.
    ///
    /// This is a full 2D sweep over both axis spans, not the direct line:
    /// the movement resolver takes the first valid cell, so a creature moving
    /// faster than one cell per tick can never tunnel through an obstacle.
    pub fn candidate_cells(&self) -> Vec<(i32, i32)> {
        let xs = span_from(self.intended_x, self.body.x);
        let ys = span_from(self.intended_y, self.body.y);
        let mut cells = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                cells.push((x, y));
            }
        }
        cells
    }

    fn tick_cooldown(&mut self) {
        self.cooldown = (self.cooldown - 1).max(0);
    }
}

/// Inclusive integer span walking from `first` to `last`.
fn span_from(first: i32, last: i32) -> Vec<i32> {
    if first <= last {
        (first..=last).collect()
    } else {
        (last..=first).rev().collect()
    }
}
