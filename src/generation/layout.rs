//! # Procedural Growth Layout
//!
//! A secondary generator for random dungeons: grows a connected layout
//! outward from a starting room, attaching each new room to an existing one
//! on a random side and joining the pair with a magnetic pathway.
//!
//! Shipped level content uses explicit room lists instead; this mode backs
//! the `--random` flag of the binary.

use crate::config::WALL_UNIT;
use crate::generation::{LevelBlueprint, Pathway, Room, PATHWAY_THICKNESS};
use crate::geometry::Rect;
use crate::{DelveError, DelveResult};
use rand::Rng;

/// Parameters for the growth generator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GrowthConfig {
    /// World bounds every room must fit inside
    pub bounds: Rect,
    pub min_rooms: u32,
    pub max_rooms: u32,
    /// Floor size range per room, both axes
    pub min_size: i32,
    pub max_size: i32,
    /// Attempt budget per room before the layout is declared unplaceable
    pub max_attempts: u32,
}

impl GrowthConfig {
    /// Layout sized for the default window.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            min_rooms: 5,
            max_rooms: 8,
            min_size: 40,
            max_size: 100,
            max_attempts: 400,
        }
    }

    /// Smaller, denser layouts for tests.
    pub fn for_testing(bounds: Rect) -> Self {
        Self {
            bounds,
            min_rooms: 3,
            max_rooms: 5,
            min_size: 40,
            max_size: 70,
            max_attempts: 200,
        }
    }
}

/// The four sides a new room can attach to.
#[derive(Debug, Clone, Copy)]
enum Side {
    East,
    West,
    North,
    South,
}

const SIDES: [Side; 4] = [Side::East, Side::West, Side::North, Side::South];

/// Generates a connected room/pathway layout.
///
/// Each room after the first is attached to a uniformly chosen existing room
/// with a corridor-wide floor overlap on the shared axis, so the magnetic
/// connection always exists. Exhausting the per-room attempt budget is a
/// fatal [`DelveError::Unplaceable`], the same defect class as entity
/// placement running dry.
pub fn generate<R: Rng + ?Sized>(config: &GrowthConfig, rng: &mut R) -> DelveResult<LevelBlueprint> {
    let room_count = rng.gen_range(config.min_rooms..=config.max_rooms);

    let mut rooms: Vec<Room> = Vec::with_capacity(room_count as usize);
    let mut pathways: Vec<Pathway> = Vec::new();

    let first = sample_start_room(config, rng)?;
    rooms.push(first.start());

    for index in 1..room_count {
        let (room, parent) = grow_room(config, &rooms, index, rng)?;
        let pathway = Pathway::magnetic(&rooms[parent], &room, rng)?;
        log::debug!(
            "grew room {} off room {} via {} pathway",
            index,
            parent,
            if pathway.horizontal { "horizontal" } else { "vertical" }
        );
        pathways.push(pathway);
        rooms.push(room);
    }

    Ok(LevelBlueprint::new(rooms, pathways))
}

fn sample_start_room<R: Rng + ?Sized>(config: &GrowthConfig, rng: &mut R) -> DelveResult<Room> {
    for _ in 0..config.max_attempts {
        let w = rng.gen_range(config.min_size..=config.max_size);
        let h = rng.gen_range(config.min_size..=config.max_size);
        let span_x = config.bounds.width() - w - 2 * WALL_UNIT;
        let span_y = config.bounds.height() - h - 2 * WALL_UNIT;
        if span_x <= 0 || span_y <= 0 {
            continue;
        }
        let x = config.bounds.left + rng.gen_range(0..=span_x);
        let y = config.bounds.bottom + rng.gen_range(0..=span_y);
        return Ok(Room::new(x, y, w, h));
    }
    Err(DelveError::Unplaceable {
        what: "start room".to_string(),
        attempts: config.max_attempts,
    })
}

/// Tries to place one new room attached to any existing room.
fn grow_room<R: Rng + ?Sized>(
    config: &GrowthConfig,
    rooms: &[Room],
    index: u32,
    rng: &mut R,
) -> DelveResult<(Room, usize)> {
    for _ in 0..config.max_attempts {
        let parent_index = rng.gen_range(0..rooms.len());
        let parent = &rooms[parent_index];
        let side = SIDES[rng.gen_range(0..SIDES.len())];
        let w = rng.gen_range(config.min_size..=config.max_size);
        let h = rng.gen_range(config.min_size..=config.max_size);
        let gap = rng.gen_range(2 * WALL_UNIT..=6 * WALL_UNIT);

        let candidate = match side {
            Side::East => attach_horizontal(parent, parent.outer.right + gap, w, h, rng),
            Side::West => {
                attach_horizontal(parent, parent.outer.left - gap - w - 2 * WALL_UNIT, w, h, rng)
            }
            Side::North => attach_vertical(parent, parent.outer.top + gap, w, h, rng),
            Side::South => {
                attach_vertical(parent, parent.outer.bottom - gap - h - 2 * WALL_UNIT, w, h, rng)
            }
        };
        let Some(candidate) = candidate else {
            continue;
        };

        if !config.bounds.contains(&candidate.outer) {
            continue;
        }
        if rooms.iter().any(|r| r.outer.overlaps(&candidate.outer)) {
            continue;
        }
        return Ok((candidate, parent_index));
    }
    Err(DelveError::Unplaceable {
        what: format!("room {index}"),
        attempts: config.max_attempts,
    })
}

/// Places a room at outer-x `x`, sampling a y that leaves at least a
/// corridor-thick floor overlap with the parent.
fn attach_horizontal<R: Rng + ?Sized>(
    parent: &Room,
    x: i32,
    w: i32,
    h: i32,
    rng: &mut R,
) -> Option<Room> {
    let lo = parent.inner.bottom - (h - PATHWAY_THICKNESS);
    let hi = parent.inner.top - PATHWAY_THICKNESS;
    if hi < lo {
        return None;
    }
    let inner_bottom = rng.gen_range(lo..=hi);
    Some(Room::new(x, inner_bottom - WALL_UNIT, w, h))
}

fn attach_vertical<R: Rng + ?Sized>(
    parent: &Room,
    y: i32,
    w: i32,
    h: i32,
    rng: &mut R,
) -> Option<Room> {
    let lo = parent.inner.left - (w - PATHWAY_THICKNESS);
    let hi = parent.inner.right - PATHWAY_THICKNESS;
    if hi < lo {
        return None;
    }
    let inner_left = rng.gen_range(lo..=hi);
    Some(Room::new(inner_left - WALL_UNIT, y, w, h))
}
