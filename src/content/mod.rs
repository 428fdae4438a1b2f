//! # Shipped Levels
//!
//! Hand-authored level content. Every public function here is a
//! [`LevelFactory`]: it assembles a [`LevelBlueprint`] from explicit rooms,
//! magnetic pathways, objects, creatures, and triggers, and the controller
//! instantiates it when the hero arrives.
//!
//! Content defects (rooms laid out so no corridor fits, watched ids that
//! resolve to nothing) surface as errors from the factory or from level
//! build, never at some later tick.

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::game::{
    Creature, CreatureStats, GameObject, Interaction, LevelFactory, ObjectId, Signal, Trigger,
    TriggerCondition, WatchSnapshot, ASCEND_STAIRS_ID, HERO_ID,
};
use crate::generation::{self, GrowthConfig, LevelBlueprint, Pathway, PathwayId, Room};
use crate::geometry::Rect;
use crate::DelveResult;
use rand::RngCore;

/// Designer id of the stairs leading down.
const DESC_STAIRS_ID: ObjectId = 2;
/// Designer id shared by the guardian wolves.
const WOLF_ID: ObjectId = 3;
/// Designer id of the hidden-door lever.
const LEVER_ID: ObjectId = 4;
/// Pathway id of the sealed corridor into the east wing.
const SECRET_PATHWAY: PathwayId = 3;

/// The shipped level sequence, first level first.
pub fn campaign() -> Vec<LevelFactory> {
    vec![tutorial, maze, caverns]
}

fn wolf() -> Creature {
    Creature::new(
        'W',
        "guardian wolf",
        CreatureStats {
            health: 1000,
            speed: 2,
            strength: 500,
            light_radius: 60,
            range: 10,
            cooldown: 10,
        },
    )
    .with_id(WOLF_ID)
    .interaction(Interaction::message(
        "This wolf is too busy trying to kill you",
    ))
}

fn holy_swordsman() -> Creature {
    Creature::new(
        'H',
        "holy swordsman",
        CreatureStats {
            health: 4000,
            speed: 2,
            strength: 2000,
            light_radius: 30,
            range: 10,
            cooldown: 10,
        },
    )
    .interaction(Interaction::message("Holy swordsman: Die monster!"))
}

fn ascending_stairs() -> GameObject {
    GameObject::new('<', "ascending stairs")
        .id(ASCEND_STAIRS_ID)
        .go_through(true)
        .interaction(Interaction::Emit(Signal::PreviousLevel))
}

fn descending_stairs() -> GameObject {
    GameObject::new('>', "descending stairs")
        .id(DESC_STAIRS_ID)
        .go_through(true)
        .interaction(Interaction::Emit(Signal::NextLevel))
}

fn boulder() -> GameObject {
    GameObject::new('O', "large boulder blocking the stairs")
        .range(5)
        .interaction(Interaction::message("You will deal with this later"))
}

fn hero_sees_lever(watched: &[WatchSnapshot]) -> bool {
    watched[0].sees(&watched[1])
}

fn any_wolf_dead(watched: &[WatchSnapshot]) -> bool {
    watched.iter().any(|w| w.dead)
}

/// The first level: a guided tour past wolves, levers, and a holy ambush.
///
/// The stairs down sit in the east wing, whose only corridor is revealed by
/// a lever and sealed again behind the hero by the swordsmen. The way back
/// up gets blocked by a boulder the moment the hero steps away from it.
pub fn tutorial(rng: &mut dyn RngCore) -> DelveResult<LevelBlueprint> {
    let hall = Room::new(50, 50, 100, 100).start();
    let den = Room::new(300, 200, 100, 150).creatures((0..6).map(|_| wolf()).collect());
    let kennel = Room::new(50, 220, 100, 100).creatures(vec![wolf()]);
    let east_wing = Room::new(335, 50, 40, 77)
        .objects(vec![descending_stairs()])
        .creatures(vec![holy_swordsman(), holy_swordsman(), holy_swordsman()]);

    let p1 = Pathway::magnetic(&hall, &kennel, rng)?;
    let p2 = Pathway::magnetic(&den, &kennel, rng)?;
    // Not part of the initial layout: the lever adds it, a trigger removes it.
    let secret = Pathway::magnetic(&den, &east_wing, rng)?.with_id(SECRET_PATHWAY);

    let lever = GameObject::new('L', "lever")
        .id(LEVER_ID)
        .go_through(true)
        .range(5)
        .at(389, 210)
        .interaction(Interaction::once(Signal::List(vec![
            Signal::AddPathway(secret),
            Signal::message("A secret door opens"),
        ])));
    let ruined_lever = GameObject::new('L', "lever")
        .go_through(true)
        .range(5)
        .at(365, 60)
        .interaction(Interaction::message("It is ruined"));

    let triggers = vec![
        Trigger::run_once(
            Signal::Replace {
                target: ASCEND_STAIRS_ID,
                with: boulder,
            },
            TriggerCondition::HeroInRegion(Rect::from_dimensions(144, 100, 10, 10)),
        ),
        Trigger::run_once(
            Signal::message("Move with WASD or the arrow keys"),
            TriggerCondition::HeroInRegion(Rect::from_dimensions(144, 100, 10, 10)),
        ),
        Trigger::run_once(
            Signal::message("Attack with Space; you strike the way you face"),
            TriggerCondition::HeroInRegion(Rect::from_dimensions(50, 200, 100, 10)),
        ),
        Trigger::run_once(
            Signal::message("A scroll tumbles from the wolf's pelt: 'The lever opens the way'"),
            TriggerCondition::Watch {
                ids: vec![WOLF_ID],
                predicate: any_wolf_dead,
            },
        ),
        Trigger::run_once(
            Signal::message("Press E to interact with what you can reach"),
            TriggerCondition::Watch {
                ids: vec![HERO_ID, LEVER_ID],
                predicate: hero_sees_lever,
            },
        ),
        Trigger::run_once(
            Signal::message("?????: Hold him!"),
            TriggerCondition::HeroInRegion(Rect::from_dimensions(350, 190, 100, 10)),
        ),
        Trigger::run_once(
            Signal::List(vec![
                Signal::message("Holy swordsman: Seal the exit!"),
                Signal::RemovePathway(SECRET_PATHWAY),
            ]),
            TriggerCondition::HeroInRegion(Rect::from_dimensions(350, 120, 100, 10)),
        ),
    ];

    Ok(
        LevelBlueprint::new(vec![hall, den, kennel, east_wing], vec![p1, p2])
            .objects(vec![
                ascending_stairs().at(130, 90),
                GameObject::new('C', "treasure chest")
                    .go_through(true)
                    .range(5)
                    .at(100, 100)
                    .interaction(Interaction::message("It's empty")),
                lever,
                ruined_lever,
            ])
            .triggers(triggers),
    )
}

/// The second level: an empty twelve-room maze.
pub fn maze(rng: &mut dyn RngCore) -> DelveResult<LevelBlueprint> {
    let rooms = vec![
        Room::new(335, 54, 65, 119).start(),
        Room::new(192, 58, 52, 37),
        Room::new(53, 142, 61, 42),
        Room::new(65, 24, 56, 38),
        Room::new(468, 96, 57, 42),
        Room::new(344, 302, 62, 49),
        Room::new(512, 310, 49, 46),
        Room::new(198, 241, 52, 115),
        Room::new(51, 325, 71, 36),
        Room::new(51, 251, 83, 28),
        Room::new(510, 213, 54, 42),
        Room::new(304, 234, 29, 40),
    ];
    let joins = [
        (0, 1),
        (0, 2),
        (3, 2),
        (0, 4),
        (0, 5),
        (5, 6),
        (5, 7),
        (7, 8),
        (8, 9),
        (6, 10),
        (7, 11),
    ];
    let mut pathways = Vec::with_capacity(joins.len());
    for (a, b) in joins {
        pathways.push(Pathway::magnetic(&rooms[a], &rooms[b], rng)?);
    }
    Ok(LevelBlueprint::new(rooms, pathways)
        .objects(vec![ascending_stairs(), descending_stairs()]))
}

/// The last level: a randomly grown cavern layout with both stairs placed
/// on the open floor.
pub fn caverns(rng: &mut dyn RngCore) -> DelveResult<LevelBlueprint> {
    let bounds = Rect::from_dimensions(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT - 40);
    let blueprint = generation::layout::generate(&GrowthConfig::new(bounds), rng)?;
    Ok(blueprint.objects(vec![ascending_stairs(), descending_stairs()]))
}
