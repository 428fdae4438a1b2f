//! The outer game controller.
//!
//! Owns the live [`Level`], the ordered list of level factories, and the
//! rolling message log. Levels raise [`Transition`] values out of their
//! update; the controller is the only place that acts on them, tearing the
//! old level down and carrying the hero into the next one.

use crate::game::{Creature, Level, Transition};
use crate::generation::LevelBlueprint;
use crate::input::InputState;
use crate::{DelveError, DelveResult};
use rand::{Rng, RngCore};

/// Builds one level's content bundle. Content modules provide these; the
/// controller runs them lazily as the hero moves through the sequence.
pub type LevelFactory = fn(&mut dyn RngCore) -> DelveResult<LevelBlueprint>;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The hero descended past the last level
    Victory,
    /// The hero died
    Defeat,
}

/// A running game: the current level plus everything that outlives it.
#[derive(Debug)]
pub struct GameState {
    levels: Vec<LevelFactory>,
    current: usize,
    pub level: Level,
    /// Full message history, oldest first; the renderer shows the tail
    pub messages: Vec<String>,
}

impl GameState {
    /// Starts a new game on the first level with a fresh hero.
    pub fn new<R: Rng>(levels: Vec<LevelFactory>, rng: &mut R) -> DelveResult<GameState> {
        let first = *levels
            .first()
            .ok_or_else(|| DelveError::InvalidContent("no levels".to_string()))?;
        let blueprint = first(rng)?;
        let level = Level::build(blueprint, Creature::hero(), rng)?;
        Ok(GameState {
            levels,
            current: 0,
            level,
            messages: vec!["You descend into the dark.".to_string()],
        })
    }

    /// Zero-based index of the level the hero is on.
    pub fn current_level(&self) -> usize {
        self.current
    }

    /// Runs one game tick. `Some` ends the game; rebuilding levels can fail,
    /// which is a content defect and aborts the game loop.
    pub fn update<R: Rng>(
        &mut self,
        input: &dyn InputState,
        rng: &mut R,
    ) -> DelveResult<Option<GameOutcome>> {
        let transition = self.level.update(input, rng);
        self.messages.append(&mut self.level.drain_messages());
        match transition {
            Some(t) => self.apply_transition(t, rng),
            None => Ok(None),
        }
    }

    fn apply_transition<R: Rng>(
        &mut self,
        transition: Transition,
        rng: &mut R,
    ) -> DelveResult<Option<GameOutcome>> {
        match transition {
            Transition::GameOver { defeat: true } => Ok(Some(GameOutcome::Defeat)),
            Transition::GameOver { defeat: false } => Ok(Some(GameOutcome::Victory)),
            Transition::NextLevel => {
                if self.current + 1 >= self.levels.len() {
                    // Past the last level, the hero has escaped.
                    return Ok(Some(GameOutcome::Victory));
                }
                self.enter(self.current + 1, rng)?;
                self.messages.push("You descend deeper.".to_string());
                Ok(None)
            }
            Transition::PreviousLevel => {
                if self.current == 0 {
                    self.messages
                        .push("The way back is buried in rubble.".to_string());
                    return Ok(None);
                }
                self.enter(self.current - 1, rng)?;
                self.messages.push("You climb back up.".to_string());
                Ok(None)
            }
        }
    }

    /// Rebuilds `self.level` from the factory at `index`, moving the hero
    /// over with its health, cooldown, and facing intact.
    fn enter<R: Rng>(&mut self, index: usize, rng: &mut R) -> DelveResult<()> {
        let hero = self
            .level
            .take_hero()
            .ok_or_else(|| DelveError::InvalidContent("level has no hero".to_string()))?;
        let blueprint = (self.levels[index])(rng)?;
        log::info!("entering level {index}");
        self.level = Level::build(blueprint, hero, rng)?;
        self.current = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Room;
    use crate::input::KeySet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_floor(_rng: &mut dyn RngCore) -> DelveResult<LevelBlueprint> {
        Ok(LevelBlueprint::new(
            vec![Room::new(50, 50, 200, 200).start()],
            Vec::new(),
        ))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(404)
    }

    #[test]
    fn new_game_starts_on_the_first_level_with_a_hero() {
        let mut rng = rng();
        let state = GameState::new(vec![open_floor, open_floor], &mut rng).unwrap();
        assert_eq!(state.current_level(), 0);
        assert!(state.level.hero().is_some());
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn no_levels_is_a_content_defect() {
        let mut rng = rng();
        let err = GameState::new(Vec::new(), &mut rng).unwrap_err();
        assert!(matches!(err, DelveError::InvalidContent(_)));
    }

    #[test]
    fn descending_carries_the_same_hero() {
        let mut rng = rng();
        let mut state = GameState::new(vec![open_floor, open_floor], &mut rng).unwrap();
        let uid = state.level.hero().unwrap().body.uid;
        state.level.hero_mut().unwrap().health = 42;

        let outcome = state
            .apply_transition(Transition::NextLevel, &mut rng)
            .unwrap();
        assert!(outcome.is_none());
        assert_eq!(state.current_level(), 1);
        let hero = state.level.hero().unwrap();
        assert_eq!(hero.body.uid, uid);
        assert_eq!(hero.health, 42);
    }

    #[test]
    fn descending_past_the_last_level_wins() {
        let mut rng = rng();
        let mut state = GameState::new(vec![open_floor], &mut rng).unwrap();
        let outcome = state
            .apply_transition(Transition::NextLevel, &mut rng)
            .unwrap();
        assert_eq!(outcome, Some(GameOutcome::Victory));
    }

    #[test]
    fn ascending_from_the_first_level_is_blocked() {
        let mut rng = rng();
        let mut state = GameState::new(vec![open_floor, open_floor], &mut rng).unwrap();
        let before = state.messages.len();
        let outcome = state
            .apply_transition(Transition::PreviousLevel, &mut rng)
            .unwrap();
        assert!(outcome.is_none());
        assert_eq!(state.current_level(), 0);
        assert_eq!(state.messages.len(), before + 1);
        assert!(state.level.hero().is_some());
    }

    #[test]
    fn hero_death_reports_defeat() {
        let mut rng = rng();
        let mut state = GameState::new(vec![open_floor], &mut rng).unwrap();
        state.level.hero_mut().unwrap().health = 0;
        let input = KeySet::new();
        let outcome = state.update(&input, &mut rng).unwrap();
        assert_eq!(outcome, Some(GameOutcome::Defeat));
    }
}
