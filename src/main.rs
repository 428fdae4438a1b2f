//! # Delve Main Entry Point
//!
//! Parses the command line, sets up logging and the macroquad window, and
//! runs the fixed-timestep game loop.

use clap::Parser;
use delve::config::{TICK_INTERVAL, WINDOW_HEIGHT, WINDOW_WIDTH};
use delve::game::{GameOutcome, GameState, LevelFactory};
use delve::input::Keyboard;
use delve::rendering::Display;
use delve::{content, DelveError, DelveResult};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

/// Command line arguments for delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A small 2D roguelike of rooms, wolves, and one important lever")]
#[command(version)]
struct Args {
    /// Random seed for level generation and creature behavior
    #[arg(short, long)]
    seed: Option<u64>,

    /// Zero-based campaign level to start on
    #[arg(short, long, default_value_t = 0)]
    level: usize,

    /// Play a single randomly grown cavern instead of the campaign
    #[arg(long)]
    random: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Delve".to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> DelveResult<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    log::info!("starting delve v{}", delve::VERSION);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let levels: Vec<LevelFactory> = if args.random {
        vec![content::caverns]
    } else {
        let campaign = content::campaign();
        if args.level >= campaign.len() {
            return Err(DelveError::InvalidContent(format!(
                "no level {} (campaign has {})",
                args.level,
                campaign.len()
            )));
        }
        campaign[args.level..].to_vec()
    };

    let keyboard = Keyboard::new();
    let display = Display::new();
    let mut state = GameState::new(levels.clone(), &mut rng)?;
    let mut outcome: Option<GameOutcome> = None;
    let mut accumulator = 0.0_f32;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            log::info!("player quit");
            break;
        }

        match outcome {
            Some(finished) => {
                display.render_outcome(finished);
                if is_key_pressed(KeyCode::Enter) {
                    log::info!("restarting");
                    state = GameState::new(levels.clone(), &mut rng)?;
                    accumulator = 0.0;
                    outcome = None;
                }
            }
            None => {
                // Fixed-timestep simulation decoupled from the frame rate.
                accumulator += get_frame_time();
                while accumulator >= TICK_INTERVAL {
                    accumulator -= TICK_INTERVAL;
                    if let Some(finished) = state.update(&keyboard, &mut rng)? {
                        log::info!("game over: {finished:?}");
                        outcome = Some(finished);
                        break;
                    }
                }
                display.render(&state);
            }
        }

        next_frame().await;
    }

    Ok(())
}
