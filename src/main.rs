//! Flappy Sim headless driver
//!
//! Runs the engine on a synthetic 16 ms frame clock with a simple autopilot
//! and prints the final state as JSON.
//!
//! Usage: `flappy-sim [seed] [frames]`

use std::cell::RefCell;
use std::rc::Rc;

use flappy_sim::audio::create_audio_controller;
use flappy_sim::consts::*;
use flappy_sim::persistence::JsonFileStorage;
use flappy_sim::sim::{GameState, Obstacle};
use flappy_sim::timing::ManualScheduler;
use flappy_sim::{Engine, EngineOptions, GamePhase, InputAction};

const DEFAULT_FRAMES: u64 = 60 * 60;
const FRAME_MS: f64 = (MIN_DELTA * 1000.0) as f64;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let storage_path = std::env::temp_dir().join("flappy-sim-prefs.json");
    let storage = JsonFileStorage::open_or_empty(storage_path);
    let scheduler = ManualScheduler::new();

    let mut engine = Engine::new(
        EngineOptions { rng_seed: seed },
        Box::new(storage),
        Box::new(scheduler.clone()),
    );
    let audio_enabled = engine.state().audio_enabled;
    engine.set_audio_controller(create_audio_controller(audio_enabled));
    log::info!("Flappy Sim (headless) starting, seed {}", engine.seed());

    engine.subscribe_selected(
        |s: &GameState| s.phase,
        |phase: &GamePhase| log::info!("Phase -> {}", phase.as_str()),
    );
    engine.subscribe_selected(
        |s: &GameState| s.score,
        |score: &u64| log::debug!("Score {score}"),
    );

    let deaths = Rc::new(RefCell::new(0u32));
    let counter = Rc::clone(&deaths);
    engine.subscribe_selected(
        |s: &GameState| s.phase == GamePhase::GameOver,
        move |over: &bool| {
            if *over {
                *counter.borrow_mut() += 1;
            }
        },
    );

    engine.dispatch(InputAction::Start);

    let mut timestamp = 0.0;
    for _ in 0..frames {
        if !scheduler.take() {
            break;
        }
        timestamp += FRAME_MS;
        engine.handle_frame(timestamp);

        let state = engine.state();
        if state.phase == GamePhase::GameOver {
            break;
        }
        if should_flap(&state) {
            engine.dispatch(InputAction::Flap);
        }
    }
    engine.stop();

    let state = engine.state();
    log::info!(
        "Run finished: score {}, best {}, {:.1}s simulated, {} game over(s)",
        state.score,
        state.best_score,
        state.elapsed_ms / 1000.0,
        deaths.borrow()
    );
    match serde_json::to_string_pretty(&*state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {e}"),
    }
}

/// Flap when falling below the target height of the next unpassed gap
fn should_flap(state: &GameState) -> bool {
    let body = &state.body;
    let target = next_gap(&state.world.pipes, body.position.x)
        .map(|pipe| pipe.gap_center_y + PIPE_GAP / 6.0)
        .unwrap_or(PLAYFIELD_BOTTOM / 2.0);
    body.velocity.y > 0.0 && body.position.y > target
}

fn next_gap(pipes: &[Obstacle], body_x: f32) -> Option<&Obstacle> {
    pipes
        .iter()
        .find(|pipe| pipe.right() + BODY_WIDTH / 2.0 > body_x)
}
