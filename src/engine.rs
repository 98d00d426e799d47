//! Simulation engine
//!
//! Owns the canonical [`GameState`], runs the phase state machine, advances
//! the simulation once per frame, and publishes every committed state to
//! subscribers. Collaborators (audio, storage, frame scheduling) are injected
//! and only reached through their traits.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::audio::AudioController;
use crate::consts::{AUDIO_ENABLED_KEY, BEST_SCORE_KEY};
use crate::persistence::{self, Storage};
use crate::sim::{
    AudioEffect, GamePhase, GameState, InputAction, SimRng, apply_impulse, bounding_box,
    detect_boundary_collision, detect_obstacle_collisions, integrate, world,
};
use crate::timing::{FrameClock, FrameScheduler, clamp_delta};

/// Runtime options
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Seed for obstacle placement; wall-clock time when unset
    pub rng_seed: Option<u64>,
}

/// Handle returned by [`Engine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&GameState)>;

pub struct Engine {
    state: Rc<GameState>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    rng: SimRng,
    clock: FrameClock,
    scheduler: Box<dyn FrameScheduler>,
    running: bool,
    audio: Option<Box<dyn AudioController>>,
    audio_primed: bool,
    storage: Box<dyn Storage>,
    /// Best score as last written to storage
    stored_best: u64,
}

impl Engine {
    pub fn new(
        options: EngineOptions,
        storage: Box<dyn Storage>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Self {
        let best_score = persistence::read_number(storage.as_ref(), BEST_SCORE_KEY, 0);
        let audio_enabled = persistence::read_bool(storage.as_ref(), AUDIO_ENABLED_KEY, true);
        let seed = options.rng_seed.unwrap_or_else(wall_clock_seed);
        log::info!("Engine created (seed {seed}, best {best_score}, audio {audio_enabled})");

        Self {
            state: Rc::new(GameState::new(best_score, audio_enabled)),
            subscribers: Vec::new(),
            next_subscription: 0,
            rng: SimRng::new(seed),
            clock: FrameClock::new(),
            scheduler,
            running: false,
            audio: None,
            audio_primed: false,
            storage,
            stored_best: best_score,
        }
    }

    /// Current snapshot. A new `Rc` is installed on every transition.
    pub fn state(&self) -> Rc<GameState> {
        Rc::clone(&self.state)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Whether the frame loop is currently requesting frames
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Register a listener; it is called with the current state right away
    /// and after every committed transition, in subscription order.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&GameState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        listener(self.state.as_ref());
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Listen to a derived value; `on_change` fires immediately and then only
    /// when the selected value changes.
    pub fn subscribe_selected<T, S, F>(&mut self, selector: S, mut on_change: F) -> SubscriptionId
    where
        T: PartialEq + 'static,
        S: Fn(&GameState) -> T + 'static,
        F: FnMut(&T) + 'static,
    {
        let mut last: Option<T> = None;
        self.subscribe(move |state| {
            let next = selector(state);
            if last.as_ref() != Some(&next) {
                on_change(&next);
                last = Some(next);
            }
        })
    }

    /// Stop delivery to a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Install the audio collaborator and push the current preference to it
    pub fn set_audio_controller(&mut self, mut controller: Box<dyn AudioController>) {
        controller.set_enabled(self.state.audio_enabled);
        self.audio = Some(controller);
        self.audio_primed = false;
    }

    /// Begin requesting frames
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.scheduler.request_frame();
        }
    }

    /// Stop requesting frames and forget the frame timing reference
    pub fn stop(&mut self) {
        self.halt_frames();
        self.clock.reset();
    }

    /// Frame callback: derive the delta from `timestamp` (ms), step, and
    /// request the next frame while running.
    pub fn handle_frame(&mut self, timestamp: f64) {
        if !self.running {
            return;
        }
        let delta = self.clock.tick(timestamp);
        self.step(delta);
        if self.running {
            self.scheduler.request_frame();
        }
    }

    /// Apply an input action. Actions that do not apply to the current phase
    /// are ignored.
    pub fn dispatch(&mut self, action: InputAction) {
        log::trace!("Dispatch {action:?} in {}", self.state.phase.as_str());
        match action {
            InputAction::Start => {
                self.prime_audio();
                if matches!(self.state.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.start_game(false);
                }
            }
            InputAction::Flap => self.handle_flap(),
            InputAction::Pause => {
                if self.state.phase == GamePhase::Playing {
                    self.pause(false);
                }
            }
            InputAction::Resume => self.resume(),
            InputAction::TogglePause => match self.state.phase {
                GamePhase::Playing => self.pause(false),
                GamePhase::Paused => self.resume(),
                _ => {}
            },
            InputAction::Restart => {
                self.prime_audio();
                self.start_game(false);
            }
            InputAction::ToggleAudio => self.set_audio_enabled(!self.state.audio_enabled),
            InputAction::Mute => self.set_audio_enabled(false),
            InputAction::Unmute => self.set_audio_enabled(true),
            InputAction::VisibilityHidden => {
                if self.state.phase == GamePhase::Playing {
                    self.pause(true);
                }
            }
            // Resuming after the window returns is left to the caller
            InputAction::VisibilityVisible => {}
        }
    }

    /// Advance the simulation by `delta` seconds (clamped to the frame limit).
    pub fn step(&mut self, delta: f32) {
        let delta = clamp_delta(delta);
        let prev = Rc::clone(&self.state);
        let elapsed_ms = prev.elapsed_ms + f64::from(delta) * 1000.0;

        match prev.phase {
            GamePhase::Menu | GamePhase::Paused => return,
            GamePhase::GameOver => {
                self.commit(GameState {
                    delta,
                    elapsed_ms,
                    ..(*prev).clone()
                });
                return;
            }
            GamePhase::Playing => {}
        }

        let body = integrate(&prev.body, delta).next;
        let update = world::update(&prev.world, delta, &mut self.rng, body.position.x, true);

        let body_box = bounding_box(&body);
        let pipe_hit = detect_obstacle_collisions(&body_box, &update.state.pipes);
        let bounds_hit = detect_boundary_collision(&body);

        let mut score = prev.score;
        if !update.scored_ids.is_empty() {
            score += update.scored_ids.len() as u64;
            log::debug!("Scored pipes {:?} (score {score})", update.scored_ids);
            self.play(AudioEffect::Score);
        }

        let mut phase = prev.phase;
        let mut last_collision = prev.last_collision;
        if pipe_hit.collided() {
            phase = GamePhase::GameOver;
            last_collision = Some(pipe_hit);
        } else if bounds_hit.collided() {
            phase = GamePhase::GameOver;
            last_collision = Some(bounds_hit);
        }

        let next = GameState {
            phase,
            score,
            best_score: prev.best_score.max(score),
            elapsed_ms,
            body,
            world: update.state,
            delta,
            audio_enabled: prev.audio_enabled,
            last_collision,
        };

        if next.became_game_over(prev.phase) {
            log::info!("Game over: score {score} ({last_collision:?})");
            self.play(AudioEffect::Hit);
            if score > self.stored_best {
                persistence::persist_number(self.storage.as_mut(), BEST_SCORE_KEY, score);
                self.stored_best = score;
                log::info!("New best score {score}");
            }
        }

        self.commit(next);
    }

    fn handle_flap(&mut self) {
        self.prime_audio();
        match self.state.phase {
            GamePhase::Menu | GamePhase::GameOver => self.start_game(true),
            GamePhase::Playing => {
                let next = GameState {
                    body: apply_impulse(&self.state.body),
                    ..(*self.state).clone()
                };
                self.commit(next);
                self.play(AudioEffect::Flap);
            }
            GamePhase::Paused => {}
        }
    }

    fn start_game(&mut self, with_flap: bool) {
        let mut next = GameState::new(self.state.best_score, self.state.audio_enabled);
        next.phase = GamePhase::Playing;
        if with_flap {
            next.body = apply_impulse(&next.body);
        }
        log::info!("New game (best {})", next.best_score);

        self.clock.reset();
        self.commit(next);
        self.start();
    }

    fn pause(&mut self, silent: bool) {
        let next = GameState {
            phase: GamePhase::Paused,
            ..(*self.state).clone()
        };
        self.halt_frames();
        self.clock.reset();
        if silent {
            self.state = Rc::new(next);
        } else {
            self.commit(next);
        }
    }

    fn resume(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        let next = GameState {
            phase: GamePhase::Playing,
            ..(*self.state).clone()
        };
        self.clock.reset();
        self.commit(next);
        self.start();
    }

    fn set_audio_enabled(&mut self, enabled: bool) {
        if self.state.audio_enabled == enabled {
            return;
        }
        let next = GameState {
            audio_enabled: enabled,
            ..(*self.state).clone()
        };
        persistence::persist_bool(self.storage.as_mut(), AUDIO_ENABLED_KEY, enabled);
        if let Some(audio) = self.audio.as_mut() {
            audio.set_enabled(enabled);
        }
        self.commit(next);
    }

    fn halt_frames(&mut self) {
        if self.running {
            self.scheduler.cancel_frame();
            self.running = false;
        }
    }

    fn prime_audio(&mut self) {
        if self.audio_primed {
            return;
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.prime();
            self.audio_primed = true;
        }
    }

    fn play(&mut self, effect: AudioEffect) {
        if !self.state.audio_enabled {
            return;
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.play(effect);
        }
    }

    /// Install `next` as the canonical state and notify subscribers
    fn commit(&mut self, next: GameState) {
        self.state = Rc::new(next);
        let state: &GameState = &self.state;
        for (_, listener) in self.subscribers.iter_mut() {
            listener(state);
        }
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
