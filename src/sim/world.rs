//! Scrolling obstacle world
//!
//! Pipe pairs are spawned at a fixed cadence past the right edge, scroll left
//! at a constant speed, get scored once the body passes their center, and are
//! dropped once they are well off the left edge.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::clamp;
use crate::consts::*;

/// Lowest/highest allowed gap center
pub const MIN_GAP_CENTER: f32 = PIPE_GAP / 2.0 + PIPE_GAP_MARGIN;
pub const MAX_GAP_CENTER: f32 = PLAYFIELD_BOTTOM - PIPE_GAP_MARGIN - PIPE_GAP / 2.0;

/// One pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Monotonic within a run
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Vertical center of the passable gap
    pub gap_center_y: f32,
    pub width: f32,
    pub scored: bool,
}

impl Obstacle {
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// All live obstacles plus spawn bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Spawn order, which is also left-to-right order
    pub pipes: Vec<Obstacle>,
    /// Milliseconds accumulated toward the next spawn
    pub time_since_last_spawn: f32,
    /// Always greater than every live pipe id
    pub next_pipe_id: u32,
}

impl Default for WorldState {
    fn default() -> Self {
        create_initial()
    }
}

/// Output of a world update
#[derive(Debug, Clone, PartialEq)]
pub struct WorldUpdate {
    pub state: WorldState,
    /// Pipes that became scored during this update, in sequence order
    pub scored_ids: Vec<u32>,
}

/// Empty world with the accumulator primed so the first pipe spawns on the first update
pub fn create_initial() -> WorldState {
    WorldState {
        pipes: Vec::new(),
        time_since_last_spawn: PIPE_SPAWN_INTERVAL_MS,
        next_pipe_id: 1,
    }
}

/// Create a pipe pair just past the right edge with a randomized gap.
///
/// Draws two values: the variance first, then the base position.
pub fn spawn_obstacle(id: u32, rng: &mut impl RandomSource) -> Obstacle {
    let variance = (rng.next_unit() * 2.0 - 1.0) * PIPE_GAP_VARIANCE;
    let base = MIN_GAP_CENTER + (MAX_GAP_CENTER - MIN_GAP_CENTER) * rng.next_unit();
    let gap_center_y = clamp(base + variance, MIN_GAP_CENTER, MAX_GAP_CENTER);

    Obstacle {
        id,
        x: LOGICAL_WIDTH + PIPE_SPAWN_OFFSET,
        gap_center_y,
        width: PIPE_WIDTH,
        scored: false,
    }
}

/// Advance the world by `dt` seconds.
///
/// Order matters: move, then score against the new x, then despawn, then
/// spawn. With `spawn_enabled` false the accumulator still runs but nothing
/// is spawned.
pub fn update(
    state: &WorldState,
    dt: f32,
    rng: &mut impl RandomSource,
    body_x: f32,
    spawn_enabled: bool,
) -> WorldUpdate {
    let mut scored_ids = Vec::new();
    let mut pipes = Vec::with_capacity(state.pipes.len() + 1);

    for pipe in &state.pipes {
        let mut moved = Obstacle {
            x: pipe.x - SCROLL_SPEED * dt,
            ..pipe.clone()
        };

        if !moved.scored && body_x > moved.center_x() {
            moved.scored = true;
            scored_ids.push(moved.id);
        }

        if moved.right() < -PIPE_DESPAWN_BUFFER {
            log::trace!("Despawned pipe {}", moved.id);
            continue;
        }

        pipes.push(moved);
    }

    let mut time_since_last_spawn = state.time_since_last_spawn + dt * 1000.0;
    let mut next_pipe_id = state.next_pipe_id;

    if spawn_enabled {
        while time_since_last_spawn >= PIPE_SPAWN_INTERVAL_MS {
            time_since_last_spawn -= PIPE_SPAWN_INTERVAL_MS;
            let pipe = spawn_obstacle(next_pipe_id, rng);
            log::debug!("Spawned pipe {} (gap center {:.1})", pipe.id, pipe.gap_center_y);
            pipes.push(pipe);
            next_pipe_id += 1;
        }
    }

    WorldUpdate {
        state: WorldState {
            pipes,
            time_since_last_spawn,
            next_pipe_id,
        },
        scored_ids,
    }
}
