//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod rng;
pub mod state;
pub mod world;

pub use body::{BodyState, Integration, apply_impulse, bounding_box, detect_boundary_collision, integrate};
pub use collision::{Aabb, Bounds, CollisionResult, ObstacleBoxes, detect_obstacle_collisions, intersects, obstacle_boxes};
pub use rng::{RandomSource, SimRng};
pub use state::{AudioEffect, GamePhase, GameState, InputAction};
pub use world::{Obstacle, WorldState, WorldUpdate, spawn_obstacle};
