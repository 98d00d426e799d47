//! Body kinematics
//!
//! The controlled body only moves vertically. Rotation is a smoothed visual
//! tilt derived from vertical velocity and never feeds back into motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounds, CollisionResult};
use crate::clamp;
use crate::consts::*;

const HALF_BODY_WIDTH: f32 = BODY_WIDTH / 2.0;
const HALF_BODY_HEIGHT: f32 = BODY_HEIGHT / 2.0;

/// Lowest/highest y the body center may reach
pub const MIN_BODY_Y: f32 = PLAYFIELD_TOP + HALF_BODY_HEIGHT;
pub const MAX_BODY_Y: f32 = PLAYFIELD_BOTTOM - HALF_BODY_HEIGHT;

/// The controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Visual tilt (radians, positive is nose-down)
    pub rotation: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        create_initial()
    }
}

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integration {
    pub next: BodyState,
    pub hit_top: bool,
    pub hit_ground: bool,
}

/// Body at its start position, at rest and level
pub fn create_initial() -> BodyState {
    BodyState {
        position: Vec2::new(BODY_START_X, BODY_START_Y),
        velocity: Vec2::ZERO,
        rotation: 0.0,
    }
}

/// Flap: vertical velocity becomes the impulse constant, nothing else changes
pub fn apply_impulse(body: &BodyState) -> BodyState {
    BodyState {
        velocity: Vec2::new(body.velocity.x, FLAP_VELOCITY),
        ..*body
    }
}

/// Advance the body by `dt` seconds under gravity.
///
/// Position is clamped to the playfield. Only the ground clamp zeroes the
/// vertical velocity.
pub fn integrate(body: &BodyState, dt: f32) -> Integration {
    let next_vel_y = (body.velocity.y + GRAVITY * dt).min(MAX_FALL_SPEED);
    let mut next_y = body.position.y + next_vel_y * dt;

    let mut hit_top = false;
    let mut hit_ground = false;

    if next_y < MIN_BODY_Y {
        next_y = MIN_BODY_Y;
        hit_top = true;
    }
    if next_y > MAX_BODY_Y {
        next_y = MAX_BODY_Y;
        hit_ground = true;
    }

    let target_rotation = if next_vel_y < 0.0 {
        MAX_UP_TILT
    } else {
        clamp(next_vel_y / MAX_FALL_SPEED * MAX_DOWN_TILT, 0.0, MAX_DOWN_TILT)
    };
    let next_rotation = body.rotation + (target_rotation - body.rotation) / ROTATION_SMOOTHING;

    Integration {
        next: BodyState {
            position: Vec2::new(body.position.x, next_y),
            velocity: Vec2::new(body.velocity.x, if hit_ground { 0.0 } else { next_vel_y }),
            rotation: clamp(next_rotation, MAX_UP_TILT, MAX_DOWN_TILT),
        },
        hit_top,
        hit_ground,
    }
}

/// Box of fixed size centered on the body
pub fn bounding_box(body: &BodyState) -> Aabb {
    Aabb::new(
        body.position.x - HALF_BODY_WIDTH,
        body.position.y - HALF_BODY_HEIGHT,
        BODY_WIDTH,
        BODY_HEIGHT,
    )
}

/// Authoritative boundary check on the body's current position
pub fn detect_boundary_collision(body: &BodyState) -> CollisionResult {
    let bb = bounding_box(body);
    if bb.y <= PLAYFIELD_TOP {
        CollisionResult::Bounds(Bounds::Top)
    } else if bb.bottom() >= PLAYFIELD_BOTTOM {
        CollisionResult::Bounds(Bounds::Ground)
    } else {
        CollisionResult::None
    }
}
