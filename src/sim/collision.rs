//! Axis-aligned collision geometry
//!
//! The body and both halves of every pipe pair are boxes; a hit is a strict
//! overlap on both axes.

use serde::{Deserialize, Serialize};

use super::world::Obstacle;
use crate::consts::*;

/// Axis-aligned box, `(x, y)` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Free-function form of [`Aabb::intersects`]
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Playfield boundary that was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bounds {
    Top,
    Ground,
}

/// Outcome of a collision check. At most one cause is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionResult {
    #[default]
    None,
    Pipe { id: u32 },
    Bounds(Bounds),
}

impl CollisionResult {
    #[inline]
    pub fn collided(&self) -> bool {
        !matches!(self, CollisionResult::None)
    }

    pub fn pipe_id(&self) -> Option<u32> {
        match self {
            CollisionResult::Pipe { id } => Some(*id),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            CollisionResult::Bounds(bounds) => Some(*bounds),
            _ => None,
        }
    }
}

/// Upper and lower boxes of a pipe pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleBoxes {
    pub top: Aabb,
    pub bottom: Aabb,
}

/// Boxes for a pipe pair at its current x.
///
/// The top box starts a full playfield height above the top edge so a body
/// clamped to the ceiling still overlaps it.
pub fn obstacle_boxes(obstacle: &Obstacle) -> ObstacleBoxes {
    let half_gap = PIPE_GAP / 2.0;
    let gap_top = obstacle.gap_center_y - half_gap;
    let gap_bottom = obstacle.gap_center_y + half_gap;

    ObstacleBoxes {
        top: Aabb::new(
            obstacle.x,
            PLAYFIELD_TOP - LOGICAL_HEIGHT,
            obstacle.width,
            gap_top + LOGICAL_HEIGHT,
        ),
        bottom: Aabb::new(
            obstacle.x,
            gap_bottom,
            obstacle.width,
            PLAYFIELD_BOTTOM - gap_bottom,
        ),
    }
}

/// First obstacle (in sequence order) whose boxes overlap `body`
pub fn detect_obstacle_collisions(body: &Aabb, obstacles: &[Obstacle]) -> CollisionResult {
    obstacles
        .iter()
        .find(|obstacle| {
            let boxes = obstacle_boxes(obstacle);
            body.intersects(&boxes.top) || body.intersects(&boxes.bottom)
        })
        .map(|obstacle| CollisionResult::Pipe { id: obstacle.id })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodyState, bounding_box};
    use glam::Vec2;

    fn pipe(id: u32, x: f32, gap_center_y: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            gap_center_y,
            width: PIPE_WIDTH,
            scored: false,
        }
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_obstacle_boxes_frame_the_gap() {
        let p = pipe(1, 100.0, 70.0);
        let boxes = obstacle_boxes(&p);
        assert_eq!(boxes.top.bottom(), 70.0 - PIPE_GAP / 2.0);
        assert!(boxes.top.y < PLAYFIELD_TOP);
        assert_eq!(boxes.bottom.y, 70.0 + PIPE_GAP / 2.0);
        assert_eq!(boxes.bottom.bottom(), PLAYFIELD_BOTTOM);
        assert_eq!(boxes.top.x, 100.0);
        assert_eq!(boxes.bottom.width, PIPE_WIDTH);
    }

    #[test]
    fn test_body_overlapping_lower_pipe() {
        let p = pipe(1, BODY_START_X + 5.0, BODY_START_Y - 10.0);
        let body = BodyState {
            position: Vec2::new(
                p.x + p.width / 2.0,
                p.gap_center_y + PIPE_GAP / 2.0 - BODY_HEIGHT / 2.0 + 1.0,
            ),
            velocity: Vec2::ZERO,
            rotation: 0.0,
        };

        let result = detect_obstacle_collisions(&bounding_box(&body), &[p]);
        assert!(result.collided());
        assert_eq!(result.pipe_id(), Some(1));
    }

    #[test]
    fn test_body_inside_gap_is_clear() {
        let p = pipe(1, BODY_START_X - PIPE_WIDTH / 2.0, BODY_START_Y);
        let body = BodyState::default();
        let result = detect_obstacle_collisions(&bounding_box(&body), &[p]);
        assert_eq!(result, CollisionResult::None);
    }

    #[test]
    fn test_first_obstacle_in_sequence_wins() {
        // Two pipes both sealing the body's column
        let a = pipe(4, BODY_START_X - 10.0, 20.0);
        let b = pipe(5, BODY_START_X - 5.0, 20.0);
        let body = BodyState::default();
        let result = detect_obstacle_collisions(&bounding_box(&body), &[a, b]);
        assert_eq!(result, CollisionResult::Pipe { id: 4 });
    }

    #[test]
    fn test_no_obstacles_no_collision() {
        let body = BodyState::default();
        assert!(!detect_obstacle_collisions(&bounding_box(&body), &[]).collided());
    }
}
