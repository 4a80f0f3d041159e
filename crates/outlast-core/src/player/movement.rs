//! Player movement: facing-relative intent and axis-separated collision.
//!
//! Algorithm: "try X, then try Y"
//! 1. Candidate = position + delta, clamped to the world bounds
//! 2. Commit the X component alone if that spot is free
//! 3. From the (possibly updated) X, commit the Y component alone if free
//!
//! Blocking on one axis therefore still lets the other axis advance, which
//! slides the player along obstacle edges.

use crate::geometry::Vec2;
use crate::input::InputSnapshot;
use crate::world::World;

/// Unit world-space direction for the held movement keys, or zero.
///
/// Forward follows `facing`; strafe-right is 90 degrees clockwise from it
/// (y points down).
pub fn movement_direction(facing: f32, input: &InputSnapshot) -> Vec2 {
    let (forward, strafe) = input.movement_axes();
    if forward == 0.0 && strafe == 0.0 {
        return Vec2::ZERO;
    }
    let (sin, cos) = facing.sin_cos();
    Vec2::new(forward * cos - strafe * sin, forward * sin + strafe * cos).normalize()
}

/// Move a circle by `delta`, sliding around anything the world reports as
/// blocking.
pub fn resolve_move(world: &World, position: Vec2, delta: Vec2, radius: f32) -> Vec2 {
    let target = world.clamp_point(position + delta);
    let mut resolved = position;

    if world.query_collision(target.x, resolved.y, radius).is_none() {
        resolved.x = target.x;
    }
    if world.query_collision(resolved.x, target.y, radius).is_none() {
        resolved.y = target.y;
    }

    resolved
}
