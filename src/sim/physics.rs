//! Physics integration and AABB overlap testing
//!
//! Integration is plain Euler: `pos += vel * dt`. Boundary handling differs
//! per entity kind and lives with the callers in `tick`; this module only
//! provides the primitives (clamp, vertical bounce, overlap test).

use glam::Vec2;

use super::state::Entity;

/// An axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn of(entity: &Entity) -> Self {
        Self {
            x: entity.pos.x,
            y: entity.pos.y,
            w: entity.width,
            h: entity.height,
        }
    }
}

/// Strict-inequality overlap test. Boxes that merely touch do not collide.
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Whether two entities overlap. Inactive entities never collide.
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    if !a.active || !b.active {
        return false;
    }
    aabb_overlap(&Aabb::of(a), &Aabb::of(b))
}

/// Advance an active entity by one step. Inactive entities are a no-op.
pub fn integrate(entity: &mut Entity, dt: f32) {
    if !entity.active {
        return;
    }
    entity.pos += entity.vel * dt;
}

/// Clamp an entity's box inside `[0, width] x [0, height]`
pub fn clamp_to_arena(entity: &mut Entity, width: f32, height: f32) {
    if !entity.active {
        return;
    }
    entity.pos.x = entity.pos.x.clamp(0.0, width - entity.width);
    entity.pos.y = entity.pos.y.clamp(0.0, height - entity.height);
}

/// Reflect vertical velocity when the entity's anchor leaves `[0, height]`.
///
/// This is a sign flip, not a position clamp: the entity may overshoot the
/// edge for a tick before the reversed velocity carries it back in.
pub fn bounce_vertical(entity: &mut Entity, height: f32) {
    if !entity.active {
        return;
    }
    if entity.pos.y < 0.0 || entity.pos.y > height {
        entity.vel.y = -entity.vel.y;
    }
}

/// Unit normal from `a`'s center toward `b`'s center.
///
/// Falls back to +X for coincident centers so callers always get a usable
/// separation axis.
pub fn center_normal(a: &Entity, b: &Entity) -> Vec2 {
    let delta = b.center() - a.center();
    if delta.length_squared() < 1e-6 {
        Vec2::X
    } else {
        delta.normalize()
    }
}
