use glam::Vec2;
use hecs::Entity;

use crate::ecs::components::{Alive, Body, Motion};
use crate::world::Arena;

/// First snake whose body the given snake's head has run into, if any.
///
/// Every segment of every other live snake counts. The snake's own body is
/// checked from the first segment that can sit clear of the head.
pub fn first_hit(arena: &Arena, entity: Entity) -> Option<Entity> {
    let cfg = arena.config();
    let (head, own_start, kill) = {
        let mut query = arena.ecs.query_one::<(&Body, &Motion, &Alive)>(entity).ok()?;
        let (body, motion, alive) = query.get()?;
        if !alive.0 {
            return None;
        }
        (
            body.head()?,
            cfg.self_collision_start(body.radius, motion.speed),
            cfg.kill_radius(body.radius),
        )
    };

    for (other, (body, alive)) in arena.ecs.query::<(&Body, &Alive)>().iter() {
        if !alive.0 {
            continue;
        }
        let skip = if other == entity { own_start } else { 0 };
        if touches(head, body.segments.iter().skip(skip).copied(), kill) {
            return Some(other);
        }
    }
    None
}

/// Whether `head` lies strictly within `kill` of any segment.
pub fn touches(head: Vec2, segments: impl IntoIterator<Item = Vec2>, kill: f32) -> bool {
    let kill_sq = kill * kill;
    segments
        .into_iter()
        .any(|seg| head.distance_squared(seg) < kill_sq)
}
