use hecs::Entity;

use crate::ecs::components::{Alive, Body, Food, Position};
use crate::world::Arena;

/// Eat every pellet within the snake's radius of its head.
///
/// Each eaten pellet grows the body by its value and is replaced by a fresh random
/// pellet somewhere away from the player. Returns the total value eaten.
pub fn consume(arena: &mut Arena, entity: Entity, rng: &mut fastrand::Rng) -> u32 {
    let Some((head, radius)) = mouth(arena, entity) else {
        return 0;
    };

    let eaten: Vec<(Entity, u32)> = arena
        .ecs
        .query::<(&Position, &Food)>()
        .iter()
        .filter(|(_, (pos, _))| head.distance(pos.0) < radius)
        .map(|(e, (_, food))| (e, food.value))
        .collect();

    if eaten.is_empty() {
        return 0;
    }

    let mut gained = 0;
    for &(pellet, value) in &eaten {
        let _ = arena.ecs.despawn(pellet);
        gained += value;
    }

    if let Ok(mut body) = arena.ecs.get::<&mut Body>(entity) {
        body.target_length += gained as usize;
    }

    for _ in 0..eaten.len() {
        arena.spawn_food(rng);
    }

    gained
}

fn mouth(arena: &Arena, entity: Entity) -> Option<(glam::Vec2, f32)> {
    let mut query = arena.ecs.query_one::<(&Body, &Alive)>(entity).ok()?;
    let (body, alive) = query.get()?;
    if !alive.0 {
        return None;
    }
    Some((body.head()?, body.radius))
}
