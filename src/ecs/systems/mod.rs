pub mod collision;
pub mod feeding;
pub mod movement;
pub mod steering;

use glam::Vec2;
use hecs::Entity;

use crate::ecs::components::Controller;
use crate::lifecycle::{self, Death};
use crate::world::Arena;

/// What one simulation tick changed that the round has to react to.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Food value the player ate this tick.
    pub score_gained: u32,
    pub deaths: Vec<Death>,
}

impl TickReport {
    pub fn clear(&mut self) {
        self.score_gained = 0;
        self.deaths.clear();
    }
}

/// Run one fixed tick over every live snake: the player first, then the
/// autonomous slots in order.
///
/// Snakes are updated one at a time, so a later snake sees the bodies of
/// earlier ones as they are after this tick.
pub fn tick(
    arena: &mut Arena,
    pointer: Option<Vec2>,
    rng: &mut fastrand::Rng,
    report: &mut TickReport,
) {
    report.clear();

    let order: Vec<Entity> = arena
        .player()
        .into_iter()
        .chain(arena.autonomous().iter().copied())
        .collect();

    for entity in order {
        if arena.is_alive(entity) {
            update_snake(arena, entity, pointer, rng, report);
        }
    }
}

fn update_snake(
    arena: &mut Arena,
    entity: Entity,
    pointer: Option<Vec2>,
    rng: &mut fastrand::Rng,
    report: &mut TickReport,
) {
    // 1. Pick a target heading
    steering::steer(arena, entity, pointer, rng);

    // 2. Turn and slide the body forward
    movement::integrate(&mut arena.ecs, entity);

    // 3. Eat
    let eaten = feeding::consume(arena, entity, rng);
    if arena.controller(entity) == Some(Controller::Player) {
        report.score_gained += eaten;
    }

    // 4. Die on contact
    if collision::first_hit(arena, entity).is_some() {
        if let Some(death) = lifecycle::kill(arena, entity) {
            report.deaths.push(death);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::ecs::components::{Body, Food, Position};
    use crate::food::spawn_food_at;

    fn quiet_config() -> ArenaConfig {
        let mut cfg = ArenaConfig::default();
        cfg.steering.wander_chance = 0.0;
        cfg.snake.speed = 1.0;
        cfg
    }

    fn segments(arena: &Arena, e: Entity) -> Vec<Vec2> {
        arena
            .ecs
            .get::<&Body>(e)
            .unwrap()
            .segments
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn lone_player_advances_one_step() {
        let mut arena = Arena::new(Vec2::new(800.0, 600.0), quiet_config());
        let mut rng = fastrand::Rng::with_seed(1);
        let player = arena.spawn_player("P".into(), &mut rng);
        let mut report = TickReport::default();

        tick(&mut arena, None, &mut rng, &mut report);

        assert_eq!(segments(&arena, player), vec![Vec2::new(1.0, 0.0), Vec2::ZERO]);
        assert_eq!(report.score_gained, 0);
        assert!(report.deaths.is_empty());
    }

    #[test]
    fn player_scores_what_it_eats() {
        let mut arena = Arena::new(Vec2::new(800.0, 600.0), quiet_config());
        let mut rng = fastrand::Rng::with_seed(1);
        let player = arena.spawn_player("P".into(), &mut rng);
        spawn_food_at(
            &mut arena.ecs,
            Vec2::new(1.0, 0.0),
            Food {
                radius: 10.0,
                value: 3,
                color: 0xFFFFFFFF,
            },
        );
        let mut report = TickReport::default();

        tick(&mut arena, None, &mut rng, &mut report);

        assert_eq!(report.score_gained, 3);
        assert_eq!(arena.ecs.get::<&Body>(player).unwrap().target_length, 13);
        // The pellet was replaced somewhere else.
        assert_eq!(arena.food_count(), 1);
        for (_, pos) in arena.ecs.query::<&Position>().iter() {
            assert!(pos.0.distance(Vec2::new(1.0, 0.0)) >= 100.0);
        }
    }

    #[test]
    fn autonomous_snake_dies_on_another_body() {
        let mut arena = Arena::new(Vec2::new(800.0, 600.0), quiet_config());
        let mut rng = fastrand::Rng::with_seed(3);
        let a = arena.spawn_autonomous(&mut rng);
        let b = arena.spawn_autonomous(&mut rng);

        // A sits just behind B's third segment, heading east into it.
        let b_body: Vec<Vec2> = (0..7).map(|i| Vec2::new(500.0, 100.0 + 3.0 * i as f32)).collect();
        if let Ok(mut body) = arena.ecs.get::<&mut Body>(b) {
            body.segments = b_body.iter().copied().collect();
        }
        if let Ok(mut body) = arena.ecs.get::<&mut Body>(a) {
            body.segments = [Vec2::new(495.0, 106.0)].into_iter().collect();
        }
        let mut report = TickReport::default();

        tick(&mut arena, None, &mut rng, &mut report);

        assert_eq!(report.deaths.len(), 1);
        assert_eq!(report.deaths[0].entity, a);
        assert_eq!(report.deaths[0].controller, Controller::Autonomous);
        assert!(!arena.is_alive(a));
        assert!(arena.is_alive(b));
        assert_eq!(report.score_gained, 0);
    }

    #[test]
    fn long_run_keeps_bodies_bounded() {
        let mut arena = Arena::new(Vec2::new(800.0, 600.0), ArenaConfig::default());
        let mut rng = fastrand::Rng::with_seed(77);
        arena.populate("P".into(), &mut rng);
        let mut report = TickReport::default();
        let mut last_len: Vec<usize> = arena
            .autonomous()
            .iter()
            .map(|&e| arena.ecs.get::<&Body>(e).unwrap().target_length)
            .collect();

        for _ in 0..600 {
            tick(&mut arena, Some(Vec2::new(700.0, 100.0)), &mut rng, &mut report);
            for (slot, &e) in arena.autonomous().iter().enumerate() {
                let body = arena.ecs.get::<&Body>(e).unwrap();
                assert!(body.len() <= body.target_length);
                assert!(body.target_length >= last_len[slot]);
                last_len[slot] = body.target_length;
            }
        }
    }
}
