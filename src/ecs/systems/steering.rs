use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::config::SteeringConfig;
use crate::ecs::components::{Body, Controller, Food, Heading, Position};
use crate::math::angle_to;
use crate::world::Arena;

/// Heading from the viewport center toward the pointer.
pub fn pointer_heading(pointer: Vec2, viewport: Vec2) -> f32 {
    angle_to(viewport * 0.5, pointer)
}

/// Target heading for an autonomous snake.
///
/// Drives are layered, each later one overriding the earlier:
/// wander, then boundary avoidance, then food seeking.
pub fn autonomous_heading(
    current_target: f32,
    head: Vec2,
    half_extent: f32,
    food: impl IntoIterator<Item = Vec2>,
    cfg: &SteeringConfig,
    rng: &mut fastrand::Rng,
) -> f32 {
    let mut target = current_target;

    if rng.f32() < cfg.wander_chance {
        target += (rng.f32() * 2.0 - 1.0) * cfg.wander_spread;
    }

    let low = -half_extent + cfg.boundary_margin;
    let high = half_extent - cfg.boundary_margin;
    if head.x < low {
        target = 0.0;
    }
    if head.x > high {
        target = PI;
    }
    if head.y < low {
        target = FRAC_PI_2;
    }
    if head.y > high {
        target = -FRAC_PI_2;
    }

    if let Some(meal) = nearest_within(head, food, cfg.food_detect_radius) {
        target = angle_to(head, meal);
    }

    target
}

/// Closest point strictly inside `radius` of `origin`.
pub fn nearest_within(
    origin: Vec2,
    points: impl IntoIterator<Item = Vec2>,
    radius: f32,
) -> Option<Vec2> {
    let mut best = None;
    let mut best_dist = radius;
    for p in points {
        let d = origin.distance(p);
        if d < best_dist {
            best_dist = d;
            best = Some(p);
        }
    }
    best
}

/// Refresh one snake's target heading from its controller.
///
/// The player keeps its previous target until a pointer sample exists.
pub fn steer(
    arena: &mut Arena,
    entity: hecs::Entity,
    pointer: Option<Vec2>,
    rng: &mut fastrand::Rng,
) {
    let Some(controller) = arena.controller(entity) else {
        return;
    };

    let target = match controller {
        Controller::Player => match pointer {
            Some(p) => pointer_heading(p, arena.viewport()),
            None => return,
        },
        Controller::Autonomous => {
            let Some(head) = arena.ecs.get::<&Body>(entity).ok().and_then(|b| b.head()) else {
                return;
            };
            let Some(current) = arena.ecs.get::<&Heading>(entity).ok().map(|h| h.target) else {
                return;
            };
            let cfg = arena.config().steering;
            let half_extent = arena.world_half_extent();

            let mut food = arena.ecs.query::<(&Position, &Food)>();
            autonomous_heading(
                current,
                head,
                half_extent,
                food.iter().map(|(_, (pos, _))| pos.0),
                &cfg,
                rng,
            )
        }
    };

    if let Ok(mut heading) = arena.ecs.get::<&mut Heading>(entity) {
        heading.target = target;
    }
}
