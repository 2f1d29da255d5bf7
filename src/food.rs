use glam::Vec2;

use crate::config::FoodConfig;
use crate::ecs::components::{Food, Position};
use crate::snake::random_color;

/// Roll a random pellet: mostly small, occasionally large, random palette color.
pub fn roll_food(cfg: &FoodConfig, rng: &mut fastrand::Rng) -> Food {
    let (radius, value) = if rng.f32() < cfg.large_chance {
        (cfg.large_radius, cfg.large_value)
    } else {
        (cfg.small_radius, cfg.small_value)
    };
    Food {
        radius,
        value: value.max(1),
        color: random_color(rng),
    }
}

/// Pellet left behind by a dead snake.
pub fn corpse_food(cfg: &FoodConfig, color: u32) -> Food {
    Food {
        radius: cfg.small_radius,
        value: 1,
        color,
    }
}

pub fn spawn_food_at(world: &mut hecs::World, pos: Vec2, food: Food) -> hecs::Entity {
    world.spawn((Position(pos), food))
}

/// Body positions that become food when a snake dies: every `stride`th, from the head.
pub fn corpse_positions(segments: impl IntoIterator<Item = Vec2>, stride: usize) -> Vec<Vec2> {
    segments.into_iter().step_by(stride.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[test]
    fn roll_produces_both_sizes() {
        let cfg = ArenaConfig::default().food;
        let mut rng = fastrand::Rng::with_seed(42);
        let rolls: Vec<Food> = (0..500).map(|_| roll_food(&cfg, &mut rng)).collect();

        let large = rolls.iter().filter(|f| f.value == cfg.large_value).count();
        assert!(large > 0 && large < 150, "large count {large}");
        for f in &rolls {
            if f.value == cfg.large_value {
                assert_eq!(f.radius, cfg.large_radius);
            } else {
                assert_eq!(f.value, cfg.small_value);
                assert_eq!(f.radius, cfg.small_radius);
            }
        }
    }

    #[test]
    fn corpse_takes_every_third_segment() {
        let segs: Vec<Vec2> = (0..8).map(|i| Vec2::new(i as f32, 0.0)).collect();
        let picked = corpse_positions(segs, 3);
        assert_eq!(
            picked,
            vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(6.0, 0.0)]
        );
    }
}
