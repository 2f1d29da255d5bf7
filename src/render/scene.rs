use crate::camera::Camera;
use crate::ecs::components::{Alive, Appearance, Body, Food, Heading, Position};
use crate::world::Arena;

use super::grid::{push_grid, LineVertex};
use super::instance::{push_snake, CircleInstance};

/// CPU-side draw lists for one frame, reused across frames.
#[derive(Default)]
pub struct Scene {
    pub grid: Vec<LineVertex>,
    pub circles: Vec<CircleInstance>,
}

impl Scene {
    pub fn clear(&mut self) {
        self.grid.clear();
        self.circles.clear();
    }

    /// Rebuild from the arena. Draw order: grid, autonomous snakes, food, player.
    pub fn build(&mut self, arena: &Arena, camera: &Camera) {
        self.clear();
        let cfg = arena.config();
        let viewport = arena.viewport();

        push_grid(&mut self.grid, camera, viewport, cfg.grid_spacing);

        for &snake in arena.autonomous() {
            self.add_snake(arena, camera, snake);
        }

        for (_, (pos, food)) in arena.ecs.query::<(&Position, &Food)>().iter() {
            self.circles.push(CircleInstance::new(
                camera.world_to_screen(pos.0),
                food.radius,
                food.color,
            ));
        }

        if let Some(player) = arena.player() {
            self.add_snake(arena, camera, player);
        }
    }

    fn add_snake(&mut self, arena: &Arena, camera: &Camera, entity: hecs::Entity) {
        let Ok(mut query) = arena
            .ecs
            .query_one::<(&Body, &Heading, &Appearance, &Alive)>(entity)
        else {
            return;
        };
        let Some((body, heading, appearance, alive)) = query.get() else {
            return;
        };
        if !alive.0 {
            return;
        }
        push_snake(
            &mut self.circles,
            camera,
            body,
            heading.angle,
            appearance.color,
            arena.config().snake.head_scale,
        );
    }
}
