use glam::Vec2;
use hecs::Entity;

use crate::config::ArenaConfig;
use crate::ecs::components::{Alive, Body, Controller, Food};
use crate::food;
use crate::snake;

/// Everything alive in one round: the ECS world plus the handles the round needs to
/// address the player and the fixed autonomous slots.
pub struct Arena {
    pub ecs: hecs::World,
    player: Option<Entity>,
    /// One entry per autonomous slot. A dead snake keeps its slot until respawned.
    autonomous: Vec<Entity>,
    viewport: Vec2,
    config: ArenaConfig,
}

impl Arena {
    pub fn new(viewport: Vec2, config: ArenaConfig) -> Self {
        Self {
            ecs: hecs::World::new(),
            player: None,
            autonomous: Vec::with_capacity(config.schedule.autonomous_count),
            viewport,
            config,
        }
    }

    /// Spawn the player at the origin, the autonomous population and the starting food.
    pub fn populate(&mut self, player_name: String, rng: &mut fastrand::Rng) {
        self.spawn_player(player_name, rng);
        for _ in 0..self.config.schedule.autonomous_count {
            self.spawn_autonomous(rng);
        }
        for _ in 0..self.config.food.initial_count {
            self.spawn_food(rng);
        }
    }

    #[inline]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    #[inline]
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    #[inline]
    pub fn autonomous(&self) -> &[Entity] {
        &self.autonomous
    }

    /// Half the side of the square autonomous snakes try to stay inside.
    pub fn world_half_extent(&self) -> f32 {
        self.viewport.max_element() * self.config.steering.world_scale
    }

    /// Head of the player snake, dead or alive.
    pub fn player_head(&self) -> Option<Vec2> {
        let player = self.player?;
        let body = self.ecs.get::<&Body>(player).ok()?;
        body.head()
    }

    /// Head of the player snake while it is still alive.
    pub fn live_player_head(&self) -> Option<Vec2> {
        let player = self.player?;
        if !self.is_alive(player) {
            return None;
        }
        self.player_head()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.ecs
            .get::<&Alive>(entity)
            .map(|alive| alive.0)
            .unwrap_or(false)
    }

    pub fn controller(&self, entity: Entity) -> Option<Controller> {
        self.ecs.get::<&Controller>(entity).ok().map(|c| *c)
    }

    pub fn food_count(&self) -> usize {
        self.ecs.query::<&Food>().iter().count()
    }

    /// Random point in the spawn region, resampled while it lands within
    /// `min_distance` of the player's head. Gives up after the configured number of
    /// draws and returns the last candidate.
    pub fn place_away(&self, min_distance: f32, rng: &mut fastrand::Rng) -> Vec2 {
        let anchor = self.player_head();
        let attempts = self.config.schedule.placement_retries.max(1);

        let mut candidate = Vec2::ZERO;
        for _ in 0..attempts {
            candidate = self.sample_spawn_region(rng);
            match anchor {
                Some(head) if head.distance(candidate) < min_distance => continue,
                _ => return candidate,
            }
        }

        log::debug!(
            "placement gave up after {} draws, using ({:.0}, {:.0})",
            attempts,
            candidate.x,
            candidate.y
        );
        candidate
    }

    /// Uniform over a 3x viewport rectangle spanning both sides of the origin.
    fn sample_spawn_region(&self, rng: &mut fastrand::Rng) -> Vec2 {
        let (w, h) = (self.viewport.x, self.viewport.y);
        Vec2::new(rng.f32() * w * 3.0 - w, rng.f32() * h * 3.0 - h)
    }

    pub fn spawn_player(&mut self, name: String, rng: &mut fastrand::Rng) -> Entity {
        let color = snake::random_color(rng);
        let entity = snake::spawn_snake(
            &mut self.ecs,
            Vec2::ZERO,
            Controller::Player,
            name,
            color,
            &self.config.snake,
        );
        self.player = Some(entity);
        entity
    }

    /// Spawn a new autonomous snake into a fresh slot.
    pub fn spawn_autonomous(&mut self, rng: &mut fastrand::Rng) -> Entity {
        let entity = self.make_autonomous(rng);
        self.autonomous.push(entity);
        entity
    }

    /// Swap the dead snake in `slot` for a fresh one.
    ///
    /// Returns `None` when the slot no longer holds `dead` (already replaced, or the
    /// slot does not exist).
    pub fn replace_autonomous(
        &mut self,
        slot: usize,
        dead: Entity,
        rng: &mut fastrand::Rng,
    ) -> Option<Entity> {
        if self.autonomous.get(slot) != Some(&dead) {
            return None;
        }
        let _ = self.ecs.despawn(dead);
        let entity = self.make_autonomous(rng);
        self.autonomous[slot] = entity;
        Some(entity)
    }

    fn make_autonomous(&mut self, rng: &mut fastrand::Rng) -> Entity {
        let pos = self.place_away(self.config.schedule.snake_min_player_distance, rng);
        let name = snake::generate_snake_name(rng);
        let color = snake::random_color(rng);
        snake::spawn_snake(
            &mut self.ecs,
            pos,
            Controller::Autonomous,
            name,
            color,
            &self.config.snake,
        )
    }

    /// Spawn one random pellet away from the player.
    pub fn spawn_food(&mut self, rng: &mut fastrand::Rng) -> Entity {
        let pos = self.place_away(self.config.food.min_player_distance, rng);
        let item = food::roll_food(&self.config.food, rng);
        food::spawn_food_at(&mut self.ecs, pos, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::SnakeName;

    fn arena() -> Arena {
        Arena::new(Vec2::new(800.0, 600.0), ArenaConfig::default())
    }

    #[test]
    fn populate_builds_reference_population() {
        let mut arena = arena();
        let mut rng = fastrand::Rng::with_seed(1);
        arena.populate("Tester".into(), &mut rng);

        let player = arena.player().unwrap();
        assert_eq!(arena.player_head(), Some(Vec2::ZERO));
        assert_eq!(arena.ecs.get::<&SnakeName>(player).unwrap().0, "Tester");
        assert_eq!(arena.controller(player), Some(Controller::Player));

        assert_eq!(arena.autonomous().len(), 10);
        for &e in arena.autonomous() {
            assert_eq!(arena.controller(e), Some(Controller::Autonomous));
            let head = arena.ecs.get::<&Body>(e).unwrap().head().unwrap();
            assert!(head.length() >= 300.0, "autonomous snake too close: {head}");
        }
        assert_eq!(arena.food_count(), 200);
    }

    #[test]
    fn place_away_respects_min_distance() {
        let mut arena = arena();
        let mut rng = fastrand::Rng::with_seed(99);
        arena.spawn_player("P".into(), &mut rng);
        if let Ok(mut body) = arena.ecs.get::<&mut Body>(arena.player().unwrap()) {
            body.segments[0] = Vec2::new(120.0, -40.0);
        }

        for _ in 0..2000 {
            let p = arena.place_away(300.0, &mut rng);
            assert!(p.distance(Vec2::new(120.0, -40.0)) >= 300.0, "{p}");
            assert!((-800.0..1600.0).contains(&p.x));
            assert!((-600.0..1200.0).contains(&p.y));
        }
    }

    #[test]
    fn place_away_falls_back_when_crowded() {
        let mut arena = Arena::new(Vec2::new(10.0, 10.0), ArenaConfig::default());
        let mut rng = fastrand::Rng::with_seed(5);
        arena.spawn_player("P".into(), &mut rng);

        // Whole region lies inside the exclusion radius; must still terminate.
        let p = arena.place_away(10_000.0, &mut rng);
        assert!((-10.0..20.0).contains(&p.x));
        assert!((-10.0..20.0).contains(&p.y));
    }

    #[test]
    fn place_away_without_player_accepts_first_draw() {
        let arena = arena();
        let mut rng = fastrand::Rng::with_seed(8);
        let p = arena.place_away(1.0e9, &mut rng);
        assert!((-800.0..1600.0).contains(&p.x));
        assert!(arena.player_head().is_none());
    }

    #[test]
    fn replace_only_matching_slot() {
        let mut arena = arena();
        let mut rng = fastrand::Rng::with_seed(2);
        let first = arena.spawn_autonomous(&mut rng);
        let other = arena.spawn_autonomous(&mut rng);

        assert!(arena.replace_autonomous(0, other, &mut rng).is_none());
        assert!(arena.replace_autonomous(7, first, &mut rng).is_none());

        let fresh = arena.replace_autonomous(0, first, &mut rng).unwrap();
        assert_ne!(fresh, first);
        assert!(!arena.ecs.contains(first));
        assert_eq!(arena.autonomous()[0], fresh);
        assert!(arena.replace_autonomous(0, first, &mut rng).is_none());
    }
}
