use glam::Vec2;

use crate::camera::Camera;
use crate::config::ArenaConfig;
use crate::ecs::components::Controller;
use crate::ecs::systems::{self, TickReport};
use crate::hooks::RoundHooks;
use crate::leaderboard::{self, LeaderboardEntry};
use crate::lifecycle::{Deferred, EventQueue};
use crate::world::Arena;

/// One round of play, from the start button to the round-over screen.
///
/// Owns everything the round touches, so dropping it cancels every deferred action.
pub struct Round {
    arena: Arena,
    events: EventQueue,
    rng: fastrand::Rng,
    /// Simulated time since the round started (ms).
    clock_ms: f64,
    ticks: u64,
    score: u32,
    leaderboard: Vec<LeaderboardEntry>,
    camera: Camera,
    running: bool,
    player_name: String,
    report: TickReport,
}

impl Round {
    pub fn start(
        player_name: String,
        viewport: Vec2,
        config: ArenaConfig,
        mut rng: fastrand::Rng,
        hooks: &mut dyn RoundHooks,
    ) -> Self {
        if let Err(e) = hooks.on_round_start(&player_name) {
            log::warn!("round start hook failed: {e}");
        }

        let mut arena = Arena::new(viewport, config);
        arena.populate(player_name.clone(), &mut rng);

        let mut camera = Camera::default();
        camera.follow(arena.live_player_head(), viewport);
        let leaderboard = leaderboard::rank(&arena.ecs, config.schedule.leaderboard_size);

        log::info!(
            "Round started for {:?}: {} autonomous snakes, {} food",
            player_name,
            arena.autonomous().len(),
            arena.food_count()
        );

        Self {
            arena,
            events: EventQueue::new(),
            rng,
            clock_ms: 0.0,
            ticks: 0,
            score: 0,
            leaderboard,
            camera,
            running: true,
            player_name,
            report: TickReport::default(),
        }
    }

    /// Advance the round by one fixed tick of `dt_ms` simulated milliseconds.
    pub fn tick(&mut self, dt_ms: f64, pointer: Option<Vec2>, hooks: &mut dyn RoundHooks) {
        if !self.running {
            return;
        }
        self.clock_ms += dt_ms;
        self.ticks += 1;

        // 1. Deferred actions that came due
        let due = if self.events.is_empty() {
            Vec::new()
        } else {
            self.events.drain_due(self.clock_ms)
        };
        for action in due {
            match action {
                Deferred::Respawn { slot, dead } => {
                    if self.arena.replace_autonomous(slot, dead, &mut self.rng).is_some() {
                        log::debug!("respawned autonomous slot {}", slot);
                    }
                }
                Deferred::EndRound => {
                    self.running = false;
                    log::info!("Round over, final score {}", self.score);
                    return;
                }
            }
        }

        // 2. Snakes
        systems::tick(&mut self.arena, pointer, &mut self.rng, &mut self.report);

        // 3. Outcomes
        self.score += self.report.score_gained;
        let deaths = std::mem::take(&mut self.report.deaths);
        for death in &deaths {
            match death.controller {
                Controller::Player => {
                    log::info!(
                        "{} died at length {} with score {}",
                        self.player_name,
                        death.length,
                        self.score
                    );
                    if let Err(e) = hooks.on_score_final(self.score) {
                        log::warn!("score hook failed: {e}");
                    }
                    let delay = self.arena.config().schedule.round_over_delay_ms;
                    self.events.schedule(self.clock_ms + delay, Deferred::EndRound);
                }
                Controller::Autonomous => {
                    let slot = self.arena.autonomous().iter().position(|&e| e == death.entity);
                    if let Some(slot) = slot {
                        log::debug!("autonomous slot {} died at length {}", slot, death.length);
                        let delay = self.arena.config().schedule.respawn_delay_ms;
                        self.events.schedule(
                            self.clock_ms + delay,
                            Deferred::Respawn {
                                slot,
                                dead: death.entity,
                            },
                        );
                    }
                }
            }
        }
        self.report.deaths = deaths;

        // 4. Camera
        self.camera
            .follow(self.arena.live_player_head(), self.arena.viewport());

        // 5. Periodic maintenance
        let schedule = self.arena.config().schedule;
        if schedule.maintenance_interval > 0 && self.ticks % schedule.maintenance_interval == 0 {
            self.leaderboard = leaderboard::rank(&self.arena.ecs, schedule.leaderboard_size);
            if self.rng.f32() < schedule.replenish_chance
                && self.arena.food_count() < self.arena.config().food.soft_cap
            {
                self.arena.spawn_food(&mut self.rng);
            }
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.arena.set_viewport(viewport);
        self.camera.follow(self.arena.live_player_head(), viewport);
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Body, Motion};
    use crate::hooks::HookError;
    use crate::scheduler::TICK_MS;

    #[derive(Default)]
    struct Recorder {
        started: Vec<String>,
        scores: Vec<u32>,
        fail: bool,
    }

    impl RoundHooks for Recorder {
        fn initial_display_name(&mut self) -> Option<String> {
            None
        }

        fn on_round_start(&mut self, display_name: &str) -> Result<(), HookError> {
            self.started.push(display_name.to_owned());
            if self.fail {
                return Err("profile offline".into());
            }
            Ok(())
        }

        fn on_score_final(&mut self, score: u32) -> Result<(), HookError> {
            self.scores.push(score);
            if self.fail {
                return Err("profile offline".into());
            }
            Ok(())
        }
    }

    fn small_config() -> ArenaConfig {
        let mut cfg = ArenaConfig::default();
        cfg.schedule.autonomous_count = 2;
        cfg.food.initial_count = 0;
        cfg.schedule.replenish_chance = 0.0;
        cfg
    }

    fn set_segments(round: &mut Round, e: hecs::Entity, segs: Vec<Vec2>) {
        if let Ok(mut body) = round.arena.ecs.get::<&mut Body>(e) {
            body.segments = segs.into_iter().collect();
        }
    }

    #[test]
    fn start_populates_and_notifies() {
        let mut hooks = Recorder::default();
        let round = Round::start(
            "Noodle".into(),
            Vec2::new(800.0, 600.0),
            ArenaConfig::default(),
            fastrand::Rng::with_seed(1),
            &mut hooks,
        );

        assert_eq!(hooks.started, vec!["Noodle".to_string()]);
        assert!(round.is_running());
        assert_eq!(round.score(), 0);
        assert_eq!(round.arena().autonomous().len(), 10);
        assert_eq!(round.arena().food_count(), 200);
        assert_eq!(round.leaderboard().len(), 5);
        assert_eq!(round.camera().offset, Vec2::new(-400.0, -300.0));
    }

    #[test]
    fn player_death_ends_round_after_delay() {
        let mut hooks = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut round = Round::start(
            "Noodle".into(),
            Vec2::new(800.0, 600.0),
            small_config(),
            fastrand::Rng::with_seed(2),
            &mut hooks,
        );

        // A wall of body straight across the player's path.
        let wall = round.arena().autonomous()[0];
        let segs: Vec<Vec2> = (-20..=20).map(|i| Vec2::new(3.0, i as f32 * 3.0)).collect();
        set_segments(&mut round, wall, segs);
        if let Ok(mut body) = round.arena.ecs.get::<&mut Body>(wall) {
            body.target_length = 100;
        }
        if let Ok(mut motion) = round.arena.ecs.get::<&mut Motion>(wall) {
            motion.speed = 0.0;
        }

        round.tick(TICK_MS, None, &mut hooks);
        assert_eq!(hooks.scores, vec![0]);
        assert!(round.is_running());
        assert_eq!(round.pending_events(), 1);
        let frozen = round.camera().offset;

        let mut ticks = 1;
        while round.is_running() && ticks < 500 {
            round.tick(TICK_MS, None, &mut hooks);
            ticks += 1;
        }
        assert!(!round.is_running());
        // 2000ms at 60Hz, give or take a tick of rounding.
        assert!((120..=122).contains(&ticks), "ended after {ticks} ticks");
        assert_eq!(hooks.scores.len(), 1);
        assert_eq!(round.camera().offset, frozen);

        let clock = round.clock_ms();
        round.tick(TICK_MS, None, &mut hooks);
        assert_eq!(round.clock_ms(), clock);
    }

    #[test]
    fn dead_autonomous_snake_is_replaced() {
        let mut hooks = Recorder::default();
        let mut round = Round::start(
            "Noodle".into(),
            Vec2::new(800.0, 600.0),
            small_config(),
            fastrand::Rng::with_seed(3),
            &mut hooks,
        );
        if let Some(player) = round.arena().player() {
            let _ = round.arena.ecs.despawn(player);
        }

        let victim = round.arena().autonomous()[0];
        let blocker = round.arena().autonomous()[1];
        let spot = round
            .arena()
            .ecs
            .get::<&Body>(victim)
            .unwrap()
            .head()
            .unwrap();
        set_segments(&mut round, blocker, vec![spot]);

        round.tick(TICK_MS, None, &mut hooks);
        assert!(!round.arena().is_alive(victim));
        assert_eq!(round.arena().autonomous()[0], victim);

        while round.clock_ms() < 5100.0 {
            round.tick(TICK_MS, None, &mut hooks);
        }
        let fresh = round.arena().autonomous()[0];
        assert_ne!(fresh, victim);
        assert!(!round.arena().ecs.contains(victim));
        assert!(hooks.scores.is_empty());
    }

    #[test]
    fn maintenance_refreshes_leaderboard() {
        let mut hooks = Recorder::default();
        let mut round = Round::start(
            "Noodle".into(),
            Vec2::new(800.0, 600.0),
            ArenaConfig::default(),
            fastrand::Rng::with_seed(4),
            &mut hooks,
        );
        let mut last_score = 0;
        for _ in 0..90 {
            round.tick(TICK_MS, Some(Vec2::new(600.0, 300.0)), &mut hooks);
            assert!(round.score() >= last_score);
            last_score = round.score();
        }

        let board = round.leaderboard();
        assert!(!board.is_empty() && board.len() <= 5);
        assert!(board.windows(2).all(|w| w[0].length >= w[1].length));
    }

    fn lone_player_config(initial_food: usize) -> ArenaConfig {
        let mut cfg = ArenaConfig::default();
        cfg.schedule.autonomous_count = 0;
        cfg.schedule.replenish_chance = 1.0;
        cfg.food.initial_count = initial_food;
        cfg
    }

    #[test]
    fn replenishes_one_pellet_per_maintenance_tick() {
        let mut hooks = Recorder::default();
        let mut round = Round::start(
            "Noodle".into(),
            Vec2::new(800.0, 600.0),
            lone_player_config(10),
            fastrand::Rng::with_seed(6),
            &mut hooks,
        );
        assert_eq!(round.arena().food_count(), 10);

        for _ in 0..29 {
            round.tick(TICK_MS, None, &mut hooks);
        }
        assert_eq!(round.arena().food_count(), 10);
        round.tick(TICK_MS, None, &mut hooks);
        assert_eq!(round.arena().food_count(), 11);

        for _ in 0..29 {
            round.tick(TICK_MS, None, &mut hooks);
        }
        assert_eq!(round.arena().food_count(), 11);
        round.tick(TICK_MS, None, &mut hooks);
        assert_eq!(round.arena().food_count(), 12);
    }

    #[test]
    fn no_replenishment_at_soft_cap() {
        let mut cfg = lone_player_config(20);
        cfg.food.soft_cap = 20;
        let mut hooks = Recorder::default();
        let mut round = Round::start(
            "Noodle".into(),
            Vec2::new(800.0, 600.0),
            cfg,
            fastrand::Rng::with_seed(7),
            &mut hooks,
        );

        for _ in 0..90 {
            round.tick(TICK_MS, None, &mut hooks);
        }
        assert_eq!(round.ticks(), 90);
        assert_eq!(round.arena().food_count(), 20);
    }
}
