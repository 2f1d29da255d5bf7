/// Tuning for a single snake body.
#[derive(Debug, Clone, Copy)]
pub struct SnakeConfig {
    /// World units moved per tick.
    pub speed: f32,
    /// Fraction of the remaining heading error corrected per tick, in (0, 1).
    pub turn_rate: f32,
    /// Segment radius; also the eating distance.
    pub radius: f32,
    /// Body length a fresh snake grows toward.
    pub initial_length: usize,
    /// Head is drawn this much larger than trailing segments.
    pub head_scale: f32,
}

/// Tuning for food spawning and corpse conversion.
#[derive(Debug, Clone, Copy)]
pub struct FoodConfig {
    /// Food placed when a round starts.
    pub initial_count: usize,
    /// Periodic replenishment stops at this count.
    pub soft_cap: usize,
    /// Minimum distance from the player's head for new food.
    pub min_player_distance: f32,
    /// Chance that a spawned item is large.
    pub large_chance: f32,
    pub small_radius: f32,
    pub small_value: u32,
    pub large_radius: f32,
    pub large_value: u32,
    /// Every Nth body segment of a dead snake becomes food.
    pub corpse_stride: usize,
}

/// Autonomous steering drives.
#[derive(Debug, Clone, Copy)]
pub struct SteeringConfig {
    /// Per-tick chance of a random heading nudge.
    pub wander_chance: f32,
    /// Maximum nudge either way (radians).
    pub wander_spread: f32,
    /// Distance from the world edge that triggers a turn back.
    pub boundary_margin: f32,
    /// World half-extent is this multiple of the larger viewport side.
    pub world_scale: f32,
    /// Food closer than this is chased.
    pub food_detect_radius: f32,
}

/// Round timing and population.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleConfig {
    pub autonomous_count: usize,
    /// Minimum distance from the player when placing a snake.
    pub snake_min_player_distance: f32,
    pub respawn_delay_ms: f64,
    pub round_over_delay_ms: f64,
    /// Leaderboard refresh and food top-up cadence, in ticks.
    pub maintenance_interval: u64,
    /// Chance of a food top-up on each maintenance tick.
    pub replenish_chance: f32,
    pub leaderboard_size: usize,
    /// Rejection sampling gives up after this many draws.
    pub placement_retries: usize,
}

/// Every gameplay constant in one place. `Default` carries the reference tuning.
#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    pub snake: SnakeConfig,
    pub food: FoodConfig,
    pub steering: SteeringConfig,
    pub schedule: ScheduleConfig,
    /// Head-to-segment kill distance as a fraction of the segment radius.
    pub kill_radius_factor: f32,
    pub grid_spacing: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            snake: SnakeConfig {
                speed: 3.0,
                turn_rate: 0.1,
                radius: 15.0,
                initial_length: 10,
                head_scale: 1.2,
            },
            food: FoodConfig {
                initial_count: 200,
                soft_cap: 300,
                min_player_distance: 100.0,
                large_chance: 0.1,
                small_radius: 5.0,
                small_value: 1,
                large_radius: 10.0,
                large_value: 3,
                corpse_stride: 3,
            },
            steering: SteeringConfig {
                wander_chance: 0.02,
                wander_spread: std::f32::consts::FRAC_PI_4,
                boundary_margin: 200.0,
                world_scale: 2.0,
                food_detect_radius: 200.0,
            },
            schedule: ScheduleConfig {
                autonomous_count: 10,
                snake_min_player_distance: 300.0,
                respawn_delay_ms: 5000.0,
                round_over_delay_ms: 2000.0,
                maintenance_interval: 30,
                replenish_chance: 0.3,
                leaderboard_size: 5,
                placement_retries: 64,
            },
            kill_radius_factor: 0.8,
            grid_spacing: 50.0,
        }
    }
}

impl ArenaConfig {
    /// Head-to-segment distance below which a snake dies.
    pub fn kill_radius(&self, radius: f32) -> f32 {
        radius * self.kill_radius_factor
    }

    /// First own-body index a head can collide with.
    ///
    /// Consecutive segments sit `speed` apart, so the first few behind the head are
    /// always inside the kill radius and are skipped along with the head itself.
    pub fn self_collision_start(&self, radius: f32, speed: f32) -> usize {
        if speed <= f32::EPSILON {
            return usize::MAX;
        }
        let neck = ((self.kill_radius(radius) / speed).ceil() as usize).saturating_add(1);
        neck.max(1)
    }
}
