use crate::config::SnakeConfig;
use crate::ecs::components::*;
use glam::Vec2;

/// Shared palette for snakes and food.
const PALETTE: [[u8; 3]; 10] = [
    [0xFF, 0x57, 0x33],
    [0x33, 0xFF, 0x57],
    [0x33, 0x57, 0xFF],
    [0xF3, 0xFF, 0x33],
    [0xFF, 0x33, 0xF3],
    [0x33, 0xFF, 0xF3],
    [0xFF, 0x8C, 0x33],
    [0x8C, 0xFF, 0x33],
    [0x33, 0x8C, 0xFF],
    [0xFF, 0x33, 0x8C],
];

/// Spawn a live snake with a single segment at `head`.
pub fn spawn_snake(
    world: &mut hecs::World,
    head: Vec2,
    controller: Controller,
    name: String,
    color: u32,
    cfg: &SnakeConfig,
) -> hecs::Entity {
    world.spawn((
        Body::new(head, cfg.radius, cfg.initial_length),
        Heading::default(),
        Motion {
            speed: cfg.speed,
            turn_rate: cfg.turn_rate,
        },
        controller,
        Appearance { color },
        SnakeName(name),
        Alive(true),
    ))
}

/// Procedural name for an autonomous snake, e.g. "Sneaky Viper".
pub fn generate_snake_name(rng: &mut fastrand::Rng) -> String {
    const PREFIXES: &[&str] = &["Hungry", "Sneaky", "Speedy", "Slimy", "Slithery", "Wiggly"];
    const SUFFIXES: &[&str] = &["Snake", "Python", "Cobra", "Viper", "Worm", "Eel"];
    format!(
        "{} {}",
        PREFIXES[rng.usize(0..PREFIXES.len())],
        SUFFIXES[rng.usize(0..SUFFIXES.len())],
    )
}

/// Random palette color, RGBA packed.
pub fn random_color(rng: &mut fastrand::Rng) -> u32 {
    let [r, g, b] = PALETTE[rng.usize(0..PALETTE.len())];
    pack_rgba(r, g, b, 0xFF)
}

#[inline]
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[test]
    fn spawned_snake_starts_with_one_live_segment() {
        let mut world = hecs::World::new();
        let cfg = ArenaConfig::default();
        let e = spawn_snake(
            &mut world,
            Vec2::new(4.0, -2.0),
            Controller::Autonomous,
            "Test".into(),
            0xFFFFFFFF,
            &cfg.snake,
        );

        let body = world.get::<&Body>(e).unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body.head(), Some(Vec2::new(4.0, -2.0)));
        assert_eq!(body.target_length, cfg.snake.initial_length);
        assert!(world.get::<&Alive>(e).unwrap().0);
    }

    #[test]
    fn names_have_prefix_and_suffix() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..20 {
            let name = generate_snake_name(&mut rng);
            assert_eq!(name.split(' ').count(), 2, "{name}");
        }
    }

    #[test]
    fn palette_colors_are_opaque() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..20 {
            assert_eq!(random_color(&mut rng) & 0xFF, 0xFF);
        }
    }
}
