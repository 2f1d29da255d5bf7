use crate::ecs::components::{Alive, Body, Heading, Motion};
use crate::math::{approach_angle, heading_vector};

/// Turn toward the target heading, push a new head one step ahead and drop
/// tail segments beyond the target length.
pub fn advance(body: &mut Body, heading: &mut Heading, motion: &Motion) {
    let Some(head) = body.head() else {
        return;
    };

    heading.angle = approach_angle(heading.angle, heading.target, motion.turn_rate);
    body.segments
        .push_front(head + heading_vector(heading.angle) * motion.speed);
    body.segments.truncate(body.target_length.max(1));
}

/// Move one live snake a single tick.
pub fn integrate(world: &mut hecs::World, entity: hecs::Entity) {
    let Ok(mut query) = world.query_one::<(&mut Body, &mut Heading, &Motion, &Alive)>(entity) else {
        return;
    };
    if let Some((body, heading, motion, alive)) = query.get() {
        if alive.0 {
            advance(body, heading, motion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn body_at(head: Vec2, target_length: usize) -> Body {
        Body::new(head, 15.0, target_length)
    }

    #[test]
    fn single_step_moves_head_by_speed() {
        let mut body = body_at(Vec2::ZERO, 10);
        let mut heading = Heading::default();
        let motion = Motion {
            speed: 1.0,
            turn_rate: 0.1,
        };

        advance(&mut body, &mut heading, &motion);

        let segs: Vec<Vec2> = body.segments.iter().copied().collect();
        assert_eq!(segs, vec![Vec2::new(1.0, 0.0), Vec2::ZERO]);
    }

    #[test]
    fn body_never_exceeds_target_length() {
        let mut body = body_at(Vec2::ZERO, 4);
        let mut heading = Heading {
            angle: 0.0,
            target: 1.0,
        };
        let motion = Motion {
            speed: 3.0,
            turn_rate: 0.1,
        };

        for step in 0..20 {
            advance(&mut body, &mut heading, &motion);
            assert_eq!(body.len(), (step + 2).min(4));
        }
        assert!((heading.angle - 1.0).abs() < 0.2);
    }

    #[test]
    fn shrunk_target_trims_tail() {
        let mut body = body_at(Vec2::ZERO, 10);
        let mut heading = Heading::default();
        let motion = Motion {
            speed: 2.0,
            turn_rate: 0.1,
        };
        for _ in 0..9 {
            advance(&mut body, &mut heading, &motion);
        }
        assert_eq!(body.len(), 10);

        body.target_length = 3;
        advance(&mut body, &mut heading, &motion);
        assert_eq!(body.len(), 3);
        assert_eq!(body.head(), Some(Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn dead_snakes_stay_put() {
        let mut world = hecs::World::new();
        let e = world.spawn((
            body_at(Vec2::ZERO, 10),
            Heading::default(),
            Motion {
                speed: 3.0,
                turn_rate: 0.1,
            },
            Alive(false),
        ));

        integrate(&mut world, e);
        assert_eq!(world.get::<&Body>(e).unwrap().len(), 1);
    }
}
