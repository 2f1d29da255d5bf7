use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Signed shortest rotation from `current` to `target`, in [-PI, PI).
pub fn angle_diff(current: f32, target: f32) -> f32 {
    let d = (target - current).rem_euclid(TAU);
    if d >= PI {
        d - TAU
    } else {
        d
    }
}

/// Turn `current` toward `target` by `rate` of the remaining shortest arc.
pub fn approach_angle(current: f32, target: f32, rate: f32) -> f32 {
    current + angle_diff(current, target) * rate
}

/// Unit vector pointing along `angle`.
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the ray from `from` to `to`.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_takes_shorter_arc() {
        let d = angle_diff(0.1, TAU - 0.1);
        assert!((d + 0.2).abs() < 1e-5, "got {d}");

        let d = angle_diff(TAU - 0.1, 0.1);
        assert!((d - 0.2).abs() < 1e-5, "got {d}");
    }

    #[test]
    fn equal_angles_have_no_error() {
        for x in [0.0, 1.0, -2.5, PI, -PI, 7.0, 100.25] {
            assert_eq!(angle_diff(x, x), 0.0, "angle {x}");
            assert_eq!(approach_angle(x, x, 0.1), x);
        }
        assert_eq!(angle_diff(0.0, TAU), 0.0);
    }

    #[test]
    fn diff_stays_in_half_open_range() {
        for i in -40..40 {
            let target = i as f32 * 0.7;
            let d = angle_diff(1.3, target);
            assert!((-PI..PI).contains(&d), "{target} -> {d}");
        }
    }

    #[test]
    fn half_turn_converges_without_oscillation() {
        let mut angle = 0.0f32;
        let mut remaining = angle_diff(angle, PI).abs();
        let mut direction = 0.0f32;

        for _ in 0..200 {
            let next = approach_angle(angle, PI, 0.1);
            let step = next - angle;
            if direction == 0.0 {
                direction = step.signum();
            } else if step.abs() > 1e-6 {
                assert_eq!(step.signum(), direction, "turn direction flipped");
            }
            angle = next;

            let now = angle_diff(angle, PI).abs();
            assert!(now <= remaining + 1e-5, "distance grew: {remaining} -> {now}");
            remaining = now;
        }
        assert!(remaining < 1e-3);
    }

    #[test]
    fn heading_and_angle_to_agree() {
        let a = angle_to(Vec2::ZERO, Vec2::new(0.0, 5.0));
        assert!((a - PI / 2.0).abs() < 1e-6);
        let v = heading_vector(a);
        assert!(v.abs_diff_eq(Vec2::Y, 1e-6));
    }
}
