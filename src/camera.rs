use glam::Vec2;

/// Screen-space view onto the arena.
///
/// Follows the player's head while it lives and freezes where it was otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    /// World position of the viewport's top-left corner.
    pub offset: Vec2,
}

impl Camera {
    /// Center the viewport on `focus`, or keep the current offset when there is none.
    pub fn follow(&mut self, focus: Option<Vec2>, viewport: Vec2) {
        if let Some(p) = focus {
            self.offset = p - viewport * 0.5;
        }
    }

    #[inline]
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p - self.offset
    }

    /// Screen-space x (vertical lines) and y (horizontal lines) of the background grid.
    pub fn grid_lines(&self, viewport: Vec2, spacing: f32) -> (Vec<f32>, Vec<f32>) {
        if spacing <= 0.0 {
            return (Vec::new(), Vec::new());
        }
        let axis = |offset: f32, extent: f32| {
            let mut lines = Vec::new();
            let mut at = -offset.rem_euclid(spacing);
            while at < extent {
                lines.push(at);
                at += spacing;
            }
            lines
        };
        (
            axis(self.offset.x, viewport.x),
            axis(self.offset.y, viewport.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_centers_player() {
        let mut cam = Camera::default();
        let viewport = Vec2::new(800.0, 600.0);
        cam.follow(Some(Vec2::new(100.0, 50.0)), viewport);
        assert_eq!(cam.offset, Vec2::new(-300.0, -250.0));
        assert_eq!(cam.world_to_screen(Vec2::new(100.0, 50.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn no_focus_freezes_camera() {
        let mut cam = Camera {
            offset: Vec2::new(12.0, 34.0),
        };
        cam.follow(None, Vec2::new(800.0, 600.0));
        assert_eq!(cam.offset, Vec2::new(12.0, 34.0));
    }

    #[test]
    fn grid_starts_at_or_before_left_edge() {
        let cam = Camera {
            offset: Vec2::new(-30.0, 70.0),
        };
        let (xs, ys) = cam.grid_lines(Vec2::new(200.0, 100.0), 50.0);
        assert_eq!(xs, vec![-20.0, 30.0, 80.0, 130.0, 180.0]);
        assert_eq!(ys, vec![-20.0, 30.0, 80.0]);
        // Every line sits on a world multiple of the spacing.
        for x in xs {
            assert_eq!((x + cam.offset.x).rem_euclid(50.0), 0.0);
        }
    }
}
