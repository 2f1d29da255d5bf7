use std::collections::VecDeque;

use glam::Vec2;

/// World position of a point entity (food).
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Snake body: segment positions, head first.
#[derive(Debug, Clone)]
pub struct Body {
    pub segments: VecDeque<Vec2>,
    /// Segment radius in world units.
    pub radius: f32,
    /// Length the body grows toward; segments are truncated to it every tick.
    pub target_length: usize,
}

impl Body {
    pub fn new(head: Vec2, radius: f32, target_length: usize) -> Self {
        let mut segments = VecDeque::with_capacity(target_length.max(1));
        segments.push_front(head);
        Self {
            segments,
            radius,
            target_length,
        }
    }

    #[inline]
    pub fn head(&self) -> Option<Vec2> {
        self.segments.front().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Current and desired travel direction (radians).
#[derive(Debug, Clone, Copy, Default)]
pub struct Heading {
    pub angle: f32,
    pub target: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Motion {
    /// World units per tick.
    pub speed: f32,
    pub turn_rate: f32,
}

/// Where a snake's target heading comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// Follows the pointer.
    Player,
    /// Steered by wander / boundary / food drives.
    Autonomous,
}

/// RGBA packed as u32.
#[derive(Debug, Clone, Copy)]
pub struct Appearance {
    pub color: u32,
}

/// Display name drawn above the head and listed on the leaderboard.
#[derive(Debug, Clone)]
pub struct SnakeName(pub String);

/// Cleared on death. Dead snakes keep their entity until replaced.
#[derive(Debug, Clone, Copy)]
pub struct Alive(pub bool);

/// A food pellet. Paired with [`Position`].
#[derive(Debug, Clone, Copy)]
pub struct Food {
    pub radius: f32,
    /// Growth (and player score) granted when eaten.
    pub value: u32,
    pub color: u32,
}
