use hecs::Entity;

use crate::ecs::components::{Alive, Appearance, Body, Controller};
use crate::food;
use crate::world::Arena;

/// Action deferred to a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Replace the dead snake in an autonomous slot.
    Respawn { slot: usize, dead: Entity },
    /// Stop the round after the player died.
    EndRound,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    /// Round clock time (ms) at which the action becomes due.
    pub due_ms: f64,
    pub action: Deferred,
}

/// Deferred actions of one round, kept in due order.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, action: Deferred) {
        // Stable insert: equal due times keep scheduling order.
        let idx = self.events.partition_point(|e| e.due_ms <= due_ms);
        self.events.insert(idx, ScheduledEvent { due_ms, action });
    }

    /// Remove and return every action due at or before `now_ms`, oldest first.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let split = self.events.partition_point(|e| e.due_ms <= now_ms);
        self.events.drain(..split).map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A snake that died this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Death {
    pub entity: Entity,
    pub controller: Controller,
    /// Length the snake had reached.
    pub length: usize,
}

/// Mark a live snake dead and scatter part of its body as food.
///
/// Returns `None` if the entity is not a live snake.
pub fn kill(arena: &mut Arena, entity: Entity) -> Option<Death> {
    let controller = arena.controller(entity)?;
    let stride = arena.config().food.corpse_stride;
    let (positions, color, length) = {
        let mut query = arena
            .ecs
            .query_one::<(&mut Alive, &Body, &Appearance)>(entity)
            .ok()?;
        let (alive, body, appearance) = query.get()?;
        if !alive.0 {
            return None;
        }
        alive.0 = false;
        let positions = food::corpse_positions(body.segments.iter().copied(), stride);
        (positions, appearance.color, body.target_length)
    };

    let pellet = food::corpse_food(&arena.config().food, color);
    for pos in positions {
        food::spawn_food_at(&mut arena.ecs, pos, pellet);
    }

    Some(Death {
        entity,
        controller,
        length,
    })
}
