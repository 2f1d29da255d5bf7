use crate::ecs::components::{Alive, Appearance, Body, SnakeName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub color: u32,
    pub length: usize,
}

/// Live snakes ranked by target length, longest first, at most `limit` entries.
pub fn rank(world: &hecs::World, limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = world
        .query::<(&Body, &SnakeName, &Appearance, &Alive)>()
        .iter()
        .filter(|(_, (_, _, _, alive))| alive.0)
        .map(|(_, (body, name, appearance, _))| LeaderboardEntry {
            name: name.0.clone(),
            color: appearance.color,
            length: body.target_length,
        })
        .collect();

    entries.sort_by(|a, b| b.length.cmp(&a.length));
    entries.truncate(limit);
    entries
}
