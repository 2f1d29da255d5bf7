/// Error returned by a round hook. Logged and otherwise ignored.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Env var read by [`LocalProfile`] for the initial display name.
pub const PLAYER_NAME_ENV: &str = "SNAKEPIT_PLAYER_NAME";

/// Name used when the profile has none or the menu field is blank.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Integration points around a round: profile lookup and score reporting.
///
/// Calls are fire-and-forget. The round never waits on or retries them.
pub trait RoundHooks {
    /// Name to pre-fill in the start menu.
    fn initial_display_name(&mut self) -> Option<String>;

    fn on_round_start(&mut self, display_name: &str) -> Result<(), HookError>;

    /// Called once when the player dies, with the round's final score.
    fn on_score_final(&mut self, score: u32) -> Result<(), HookError>;
}

/// Session-local profile: name from the environment, best score kept in memory.
#[derive(Debug, Default)]
pub struct LocalProfile {
    name: Option<String>,
    best_score: Option<u32>,
    rounds: u32,
}

impl LocalProfile {
    pub fn from_env() -> Self {
        std::env::var(PLAYER_NAME_ENV)
            .map(Self::with_name)
            .unwrap_or_default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

}

impl RoundHooks for LocalProfile {
    fn initial_display_name(&mut self) -> Option<String> {
        self.name.clone()
    }

    fn on_round_start(&mut self, display_name: &str) -> Result<(), HookError> {
        self.rounds += 1;
        self.name = Some(display_name.to_owned());
        log::debug!("profile: round {} started as {:?}", self.rounds, display_name);
        Ok(())
    }

    fn on_score_final(&mut self, score: u32) -> Result<(), HookError> {
        if self.best_score.map_or(true, |best| score > best) {
            self.best_score = Some(score);
            log::info!("New best score: {}", score);
        } else {
            log::debug!("profile: final score {}", score);
        }
        Ok(())
    }
}

/// Display name for a new round: trimmed input, or the default when blank.
pub fn resolve_display_name(input: Option<&str>) -> String {
    match input.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => DEFAULT_PLAYER_NAME.to_owned(),
    }
}
