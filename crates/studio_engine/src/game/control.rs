//! Game progression
//!
//! There is no explicit state enum. The visible states are predicates over
//! the energy counters and the time since the latest shot, damage and stage
//! advance. Every predicate takes the current time so tests can drive it
//! from a manual clock.

use crate::core::config::GameplayConfig;

/// Player energy at the start of every stage
pub const PLAYER_ENERGY: i32 = 5;
/// Enemy energy per stage level
pub const BASE_ENEMY_ENERGY: i32 = 30;

/// How long each transient status stays visible, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusWindows {
    /// After `shoot`
    pub shot: f64,
    /// After `damaged`
    pub damaged: f64,
    /// After a stage advance
    pub stage_cleared: f64,
}

impl Default for StatusWindows {
    fn default() -> Self {
        Self {
            shot: 0.15,
            damaged: 1.5,
            stage_cleared: 0.5,
        }
    }
}

/// Energy, stage and status timestamps of one session
#[derive(Debug, Clone)]
pub struct GameControl {
    base_player_energy: i32,
    base_enemy_energy: i32,
    windows: StatusWindows,

    player_energy: i32,
    enemy_energy: i32,
    stage: i32,

    shot_at: Option<f64>,
    damaged_at: Option<f64>,
    stage_cleared_at: Option<f64>,
    stage_banner_armed: bool,
}

impl GameControl {
    /// Session with the standard energies and windows
    pub fn new() -> Self {
        Self::with_rules(PLAYER_ENERGY, BASE_ENEMY_ENERGY, StatusWindows::default())
    }

    /// Session with custom energies and windows
    pub fn with_rules(player_energy: i32, base_enemy_energy: i32, windows: StatusWindows) -> Self {
        Self {
            base_player_energy: player_energy,
            base_enemy_energy,
            windows,
            player_energy,
            enemy_energy: base_enemy_energy,
            stage: 1,
            shot_at: None,
            damaged_at: None,
            stage_cleared_at: None,
            stage_banner_armed: false,
        }
    }

    /// Session configured from gameplay settings
    pub fn from_config(config: &GameplayConfig) -> Self {
        Self::with_rules(
            config.player_energy,
            config.base_enemy_energy,
            StatusWindows {
                shot: config.shot_window,
                damaged: config.damaged_window,
                stage_cleared: config.stage_cleared_window,
            },
        )
    }

    /// Land a hit on the adversary; clears the stage when its energy runs out
    pub fn attack_enemy(&mut self, now: f64) {
        self.enemy_energy -= 1;
        log::debug!("Enemy hit, energy {}", self.enemy_energy);
        if self.enemy_energy <= 0 {
            self.goto_next_stage();
            self.stage_cleared_at = Some(now);
        }
    }

    /// Take a hit
    pub fn damaged(&mut self, now: f64) {
        self.player_energy -= 1;
        self.damaged_at = Some(now);
        log::debug!("Player damaged, energy {}", self.player_energy);
    }

    /// Record a shot
    pub fn shoot(&mut self, now: f64) {
        self.shot_at = Some(now);
    }

    /// Back to stage 1 with full energies
    pub fn restart(&mut self) {
        self.player_energy = self.base_player_energy;
        self.enemy_energy = self.base_enemy_energy;
        self.stage = 1;
        log::info!("Game restarted");
    }

    /// Whether a shot happened within the shot window
    pub fn is_shot(&self, now: f64) -> bool {
        within(self.shot_at, now, self.windows.shot)
    }

    /// Whether damage happened within the damaged window
    pub fn is_damaged(&self, now: f64) -> bool {
        within(self.damaged_at, now, self.windows.damaged)
    }

    /// Whether a stage advance happened within the stage-cleared window
    ///
    /// The very first query of a session stamps the time, so the opening
    /// stage is announced too.
    pub fn is_stage_cleared(&mut self, now: f64) -> bool {
        if !self.stage_banner_armed {
            self.stage_cleared_at = Some(now);
            self.stage_banner_armed = true;
        }
        within(self.stage_cleared_at, now, self.windows.stage_cleared)
    }

    /// Whether the player ran out of energy; only `restart` clears it
    pub fn is_game_ended(&self) -> bool {
        self.player_energy <= 0
    }

    /// Current stage, starting at 1
    pub fn stage(&self) -> i32 {
        self.stage
    }

    /// Remaining player energy
    pub fn player_energy(&self) -> i32 {
        self.player_energy
    }

    /// Remaining enemy energy
    pub fn enemy_energy(&self) -> i32 {
        self.enemy_energy
    }

    fn goto_next_stage(&mut self) {
        self.stage += 1;
        self.player_energy = self.base_player_energy;
        self.enemy_energy = self.base_enemy_energy * self.stage;
        log::info!("Stage {} begins, enemy energy {}", self.stage, self.enemy_energy);
    }
}

impl Default for GameControl {
    fn default() -> Self {
        Self::new()
    }
}

fn within(stamp: Option<f64>, now: f64, window: f64) -> bool {
    stamp.is_some_and(|at| now - at < window)
}
