//! Data-driven game balance
//!
//! Every numeric knob the simulation reads lives here. Defaults reproduce the
//! classic arcade feel; partial JSON overrides only the fields it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_health: u8,
    pub player_spawn_y: f32,

    // === Projectiles ===
    pub shot_width: f32,
    pub shot_height: f32,
    pub player_shot_speed: f32,
    pub enemy_shot_speed: f32,
    /// Minimum vertical gap between the player and the newest shot before refiring
    pub fire_spacing: f32,
    pub homing_gain: f32,
    pub homing_max_lateral: f32,

    // === Formation ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub formation_rows: u32,
    pub formation_cols: u32,
    pub formation_origin_x: f32,
    pub formation_origin_y: f32,
    pub formation_pitch_x: f32,
    pub formation_pitch_y: f32,
    pub row_base_speed: f32,
    pub row_speed_step: f32,
    pub speed_jitter: f32,
    pub formation_drift: f32,
    pub formation_drop: f32,

    // === Enemy fire ===
    pub grace_period_ms: u64,
    pub volley_stagger_ms: u64,
    pub volley_spread: f32,

    // === Thresholds ===
    pub overrun_y: f32,
    pub danger_warning_y: f32,
    pub danger_critical_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,
            player_spawn_y: PLAYER_SPAWN_Y,

            shot_width: SHOT_WIDTH,
            shot_height: SHOT_HEIGHT,
            player_shot_speed: PLAYER_SHOT_SPEED,
            enemy_shot_speed: ENEMY_SHOT_SPEED,
            fire_spacing: FIRE_SPACING,
            homing_gain: HOMING_GAIN,
            homing_max_lateral: HOMING_MAX_LATERAL,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            formation_rows: FORMATION_ROWS,
            formation_cols: FORMATION_COLS,
            formation_origin_x: FORMATION_ORIGIN_X,
            formation_origin_y: FORMATION_ORIGIN_Y,
            formation_pitch_x: FORMATION_PITCH_X,
            formation_pitch_y: FORMATION_PITCH_Y,
            row_base_speed: ROW_BASE_SPEED,
            row_speed_step: ROW_SPEED_STEP,
            speed_jitter: SPEED_JITTER,
            formation_drift: FORMATION_DRIFT,
            formation_drop: FORMATION_DROP,

            grace_period_ms: GRACE_PERIOD_MS,
            volley_stagger_ms: VOLLEY_STAGGER_MS,
            volley_spread: VOLLEY_SPREAD,

            overrun_y: OVERRUN_Y,
            danger_warning_y: DANGER_WARNING_Y,
            danger_critical_y: DANGER_CRITICAL_Y,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Pretty JSON for writing a tuning file
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.width <= self.player_width || self.width <= self.enemy_width {
            return Err(TuningError::Invalid(format!(
                "playfield width {} must exceed player and enemy widths",
                self.width
            )));
        }
        if self.height <= 0.0 || self.player_spawn_y >= self.height {
            return Err(TuningError::Invalid(format!(
                "player spawn y {} must lie inside playfield height {}",
                self.player_spawn_y, self.height
            )));
        }
        if self.formation_rows == 0 || self.formation_cols == 0 {
            return Err(TuningError::Invalid("formation needs at least one row and column".into()));
        }
        let cells = u64::from(self.formation_rows) * u64::from(self.formation_cols);
        if cells > MAX_FORMATION_CELLS {
            return Err(TuningError::Invalid(format!(
                "formation of {} enemies exceeds the limit of {MAX_FORMATION_CELLS}",
                cells
            )));
        }
        if self.player_health == 0 {
            return Err(TuningError::Invalid("player health must be at least 1".into()));
        }
        if self.player_shot_speed <= 0.0 || self.enemy_shot_speed <= 0.0 {
            return Err(TuningError::Invalid("projectile speeds must be positive".into()));
        }
        if self.homing_max_lateral < 0.0 || self.speed_jitter < 0.0 {
            return Err(TuningError::Invalid("homing cap and speed jitter must be non-negative".into()));
        }
        if self.danger_critical_y < self.danger_warning_y {
            return Err(TuningError::Invalid(
                "critical danger threshold must be at or below the warning threshold".into(),
            ));
        }
        Ok(())
    }

    /// Player x at spawn (horizontally centered)
    pub fn player_spawn_x(&self) -> f32 {
        self.width / 2.0 - self.player_width / 2.0
    }

    /// Rightmost x an enemy's left edge may reach
    pub fn enemy_max_x(&self) -> f32 {
        self.width - self.enemy_width
    }

    /// Rightmost x the player's left edge may reach
    pub fn player_max_x(&self) -> f32 {
        self.width - self.player_width
    }
}
