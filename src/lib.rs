//! Space Invaders - A fixed-tick arcade simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, fire scheduling, collisions, game state)
//! - `platform`: Input sampling and fixed-step timing for drivers
//! - `persistence`: Posting feed storage collaborator (not used by the engine)
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate
    pub const TICK_RATE_HZ: u64 = 60;
    /// Fixed simulation timestep in microseconds (1/60 s, rounded up)
    pub const SIM_DT_US: u64 = 16_667;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the fixed-step driver will accept (100 ms)
    pub const MAX_FRAME_US: u64 = 100_000;

    /// Playfield dimensions (y grows downward)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_HEALTH: u8 = 3;
    /// Spawn row, 60 px above the bottom edge
    pub const PLAYER_SPAWN_Y: f32 = GAME_HEIGHT - 60.0;

    /// Projectiles (player and enemy share the same box)
    pub const SHOT_WIDTH: f32 = 4.0;
    pub const SHOT_HEIGHT: f32 = 10.0;
    pub const PLAYER_SHOT_SPEED: f32 = 8.0;
    pub const ENEMY_SHOT_SPEED: f32 = 6.0;
    /// Vertical gap the newest shot must clear before the player can fire again
    pub const FIRE_SPACING: f32 = 50.0;

    /// Homing drones
    pub const HOMING_GAIN: f32 = 0.5;
    pub const HOMING_MAX_LATERAL: f32 = 3.0;

    /// Enemy box
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;

    /// Formation layout
    pub const FORMATION_ROWS: u32 = 6;
    pub const FORMATION_COLS: u32 = 12;
    /// Upper bound on rows x cols accepted from a tuning file
    pub const MAX_FORMATION_CELLS: u64 = 4_096;
    pub const FORMATION_ORIGIN_X: f32 = 50.0;
    pub const FORMATION_ORIGIN_Y: f32 = 30.0;
    pub const FORMATION_PITCH_X: f32 = 55.0;
    pub const FORMATION_PITCH_Y: f32 = 45.0;
    pub const ROW_BASE_SPEED: f32 = 0.2;
    pub const ROW_SPEED_STEP: f32 = 0.1;
    pub const SPEED_JITTER: f32 = 0.3;
    pub const FORMATION_DRIFT: f32 = 0.2;
    pub const FORMATION_DROP: f32 = 10.0;

    /// Enemy fire timing
    pub const GRACE_PERIOD_MS: u64 = 5_000;
    pub const VOLLEY_STAGGER_MS: u64 = 150;
    pub const VOLLEY_SPREAD: f32 = 8.0;

    /// Enemy y at which the invasion reaches the player
    pub const OVERRUN_Y: f32 = GAME_HEIGHT - 80.0;
    /// Danger thresholds on the most advanced enemy
    pub const DANGER_WARNING_Y: f32 = GAME_HEIGHT - 250.0;
    pub const DANGER_CRITICAL_Y: f32 = GAME_HEIGHT - 150.0;
}

/// Convert a microsecond clock reading to whole milliseconds
#[inline]
pub fn us_to_ms(us: u64) -> u64 {
    us / 1_000
}

/// Convert milliseconds to microseconds
#[inline]
pub fn ms_to_us(ms: u64) -> u64 {
    ms.saturating_mul(1_000)
}
