//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven by a logical microsecond clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod formation;
pub mod motion;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{HitReport, Rect, resolve_enemy_shots, resolve_player_shots};
pub use formation::{enemy_kind_at, move_formation, spawn_formation};
pub use schedule::{BurstQueue, FireIntent, FireProfile, PendingShot, fire_profile};
pub use snapshot::Snapshot;
pub use state::{
    DangerLevel, Enemy, EnemyKind, EnemyShot, EnemyStats, GameEvent, GamePhase, GameState,
    HealthTier, Outcome, Player, PlayerShot, ShotKind,
};
pub use tick::{TickInput, tick};
