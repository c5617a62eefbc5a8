//! Game state and core simulation types
//!
//! Everything the engine mutates lives in `GameState`. Enemies are never removed
//! from their vector; `alive = false` keeps them in place for iteration and rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::formation::spawn_formation;
use super::schedule::BurstQueue;
use crate::tuning::Tuning;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every enemy eliminated
    Victory,
    /// An enemy reached the player's line
    Overrun,
    /// Player health ran out
    Destroyed,
}

impl Outcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, Outcome::Victory)
    }

    /// Game-over banner text
    pub fn message(&self) -> &'static str {
        if self.is_victory() {
            "You defeated every invader!"
        } else {
            "The invaders took over the earth!"
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver(Outcome),
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GamePhase::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Short HUD label
    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "ready",
            GamePhase::Running => "running",
            GamePhase::GameOver(_) => "game over",
        }
    }
}

/// Cosmetic warning tier derived from the most advanced enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DangerLevel {
    #[default]
    Safe,
    Warning,
    Critical,
}

impl DangerLevel {
    /// Derive the tier from the largest y among alive enemies
    pub fn from_front_y(front_y: Option<f32>, tuning: &Tuning) -> Self {
        match front_y {
            Some(y) if y > tuning.danger_critical_y => DangerLevel::Critical,
            Some(y) if y > tuning.danger_warning_y => DangerLevel::Warning,
            _ => DangerLevel::Safe,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u8,
}

impl Player {
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_spawn_x(), tuning.player_spawn_y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            health: tuning.player_health,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Horizontal center, the homing drones' aim point
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// A player projectile travelling upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShot {
    pub id: u32,
    pub pos: Vec2,
}

/// Enemy projectile behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotKind {
    /// Straight down
    Plain,
    /// Steers toward the player's center every tick
    Homing,
    /// Straight down, fired in staggered volleys
    Burst,
}

/// An enemy projectile travelling downward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShot {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ShotKind,
    /// Current aim point (homing only)
    pub target_x: Option<f32>,
    /// Lateral velocity applied on the last tick (homing only)
    pub vx: f32,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Tank,
    Shooter,
    Boss,
    SpecialA,
    SpecialB,
}

/// Per-type stat tuple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: u8,
    pub points: u32,
    pub speed_multiplier: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Shooter,
        EnemyKind::Boss,
        EnemyKind::SpecialA,
        EnemyKind::SpecialB,
    ];

    pub fn stats(&self) -> EnemyStats {
        let (health, points, speed_multiplier) = match self {
            EnemyKind::Boss => (5, 50, 0.3),
            EnemyKind::SpecialA => (4, 100, 0.6),
            EnemyKind::SpecialB => (3, 75, 0.8),
            EnemyKind::Shooter => (2, 25, 0.5),
            EnemyKind::Tank => (3, 20, 0.4),
            EnemyKind::Fast => (1, 15, 1.5),
            EnemyKind::Basic => (1, 10, 1.0),
        };
        EnemyStats {
            health,
            points,
            speed_multiplier,
        }
    }
}

/// Damage tier the presentation layer decorates enemies with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthTier {
    Full,
    /// Above half health
    Damaged,
    /// Half health or less
    Critical,
}

/// A formation member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
    /// Horizontal px per tick
    pub speed: f32,
    /// +1.0 (right) or -1.0 (left)
    pub direction: f32,
    pub kind: EnemyKind,
    pub health: u8,
    pub max_health: u8,
    pub points: u32,
    /// Clock reading of the last fire decision (never fired = None)
    pub last_fired_us: Option<u64>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, speed: f32, direction: f32) -> Self {
        let stats = kind.stats();
        Self {
            id,
            pos,
            alive: true,
            speed,
            direction,
            kind,
            health: stats.health,
            max_health: stats.health,
            points: stats.points,
            last_fired_us: None,
        }
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, Vec2::new(tuning.enemy_width, tuning.enemy_height))
    }

    /// Apply one point of damage. Returns true if this hit eliminated the enemy.
    pub fn take_hit(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn health_tier(&self) -> HealthTier {
        if self.health >= self.max_health {
            HealthTier::Full
        } else if self.health as f32 / self.max_health as f32 > 0.5 {
            HealthTier::Damaged
        } else {
            HealthTier::Critical
        }
    }
}

/// Things that happened during a tick, for HUD/audio/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    PlayerFired { id: u32 },
    EnemyFired { enemy_id: u32, kind: ShotKind, volley: u8 },
    EnemyShotSpawned { id: u32, kind: ShotKind },
    EnemyHit { enemy_id: u32, health: u8 },
    EnemyDestroyed { enemy_id: u32, points: u32 },
    PlayerHit { health: u8 },
    DangerChanged { level: DangerLevel },
    GameOver { outcome: Outcome },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Source of all randomness (speeds, directions, fire jitter)
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Logical clock since the run started (microseconds)
    pub time_us: u64,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub score: u64,
    pub danger: DangerLevel,
    pub player: Player,
    /// Player shots in fire order
    pub player_shots: Vec<PlayerShot>,
    /// Enemy shots in spawn order
    pub enemy_shots: Vec<EnemyShot>,
    /// Formation, sorted by id
    pub enemies: Vec<Enemy>,
    /// Volley members waiting for their stagger delay
    pub pending_shots: BurstQueue,
    /// Events recorded during the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_player_shot_id: u32,
    next_enemy_shot_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state waiting on the title screen
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::spawn(&tuning);
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            time_us: 0,
            time_ticks: 0,
            score: 0,
            danger: DangerLevel::Safe,
            player,
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            enemies: Vec::new(),
            pending_shots: BurstQueue::default(),
            events: Vec::new(),
            next_player_shot_id: 0,
            next_enemy_shot_id: 0,
        }
    }

    /// Reset everything for a fresh run and enter `Running`.
    ///
    /// The RNG stream is not reseeded, so each restart gets a new formation.
    /// Pending volley members from the previous run are dropped.
    pub fn start(&mut self) {
        self.phase = GamePhase::Running;
        self.time_us = 0;
        self.time_ticks = 0;
        self.score = 0;
        self.danger = DangerLevel::Safe;
        self.player = Player::spawn(&self.tuning);
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.pending_shots.clear();
        self.next_player_shot_id = 0;
        self.next_enemy_shot_id = 0;
        self.enemies = spawn_formation(&self.tuning, &mut self.rng);
        self.events.clear();
        self.events.push(GameEvent::Started);
        log::info!(
            "Run started (seed {}, {} enemies)",
            self.seed,
            self.enemies.len()
        );
    }

    /// Allocate the next player shot id (first id is 1)
    pub fn next_player_shot_id(&mut self) -> u32 {
        self.next_player_shot_id += 1;
        self.next_player_shot_id
    }

    /// Allocate the next enemy shot id (first id is 1)
    pub fn next_enemy_shot_id(&mut self) -> u32 {
        self.next_enemy_shot_id += 1;
        self.next_enemy_shot_id
    }

    /// Elapsed run time in whole milliseconds
    pub fn time_ms(&self) -> u64 {
        crate::us_to_ms(self.time_us)
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    /// Largest y among alive enemies
    pub fn front_y(&self) -> Option<f32> {
        self.alive_enemies().map(|e| e.pos.y).reduce(f32::max)
    }
}
