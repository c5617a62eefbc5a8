//! Read-only view of the simulation for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::state::{
    DangerLevel, EnemyKind, GamePhase, GameState, HealthTier, Outcome, ShotKind,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerShotView {
    pub id: u32,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyShotView {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ShotKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: u8,
    pub max_health: u8,
    pub alive: bool,
    pub tier: HealthTier,
}

/// Game-over banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeView {
    pub outcome: Outcome,
    pub victory: bool,
    pub message: &'static str,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub outcome: Option<OutcomeView>,
    pub elapsed_ms: u64,
    pub score: u64,
    pub danger: DangerLevel,
    pub player: PlayerView,
    pub player_shots: Vec<PlayerShotView>,
    pub enemy_shots: Vec<EnemyShotView>,
    pub enemies: Vec<EnemyView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            outcome: state.phase.outcome().map(|outcome| OutcomeView {
                outcome,
                victory: outcome.is_victory(),
                message: outcome.message(),
            }),
            elapsed_ms: state.time_ms(),
            score: state.score,
            danger: state.danger,
            player: PlayerView {
                pos: state.player.pos,
                size: state.player.size,
                health: state.player.health,
            },
            player_shots: state
                .player_shots
                .iter()
                .map(|s| PlayerShotView { id: s.id, pos: s.pos })
                .collect(),
            enemy_shots: state
                .enemy_shots
                .iter()
                .map(|s| EnemyShotView {
                    id: s.id,
                    pos: s.pos,
                    kind: s.kind,
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    kind: e.kind,
                    health: e.health,
                    max_health: e.max_health,
                    alive: e.alive,
                    tier: e.health_tier(),
                })
                .collect(),
        }
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT_US;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_before_start() {
        let state = GameState::new(1);
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::NotStarted);
        assert_eq!(snap.phase.label(), "ready");
        assert!(snap.enemies.is_empty());
        assert!(snap.outcome.is_none());
        assert_eq!(snap.player.health, 3);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(1);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, SIM_DT_US);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT_US);

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.enemies.len(), 72);
        assert_eq!(snap.alive_enemy_count(), 72);
        assert_eq!(snap.player_shots.len(), 1);
        assert_eq!(snap.player_shots[0].id, 1);
        assert_eq!(snap.elapsed_ms, 33);
        assert!(snap.enemies.iter().all(|e| e.tier == HealthTier::Full));
    }

    #[test]
    fn test_snapshot_outcome_and_json() {
        let mut state = GameState::new(1);
        state.start();
        state.phase = GamePhase::GameOver(Outcome::Victory);
        let snap = Snapshot::capture(&state);
        let outcome = snap.outcome.as_ref().unwrap();
        assert!(outcome.victory);
        assert_eq!(outcome.message, Outcome::Victory.message());

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"score\": 0"));
        assert!(json.contains("Victory"));
    }
}
