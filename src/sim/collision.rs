//! Collision detection and damage resolution
//!
//! Everything is an axis-aligned rectangle. Resolution is order-dependent:
//! enemies are visited in id order and each one consumes the earliest-fired
//! overlapping player shot. A shot hits at most one enemy, and an enemy takes at
//! most one hit per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyShot, GameEvent, GameState, PlayerShot};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap on both axes; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of resolving player shots against the formation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitReport {
    /// Shots that struck something
    pub shots_consumed: usize,
    /// Enemies eliminated this pass
    pub kills: usize,
    pub points: u64,
}

/// Player shots vs alive enemies.
///
/// Damages enemies, removes consumed shots and adds points for eliminations.
pub fn resolve_player_shots(state: &mut GameState) -> HitReport {
    let mut report = HitReport::default();
    let shot_size = Vec2::new(state.tuning.shot_width, state.tuning.shot_height);
    let mut remaining: Vec<PlayerShot> = std::mem::take(&mut state.player_shots);

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let enemy_rect = enemy.rect(&state.tuning);
        let Some(idx) = remaining
            .iter()
            .position(|s| Rect::new(s.pos, shot_size).overlaps(&enemy_rect))
        else {
            continue;
        };
        remaining.remove(idx);
        report.shots_consumed += 1;

        if enemy.take_hit() {
            report.kills += 1;
            report.points += u64::from(enemy.points);
            state.events.push(GameEvent::EnemyDestroyed {
                enemy_id: enemy.id,
                points: enemy.points,
            });
        } else {
            state.events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                health: enemy.health,
            });
        }
    }

    state.player_shots = remaining;
    state.score += report.points;
    report
}

/// Enemy shots vs the player.
///
/// Only the first overlapping shot (spawn order) is consumed; the player loses
/// one health for it. Returns true if the player was hit.
pub fn resolve_enemy_shots(state: &mut GameState) -> bool {
    let player_rect = state.player.rect();
    let shot_size = Vec2::new(state.tuning.shot_width, state.tuning.shot_height);

    let hit = state
        .enemy_shots
        .iter()
        .position(|s: &EnemyShot| Rect::new(s.pos, shot_size).overlaps(&player_rect));

    match hit {
        Some(idx) => {
            state.enemy_shots.remove(idx);
            state.player.health = state.player.health.saturating_sub(1);
            state.events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, ShotKind};

    fn running_state(enemies: Vec<Enemy>) -> GameState {
        let mut state = GameState::new(3);
        state.start();
        state.enemies = enemies;
        state
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let d = Rect::new(Vec2::new(0.0, 20.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_basic_enemy_killed_by_one_shot() {
        let mut state = running_state(vec![Enemy::new(
            0,
            EnemyKind::Basic,
            Vec2::new(100.0, 100.0),
            0.0,
            1.0,
        )]);
        state.player_shots.push(PlayerShot {
            id: 1,
            pos: Vec2::new(110.0, 105.0),
        });

        let report = resolve_player_shots(&mut state);
        assert_eq!(report.kills, 1);
        assert_eq!(state.score, 10);
        assert!(!state.enemies[0].alive);
        assert_eq!(state.enemies[0].health, 0);
        assert!(state.player_shots.is_empty());
    }

    #[test]
    fn test_one_shot_hits_one_enemy() {
        // Two overlapping enemies, one shot: only the lower id is hit
        let mut state = running_state(vec![
            Enemy::new(0, EnemyKind::Tank, Vec2::new(100.0, 100.0), 0.0, 1.0),
            Enemy::new(1, EnemyKind::Tank, Vec2::new(105.0, 100.0), 0.0, 1.0),
        ]);
        state.player_shots.push(PlayerShot {
            id: 1,
            pos: Vec2::new(110.0, 105.0),
        });

        let report = resolve_player_shots(&mut state);
        assert_eq!(report.shots_consumed, 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.enemies[1].health, 3);
    }

    #[test]
    fn test_enemy_takes_one_hit_per_pass() {
        let mut state = running_state(vec![Enemy::new(
            0,
            EnemyKind::Tank,
            Vec2::new(100.0, 100.0),
            0.0,
            1.0,
        )]);
        for id in 1..=2 {
            state.player_shots.push(PlayerShot {
                id,
                pos: Vec2::new(110.0, 105.0),
            });
        }

        resolve_player_shots(&mut state);
        assert_eq!(state.enemies[0].health, 2);
        // Earliest shot consumed, later one survives
        assert_eq!(state.player_shots.len(), 1);
        assert_eq!(state.player_shots[0].id, 2);
    }

    #[test]
    fn test_dead_enemies_are_ignored() {
        let mut dead = Enemy::new(0, EnemyKind::Basic, Vec2::new(100.0, 100.0), 0.0, 1.0);
        dead.take_hit();
        let mut state = running_state(vec![dead]);
        state.player_shots.push(PlayerShot {
            id: 1,
            pos: Vec2::new(110.0, 105.0),
        });

        let report = resolve_player_shots(&mut state);
        assert_eq!(report, HitReport::default());
        assert_eq!(state.player_shots.len(), 1);
    }

    #[test]
    fn test_player_hit_once_per_pass() {
        let mut state = running_state(Vec::new());
        let pos = state.player.pos + Vec2::new(10.0, 5.0);
        for id in 1..=2 {
            state.enemy_shots.push(EnemyShot {
                id,
                pos,
                kind: ShotKind::Plain,
                target_x: None,
                vx: 0.0,
            });
        }

        assert!(resolve_enemy_shots(&mut state));
        assert_eq!(state.player.health, 2);
        assert_eq!(state.enemy_shots.len(), 1);
        assert_eq!(state.enemy_shots[0].id, 2);
    }

    #[test]
    fn test_player_missed() {
        let mut state = running_state(Vec::new());
        state.enemy_shots.push(EnemyShot {
            id: 1,
            pos: Vec2::new(10.0, 10.0),
            kind: ShotKind::Homing,
            target_x: Some(400.0),
            vx: 0.0,
        });
        assert!(!resolve_enemy_shots(&mut state));
        assert_eq!(state.player.health, 3);
    }
}
