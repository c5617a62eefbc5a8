//! Enemy fire scheduling
//!
//! Fire decisions are made against the logical clock. A decision becomes a
//! `FireIntent`; its volley members are queued as `PendingShot`s due at
//! `now + i * stagger` and spawned when the clock reaches them, so a burst is a
//! real delay across ticks rather than a same-tick spread.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, EnemyShot, GameEvent, GameState, ShotKind};
use crate::ms_to_us;

/// Fire timing for an armed enemy type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireProfile {
    pub base_interval_ms: u64,
    /// Uniform random extra interval, drawn per decision
    pub jitter_ms: u64,
    pub volley: u8,
    pub kind: ShotKind,
}

/// Armed types and their fire profiles. Unarmed types never fire.
pub fn fire_profile(kind: EnemyKind) -> Option<FireProfile> {
    let (base_interval_ms, jitter_ms, volley, kind) = match kind {
        EnemyKind::Shooter => (2_000, 2_000, 1, ShotKind::Plain),
        EnemyKind::SpecialA => (1_500, 1_500, 1, ShotKind::Homing),
        EnemyKind::SpecialB => (3_000, 2_000, 3, ShotKind::Burst),
        _ => return None,
    };
    Some(FireProfile {
        base_interval_ms,
        jitter_ms,
        volley,
        kind,
    })
}

/// An enemy's decision to fire this tick
#[derive(Debug, Clone, PartialEq)]
pub struct FireIntent {
    pub enemy_id: u32,
    /// Enemy top-left at decision time
    pub origin: Vec2,
    pub kind: ShotKind,
    pub volley: u8,
}

/// A volley member waiting for its spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingShot {
    pub due_us: u64,
    /// Tie-break for equal due times (enqueue order)
    pub seq: u64,
    pub pos: Vec2,
    pub kind: ShotKind,
}

// Ordered so that `BinaryHeap` pops the earliest (due, seq) first.
impl Ord for PendingShot {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_us, other.seq).cmp(&(self.due_us, self.seq))
    }
}

impl PartialOrd for PendingShot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PendingShot {
    fn eq(&self, other: &Self) -> bool {
        self.due_us == other.due_us && self.seq == other.seq
    }
}

impl Eq for PendingShot {}

/// Min-heap of pending volley members keyed by due time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurstQueue {
    heap: BinaryHeap<PendingShot>,
    next_seq: u64,
}

impl BurstQueue {
    pub fn push(&mut self, due_us: u64, pos: Vec2, kind: ShotKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(PendingShot {
            due_us,
            seq,
            pos,
            kind,
        });
    }

    /// Remove and return every entry due at or before `now_us`, earliest first
    pub fn drain_due(&mut self, now_us: u64) -> Vec<PendingShot> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|p| p.due_us <= now_us) {
            if let Some(p) = self.heap.pop() {
                due.push(p);
            }
        }
        due
    }

    /// Drop every pending entry (reset or game over)
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn next_due_us(&self) -> Option<u64> {
        self.heap.peek().map(|p| p.due_us)
    }
}

/// Decide which enemies fire this tick.
///
/// Nothing fires during the grace period. Otherwise an armed, alive enemy fires
/// when the time since its last decision exceeds base + random jitter; firing
/// records the decision time.
pub fn collect_fire_intents(state: &mut GameState) -> Vec<FireIntent> {
    let now = state.time_us;
    if now < ms_to_us(state.tuning.grace_period_ms) {
        return Vec::new();
    }

    let mut intents = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let Some(profile) = fire_profile(enemy.kind) else {
            continue;
        };

        let eligible = match enemy.last_fired_us {
            None => true,
            Some(last) => {
                let jitter = state.rng.random::<f64>() * profile.jitter_ms as f64;
                let threshold_us = (profile.base_interval_ms as f64 + jitter) * 1_000.0;
                now.saturating_sub(last) as f64 > threshold_us
            }
        };
        if !eligible {
            continue;
        }

        enemy.last_fired_us = Some(now);
        intents.push(FireIntent {
            enemy_id: enemy.id,
            origin: enemy.pos,
            kind: profile.kind,
            volley: profile.volley,
        });
    }
    intents
}

/// Spawn position of volley member `index` for an enemy at `origin`.
///
/// Members fan out by `volley_spread`, starting one spread left of center.
pub fn volley_spawn_pos(state: &GameState, origin: Vec2, index: u8) -> Vec2 {
    let t = &state.tuning;
    let center_x = origin.x + t.enemy_width / 2.0 - t.shot_width / 2.0;
    let offset = index as f32 * t.volley_spread - t.volley_spread;
    Vec2::new(center_x + offset, origin.y + t.enemy_height)
}

/// Queue every volley member of the given intents
pub fn enqueue_intents(state: &mut GameState, intents: &[FireIntent]) {
    let stagger_us = ms_to_us(state.tuning.volley_stagger_ms);
    for intent in intents {
        for i in 0..intent.volley {
            let pos = volley_spawn_pos(state, intent.origin, i);
            let due = state.time_us + stagger_us * u64::from(i);
            state.pending_shots.push(due, pos, intent.kind);
        }
        state.events.push(GameEvent::EnemyFired {
            enemy_id: intent.enemy_id,
            kind: intent.kind,
            volley: intent.volley,
        });
    }
}

/// Turn every due pending shot into a live enemy projectile.
///
/// Homing shots lock onto the player's current center when they spawn.
pub fn spawn_due_shots(state: &mut GameState) -> usize {
    let due = state.pending_shots.drain_due(state.time_us);
    let count = due.len();
    for pending in due {
        let id = state.next_enemy_shot_id();
        let target_x = match pending.kind {
            ShotKind::Homing => Some(state.player.center_x()),
            ShotKind::Plain | ShotKind::Burst => None,
        };
        state.enemy_shots.push(EnemyShot {
            id,
            pos: pending.pos,
            kind: pending.kind,
            target_x,
            vx: 0.0,
        });
        state.events.push(GameEvent::EnemyShotSpawned {
            id,
            kind: pending.kind,
        });
    }
    count
}
