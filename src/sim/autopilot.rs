//! Idle/demo mode - AI plays the game
//!
//! Pure function of the current state, so demo runs stay deterministic for a
//! given seed.

use super::state::{GameState, ShotKind};
use super::tick::TickInput;

/// Vertical window above the player in which incoming shots are dodged
const DODGE_LOOKAHEAD: f32 = 120.0;
/// Dead zone around the target column to avoid jitter
const AIM_TOLERANCE: f32 = 4.0;

/// Produce the input for the next tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    if !state.phase.is_running() {
        return TickInput {
            start: true,
            ..Default::default()
        };
    }

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    let t = &state.tuning;
    let player = &state.player;
    let center = player.center_x();

    // Dodge the nearest shot that is about to land on us
    let threat = state
        .enemy_shots
        .iter()
        .filter(|s| {
            let above = player.pos.y - s.pos.y;
            let reach = if s.kind == ShotKind::Homing {
                t.homing_max_lateral * (above / t.enemy_shot_speed).max(0.0)
            } else {
                0.0
            };
            above > 0.0
                && above < DODGE_LOOKAHEAD
                && s.pos.x + t.shot_width + reach > player.pos.x
                && s.pos.x - reach < player.pos.x + player.size.x
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(shot) = threat {
        let shot_center = shot.pos.x + t.shot_width / 2.0;
        let room_left = player.pos.x;
        let room_right = t.player_max_x() - player.pos.x;
        if (shot_center >= center && room_left > 0.0) || room_right <= 0.0 {
            input.left = true;
        } else {
            input.right = true;
        }
        return input;
    }

    // Track the most advanced alive enemy
    let target = state
        .alive_enemies()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y).then(b.id.cmp(&a.id)));

    if let Some(enemy) = target {
        let enemy_center = enemy.pos.x + t.enemy_width / 2.0;
        if enemy_center < center - AIM_TOLERANCE {
            input.left = true;
        } else if enemy_center > center + AIM_TOLERANCE {
            input.right = true;
        }
    }

    input
}
