//! Player and projectile motion
//!
//! All velocities are per tick; the fixed 60 Hz step is the unit of time.

use glam::Vec2;

use super::state::{GameEvent, GameState, PlayerShot, ShotKind};
use super::tick::TickInput;

/// Move the player from held direction keys.
///
/// Each step is taken from the unmoved position and guarded against it, with
/// right applied after left: holding both moves right unless the ship already
/// sits at the right edge. The ship stays inside the playfield.
pub fn move_player(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.player_speed;
    let max_x = state.tuning.player_max_x();
    let x0 = state.player.pos.x;
    let mut x = x0;
    if input.left && x0 > 0.0 {
        x = x0 - speed;
    }
    if input.right && x0 < max_x {
        x = x0 + speed;
    }
    state.player.pos.x = x.clamp(0.0, max_x);
}

/// Fire a player shot if the newest shot has cleared the spacing gap.
///
/// Returns the new shot id, or None when rate limited.
pub fn try_player_fire(state: &mut GameState) -> Option<u32> {
    if let Some(newest) = state.player_shots.last() {
        if state.player.pos.y - newest.pos.y <= state.tuning.fire_spacing {
            return None;
        }
    }

    let id = state.next_player_shot_id();
    let t = &state.tuning;
    let pos = Vec2::new(
        state.player.pos.x + t.player_width / 2.0 - t.shot_width / 2.0,
        state.player.pos.y,
    );
    state.player_shots.push(PlayerShot { id, pos });
    state.events.push(GameEvent::PlayerFired { id });
    Some(id)
}

/// Move player shots upward and drop the ones that left the top edge
pub fn move_player_shots(state: &mut GameState) {
    let speed = state.tuning.player_shot_speed;
    for shot in &mut state.player_shots {
        shot.pos.y -= speed;
    }
    state.player_shots.retain(|s| s.pos.y > 0.0);
}

/// Lateral step of a homing shot toward `target_x`.
///
/// Proportional to the remaining distance, capped at `max_lateral`.
#[inline]
pub fn homing_step(x: f32, target_x: f32, gain: f32, max_lateral: f32) -> f32 {
    let distance = target_x - x;
    if distance == 0.0 {
        return 0.0;
    }
    distance.signum() * (distance.abs() * gain).min(max_lateral)
}

/// Move enemy shots downward, steer homing shots and drop the ones that left
/// the bottom edge.
///
/// A homing shot steers toward its current target, then retargets to the
/// player's center for the next tick.
pub fn move_enemy_shots(state: &mut GameState) {
    let t = &state.tuning;
    let player_center = state.player.center_x();

    for shot in &mut state.enemy_shots {
        shot.pos.y += t.enemy_shot_speed;

        if shot.kind == ShotKind::Homing {
            if let Some(target) = shot.target_x {
                shot.vx = homing_step(shot.pos.x, target, t.homing_gain, t.homing_max_lateral);
                shot.pos.x += shot.vx;
                shot.target_x = Some(player_center);
            }
        }
    }

    let height = t.height;
    state.enemy_shots.retain(|s| s.pos.y < height);
}
