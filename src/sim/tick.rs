//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Each call
//! runs explicit passes in a fixed order:
//! input -> enemy fire -> projectile motion -> formation -> collisions -> terminal checks.

use super::collision::{resolve_enemy_shots, resolve_player_shots};
use super::formation::move_formation;
use super::motion::{move_enemy_shots, move_player, move_player_shots, try_player_fire};
use super::schedule::{collect_fire_intents, enqueue_intents, spawn_due_shots};
use super::state::{DangerLevel, GameEvent, GamePhase, GameState, Outcome};

/// Input commands for a single tick (held keys sampled once per tick)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Start or restart the run (one-shot)
    pub start: bool,
}

/// Advance the game state by one fixed timestep of `dt_us` microseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_us: u64) {
    if input.start {
        // Reset tick continues as the first running tick
        state.start();
    } else {
        state.events.clear();
    }

    if !state.phase.is_running() {
        return;
    }

    state.time_us += dt_us;
    state.time_ticks += 1;

    // Player
    move_player(state, input);
    if input.fire {
        try_player_fire(state);
    }

    // Enemy fire decisions, then any volley members that are due
    let intents = collect_fire_intents(state);
    enqueue_intents(state, &intents);
    spawn_due_shots(state);

    // Motion
    move_player_shots(state);
    move_enemy_shots(state);
    let overrun = move_formation(&mut state.enemies, &state.tuning);

    // Collisions
    resolve_player_shots(state);
    resolve_enemy_shots(state);

    // Terminal conditions
    if let Some(outcome) = check_outcome(state, overrun) {
        finish(state, outcome);
    }

    update_danger(state);
}

/// Victory takes precedence over overrun, which takes precedence over the
/// player being destroyed.
fn check_outcome(state: &GameState, overrun: bool) -> Option<Outcome> {
    if state.alive_enemies().next().is_none() {
        Some(Outcome::Victory)
    } else if overrun {
        Some(Outcome::Overrun)
    } else if state.player.health == 0 {
        Some(Outcome::Destroyed)
    } else {
        None
    }
}

fn finish(state: &mut GameState, outcome: Outcome) {
    state.phase = GamePhase::GameOver(outcome);
    // Nothing may spawn after the run ends
    state.pending_shots.clear();
    state.events.push(GameEvent::GameOver { outcome });
    log::info!(
        "Game over: {:?} (score {}, {} ms)",
        outcome,
        state.score,
        state.time_ms()
    );
}

fn update_danger(state: &mut GameState) {
    let level = DangerLevel::from_front_y(state.front_y(), &state.tuning);
    if level != state.danger {
        state.danger = level;
        state.events.push(GameEvent::DangerChanged { level });
        log::debug!("Danger level now {:?}", level);
    }
}
