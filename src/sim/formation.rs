//! Enemy formation: initial layout and bounce-and-descend movement

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind};
use crate::tuning::Tuning;

/// Type assignment for a grid cell.
///
/// Row 0 holds the rare types at fixed columns; rows 1-4 are uniform bands.
pub fn enemy_kind_at(row: u32, col: u32) -> EnemyKind {
    match (row, col) {
        (0, 5) | (0, 6) => EnemyKind::Boss,
        (0, 3) => EnemyKind::SpecialA,
        (0, 8) => EnemyKind::SpecialB,
        (1, _) => EnemyKind::Shooter,
        (2, _) => EnemyKind::Tank,
        (3..=4, _) => EnemyKind::Fast,
        _ => EnemyKind::Basic,
    }
}

/// Build the full rows x cols formation with ids in row-major order.
///
/// Speed = (row base + jitter) * type multiplier; direction is a coin flip.
pub fn spawn_formation(tuning: &Tuning, rng: &mut impl Rng) -> Vec<Enemy> {
    let cells = tuning.formation_rows as usize * tuning.formation_cols as usize;
    let mut enemies = Vec::with_capacity(cells);
    let mut id = 0;

    for row in 0..tuning.formation_rows {
        for col in 0..tuning.formation_cols {
            let kind = enemy_kind_at(row, col);
            let base_speed = tuning.row_base_speed + row as f32 * tuning.row_speed_step;
            let jitter = rng.random::<f32>() * tuning.speed_jitter;
            let speed = (base_speed + jitter) * kind.stats().speed_multiplier;
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let pos = Vec2::new(
                tuning.formation_origin_x + col as f32 * tuning.formation_pitch_x,
                tuning.formation_origin_y + row as f32 * tuning.formation_pitch_y,
            );

            enemies.push(Enemy::new(id, kind, pos, speed, direction));
            id += 1;
        }
    }

    log::debug!("Spawned formation of {} enemies", enemies.len());
    enemies
}

/// Advance every alive enemy one tick.
///
/// Each enemy drifts down slowly while moving sideways; touching either wall
/// flips its direction and drops it a full step instead. Returns true if any
/// enemy reached the overrun line.
pub fn move_formation(enemies: &mut [Enemy], tuning: &Tuning) -> bool {
    let max_x = tuning.enemy_max_x();
    let mut overrun = false;

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        let mut x = enemy.pos.x + enemy.direction * enemy.speed;
        let mut y = enemy.pos.y + tuning.formation_drift;

        if x <= 0.0 || x >= max_x {
            enemy.direction = -enemy.direction;
            y = enemy.pos.y + tuning.formation_drop;
            x = x.clamp(0.0, max_x);
        }

        enemy.pos = Vec2::new(x, y);
        if y >= tuning.overrun_y {
            overrun = true;
        }
    }

    overrun
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_type_rule() {
        assert_eq!(enemy_kind_at(0, 5), EnemyKind::Boss);
        assert_eq!(enemy_kind_at(0, 6), EnemyKind::Boss);
        assert_eq!(enemy_kind_at(0, 3), EnemyKind::SpecialA);
        assert_eq!(enemy_kind_at(0, 8), EnemyKind::SpecialB);
        assert_eq!(enemy_kind_at(0, 0), EnemyKind::Basic);
        assert_eq!(enemy_kind_at(1, 3), EnemyKind::Shooter);
        assert_eq!(enemy_kind_at(2, 11), EnemyKind::Tank);
        assert_eq!(enemy_kind_at(3, 0), EnemyKind::Fast);
        assert_eq!(enemy_kind_at(4, 7), EnemyKind::Fast);
        assert_eq!(enemy_kind_at(5, 5), EnemyKind::Basic);
    }

    #[test]
    fn test_formation_layout() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let enemies = spawn_formation(&tuning, &mut rng);

        assert_eq!(enemies.len(), 72);
        let last = &enemies[71];
        assert_eq!(last.id, 71);
        assert_eq!(last.pos, Vec2::new(50.0 + 11.0 * 55.0, 30.0 + 5.0 * 45.0));
        assert_eq!(enemies.iter().filter(|e| e.kind == EnemyKind::Boss).count(), 2);
        assert_eq!(enemies.iter().filter(|e| e.kind == EnemyKind::Shooter).count(), 12);
        assert_eq!(enemies.iter().filter(|e| e.kind == EnemyKind::Fast).count(), 24);

        for enemy in &enemies {
            assert!(enemy.alive);
            assert_eq!(enemy.health, enemy.max_health);
            assert!(enemy.direction == 1.0 || enemy.direction == -1.0);
            let row = enemy.id / 12;
            let base = 0.2 + row as f32 * 0.1;
            let mult = enemy.kind.stats().speed_multiplier;
            assert!(enemy.speed >= base * mult - 1e-5);
            assert!(enemy.speed < (base + 0.3) * mult + 1e-5);
        }
    }

    #[test]
    fn test_same_seed_same_formation() {
        let tuning = Tuning::default();
        let a = spawn_formation(&tuning, &mut Pcg32::seed_from_u64(9));
        let b = spawn_formation(&tuning, &mut Pcg32::seed_from_u64(9));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.speed, y.speed);
            assert_eq!(x.direction, y.direction);
        }
    }

    #[test]
    fn test_drift_without_bounce() {
        let tuning = Tuning::default();
        let mut enemies = vec![Enemy::new(0, EnemyKind::Basic, Vec2::new(100.0, 100.0), 2.0, 1.0)];
        assert!(!move_formation(&mut enemies, &tuning));
        assert_eq!(enemies[0].pos.x, 102.0);
        assert!((enemies[0].pos.y - 100.2).abs() < 1e-4);
        assert_eq!(enemies[0].direction, 1.0);
    }

    #[test]
    fn test_bounce_and_descend() {
        let tuning = Tuning::default();
        let mut enemies = vec![
            Enemy::new(0, EnemyKind::Basic, Vec2::new(769.0, 100.0), 2.0, 1.0),
            Enemy::new(1, EnemyKind::Basic, Vec2::new(1.0, 100.0), 2.0, -1.0),
        ];
        move_formation(&mut enemies, &tuning);

        assert_eq!(enemies[0].pos, Vec2::new(770.0, 110.0));
        assert_eq!(enemies[0].direction, -1.0);
        assert_eq!(enemies[1].pos, Vec2::new(0.0, 110.0));
        assert_eq!(enemies[1].direction, 1.0);

        // Next tick moves away from the wall without another flip
        move_formation(&mut enemies, &tuning);
        assert_eq!(enemies[0].direction, -1.0);
        assert_eq!(enemies[0].pos.x, 768.0);
    }

    #[test]
    fn test_dead_enemies_stay_put() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(0, EnemyKind::Basic, Vec2::new(100.0, 100.0), 2.0, 1.0);
        enemy.take_hit();
        let mut enemies = vec![enemy];
        move_formation(&mut enemies, &tuning);
        assert_eq!(enemies[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_overrun_detected() {
        let tuning = Tuning::default();
        let mut enemies = vec![Enemy::new(0, EnemyKind::Basic, Vec2::new(100.0, 519.9), 1.0, 1.0)];
        assert!(move_formation(&mut enemies, &tuning));
    }
}
