//! Enemy AI - per-enemy idle / chase / attack state machine
//!
//! Transitions are driven by the distance to the player measured at the start
//! of the enemy's step. Chase gives up at a farther distance than idle
//! notices at, so an enemy sitting near one threshold doesn't flicker.

use std::f32::consts::TAU;

use rand::Rng;

use crate::components::{Enemy, EnemyState, Target};
use crate::config::EnemyConfig;
use crate::geometry::{clamp, Rect, Vec2};
use crate::player::Player;

/// Step every enemy against the player, then clamp each into `bounds`.
pub fn enemy_ai_system(
    enemies: &mut [Enemy],
    player: &mut Player,
    bounds: Rect,
    config: &EnemyConfig,
    dt: f32,
    rng: &mut impl Rng,
) {
    for enemy in enemies.iter_mut() {
        step_enemy(enemy, player, config, dt, rng);
        enemy.position = Vec2::new(
            clamp(enemy.position.x, bounds.x, bounds.x + bounds.w),
            clamp(enemy.position.y, bounds.y, bounds.y + bounds.h),
        );
    }
}

/// Advance one enemy's state machine by `dt`.
pub fn step_enemy(
    enemy: &mut Enemy,
    player: &mut Player,
    config: &EnemyConfig,
    dt: f32,
    rng: &mut impl Rng,
) {
    let distance = enemy.position.distance(&player.position);
    let previous = enemy.state;

    enemy.state = match enemy.state {
        EnemyState::Idle {
            mut wander_timer,
            mut wander_velocity,
        } => {
            wander_timer -= dt;
            if wander_timer <= 0.0 {
                wander_velocity = random_wander_velocity(config.wander_speed, rng);
                wander_timer = random_wander_time(config, rng);
            }
            enemy.position += wander_velocity * dt;

            if distance < config.near_threshold {
                enemy.target = Some(Target::Player);
                EnemyState::Chase
            } else {
                EnemyState::Idle {
                    wander_timer,
                    wander_velocity,
                }
            }
        }
        EnemyState::Chase => {
            if distance > config.far_threshold {
                enemy.target = None;
                // Stand still until the wander timer picks a heading
                EnemyState::Idle {
                    wander_timer: random_wander_time(config, rng),
                    wander_velocity: Vec2::ZERO,
                }
            } else if distance < config.melee_threshold {
                EnemyState::Attack {
                    cooldown: config.attack_windup,
                }
            } else {
                let direction = (player.position - enemy.position).normalize();
                // Never step past the player
                let step = (enemy.speed * dt).min(distance);
                enemy.position += direction * step;
                EnemyState::Chase
            }
        }
        EnemyState::Attack { mut cooldown } => {
            cooldown -= dt;
            // Bite first, then check whether the player got away
            if distance <= config.melee_threshold && cooldown <= 0.0 {
                player.take_damage(enemy.contact_damage);
                cooldown = config.attack_interval;
            }
            if distance > config.melee_threshold {
                EnemyState::Chase
            } else {
                EnemyState::Attack { cooldown }
            }
        }
    };

    if previous.name() != enemy.state.name() {
        log::trace!(
            "Enemy {} {} -> {} at distance {:.1}",
            enemy.id,
            previous.name(),
            enemy.state.name(),
            distance
        );
    }
}

fn random_wander_velocity(max_speed: f32, rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let speed = rng.gen_range(0.0..=max_speed.max(0.0));
    Vec2::from_angle(angle) * speed
}

fn random_wander_time(config: &EnemyConfig, rng: &mut impl Rng) -> f32 {
    rng.gen_range(config.wander_timer_min..=config.wander_timer_max)
}
