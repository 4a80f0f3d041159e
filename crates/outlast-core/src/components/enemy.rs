//! Roaming enemies (wolves) and their AI state.

use serde::{Deserialize, Serialize};

use crate::config::EnemyConfig;
use crate::geometry::Vec2;

/// AI state with the data each state needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EnemyState {
    /// Drifting around; picks a new heading when the timer runs out
    Idle {
        wander_timer: f32,
        wander_velocity: Vec2,
    },
    /// Running straight at the player
    Chase,
    /// In melee range; bites whenever the cooldown has run out
    Attack { cooldown: f32 },
}

impl EnemyState {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyState::Idle { .. } => "idle",
            EnemyState::Chase => "chase",
            EnemyState::Attack { .. } => "attack",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EnemyState::Idle { .. })
    }
}

/// What an enemy is hunting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub position: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub contact_damage: f32,
    pub state: EnemyState,
    pub target: Option<Target>,
}

impl Enemy {
    /// Fresh idle enemy whose first wander heading is picked on the next tick.
    pub fn new(id: u32, position: Vec2, config: &EnemyConfig) -> Self {
        Self {
            id,
            position,
            radius: config.radius,
            speed: config.speed,
            health: config.health,
            contact_damage: config.contact_damage,
            state: EnemyState::Idle {
                wander_timer: 0.0,
                wander_velocity: Vec2::ZERO,
            },
            target: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enemy_is_idle() {
        let enemy = Enemy::new(3, Vec2::new(10.0, 20.0), &EnemyConfig::default());
        assert!(enemy.state.is_idle());
        assert_eq!(enemy.state.name(), "idle");
        assert_eq!(
            enemy.state,
            EnemyState::Idle {
                wander_timer: 0.0,
                wander_velocity: Vec2::ZERO
            }
        );
        assert_eq!(enemy.target, None);
        assert!(!enemy.is_dead());
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_string(&EnemyState::Attack { cooldown: 0.5 }).unwrap();
        assert_eq!(json, r#"{"state":"attack","cooldown":0.5}"#);
    }
}
