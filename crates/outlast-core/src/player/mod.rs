//! The player character: vitals, movement, hotbar and actions.
//!
//! A `Player` lives for the whole session. Dying sets `dead` and freezes
//! every mutation until [`Player::respawn`] resets it in place.

mod actions;
mod crafting;
mod movement;

pub use actions::*;
pub use crafting::*;
pub use movement::*;

use serde::{Deserialize, Serialize};

use crate::components::{Hotbar, Inventory, Item};
use crate::config::{PlayerConfig, SimConfig};
use crate::geometry::Vec2;
use crate::input::InputSnapshot;
use crate::world::World;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Where the player (re)appears
    pub spawn: Vec2,
    pub position: Vec2,
    pub radius: f32,
    /// Units per second
    pub speed: f32,
    /// Radians, toward the pointer
    pub facing: f32,
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    /// Cap shared by health, hunger and thirst
    pub max_stat: f32,
    pub inventory: Inventory,
    pub hotbar: Hotbar,
    pub active_slot: usize,
    /// Seconds until the next attack or placement is allowed
    pub attack_cooldown: f32,
    /// Seconds left on the swing animation flag
    pub attack_flash_remaining: f32,
    pub dead: bool,
}

impl Player {
    pub fn new(spawn: Vec2, config: &PlayerConfig) -> Self {
        Self {
            spawn,
            position: spawn,
            radius: config.radius,
            speed: config.speed,
            facing: 0.0,
            health: config.max_stat,
            hunger: config.max_stat,
            thirst: config.max_stat,
            max_stat: config.max_stat,
            inventory: Inventory::new(),
            hotbar: Hotbar::starting(),
            active_slot: 0,
            attack_cooldown: 0.0,
            attack_flash_remaining: 0.0,
            dead: false,
        }
    }

    /// Whether the swing animation should be shown
    pub fn is_attacking(&self) -> bool {
        self.attack_flash_remaining > 0.0
    }

    pub fn active_item(&self) -> Option<&Item> {
        self.hotbar.get(self.active_slot)
    }

    /// Select a hotbar slot; out-of-range indices are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot >= self.hotbar.len() {
            return false;
        }
        self.active_slot = slot;
        true
    }

    /// Apply damage. Crossing zero kills the player exactly once; damage
    /// after death is ignored.
    pub fn take_damage(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.die();
        }
    }

    fn die(&mut self) {
        self.dead = true;
        log::info!(
            "Player died at ({:.0}, {:.0})",
            self.position.x,
            self.position.y
        );
    }

    /// Restore hunger, capped at the maximum.
    pub fn eat(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.hunger = (self.hunger + amount.max(0.0)).min(self.max_stat);
    }

    /// Restore thirst, capped at the maximum.
    pub fn drink(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.thirst = (self.thirst + amount.max(0.0)).min(self.max_stat);
    }

    /// Back to the spawn point with full vitals and nothing but the
    /// starting tool.
    pub fn respawn(&mut self) {
        self.position = self.spawn;
        self.health = self.max_stat;
        self.hunger = self.max_stat;
        self.thirst = self.max_stat;
        self.dead = false;
        self.inventory.clear();
        self.hotbar = Hotbar::starting();
        self.active_slot = 0;
        self.attack_cooldown = 0.0;
        self.attack_flash_remaining = 0.0;
        log::info!("Player respawned at ({:.0}, {:.0})", self.spawn.x, self.spawn.y);
    }

    /// Advance the player by `dt`: face the pointer, move, resolve at most one
    /// action, then drain vitals. Does nothing once dead.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        world: &mut World,
        config: &SimConfig,
    ) -> Option<ActionOutcome> {
        if self.dead {
            return None;
        }

        // Facing first, movement is relative to it
        let to_pointer = input.pointer - self.position;
        self.facing = to_pointer.y.atan2(to_pointer.x);

        let direction = movement_direction(self.facing, input);
        self.position = resolve_move(world, self.position, direction * (self.speed * dt), self.radius);

        self.attack_flash_remaining = (self.attack_flash_remaining - dt).max(0.0);
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown -= dt;
        }

        let mut outcome = None;
        if input.primary && self.attack_cooldown <= 0.0 {
            outcome = Some(self.use_active_item(world, input.pointer, config));
        }

        self.tick_vitals(dt, config);

        outcome
    }

    /// Place with a placeable item, swing with anything else (or bare hands).
    fn use_active_item(&mut self, world: &mut World, target: Vec2, config: &SimConfig) -> ActionOutcome {
        match self.active_item().filter(|item| item.is_placeable()).cloned() {
            Some(item) => {
                self.attack_cooldown = config.building.place_cooldown;
                ActionOutcome::Build(self.place_structure(world, target.x, target.y, &item, &config.building))
            }
            None => {
                self.attack_cooldown = config.combat.attack_cooldown;
                self.attack_flash_remaining = config.combat.attack_flash;
                ActionOutcome::Attack(self.attack(world, target.x, target.y, &config.combat))
            }
        }
    }

    /// Drain hunger and thirst; starve while either is empty.
    fn tick_vitals(&mut self, dt: f32, config: &SimConfig) {
        let survival = &config.survival;
        self.hunger = (self.hunger - survival.hunger_decay * dt).clamp(0.0, self.max_stat);
        self.thirst = (self.thirst - survival.thirst_decay * dt).clamp(0.0, self.max_stat);

        if self.hunger <= 0.0 || self.thirst <= 0.0 {
            self.take_damage(survival.starvation_damage * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ResourceKind;

    fn player() -> Player {
        Player::new(Vec2::new(500.0, 500.0), &PlayerConfig::default())
    }

    fn world() -> World {
        World::new(1000.0, 1000.0)
    }

    #[test]
    fn test_new_player() {
        let p = player();
        assert_eq!(p.health, 100.0);
        assert_eq!(p.hunger, 100.0);
        assert_eq!(p.thirst, 100.0);
        assert!(!p.dead);
        assert!(!p.is_attacking());
        assert_eq!(p.active_item(), Some(&Item::starting_tool()));
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut p = player();
        p.take_damage(60.0);
        assert_eq!(p.health, 40.0);
        p.take_damage(60.0);
        assert_eq!(p.health, 0.0);
        assert!(p.dead);

        // Already dead: no further change
        p.take_damage(10.0);
        assert_eq!(p.health, 0.0);
        assert!(p.dead);
    }

    #[test]
    fn test_stats_stay_in_range_for_huge_dt() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        p.update(10_000.0, &InputSnapshot::idle(Vec2::new(600.0, 500.0)), &mut w, &config);
        assert_eq!(p.hunger, 0.0);
        assert_eq!(p.thirst, 0.0);
        assert!(p.health >= 0.0);
    }

    #[test]
    fn test_vitals_decay_at_rates() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        p.update(2.0, &InputSnapshot::idle(Vec2::new(600.0, 500.0)), &mut w, &config);
        assert!((p.hunger - 99.0).abs() < 0.001);
        assert!((p.thirst - 98.6).abs() < 0.001);
        assert_eq!(p.health, 100.0);
    }

    #[test]
    fn test_starvation_drains_health_every_tick() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        p.hunger = 0.0;
        let input = InputSnapshot::idle(Vec2::new(600.0, 500.0));

        let mut last = p.health;
        for _ in 0..20 {
            p.update(0.05, &input, &mut w, &config);
            assert!(p.health < last, "health must strictly decrease");
            last = p.health;
        }
    }

    #[test]
    fn test_starvation_ends_when_fed() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        p.thirst = 0.0;
        let input = InputSnapshot::idle(Vec2::new(600.0, 500.0));
        p.update(1.0, &input, &mut w, &config);
        assert!(p.health < 100.0);

        p.drink(50.0);
        let health = p.health;
        p.update(1.0, &input, &mut w, &config);
        assert_eq!(p.health, health);
    }

    #[test]
    fn test_eat_and_drink_are_capped() {
        let mut p = player();
        p.hunger = 90.0;
        p.eat(50.0);
        assert_eq!(p.hunger, 100.0);
        p.thirst = 10.0;
        p.drink(-20.0);
        assert_eq!(p.thirst, 10.0);
    }

    #[test]
    fn test_dead_player_update_is_noop() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        p.take_damage(1000.0);
        let before = p.clone();

        let outcome = p.update(
            0.1,
            &InputSnapshot::idle(Vec2::new(0.0, 0.0)).with_forward().with_primary(),
            &mut w,
            &config,
        );

        assert!(outcome.is_none());
        assert_eq!(p.position, before.position);
        assert_eq!(p.hunger, before.hunger);
        assert_eq!(p.facing, before.facing);
    }

    #[test]
    fn test_respawn_resets_everything() {
        let mut p = player();
        p.position = Vec2::new(12.0, 34.0);
        p.inventory.add(ResourceKind::Wood, 70);
        p.hotbar
            .insert(Item::new("Door", "door_wood", crate::components::ItemKind::Structure))
            .unwrap();
        p.select_slot(1);
        p.hunger = 3.0;
        p.take_damage(500.0);

        p.respawn();

        assert_eq!(p.position, Vec2::new(500.0, 500.0));
        assert_eq!(p.health, 100.0);
        assert_eq!(p.hunger, 100.0);
        assert_eq!(p.thirst, 100.0);
        assert!(!p.dead);
        assert!(p.inventory.is_empty());
        assert_eq!(p.hotbar.occupied(), 1);
        assert_eq!(p.hotbar.get(0), Some(&Item::starting_tool()));
        assert_eq!(p.active_slot, 0);
    }

    #[test]
    fn test_select_slot_ignores_out_of_range() {
        let mut p = player();
        assert!(p.select_slot(5));
        assert_eq!(p.active_slot, 5);
        assert!(!p.select_slot(6));
        assert_eq!(p.active_slot, 5);
    }

    #[test]
    fn test_attack_flash_clears_after_duration() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        let swing = InputSnapshot::idle(Vec2::new(550.0, 500.0)).with_primary();

        p.update(0.016, &swing, &mut w, &config);
        assert!(p.is_attacking());
        assert!((p.attack_cooldown - 0.5).abs() < 0.001);

        let rest = InputSnapshot::idle(Vec2::new(550.0, 500.0));
        for _ in 0..3 {
            p.update(0.05, &rest, &mut w, &config);
        }
        assert!(p.is_attacking());
        p.update(0.06, &rest, &mut w, &config);
        assert!(!p.is_attacking());
    }

    #[test]
    fn test_cooldown_meters_swings() {
        let config = SimConfig::default();
        let mut p = player();
        let mut w = world();
        let swing = InputSnapshot::idle(Vec2::new(550.0, 500.0)).with_primary();

        assert!(p.update(0.1, &swing, &mut w, &config).is_some());
        // 0.5s cooldown: the next four ticks can't swing
        for _ in 0..4 {
            assert!(p.update(0.1, &swing, &mut w, &config).is_none());
        }
        assert!(p.update(0.11, &swing, &mut w, &config).is_some());
    }
}
