//! Enemy spawning

use rand::Rng;

use super::terrain::random_point;
use crate::components::Enemy;
use crate::config::SimConfig;
use crate::world::World;

/// Place `generation.enemy_count` wolves at independent random positions.
pub fn generate_enemies(world: &mut World, config: &SimConfig, rng: &mut impl Rng) -> Vec<u32> {
    let mut ids = Vec::with_capacity(config.generation.enemy_count as usize);

    for _ in 0..config.generation.enemy_count {
        let position = random_point(world, rng);
        let id = world.next_id();
        world.add_enemy(Enemy::new(id, position, &config.enemy));
        ids.push(id);
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_enemy_count() {
        let config = SimConfig::default();
        let mut world = World::new(500.0, 500.0);
        let mut rng = StdRng::seed_from_u64(1);

        let ids = generate_enemies(&mut world, &config, &mut rng);

        assert_eq!(ids.len(), config.generation.enemy_count as usize);
        assert_eq!(world.enemies.len(), ids.len());
        for enemy in &world.enemies {
            assert!(world.contains(enemy.position));
            assert!(enemy.state.is_idle());
        }
    }
}
