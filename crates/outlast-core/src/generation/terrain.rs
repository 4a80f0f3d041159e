//! Forest and rock-field generation

use rand::Rng;

use crate::components::{Harvestable, HarvestableKind};
use crate::config::{NodeSpec, SimConfig};
use crate::geometry::Vec2;
use crate::world::World;

/// Scatter forests of trees. Members are jittered around a random center and
/// may overlap each other.
pub fn generate_forests(world: &mut World, config: &SimConfig, rng: &mut impl Rng) -> Vec<u32> {
    let params = &config.generation;
    let mut ids = Vec::new();

    for _ in 0..params.forest_clusters {
        let center = random_point(world, rng);
        let members = rng.gen_range(params.trees_per_forest.0..=params.trees_per_forest.1);
        for _ in 0..members {
            let position = jitter(world, center, params.forest_spread, rng);
            ids.push(spawn_node(world, HarvestableKind::Tree, position, params.tree, config));
        }
    }

    ids
}

/// Scatter rock fields. Each member has `ore_chance` of being metal ore.
pub fn generate_rock_fields(world: &mut World, config: &SimConfig, rng: &mut impl Rng) -> Vec<u32> {
    let params = &config.generation;
    let mut ids = Vec::new();

    for _ in 0..params.rock_fields {
        let center = random_point(world, rng);
        let members = rng.gen_range(params.rocks_per_field.0..=params.rocks_per_field.1);
        for _ in 0..members {
            let position = jitter(world, center, params.rock_field_spread, rng);
            let (kind, node) = if rng.gen_bool(params.ore_chance.max(0.0).min(1.0)) {
                (HarvestableKind::MetalOre, params.ore)
            } else {
                (HarvestableKind::Rock, params.rock)
            };
            ids.push(spawn_node(world, kind, position, node, config));
        }
    }

    ids
}

fn spawn_node(
    world: &mut World,
    kind: HarvestableKind,
    position: Vec2,
    node: NodeSpec,
    config: &SimConfig,
) -> u32 {
    let id = world.next_id();
    world.add_harvestable(Harvestable::new(
        id,
        kind,
        position,
        node.size,
        node.health,
        config.world.harvestable_collision_inset,
    ));
    id
}

/// Uniform point inside the world
pub(crate) fn random_point(world: &World, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..=world.width),
        rng.gen_range(0.0..=world.height),
    )
}

/// Point within `spread` of `center` on each axis, kept inside the world.
fn jitter(world: &World, center: Vec2, spread: f32, rng: &mut impl Rng) -> Vec2 {
    let spread = spread.max(0.0);
    let offset = Vec2::new(
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
    );
    world.clamp_point(center + offset)
}
