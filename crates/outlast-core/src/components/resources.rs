//! Gatherable resources and the player's bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw material credited by gathering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Wood,
    Stone,
    Metal,
}

impl ResourceKind {
    pub fn all() -> &'static [ResourceKind] {
        &[ResourceKind::Wood, ResourceKind::Stone, ResourceKind::Metal]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Stone => "stone",
            ResourceKind::Metal => "metal",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// First resource a cost could not be covered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub resource: ResourceKind,
    pub needed: u32,
    pub available: u32,
}

/// Resource counts held by the player. Counts never go negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Inventory {
    counts: BTreeMap<ResourceKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ResourceKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Whether every entry of `cost` is covered.
    pub fn check(&self, cost: &BTreeMap<ResourceKind, u32>) -> Result<(), Shortfall> {
        for (&resource, &needed) in cost {
            let available = self.count(resource);
            if available < needed {
                return Err(Shortfall {
                    resource,
                    needed,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Deduct `cost` atomically: either every entry is paid or nothing is.
    pub fn spend(&mut self, cost: &BTreeMap<ResourceKind, u32>) -> Result<(), Shortfall> {
        self.check(cost)?;
        for (&resource, &amount) in cost {
            if let Some(count) = self.counts.get_mut(&resource) {
                *count -= amount;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }

    /// Non-zero stacks in resource order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&kind, &count)| (kind, count))
    }
}
