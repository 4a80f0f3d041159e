//! Hotbar items and crafting recipes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::resources::ResourceKind;
use super::structure::StructureKind;

/// Number of hotbar slots
pub const HOTBAR_SLOTS: usize = 6;

/// Broad item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Tool,
    Structure,
}

/// Something that can sit in a hotbar slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub id: String,
    /// Older items carry no kind and are classified by id
    pub kind: Option<ItemKind>,
}

impl Item {
    pub fn new(name: impl Into<String>, id: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            kind: Some(kind),
        }
    }

    /// Item identified only by its id
    pub fn legacy(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            kind: None,
        }
    }

    /// The tool every life starts with
    pub fn starting_tool() -> Self {
        Self::new("Rock", "rock_tool", ItemKind::Tool)
    }

    /// Whether using this item places a structure instead of swinging.
    pub fn is_placeable(&self) -> bool {
        self.kind == Some(ItemKind::Structure) || self.id.contains("wall") || self.id.contains("door")
    }

    /// Structure produced by placing this item.
    pub fn structure_kind(&self) -> StructureKind {
        StructureKind::from_item_id(&self.id)
    }
}

/// Fixed row of optional items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotbar {
    slots: [Option<Item>; HOTBAR_SLOTS],
}

impl Hotbar {
    /// Hotbar holding only the starting tool in slot 0.
    pub fn starting() -> Self {
        let mut hotbar = Self::default();
        hotbar.slots[0] = Some(Item::starting_tool());
        hotbar
    }

    pub fn len(&self) -> usize {
        HOTBAR_SLOTS
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Empty `slot`, returning what was there.
    pub fn take(&mut self, slot: usize) -> Option<Item> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put `item` in the first empty slot. Gives the item back when full.
    pub fn insert(&mut self, item: Item) -> Result<usize, Item> {
        match self.first_empty() {
            Some(slot) => {
                self.slots[slot] = Some(item);
                Ok(slot)
            }
            None => Err(item),
        }
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }
}

/// Crafting recipe turning resources into a hotbar item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub item_id: String,
    pub cost: BTreeMap<ResourceKind, u32>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        item_id: impl Into<String>,
        cost: impl IntoIterator<Item = (ResourceKind, u32)>,
    ) -> Self {
        Self {
            name: name.into(),
            item_id: item_id.into(),
            cost: cost.into_iter().collect(),
        }
    }

    /// Item handed out when the recipe is crafted; recipes only build structures.
    pub fn output(&self) -> Item {
        Item::new(self.name.clone(), self.item_id.clone(), ItemKind::Structure)
    }
}
