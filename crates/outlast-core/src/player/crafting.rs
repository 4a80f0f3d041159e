//! Crafting - turning gathered resources into placeable hotbar items.

use super::Player;
use crate::components::{Recipe, Shortfall};

/// Errors that can occur while crafting
#[derive(Debug, Clone, PartialEq)]
pub enum CraftError {
    /// No recipe at the requested index
    UnknownRecipe(usize),
    Insufficient(Shortfall),
    /// Every hotbar slot is taken
    HotbarFull,
    PlayerDead,
}

impl std::fmt::Display for CraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CraftError::UnknownRecipe(index) => write!(f, "No recipe #{}", index),
            CraftError::Insufficient(s) => write!(
                f,
                "Not enough {}: need {}, have {}",
                s.resource, s.needed, s.available
            ),
            CraftError::HotbarFull => write!(f, "Hotbar full"),
            CraftError::PlayerDead => write!(f, "Can't craft while dead"),
        }
    }
}

impl std::error::Error for CraftError {}

impl Player {
    /// Pay for `recipe` and put its item in the first empty hotbar slot.
    ///
    /// Nothing is deducted unless both the cost and a free slot are
    /// available. Returns the slot the item landed in.
    pub fn craft(&mut self, recipe: &Recipe) -> Result<usize, CraftError> {
        if self.dead {
            return Err(CraftError::PlayerDead);
        }
        self.inventory
            .check(&recipe.cost)
            .map_err(CraftError::Insufficient)?;
        if self.hotbar.first_empty().is_none() {
            return Err(CraftError::HotbarFull);
        }

        self.inventory
            .spend(&recipe.cost)
            .map_err(CraftError::Insufficient)?;
        let slot = self
            .hotbar
            .insert(recipe.output())
            .map_err(|_| CraftError::HotbarFull)?;

        log::debug!("Crafted {} into slot {}", recipe.name, slot);
        Ok(slot)
    }
}
