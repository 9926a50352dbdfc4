//! Serde data file structs for smeltery content definitions.
//!
//! These structs define the on-disk format for items, smelting recipes, and
//! fuels. They are deserialized from RON, JSON, or TOML data files and then
//! resolved into registry types by the loader.

use serde::Deserialize;

// ===========================================================================
// Items
// ===========================================================================

/// An item kind definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub max_stack_size: Option<u32>,
    /// Name of the item left behind when the last unit burns as fuel.
    /// May reference an item defined later in the same file.
    #[serde(default)]
    pub container_remainder: Option<String>,
}

/// Wrapper for TOML files, which require a top-level table.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlItems {
    pub items: Vec<ItemData>,
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A smelting recipe definition: one input kind, one output stack.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub name: String,
    pub input: String,
    pub output: (String, u32),
}

/// Wrapper for TOML files.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRecipes {
    pub recipes: Vec<RecipeData>,
}

// ===========================================================================
// Fuels
// ===========================================================================

/// A fuel definition: an item name and its burn duration in ticks.
#[derive(Debug, Clone, Deserialize)]
pub struct FuelData {
    pub item: String,
    pub burn_ticks: u64,
}

/// Wrapper for TOML files.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlFuels {
    pub fuels: Vec<FuelData>,
}

// ===========================================================================
// Tests
// ===========================================================================
