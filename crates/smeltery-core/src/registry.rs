use crate::fixed::Ticks;
use crate::id::{ItemKindId, RecipeId};
use crate::item::{ItemStack, SLOT_STACK_LIMIT};
use std::collections::HashMap;

/// Burn durations are clamped to this on registration. Saves and wire
/// formats historically carried them as 16-bit values.
pub const MAX_BURN_TICKS: Ticks = i16::MAX as Ticks;

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Resolves an input item kind to its smelting result, if it has one.
pub trait RecipeLookup {
    fn smelt_result_for(&self, kind: ItemKindId) -> Option<ItemStack>;
}

/// Resolves an item kind to its burn duration (0 = not a fuel) and to the
/// container left behind when the last unit of it is consumed as fuel.
pub trait FuelTable {
    fn burn_ticks_for(&self, kind: ItemKindId) -> Ticks;
    fn container_remainder_for(&self, kind: ItemKindId) -> Option<ItemKindId>;
}

/// Per-kind stack metadata consulted when merging smelt results.
pub trait ItemCatalog {
    fn max_stack_size(&self, kind: ItemKindId) -> u32;
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// An item kind definition: identity plus the display and categorization
/// metadata that used to live in process-wide name tables.
#[derive(Debug, Clone)]
pub struct ItemKindDef {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub max_stack_size: u32,
    /// Item left in the fuel slot when the last unit burns away
    /// (e.g. a lava bucket leaves an empty bucket).
    pub container_remainder: Option<ItemKindId>,
}

/// Optional fields for item registration. Defaults match a plain,
/// fully-stackable item with no remainder.
#[derive(Debug, Clone, Default)]
pub struct ItemSpec {
    pub display_name: Option<String>,
    pub category: Option<String>,
    pub max_stack_size: Option<u32>,
    pub container_remainder: Option<ItemKindId>,
}

/// A smelting recipe: one input kind transforms into a fixed output stack.
#[derive(Debug, Clone)]
pub struct SmeltRecipeDef {
    pub name: String,
    pub input: ItemKindId,
    pub output: ItemStack,
}

const DEFAULT_CATEGORY: &str = "misc";

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable Registry.
/// Three-phase lifecycle: registration -> mutation -> finalization.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    items: Vec<ItemKindDef>,
    item_name_to_id: HashMap<String, ItemKindId>,
    recipes: Vec<SmeltRecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
    smelt_by_input: HashMap<ItemKindId, RecipeId>,
    fuels: HashMap<ItemKindId, Ticks>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: Register an item kind. Returns its ID.
    pub fn register_item(&mut self, name: &str, spec: ItemSpec) -> ItemKindId {
        let id = ItemKindId(self.items.len() as u32);
        self.items.push(ItemKindDef {
            name: name.to_string(),
            display_name: spec.display_name.unwrap_or_else(|| name.to_string()),
            category: spec.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            max_stack_size: spec.max_stack_size.unwrap_or(SLOT_STACK_LIMIT),
            container_remainder: spec.container_remainder,
        });
        self.item_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Phase 1: Register a smelting recipe. Later registrations for the same
    /// input kind win, mirroring datapack override order.
    pub fn register_smelt_recipe(
        &mut self,
        name: &str,
        input: ItemKindId,
        output: ItemKindId,
        output_quantity: u32,
    ) -> RecipeId {
        let id = RecipeId(self.recipes.len() as u32);
        self.recipes.push(SmeltRecipeDef {
            name: name.to_string(),
            input,
            output: ItemStack::new(output, output_quantity),
        });
        self.recipe_name_to_id.insert(name.to_string(), id);
        self.smelt_by_input.insert(input, id);
        id
    }

    /// Phase 1: Register a fuel. Burn ticks are clamped to
    /// `[0, MAX_BURN_TICKS]`; a zero value removes fuel status.
    pub fn register_fuel(&mut self, item: ItemKindId, burn_ticks: Ticks) {
        let clamped = burn_ticks.min(MAX_BURN_TICKS);
        if clamped == 0 {
            self.fuels.remove(&item);
        } else {
            self.fuels.insert(item, clamped);
        }
    }

    /// Phase 2: Mutate an existing item kind by name.
    pub fn mutate_item<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut ItemKindDef),
    {
        let id = self
            .item_name_to_id
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        f(&mut self.items[id.0 as usize]);
        Ok(())
    }

    /// Phase 2: Mutate an existing recipe by name.
    pub fn mutate_recipe<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut SmeltRecipeDef),
    {
        let id = self
            .recipe_name_to_id
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        f(&mut self.recipes[id.0 as usize]);
        Ok(())
    }

    /// Lookup item kind ID by name.
    pub fn item_id(&self, name: &str) -> Option<ItemKindId> {
        self.item_name_to_id.get(name).copied()
    }

    /// Lookup recipe ID by name.
    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// Phase 3: Finalize and build the immutable registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let item_count = self.items.len();
        let check = |id: ItemKindId| {
            if (id.0 as usize) < item_count {
                Ok(())
            } else {
                Err(RegistryError::InvalidItemRef(id))
            }
        };

        for item in &self.items {
            if let Some(remainder) = item.container_remainder {
                check(remainder)?;
            }
        }
        for recipe in &self.recipes {
            check(recipe.input)?;
            check(recipe.output.kind)?;
            if recipe.output.quantity == 0 {
                return Err(RegistryError::EmptyRecipeOutput(recipe.name.clone()));
            }
            // An output larger than a slot could never be committed without
            // blowing the slot limit through an empty output slot.
            if recipe.output.quantity > SLOT_STACK_LIMIT {
                return Err(RegistryError::OversizedRecipeOutput {
                    name: recipe.name.clone(),
                    quantity: recipe.output.quantity,
                });
            }
        }
        for &item in self.fuels.keys() {
            check(item)?;
        }

        // Rebuild the input index from recipe order so later registrations
        // win deterministically even after phase-2 mutation.
        let mut smelt_by_input = HashMap::new();
        for (idx, recipe) in self.recipes.iter().enumerate() {
            smelt_by_input.insert(recipe.input, RecipeId(idx as u32));
        }

        Ok(Registry {
            items: self.items,
            item_name_to_id: self.item_name_to_id,
            recipes: self.recipes,
            recipe_name_to_id: self.recipe_name_to_id,
            smelt_by_input,
            fuels: self.fuels,
        })
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable registry. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Registry {
    items: Vec<ItemKindDef>,
    item_name_to_id: HashMap<String, ItemKindId>,
    recipes: Vec<SmeltRecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
    smelt_by_input: HashMap<ItemKindId, RecipeId>,
    fuels: HashMap<ItemKindId, Ticks>,
}

impl Registry {
    pub fn get_item(&self, id: ItemKindId) -> Option<&ItemKindDef> {
        self.items.get(id.0 as usize)
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&SmeltRecipeDef> {
        self.recipes.get(id.0 as usize)
    }

    pub fn item_id(&self, name: &str) -> Option<ItemKindId> {
        self.item_name_to_id.get(name).copied()
    }

    /// Stable persistence name for an item kind.
    pub fn item_name(&self, id: ItemKindId) -> Option<&str> {
        self.get_item(id).map(|item| item.name.as_str())
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn fuel_count(&self) -> usize {
        self.fuels.len()
    }

    pub fn is_fuel(&self, kind: ItemKindId) -> bool {
        self.fuels.contains_key(&kind)
    }
}

impl RecipeLookup for Registry {
    fn smelt_result_for(&self, kind: ItemKindId) -> Option<ItemStack> {
        let id = self.smelt_by_input.get(&kind)?;
        self.recipes.get(id.0 as usize).map(|r| r.output.clone())
    }
}

impl FuelTable for Registry {
    fn burn_ticks_for(&self, kind: ItemKindId) -> Ticks {
        self.fuels.get(&kind).copied().unwrap_or(0)
    }

    fn container_remainder_for(&self, kind: ItemKindId) -> Option<ItemKindId> {
        self.get_item(kind).and_then(|item| item.container_remainder)
    }
}

impl ItemCatalog for Registry {
    fn max_stack_size(&self, kind: ItemKindId) -> u32 {
        self.get_item(kind)
            .map(|item| item.max_stack_size)
            .unwrap_or(SLOT_STACK_LIMIT)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid item reference: {0:?}")]
    InvalidItemRef(ItemKindId),
    #[error("recipe '{0}' has a zero-quantity output")]
    EmptyRecipeOutput(String),
    #[error(
        "recipe '{name}' output quantity {quantity} exceeds the slot limit of {SLOT_STACK_LIMIT}"
    )]
    OversizedRecipeOutput { name: String, quantity: u32 },
}
