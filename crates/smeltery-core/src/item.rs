use crate::id::ItemKindId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The most items a single slot will hold, regardless of item kind.
pub const SLOT_STACK_LIMIT: u32 = 64;

/// A stack of one item kind with a bounded quantity and optional tags.
///
/// Tags carry per-stack data (damage, enchantment-style markers) and
/// participate in merge equality: two stacks only combine when both the
/// kind and the full tag map match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKindId,
    pub quantity: u32,
    #[serde(default)]
    pub tags: BTreeMap<String, i32>,
}

impl ItemStack {
    pub fn new(kind: ItemKindId, quantity: u32) -> Self {
        Self {
            kind,
            quantity,
            tags: BTreeMap::new(),
        }
    }

    /// Builder-style tag attachment, for tests and data setup.
    pub fn with_tag(mut self, key: &str, value: i32) -> Self {
        self.tags.insert(key.to_string(), value);
        self
    }

    /// Whether another stack may merge into this one: same kind, equal tags.
    pub fn matches_for_merge(&self, other: &ItemStack) -> bool {
        self.kind == other.kind && self.tags == other.tags
    }

    /// Split off up to `count` units into a new stack, leaving the remainder.
    ///
    /// The caller is responsible for discarding this stack if its quantity
    /// reaches zero.
    #[must_use = "the split-off units are returned, not kept in place"]
    pub fn split(&mut self, count: u32) -> ItemStack {
        let taken = count.min(self.quantity);
        self.quantity -= taken;
        ItemStack {
            kind: self.kind,
            quantity: taken,
            tags: self.tags.clone(),
        }
    }
}

/// A container cell: empty, or one stack.
pub type Slot = Option<ItemStack>;
