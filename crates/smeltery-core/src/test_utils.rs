//! Shared fixtures for unit, integration, and property tests.

use crate::furnace::{AdvanceOutcome, ProcessingUnit};
use crate::host::{BlockPos, HostWorld};
use crate::id::{ItemKindId, UnitId};
use crate::registry::{ItemSpec, Registry, RegistryBuilder};
use std::collections::HashMap;

/// Item kind handles for the fixture registry.
#[derive(Debug, Clone, Copy)]
pub struct TestKinds {
    pub lead_dust: ItemKindId,
    pub lead_ingot: ItemKindId,
    pub iron_dust: ItemKindId,
    pub iron_ingot: ItemKindId,
    pub adamantium_ore: ItemKindId,
    pub adamantium_dust: ItemKindId,
    pub uranium_dust: ItemKindId,
    pub uranium_ingot: ItemKindId,
    pub coal: ItemKindId,
    pub stick: ItemKindId,
    pub lava_bucket: ItemKindId,
    pub bucket: ItemKindId,
    pub stone: ItemKindId,
}

/// A small but representative registry: plain smelts, a multi-output ore
/// recipe, a low-stack-size ingot, three fuels (one with a container
/// remainder), and one inert item.
pub fn test_registry() -> (Registry, TestKinds) {
    let mut b = RegistryBuilder::new();

    let lead_dust = b.register_item("lead_dust", ItemSpec::default());
    let lead_ingot = b.register_item("lead_ingot", ItemSpec::default());
    let iron_dust = b.register_item("iron_dust", ItemSpec::default());
    let iron_ingot = b.register_item("iron_ingot", ItemSpec::default());
    let adamantium_ore = b.register_item("adamantium_ore", ItemSpec::default());
    let adamantium_dust = b.register_item("adamantium_dust", ItemSpec::default());
    let uranium_dust = b.register_item("uranium_dust", ItemSpec::default());
    let uranium_ingot = b.register_item(
        "uranium_ingot",
        ItemSpec {
            max_stack_size: Some(16),
            ..Default::default()
        },
    );
    let coal = b.register_item("coal", ItemSpec::default());
    let stick = b.register_item("stick", ItemSpec::default());
    let bucket = b.register_item("bucket", ItemSpec::default());
    let lava_bucket = b.register_item(
        "lava_bucket",
        ItemSpec {
            max_stack_size: Some(1),
            container_remainder: Some(bucket),
            ..Default::default()
        },
    );
    let stone = b.register_item("stone", ItemSpec::default());

    b.register_smelt_recipe("smelt_lead", lead_dust, lead_ingot, 1);
    b.register_smelt_recipe("smelt_iron", iron_dust, iron_ingot, 1);
    b.register_smelt_recipe("crush_adamantium", adamantium_ore, adamantium_dust, 5);
    b.register_smelt_recipe("smelt_uranium", uranium_dust, uranium_ingot, 1);

    b.register_fuel(coal, 1600);
    b.register_fuel(stick, 100);
    b.register_fuel(lava_bucket, 20_000);

    let registry = b.build().expect("fixture registry must build");
    let kinds = TestKinds {
        lead_dust,
        lead_ingot,
        iron_dust,
        iron_ingot,
        adamantium_ore,
        adamantium_dust,
        uranium_dust,
        uranium_ingot,
        coal,
        stick,
        lava_bucket,
        bucket,
        stone,
    };
    (registry, kinds)
}

/// Advance one tick against a fixture registry.
pub fn tick(unit: &mut ProcessingUnit, registry: &Registry) -> AdvanceOutcome {
    unit.advance(registry, registry, registry)
}

/// Advance `n` ticks, discarding per-tick outcomes.
pub fn tick_n(unit: &mut ProcessingUnit, registry: &Registry, n: u64) {
    for _ in 0..n {
        tick(unit, registry);
    }
}

/// A host world backed by a flat position map.
#[derive(Debug, Default)]
pub struct TestWorld {
    units: HashMap<BlockPos, UnitId>,
}

impl TestWorld {
    pub fn place(&mut self, pos: BlockPos, unit: UnitId) {
        self.units.insert(pos, unit);
    }

    pub fn remove(&mut self, pos: BlockPos) {
        self.units.remove(&pos);
    }
}

impl HostWorld for TestWorld {
    fn unit_id_at(&self, pos: BlockPos) -> Option<UnitId> {
        self.units.get(&pos).copied()
    }
}
