//! A furnace run from cold start to empty fuel, printed tick by tick.
//!
//! Run with: cargo run --example smelting_run

use smeltery_core::fixed::fixed64_to_f64;
use smeltery_core::furnace::{FUEL_SLOT, INPUT_SLOT_1, OUTPUT_SLOT, ProcessingUnit};
use smeltery_core::item::ItemStack;
use smeltery_core::registry::{ItemSpec, RegistryBuilder};

fn main() {
    // Build a small registry: one smelt, one fuel.
    let mut builder = RegistryBuilder::new();
    let lead_dust = builder.register_item(
        "lead_dust",
        ItemSpec {
            display_name: Some("Lead Dust".to_string()),
            category: Some("dust".to_string()),
            ..Default::default()
        },
    );
    let lead_ingot = builder.register_item(
        "lead_ingot",
        ItemSpec {
            display_name: Some("Lead Ingot".to_string()),
            category: Some("ingot".to_string()),
            ..Default::default()
        },
    );
    let coal = builder.register_item("coal", ItemSpec::default());
    builder.register_smelt_recipe("smelt_lead", lead_dust, lead_ingot, 1);
    builder.register_fuel(coal, 1600);
    let registry = builder.build().expect("registry should build");

    // Load the furnace: a dozen dust and a single coal.
    let mut unit = ProcessingUnit::new();
    unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(lead_dust, 12)));
    unit.overwrite(FUEL_SLOT, Some(ItemStack::new(coal, 1)));
    unit.mark_clean();

    println!("=== Smelting Run ===");
    println!("input: 12 lead_dust, fuel: 1 coal (1600 ticks)\n");

    let mut smelts = 0;
    for tick in 1..=1700u64 {
        let outcome = unit.advance(&registry, &registry, &registry);

        if outcome.fuel_consumed {
            println!(
                "tick {tick:4}: ignited fuel ({} burn ticks)",
                unit.fuel_burn_capacity_ticks()
            );
        }
        if let Some(smelted) = &outcome.smelted {
            smelts += 1;
            println!(
                "tick {tick:4}: smelt #{smelts} complete -> {} x{}",
                registry
                    .get_item(smelted.result.kind)
                    .map(|def| def.display_name.as_str())
                    .unwrap_or("?"),
                smelted.result.quantity
            );
        }
        if tick % 400 == 0 {
            println!(
                "tick {tick:4}: cook {:5.1}%, {}s of fuel left",
                fixed64_to_f64(unit.fraction_of_cook_complete()) * 100.0,
                unit.seconds_of_fuel_remaining()
            );
        }
    }

    println!("\n=== Final State ===");
    for (label, index) in [
        ("input 1", INPUT_SLOT_1),
        ("fuel", FUEL_SLOT),
        ("output", OUTPUT_SLOT),
    ] {
        match unit.slot(index) {
            Some(stack) => {
                let name = registry
                    .item_name(stack.kind)
                    .unwrap_or("?");
                println!("{label:8}: {name} x{}", stack.quantity);
            }
            None => println!("{label:8}: empty"),
        }
    }
    println!("total smelts: {smelts}");
}
