use crate::dirty::ChangeTracker;
use crate::fixed::{Fixed64, Ticks};
use crate::id::ItemKindId;
use crate::item::{ItemStack, SLOT_STACK_LIMIT, Slot};
use crate::registry::{FuelTable, ItemCatalog, RecipeLookup};

// ---------------------------------------------------------------------------
// Slot layout and timing constants
// ---------------------------------------------------------------------------

/// First smeltable-input slot.
pub const INPUT_SLOT_1: usize = 0;
/// Second smeltable-input slot.
pub const INPUT_SLOT_2: usize = 1;
/// Fuel slot.
pub const FUEL_SLOT: usize = 2;
/// Result slot. Never a valid insertion target for external actors.
pub const OUTPUT_SLOT: usize = 3;
/// Total slot count. Roles are fixed and never reordered.
pub const SLOT_COUNT: usize = 4;

/// Cook progress required to complete one smelt.
pub const COOK_COMPLETE_TICKS: Ticks = 200;
/// Simulation ticks per wall-clock second.
pub const TICKS_PER_SECOND: Ticks = 20;

const INPUT_SLOTS: [usize; 2] = [INPUT_SLOT_1, INPUT_SLOT_2];
const OUTPUT_SLOTS: [usize; 1] = [OUTPUT_SLOT];

// ---------------------------------------------------------------------------
// Tick outcome
// ---------------------------------------------------------------------------

/// A smelt committed during [`ProcessingUnit::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSmelt {
    /// Input slot one unit was consumed from.
    pub input_slot: usize,
    /// Output slot the result was merged into.
    pub output_slot: usize,
    /// The recipe result that was committed.
    pub result: ItemStack,
}

/// The outcome of a single tick. Returned instead of mutating anything the
/// caller can see besides the unit's own slots and counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Burning contributions this tick (0 when the fire is out).
    pub burning_slots: u32,
    /// Whether one unit of fuel was consumed to start a new burn batch.
    pub fuel_consumed: bool,
    /// The smelt that completed this tick, if any.
    pub smelted: Option<CompletedSmelt>,
    /// Whether persisted state changed this tick (fuel or smelt commit).
    pub changed: bool,
}

/// The (input, output) pairing chosen by the candidate scan. Shared between
/// the dry-run and the commit so both always agree.
#[derive(Debug, Clone)]
struct SmeltSelection {
    input_slot: usize,
    output_slot: usize,
    result: ItemStack,
}

// ---------------------------------------------------------------------------
// ProcessingUnit
// ---------------------------------------------------------------------------

/// A four-slot fuel-burning smelter, updated once per simulation tick.
///
/// Slot indices outside `[0, 3]` are a caller contract violation; all other
/// operations are total and return neutral values rather than failing.
#[derive(Debug, Clone, Default)]
pub struct ProcessingUnit {
    slots: [Slot; SLOT_COUNT],
    /// Remaining burn ticks of the fuel unit currently being consumed.
    current_fuel_burn_ticks: Ticks,
    /// Burn ticks granted by the most recently ignited fuel unit. Only ever
    /// reset together with `current_fuel_burn_ticks`.
    fuel_burn_capacity_ticks: Ticks,
    /// Accumulated progress toward `COOK_COMPLETE_TICKS`.
    cook_progress_ticks: Ticks,
    changes: ChangeTracker,
}

impl ProcessingUnit {
    /// A fresh unit: all slots empty, all counters zero.
    pub fn new() -> Self {
        Self::default()
    }

    // -- State queries ------------------------------------------------------

    pub fn slot(&self, slot_index: usize) -> Option<&ItemStack> {
        self.slots[slot_index].as_ref()
    }

    pub fn slot_count(&self) -> usize {
        SLOT_COUNT
    }

    pub fn current_fuel_burn_ticks(&self) -> Ticks {
        self.current_fuel_burn_ticks
    }

    pub fn fuel_burn_capacity_ticks(&self) -> Ticks {
        self.fuel_burn_capacity_ticks
    }

    pub fn cook_progress_ticks(&self) -> Ticks {
        self.cook_progress_ticks
    }

    /// True while the current cook cycle is incomplete.
    ///
    /// Note: this compares cook progress, not fuel state. A unit with no
    /// fuel and zero progress still reports `true`. Kept as observed in the
    /// shipped behavior; see DESIGN.md for the product-clarification flag.
    pub fn is_burning(&self) -> bool {
        self.fraction_of_cook_complete() < Fixed64::from_num(1)
    }

    /// Fraction of the current fuel batch remaining, in `[0, 1]`.
    ///
    /// As observed in the shipped behavior this divides the batch capacity
    /// by itself, so it reports 1 while any fuel burns and 0 otherwise.
    /// Kept literal rather than silently fixed; see DESIGN.md.
    pub fn fraction_of_fuel_remaining(&self) -> Fixed64 {
        if self.current_fuel_burn_ticks == 0 || self.fuel_burn_capacity_ticks == 0 {
            return Fixed64::from_num(0);
        }
        let capacity = Fixed64::from_num(self.fuel_burn_capacity_ticks);
        (capacity / capacity).clamp(Fixed64::from_num(0), Fixed64::from_num(1))
    }

    /// Whole seconds of burn time left on the current fuel batch.
    pub fn seconds_of_fuel_remaining(&self) -> Ticks {
        self.current_fuel_burn_ticks / TICKS_PER_SECOND
    }

    /// Fraction of the cook cycle completed, in `[0, 1]`.
    pub fn fraction_of_cook_complete(&self) -> Fixed64 {
        let fraction = Fixed64::from_num(self.cook_progress_ticks)
            / Fixed64::from_num(COOK_COMPLETE_TICKS);
        fraction.clamp(Fixed64::from_num(0), Fixed64::from_num(1))
    }

    /// Pending change flags for the owner's write-back scheduling.
    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Reset change flags after the owner has persisted state.
    pub fn mark_clean(&mut self) {
        self.changes.mark_clean();
    }

    // -- Tick ---------------------------------------------------------------

    /// Advance the unit by one tick.
    ///
    /// # Arguments
    /// * `recipes` - input kind -> smelt result lookup
    /// * `fuel`    - item kind -> burn duration / container remainder
    /// * `items`   - per-kind stack limits for output merging
    ///
    /// # Returns
    /// An [`AdvanceOutcome`] describing what happened this tick.
    pub fn advance(
        &mut self,
        recipes: &impl RecipeLookup,
        fuel: &impl FuelTable,
        items: &impl ItemCatalog,
    ) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();

        // Nothing smeltable or no room in the output: progress resets and no
        // burn accounting happens this tick.
        let Some(selection) = self.select_smelt(recipes, items) else {
            self.cook_progress_ticks = 0;
            return outcome;
        };

        let burning = self.burn_fuel(fuel, &mut outcome);

        if burning > 0 {
            self.cook_progress_ticks += burning as Ticks;
        } else {
            // Uncook at double speed while the fire is out, floored at zero.
            self.cook_progress_ticks = self.cook_progress_ticks.saturating_sub(2);
        }

        if self.cook_progress_ticks >= COOK_COMPLETE_TICKS {
            let committed = self.commit_smelt(&selection);
            self.cook_progress_ticks = 0;
            outcome.smelted = Some(committed);
            outcome.changed = true;
        }

        outcome
    }

    /// Decrement the active burn counter and ignite a fresh fuel unit when it
    /// runs out. Returns the number of burning contributions this tick.
    fn burn_fuel(&mut self, fuel: &impl FuelTable, outcome: &mut AdvanceOutcome) -> u32 {
        let mut burning = 0;

        if self.current_fuel_burn_ticks > 0 {
            self.current_fuel_burn_ticks -= 1;
            burning += 1;
        }

        if self.current_fuel_burn_ticks == 0 {
            let ignitable = match &self.slots[FUEL_SLOT] {
                Some(stack) => {
                    let ticks = fuel.burn_ticks_for(stack.kind);
                    (ticks > 0).then_some((stack.kind, ticks))
                }
                None => None,
            };

            if let Some((kind, ticks)) = ignitable {
                self.current_fuel_burn_ticks = ticks;
                self.fuel_burn_capacity_ticks = ticks;
                burning += 1;

                let mut emptied = false;
                if let Some(stack) = self.slots[FUEL_SLOT].as_mut() {
                    stack.quantity -= 1;
                    emptied = stack.quantity == 0;
                }
                // The last unit of a container fuel leaves its container
                // behind (lava bucket -> empty bucket).
                if emptied {
                    self.slots[FUEL_SLOT] = fuel
                        .container_remainder_for(kind)
                        .map(|remainder| ItemStack::new(remainder, 1));
                }

                self.changes.mark_slot(FUEL_SLOT);
                self.changes.mark_counters();
                outcome.fuel_consumed = true;
                outcome.changed = true;
            }
        }

        outcome.burning_slots = burning;
        burning
    }

    /// Candidate scan shared by the dry-run and the commit: first input slot
    /// with a resolvable recipe whose result the first suitable output slot
    /// accepts (empty, or matching kind and tags with room under both the
    /// slot limit and the item's own stack size).
    fn select_smelt(
        &self,
        recipes: &impl RecipeLookup,
        items: &impl ItemCatalog,
    ) -> Option<SmeltSelection> {
        for input_slot in INPUT_SLOTS {
            let Some(input) = &self.slots[input_slot] else {
                continue;
            };
            let Some(result) = recipes.smelt_result_for(input.kind) else {
                continue;
            };
            for output_slot in OUTPUT_SLOTS {
                match &self.slots[output_slot] {
                    None => {
                        return Some(SmeltSelection {
                            input_slot,
                            output_slot,
                            result,
                        });
                    }
                    Some(existing) => {
                        if !existing.matches_for_merge(&result) {
                            continue;
                        }
                        let combined = existing.quantity + result.quantity;
                        if combined <= SLOT_STACK_LIMIT
                            && combined <= items.max_stack_size(existing.kind)
                        {
                            return Some(SmeltSelection {
                                input_slot,
                                output_slot,
                                result,
                            });
                        }
                    }
                }
            }
        }
        None
    }

    /// Commit step of the dry-run: consume one input unit and merge the
    /// result into the chosen output slot.
    fn commit_smelt(&mut self, selection: &SmeltSelection) -> CompletedSmelt {
        let mut emptied = false;
        if let Some(input) = self.slots[selection.input_slot].as_mut() {
            input.quantity = input.quantity.saturating_sub(1);
            emptied = input.quantity == 0;
        }
        if emptied {
            self.slots[selection.input_slot] = None;
        }

        match &mut self.slots[selection.output_slot] {
            Some(existing) => existing.quantity += selection.result.quantity,
            slot @ None => *slot = Some(selection.result.clone()),
        }

        self.changes.mark_slot(selection.input_slot);
        self.changes.mark_slot(selection.output_slot);

        CompletedSmelt {
            input_slot: selection.input_slot,
            output_slot: selection.output_slot,
            result: selection.result.clone(),
        }
    }

    // -- Owner mutations ----------------------------------------------------

    /// Split off up to `count` units from a slot. Returns the removed stack,
    /// or `None` for an empty slot or a zero count.
    pub fn remove_units(&mut self, slot_index: usize, count: u32) -> Option<ItemStack> {
        if count == 0 {
            return None;
        }
        let take_all = match &self.slots[slot_index] {
            None => return None,
            Some(stack) => stack.quantity <= count,
        };
        let removed = if take_all {
            self.slots[slot_index].take()
        } else {
            self.slots[slot_index]
                .as_mut()
                .map(|stack| stack.split(count))
        };
        self.changes.mark_slot(slot_index);
        removed
    }

    /// Replace a slot outright. Quantities are clamped to the slot limit and
    /// a zero-quantity stack is normalized to an empty slot.
    pub fn overwrite(&mut self, slot_index: usize, contents: Slot) {
        let normalized = contents.and_then(|mut stack| {
            if stack.quantity == 0 {
                return None;
            }
            stack.quantity = stack.quantity.min(SLOT_STACK_LIMIT);
            Some(stack)
        });
        self.slots[slot_index] = normalized;
        self.changes.mark_slot(slot_index);
    }

    /// Take the entire contents of a slot, leaving it empty.
    pub fn take_slot(&mut self, slot_index: usize) -> Option<ItemStack> {
        let taken = self.slots[slot_index].take();
        if taken.is_some() {
            self.changes.mark_slot(slot_index);
        }
        taken
    }

    /// Whether external actors may insert the given kind into a slot. The
    /// output slot is never a valid insertion target.
    pub fn is_slot_valid_for(&self, _kind: ItemKindId, slot_index: usize) -> bool {
        slot_index != OUTPUT_SLOT
    }

    /// Empty all slots without marking anything changed. Teardown only.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    // -- Snapshot support (crate-internal) ----------------------------------

    /// Place a restored stack without marking change flags.
    pub(crate) fn restore_slot(&mut self, slot_index: usize, stack: ItemStack) {
        self.slots[slot_index] = Some(stack);
    }

    /// Restore burn/cook counters without marking change flags.
    pub(crate) fn restore_counters(&mut self, current: Ticks, capacity: Ticks, cook: Ticks) {
        self.current_fuel_burn_ticks = current;
        self.fuel_burn_capacity_ticks = capacity;
        self.cook_progress_ticks = cook.min(COOK_COMPLETE_TICKS);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::f64_to_fixed64;
    use crate::test_utils::{TestKinds, test_registry, tick, tick_n};
    use crate::registry::Registry;

    fn setup() -> (Registry, TestKinds, ProcessingUnit) {
        let (registry, kinds) = test_registry();
        (registry, kinds, ProcessingUnit::new())
    }

    // -----------------------------------------------------------------------
    // Construction and queries
    // -----------------------------------------------------------------------

    #[test]
    fn new_unit_is_empty_with_zero_counters() {
        let unit = ProcessingUnit::new();
        for slot in 0..SLOT_COUNT {
            assert!(unit.slot(slot).is_none());
        }
        assert_eq!(unit.current_fuel_burn_ticks(), 0);
        assert_eq!(unit.fuel_burn_capacity_ticks(), 0);
        assert_eq!(unit.cook_progress_ticks(), 0);
        assert!(!unit.changes().is_dirty());
    }

    #[test]
    fn fraction_of_cook_complete_scales() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        tick_n(&mut unit, &registry, 51);
        // Tick 1 ignites and burns, so 51 ticks accumulate 51 progress.
        assert_eq!(unit.cook_progress_ticks(), 51);
        assert_eq!(
            unit.fraction_of_cook_complete(),
            f64_to_fixed64(51.0) / f64_to_fixed64(200.0)
        );
    }

    #[test]
    fn seconds_of_fuel_remaining_uses_tick_rate() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        tick(&mut unit, &registry);
        // 1600-tick batch ignited, nothing burned off it yet.
        assert_eq!(unit.seconds_of_fuel_remaining(), 80);
        tick_n(&mut unit, &registry, 20);
        assert_eq!(unit.seconds_of_fuel_remaining(), 79);
    }

    #[test]
    fn is_burning_reflects_cook_fraction_not_fuel() {
        // Observed behavior: a cold, empty unit reports burning because its
        // cook fraction is below 1.
        let unit = ProcessingUnit::new();
        assert!(unit.is_burning());
    }

    #[test]
    fn fraction_of_fuel_remaining_is_zero_or_one() {
        let (registry, kinds, mut unit) = setup();
        assert_eq!(unit.fraction_of_fuel_remaining(), f64_to_fixed64(0.0));

        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));
        tick_n(&mut unit, &registry, 100);

        // Observed behavior: reports exactly 1 while any fuel burns, even
        // though the batch is partially consumed.
        assert_eq!(unit.fraction_of_fuel_remaining(), f64_to_fixed64(1.0));
    }

    // -----------------------------------------------------------------------
    // advance(): cook progress accounting
    // -----------------------------------------------------------------------

    #[test]
    fn no_smeltable_pairing_resets_progress_and_skips_burn() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 2)));
        tick_n(&mut unit, &registry, 10);
        assert!(unit.cook_progress_ticks() > 0);
        let fuel_before = unit.current_fuel_burn_ticks();

        // Remove the input: nothing to smelt.
        unit.take_slot(INPUT_SLOT_1);
        let outcome = tick(&mut unit, &registry);

        assert_eq!(unit.cook_progress_ticks(), 0);
        assert_eq!(outcome.burning_slots, 0);
        assert!(!outcome.changed);
        // No burn accounting happened: the counter is frozen, not decremented.
        assert_eq!(unit.current_fuel_burn_ticks(), fuel_before);
    }

    #[test]
    fn stone_is_not_smeltable() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.stone, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        let outcome = tick(&mut unit, &registry);
        assert_eq!(outcome.burning_slots, 0);
        assert_eq!(unit.cook_progress_ticks(), 0);
        // Fuel untouched.
        assert_eq!(unit.slot(FUEL_SLOT).unwrap().quantity, 1);
    }

    #[test]
    fn uncooks_at_double_speed_when_fuel_runs_out() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        // One stick: 100 burn ticks, not enough to finish a 200-tick cook.
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.stick, 1)));

        // Run until the fire goes out.
        let mut progress_at_flameout = 0;
        for _ in 0..300 {
            let outcome = tick(&mut unit, &registry);
            if outcome.burning_slots == 0 {
                break;
            }
            progress_at_flameout = unit.cook_progress_ticks();
        }
        assert!(progress_at_flameout > 0);
        assert!(progress_at_flameout < COOK_COMPLETE_TICKS);

        // Each further tick regresses progress by 2, floored at zero.
        let mut previous = unit.cook_progress_ticks();
        loop {
            tick(&mut unit, &registry);
            let now = unit.cook_progress_ticks();
            if previous >= 2 {
                assert_eq!(now, previous - 2);
            } else {
                assert_eq!(now, 0);
            }
            if now == 0 {
                break;
            }
            previous = now;
        }

        // Progress stays at zero once fully uncooked.
        tick_n(&mut unit, &registry, 5);
        assert_eq!(unit.cook_progress_ticks(), 0);
    }

    #[test]
    fn cook_progress_stays_in_range() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 64)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 4)));

        for _ in 0..5000 {
            tick(&mut unit, &registry);
            assert!(unit.cook_progress_ticks() <= COOK_COMPLETE_TICKS);
        }
    }

    // -----------------------------------------------------------------------
    // advance(): fuel accounting
    // -----------------------------------------------------------------------

    #[test]
    fn ignition_consumes_one_fuel_unit_and_fills_counters() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 3)));

        let outcome = tick(&mut unit, &registry);

        assert_eq!(outcome.burning_slots, 1);
        assert!(outcome.fuel_consumed);
        assert!(outcome.changed);
        assert_eq!(unit.slot(FUEL_SLOT).unwrap().quantity, 2);
        assert_eq!(unit.current_fuel_burn_ticks(), 1600);
        assert_eq!(unit.fuel_burn_capacity_ticks(), 1600);
    }

    #[test]
    fn batch_refills_after_exactly_capacity_active_ticks() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 64)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 2)));

        tick(&mut unit, &registry);
        assert_eq!(unit.slot(FUEL_SLOT).unwrap().quantity, 1);

        // The batch sustains ticks 2..=1600 (1599 decrements) and hits zero
        // on tick 1601, which ignites the second unit in the same tick.
        let mut second_ignition_at = 0;
        for n in 2..=1602u64 {
            let outcome = tick(&mut unit, &registry);
            if outcome.fuel_consumed {
                second_ignition_at = n;
                break;
            }
        }
        assert_eq!(second_ignition_at, 1601);
        assert!(unit.slot(FUEL_SLOT).is_none());
        assert_eq!(unit.current_fuel_burn_ticks(), 1600);
        assert_eq!(unit.fuel_burn_capacity_ticks(), 1600);
    }

    #[test]
    fn container_fuel_leaves_remainder() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.lava_bucket, 1)));

        let outcome = tick(&mut unit, &registry);

        assert!(outcome.fuel_consumed);
        let remainder = unit.slot(FUEL_SLOT).unwrap();
        assert_eq!(remainder.kind, kinds.bucket);
        assert_eq!(remainder.quantity, 1);
        assert_eq!(unit.current_fuel_burn_ticks(), 20_000);
    }

    #[test]
    fn non_fuel_in_fuel_slot_never_ignites() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.stone, 8)));

        let outcome = tick(&mut unit, &registry);
        assert_eq!(outcome.burning_slots, 0);
        assert!(!outcome.fuel_consumed);
        assert_eq!(unit.slot(FUEL_SLOT).unwrap().quantity, 8);
    }

    // -----------------------------------------------------------------------
    // advance(): smelt completion
    // -----------------------------------------------------------------------

    #[test]
    fn smelt_completes_after_cook_ticks() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 2)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        for n in 1..=200u64 {
            let outcome = tick(&mut unit, &registry);
            if n < 200 {
                assert!(outcome.smelted.is_none(), "tick {n} should not smelt");
            } else {
                let smelted = outcome.smelted.expect("tick 200 should smelt");
                assert_eq!(smelted.input_slot, INPUT_SLOT_1);
                assert_eq!(smelted.output_slot, OUTPUT_SLOT);
                assert_eq!(smelted.result.kind, kinds.lead_ingot);
            }
        }

        assert_eq!(unit.cook_progress_ticks(), 0);
        assert_eq!(unit.slot(INPUT_SLOT_1).unwrap().quantity, 1);
        let output = unit.slot(OUTPUT_SLOT).unwrap();
        assert_eq!(output.kind, kinds.lead_ingot);
        assert_eq!(output.quantity, 1);
    }

    #[test]
    fn smelt_empties_input_slot_at_zero() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 1)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        tick_n(&mut unit, &registry, 200);
        assert!(unit.slot(INPUT_SLOT_1).is_none());
        assert_eq!(unit.slot(OUTPUT_SLOT).unwrap().quantity, 1);
    }

    #[test]
    fn second_input_slot_used_when_first_unresolvable() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.stone, 4)));
        unit.overwrite(INPUT_SLOT_2, Some(ItemStack::new(kinds.iron_dust, 4)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        tick_n(&mut unit, &registry, 200);

        // The stone is untouched; the iron dust smelted.
        assert_eq!(unit.slot(INPUT_SLOT_1).unwrap().quantity, 4);
        assert_eq!(unit.slot(INPUT_SLOT_2).unwrap().quantity, 3);
        assert_eq!(unit.slot(OUTPUT_SLOT).unwrap().kind, kinds.iron_ingot);
    }

    #[test]
    fn first_input_slot_takes_priority() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 4)));
        unit.overwrite(INPUT_SLOT_2, Some(ItemStack::new(kinds.iron_dust, 4)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));

        tick_n(&mut unit, &registry, 200);

        assert_eq!(unit.slot(INPUT_SLOT_1).unwrap().quantity, 3);
        assert_eq!(unit.slot(INPUT_SLOT_2).unwrap().quantity, 4);
        assert_eq!(unit.slot(OUTPUT_SLOT).unwrap().kind, kinds.lead_ingot);
    }

    #[test]
    fn results_stack_onto_matching_output() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));
        unit.overwrite(OUTPUT_SLOT, Some(ItemStack::new(kinds.lead_ingot, 10)));

        tick_n(&mut unit, &registry, 200);
        assert_eq!(unit.slot(OUTPUT_SLOT).unwrap().quantity, 11);
    }

    #[test]
    fn output_over_slot_limit_blocks_smelting() {
        // Output at 60 of 64; the ore recipe yields 5, which would overflow.
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.adamantium_ore, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));
        unit.overwrite(OUTPUT_SLOT, Some(ItemStack::new(kinds.adamantium_dust, 60)));

        let outcome = tick(&mut unit, &registry);
        assert_eq!(outcome.burning_slots, 0);
        assert_eq!(unit.cook_progress_ticks(), 0);
        assert_eq!(unit.slot(OUTPUT_SLOT).unwrap().quantity, 60);
    }

    #[test]
    fn output_respects_item_max_stack_below_slot_limit() {
        // Uranium ingots stack to 16; a full stack of 16 blocks further
        // smelting even though the slot limit of 64 has room.
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.uranium_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));
        unit.overwrite(OUTPUT_SLOT, Some(ItemStack::new(kinds.uranium_ingot, 16)));

        let outcome = tick(&mut unit, &registry);
        assert_eq!(outcome.burning_slots, 0);
        assert_eq!(unit.slot(OUTPUT_SLOT).unwrap().quantity, 16);
    }

    #[test]
    fn mismatched_output_tags_block_merging() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));
        unit.overwrite(
            OUTPUT_SLOT,
            Some(ItemStack::new(kinds.lead_ingot, 1).with_tag("purity", 3)),
        );

        let outcome = tick(&mut unit, &registry);
        assert_eq!(outcome.burning_slots, 0);
        assert_eq!(unit.cook_progress_ticks(), 0);
    }

    #[test]
    fn mismatched_output_kind_blocks_smelting() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 1)));
        unit.overwrite(OUTPUT_SLOT, Some(ItemStack::new(kinds.stone, 1)));

        let outcome = tick(&mut unit, &registry);
        assert_eq!(outcome.burning_slots, 0);
        assert_eq!(unit.cook_progress_ticks(), 0);
    }

    // -----------------------------------------------------------------------
    // Owner mutations
    // -----------------------------------------------------------------------

    #[test]
    fn remove_units_splits_stack() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 10)));
        unit.mark_clean();

        let removed = unit.remove_units(INPUT_SLOT_1, 3).unwrap();
        assert_eq!(removed.quantity, 3);
        assert_eq!(unit.slot(INPUT_SLOT_1).unwrap().quantity, 7);
        assert!(unit.changes().is_slot_dirty(INPUT_SLOT_1));
    }

    #[test]
    fn remove_units_empties_slot_when_taking_all() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 3)));

        let removed = unit.remove_units(INPUT_SLOT_1, 5).unwrap();
        assert_eq!(removed.quantity, 3);
        assert!(unit.slot(INPUT_SLOT_1).is_none());
    }

    #[test]
    fn remove_units_from_empty_slot_returns_none() {
        let (_registry, _kinds, mut unit) = setup();
        unit.mark_clean();
        assert!(unit.remove_units(INPUT_SLOT_1, 1).is_none());
        assert!(!unit.changes().is_dirty());
    }

    #[test]
    fn overwrite_clamps_to_slot_limit() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 200)));
        assert_eq!(unit.slot(INPUT_SLOT_1).unwrap().quantity, SLOT_STACK_LIMIT);
    }

    #[test]
    fn overwrite_normalizes_zero_quantity_to_empty() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 0)));
        assert!(unit.slot(FUEL_SLOT).is_none());
    }

    #[test]
    fn zero_quantity_fuel_never_ignites() {
        let (registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 8)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 0)));

        let outcome = tick(&mut unit, &registry);
        assert!(!outcome.fuel_consumed);
        assert_eq!(outcome.burning_slots, 0);
        assert!(unit.slot(FUEL_SLOT).is_none());
    }

    #[test]
    fn remove_units_with_zero_count_is_a_no_op() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 10)));
        unit.mark_clean();

        assert!(unit.remove_units(INPUT_SLOT_1, 0).is_none());
        assert_eq!(unit.slot(INPUT_SLOT_1).unwrap().quantity, 10);
        assert!(!unit.changes().is_dirty());
    }

    #[test]
    fn take_slot_empties_and_marks() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 5)));
        unit.mark_clean();

        let taken = unit.take_slot(FUEL_SLOT).unwrap();
        assert_eq!(taken.quantity, 5);
        assert!(unit.slot(FUEL_SLOT).is_none());
        assert!(unit.changes().is_slot_dirty(FUEL_SLOT));

        // Taking an already-empty slot is a no-op.
        unit.mark_clean();
        assert!(unit.take_slot(FUEL_SLOT).is_none());
        assert!(!unit.changes().is_dirty());
    }

    #[test]
    fn output_slot_rejects_external_insertion() {
        let (_registry, kinds, unit) = setup();
        assert!(unit.is_slot_valid_for(kinds.coal, INPUT_SLOT_1));
        assert!(unit.is_slot_valid_for(kinds.coal, INPUT_SLOT_2));
        assert!(unit.is_slot_valid_for(kinds.coal, FUEL_SLOT));
        assert!(!unit.is_slot_valid_for(kinds.coal, OUTPUT_SLOT));
    }

    #[test]
    fn clear_empties_slots_without_marking() {
        let (_registry, kinds, mut unit) = setup();
        unit.overwrite(INPUT_SLOT_1, Some(ItemStack::new(kinds.lead_dust, 4)));
        unit.overwrite(FUEL_SLOT, Some(ItemStack::new(kinds.coal, 4)));
        unit.mark_clean();

        unit.clear();

        for slot in 0..SLOT_COUNT {
            assert!(unit.slot(slot).is_none());
        }
        assert!(!unit.changes().is_dirty());
    }
}
