//! Smeltery Core -- a host-independent furnace simulation library.
//!
//! This crate models a fuel-burning, item-transforming processing unit as a
//! standalone state machine: four fixed-role inventory slots (two inputs, one
//! fuel, one output), per-tick burn and cook counters, and a shared dry-run /
//! commit policy for selecting what to smelt. The host engine it was carved
//! out of supplies none of the behavior here; collaborators are plain traits.
//!
//! # Per-Tick Pipeline
//!
//! Each call to [`furnace::ProcessingUnit::advance`] performs, in order:
//!
//! 1. **Select** -- Find the first (input, output) pairing whose recipe result
//!    the output slot can accept. If none exists, cook progress resets to zero
//!    and the tick ends with no burn accounting.
//! 2. **Burn** -- Decrement the active fuel counter; when it hits zero, ignite
//!    a fresh unit from the fuel slot (leaving a container remainder such as
//!    an empty bucket, if the item has one).
//! 3. **Cook** -- Advance cook progress by one per burning contribution, or
//!    regress it by two per tick while no fuel is active, floored at zero.
//! 4. **Commit** -- When progress reaches [`furnace::COOK_COMPLETE_TICKS`],
//!    consume one unit from the selected input and merge the recipe result
//!    into the output slot.
//!
//! # Key Types
//!
//! - [`furnace::ProcessingUnit`] -- The four-slot smelt/burn state machine.
//! - [`registry::Registry`] -- Immutable item/recipe/fuel tables, frozen at
//!   startup, implementing the collaborator traits the unit consumes.
//! - [`host::FurnaceHost`] -- Thin adapter carrying world position, unit
//!   identity, and the access-distance policy.
//! - [`dirty::ChangeTracker`] -- Per-slot change flags the owner drains to
//!   schedule persistence write-back.
//! - [`snapshot`] -- Versioned binary snapshots via bitcode, keyed by item
//!   name so saves survive registry reordering.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic
//!   fraction reporting.

pub mod dirty;
pub mod fixed;
pub mod furnace;
pub mod host;
pub mod id;
pub mod item;
pub mod registry;
pub mod snapshot;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
