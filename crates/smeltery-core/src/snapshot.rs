//! Persistence for [`ProcessingUnit`] state.
//!
//! Binary serialization via `bitcode` with a versioned header. Slots are
//! persisted by stable item name so saves survive registry reordering;
//! records that no longer resolve are dropped on restore rather than
//! failing the whole load.

use crate::fixed::Ticks;
use crate::furnace::{ProcessingUnit, SLOT_COUNT};
use crate::item::{ItemStack, SLOT_STACK_LIMIT};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a smeltery unit snapshot ("SMLT").
pub const SNAPSHOT_MAGIC: u32 = 0x534D_4C54;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotWriteError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

/// Errors that can occur while reading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotReadError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Snapshot header
// ---------------------------------------------------------------------------

/// Header prepended to every serialized snapshot. Enables format detection
/// and version checking before trusting the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Magic number for format detection.
    pub magic: u32,
    /// Format version for forward compatibility.
    pub version: u32,
}

impl SnapshotHeader {
    /// Create a header for the current format version.
    pub fn new() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
        }
    }

    /// Validate the header. Returns `Ok(())` if valid.
    pub fn validate(&self) -> Result<(), SnapshotReadError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(SnapshotReadError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(SnapshotReadError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(SnapshotReadError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read just the header from serialized data for version detection.
///
/// bitcode has no partial deserialization, so this decodes the full
/// snapshot and returns only the header.
pub fn read_snapshot_header(data: &[u8]) -> Result<SnapshotHeader, SnapshotReadError> {
    let snapshot: UnitSnapshot =
        bitcode::deserialize(data).map_err(|e| SnapshotReadError::Decode(e.to_string()))?;
    Ok(snapshot.header)
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// One occupied slot in the wire format. Empty slots are simply absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRecord {
    slot: u8,
    item: String,
    quantity: u32,
}

/// The serializable portion of a unit's state.
#[derive(Debug, Serialize, Deserialize)]
struct UnitSnapshot {
    header: SnapshotHeader,
    slots: Vec<SlotRecord>,
    #[serde(default)]
    current_fuel_burn_ticks: Ticks,
    #[serde(default)]
    fuel_burn_capacity_ticks: Ticks,
    #[serde(default)]
    cook_progress_ticks: Ticks,
}

// ---------------------------------------------------------------------------
// Snapshot / restore
// ---------------------------------------------------------------------------

/// Serialize a unit's persistent state to a binary blob.
///
/// Slots whose item kind has no registry entry are skipped; they cannot be
/// named stably and would never restore.
pub fn snapshot(unit: &ProcessingUnit, registry: &Registry) -> Result<Vec<u8>, SnapshotWriteError> {
    let mut slots = Vec::new();
    for index in 0..SLOT_COUNT {
        let Some(stack) = unit.slot(index) else {
            continue;
        };
        let Some(name) = registry.item_name(stack.kind) else {
            continue;
        };
        slots.push(SlotRecord {
            slot: index as u8,
            item: name.to_string(),
            quantity: stack.quantity,
        });
    }

    let snapshot = UnitSnapshot {
        header: SnapshotHeader::new(),
        slots,
        current_fuel_burn_ticks: unit.current_fuel_burn_ticks(),
        fuel_burn_capacity_ticks: unit.fuel_burn_capacity_ticks(),
        cook_progress_ticks: unit.cook_progress_ticks(),
    };

    bitcode::serialize(&snapshot).map_err(|e| SnapshotWriteError::Encode(e.to_string()))
}

/// Rebuild a unit from a binary blob.
///
/// Validates the header (magic, version) before trusting the payload.
/// Individual slot records that fail to resolve are silently discarded:
/// an out-of-range slot index, an item name unknown to this registry, or
/// a zero quantity. Quantities are clamped to the slot limit. The restored
/// unit reports no pending changes.
pub fn restore(data: &[u8], registry: &Registry) -> Result<ProcessingUnit, SnapshotReadError> {
    let snapshot: UnitSnapshot =
        bitcode::deserialize(data).map_err(|e| SnapshotReadError::Decode(e.to_string()))?;

    snapshot.header.validate()?;

    let mut unit = ProcessingUnit::new();
    for record in snapshot.slots {
        let index = record.slot as usize;
        if index >= SLOT_COUNT || record.quantity == 0 {
            continue;
        }
        let Some(kind) = registry.item_id(&record.item) else {
            continue;
        };
        let quantity = record.quantity.min(SLOT_STACK_LIMIT);
        unit.restore_slot(index, ItemStack::new(kind, quantity));
    }
    unit.restore_counters(
        snapshot.current_fuel_burn_ticks,
        snapshot.fuel_burn_capacity_ticks,
        snapshot.cook_progress_ticks,
    );

    Ok(unit)
}

// ===========================================================================
// Tests
// ===========================================================================
