use crate::dirty::ChangeTracker;
use crate::furnace::ProcessingUnit;
use crate::id::UnitId;

/// Squared distance bound for interaction: 8 blocks from the block center.
pub const MAX_ACCESS_DISTANCE_SQ: f64 = 64.0;

/// An integer block position in the host world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The center point of this block cell.
    pub fn center(&self) -> Vec3 {
        Vec3 {
            x: f64::from(self.x) + 0.5,
            y: f64::from(self.y) + 0.5,
            z: f64::from(self.z) + 0.5,
        }
    }
}

/// A continuous position, used for actor locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_sq(&self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// The host world's view of unit placement. The access check asks it
/// whether a given grid cell still holds a given unit.
pub trait HostWorld {
    /// The unit currently occupying `pos`, if any.
    fn unit_id_at(&self, pos: BlockPos) -> Option<UnitId>;
}

/// A [`ProcessingUnit`] mounted at a fixed position in a host world.
///
/// The unit itself knows nothing about worlds or actors; this adapter owns
/// the placement identity and the interaction policy.
#[derive(Debug)]
pub struct FurnaceHost {
    unit_id: UnitId,
    pos: BlockPos,
    unit: ProcessingUnit,
}

impl FurnaceHost {
    pub fn new(unit_id: UnitId, pos: BlockPos) -> Self {
        Self {
            unit_id,
            pos,
            unit: ProcessingUnit::new(),
        }
    }

    /// Mount an existing unit (e.g. one restored from a snapshot).
    pub fn with_unit(unit_id: UnitId, pos: BlockPos, unit: ProcessingUnit) -> Self {
        Self { unit_id, pos, unit }
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn unit(&self) -> &ProcessingUnit {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut ProcessingUnit {
        &mut self.unit
    }

    /// Whether an actor at `actor` may interact with this unit: the world
    /// must still report this unit at its mounted position, and the actor
    /// must be within [`MAX_ACCESS_DISTANCE_SQ`] of the block center.
    pub fn is_accessible_from(&self, world: &impl HostWorld, actor: Vec3) -> bool {
        if world.unit_id_at(self.pos) != Some(self.unit_id) {
            return false;
        }
        actor.distance_sq(self.pos.center()) < MAX_ACCESS_DISTANCE_SQ
    }

    /// Drain the unit's pending change flags for write-back scheduling.
    /// Returns `None` when nothing changed since the last drain.
    pub fn take_changes(&mut self) -> Option<ChangeTracker> {
        if !self.unit.changes().is_dirty() {
            return None;
        }
        let changes = self.unit.changes().clone();
        self.unit.mark_clean();
        Some(changes)
    }
}
