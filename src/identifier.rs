//! 16-bit tagged handle assigned to every `Room` and `Aisle`.
//!
//! Top 2 bits encode [`Kind`], the low 14 bits a monotonically increasing
//! counter. The counter is process-wide; tests and multi-generator
//! embedders that need isolated counters should call [`reset_counter`]
//! between runs.

use std::sync::atomic::{AtomicU16, Ordering};

static COUNTER: AtomicU16 = AtomicU16::new(0);

const BIT_COUNT: u16 = 2;
const SHIFT: u16 = 16 - BIT_COUNT;
const MASK_COUNTER: u16 = u16::MAX >> BIT_COUNT;

/// Reset the shared identifier counter. Intended for test isolation and for
/// embedders that run multiple generators sequentially in one process and
/// want each run's identifiers to start back at zero.
pub fn reset_counter() {
    COUNTER.store(0, Ordering::SeqCst);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Kind {
    Unknown = 0,
    Room = 1,
    Aisle = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Identifier(u16);

/// Sentinel used by voxel cells that own no room or aisle.
pub const INVALID: u16 = 0xFFFF;

impl Identifier {
    pub fn unknown() -> Self {
        Self(0)
    }

    pub fn new(kind: Kind) -> Self {
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst) & MASK_COUNTER;
        Self(((kind as u16) << SHIFT) | counter)
    }

    pub fn kind(self) -> Kind {
        match self.0 >> SHIFT {
            1 => Kind::Room,
            2 => Kind::Aisle,
            _ => Kind::Unknown,
        }
    }

    pub fn is_kind(self, kind: Kind) -> bool {
        self.kind() == kind
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl From<Identifier> for u16 {
    fn from(id: Identifier) -> u16 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The counter is process-global; serialize tests that depend on its value.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn encodes_kind_in_top_bits() {
        let _guard = TEST_LOCK.lock().unwrap();
        reset_counter();
        let room = Identifier::new(Kind::Room);
        let aisle = Identifier::new(Kind::Aisle);
        assert_eq!(room.kind(), Kind::Room);
        assert_eq!(aisle.kind(), Kind::Aisle);
        assert_ne!(room.get(), aisle.get());
    }

    #[test]
    fn counter_increases_monotonically() {
        let _guard = TEST_LOCK.lock().unwrap();
        reset_counter();
        let a = Identifier::new(Kind::Room);
        let b = Identifier::new(Kind::Room);
        assert!((a.get() & MASK_COUNTER) < (b.get() & MASK_COUNTER));
    }
}
