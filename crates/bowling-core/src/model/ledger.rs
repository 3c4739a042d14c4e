use core::fmt;
use serde::{Deserialize, Serialize};

/// Raw pin counts recorded per throw slot, in the order they were bowled.
///
/// The ledger performs no legality checks on pin values; whether a throw is
/// legal depends on its neighbours and is decided by the score calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThrowLedger {
    slots: [Option<u8>; ThrowLedger::MAX_THROWS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    IndexOutOfRange { index: usize },
    TooManyThrows { count: usize },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::IndexOutOfRange { index } => write!(
                f,
                "throw index {index} is outside the ledger (capacity {})",
                ThrowLedger::MAX_THROWS
            ),
            LedgerError::TooManyThrows { count } => write!(
                f,
                "{count} throws do not fit in a ledger of {} slots",
                ThrowLedger::MAX_THROWS
            ),
        }
    }
}

impl std::error::Error for LedgerError {}

impl ThrowLedger {
    /// Ten frames of two throws plus one bonus throw in the tenth.
    pub const MAX_THROWS: usize = 21;

    pub const fn new() -> Self {
        Self {
            slots: [None; Self::MAX_THROWS],
        }
    }

    /// Builds a ledger with `throws` recorded from slot 0 onwards.
    pub fn from_throws(throws: &[u8]) -> Result<Self, LedgerError> {
        if throws.len() > Self::MAX_THROWS {
            return Err(LedgerError::TooManyThrows {
                count: throws.len(),
            });
        }
        let mut ledger = Self::new();
        for (index, &pins) in throws.iter().enumerate() {
            ledger.slots[index] = Some(pins);
        }
        Ok(ledger)
    }

    pub fn set_throw(&mut self, index: usize, pins: u8) -> Result<(), LedgerError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index })?;
        *slot = Some(pins);
        Ok(())
    }

    /// Unsets a slot, returning what it held.
    pub fn clear_throw(&mut self, index: usize) -> Result<Option<u8>, LedgerError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index })?;
        Ok(slot.take())
    }

    pub fn throw(&self, index: usize) -> Option<u8> {
        self.slots.get(index).copied().flatten()
    }

    /// Number of slots that hold a value.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<u8>; Self::MAX_THROWS] {
        &self.slots
    }

    /// Recorded throws as `(index, pins)` in slot order.
    pub fn recorded(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|pins| (index, pins)))
    }
}

impl Default for ThrowLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{LedgerError, ThrowLedger};

    #[test]
    fn new_ledger_is_empty() {
        let ledger = ThrowLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.throw(0), None);
    }

    #[test]
    fn set_throw_stores_pins_without_range_checks() {
        let mut ledger = ThrowLedger::new();
        ledger.set_throw(0, 6).unwrap();
        ledger.set_throw(4, 23).unwrap();
        assert_eq!(ledger.throw(0), Some(6));
        assert_eq!(ledger.throw(4), Some(23));
        assert_eq!(ledger.throw(1), None);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn set_throw_overwrites_existing_slot() {
        let mut ledger = ThrowLedger::new();
        ledger.set_throw(3, 4).unwrap();
        ledger.set_throw(3, 7).unwrap();
        assert_eq!(ledger.throw(3), Some(7));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn set_throw_beyond_capacity_is_rejected() {
        let mut ledger = ThrowLedger::new();
        assert!(ledger.set_throw(ThrowLedger::MAX_THROWS - 1, 10).is_ok());
        assert_eq!(
            ledger.set_throw(ThrowLedger::MAX_THROWS, 10),
            Err(LedgerError::IndexOutOfRange { index: 21 })
        );
        assert_eq!(ledger.throw(ThrowLedger::MAX_THROWS), None);
    }

    #[test]
    fn clear_throw_returns_previous_value() {
        let mut ledger = ThrowLedger::from_throws(&[3, 4]).unwrap();
        assert_eq!(ledger.clear_throw(1), Ok(Some(4)));
        assert_eq!(ledger.clear_throw(1), Ok(None));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn from_throws_rejects_oversized_input() {
        let throws = [1u8; ThrowLedger::MAX_THROWS + 1];
        assert_eq!(
            ThrowLedger::from_throws(&throws),
            Err(LedgerError::TooManyThrows { count: 22 })
        );
    }

    #[test]
    fn recorded_skips_unset_slots() {
        let mut ledger = ThrowLedger::new();
        ledger.set_throw(2, 5).unwrap();
        ledger.set_throw(0, 1).unwrap();
        let recorded: Vec<_> = ledger.recorded().collect();
        assert_eq!(recorded, vec![(0, 1), (2, 5)]);
    }
}
