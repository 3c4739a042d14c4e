use crate::model::ledger::ThrowLedger;
use crate::score::error::InvalidPinCombination;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub const PINS: u8 = 10;
pub const FRAMES: usize = 10;

/// First slot of the tenth frame when every earlier frame owns two slots.
const PADDED_FINAL_FRAME_SLOT: usize = 2 * (FRAMES - 1);

/// How ledger slots map onto the balls actually rolled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowLayout {
    /// One slot per ball; a strike consumes a single slot.
    #[default]
    Sequential,
    /// Frames 1-9 own two slots each and a strike leaves its second slot
    /// unset or zero. The tenth frame owns slots 18, 19 and 20.
    FramePadded,
}

/// A ball that knocked down `pins`, recorded at ledger slot `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    pub slot: usize,
    pub pins: u8,
}

impl ThrowLayout {
    pub const ALL: [ThrowLayout; 2] = [ThrowLayout::Sequential, ThrowLayout::FramePadded];

    pub const fn as_str(self) -> &'static str {
        match self {
            ThrowLayout::Sequential => "sequential",
            ThrowLayout::FramePadded => "frame_padded",
        }
    }

    /// Flattens the recorded slots into the balls rolled, in order.
    ///
    /// Rolls must form a contiguous run from slot 0; a value recorded after
    /// an unset slot is rejected. Pin values are not range checked here.
    pub fn rolls(self, ledger: &ThrowLedger) -> Result<Vec<Roll>, InvalidPinCombination> {
        let slots = ledger.slots();
        match self {
            ThrowLayout::Sequential => contiguous_rolls(slots, 0, slots.len()),
            ThrowLayout::FramePadded => padded_rolls(slots),
        }
    }
}

impl fmt::Display for ThrowLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThrowLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "rolls" => Ok(ThrowLayout::Sequential),
            "frame_padded" | "padded" | "frames" => Ok(ThrowLayout::FramePadded),
            other => Err(format!("unknown throw layout '{other}'")),
        }
    }
}

fn contiguous_rolls(
    slots: &[Option<u8>],
    start: usize,
    end: usize,
) -> Result<Vec<Roll>, InvalidPinCombination> {
    let mut rolls = Vec::with_capacity(end - start);
    for slot in start..end {
        match slots[slot] {
            Some(pins) => rolls.push(Roll { slot, pins }),
            None => {
                reject_gap(slots, slot)?;
                break;
            }
        }
    }
    Ok(rolls)
}

fn padded_rolls(slots: &[Option<u8>]) -> Result<Vec<Roll>, InvalidPinCombination> {
    let mut rolls = Vec::with_capacity(slots.len());

    for frame in 0..FRAMES - 1 {
        let first_slot = 2 * frame;
        let second_slot = first_slot + 1;

        let Some(first) = slots[first_slot] else {
            reject_gap(slots, first_slot)?;
            return Ok(rolls);
        };
        rolls.push(Roll {
            slot: first_slot,
            pins: first,
        });

        match slots[second_slot] {
            Some(pins) if first == PINS && pins != 0 => {
                return Err(InvalidPinCombination::StrikePadding {
                    frame: frame as u8 + 1,
                    index: second_slot,
                    pins,
                });
            }
            Some(_) | None if first == PINS => {}
            Some(pins) => rolls.push(Roll {
                slot: second_slot,
                pins,
            }),
            None => {
                reject_gap(slots, second_slot)?;
                return Ok(rolls);
            }
        }
    }

    rolls.extend(contiguous_rolls(
        slots,
        PADDED_FINAL_FRAME_SLOT,
        slots.len(),
    )?);
    Ok(rolls)
}

/// Fails if any slot at or after `from` holds a value.
fn reject_gap(slots: &[Option<u8>], from: usize) -> Result<(), InvalidPinCombination> {
    match (from..slots.len()).find(|&index| slots[index].is_some()) {
        Some(index) => Err(InvalidPinCombination::GapInLedger { index }),
        None => Ok(()),
    }
}
