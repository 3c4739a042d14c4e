use core::fmt;

/// A ledger that cannot describe a legal game.
///
/// Every variant is fatal to the scoring pass; `index` fields point at the
/// ledger slot where the problem was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPinCombination {
    /// A single throw knocked down more pins than a rack holds.
    PinsOutOfRange { frame: u8, index: usize, pins: u8 },
    /// Two throws of one rack add up to more than ten.
    FrameOverflow {
        frame: u8,
        index: usize,
        first: u8,
        second: u8,
    },
    /// The tenth frame was left open but a third throw was recorded.
    IllegalThirdThrow { index: usize, pins: u8 },
    /// The two balls after a tenth-frame strike overflow the reset rack.
    BonusOverflow {
        index: usize,
        first_bonus: u8,
        second_bonus: u8,
    },
    /// A frame-padded ledger holds pins in the slot behind a strike.
    StrikePadding { frame: u8, index: usize, pins: u8 },
    /// A throw is recorded after an unset slot.
    GapInLedger { index: usize },
    /// A throw is recorded after the tenth frame is complete.
    ExtraThrow { index: usize, pins: u8 },
}

impl InvalidPinCombination {
    /// Ledger slot the error was raised at.
    pub const fn index(&self) -> usize {
        match *self {
            InvalidPinCombination::PinsOutOfRange { index, .. }
            | InvalidPinCombination::FrameOverflow { index, .. }
            | InvalidPinCombination::IllegalThirdThrow { index, .. }
            | InvalidPinCombination::BonusOverflow { index, .. }
            | InvalidPinCombination::StrikePadding { index, .. }
            | InvalidPinCombination::GapInLedger { index }
            | InvalidPinCombination::ExtraThrow { index, .. } => index,
        }
    }

    /// Short machine-friendly label, used in logs and reports.
    pub const fn reason(&self) -> &'static str {
        match self {
            InvalidPinCombination::PinsOutOfRange { .. } => "pins_out_of_range",
            InvalidPinCombination::FrameOverflow { .. } => "frame_overflow",
            InvalidPinCombination::IllegalThirdThrow { .. } => "illegal_third_throw",
            InvalidPinCombination::BonusOverflow { .. } => "bonus_overflow",
            InvalidPinCombination::StrikePadding { .. } => "strike_padding",
            InvalidPinCombination::GapInLedger { .. } => "gap_in_ledger",
            InvalidPinCombination::ExtraThrow { .. } => "extra_throw",
        }
    }
}

impl fmt::Display for InvalidPinCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPinCombination::PinsOutOfRange { frame, index, pins } => write!(
                f,
                "throw {index} in frame {frame} knocked down {pins} pins; a rack holds 10"
            ),
            InvalidPinCombination::FrameOverflow {
                frame,
                index,
                first,
                second,
            } => write!(
                f,
                "frame {frame} throws {first} + {second} exceed 10 pins (throw {index})"
            ),
            InvalidPinCombination::IllegalThirdThrow { index, pins } => write!(
                f,
                "third throw of {pins} at {index} after an open tenth frame"
            ),
            InvalidPinCombination::BonusOverflow {
                index,
                first_bonus,
                second_bonus,
            } => write!(
                f,
                "bonus throws {first_bonus} + {second_bonus} exceed 10 pins without a strike (throw {index})"
            ),
            InvalidPinCombination::StrikePadding { frame, index, pins } => write!(
                f,
                "frame {frame} is a strike but slot {index} holds {pins} pins"
            ),
            InvalidPinCombination::GapInLedger { index } => {
                write!(f, "throw {index} recorded after an unset slot")
            }
            InvalidPinCombination::ExtraThrow { index, pins } => {
                write!(f, "throw {index} ({pins} pins) recorded after the game ended")
            }
        }
    }
}

impl std::error::Error for InvalidPinCombination {}
