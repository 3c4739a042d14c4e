use crate::model::layout::{FRAMES, PINS, Roll};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameMark {
    Strike,
    Spare,
    Open,
    /// Only the first ball of the rack has been recorded.
    InProgress,
}

impl FrameMark {
    /// Balls after the frame that count towards its score.
    pub const fn bonus_throws(self) -> usize {
        match self {
            FrameMark::Strike => 2,
            FrameMark::Spare => 1,
            FrameMark::Open | FrameMark::InProgress => 0,
        }
    }
}

/// One frame's balls, cut out of the roll sequence during scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    number: u8,
    rolls: Vec<Roll>,
    next: usize,
}

impl Frame {
    pub(crate) fn new(number: u8, rolls: &[Roll], start: usize, end: usize) -> Self {
        Self {
            number,
            rolls: rolls[start..end].to_vec(),
            next: end,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn is_final(&self) -> bool {
        usize::from(self.number) == FRAMES
    }

    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    pub fn pins(&self) -> Vec<u8> {
        self.rolls.iter().map(|roll| roll.pins).collect()
    }

    /// Position in the roll sequence of the first ball after this frame.
    pub fn next_roll(&self) -> usize {
        self.next
    }

    pub fn knocked_down(&self) -> u32 {
        self.rolls.iter().map(|roll| u32::from(roll.pins)).sum()
    }

    pub fn mark(&self) -> FrameMark {
        match self.rolls.as_slice() {
            [first, ..] if first.pins == PINS => FrameMark::Strike,
            [first, second, ..] if first.pins.checked_add(second.pins) == Some(PINS) => {
                FrameMark::Spare
            }
            [_, _, ..] => FrameMark::Open,
            _ => FrameMark::InProgress,
        }
    }

    /// Whether no further ball can be added to this frame.
    pub fn is_finished(&self) -> bool {
        let mark = self.mark();
        if self.is_final() {
            match mark {
                FrameMark::Strike | FrameMark::Spare => self.rolls.len() == 3,
                FrameMark::Open => true,
                FrameMark::InProgress => false,
            }
        } else {
            mark != FrameMark::InProgress
        }
    }

    /// Scoresheet notation: `X` strike, `/` spare, `-` gutter.
    pub fn notation(&self) -> String {
        let mut standing = PINS;
        let mut fresh_rack = true;
        let mut out = String::with_capacity(3);
        for roll in &self.rolls {
            let symbol = match roll.pins {
                pins if pins == standing && fresh_rack => 'X',
                pins if pins == standing => '/',
                0 => '-',
                pins => char::from_digit(u32::from(pins), 10).unwrap_or('?'),
            };
            out.push(symbol);
            standing = standing.saturating_sub(roll.pins);
            fresh_rack = standing == 0;
            if fresh_rack {
                standing = PINS;
            }
        }
        out
    }
}
