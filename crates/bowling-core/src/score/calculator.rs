use crate::model::card::{FrameScore, ScoreCard};
use crate::model::frame::{Frame, FrameMark};
use crate::model::layout::{FRAMES, PINS, Roll, ThrowLayout};
use crate::model::ledger::ThrowLedger;
use crate::score::error::InvalidPinCombination;
use tracing::{Level, event};

/// Turns a ledger into a score card.
///
/// Holds no state between calls: the same ledger always yields the same card
/// or the same error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreCalculator {
    layout: ThrowLayout,
}

impl ScoreCalculator {
    pub const fn new() -> Self {
        Self {
            layout: ThrowLayout::Sequential,
        }
    }

    pub const fn with_layout(layout: ThrowLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> ThrowLayout {
        self.layout
    }

    pub fn compute_score_card(
        &self,
        ledger: &ThrowLedger,
    ) -> Result<ScoreCard, InvalidPinCombination> {
        let outcome = self.layout.rolls(ledger).and_then(|rolls| score_rolls(&rolls));
        match &outcome {
            Ok(card) => log_score_card(self.layout, ledger, card),
            Err(err) => log_rejection(self.layout, ledger, err),
        }
        outcome
    }
}

/// Scores balls given in the order they were rolled, one value per ball.
pub fn score_throws(throws: &[u8]) -> Result<ScoreCard, InvalidPinCombination> {
    let rolls: Vec<Roll> = throws
        .iter()
        .enumerate()
        .map(|(slot, &pins)| Roll { slot, pins })
        .collect();
    score_rolls(&rolls)
}

pub(crate) fn score_rolls(rolls: &[Roll]) -> Result<ScoreCard, InvalidPinCombination> {
    let frames = segment(rolls)?;
    let complete = frames.len() == FRAMES && frames.last().is_some_and(Frame::is_finished);

    let mut scores = Vec::with_capacity(FRAMES);
    let mut running: Option<u32> = Some(0);
    for frame in &frames {
        let score = running.and(frame_score(frame, rolls));
        running = running.zip(score).map(|(total, value)| total + value);
        scores.push(FrameScore {
            frame: frame.number(),
            throws: frame.pins(),
            mark: Some(frame.mark()),
            notation: frame.notation(),
            score,
            running_total: running,
        });
    }
    for number in frames.len() + 1..=FRAMES {
        scores.push(FrameScore::unbowled(number as u8));
    }

    Ok(ScoreCard::new(scores, complete))
}

/// Cuts the rolls into frames, validating each rack as it goes.
fn segment(rolls: &[Roll]) -> Result<Vec<Frame>, InvalidPinCombination> {
    let mut frames = Vec::with_capacity(FRAMES);
    let mut cursor = 0;

    for number in 1..=FRAMES as u8 {
        if cursor >= rolls.len() {
            return Ok(frames);
        }
        let end = if usize::from(number) < FRAMES {
            regular_frame_end(rolls, cursor, number)?
        } else {
            final_frame_end(rolls, cursor)?
        };
        frames.push(Frame::new(number, rolls, cursor, end));
        cursor = end;
    }

    if let Some(extra) = rolls.get(cursor) {
        return Err(InvalidPinCombination::ExtraThrow {
            index: extra.slot,
            pins: extra.pins,
        });
    }
    Ok(frames)
}

fn regular_frame_end(
    rolls: &[Roll],
    start: usize,
    number: u8,
) -> Result<usize, InvalidPinCombination> {
    let first = checked(rolls[start], number)?;
    if first.pins == PINS {
        return Ok(start + 1);
    }
    let Some(&second) = rolls.get(start + 1) else {
        return Ok(start + 1);
    };
    let second = checked(second, number)?;
    within_rack(first, second, number)?;
    Ok(start + 2)
}

fn final_frame_end(rolls: &[Roll], start: usize) -> Result<usize, InvalidPinCombination> {
    let number = FRAMES as u8;
    let first = checked(rolls[start], number)?;
    let Some(&second) = rolls.get(start + 1) else {
        return Ok(start + 1);
    };
    let second = checked(second, number)?;
    let third = rolls.get(start + 2).copied();

    if first.pins == PINS {
        // The rack resets after the strike; it only resets again if the
        // first bonus ball is a strike too.
        let Some(third) = third else {
            return Ok(start + 2);
        };
        let third = checked(third, number)?;
        if second.pins < PINS && second.pins + third.pins > PINS {
            return Err(InvalidPinCombination::BonusOverflow {
                index: third.slot,
                first_bonus: second.pins,
                second_bonus: third.pins,
            });
        }
        return Ok(start + 3);
    }

    within_rack(first, second, number)?;
    match third {
        Some(third) if first.pins + second.pins < PINS => {
            Err(InvalidPinCombination::IllegalThirdThrow {
                index: third.slot,
                pins: third.pins,
            })
        }
        Some(third) => {
            checked(third, number)?;
            Ok(start + 3)
        }
        None => Ok(start + 2),
    }
}

fn checked(roll: Roll, frame: u8) -> Result<Roll, InvalidPinCombination> {
    if roll.pins > PINS {
        return Err(InvalidPinCombination::PinsOutOfRange {
            frame,
            index: roll.slot,
            pins: roll.pins,
        });
    }
    Ok(roll)
}

fn within_rack(first: Roll, second: Roll, frame: u8) -> Result<(), InvalidPinCombination> {
    if first.pins + second.pins > PINS {
        return Err(InvalidPinCombination::FrameOverflow {
            frame,
            index: second.slot,
            first: first.pins,
            second: second.pins,
        });
    }
    Ok(())
}

/// A frame's score, or `None` while a ball it depends on is missing.
fn frame_score(frame: &Frame, rolls: &[Roll]) -> Option<u32> {
    let mark = frame.mark();
    if frame.is_final() {
        return match mark {
            FrameMark::Strike | FrameMark::Spare if !frame.is_finished() => None,
            _ => Some(frame.knocked_down()),
        };
    }

    let start = frame.next_roll();
    let bonus = rolls.get(start..start + mark.bonus_throws())?;
    Some(frame.knocked_down() + bonus.iter().map(|roll| u32::from(roll.pins)).sum::<u32>())
}

fn log_score_card(layout: ThrowLayout, ledger: &ThrowLedger, card: &ScoreCard) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    event!(
        target: "bowling_core::score",
        Level::DEBUG,
        layout = %layout,
        throws = ledger.len(),
        scored_frames = card.scored_frames(),
        final_score = card.final_score(),
        complete = card.is_complete(),
    );
}

fn log_rejection(layout: ThrowLayout, ledger: &ThrowLedger, err: &InvalidPinCombination) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    event!(
        target: "bowling_core::score",
        Level::DEBUG,
        layout = %layout,
        throws = ledger.len(),
        reason = err.reason(),
        index = err.index(),
        message = %err,
    );
}
