use bowling_core::model::frame::FrameMark;
use bowling_core::model::layout::ThrowLayout;
use bowling_core::model::ledger::ThrowLedger;
use bowling_core::score::{InvalidPinCombination, ScoreCalculator};

fn ledger_from(throws: &[u8]) -> ThrowLedger {
    let mut ledger = ThrowLedger::new();
    for (index, &pins) in throws.iter().enumerate() {
        ledger.set_throw(index, pins).expect("index within ledger");
    }
    ledger
}

fn final_score(layout: ThrowLayout, throws: &[u8]) -> u32 {
    ScoreCalculator::with_layout(layout)
        .compute_score_card(&ledger_from(throws))
        .expect("legal game")
        .final_score()
}

fn rejection(layout: ThrowLayout, throws: &[u8]) -> InvalidPinCombination {
    ScoreCalculator::with_layout(layout)
        .compute_score_card(&ledger_from(throws))
        .expect_err("illegal game")
}

fn front_nine_of_fives() -> Vec<u8> {
    [5, 0].repeat(9)
}

#[test]
fn single_throw_is_scored() {
    for layout in ThrowLayout::ALL {
        assert_eq!(final_score(layout, &[6]), 6);
    }
}

#[test]
fn open_frames_sum_their_pins() {
    for layout in ThrowLayout::ALL {
        assert_eq!(final_score(layout, &[6, 3]), 9);
        assert_eq!(final_score(layout, &[2; 20]), 2 * 2 * 10);
    }
}

#[test]
fn spares_take_the_next_ball() {
    for layout in ThrowLayout::ALL {
        assert_eq!(final_score(layout, &[5, 5, 1]), (5 + 5 + 1) + 1);
        assert_eq!(
            final_score(layout, &[5, 5, 5, 5, 1, 2]),
            (5 + 5 + 5) + (5 + 5 + 1) + (1 + 2)
        );
        assert_eq!(
            final_score(layout, &[5; ThrowLedger::MAX_THROWS]),
            (5 + 5 + 5) * 9 + (5 + 5 + 5)
        );
    }
}

#[test]
fn repeated_spares_score_190() {
    let mut throws = [9, 1].repeat(10);
    throws.push(9);
    for layout in ThrowLayout::ALL {
        assert_eq!(final_score(layout, &throws), 190);
    }
}

#[test]
fn sequential_strikes_take_the_next_two_balls() {
    let layout = ThrowLayout::Sequential;
    assert_eq!(final_score(layout, &[10, 1, 2]), (10 + 1 + 2) + (1 + 2));
    assert_eq!(
        final_score(layout, &[10, 10, 1, 2]),
        (10 + 10 + 1) + (10 + 1 + 2) + (1 + 2)
    );
    assert_eq!(final_score(layout, &[10; 12]), 300);
}

#[test]
fn padded_strikes_skip_their_empty_slot() {
    let layout = ThrowLayout::FramePadded;
    assert_eq!(final_score(layout, &[10, 0, 1, 2]), (10 + 1 + 2) + (1 + 2));
    assert_eq!(
        final_score(layout, &[10, 0, 10, 0, 1, 2]),
        (10 + 10 + 1) + (10 + 1 + 2) + (1 + 2)
    );
}

#[test]
fn padded_alternating_strikes_and_spares_score_170() {
    let throws = [
        10, 0, 5, 5, 10, 0, 5, 5, 10, 0, 5, 5, 10, 0, 5, 5, 10, 0, 0, 0,
    ];
    assert_eq!(final_score(ThrowLayout::FramePadded, &throws), 170);
}

#[test]
fn padded_perfect_game_scores_300() {
    let throws = [
        10, 0, 10, 0, 10, 0, 10, 0, 10, 0, 10, 0, 10, 0, 10, 0, 10, 0, 10, 10, 10,
    ];
    let card = ScoreCalculator::with_layout(ThrowLayout::FramePadded)
        .compute_score_card(&ledger_from(&throws))
        .expect("perfect game");
    assert_eq!(card.final_score(), 300);
    assert!(card.is_complete());
    assert!(
        card.frames()
            .iter()
            .all(|frame| frame.score == Some(30) && frame.mark == Some(FrameMark::Strike))
    );
}

#[test]
fn final_frame_second_ball_cannot_overflow_rack() {
    let mut throws = front_nine_of_fives();
    throws.extend([5, 10]);
    for layout in ThrowLayout::ALL {
        assert!(matches!(
            rejection(layout, &throws),
            InvalidPinCombination::FrameOverflow { frame: 10, .. }
        ));
    }
}

#[test]
fn final_frame_rejects_third_ball_after_open_frame() {
    let mut throws = front_nine_of_fives();
    throws.extend([5, 3, 3]);
    for layout in ThrowLayout::ALL {
        assert!(matches!(
            rejection(layout, &throws),
            InvalidPinCombination::IllegalThirdThrow { index: 20, .. }
        ));
    }
}

#[test]
fn final_frame_bonus_balls_share_a_rack() {
    let mut throws = front_nine_of_fives();
    throws.extend([10, 3, 10]);
    for layout in ThrowLayout::ALL {
        assert!(matches!(
            rejection(layout, &throws),
            InvalidPinCombination::BonusOverflow { .. }
        ));
    }
}

#[test]
fn final_frame_rejects_impossible_pin_totals() {
    let mut throws = front_nine_of_fives();
    throws.extend([16, 23, 5]);
    for layout in ThrowLayout::ALL {
        assert!(matches!(
            rejection(layout, &throws),
            InvalidPinCombination::PinsOutOfRange { pins: 16, .. }
        ));
    }
}

#[test]
fn padded_strike_slot_must_stay_empty() {
    assert!(matches!(
        rejection(ThrowLayout::FramePadded, &[10, 4, 3, 3]),
        InvalidPinCombination::StrikePadding { frame: 1, .. }
    ));
}

#[test]
fn ledger_is_untouched_by_scoring() {
    let ledger = ledger_from(&[3, 7, 10, 10, 2]);
    let snapshot = ledger;
    let calculator = ScoreCalculator::new();
    let first = calculator.compute_score_card(&ledger).expect("legal");
    let second = calculator.compute_score_card(&ledger).expect("legal");
    assert_eq!(ledger, snapshot);
    assert_eq!(first, second);
}

#[test]
fn score_card_serializes_frame_marks() {
    let card = ScoreCalculator::new()
        .compute_score_card(&ledger_from(&[10, 7, 3, 4]))
        .expect("legal");
    let json = serde_json::to_string(&card).expect("card serializes");
    assert!(json.contains("\"mark\":\"strike\""));
    assert!(json.contains("\"mark\":\"spare\""));
    assert!(json.contains("\"final_score\":38"));
}
