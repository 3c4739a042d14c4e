use crate::model::frame::FrameMark;
use crate::model::layout::FRAMES;
use serde::{Deserialize, Serialize};

/// One box of the scoresheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameScore {
    pub frame: u8,
    pub throws: Vec<u8>,
    /// `None` until the frame's first ball is recorded.
    pub mark: Option<FrameMark>,
    pub notation: String,
    /// `None` while a bonus ball this frame depends on is missing, and for
    /// every frame after such a frame.
    pub score: Option<u32>,
    pub running_total: Option<u32>,
}

impl FrameScore {
    pub fn unbowled(frame: u8) -> Self {
        Self {
            frame,
            throws: Vec::new(),
            mark: None,
            notation: String::new(),
            score: None,
            running_total: None,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// Per-frame scores and the total of every frame that could be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    frames: Vec<FrameScore>,
    final_score: u32,
    complete: bool,
}

impl ScoreCard {
    pub(crate) fn new(frames: Vec<FrameScore>, complete: bool) -> Self {
        debug_assert_eq!(frames.len(), FRAMES);
        let final_score = frames.iter().filter_map(|frame| frame.score).sum();
        Self {
            frames,
            final_score,
            complete,
        }
    }

    /// Always ten entries, frame 1 first.
    pub fn frames(&self) -> &[FrameScore] {
        &self.frames
    }

    /// Looks up a frame by its 1-based number.
    pub fn frame(&self, number: usize) -> Option<&FrameScore> {
        number.checked_sub(1).and_then(|index| self.frames.get(index))
    }

    pub fn frame_scores(&self) -> Vec<Option<u32>> {
        self.frames.iter().map(|frame| frame.score).collect()
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn scored_frames(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_scored()).count()
    }

    /// True once all ten frames, bonus balls included, have been bowled.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameScore, ScoreCard};
    use crate::model::frame::FrameMark;

    fn scored(frame: u8, score: u32, running: u32) -> FrameScore {
        FrameScore {
            frame,
            throws: vec![1, 1],
            mark: Some(FrameMark::Open),
            notation: "11".to_string(),
            score: Some(score),
            running_total: Some(running),
        }
    }

    #[test]
    fn final_score_sums_defined_frames() {
        let mut frames: Vec<FrameScore> = (1..=10).map(FrameScore::unbowled).collect();
        frames[0] = scored(1, 2, 2);
        frames[1] = scored(2, 2, 4);
        let card = ScoreCard::new(frames, false);
        assert_eq!(card.final_score(), 4);
        assert_eq!(card.scored_frames(), 2);
        assert!(!card.is_complete());
    }

    #[test]
    fn frame_lookup_is_one_based() {
        let frames: Vec<FrameScore> = (1..=10).map(FrameScore::unbowled).collect();
        let card = ScoreCard::new(frames, false);
        assert_eq!(card.frame(1).map(|f| f.frame), Some(1));
        assert_eq!(card.frame(10).map(|f| f.frame), Some(10));
        assert!(card.frame(0).is_none());
        assert!(card.frame(11).is_none());
    }
}
