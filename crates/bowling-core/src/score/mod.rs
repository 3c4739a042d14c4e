pub mod calculator;
pub mod error;

pub use calculator::{ScoreCalculator, score_throws};
pub use error::InvalidPinCombination;
