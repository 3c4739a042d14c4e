#![deny(warnings)]
pub mod game;
pub mod model;
pub mod score;

pub use model::card::{FrameScore, ScoreCard};
pub use model::frame::FrameMark;
pub use model::layout::ThrowLayout;
pub use model::ledger::{LedgerError, ThrowLedger};
pub use score::{InvalidPinCombination, ScoreCalculator, score_throws};

/// Capacity of a [`ThrowLedger`]: ten frames of two balls plus one bonus ball.
pub const MAX_THROWS: usize = ThrowLedger::MAX_THROWS;

pub struct CrateInfo;

impl CrateInfo {
    pub const fn name() -> &'static str {
        "bowling-core"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::{CrateInfo, MAX_THROWS};

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(CrateInfo::name(), "bowling-core");
        assert!(!CrateInfo::version().is_empty());
        assert_eq!(MAX_THROWS, 21);
    }
}
