use crate::model::layout::{FRAMES, PINS, ThrowLayout};
use crate::model::ledger::{LedgerError, ThrowLedger};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_CLEAR_RATE: f64 = 0.3;

/// Seeded source of legal games, rolled ball by ball.
#[derive(Debug, Clone)]
pub struct GameGenerator {
    rng: StdRng,
    seed: u64,
    clear_rate: f64,
}

impl GameGenerator {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            clear_rate: DEFAULT_CLEAR_RATE,
        }
    }

    /// Chance that a ball knocks down every pin still standing.
    pub fn with_clear_rate(mut self, rate: f64) -> Self {
        self.clear_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A finished game, one value per ball.
    pub fn complete_game(&mut self) -> Vec<u8> {
        let mut rolls = Vec::with_capacity(ThrowLedger::MAX_THROWS);
        for _ in 0..FRAMES - 1 {
            let first = self.ball(PINS);
            rolls.push(first);
            if first < PINS {
                rolls.push(self.ball(PINS - first));
            }
        }

        let first = self.ball(PINS);
        let second = self.ball(if first == PINS { PINS } else { PINS - first });
        rolls.extend([first, second]);
        if first == PINS {
            rolls.push(self.ball(if second == PINS { PINS } else { PINS - second }));
        } else if first + second == PINS {
            rolls.push(self.ball(PINS));
        }
        rolls
    }

    /// A legal game cut off after a random number of balls.
    pub fn partial_game(&mut self) -> Vec<u8> {
        let mut rolls = self.complete_game();
        let keep = self.rng.gen_range(0..=rolls.len());
        rolls.truncate(keep);
        rolls
    }

    /// A finished game recorded in `layout`.
    pub fn ledger(&mut self, layout: ThrowLayout) -> Result<ThrowLedger, LedgerError> {
        let rolls = self.complete_game();
        ThrowLedger::from_throws(&arrange(&rolls, layout))
    }

    fn ball(&mut self, standing: u8) -> u8 {
        if standing == 0 {
            return 0;
        }
        if self.rng.gen_bool(self.clear_rate) {
            standing
        } else {
            self.rng.gen_range(0..=standing)
        }
    }
}

impl Default for GameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays balls out in ledger order for `layout`.
///
/// Frame-padded ledgers get a zero after every strike in frames 1-9.
pub fn arrange(rolls: &[u8], layout: ThrowLayout) -> Vec<u8> {
    if layout == ThrowLayout::Sequential {
        return rolls.to_vec();
    }

    let mut slots = Vec::with_capacity(ThrowLedger::MAX_THROWS);
    let mut cursor = 0;
    for _ in 0..FRAMES - 1 {
        let Some(&first) = rolls.get(cursor) else {
            return slots;
        };
        slots.push(first);
        cursor += 1;
        if first == PINS {
            slots.push(0);
        } else if let Some(&second) = rolls.get(cursor) {
            slots.push(second);
            cursor += 1;
        }
    }
    slots.extend_from_slice(rolls.get(cursor..).unwrap_or_default());
    slots
}

#[cfg(test)]
mod tests {
    use super::{GameGenerator, arrange};
    use crate::model::layout::ThrowLayout;

    #[test]
    fn same_seed_rolls_same_game() {
        let mut a = GameGenerator::with_seed(7);
        let mut b = GameGenerator::with_seed(7);
        assert_eq!(a.complete_game(), b.complete_game());
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn clear_rate_one_rolls_perfect_game() {
        let mut generator = GameGenerator::with_seed(1).with_clear_rate(1.0);
        assert_eq!(generator.complete_game(), vec![10; 12]);
    }

    #[test]
    fn clear_rate_zero_never_exceeds_capacity() {
        let mut generator = GameGenerator::with_seed(3).with_clear_rate(0.0);
        for _ in 0..200 {
            assert!(generator.complete_game().len() <= 21);
        }
    }

    #[test]
    fn arrange_pads_strikes_before_tenth_frame() {
        let rolls = [10, 3, 4, 10];
        assert_eq!(
            arrange(&rolls, ThrowLayout::FramePadded),
            vec![10, 0, 3, 4, 10, 0]
        );
        assert_eq!(arrange(&rolls, ThrowLayout::Sequential), rolls.to_vec());

        let perfect = [10u8; 12];
        let padded = arrange(&perfect, ThrowLayout::FramePadded);
        assert_eq!(padded.len(), 21);
        assert_eq!(&padded[18..], &[10, 10, 10]);
    }
}
