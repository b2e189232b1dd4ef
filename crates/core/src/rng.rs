//! RNG module - piece randomizers
//!
//! The queue owns no generator of its own: every draw takes the session RNG, so
//! piece selection shares one deterministic stream with garbage, corruption and
//! attack rolls.
//!
//! - [`Randomizer::Uniform`]: each kind independently with probability 1/7 (default)
//! - [`Randomizer::Bag7`]: shuffled bags containing one of each kind

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::PieceKind;

/// Piece selection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag7,
}

impl Randomizer {
    /// Parse a randomizer name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "random" => Some(Randomizer::Uniform),
            "bag7" | "7bag" | "bag" => Some(Randomizer::Bag7),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::Bag7 => "bag7",
        }
    }
}

/// Piece generator state
#[derive(Debug, Clone)]
pub struct PieceQueue {
    randomizer: Randomizer,
    bag: [PieceKind; 7],
    /// Index into current bag; 7 forces a refill on the next bag draw
    bag_index: usize,
}

impl PieceQueue {
    pub fn new(randomizer: Randomizer) -> Self {
        Self {
            randomizer,
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Draw the next piece kind
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())],
            Randomizer::Bag7 => {
                if self.bag_index >= self.bag.len() {
                    self.bag = PieceKind::ALL;
                    self.bag.shuffle(rng);
                    self.bag_index = 0;
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    /// Pieces left in the current bag (always 0 for uniform draws)
    pub fn remaining_in_bag(&self) -> usize {
        match self.randomizer {
            Randomizer::Uniform => 0,
            Randomizer::Bag7 => self.bag.len() - self.bag_index,
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(Randomizer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut queue = PieceQueue::new(Randomizer::Bag7);
        let mut pieces: Vec<PieceKind> = (0..7).map(|_| queue.draw(&mut rng)).collect();
        pieces.sort_by_key(|k| k.code());
        assert_eq!(pieces, PieceKind::ALL.to_vec());
        assert_eq!(queue.remaining_in_bag(), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        for randomizer in [Randomizer::Uniform, Randomizer::Bag7] {
            let mut a = StdRng::seed_from_u64(42);
            let mut b = StdRng::seed_from_u64(42);
            let mut qa = PieceQueue::new(randomizer);
            let mut qb = PieceQueue::new(randomizer);
            for _ in 0..50 {
                assert_eq!(qa.draw(&mut a), qb.draw(&mut b));
            }
        }
    }

    #[test]
    fn test_uniform_covers_every_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue = PieceQueue::default();
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind = queue.draw(&mut rng);
            seen[(kind.code() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_randomizer_names() {
        assert_eq!(Randomizer::from_str("BAG7"), Some(Randomizer::Bag7));
        assert_eq!(Randomizer::from_str("uniform"), Some(Randomizer::Uniform));
        assert_eq!(Randomizer::from_str("srs"), None);
        assert_eq!(Randomizer::default().as_str(), "uniform");
    }
}
