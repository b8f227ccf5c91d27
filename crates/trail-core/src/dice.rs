//! A six-sided die paired with a weighted direction coin.

use crate::movement::Direction;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Faces on the die
pub const DIE_FACES: u8 = 6;

/// One throw: how far and which way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub value: u8,
    pub direction: Direction,
}

impl DiceRoll {
    pub fn new(value: u8, direction: Direction) -> Self {
        Self { value, direction }
    }

    pub fn forward(value: u8) -> Self {
        Self::new(value, Direction::Forward)
    }

    pub fn backward(value: u8) -> Self {
        Self::new(value, Direction::Backward)
    }
}

/// The die. Randomness is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dice {
    forward_probability: f64,
    last_roll: Option<DiceRoll>,
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Dice {
    /// A die that moves forward with the given probability (clamped to [0, 1])
    pub fn new(forward_probability: f64) -> Self {
        let forward_probability = if forward_probability.is_nan() {
            1.0
        } else {
            forward_probability.clamp(0.0, 1.0)
        };
        Self {
            forward_probability,
            last_roll: None,
        }
    }

    pub fn forward_probability(&self) -> f64 {
        self.forward_probability
    }

    /// Roll 1-6, then flip the direction coin
    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> DiceRoll {
        let value = rng.gen_range(1..=DIE_FACES);
        let direction = if rng.gen_bool(self.forward_probability) {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let roll = DiceRoll { value, direction };
        self.last_roll = Some(roll);
        roll
    }

    /// Record a roll made elsewhere, e.g. by a physical die
    pub fn record(&mut self, roll: DiceRoll) {
        self.last_roll = Some(roll);
    }

    pub fn last_roll(&self) -> Option<DiceRoll> {
        self.last_roll
    }
}
