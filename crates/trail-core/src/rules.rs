//! Tunable game rules.
//!
//! The defaults reproduce the classic trail game: dice always move forward,
//! landing on a positive multiple of 5 grants another turn, and the last
//! 9 cells before the terminal require an exact roll.

use crate::board::{CellId, MAX_TRAVERSAL};
use crate::dice::DIE_FACES;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default reach of the exact-landing rule
pub const DEFAULT_EXACT_LANDING_WINDOW: u32 = 10;

/// Invalid rule configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Forward probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("Reward {what} range {lo}..{hi} is empty")]
    EmptyRange { what: &'static str, lo: u32, hi: u32 },

    #[error("Bonus turn interval must be positive")]
    ZeroInterval,

    #[error("Path length bound must exceed the largest die face and stay within the traversal limit, got {0}")]
    InvalidPathBound(usize),

    #[error("Invalid configuration: {0}")]
    Parse(String),
}

/// How rewards are scattered over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Half-open range for the number of rewarded cells
    pub count_range: (u32, u32),
    /// Half-open range for the points on each rewarded cell
    pub points_range: (u32, u32),
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            count_range: (10, 16),
            points_range: (1, 11),
        }
    }
}

impl RewardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (lo, hi) = self.count_range;
        if lo >= hi {
            return Err(ConfigError::EmptyRange { what: "count", lo, hi });
        }
        let (lo, hi) = self.points_range;
        if lo >= hi {
            return Err(ConfigError::EmptyRange { what: "points", lo, hi });
        }
        Ok(())
    }
}

/// When a player earns another turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BonusTurnPolicy {
    /// Landing on a positive multiple of 5, except the listed cells
    LandingCell { excluded: Vec<CellId> },
    /// Every `every`-th completed move of the player
    MoveCount { every: u32 },
    /// Never
    Disabled,
}

impl Default for BonusTurnPolicy {
    fn default() -> Self {
        BonusTurnPolicy::LandingCell {
            excluded: Vec::new(),
        }
    }
}

impl BonusTurnPolicy {
    /// Decide whether `player`, having just landed on `landing`, acts again.
    ///
    /// `player.total_moves` must already include the move just made.
    pub fn grants_bonus(&self, landing: CellId, player: &Player) -> bool {
        match self {
            BonusTurnPolicy::LandingCell { excluded } => {
                landing > 0 && landing % 5 == 0 && !excluded.contains(&landing)
            }
            BonusTurnPolicy::MoveCount { every } => {
                *every > 0 && player.total_moves > 0 && player.total_moves % every == 0
            }
            BonusTurnPolicy::Disabled => false,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            BonusTurnPolicy::MoveCount { every: 0 } => Err(ConfigError::ZeroInterval),
            _ => Ok(()),
        }
    }
}

/// Every rule a session can be tuned with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for dice and reward placement. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Chance that a roll moves forward
    pub forward_probability: f64,
    /// Exact landing applies when `0 < distance < window`. 0 disables it.
    pub exact_landing_window: u32,
    pub bonus_policy: BonusTurnPolicy,
    pub rewards: RewardConfig,
    /// Longest path a single turn may plan
    pub max_path_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            forward_probability: 1.0,
            exact_landing_window: DEFAULT_EXACT_LANDING_WINDOW,
            bonus_policy: BonusTurnPolicy::default(),
            rewards: RewardConfig::default(),
            max_path_len: MAX_TRAVERSAL,
        }
    }
}

impl GameConfig {
    /// Default rules with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.forward_probability) {
            return Err(ConfigError::InvalidProbability(self.forward_probability));
        }
        if self.max_path_len <= DIE_FACES as usize || self.max_path_len > MAX_TRAVERSAL {
            return Err(ConfigError::InvalidPathBound(self.max_path_len));
        }
        self.rewards.validate()?;
        self.bonus_policy.validate()
    }
}
