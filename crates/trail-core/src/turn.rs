//! Resolution of a single player's turn.
//!
//! The engine takes a roll, plans the movement, moves the token, collects
//! the landing reward and decides on a bonus turn. Advancing to the next
//! player and finishing the match are left to the session.

use crate::board::{BoardGraph, CellId, MAX_TRAVERSAL};
use crate::dice::DiceRoll;
use crate::movement::{MovementError, MovementPlanner};
use crate::player::{Player, PlayerId};
use crate::rules::{BonusTurnPolicy, GameConfig, DEFAULT_EXACT_LANDING_WINDOW};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Where the engine is within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStage {
    AwaitingRoll,
    Moving,
    Resolved,
}

/// Everything that happened during one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Who acted
    pub player: PlayerId,
    /// Cells traversed; the first is where the turn began
    pub path: Vec<CellId>,
    pub used_shortcut: bool,
    /// Intersection resolved by the shortcut rule
    pub shortcut_at: Option<CellId>,
    pub bonus_turn: bool,
    pub game_over: bool,
    pub points_collected: u32,
    pub roll_value: u8,
    pub forward_direction: bool,
    pub overshoot_blocked: bool,
    pub perfect_landing: bool,
    /// Distance to the terminal when the exact-landing rule applied
    pub exact_distance: Option<u32>,
    /// Who acts next, `None` once the game is over
    pub next_player: Option<PlayerId>,
}

impl TurnResult {
    /// Cell the token ended on
    pub fn landing(&self) -> CellId {
        self.path[self.path.len() - 1]
    }

    pub fn start(&self) -> CellId {
        self.path[0]
    }
}

/// Applies the per-turn rules
#[derive(Debug, Clone, PartialEq)]
pub struct TurnEngine {
    bonus_policy: BonusTurnPolicy,
    exact_landing_window: u32,
    max_path_len: usize,
    stage: TurnStage,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self {
            bonus_policy: BonusTurnPolicy::default(),
            exact_landing_window: DEFAULT_EXACT_LANDING_WINDOW,
            max_path_len: MAX_TRAVERSAL,
            stage: TurnStage::AwaitingRoll,
        }
    }
}

impl TurnEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bonus_policy: config.bonus_policy.clone(),
            exact_landing_window: config.exact_landing_window,
            max_path_len: config.max_path_len,
            stage: TurnStage::AwaitingRoll,
        }
    }

    pub fn stage(&self) -> TurnStage {
        self.stage
    }

    pub fn bonus_policy(&self) -> &BonusTurnPolicy {
        &self.bonus_policy
    }

    fn enter(&mut self, stage: TurnStage) {
        trace!(from = ?self.stage, to = ?stage, "Turn stage");
        self.stage = stage;
    }

    /// Rewind to the start of a turn
    pub fn reset(&mut self) {
        self.enter(TurnStage::AwaitingRoll);
    }

    /// Resolve `roll` for `player`, mutating only the player and the reward
    /// on the landing cell.
    pub fn resolve(
        &mut self,
        board: &mut BoardGraph,
        player: &mut Player,
        roll: DiceRoll,
    ) -> Result<TurnResult, MovementError> {
        self.enter(TurnStage::AwaitingRoll);
        let start = player.current_cell;
        let eligible = board.cell(start).is_some_and(|cell| cell.is_prime);

        self.enter(TurnStage::Moving);
        let plan = MovementPlanner::new(board)
            .with_exact_landing_window(self.exact_landing_window)
            .with_max_path_len(self.max_path_len)
            .plan(start, u32::from(roll.value), roll.direction, eligible);
        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => {
                self.enter(TurnStage::AwaitingRoll);
                return Err(e);
            }
        };

        let mut result = TurnResult {
            player: player.id,
            path: plan.path,
            used_shortcut: plan.used_shortcut,
            shortcut_at: plan.shortcut_at,
            bonus_turn: false,
            game_over: false,
            points_collected: 0,
            roll_value: roll.value,
            forward_direction: roll.direction.is_forward(),
            overshoot_blocked: plan.overshoot_blocked,
            perfect_landing: plan.perfect_landing,
            exact_distance: plan.exact_distance,
            next_player: None,
        };

        if !result.overshoot_blocked {
            let landing = result.landing();
            player.move_to(landing);

            let points = board.collect_reward(landing);
            if points > 0 {
                player.add_score(points);
                debug!(player = %player.name, points, cell = landing, "Points collected");
            }
            result.points_collected = points;

            result.game_over = board.is_end(landing);
            // Staying put is not a landing
            let moved = result.path.len() > 1;
            result.bonus_turn =
                moved && !result.game_over && self.bonus_policy.grants_bonus(landing, player);
            if result.bonus_turn {
                info!(player = %player.name, cell = landing, "Bonus turn");
            }
        }

        self.enter(TurnStage::Resolved);
        Ok(result)
    }
}
