//! Events a presentation layer can react to.
//!
//! A `TurnResult` is a summary; `events()` unfolds it into the ordered
//! notifications the game shows (dice, shortcut banner, exact-landing
//! warning, points, bonus turn, winner).

use crate::board::CellId;
use crate::movement::Direction;
use crate::player::PlayerId;
use crate::turn::TurnResult;
use serde::{Deserialize, Serialize};

/// Events that occur during a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The die was thrown
    DiceRolled {
        player: PlayerId,
        value: u8,
        direction: Direction,
    },

    /// An intersection was resolved by shortest distance
    ShortcutTaken { player: PlayerId, at: CellId, to: CellId },

    /// The roll overshot the terminal; nothing moved
    OvershootBlocked {
        player: PlayerId,
        needed: u32,
        rolled: u8,
    },

    /// The roll reaches the terminal exactly
    PerfectLanding { player: PlayerId },

    /// The token moved
    Moved {
        player: PlayerId,
        from: CellId,
        to: CellId,
        path: Vec<CellId>,
    },

    /// Points were picked up from the landing cell
    PointsCollected {
        player: PlayerId,
        cell: CellId,
        points: u32,
    },

    /// The same player goes again
    BonusTurn { player: PlayerId },

    /// Turn passed on
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// A player reached the terminal
    GameWon { player: PlayerId },
}

impl TurnResult {
    /// Unfold this result into events, in the order they happened
    pub fn events(&self) -> Vec<GameEvent> {
        let player = self.player;
        let direction = if self.forward_direction {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let mut events = vec![GameEvent::DiceRolled {
            player,
            value: self.roll_value,
            direction,
        }];

        if self.overshoot_blocked {
            events.push(GameEvent::OvershootBlocked {
                player,
                needed: self.exact_distance.unwrap_or_default(),
                rolled: self.roll_value,
            });
        } else {
            if self.perfect_landing {
                events.push(GameEvent::PerfectLanding { player });
            }
            if self.used_shortcut {
                if let Some((at, to)) = self.shortcut_step() {
                    events.push(GameEvent::ShortcutTaken { player, at, to });
                }
            }
            if self.path.len() > 1 {
                events.push(GameEvent::Moved {
                    player,
                    from: self.start(),
                    to: self.landing(),
                    path: self.path.clone(),
                });
            }
            if self.points_collected > 0 {
                events.push(GameEvent::PointsCollected {
                    player,
                    cell: self.landing(),
                    points: self.points_collected,
                });
            }
            if self.bonus_turn {
                events.push(GameEvent::BonusTurn { player });
            }
        }

        if self.game_over {
            events.push(GameEvent::GameWon { player });
        } else if let Some(next_player) = self.next_player {
            events.push(GameEvent::TurnEnded {
                player,
                next_player,
            });
        }

        events
    }

    /// The intersection that was resolved and the cell chosen there
    fn shortcut_step(&self) -> Option<(CellId, CellId)> {
        let at = self.shortcut_at?;
        let k = self.path.iter().position(|&c| c == at)?;
        self.path.get(k + 1).map(|&to| (at, to))
    }
}
