use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::GameError;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        Ok(Self {
            num_players,
            hand_size: HAND_SIZE,
        })
    }
}

/// Turn order among player indices.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Player one seat away from `from` in this direction.
    pub fn step(&self, from: PlayerId, num_players: usize) -> PlayerId {
        match self {
            Direction::Clockwise => (from + 1) % num_players,
            Direction::CounterClockwise => (from + num_players - 1) % num_players,
        }
    }
}

/// Who decides a seat's moves.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerKind {
    #[default]
    Automated,
    Human,
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Current phase of the active turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingAction,
    GameOver,
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub kind: PlayerKind,
    pub hand_size: usize,
    pub is_current: bool,
    pub has_won: bool,
}

/// Game state snapshot tailored for bots and front ends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub turn_number: u32,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub discard_top: Card,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}
