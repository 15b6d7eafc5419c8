use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Card;

/// Errors that can occur when manipulating the game state.
///
/// A returned error always means the game was left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("it is player {expected}'s turn, not player {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },
    #[error("invalid play: {0}")]
    InvalidPlay(#[from] InvalidPlay),
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("deck ran out while dealing: {required} cards required, {available} available")]
    DeckExhaustedDuringDeal { required: usize, available: usize },
}

/// Details of a rejected card play.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidPlay {
    #[error("{card} cannot be played on {top}")]
    IllegalCard { card: Card, top: Card },
    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("wild cards require a declared red, blue, green or yellow color")]
    MissingWildColorDeclaration,
}
