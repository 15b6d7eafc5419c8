use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to an agent during its turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the hand. Wild cards need a declared color.
    Play {
        card: Card,
        declared_color: Option<Color>,
    },
    /// Draw one card; it is played right away when legal.
    Draw,
}

impl Action {
    /// Returns the card if the action is a play.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play { card, .. } => Some(*card),
            Action::Draw => None,
        }
    }
}
