//! Scoring utilities for finished games.
//!
//! Current scoring rule (losers pay):
//!   numeral = face value, Skip / Reverse / Draw Two = 20, Wild / Wild Draw Four = 50
//! The winner's entry is always 0; every other entry is the total of that hand.

use crate::action::PlayerId;
use crate::card::{Card, Value};

pub const ACTION_CARD_POINTS: u32 = 20;
pub const WILD_CARD_POINTS: u32 = 50;

/// Point value of a single card.
pub fn card_points(card: &Card) -> u32 {
    match card.value {
        Value::Number(n) => u32::from(n),
        Value::Skip | Value::Reverse | Value::DrawTwo => ACTION_CARD_POINTS,
        Value::Wild | Value::WildDrawFour => WILD_CARD_POINTS,
    }
}

/// Sum of the card values in `hand`.
pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(card_points).sum()
}

/// Final points per player once `winner` has emptied their hand.
pub fn score_hands(hands: &[Vec<Card>], winner: PlayerId) -> Vec<u32> {
    hands
        .iter()
        .enumerate()
        .map(|(id, hand)| if id == winner { 0 } else { hand_points(hand) })
        .collect()
}
