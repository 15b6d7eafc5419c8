//! Legality of a card against the current discard.

use crate::card::Card;

/// True iff `card` may be played on `top`: wild cards always match, other
/// cards must share the top's color or face.
#[inline]
pub fn can_play(card: &Card, top: &Card) -> bool {
    card.is_wild() || card.color == top.color || card.value == top.value
}

/// Total form of [`can_play`] for callers holding optional cards, such as a
/// UI greying out a hand before a discard exists. Missing inputs are illegal.
pub fn is_legal_play(card: Option<&Card>, top: Option<&Card>) -> bool {
    match (card, top) {
        (Some(card), Some(top)) => can_play(card, top),
        _ => false,
    }
}

/// Indices of the cards in `hand` that may be played on `top`, in hand order.
pub fn playable_indices(hand: &[Card], top: &Card) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| can_play(card, top))
        .map(|(index, _)| index)
        .collect()
}
