//! Draw pile construction, dealing, and selection of the opening discard.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::card::{Card, Color, full_deck};
use crate::error::GameError;

/// Opening discard used when no numeral card can be found in the deck.
pub const FALLBACK_DISCARD: Card = Card::number(Color::Red, 1);

/// Draw pile. The last card of the vector is the top of the stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Wraps `cards` without reordering; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Full deck shuffled with the supplied randomness source.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Pops the top card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draws up to `count` cards, fewer when the deck runs out.
    pub fn draw_up_to(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let mut drawn = self.cards.split_off(self.cards.len() - take);
        drawn.reverse();
        drawn
    }

    /// Slides `cards` underneath the stack so they are drawn last.
    pub fn put_under(&mut self, cards: Vec<Card>) {
        if cards.is_empty() {
            return;
        }
        let mut bottom = cards;
        bottom.append(&mut self.cards);
        self.cards = bottom;
    }
}

/// Result of dealing opening hands.
#[derive(Clone, Debug)]
pub struct Deal {
    pub hands: Vec<Vec<Card>>,
    pub deck: Deck,
    /// Set when the deck could not cover every hand; only complete rounds were dealt.
    pub shortfall: Option<GameError>,
}

/// Deals `hand_size` cards round-robin to `num_players` players.
///
/// When the deck holds fewer than `num_players * hand_size` cards, as many
/// complete rounds as possible are dealt and `shortfall` records the gap.
/// Oversized requests saturate rather than overflow.
pub fn deal(mut deck: Deck, num_players: usize, hand_size: usize) -> Deal {
    let required = num_players.saturating_mul(hand_size);
    let available = deck.len();
    let (rounds, shortfall) = if available >= required {
        (hand_size, None)
    } else {
        let rounds = if num_players == 0 { 0 } else { available / num_players };
        (
            rounds,
            Some(GameError::DeckExhaustedDuringDeal {
                required,
                available,
            }),
        )
    };

    let mut hands: Vec<Vec<Card>> = (0..num_players)
        .map(|_| Vec::with_capacity(rounds))
        .collect();
    for _ in 0..rounds {
        for hand in hands.iter_mut() {
            if let Some(card) = deck.draw() {
                hand.push(card);
            }
        }
    }
    Deal {
        hands,
        deck,
        shortfall,
    }
}

/// Opening discard chosen from the deck.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StartingDiscard {
    pub card: Card,
    /// True when [`FALLBACK_DISCARD`] had to be used.
    pub fallback: bool,
}

/// Pops cards until a numeral turns up. Rejected action and wild cards are
/// shuffled and returned underneath the deck so no card leaves play.
pub fn select_starting_discard<R: Rng + ?Sized>(deck: &mut Deck, rng: &mut R) -> StartingDiscard {
    let mut rejected = Vec::new();
    let mut found = None;
    while let Some(card) = deck.draw() {
        if card.value.is_action() {
            rejected.push(card);
        } else {
            found = Some(card);
            break;
        }
    }
    rejected.shuffle(rng);
    deck.put_under(rejected);

    match found {
        Some(card) => StartingDiscard {
            card,
            fallback: false,
        },
        None => {
            warn!(
                deck_len = deck.len(),
                "no numeral card available for the opening discard, using {FALLBACK_DISCARD}"
            );
            StartingDiscard {
                card: FALLBACK_DISCARD,
                fallback: true,
            }
        }
    }
}
