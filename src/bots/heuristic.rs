use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::bots::Bot;
use crate::card::{Card, Color, PLAYABLE_COLORS};
use crate::rules::can_play;
use crate::score::card_points;
use crate::state::GameStateView;

/// How the heuristic ranks the playable cards in a hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayPolicy {
    /// Dump the most expensive playable card first (wilds 50, action cards
    /// 20, numerals their face value). Ties go to the earlier hand position.
    #[default]
    HighestValue,
    /// Play the first non-wild playable card; only fall back to a wild when
    /// nothing else fits.
    ConserveWilds,
}

/// Card the default policy would play on `top`, or `None` when nothing fits.
pub fn choose_card_to_play(hand: &[Card], top: &Card) -> Option<Card> {
    choose_card_with_policy(hand, top, PlayPolicy::default())
}

pub fn choose_card_with_policy(hand: &[Card], top: &Card, policy: PlayPolicy) -> Option<Card> {
    let mut playable = hand.iter().filter(|card| can_play(card, top));
    match policy {
        PlayPolicy::HighestValue => {
            let mut best: Option<&Card> = None;
            for card in playable {
                if best.is_none_or(|b| card_points(card) > card_points(b)) {
                    best = Some(card);
                }
            }
            best.copied()
        }
        PlayPolicy::ConserveWilds => playable
            .clone()
            .find(|card| !card.is_wild())
            .or_else(|| playable.find(|card| card.is_wild()))
            .copied(),
    }
}

/// Most common color among the non-wild cards in `hand`; ties resolve in
/// red, blue, green, yellow order and an empty or all-wild hand picks red.
pub fn choose_wild_color(hand: &[Card]) -> Color {
    let mut best = Color::Red;
    let mut best_count = 0;
    for color in PLAYABLE_COLORS {
        let count = hand.iter().filter(|card| card.color == color).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

/// Play or draw decision for `hand` against `top` under the default policy.
pub fn decide_ai_move(hand: &[Card], top: &Card) -> Action {
    decide_with_policy(hand, top, PlayPolicy::default())
}

fn decide_with_policy(hand: &[Card], top: &Card, policy: PlayPolicy) -> Action {
    match choose_card_with_policy(hand, top, policy) {
        Some(card) => Action::Play {
            card,
            declared_color: card.is_wild().then(|| choose_wild_color(hand)),
        },
        None => Action::Draw,
    }
}

/// Deterministic rule-based bot, no search and no opponent modelling.
///
/// In plain English:
/// - Play a card whenever one fits, ranked by its [`PlayPolicy`].
/// - Declare the color the rest of the hand holds most of.
/// - Draw only when nothing fits.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicBot {
    policy: PlayPolicy,
}

impl HeuristicBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PlayPolicy) -> Self {
        Self { policy }
    }
}

impl Bot for HeuristicBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "heuristic bot requires at least one legal action"
        );
        let action = decide_with_policy(&state.hand, &state.discard_top, self.policy);
        if legal_actions.contains(&action) {
            action
        } else {
            legal_actions[legal_actions.len() - 1]
        }
    }
}
