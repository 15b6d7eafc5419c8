//! Property tests for legality, conservation, turn order and scoring.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use unobot::card::DECK_SIZE;
use unobot::{
    ActionKind, Bot, Card, Color, Game, GameBuilder, GameError, InvalidPlay, PlayerId, RandomBot,
    Value, can_play, hand_points, score_hands,
};

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Red),
        Just(Color::Blue),
        Just(Color::Green),
        Just(Color::Yellow),
    ]
}

fn colored_card() -> impl Strategy<Value = Card> {
    let value = prop_oneof![
        (0u8..=9).prop_map(Value::Number),
        Just(Value::Skip),
        Just(Value::Reverse),
        Just(Value::DrawTwo),
    ];
    (color(), value).prop_map(|(color, value)| Card::new(color, value))
}

fn wild_card() -> impl Strategy<Value = Card> {
    prop_oneof![Just(Card::wild()), Just(Card::wild_draw_four())]
}

fn card() -> impl Strategy<Value = Card> {
    prop_oneof![4 => colored_card(), 2 => wild_card()]
}

/// A card to put on the discard pile, with the color declared for wilds.
fn discard_play() -> impl Strategy<Value = (Card, Option<Color>)> {
    prop_oneof![
        3 => colored_card().prop_map(|card| (card, None)),
        1 => (wild_card(), color()).prop_map(|(card, color)| (card, Some(color))),
    ]
}

fn hands() -> impl Strategy<Value = Vec<Vec<Card>>> {
    prop::collection::vec(prop::collection::vec(card(), 0..8), 2..=6)
}

/// Deck that deals `hands` round-robin, opens on `discard` and then yields `draws`.
fn stacked_deck(hands: &[Vec<Card>], discard: Card, draws: &[Card]) -> Vec<Card> {
    let mut order = Vec::new();
    for round in 0..hands[0].len() {
        for hand in hands {
            order.push(hand[round]);
        }
    }
    order.push(discard);
    order.extend_from_slice(draws);
    order.reverse();
    order
}

/// Two-player game in which player 0 has just played `played`. Both seats
/// hold `card`; the returned player is the one to move next.
fn game_after_play(
    played: Card,
    declared: Option<Color>,
    card: Card,
) -> Result<(Game, PlayerId), GameError> {
    let filler = Card::number(Color::Yellow, 9);
    let opening = if played.is_wild() {
        Card::number(Color::Red, 0)
    } else {
        Card::number(played.color, 0)
    };
    let hands = vec![vec![played, card, filler], vec![card, filler, filler]];
    let deck = stacked_deck(&hands, opening, &[filler; 4]);
    let mut game = GameBuilder::new(2)?
        .with_seed(1)
        .with_hand_size(3)
        .with_deck(deck)
        .build()?;
    game.play_card(0, played, declared)?;
    let next = game.current_player();
    Ok((game, next))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A play succeeds exactly when the rule evaluator allows it, whatever
    /// kind of card, declared wild included, sits on the discard pile.
    #[test]
    fn prop_play_succeeds_iff_card_matches(
        (played, declared) in discard_play(),
        card in card(),
    ) {
        let (mut game, next) = game_after_play(played, declared, card).unwrap();
        let top = game.discard_top();
        let expected_top = match declared {
            Some(color) => played.declared_as(color),
            None => played,
        };
        prop_assert_eq!(top, expected_top);
        prop_assert!(game.hand(next).unwrap().contains(&card));

        let before = game.hand(next).unwrap().len();
        let declared = card.is_wild().then_some(Color::Blue);
        let result = game.play_card(next, card, declared);
        if can_play(&card, &top) {
            prop_assert!(result.is_ok(), "{:?} on {:?} should be legal", card, top);
            prop_assert_eq!(game.hand(next).unwrap().len(), before - 1);
        } else {
            prop_assert_eq!(
                result,
                Err(GameError::InvalidPlay(InvalidPlay::IllegalCard { card, top }))
            );
            prop_assert_eq!(game.discard_top(), top);
            prop_assert_eq!(game.hand(next).unwrap().len(), before);
        }
    }

    /// Winner scores zero and the rest of the table pays its hand totals.
    #[test]
    fn prop_scores_are_independent_of_winner(hands in hands(), pick in any::<prop::sample::Index>()) {
        let winner = pick.index(hands.len());
        let scores = score_hands(&hands, winner);
        prop_assert_eq!(scores[winner], 0);
        let total: u32 = hands.iter().map(|h| hand_points(h)).sum();
        let sum: u32 = scores.iter().sum();
        prop_assert_eq!(sum, total - hand_points(&hands[winner]));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Random tables never create or lose cards, keep the turn moving, and
    /// only end when a play empties the acting hand.
    #[test]
    fn prop_random_tables_keep_invariants(
        seed in any::<u64>(),
        num_players in 3usize..=6,
    ) {
        let mut game = Game::builder(num_players).unwrap().with_seed(seed).build().unwrap();
        let mut bots: Vec<RandomBot<StdRng>> = (0..num_players)
            .map(|i| RandomBot::new(StdRng::seed_from_u64(seed ^ i as u64)))
            .collect();

        for _ in 0..400 {
            if game.is_finished() {
                break;
            }
            let actor = game.current_player();
            let view = game.state_view(actor).unwrap();
            let legal = game.legal_actions(actor).unwrap();
            let action = bots[actor].select_action(&view, &legal);
            let entry = game.apply_action(actor, action).unwrap();

            prop_assert_eq!(game.cards_in_play(), DECK_SIZE);
            prop_assert!(game.current_player() < num_players);
            prop_assert_eq!(game.winner().is_some(), game.is_finished());

            let emptied = game.hand(actor).unwrap().is_empty();
            prop_assert_eq!(game.is_finished(), emptied);
            if game.is_finished() {
                prop_assert!(matches!(entry.kind, ActionKind::Play | ActionKind::DrawThenPlay));
                prop_assert_eq!(game.winner(), Some(actor));
                prop_assert_eq!(game.current_player(), actor);
            } else {
                prop_assert_ne!(game.current_player(), actor);
            }
        }
    }
}
