use unobot::bots::heuristic::choose_card_with_policy;
use unobot::state::{
    Direction, GameSettings, GameStateView, GameStatus, PlayerKind, PlayerPublicState, TurnPhase,
};
use unobot::{
    Action, Bot, Card, Color, HeuristicBot, PlayPolicy, Value, choose_card_to_play,
    choose_wild_color, decide_ai_move,
};

fn view_with_hand(hand: Vec<Card>, discard_top: Card) -> GameStateView {
    let players = (0..2)
        .map(|id| PlayerPublicState {
            id,
            kind: PlayerKind::Automated,
            hand_size: if id == 0 { hand.len() } else { 7 },
            is_current: id == 0,
            has_won: false,
        })
        .collect();
    GameStateView {
        settings: GameSettings::new(2).unwrap(),
        phase: TurnPhase::AwaitingAction,
        status: GameStatus::Ongoing,
        self_player: 0,
        current_player: 0,
        direction: Direction::Clockwise,
        turn_number: 1,
        draw_pile_count: 50,
        discard_pile_count: 1,
        discard_top,
        players,
        hand,
    }
}

#[test]
fn highest_value_prefers_wilds_then_action_cards() {
    let top = Card::number(Color::Blue, 5);
    let hand = vec![
        Card::number(Color::Blue, 9),
        Card::new(Color::Blue, Value::Reverse),
        Card::wild(),
        Card::number(Color::Red, 5),
    ];
    assert_eq!(choose_card_to_play(&hand, &top), Some(Card::wild()));

    let hand = vec![Card::number(Color::Blue, 9), Card::new(Color::Blue, Value::Reverse)];
    assert_eq!(
        choose_card_to_play(&hand, &top),
        Some(Card::new(Color::Blue, Value::Reverse))
    );
}

#[test]
fn ties_resolve_by_hand_order() {
    let top = Card::number(Color::Green, 3);
    let hand = vec![
        Card::number(Color::Red, 1),
        Card::new(Color::Green, Value::Skip),
        Card::new(Color::Green, Value::DrawTwo),
    ];
    assert_eq!(
        choose_card_to_play(&hand, &top),
        Some(Card::new(Color::Green, Value::Skip))
    );
}

#[test]
fn conserve_policy_keeps_wilds_for_last() {
    let top = Card::number(Color::Yellow, 2);
    let hand = vec![Card::wild_draw_four(), Card::number(Color::Yellow, 0)];
    assert_eq!(
        choose_card_with_policy(&hand, &top, PlayPolicy::ConserveWilds),
        Some(Card::number(Color::Yellow, 0))
    );
    let hand = vec![Card::number(Color::Red, 8), Card::wild_draw_four()];
    assert_eq!(
        choose_card_with_policy(&hand, &top, PlayPolicy::ConserveWilds),
        Some(Card::wild_draw_four())
    );
}

#[test]
fn no_playable_card_means_draw() {
    let top = Card::number(Color::Yellow, 2);
    let hand = vec![Card::number(Color::Red, 8), Card::new(Color::Blue, Value::Skip)];
    assert_eq!(choose_card_to_play(&hand, &top), None);
    assert_eq!(decide_ai_move(&hand, &top), Action::Draw);
    assert_eq!(choose_card_to_play(&[], &top), None);
}

#[test]
fn wild_color_follows_the_majority_color() {
    let hand = vec![
        Card::number(Color::Yellow, 1),
        Card::number(Color::Green, 2),
        Card::number(Color::Yellow, 3),
        Card::wild(),
    ];
    assert_eq!(choose_wild_color(&hand), Color::Yellow);
}

#[test]
fn wild_color_ties_follow_declared_order() {
    let hand = vec![
        Card::number(Color::Yellow, 1),
        Card::number(Color::Blue, 2),
        Card::number(Color::Green, 3),
    ];
    assert_eq!(choose_wild_color(&hand), Color::Blue);
    assert_eq!(choose_wild_color(&[Card::wild(), Card::wild_draw_four()]), Color::Red);
    assert_eq!(choose_wild_color(&[]), Color::Red);
}

#[test]
fn ai_move_declares_a_color_for_wilds() {
    let top = Card::number(Color::Red, 4);
    let hand = vec![
        Card::wild_draw_four(),
        Card::number(Color::Green, 1),
        Card::number(Color::Green, 7),
    ];
    assert_eq!(
        decide_ai_move(&hand, &top),
        Action::Play {
            card: Card::wild_draw_four(),
            declared_color: Some(Color::Green)
        }
    );
}

#[test]
fn bot_picks_a_legal_action_from_the_view() {
    let top = Card::number(Color::Red, 4);
    let state = view_with_hand(vec![Card::number(Color::Red, 6), Card::wild()], top);
    let legal_actions = vec![
        Action::Play {
            card: Card::number(Color::Red, 6),
            declared_color: None,
        },
        Action::Play {
            card: Card::wild(),
            declared_color: Some(Color::Red),
        },
        Action::Play {
            card: Card::wild(),
            declared_color: Some(Color::Blue),
        },
        Action::Draw,
    ];

    let mut bot = HeuristicBot::new();
    assert_eq!(
        bot.select_action(&state, &legal_actions),
        Action::Play {
            card: Card::wild(),
            declared_color: Some(Color::Red)
        }
    );

    let mut conserving = HeuristicBot::with_policy(PlayPolicy::ConserveWilds);
    assert_eq!(
        conserving.select_action(&state, &legal_actions),
        Action::Play {
            card: Card::number(Color::Red, 6),
            declared_color: None
        }
    );
}
