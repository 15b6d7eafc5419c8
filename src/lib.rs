//! UNO-style card game engine: deck and deal, turn state machine, special
//! card effects, scoring, and a deterministic heuristic for automated seats.
//!
//! The engine performs no I/O and owns no timers; callers decide when to
//! submit the next action and how to present or persist the result.

pub mod action;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod log;
pub mod rules;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::bots::heuristic::{choose_card_to_play, choose_wild_color, decide_ai_move};
pub use crate::bots::registry::{create_bot_from_spec, is_human_spec, label_for_spec};
pub use crate::bots::{Bot, HeuristicBot, HumanBot, PlayPolicy, RandomBot};
pub use crate::card::{Card, Color, Value};
pub use crate::deck::{Deck, deal, select_starting_discard};
pub use crate::error::{GameError, InvalidPlay};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::log::{ActionKind, GameRecord, Penalty, TurnLog, TurnLogEntry};
pub use crate::rules::{can_play, is_legal_play};
pub use crate::score::{card_points, hand_points, score_hands};
pub use crate::state::{
    Direction, GameSettings, GameStateView, GameStatus, PlayerKind, PlayerPublicState, TurnPhase,
};
pub use crate::visualize::{describe_action, describe_entry, render_state};
