//! Decision makers that pick an [`Action`] for the seat to move.

pub mod heuristic;
pub mod human;
pub mod random;
pub mod registry;

use crate::action::Action;
use crate::state::GameStateView;

pub use heuristic::{HeuristicBot, PlayPolicy};
pub use human::HumanBot;
pub use random::RandomBot;

/// A seat controller. `legal_actions` is never empty and always ends with
/// [`Action::Draw`].
pub trait Bot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}
