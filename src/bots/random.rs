use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bots::Bot;
use crate::card::Card;
use crate::state::GameStateView;

/// Baseline bot that plays a random legal card, or draws.
///
/// Sampling is per card rather than per action: a wild offered in four
/// declared colors is as likely as any other card, and its color is then
/// drawn uniformly.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        let mut choices: Vec<Option<Card>> = Vec::new();
        for action in legal_actions {
            let choice = action.card();
            if !choices.contains(&choice) {
                choices.push(choice);
            }
        }
        let Some(&choice) = choices.choose(&mut self.rng) else {
            return Action::Draw;
        };
        let variants: Vec<&Action> = legal_actions
            .iter()
            .filter(|action| action.card() == choice)
            .collect();
        variants
            .choose(&mut self.rng)
            .map(|action| **action)
            .unwrap_or(Action::Draw)
    }
}
