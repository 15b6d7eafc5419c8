use std::fmt::Write;

use crate::action::Action;
use crate::log::{ActionKind, TurnLogEntry};
use crate::state::{Direction, GameStateView, GameStatus, PlayerKind};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_hand: bool,
    pub show_opponents: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_hand: true,
            show_opponents: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: Player {winner})"),
    };
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(out, "Game status: {status}  |  Turn {}", state.turn_number);
    let _ = writeln!(
        out,
        "Current player: {}{}  |  Direction: {direction}",
        state.current_player,
        if state.current_player == state.self_player {
            " (You)"
        } else {
            ""
        }
    );
    let _ = writeln!(
        out,
        "Discard: {}  |  Draw pile: {}",
        state.discard_top, state.draw_pile_count
    );
    if options.show_opponents {
        let _ = writeln!(out, "Players:");
        for player in &state.players {
            let marker = if player.is_current { ">" } else { " " };
            let kind = match player.kind {
                PlayerKind::Automated => "bot",
                PlayerKind::Human => "human",
            };
            let _ = writeln!(
                out,
                " {marker} Player {} ({kind}): {} cards",
                player.id, player.hand_size
            );
        }
    }
    if options.show_hand {
        let hand = state
            .hand
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "Your hand: [{hand}]");
    }
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::Play {
            card,
            declared_color: Some(color),
        } => format!("Play {card} as {color}"),
        Action::Play { card, .. } => format!("Play {card}"),
        Action::Draw => String::from("Draw a card"),
    }
}

/// One-line summary of a turn log entry.
pub fn describe_entry(entry: &TurnLogEntry) -> String {
    let mut out = format!("Turn {}: Player {} ", entry.turn_number, entry.player);
    let card = entry
        .card
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("?"));
    match entry.kind {
        ActionKind::Play => {
            let _ = write!(out, "played {card}");
        }
        ActionKind::DrawThenPlay => {
            let _ = write!(out, "drew and played {card}");
        }
        ActionKind::DrawThenPass => {
            let _ = write!(out, "drew {card} and passed");
        }
        ActionKind::DrawFailedEmptyDeck => {
            out.push_str("could not draw from an empty deck and passed");
        }
    }
    if let Some(color) = entry.declared_color {
        let _ = write!(out, ", declaring {color}");
    }
    if let Some(penalty) = &entry.penalty {
        let _ = write!(
            out,
            "; Player {} draws {}",
            penalty.penalized_player, penalty.count
        );
        if penalty.is_short() {
            let _ = write!(out, " of {}", penalty.requested);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::card::{Card, Color};
    use crate::log::Penalty;

    #[test]
    fn describes_short_penalty() {
        let entry = TurnLogEntry {
            turn_number: 3,
            player: 0,
            kind: ActionKind::Play,
            card: Some(Card::wild_draw_four()),
            declared_color: Some(Color::Green),
            penalty: Some(Penalty {
                penalized_player: 1,
                cards_drawn: vec![Card::number(Color::Red, 2)],
                requested: 4,
                count: 1,
            }),
            hand_before: Vec::new(),
            timestamp: Utc::now(),
        };
        assert_eq!(
            describe_entry(&entry),
            "Turn 3: Player 0 played Wild Draw Four, declaring green; Player 1 draws 1 of 4"
        );
    }

    #[test]
    fn describes_wild_play_action() {
        let action = Action::Play {
            card: Card::wild(),
            declared_color: Some(Color::Blue),
        };
        assert_eq!(describe_action(&action), "Play Wild as blue");
        assert_eq!(describe_action(&Action::Draw), "Draw a card");
    }
}
