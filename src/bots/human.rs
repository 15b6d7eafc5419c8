use std::io::{self, BufRead, Write};

use crate::action::Action;
use crate::bots::Bot;
use crate::card::{Card, Color, PLAYABLE_COLORS};
use crate::state::GameStateView;
use crate::visualize::{describe_action, render_state};

/// Interactive seat driven from standard input.
///
/// The player picks a card from their hand by position, or draws; wild
/// cards prompt for a color afterwards.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn prompt(&self, message: &str) -> Option<String> {
        print!("{message}");
        if io::stdout().flush().is_err() {
            eprintln!("failed to flush stdout");
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                eprintln!("failed to read input: {err}");
                None
            }
        }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

/// What a line typed at the card prompt asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Selection {
    Card(Card),
    Draw,
    Help,
    Quit,
}

fn parse_selection(input: &str, hand: &[Card]) -> Result<Selection, String> {
    match input.to_ascii_lowercase().as_str() {
        "d" | "draw" => return Ok(Selection::Draw),
        "h" | "help" => return Ok(Selection::Help),
        "q" | "quit" => return Ok(Selection::Quit),
        _ => {}
    }
    let index: usize = input
        .parse()
        .map_err(|_| format!("'{input}' is not a card number, 'd', 'help' or 'q'"))?;
    hand.get(index)
        .copied()
        .map(Selection::Card)
        .ok_or_else(|| format!("no card at position {index}"))
}

fn parse_color(input: &str) -> Option<Color> {
    let input = input.to_ascii_lowercase();
    PLAYABLE_COLORS.into_iter().find(|color| {
        let name = color.to_string();
        input == name || (input.len() == 1 && name.starts_with(&input))
    })
}

impl Bot for HumanBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        println!(
            "\n=== {}'s turn (player {}) ===",
            self.name, state.self_player
        );
        println!("{}", render_state(state));
        for (index, card) in state.hand.iter().enumerate() {
            let fits = legal_actions.iter().any(|a| a.card() == Some(*card));
            println!("  [{index}] {card}{}", if fits { "" } else { "  (cannot play)" });
        }

        loop {
            let Some(input) = self.prompt("Card number, 'd' to draw, 'help' or 'q': ") else {
                println!("Input closed, drawing.");
                return Action::Draw;
            };
            let card = match parse_selection(&input, &state.hand) {
                Ok(Selection::Quit) => {
                    println!("Exiting game at user's request.");
                    std::process::exit(0);
                }
                Ok(Selection::Help) => {
                    println!("Play a card matching {} by color or face.", state.discard_top);
                    println!("A drawn card that fits is played for you; a drawn wild stays in your hand.");
                    continue;
                }
                Ok(Selection::Draw) => return Action::Draw,
                Ok(Selection::Card(card)) => card,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            };

            let declared_color = if card.is_wild() {
                let Some(input) = self.prompt("Declare a color (r/b/g/y): ") else {
                    continue;
                };
                let Some(color) = parse_color(&input) else {
                    println!("'{input}' is not a color.");
                    continue;
                };
                Some(color)
            } else {
                None
            };
            let action = Action::Play {
                card,
                declared_color,
            };
            if legal_actions.contains(&action) {
                println!("You selected: {}", describe_action(&action));
                return action;
            }
            println!("{card} cannot be played on {}.", state.discard_top);
        }
    }
}
