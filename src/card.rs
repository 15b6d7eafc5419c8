use std::fmt;

use serde::{Deserialize, Serialize};

/// Card color. `Wild` only ever appears on undeclared wild cards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

/// The four colors a wild card may be declared as, in tie-break order.
pub const PLAYABLE_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

impl Color {
    /// Returns true for the four suit colors.
    #[inline]
    pub fn is_declarable(&self) -> bool {
        !matches!(self, Color::Wild)
    }
}

/// Face of a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Numeral card between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Value {
    /// Action and wild faces; these never open the discard pile.
    #[inline]
    pub fn is_action(&self) -> bool {
        !matches!(self, Value::Number(_))
    }

    /// Cards the next player must draw when this face is played.
    #[inline]
    pub fn penalty(&self) -> usize {
        match self {
            Value::DrawTwo => 2,
            Value::WildDrawFour => 4,
            _ => 0,
        }
    }
}

/// Representation of a single card.
///
/// A wild card carries `Color::Wild` until it is played, at which point the
/// copy placed on the discard pile carries the declared color instead.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub value: Value,
}

pub const MIN_NUMBER: u8 = 0;
pub const MAX_NUMBER: u8 = 9;
pub const COPIES_PER_COLORED_CARD: usize = 2;
pub const WILD_COPIES: usize = 4;
pub const DECK_SIZE: usize = 112;
pub const HAND_SIZE: usize = 7;
pub const DEFAULT_PLAYERS: usize = 4;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

impl Card {
    pub const fn new(color: Color, value: Value) -> Self {
        Self { color, value }
    }

    pub const fn number(color: Color, number: u8) -> Self {
        Self::new(color, Value::Number(number))
    }

    pub const fn wild() -> Self {
        Self::new(Color::Wild, Value::Wild)
    }

    pub const fn wild_draw_four() -> Self {
        Self::new(Color::Wild, Value::WildDrawFour)
    }

    /// True for Wild and Wild Draw Four while still undeclared.
    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self.color, Color::Wild)
    }

    /// Copy of this card with `color` as its effective color.
    #[inline]
    pub fn declared_as(&self, color: Color) -> Self {
        Self {
            color,
            value: self.value,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Wild => "wild",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Skip => f.write_str("Skip"),
            Value::Reverse => f.write_str("Reverse"),
            Value::DrawTwo => f.write_str("Draw Two"),
            Value::Wild => f.write_str("Wild"),
            Value::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Wild | Value::WildDrawFour if self.is_wild() => write!(f, "{}", self.value),
            _ => write!(f, "{} {}", self.color, self.value),
        }
    }
}

/// Builds the full 112-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in PLAYABLE_COLORS {
        for _ in 0..COPIES_PER_COLORED_CARD {
            for number in MIN_NUMBER..=MAX_NUMBER {
                deck.push(Card::number(color, number));
            }
            for value in [Value::Skip, Value::Reverse, Value::DrawTwo] {
                deck.push(Card::new(color, value));
            }
        }
    }
    deck.extend(std::iter::repeat_n(Card::wild(), WILD_COPIES));
    deck.extend(std::iter::repeat_n(Card::wild_draw_four(), WILD_COPIES));
    deck
}
