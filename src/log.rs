//! Append-only record of every accepted turn, plus the finished-game export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// What happened on a turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Play,
    DrawThenPlay,
    DrawThenPass,
    DrawFailedEmptyDeck,
}

/// Forced draw applied by a Draw Two or Wild Draw Four.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Penalty {
    pub penalized_player: PlayerId,
    pub cards_drawn: Vec<Card>,
    /// Nominal penalty of the played card.
    pub requested: usize,
    /// Cards actually drawn; lower than `requested` when the deck ran out.
    pub count: usize,
}

impl Penalty {
    pub fn is_short(&self) -> bool {
        self.count < self.requested
    }
}

/// Immutable record of one accepted action.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnLogEntry {
    pub turn_number: u32,
    pub player: PlayerId,
    pub kind: ActionKind,
    /// Card played, or the card drawn for draw-then-pass turns.
    pub card: Option<Card>,
    pub declared_color: Option<Color>,
    pub penalty: Option<Penalty>,
    pub hand_before: Vec<Card>,
    pub timestamp: DateTime<Utc>,
}

/// Ordered turn history of a single game.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnLog {
    entries: Vec<TurnLogEntry>,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TurnLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TurnLogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TurnLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TurnLogEntry> {
        self.entries.iter()
    }
}

/// Everything a caller needs to persist a finished game.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: Uuid,
    pub seed: u64,
    pub winner: PlayerId,
    pub final_scores: Vec<u32>,
    pub turn_log: TurnLog,
    pub finished_at: DateTime<Utc>,
}

impl GameRecord {
    /// Single-line JSON encoding, suitable for JSONL files.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(turn_number: u32, kind: ActionKind) -> TurnLogEntry {
        TurnLogEntry {
            turn_number,
            player: 0,
            kind,
            card: None,
            declared_color: None,
            penalty: None,
            hand_before: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn log_preserves_insertion_order() {
        let mut log = TurnLog::new();
        log.push(entry(1, ActionKind::Play));
        log.push(entry(2, ActionKind::DrawFailedEmptyDeck));
        assert_eq!(log.len(), 2);
        let turns: Vec<u32> = log.iter().map(|e| e.turn_number).collect();
        assert_eq!(turns, vec![1, 2]);
        assert_eq!(log.last().map(|e| e.kind), Some(ActionKind::DrawFailedEmptyDeck));
    }

    #[test]
    fn action_kinds_serialize_as_upper_snake_case() {
        let json = serde_json::to_string(&ActionKind::DrawThenPass).unwrap();
        assert_eq!(json, "\"DRAW_THEN_PASS\"");
    }

    #[test]
    fn record_encodes_to_a_single_line() {
        let mut turn_log = TurnLog::new();
        turn_log.push(entry(1, ActionKind::Play));
        let record = GameRecord {
            game_id: Uuid::new_v4(),
            seed: 42,
            winner: 1,
            final_scores: vec![12, 0, 30, 4],
            turn_log,
            finished_at: Utc::now(),
        };
        let line = record.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        let decoded: GameRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(decoded.winner, 1);
        assert_eq!(decoded.turn_log.len(), 1);
    }
}
