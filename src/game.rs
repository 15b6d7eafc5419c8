use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::action::{Action, PlayerId};
use crate::bots::heuristic::{choose_wild_color, decide_ai_move};
use crate::card::{Card, Color, DEFAULT_PLAYERS, PLAYABLE_COLORS, Value};
use crate::deck::{Deck, deal, select_starting_discard};
use crate::error::{GameError, InvalidPlay};
use crate::log::{ActionKind, GameRecord, Penalty, TurnLog, TurnLogEntry};
use crate::rules::{can_play, playable_indices};
use crate::score::score_hands;
use crate::state::{
    Direction, GameSettings, GameStateView, GameStatus, PlayerKind, PlayerPublicState, TurnPhase,
};

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub num_players: usize,
    pub seed: u64,
    pub hand_size: Option<usize>,
    pub humans: Vec<PlayerId>,
}

impl GameConfig {
    /// Configuration with a fresh random seed and only automated seats.
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        GameSettings::new(num_players)?;
        Ok(Self {
            num_players,
            seed: rand::random(),
            hand_size: None,
            humans: Vec::new(),
        })
    }
}

/// Builder that enables deterministic deck injection for testing and simulations.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
    game_id: Option<Uuid>,
}

impl GameBuilder {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(num_players)?,
            deck: None,
            game_id: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` as the draw pile instead of a shuffled full deck. The last
    /// card is dealt first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the opening hand size (7 by default).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = Some(hand_size);
        self
    }

    /// Mark `player` as a human seat.
    pub fn with_human(mut self, player: PlayerId) -> Self {
        if !self.config.humans.contains(&player) {
            self.config.humans.push(player);
        }
        self
    }

    pub fn with_game_id(mut self, game_id: Uuid) -> Self {
        self.game_id = Some(game_id);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Core turn engine.
///
/// Every mutating operation validates its preconditions first and either
/// applies the whole transition or returns an error with the game untouched.
#[derive(Clone, Debug)]
pub struct Game {
    game_id: Uuid,
    seed: u64,
    settings: GameSettings,
    status: GameStatus,
    turn_phase: TurnPhase,
    current_player: PlayerId,
    direction: Direction,
    turn_number: u32,
    kinds: Vec<PlayerKind>,
    hands: Vec<Vec<Card>>,
    draw_pile: Deck,
    discard_top: Card,
    discard_count: usize,
    final_scores: Option<Vec<u32>>,
    turn_log: TurnLog,
}

impl Game {
    pub fn builder(num_players: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(num_players)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder {
            config,
            deck: None,
            game_id: None,
        }
        .build()
    }

    /// Shuffles, deals and opens a fresh game for `num_players` automated seats.
    pub fn new_game(num_players: usize) -> Result<Self, GameError> {
        Self::new(GameConfig::new(num_players)?)
    }

    /// Four-player game, the standard table.
    pub fn new_default() -> Result<Self, GameError> {
        Self::new_game(DEFAULT_PLAYERS)
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn discard_top(&self) -> Card {
        self.discard_top
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards played onto the discard pile so far, the opening card included.
    /// Only the top is kept; the rest are out of play for good.
    pub fn discard_pile_count(&self) -> usize {
        self.discard_count
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.hands
            .get(player)
            .map(Vec::as_slice)
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn hands(&self) -> &[Vec<Card>] {
        &self.hands
    }

    pub fn player_kind(&self, player: PlayerId) -> Result<PlayerKind, GameError> {
        self.kinds
            .get(player)
            .copied()
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn turn_log(&self) -> &TurnLog {
        &self.turn_log
    }

    pub fn final_scores(&self) -> Option<&[u32]> {
        self.final_scores.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    /// Cards in the draw pile, every hand and the discard pile.
    pub fn cards_in_play(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(Vec::len).sum();
        self.draw_pile.len() + in_hands + self.discard_count
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        let hand = self.hand(perspective)?.to_vec();
        let players = self
            .hands
            .iter()
            .enumerate()
            .map(|(idx, hand)| PlayerPublicState {
                id: idx,
                kind: self.kinds[idx],
                hand_size: hand.len(),
                is_current: idx == self.current_player,
                has_won: self.winner() == Some(idx),
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings,
            phase: self.turn_phase,
            status: self.status,
            self_player: perspective,
            current_player: self.current_player,
            direction: self.direction,
            turn_number: self.turn_number,
            draw_pile_count: self.draw_pile.len(),
            discard_pile_count: self.discard_count,
            discard_top: self.discard_top,
            players,
            hand,
        })
    }

    /// Every action `player` may take right now. Wild cards are offered once
    /// per declarable color; drawing is always allowed.
    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }
        self.check_turn(player)?;
        let hand = &self.hands[player];
        let mut actions = Vec::new();
        let mut seen: Vec<Card> = Vec::new();
        for card in playable_indices(hand, &self.discard_top).into_iter().map(|i| &hand[i]) {
            if seen.contains(card) {
                continue;
            }
            seen.push(*card);
            if card.is_wild() {
                for color in PLAYABLE_COLORS {
                    actions.push(Action::Play {
                        card: *card,
                        declared_color: Some(color),
                    });
                }
            } else {
                actions.push(Action::Play {
                    card: *card,
                    declared_color: None,
                });
            }
        }
        actions.push(Action::Draw);
        Ok(actions)
    }

    /// Move the built-in heuristic would make for `player`. Does not mutate.
    pub fn decide_ai_move(&self, player: PlayerId) -> Result<Action, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }
        self.check_turn(player)?;
        Ok(decide_ai_move(&self.hands[player], &self.discard_top))
    }

    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<TurnLogEntry, GameError> {
        match action {
            Action::Play {
                card,
                declared_color,
            } => self.play_card(player, card, declared_color),
            Action::Draw => self.draw_card(player, None),
        }
    }

    /// Plays `card` from `player`'s hand onto the discard pile.
    ///
    /// `declared_color` is required for wild cards and ignored otherwise.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: Card,
        declared_color: Option<Color>,
    ) -> Result<TurnLogEntry, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }
        self.check_turn(player)?;
        if !can_play(&card, &self.discard_top) {
            return Err(InvalidPlay::IllegalCard {
                card,
                top: self.discard_top,
            }
            .into());
        }
        let Some(index) = self.hands[player].iter().position(|c| *c == card) else {
            return Err(InvalidPlay::CardNotInHand(card).into());
        };
        let declared_color = if card.is_wild() {
            match declared_color {
                Some(color) if color.is_declarable() => Some(color),
                _ => return Err(InvalidPlay::MissingWildColorDeclaration.into()),
            }
        } else {
            None
        };

        let hand_before = self.hands[player].clone();
        self.hands[player].remove(index);
        Ok(self.resolve_play(player, card, declared_color, ActionKind::Play, hand_before))
    }

    /// Draws one card for `player`.
    ///
    /// A drawn card that can be played is played at once. Automated seats
    /// pick a wild color with the heuristic; human seats use `wild_color`,
    /// and keep the wild in hand when no color was supplied. An empty deck
    /// forfeits the turn.
    pub fn draw_card(
        &mut self,
        player: PlayerId,
        wild_color: Option<Color>,
    ) -> Result<TurnLogEntry, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }
        self.check_turn(player)?;
        if wild_color.is_some_and(|color| !color.is_declarable()) {
            return Err(InvalidPlay::MissingWildColorDeclaration.into());
        }

        let hand_before = self.hands[player].clone();
        let Some(card) = self.draw_pile.draw() else {
            warn!(player, turn = self.turn_number, "draw pile is empty, turn passes");
            return Ok(self.pass_turn(player, ActionKind::DrawFailedEmptyDeck, None, hand_before));
        };
        self.hands[player].push(card);

        if !can_play(&card, &self.discard_top) {
            return Ok(self.pass_turn(player, ActionKind::DrawThenPass, Some(card), hand_before));
        }
        let declared_color = if card.is_wild() {
            match self.kinds[player] {
                PlayerKind::Automated => Some(choose_wild_color(&self.hands[player])),
                PlayerKind::Human => wild_color,
            }
        } else {
            None
        };
        if card.is_wild() && declared_color.is_none() {
            return Ok(self.pass_turn(player, ActionKind::DrawThenPass, Some(card), hand_before));
        }

        self.hands[player].pop();
        Ok(self.resolve_play(
            player,
            card,
            declared_color,
            ActionKind::DrawThenPlay,
            hand_before,
        ))
    }

    /// Builds a finished-game record; `None` while the game is ongoing.
    pub fn record(&self) -> Option<GameRecord> {
        let winner = self.winner()?;
        Some(GameRecord {
            game_id: self.game_id,
            seed: self.seed,
            winner,
            final_scores: self.final_scores.clone().unwrap_or_default(),
            turn_log: self.turn_log.clone(),
            finished_at: self
                .turn_log
                .last()
                .map(|entry| entry.timestamp)
                .unwrap_or_else(Utc::now),
        })
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            deck,
            game_id,
        } = builder;
        let mut settings = GameSettings::new(config.num_players)?;
        if let Some(hand_size) = config.hand_size {
            if hand_size == 0 {
                return Err(GameError::InvalidConfiguration("hand size must be positive"));
            }
            settings.hand_size = hand_size;
        }
        if config.humans.iter().any(|&p| p >= settings.num_players) {
            return Err(GameError::InvalidConfiguration(
                "human seat is outside the table",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = match deck {
            Some(cards) => Deck::from_cards(cards),
            None => Deck::shuffled(&mut rng),
        };

        let dealt = deal(deck, settings.num_players, settings.hand_size);
        if let Some(shortfall) = dealt.shortfall {
            return Err(shortfall);
        }
        let mut draw_pile = dealt.deck;
        let start = select_starting_discard(&mut draw_pile, &mut rng);

        let kinds = (0..settings.num_players)
            .map(|p| {
                if config.humans.contains(&p) {
                    PlayerKind::Human
                } else {
                    PlayerKind::Automated
                }
            })
            .collect();

        let game = Game {
            game_id: game_id.unwrap_or_else(Uuid::new_v4),
            seed: config.seed,
            settings,
            status: GameStatus::Ongoing,
            turn_phase: TurnPhase::AwaitingAction,
            current_player: 0,
            direction: Direction::Clockwise,
            turn_number: 1,
            kinds,
            hands: dealt.hands,
            draw_pile,
            discard_top: start.card,
            discard_count: 1,
            final_scores: None,
            turn_log: TurnLog::new(),
        };
        info!(
            game_id = %game.game_id,
            players = settings.num_players,
            seed = config.seed,
            discard = %game.discard_top,
            fallback_discard = start.fallback,
            "new game dealt"
        );
        Ok(game)
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if player >= self.hands.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn {
                expected: self.current_player,
                actual: player,
            });
        }
        Ok(())
    }

    /// Applies a card already removed from `player`'s hand: updates the
    /// discard, resolves its effect, checks for a win and logs the turn.
    fn resolve_play(
        &mut self,
        player: PlayerId,
        card: Card,
        declared_color: Option<Color>,
        kind: ActionKind,
        hand_before: Vec<Card>,
    ) -> TurnLogEntry {
        let num_players = self.settings.num_players;
        self.discard_top = match declared_color {
            Some(color) if card.is_wild() => card.declared_as(color),
            _ => card,
        };
        self.discard_count += 1;

        let mut next = self.direction.step(player, num_players);
        let mut penalty = None;
        match card.value {
            Value::Reverse => {
                self.direction = self.direction.reversed();
                next = self.direction.step(player, num_players);
                if num_players == 2 {
                    // Two seats: reverse hands the turn straight back.
                    next = self.direction.step(next, num_players);
                }
            }
            Value::Skip => {
                next = self.direction.step(next, num_players);
            }
            Value::DrawTwo | Value::WildDrawFour => {
                let requested = card.value.penalty();
                let cards_drawn = self.draw_pile.draw_up_to(requested);
                let count = cards_drawn.len();
                if count < requested {
                    warn!(
                        penalized = next,
                        requested, count, "draw pile ran short during penalty"
                    );
                }
                self.hands[next].extend_from_slice(&cards_drawn);
                penalty = Some(Penalty {
                    penalized_player: next,
                    cards_drawn,
                    requested,
                    count,
                });
                next = self.direction.step(next, num_players);
            }
            Value::Number(_) | Value::Wild => {}
        }

        let entry = TurnLogEntry {
            turn_number: self.turn_number,
            player,
            kind,
            card: Some(card),
            declared_color,
            penalty,
            hand_before,
            timestamp: Utc::now(),
        };
        self.turn_log.push(entry.clone());
        debug!(
            turn = self.turn_number,
            player,
            ?kind,
            card = %card,
            discard = %self.discard_top,
            next,
            "card played"
        );

        if self.hands[player].is_empty() {
            self.finish(player);
        } else {
            self.current_player = next;
            self.turn_number += 1;
        }
        entry
    }

    fn pass_turn(
        &mut self,
        player: PlayerId,
        kind: ActionKind,
        card: Option<Card>,
        hand_before: Vec<Card>,
    ) -> TurnLogEntry {
        let entry = TurnLogEntry {
            turn_number: self.turn_number,
            player,
            kind,
            card,
            declared_color: None,
            penalty: None,
            hand_before,
            timestamp: Utc::now(),
        };
        self.turn_log.push(entry.clone());
        self.current_player = self.direction.step(player, self.settings.num_players);
        self.turn_number += 1;
        debug!(
            turn = entry.turn_number,
            player,
            ?kind,
            next = self.current_player,
            "turn passed"
        );
        entry
    }

    fn finish(&mut self, winner: PlayerId) {
        let scores = score_hands(&self.hands, winner);
        info!(
            game_id = %self.game_id,
            winner,
            turns = self.turn_number,
            ?scores,
            "game over"
        );
        self.final_scores = Some(scores);
        self.status = GameStatus::Finished { winner };
        self.turn_phase = TurnPhase::GameOver;
    }
}
