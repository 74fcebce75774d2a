//! Core game state and rule enforcement.
//!
//! `GameState` is the aggregate the transport layer snapshots and mutates:
//! seated players, the board, the dice history, and the development-card
//! draw pile. Build operations are all-or-nothing: every precondition is
//! checked before the first mutation, and an expected rule violation
//! (occupied slot, short funds, empty deck) comes back as `Ok(false)` /
//! `Ok(None)` rather than an error. Errors are reserved for caller misuse:
//! unknown player ids and out-of-range slot indices.

use crate::board::Board;
use crate::player::{costs, DevelopmentCard, Player, PlayerId, RollRecord};
use crate::topology::{EdgeId, VertexId, EDGE_COUNT, VERTEX_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Precondition failures: the caller broke the interface contract, as
/// opposed to a move the rules simply disallow.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("game has not been initialized")]
    NotInitialized,

    #[error("game is already initialized")]
    AlreadyInitialized,

    #[error("unknown player id `{0}`")]
    UnknownPlayer(String),

    #[error("no players seated")]
    NoPlayers,

    #[error("vertex index {0} out of range")]
    VertexOutOfRange(usize),

    #[error("edge index {0} out of range")]
    EdgeOutOfRange(usize),
}

/// Roll history broken out for the statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollStatistics {
    pub game_rolls: Vec<u8>,
    pub player_rolls: Vec<PlayerRollSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRollSummary {
    pub player_id: PlayerId,
    pub player_name: String,
    pub rolls: Vec<RollRecord>,
}

/// The complete state of one running match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub players: Vec<Player>,
    /// Seat index of the player whose turn it is.
    pub current_turn: usize,
    pub turn_number: u32,
    /// Every two-die total rolled this game, in order.
    pub dice_rolls: Vec<u8>,
    /// Draw pile; purchases take from the end.
    pub development_card_deck: Vec<DevelopmentCard>,
}

impl GameState {
    /// Create a match: generate the board, shuffle the draw pile, and seat
    /// `player_count` default-named players.
    pub fn new<R: Rng>(player_count: usize, rng: &mut R) -> Self {
        let board = Board::generate(rng);
        let mut deck = DevelopmentCard::standard_deck();
        deck.shuffle(rng);

        let mut state = Self {
            board,
            players: Vec::new(),
            current_turn: 0,
            turn_number: 0,
            dice_rolls: Vec::new(),
            development_card_deck: deck,
        };
        for seat in 0..player_count {
            state.add_player(&format!("Player {}", seat + 1));
        }
        state
    }

    /// Seat a new player and return their record, id assigned by seating
    /// order.
    pub fn add_player(&mut self, name: &str) -> Player {
        let player = Player::new(PlayerId::from_seat(self.players.len()), name.to_string());
        self.players.push(player.clone());
        player
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_turn)
    }

    fn ensure_player(&self, id: PlayerId) -> Result<(), GameError> {
        if id.seat() < self.players.len() {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(id.to_string()))
        }
    }

    fn check_vertex(vertex: VertexId) -> Result<(), GameError> {
        if vertex < VERTEX_COUNT {
            Ok(())
        } else {
            Err(GameError::VertexOutOfRange(vertex))
        }
    }

    fn check_edge(edge: EdgeId) -> Result<(), GameError> {
        if edge < EDGE_COUNT {
            Ok(())
        } else {
            Err(GameError::EdgeOutOfRange(edge))
        }
    }

    // ==================== Rolling & Distribution ====================

    /// Roll two dice for the current player: record the total in the global
    /// and per-player histories, distribute production, and return the
    /// individual faces for display.
    pub fn roll_dice<R: Rng>(&mut self, rng: &mut R) -> Result<(u8, u8), GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let die1: u8 = rng.gen_range(1..=6);
        let die2: u8 = rng.gen_range(1..=6);
        let total = die1 + die2;

        self.dice_rolls.push(total);
        let turn = self.turn_number;
        self.players[self.current_turn]
            .rolls
            .push(RollRecord { roll: total, turn });

        self.distribute_resources(total);

        Ok((die1, die2))
    }

    /// Credit every player whose settlements and cities border a tile
    /// triggered by this total. A 7 credits nothing (no tile carries it);
    /// the robber-move step it triggers in the full game is out of scope.
    pub fn distribute_resources(&mut self, total: u8) {
        for (owner, gained) in self.board.production_for_roll(total) {
            let player = self
                .players
                .get_mut(owner.seat())
                .expect("board slot owned by an unseated player");
            player.resources.credit_all(&gained);
        }
    }

    /// Hand the turn to the next seat. Deliberately not fused into
    /// `roll_dice`: a turn may include actions between the roll and the
    /// hand-off, and the transport layer decides when it ends.
    pub fn advance_turn(&mut self) -> Result<PlayerId, GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        self.current_turn = (self.current_turn + 1) % self.players.len();
        self.turn_number += 1;
        Ok(self.players[self.current_turn].id)
    }

    // ==================== Building ====================

    /// Free setup placement: any unoccupied vertex.
    pub fn place_initial_settlement(
        &mut self,
        player: PlayerId,
        vertex: VertexId,
    ) -> Result<bool, GameError> {
        Self::check_vertex(vertex)?;
        self.ensure_player(player)?;

        if self.board.vertex(vertex).is_some() {
            return Ok(false);
        }
        self.board.place_settlement(vertex, player);
        Ok(true)
    }

    /// Free setup placement: any unoccupied edge.
    pub fn place_initial_road(
        &mut self,
        player: PlayerId,
        edge: EdgeId,
    ) -> Result<bool, GameError> {
        Self::check_edge(edge)?;
        self.ensure_player(player)?;

        if self.board.edge_owner(edge).is_some() {
            return Ok(false);
        }
        self.board.place_road(edge, player);
        Ok(true)
    }

    pub fn build_road(&mut self, player: PlayerId, edge: EdgeId) -> Result<bool, GameError> {
        Self::check_edge(edge)?;
        self.ensure_player(player)?;

        let cost = costs::road();
        if !self.players[player.seat()].resources.can_afford(&cost) {
            return Ok(false);
        }
        if self.board.edge_owner(edge).is_some() {
            return Ok(false);
        }

        self.players[player.seat()].resources.debit(&cost);
        self.board.place_road(edge, player);
        Ok(true)
    }

    pub fn build_settlement(
        &mut self,
        player: PlayerId,
        vertex: VertexId,
    ) -> Result<bool, GameError> {
        Self::check_vertex(vertex)?;
        self.ensure_player(player)?;

        let cost = costs::settlement();
        if !self.players[player.seat()].resources.can_afford(&cost) {
            return Ok(false);
        }
        if self.board.vertex(vertex).is_some() {
            return Ok(false);
        }

        let builder = &mut self.players[player.seat()];
        builder.resources.debit(&cost);
        builder.victory_points += 1;
        self.board.place_settlement(vertex, player);
        Ok(true)
    }

    /// Upgrade the player's own settlement to a city.
    pub fn upgrade_to_city(
        &mut self,
        player: PlayerId,
        vertex: VertexId,
    ) -> Result<bool, GameError> {
        Self::check_vertex(vertex)?;
        self.ensure_player(player)?;

        let cost = costs::city();
        if !self.players[player.seat()].resources.can_afford(&cost) {
            return Ok(false);
        }
        match self.board.vertex(vertex) {
            Some(occupancy) if occupancy.owner == player && !occupancy.is_city => {}
            _ => return Ok(false),
        }

        let builder = &mut self.players[player.seat()];
        builder.resources.debit(&cost);
        builder.victory_points += 1;
        self.board.upgrade_to_city(vertex);
        Ok(true)
    }

    // ==================== Development Cards ====================

    /// Draw from the top of the pile. `Ok(None)` when the player cannot pay
    /// or the pile is empty; a Victory Point card scores immediately.
    pub fn buy_development_card(
        &mut self,
        player: PlayerId,
    ) -> Result<Option<DevelopmentCard>, GameError> {
        self.ensure_player(player)?;

        let cost = costs::development_card();
        if !self.players[player.seat()].resources.can_afford(&cost) {
            return Ok(None);
        }
        let card = match self.development_card_deck.pop() {
            Some(card) => card,
            None => return Ok(None),
        };

        let buyer = &mut self.players[player.seat()];
        buyer.resources.debit(&cost);
        buyer.development_cards.push(card);
        if card == DevelopmentCard::VictoryPoint {
            buyer.victory_points += 1;
        }
        Ok(Some(card))
    }

    // ==================== Statistics ====================

    pub fn roll_statistics(&self) -> RollStatistics {
        RollStatistics {
            game_rolls: self.dice_rolls.clone(),
            player_rolls: self
                .players
                .iter()
                .map(|p| PlayerRollSummary {
                    player_id: p.id,
                    player_name: p.name.clone(),
                    rolls: p.rolls.clone(),
                })
                .collect(),
        }
    }
}
