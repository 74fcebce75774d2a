//! Process-wide game store: the entry point the transport layer consumes.
//!
//! One `GameStore` owns at most one match. `initialize` must run exactly
//! once before anything else; every other call fails fast with
//! `NotInitialized` until then. Mutating operations serialize behind the
//! write lock, and `get_state` clones under the read lock, so a snapshot
//! never observes a half-applied mutation. The store also owns the RNG used
//! for board generation, the deck shuffle, and dice, which makes a seeded
//! store fully reproducible.
//!
//! Operations take wire-format player ids (`player_<ordinal>`); anything
//! that does not name a seated player is caller misuse and errors rather
//! than reading as a rule violation.

use crate::game::{GameError, GameState, RollStatistics};
use crate::player::{DevelopmentCard, Player, PlayerId};
use crate::topology::{EdgeId, VertexId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

pub struct GameStore {
    inner: RwLock<Inner>,
}

struct Inner {
    game: Option<GameState>,
    rng: StdRng,
}

impl GameStore {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic store for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: RwLock::new(Inner { game: None, rng }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("game store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("game store lock poisoned")
    }

    fn parse_player(id: &str) -> Result<PlayerId, GameError> {
        PlayerId::parse(id).ok_or_else(|| GameError::UnknownPlayer(id.to_string()))
    }

    // ==================== Lifecycle ====================

    /// Create the match: board, shuffled deck, and `player_count` seats.
    /// Must be called exactly once.
    pub fn initialize(&self, player_count: usize) -> Result<(), GameError> {
        let mut inner = self.write();
        if inner.game.is_some() {
            return Err(GameError::AlreadyInitialized);
        }
        let Inner { game, rng } = &mut *inner;
        *game = Some(GameState::new(player_count, rng));
        info!(player_count, "game initialized");
        Ok(())
    }

    pub fn add_player(&self, name: &str) -> Result<Player, GameError> {
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let player = game.add_player(name);
        info!(id = %player.id, player_name = name, "player joined");
        Ok(player)
    }

    // ==================== Turn Cycle ====================

    pub fn roll_dice(&self) -> Result<(u8, u8), GameError> {
        let mut inner = self.write();
        let Inner { game, rng } = &mut *inner;
        let game = game.as_mut().ok_or(GameError::NotInitialized)?;
        let (die1, die2) = game.roll_dice(rng)?;
        info!(die1, die2, total = die1 + die2, "dice rolled");
        Ok((die1, die2))
    }

    pub fn advance_turn(&self) -> Result<PlayerId, GameError> {
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let next = game.advance_turn()?;
        debug!(next = %next, turn = game.turn_number, "turn advanced");
        Ok(next)
    }

    // ==================== Building ====================

    pub fn place_initial_settlement(
        &self,
        player: &str,
        vertex: VertexId,
    ) -> Result<bool, GameError> {
        let id = Self::parse_player(player)?;
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let placed = game.place_initial_settlement(id, vertex)?;
        debug!(player = %id, vertex, placed, "initial settlement");
        Ok(placed)
    }

    pub fn place_initial_road(&self, player: &str, edge: EdgeId) -> Result<bool, GameError> {
        let id = Self::parse_player(player)?;
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let placed = game.place_initial_road(id, edge)?;
        debug!(player = %id, edge, placed, "initial road");
        Ok(placed)
    }

    pub fn build_road(&self, player: &str, edge: EdgeId) -> Result<bool, GameError> {
        let id = Self::parse_player(player)?;
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let built = game.build_road(id, edge)?;
        debug!(player = %id, edge, built, "build road");
        Ok(built)
    }

    pub fn build_settlement(&self, player: &str, vertex: VertexId) -> Result<bool, GameError> {
        let id = Self::parse_player(player)?;
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let built = game.build_settlement(id, vertex)?;
        debug!(player = %id, vertex, built, "build settlement");
        Ok(built)
    }

    pub fn upgrade_to_city(&self, player: &str, vertex: VertexId) -> Result<bool, GameError> {
        let id = Self::parse_player(player)?;
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let upgraded = game.upgrade_to_city(id, vertex)?;
        debug!(player = %id, vertex, upgraded, "city upgrade");
        Ok(upgraded)
    }

    pub fn buy_development_card(
        &self,
        player: &str,
    ) -> Result<Option<DevelopmentCard>, GameError> {
        let id = Self::parse_player(player)?;
        let mut inner = self.write();
        let game = inner.game.as_mut().ok_or(GameError::NotInitialized)?;
        let card = game.buy_development_card(id)?;
        debug!(player = %id, drawn = card.is_some(), "development card purchase");
        Ok(card)
    }

    // ==================== Snapshots ====================

    /// A point-in-time copy of the whole game state.
    pub fn get_state(&self) -> Result<GameState, GameError> {
        self.read().game.clone().ok_or(GameError::NotInitialized)
    }

    /// The snapshot as JSON, ready for the broadcast channel.
    pub fn state_json(&self) -> Result<serde_json::Value, GameError> {
        let inner = self.read();
        let game = inner.game.as_ref().ok_or(GameError::NotInitialized)?;
        Ok(serde_json::to_value(game).expect("game state serializes"))
    }

    pub fn roll_statistics(&self) -> Result<RollStatistics, GameError> {
        let inner = self.read();
        let game = inner.game.as_ref().ok_or(GameError::NotInitialized)?;
        Ok(game.roll_statistics())
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
