//! Tableside - core rules engine for a Catan-style board game companion
//!
//! This crate owns the canonical state of one match and enforces its rules:
//! - Fixed board topology: 19 tiles, 54 settlement vertices, 72 road edges,
//!   with adjacency tables computed once from the hex-grid geometry
//! - Dice-driven resource distribution
//! - Build/upgrade validation with atomic cost deduction
//! - The development-card economy
//!
//! # Architecture
//!
//! The engine performs no I/O and never blocks. A thin transport layer (HTTP
//! handlers plus a real-time broadcast channel, out of scope here) drives it
//! through [`store::GameStore`], which serializes all mutations behind a
//! per-game lock and serves read-only snapshots.
//!
//! # Modules
//!
//! - [`topology`]: the static hex-grid adjacency tables
//! - [`board`]: tiles, slot occupancy, and per-roll production
//! - [`player`]: players, resource hands, development cards, costs
//! - [`game`]: the `GameState` aggregate and its operations
//! - [`store`]: the locked, process-wide entry point

pub mod board;
pub mod game;
pub mod player;
pub mod store;
pub mod topology;

// Re-export commonly used types
pub use board::{Board, Occupancy, Resource, Terrain, Tile};
pub use game::{GameError, GameState, PlayerRollSummary, RollStatistics};
pub use player::{costs, DevelopmentCard, Player, PlayerId, ResourceHand, RollRecord};
pub use store::GameStore;
pub use topology::{
    EdgeId, TileId, Topology, VertexId, EDGE_COUNT, TILE_COUNT, VERTEX_COUNT,
};
