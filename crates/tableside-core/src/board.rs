//! Game board representation: tiles, slot occupancy, and production.
//!
//! This module contains:
//! - Resource and terrain types
//! - Tile generation from the standard terrain/number multisets
//! - Vertex and edge occupancy (who built what, where)
//! - The per-roll production calculation consumed by the distribution step

use crate::player::{PlayerId, ResourceHand};
use crate::topology::{EdgeId, TileId, Topology, VertexId, EDGE_COUNT, TILE_COUNT, VERTEX_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The five producible resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Brick,
    Ore,
    Grain,
    Wool,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Ore,
        Resource::Grain,
        Resource::Wool,
    ];
}

/// What a tile is made of: a producing terrain or the barren desert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Resource(Resource),
    Desert,
}

/// A single hex tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    /// Dice total that triggers production. `None` on the desert, which
    /// never produces.
    pub number: Option<u8>,
    /// The robber suppresses production while parked here. It starts on the
    /// desert; moving it is outside this crate's scope.
    pub has_robber: bool,
}

impl Tile {
    /// The resource this tile produces, if any.
    pub fn resource(&self) -> Option<Resource> {
        match self.terrain {
            Terrain::Resource(resource) => Some(resource),
            Terrain::Desert => None,
        }
    }
}

/// A built-up vertex: settlement or, once upgraded, city. Occupancy only ever
/// moves forward: empty -> settlement -> city, never vacated or transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub owner: PlayerId,
    pub is_city: bool,
}

/// Trigger numbers for the 18 non-desert tiles.
const TRIGGER_NUMBERS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// The complete game board: the static topology plus per-slot state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Adjacency tables; identical for every board, so not serialized.
    #[serde(skip, default)]
    topology: Topology,
    tiles: Vec<Tile>,
    vertices: Vec<Option<Occupancy>>,
    edges: Vec<Option<PlayerId>>,
}

impl Board {
    /// Generate a standard board: shuffled terrain from the fixed multiset
    /// {wood x4, brick x3, ore x3, grain x4, wool x4, desert x1}, trigger
    /// numbers shuffled onto the non-desert tiles avoiding adjacent 6s and
    /// 8s, robber on the desert.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let topology = Topology::new();

        let mut terrains: Vec<Terrain> = Vec::with_capacity(TILE_COUNT);
        terrains.extend(std::iter::repeat(Terrain::Resource(Resource::Wood)).take(4));
        terrains.extend(std::iter::repeat(Terrain::Resource(Resource::Brick)).take(3));
        terrains.extend(std::iter::repeat(Terrain::Resource(Resource::Ore)).take(3));
        terrains.extend(std::iter::repeat(Terrain::Resource(Resource::Grain)).take(4));
        terrains.extend(std::iter::repeat(Terrain::Resource(Resource::Wool)).take(4));
        terrains.push(Terrain::Desert);
        terrains.shuffle(rng);

        let numbers = assign_numbers(&topology, &terrains, rng);

        let tiles: Vec<Tile> = terrains
            .iter()
            .zip(numbers)
            .map(|(&terrain, number)| Tile {
                terrain,
                number,
                has_robber: terrain == Terrain::Desert,
            })
            .collect();

        Self {
            topology,
            tiles,
            vertices: vec![None; VERTEX_COUNT],
            edges: vec![None; EDGE_COUNT],
        }
    }

    // ==================== Query Methods ====================

    /// The static adjacency tables.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, tile: TileId) -> Option<&Tile> {
        self.tiles.get(tile)
    }

    /// Occupancy of a vertex, if anything is built there.
    pub fn vertex(&self, vertex: VertexId) -> Option<&Occupancy> {
        self.vertices.get(vertex).and_then(|slot| slot.as_ref())
    }

    /// Owner of the road on an edge, if one is built.
    pub fn edge_owner(&self, edge: EdgeId) -> Option<PlayerId> {
        self.edges.get(edge).copied().flatten()
    }

    // ==================== Mutation Methods ====================
    //
    // These trust their callers: placement legality is checked by the build
    // operations in `game`, and writing over an occupied slot would break
    // the forward-only occupancy invariant.

    pub(crate) fn place_settlement(&mut self, vertex: VertexId, owner: PlayerId) {
        debug_assert!(self.vertices[vertex].is_none(), "vertex already occupied");
        self.vertices[vertex] = Some(Occupancy {
            owner,
            is_city: false,
        });
    }

    pub(crate) fn upgrade_to_city(&mut self, vertex: VertexId) {
        debug_assert!(self.vertices[vertex].is_some(), "no settlement to upgrade");
        if let Some(occupancy) = &mut self.vertices[vertex] {
            occupancy.is_city = true;
        }
    }

    pub(crate) fn place_road(&mut self, edge: EdgeId, owner: PlayerId) {
        debug_assert!(self.edges[edge].is_none(), "edge already occupied");
        self.edges[edge] = Some(owner);
    }

    // ==================== Production ====================

    /// Resources produced by a dice total: for every non-robbed tile with a
    /// matching trigger number, each occupied corner earns its owner one unit
    /// of the tile's resource, or two for a city. A vertex touching several
    /// qualifying tiles earns from each independently.
    pub fn production_for_roll(&self, total: u8) -> HashMap<PlayerId, ResourceHand> {
        let mut production: HashMap<PlayerId, ResourceHand> = HashMap::new();

        for (tile_id, tile) in self.tiles.iter().enumerate() {
            if tile.number != Some(total) || tile.has_robber {
                continue;
            }
            let resource = match tile.resource() {
                Some(resource) => resource,
                None => continue,
            };

            for vertex in self.topology.vertices_adjacent_to_tile(tile_id) {
                if let Some(occupancy) = self.vertex(vertex) {
                    let amount = if occupancy.is_city { 2 } else { 1 };
                    production
                        .entry(occupancy.owner)
                        .or_default()
                        .credit(resource, amount);
                }
            }
        }

        production
    }
}

/// Shuffle the trigger numbers onto the non-desert tiles, retrying a bounded
/// number of times to keep 6s and 8s off neighboring tiles. Falls back to an
/// unconstrained shuffle if no valid arrangement turns up.
fn assign_numbers<R: Rng>(
    topology: &Topology,
    terrains: &[Terrain],
    rng: &mut R,
) -> Vec<Option<u8>> {
    const MAX_ATTEMPTS: usize = 100;

    let neighbors = neighboring_tile_pairs(topology);
    let mut pool = TRIGGER_NUMBERS.to_vec();

    for _ in 0..MAX_ATTEMPTS {
        pool.shuffle(rng);
        let assignment = spread_numbers(terrains, &pool);
        if !has_adjacent_red_numbers(&assignment, &neighbors) {
            return assignment;
        }
    }

    pool.shuffle(rng);
    spread_numbers(terrains, &pool)
}

/// Lay the shuffled pool over the tiles in order, skipping the desert.
fn spread_numbers(terrains: &[Terrain], pool: &[u8]) -> Vec<Option<u8>> {
    let mut next = pool.iter().copied();
    terrains
        .iter()
        .map(|terrain| match terrain {
            Terrain::Desert => None,
            Terrain::Resource(_) => {
                Some(next.next().expect("one trigger number per resource tile"))
            }
        })
        .collect()
}

/// True if any two neighboring tiles both carry a high-frequency number
/// (6 or 8).
fn has_adjacent_red_numbers(assignment: &[Option<u8>], neighbors: &[(TileId, TileId)]) -> bool {
    let red = |n: Option<u8>| matches!(n, Some(6 | 8));
    neighbors
        .iter()
        .any(|&(a, b)| red(assignment[a]) && red(assignment[b]))
}

/// All pairs of tiles that border each other (share two vertices).
fn neighboring_tile_pairs(topology: &Topology) -> Vec<(TileId, TileId)> {
    let mut pairs = Vec::new();
    for a in 0..TILE_COUNT {
        let corners: HashSet<VertexId> = topology.vertices_adjacent_to_tile(a).into_iter().collect();
        for b in (a + 1)..TILE_COUNT {
            let shared = topology
                .vertices_adjacent_to_tile(b)
                .iter()
                .filter(|v| corners.contains(v))
                .count();
            if shared == 2 {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        Board::generate(&mut rng)
    }

    /// A board with production silenced everywhere, so tests can stage exact
    /// tile setups.
    fn quiet_board() -> Board {
        let mut board = board(7);
        for tile in &mut board.tiles {
            tile.number = None;
            tile.has_robber = false;
        }
        board
    }

    fn producing_tile(resource: Resource, number: u8) -> Tile {
        Tile {
            terrain: Terrain::Resource(resource),
            number: Some(number),
            has_robber: false,
        }
    }

    #[test]
    fn generated_board_has_standard_terrain_multiset() {
        let board = board(1);
        let count = |wanted: Terrain| board.tiles.iter().filter(|t| t.terrain == wanted).count();

        assert_eq!(board.tiles.len(), TILE_COUNT);
        assert_eq!(count(Terrain::Resource(Resource::Wood)), 4);
        assert_eq!(count(Terrain::Resource(Resource::Brick)), 3);
        assert_eq!(count(Terrain::Resource(Resource::Ore)), 3);
        assert_eq!(count(Terrain::Resource(Resource::Grain)), 4);
        assert_eq!(count(Terrain::Resource(Resource::Wool)), 4);
        assert_eq!(count(Terrain::Desert), 1);
    }

    #[test]
    fn generated_board_has_standard_number_multiset() {
        let board = board(2);
        let mut numbers: Vec<u8> = board.tiles.iter().filter_map(|t| t.number).collect();
        numbers.sort_unstable();

        let mut expected = TRIGGER_NUMBERS.to_vec();
        expected.sort_unstable();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn desert_carries_robber_and_no_number() {
        let board = board(3);
        let desert: Vec<&Tile> = board
            .tiles
            .iter()
            .filter(|t| t.terrain == Terrain::Desert)
            .collect();

        assert_eq!(desert.len(), 1);
        assert!(desert[0].has_robber);
        assert_eq!(desert[0].number, None);

        let robbed = board.tiles.iter().filter(|t| t.has_robber).count();
        assert_eq!(robbed, 1, "robber sits on exactly one tile");
    }

    #[test]
    fn no_adjacent_sixes_and_eights() {
        let neighbors = neighboring_tile_pairs(&Topology::new());
        for seed in 0..10 {
            let board = board(seed);
            let assignment: Vec<Option<u8>> = board.tiles.iter().map(|t| t.number).collect();
            assert!(
                !has_adjacent_red_numbers(&assignment, &neighbors),
                "seed {} placed 6/8 on neighboring tiles",
                seed
            );
        }
    }

    #[test]
    fn settlement_earns_one_from_matching_tile() {
        let mut board = quiet_board();
        board.tiles[0] = producing_tile(Resource::Wood, 8);

        let alice = PlayerId::from_seat(0);
        let corner = board.topology.vertices_adjacent_to_tile(0)[0];
        board.place_settlement(corner, alice);

        let production = board.production_for_roll(8);
        assert_eq!(production.len(), 1);
        assert_eq!(production[&alice].wood, 1);
        assert_eq!(production[&alice].total(), 1);

        // A different total produces nothing.
        assert!(board.production_for_roll(5).is_empty());
    }

    #[test]
    fn city_earns_double() {
        let mut board = quiet_board();
        board.tiles[0] = producing_tile(Resource::Grain, 6);

        let alice = PlayerId::from_seat(0);
        let bob = PlayerId::from_seat(1);
        let corners = board.topology.vertices_adjacent_to_tile(0);
        board.place_settlement(corners[0], alice);
        board.upgrade_to_city(corners[0]);
        board.place_settlement(corners[1], bob);

        let production = board.production_for_roll(6);
        assert_eq!(production[&alice].grain, 2);
        assert_eq!(production[&bob].grain, 1);
    }

    #[test]
    fn robber_suppresses_production() {
        let mut board = quiet_board();
        board.tiles[0] = producing_tile(Resource::Ore, 10);
        board.tiles[0].has_robber = true;

        let alice = PlayerId::from_seat(0);
        let corner = board.topology.vertices_adjacent_to_tile(0)[0];
        board.place_settlement(corner, alice);

        assert!(board.production_for_roll(10).is_empty());
    }

    #[test]
    fn shared_vertex_earns_from_both_tiles() {
        // Tiles 0 and 1 border each other in the fixed layout; a settlement
        // on their shared border collects from both when both trigger.
        let mut board = quiet_board();
        board.tiles[0] = producing_tile(Resource::Wood, 9);
        board.tiles[1] = producing_tile(Resource::Brick, 9);

        let corners0: HashSet<VertexId> =
            board.topology.vertices_adjacent_to_tile(0).into_iter().collect();
        let shared = board
            .topology
            .vertices_adjacent_to_tile(1)
            .into_iter()
            .find(|v| corners0.contains(v))
            .expect("tiles 0 and 1 share a vertex");

        let alice = PlayerId::from_seat(0);
        board.place_settlement(shared, alice);

        let production = board.production_for_roll(9);
        assert_eq!(production[&alice].wood, 1);
        assert_eq!(production[&alice].brick, 1);
    }

    #[test]
    fn edge_occupancy_round_trip() {
        let mut board = quiet_board();
        let alice = PlayerId::from_seat(0);

        assert_eq!(board.edge_owner(0), None);
        board.place_road(0, alice);
        assert_eq!(board.edge_owner(0), Some(alice));
        assert_eq!(board.edge_owner(EDGE_COUNT), None, "out of range reads as empty");
    }
}
