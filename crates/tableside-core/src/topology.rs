//! Board topology: the fixed hex-grid layout and its adjacency tables.
//!
//! The standard board is 19 hexes (center, ring of 6, ring of 12) whose
//! corners and sides are shared between neighbors: 54 settlement vertices and
//! 72 road edges in total. Everything downstream (resource distribution,
//! placement checks) indexes into the dense id tables built here, so this
//! module is the single source of truth for which vertices touch which tiles.
//!
//! Ids are assigned by walking the tiles in the fixed layout order and
//! interning each canonical corner/edge key the first time it appears. The
//! scheme is deterministic: tile 0 owns vertices 0-5 and edges 0-5, and every
//! later tile reuses the ids of corners it shares with already-visited
//! neighbors.

use std::collections::{HashMap, HashSet};

/// Index of a tile in the fixed 19-tile layout.
pub type TileId = usize;
/// Index of a settlement vertex (0..54).
pub type VertexId = usize;
/// Index of a road edge (0..72).
pub type EdgeId = usize;

/// Number of land tiles on the standard board.
pub const TILE_COUNT: usize = 19;
/// Number of settlement vertices on the standard board.
pub const VERTEX_COUNT: usize = 54;
/// Number of road edges on the standard board.
pub const EDGE_COUNT: usize = 72;

/// Axial hex coordinate. `q` increases going east, `r` going southeast; the
/// implicit third coordinate satisfies `q + r + s = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Hex {
    q: i32,
    r: i32,
}

impl Hex {
    const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    fn neighbor(self, side: Side) -> Hex {
        match side {
            Side::NorthEast => Hex::new(self.q + 1, self.r - 1),
            Side::East => Hex::new(self.q + 1, self.r),
            Side::SouthEast => Hex::new(self.q, self.r + 1),
            Side::SouthWest => Hex::new(self.q - 1, self.r + 1),
            Side::West => Hex::new(self.q - 1, self.r),
            Side::NorthWest => Hex::new(self.q, self.r - 1),
        }
    }
}

/// The six sides of a pointy-top hex, clockwise from the top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Side {
    const ALL: [Side; 6] = [
        Side::NorthEast,
        Side::East,
        Side::SouthEast,
        Side::SouthWest,
        Side::West,
        Side::NorthWest,
    ];

    fn opposite(self) -> Side {
        match self {
            Side::NorthEast => Side::SouthWest,
            Side::East => Side::West,
            Side::SouthEast => Side::NorthWest,
            Side::SouthWest => Side::NorthEast,
            Side::West => Side::East,
            Side::NorthWest => Side::SouthEast,
        }
    }
}

/// With pointy-top hexes every vertex of the grid is the north or south pole
/// of exactly one hex, which makes `(hex, pole)` a canonical vertex key with
/// no dedup step needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Pole {
    North,
    South,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CornerKey {
    hex: Hex,
    pole: Pole,
}

impl CornerKey {
    const fn new(hex: Hex, pole: Pole) -> Self {
        Self { hex, pole }
    }
}

/// The six corners of a hex, clockwise from the top. The four east/west
/// corners are the poles of neighboring hexes.
fn corners_of(hex: Hex) -> [CornerKey; 6] {
    [
        CornerKey::new(hex, Pole::North),
        CornerKey::new(hex.neighbor(Side::NorthEast), Pole::South),
        CornerKey::new(hex.neighbor(Side::SouthEast), Pole::North),
        CornerKey::new(hex, Pole::South),
        CornerKey::new(hex.neighbor(Side::SouthWest), Pole::North),
        CornerKey::new(hex.neighbor(Side::NorthWest), Pole::South),
    ]
}

/// Canonical edge key: an edge is shared by exactly two hexes, and we always
/// describe it from the one with the smaller `(q, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    hex: Hex,
    side: Side,
}

impl EdgeKey {
    fn canonical(hex: Hex, side: Side) -> Self {
        let other = hex.neighbor(side);
        if (hex.q, hex.r) <= (other.q, other.r) {
            Self { hex, side }
        } else {
            Self {
                hex: other,
                side: side.opposite(),
            }
        }
    }

    /// The two corners at the ends of this edge, in canonical form.
    fn endpoints(self) -> [CornerKey; 2] {
        let hex = self.hex;
        match self.side {
            Side::NorthEast => [
                CornerKey::new(hex, Pole::North),
                CornerKey::new(hex.neighbor(Side::NorthEast), Pole::South),
            ],
            Side::East => [
                CornerKey::new(hex.neighbor(Side::NorthEast), Pole::South),
                CornerKey::new(hex.neighbor(Side::SouthEast), Pole::North),
            ],
            Side::SouthEast => [
                CornerKey::new(hex.neighbor(Side::SouthEast), Pole::North),
                CornerKey::new(hex, Pole::South),
            ],
            Side::SouthWest => [
                CornerKey::new(hex, Pole::South),
                CornerKey::new(hex.neighbor(Side::SouthWest), Pole::North),
            ],
            Side::West => [
                CornerKey::new(hex.neighbor(Side::SouthWest), Pole::North),
                CornerKey::new(hex.neighbor(Side::NorthWest), Pole::South),
            ],
            Side::NorthWest => [
                CornerKey::new(hex.neighbor(Side::NorthWest), Pole::South),
                CornerKey::new(hex, Pole::North),
            ],
        }
    }
}

/// Tile index -> axial coordinate: center, then ring 1, then ring 2.
const TILE_LAYOUT: [Hex; TILE_COUNT] = [
    Hex::new(0, 0),
    // Ring 1
    Hex::new(1, 0),
    Hex::new(1, -1),
    Hex::new(0, -1),
    Hex::new(-1, 0),
    Hex::new(-1, 1),
    Hex::new(0, 1),
    // Ring 2
    Hex::new(2, 0),
    Hex::new(2, -1),
    Hex::new(2, -2),
    Hex::new(1, -2),
    Hex::new(0, -2),
    Hex::new(-1, -1),
    Hex::new(-2, 0),
    Hex::new(-2, 1),
    Hex::new(-2, 2),
    Hex::new(-1, 2),
    Hex::new(0, 2),
    Hex::new(1, 1),
];

/// The static adjacency tables for the standard board, computed once at
/// construction and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Topology {
    /// The six vertex ids at each tile's corners.
    tile_corners: Vec<[VertexId; 6]>,
    /// The 1-3 tiles touching each vertex.
    vertex_tiles: Vec<Vec<TileId>>,
    /// The two vertex ids at each edge's endpoints.
    edge_endpoints: Vec<[VertexId; 2]>,
}

impl Topology {
    pub fn new() -> Self {
        let mut vertex_ids: HashMap<CornerKey, VertexId> = HashMap::new();
        let mut seen_edges: HashSet<EdgeKey> = HashSet::new();
        let mut tile_corners: Vec<[VertexId; 6]> = Vec::with_capacity(TILE_COUNT);
        let mut vertex_tiles: Vec<Vec<TileId>> = Vec::new();
        let mut edge_endpoints: Vec<[VertexId; 2]> = Vec::new();

        for (tile, &hex) in TILE_LAYOUT.iter().enumerate() {
            let mut ids = [0; 6];
            for (slot, corner) in corners_of(hex).into_iter().enumerate() {
                let next = vertex_ids.len();
                let vertex = *vertex_ids.entry(corner).or_insert(next);
                if vertex == vertex_tiles.len() {
                    vertex_tiles.push(Vec::new());
                }
                vertex_tiles[vertex].push(tile);
                ids[slot] = vertex;
            }
            tile_corners.push(ids);

            // Edge ids are the order in which new canonical keys appear.
            for side in Side::ALL {
                let key = EdgeKey::canonical(hex, side);
                if !seen_edges.insert(key) {
                    continue;
                }
                // Both endpoints are corners of the current tile, so they
                // were interned just above.
                let ends = key.endpoints().map(|c| vertex_ids[&c]);
                edge_endpoints.push(ends);
            }
        }

        debug_assert_eq!(vertex_tiles.len(), VERTEX_COUNT);
        debug_assert_eq!(edge_endpoints.len(), EDGE_COUNT);

        Self {
            tile_corners,
            vertex_tiles,
            edge_endpoints,
        }
    }

    /// The tiles a vertex touches (between 1 on the coast and 3 inland).
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..VERTEX_COUNT`; callers validate
    /// externally supplied indices first.
    pub fn tiles_adjacent_to_vertex(&self, vertex: VertexId) -> &[TileId] {
        &self.vertex_tiles[vertex]
    }

    /// The six vertices at a tile's corners.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not in `0..TILE_COUNT`.
    pub fn vertices_adjacent_to_tile(&self, tile: TileId) -> [VertexId; 6] {
        self.tile_corners[tile]
    }

    /// The two vertices an edge connects.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not in `0..EDGE_COUNT`.
    pub fn vertices_adjacent_to_edge(&self, edge: EdgeId) -> [VertexId; 2] {
        self.edge_endpoints[edge]
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
