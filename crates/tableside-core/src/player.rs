//! Player state and resource management.
//!
//! This module contains:
//! - `PlayerId` and the `player_<ordinal>` wire format
//! - `ResourceHand` for per-kind resource counts
//! - Development card types and the standard deck
//! - The fixed building cost table
//! - The `Player` record with its roll history and bookkeeping counters

use crate::board::Resource;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A player's seat at the table. Internally a dense index into the player
/// list; on the wire it reads and writes as the id string `player_<ordinal>`
/// with a 1-based ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(u8);

impl PlayerId {
    pub(crate) fn from_seat(seat: usize) -> Self {
        Self(seat as u8)
    }

    /// Zero-based index into the seating order.
    pub fn seat(self) -> usize {
        self.0 as usize
    }

    /// Parse a wire id like `player_2`. Returns `None` for anything else.
    pub fn parse(id: &str) -> Option<Self> {
        let ordinal: u8 = id.strip_prefix("player_")?.parse().ok()?;
        if ordinal == 0 {
            return None;
        }
        Some(Self(ordinal - 1))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player_{}", self.0 + 1)
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        PlayerId::parse(&id).ok_or_else(|| D::Error::custom(format!("invalid player id `{id}`")))
    }
}

/// Development card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevelopmentCard {
    /// Counts toward the knights-played tally when played (not in this scope)
    Knight,
    /// Worth 1 VP, scored immediately on purchase
    VictoryPoint,
    RoadBuilding,
    YearOfPlenty,
    Monopoly,
}

impl DevelopmentCard {
    /// The standard 25-card draw pile, unshuffled.
    pub fn standard_deck() -> Vec<DevelopmentCard> {
        let mut deck = Vec::with_capacity(25);
        deck.extend(std::iter::repeat(DevelopmentCard::Knight).take(14));
        deck.extend(std::iter::repeat(DevelopmentCard::VictoryPoint).take(5));
        deck.extend(std::iter::repeat(DevelopmentCard::RoadBuilding).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::YearOfPlenty).take(2));
        deck.extend(std::iter::repeat(DevelopmentCard::Monopoly).take(2));
        deck
    }
}

/// Per-kind resource counts. Counts never go negative: `debit` is only legal
/// after a `can_afford` check, and a failing debit is an engine bug rather
/// than a rule violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub brick: u32,
    pub ore: u32,
    pub grain: u32,
    pub wool: u32,
}

impl ResourceHand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amounts(wood: u32, brick: u32, ore: u32, grain: u32, wool: u32) -> Self {
        Self {
            wood,
            brick,
            ore,
            grain,
            wool,
        }
    }

    /// Total number of resource cards held.
    pub fn total(&self) -> u32 {
        self.wood + self.brick + self.ore + self.grain + self.wool
    }

    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Ore => self.ore,
            Resource::Grain => self.grain,
            Resource::Wool => self.wool,
        }
    }

    pub fn credit(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Wood => self.wood += amount,
            Resource::Brick => self.brick += amount,
            Resource::Ore => self.ore += amount,
            Resource::Grain => self.grain += amount,
            Resource::Wool => self.wool += amount,
        }
    }

    /// Add every count from another hand.
    pub fn credit_all(&mut self, other: &ResourceHand) {
        self.wood += other.wood;
        self.brick += other.brick;
        self.ore += other.ore;
        self.grain += other.grain;
        self.wool += other.wool;
    }

    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.wood >= cost.wood
            && self.brick >= cost.brick
            && self.ore >= cost.ore
            && self.grain >= cost.grain
            && self.wool >= cost.wool
    }

    /// Deduct a cost. The caller must have checked `can_afford` first; a
    /// shortfall here is an internal-consistency fault.
    pub fn debit(&mut self, cost: &ResourceHand) {
        assert!(self.can_afford(cost), "debit exceeds resource counts");
        self.wood -= cost.wood;
        self.brick -= cost.brick;
        self.ore -= cost.ore;
        self.grain -= cost.grain;
        self.wool -= cost.wool;
    }
}

/// The fixed build cost table.
pub mod costs {
    use super::ResourceHand;

    /// Road: 1 wood + 1 brick
    pub fn road() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 0, 0)
    }

    /// Settlement: 1 wood + 1 brick + 1 grain + 1 wool
    pub fn settlement() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 1, 1)
    }

    /// City upgrade: 3 ore + 2 grain
    pub fn city() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 3, 2, 0)
    }

    /// Development card: 1 ore + 1 grain + 1 wool
    pub fn development_card() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 1, 1, 1)
    }
}

/// One recorded dice roll: the two-die total and the turn it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub roll: u8,
    pub turn: u32,
}

/// A single player's state.
///
/// `knights_played` and `longest_road` are bookkeeping only: nothing in this
/// crate updates them, but they stay in the model so award tracking can
/// attach later without a schema change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub resources: ResourceHand,
    pub development_cards: Vec<DevelopmentCard>,
    pub knights_played: u32,
    pub longest_road: u32,
    pub victory_points: u32,
    pub rolls: Vec<RollRecord>,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            resources: ResourceHand::new(),
            development_cards: Vec::new(),
            knights_played: 0,
            longest_road: 0,
            victory_points: 0,
            rolls: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn player_id_wire_format() {
        let id = PlayerId::from_seat(0);
        assert_eq!(id.to_string(), "player_1");
        assert_eq!(PlayerId::parse("player_1"), Some(id));
        assert_eq!(PlayerId::parse("player_3"), Some(PlayerId::from_seat(2)));

        assert_eq!(PlayerId::parse("player_0"), None);
        assert_eq!(PlayerId::parse("player_"), None);
        assert_eq!(PlayerId::parse("spectator_1"), None);
    }

    #[test]
    fn player_id_serializes_as_string() {
        let json = serde_json::to_string(&PlayerId::from_seat(1)).unwrap();
        assert_eq!(json, "\"player_2\"");

        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId::from_seat(1));
    }

    #[test]
    fn hand_totals_and_lookup() {
        let hand = ResourceHand::with_amounts(1, 2, 3, 4, 5);
        assert_eq!(hand.total(), 15);
        assert_eq!(hand.get(Resource::Wood), 1);
        assert_eq!(hand.get(Resource::Wool), 5);
    }

    #[test]
    fn hand_can_afford_and_debit() {
        let mut hand = ResourceHand::with_amounts(2, 2, 2, 2, 2);
        let cost = ResourceHand::with_amounts(1, 1, 0, 0, 0);
        assert!(hand.can_afford(&cost));

        hand.debit(&cost);
        assert_eq!(hand, ResourceHand::with_amounts(1, 1, 2, 2, 2));

        assert!(!hand.can_afford(&ResourceHand::with_amounts(2, 0, 0, 0, 0)));
    }

    #[test]
    #[should_panic(expected = "debit exceeds resource counts")]
    fn unchecked_debit_is_fatal() {
        let mut hand = ResourceHand::new();
        hand.debit(&costs::road());
    }

    #[test]
    fn cost_table_matches_rules() {
        assert_eq!(costs::road(), ResourceHand::with_amounts(1, 1, 0, 0, 0));
        assert_eq!(costs::settlement(), ResourceHand::with_amounts(1, 1, 0, 1, 1));
        assert_eq!(costs::city(), ResourceHand::with_amounts(0, 0, 3, 2, 0));
        assert_eq!(
            costs::development_card(),
            ResourceHand::with_amounts(0, 0, 1, 1, 1)
        );
    }

    #[test]
    fn standard_deck_composition() {
        let deck = DevelopmentCard::standard_deck();
        assert_eq!(deck.len(), 25);

        let count = |kind: DevelopmentCard| deck.iter().filter(|c| **c == kind).count();
        assert_eq!(count(DevelopmentCard::Knight), 14);
        assert_eq!(count(DevelopmentCard::VictoryPoint), 5);
        assert_eq!(count(DevelopmentCard::RoadBuilding), 2);
        assert_eq!(count(DevelopmentCard::YearOfPlenty), 2);
        assert_eq!(count(DevelopmentCard::Monopoly), 2);
    }

    #[test]
    fn new_player_starts_empty() {
        let player = Player::new(PlayerId::from_seat(0), "Alice".to_string());
        assert_eq!(player.resources.total(), 0);
        assert!(player.development_cards.is_empty());
        assert_eq!(player.victory_points, 0);
        assert!(player.rolls.is_empty());
    }
}
