//! Type definitions for `tycoon_core`.
//!
//! The world snapshot, its entities, and the command union sent back to the
//! server. Field names follow the game server's kebab-case JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ShipId);
string_id!(PlanetId);
string_id!(PlayerId);
string_id!(ResourceId);
// Server-side class id ("1" mothership, "3" shipper, ...). Roles are assigned by config.
string_id!(ShipClass);

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

/// A point in the simulation plane. Serialised as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Exact-location check used for "did not move this tick".
    pub fn coincides_with(self, other: Position) -> bool {
        (self.x - other.x).abs() < f64::EPSILON && (self.y - other.y).abs() < f64::EPSILON
    }

    /// Integer grid coordinates, as accepted by move commands.
    pub fn rounded(self) -> [i64; 2] {
        [self.x.round() as i64, self.y.round() as i64]
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// One tick's view of the world. Replaced wholesale every turn.
///
/// Maps are ordered by id; every "first" choice made over them is therefore
/// the lowest id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorldState {
    pub current_tick: CurrentTick,
    pub player_id: PlayerId,
    #[serde(default)]
    pub ships: BTreeMap<ShipId, Ship>,
    #[serde(default)]
    pub planets: BTreeMap<PlanetId, Planet>,
    #[serde(default)]
    pub players: BTreeMap<PlayerId, Player>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CurrentTick {
    pub tick: u64,
    pub season: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ship {
    pub ship_class: ShipClass,
    pub player: PlayerId,
    #[serde(default)]
    pub name: String,
    pub position: Position,
    pub prev_position: Position,
    pub life: i64,
    /// What the server is still executing for this ship, if anything.
    #[serde(default)]
    pub command: Option<Command>,
    #[serde(default, rename = "resources")]
    pub cargo: BTreeMap<ResourceId, CargoLot>,
}

impl Ship {
    pub fn is_free(&self) -> bool {
        self.command.is_none()
    }

    pub fn is_stationary(&self) -> bool {
        self.position.coincides_with(self.prev_position)
    }

    /// Lowest-id resource with a positive amount on board.
    pub fn first_cargo(&self) -> Option<(&ResourceId, i64)> {
        self.cargo
            .iter()
            .find(|(_, lot)| lot.amount > 0)
            .map(|(id, lot)| (id, lot.amount))
    }

    pub fn has_cargo(&self) -> bool {
        self.first_cargo().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CargoLot {
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Planet {
    #[serde(default)]
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub resources: BTreeMap<ResourceId, MarketEntry>,
}

/// A planet's market for one resource. `None` prices mean the planet does not
/// trade that side of the market.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarketEntry {
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub buy_price: Option<i64>,
    #[serde(default)]
    pub sell_price: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Player {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub net_worth: NetWorth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetWorth {
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub resources: i64,
    #[serde(default)]
    pub ships: i64,
    #[serde(default)]
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Command types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    Move {
        destination: Destination,
    },
    Attack {
        target: ShipId,
    },
    /// Positive `amount` buys from `target`, negative sells to it.
    Trade {
        amount: i64,
        resource: ResourceId,
        target: PlanetId,
    },
    Construct {
        #[serde(rename = "ship-class")]
        ship_class: ShipClass,
    },
    Repair,
    Stop,
    Decommission,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Move { .. } => "move",
            Command::Attack { .. } => "attack",
            Command::Trade { .. } => "trade",
            Command::Construct { .. } => "construct",
            Command::Repair => "repair",
            Command::Stop => "stop",
            Command::Decommission => "decommission",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    /// Follow another ship.
    Target(ShipId),
    Coordinates([i64; 2]),
}

/// Exactly one command per ship, keyed by ship id. This is the submit body.
pub type CommandMap = BTreeMap<ShipId, Command>;
