//! Shared test fixtures for tycoon_core and downstream crates.
//!
//! `base_world()` is an empty snapshot owned by `ME` with both players
//! registered. The builders add ships and planets with the reference
//! server's class ids.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    CargoLot, CurrentTick, MarketEntry, NetWorth, Planet, PlanetId, Player, PlayerId, Position,
    ResourceId, Ship, ShipClass, ShipId, WorldState,
};

pub const ME: &str = "player_me";
pub const ENEMY: &str = "player_enemy";

pub const CAPITAL: &str = "1";
pub const TRADER: &str = "3";
pub const FIGHTER: &str = "4";
pub const BOMBER: &str = "5";

pub fn base_world() -> WorldState {
    WorldState {
        current_tick: CurrentTick { tick: 0, season: 1 },
        player_id: PlayerId::new(ME),
        ships: BTreeMap::new(),
        planets: BTreeMap::new(),
        players: BTreeMap::from([
            (PlayerId::new(ME), player("me")),
            (PlayerId::new(ENEMY), player("enemy")),
        ]),
    }
}

fn player(name: &str) -> Player {
    Player {
        name: name.to_string(),
        net_worth: NetWorth {
            money: 1_000_000,
            ..NetWorth::default()
        },
    }
}

/// A stationary ship with full health and no command or cargo.
pub fn ship(class: &str, owner: &str, x: f64, y: f64) -> Ship {
    Ship {
        ship_class: ShipClass::new(class),
        player: PlayerId::new(owner),
        name: format!("{owner}-{class}"),
        position: Position::new(x, y),
        prev_position: Position::new(x, y),
        life: 1000,
        command: None,
        cargo: BTreeMap::new(),
    }
}

pub fn with_cargo(mut ship: Ship, resource: &str, amount: i64) -> Ship {
    ship.cargo
        .insert(ResourceId::new(resource), CargoLot { amount });
    ship
}

pub fn add_ship(world: &mut WorldState, id: &str, ship: Ship) -> ShipId {
    let id = ShipId::new(id);
    world.ships.insert(id.clone(), ship);
    id
}

pub fn planet(x: f64, y: f64) -> Planet {
    Planet {
        name: format!("planet@{x},{y}"),
        position: Position::new(x, y),
        resources: BTreeMap::new(),
    }
}

/// Adds a market line to `planet`.
pub fn with_market(
    mut planet: Planet,
    resource: &str,
    amount: i64,
    buy_price: Option<i64>,
    sell_price: Option<i64>,
) -> Planet {
    planet.resources.insert(
        ResourceId::new(resource),
        MarketEntry {
            amount,
            buy_price,
            sell_price,
        },
    );
    planet
}

pub fn add_planet(world: &mut WorldState, id: &str, planet: Planet) -> PlanetId {
    let id = PlanetId::new(id);
    world.planets.insert(id.clone(), planet);
    id
}

pub fn make_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// `count` ships of random class and owner scattered over a 1000×1000 box.
pub fn random_world(rng: &mut impl Rng, count: usize) -> WorldState {
    const CLASSES: [&str; 4] = [CAPITAL, TRADER, FIGHTER, BOMBER];
    const OWNERS: [&str; 3] = [ME, ENEMY, "player_third"];
    let mut world = base_world();
    for n in 0..count {
        let class = CLASSES[rng.gen_range(0..CLASSES.len())];
        let owner = OWNERS[rng.gen_range(0..OWNERS.len())];
        let x = rng.gen_range(-500.0..500.0);
        let y = rng.gen_range(-500.0..500.0);
        add_ship(&mut world, &format!("ship_{n:04}"), ship(class, owner, x, y));
    }
    world
}
