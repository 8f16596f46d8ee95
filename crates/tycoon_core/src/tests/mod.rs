use super::*;
use crate::test_fixtures::{
    add_planet, add_ship, base_world, planet, ship, with_cargo, with_market, BOMBER, CAPITAL,
    ENEMY, FIGHTER, ME, TRADER,
};

mod world;

// --- Shared test helpers ------------------------------------------------

fn ids(set: &ShipSet<'_>) -> Vec<String> {
    set.keys().map(|id| id.0.clone()).collect()
}

fn class(id: &str) -> ShipClass {
    ShipClass::new(id)
}
