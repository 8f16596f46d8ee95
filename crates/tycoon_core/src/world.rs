//! Read-only queries over a `WorldState` snapshot.

use std::collections::BTreeMap;

use crate::{centroid, PlayerId, Position, Ship, ShipClass, ShipId, WorldState};

/// A borrowed, id-ordered subset of the snapshot's ships.
pub type ShipSet<'a> = BTreeMap<&'a ShipId, &'a Ship>;

#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    world: &'a WorldState,
}

impl<'a> WorldView<'a> {
    pub fn new(world: &'a WorldState) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &'a WorldState {
        self.world
    }

    pub fn me(&self) -> &'a PlayerId {
        &self.world.player_id
    }

    pub fn tick(&self) -> u64 {
        self.world.current_tick.tick
    }

    /// Ships matching every given filter. `None` filters match anything;
    /// `free_only` keeps ships with no in-flight command.
    pub fn ships(
        &self,
        owner: Option<&PlayerId>,
        class: Option<&ShipClass>,
        free_only: bool,
    ) -> ShipSet<'a> {
        self.world
            .ships
            .iter()
            .filter(|(_, ship)| owner.is_none_or(|o| ship.player == *o))
            .filter(|(_, ship)| class.is_none_or(|c| ship.ship_class == *c))
            .filter(|(_, ship)| !free_only || ship.is_free())
            .collect()
    }

    /// Our own ships of `class`.
    pub fn own_ships(&self, class: &ShipClass, free_only: bool) -> ShipSet<'a> {
        self.ships(Some(self.me()), Some(class), free_only)
    }

    /// Enemy ships. With no `owner` filter "enemy" means anyone but us; with
    /// one it means exactly that player.
    pub fn enemy_ships(&self, class: Option<&ShipClass>, owner: Option<&PlayerId>) -> ShipSet<'a> {
        let me = self.me();
        self.world
            .ships
            .iter()
            .filter(|(_, ship)| class.is_none_or(|c| ship.ship_class == *c))
            .filter(|(_, ship)| match owner {
                Some(o) => ship.player == *o,
                None => ship.player != *me,
            })
            .collect()
    }

    /// Our capital ship, lowest id first if the server ever reports several.
    pub fn capital(&self, capital_class: &ShipClass) -> Option<(&'a ShipId, &'a Ship)> {
        let me = self.me();
        self.world
            .ships
            .iter()
            .find(|(_, ship)| ship.player == *me && ship.ship_class == *capital_class)
    }

    pub fn centroid_of(ships: &ShipSet<'_>) -> Option<Position> {
        centroid(ships.values().map(|ship| ship.position))
    }
}
