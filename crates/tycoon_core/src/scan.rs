//! Radius scan over candidate ships.

use ahash::AHashSet;

use crate::{distance, PlayerId, Position, ShipClass, ShipSet};

/// Classes and owners a scan ignores regardless of range.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    exclude_classes: AHashSet<ShipClass>,
    exclude_players: AHashSet<PlayerId>,
}

impl ScanFilter {
    pub fn new(
        exclude_classes: impl IntoIterator<Item = ShipClass>,
        exclude_players: impl IntoIterator<Item = PlayerId>,
    ) -> Self {
        Self {
            exclude_classes: exclude_classes.into_iter().collect(),
            exclude_players: exclude_players.into_iter().collect(),
        }
    }

    pub fn admits_class(&self, class: &ShipClass) -> bool {
        !self.exclude_classes.contains(class)
    }

    pub fn admits_player(&self, player: &PlayerId) -> bool {
        !self.exclude_players.contains(player)
    }
}

/// Candidates within `radius` (inclusive) of `center` that pass `filter`.
///
/// The result keeps the candidates' id order, so "first" in the result is
/// the lowest qualifying id.
pub fn scan<'a>(
    center: Position,
    radius: f64,
    candidates: &ShipSet<'a>,
    filter: &ScanFilter,
) -> ShipSet<'a> {
    candidates
        .iter()
        .filter(|(_, ship)| filter.admits_class(&ship.ship_class))
        .filter(|(_, ship)| filter.admits_player(&ship.player))
        .filter(|(_, ship)| distance(center, ship.position) <= radius)
        .map(|(id, ship)| (*id, *ship))
        .collect()
}
