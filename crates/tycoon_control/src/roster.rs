//! Defender roster kept across ticks.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tycoon_core::{ShipClass, ShipId, ShipSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defender {
    pub ship_id: ShipId,
    pub ship_class: ShipClass,
    /// Highest health seen for this ship; damage is measured against it.
    pub max_health: i64,
    pub attacking: bool,
}

/// Bounded list of adopted defenders, in adoption order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    defenders: SmallVec<[Defender; 4]>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.defenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defenders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Defender> {
        self.defenders.iter()
    }

    pub fn contains(&self, ship_id: &ShipId) -> bool {
        self.defenders.iter().any(|d| d.ship_id == *ship_id)
    }

    pub fn any_attacking(&self) -> bool {
        self.defenders.iter().any(|d| d.attacking)
    }

    pub fn set_attacking(&mut self, attacking: bool) {
        for defender in &mut self.defenders {
            defender.attacking = attacking;
        }
    }

    /// Drops defenders whose ship is gone and refreshes health baselines.
    /// Returns the ids that were dropped.
    pub fn prune(&mut self, fighters: &ShipSet<'_>) -> Vec<ShipId> {
        let mut dropped = Vec::new();
        self.defenders.retain(|defender| match fighters.get(&defender.ship_id) {
            Some(ship) => {
                defender.max_health = defender.max_health.max(ship.life);
                true
            }
            None => {
                dropped.push(defender.ship_id.clone());
                false
            }
        });
        dropped
    }

    /// Adopts unassigned fighters in id order until `quota` is reached.
    /// Returns the ids adopted.
    pub fn adopt(&mut self, fighters: &ShipSet<'_>, quota: usize) -> Vec<ShipId> {
        let mut adopted = Vec::new();
        for (id, ship) in fighters {
            if self.defenders.len() >= quota {
                break;
            }
            if self.contains(id) {
                continue;
            }
            self.defenders.push(Defender {
                ship_id: (*id).clone(),
                ship_class: ship.ship_class.clone(),
                max_health: ship.life,
                attacking: false,
            });
            adopted.push((*id).clone());
        }
        adopted
    }

    /// Trims the roster down to `quota`, newest adoptions first.
    pub fn truncate(&mut self, quota: usize) {
        self.defenders.truncate(quota);
    }
}
