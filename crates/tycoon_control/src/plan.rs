//! Per-tick command aggregation with an explicit write order.

use std::collections::BTreeMap;

use tycoon_core::{Command, CommandMap, ShipId};

/// Who is writing a command. Later variants outrank earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Trade routes and decommissioning.
    Economy,
    /// Optional regroup moves after a fight.
    Formation,
    /// Construct and repair orders.
    Fleet,
    /// Engage and escalate orders.
    Combat,
}

/// Collects one command per ship. A write is dropped if a higher-priority
/// write for the same ship already exists; equal priority replaces.
#[derive(Debug, Default)]
pub struct CommandPlan {
    entries: BTreeMap<ShipId, (Priority, Command)>,
}

impl CommandPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the write took effect.
    pub fn assign(&mut self, ship: &ShipId, command: Command, priority: Priority) -> bool {
        if let Some((existing, _)) = self.entries.get(ship) {
            if *existing > priority {
                return false;
            }
        }
        self.entries.insert(ship.clone(), (priority, command));
        true
    }

    pub fn get(&self, ship: &ShipId) -> Option<&Command> {
        self.entries.get(ship).map(|(_, command)| command)
    }

    pub fn contains(&self, ship: &ShipId) -> bool {
        self.entries.contains_key(ship)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_commands(self) -> CommandMap {
        self.entries
            .into_iter()
            .map(|(ship, (_, command))| (ship, command))
            .collect()
    }
}
