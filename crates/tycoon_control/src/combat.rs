//! Home-defense state machine.
//!
//! The capital engages intruders at long range while defenders regroup on
//! it; defenders commit directly once a threat is inside engage range. A
//! higher-priority threat in engage range pulls the fight over to itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tycoon_core::{
    scan, Command, Destination, Position, Ship, ShipId, ShipSet, WorldView,
};

use crate::plan::{CommandPlan, Priority};
use crate::roster::Roster;
use crate::StrategyParams;

/// The enemy we are currently fighting, with its last-seen snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementTarget {
    pub ship_id: ShipId,
    pub ship: Ship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    Idle,
    /// Target chosen, defenders still regrouping.
    Engaged,
    /// Target chosen and at least one defender attacking it.
    Escalated,
}

/// Enemies around the capital this tick. `targets` is always a subset of
/// `intruders`.
#[derive(Debug, Default)]
pub struct Threats<'a> {
    pub intruders: ShipSet<'a>,
    pub targets: ShipSet<'a>,
}

impl<'a> Threats<'a> {
    pub fn assess(view: &WorldView<'a>, center: Position, params: &StrategyParams) -> Self {
        let filter = params.scan_filter();
        let enemies = view.enemy_ships(None, None);
        let intruders = scan(center, params.home_radius, &enemies, &filter);
        let targets = scan(center, params.engage_radius, &intruders, &filter);
        Self { intruders, targets }
    }
}

/// Cross-tick combat memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatState {
    pub engagement: Option<EngagementTarget>,
}

impl CombatState {
    pub fn phase(&self, roster: &Roster) -> CombatPhase {
        match (&self.engagement, roster.any_attacking()) {
            (None, _) => CombatPhase::Idle,
            (Some(_), false) => CombatPhase::Engaged,
            (Some(_), true) => CombatPhase::Escalated,
        }
    }

    pub fn target_id(&self) -> Option<&ShipId> {
        self.engagement.as_ref().map(|e| &e.ship_id)
    }

    fn engage(&mut self, ship_id: &ShipId, ship: &Ship) {
        self.engagement = Some(EngagementTarget {
            ship_id: ship_id.clone(),
            ship: ship.clone(),
        });
    }
}

/// One tick of the combat state machine.
pub struct CombatController<'p> {
    params: &'p StrategyParams,
}

impl<'p> CombatController<'p> {
    pub fn new(params: &'p StrategyParams) -> Self {
        Self { params }
    }

    /// Runs the transition rules in their fixed order and writes the
    /// resulting orders into `plan`.
    ///
    /// `rally_point`, when given, is where the fleet regroups once every
    /// intruder is gone.
    pub fn step(
        &self,
        state: &mut CombatState,
        roster: &mut Roster,
        capital_id: &ShipId,
        threats: &Threats<'_>,
        rally_point: Option<Position>,
        plan: &mut CommandPlan,
    ) -> CombatPhase {
        // Stale target: it left home range or was destroyed.
        if let Some(target) = state.target_id() {
            if !threats.intruders.contains_key(target) {
                debug!(target = %target, "engagement target gone");
                state.engagement = None;
                roster.set_attacking(false);
            }
        }

        if threats.intruders.is_empty() {
            self.disengage(state, roster, capital_id, rally_point, plan);
            return state.phase(roster);
        }

        let any_attacking = roster.any_attacking();

        if !any_attacking {
            if let Some((id, ship)) = threats.intruders.iter().next() {
                state.engage(id, ship);
                info!(target = %id, class = %ship.ship_class, "intruder detected, capital engaging");
                initiate_fleet_attack(roster, capital_id, id, plan);
            }
        }

        if any_attacking && !threats.targets.is_empty() {
            self.preempt(state, roster, threats, plan);
        }

        if state.engagement.is_some() && !any_attacking {
            if let Some((id, ship)) = threats.targets.iter().next() {
                state.engage(id, ship);
                info!(target = %id, "target in engage range, defenders committing");
                initiate_fighters_attack(roster, id, plan);
            }
        }

        state.phase(roster)
    }

    fn disengage(
        &self,
        state: &mut CombatState,
        roster: &mut Roster,
        capital_id: &ShipId,
        rally_point: Option<Position>,
        plan: &mut CommandPlan,
    ) {
        if state.engagement.is_some() || roster.any_attacking() {
            info!("no intruders left, disengaging");
        }
        roster.set_attacking(false);
        state.engagement = None;

        if !self.params.regroup_on_disengage {
            return;
        }
        let Some(point) = rally_point else {
            return;
        };
        plan.assign(
            capital_id,
            Command::Move {
                destination: Destination::Coordinates(point.rounded()),
            },
            Priority::Formation,
        );
        for defender in roster.iter() {
            plan.assign(
                &defender.ship_id,
                follow(capital_id),
                Priority::Formation,
            );
        }
    }

    /// Switches to a strictly more urgent class in engage range, if any.
    fn preempt(
        &self,
        state: &mut CombatState,
        roster: &mut Roster,
        threats: &Threats<'_>,
        plan: &mut CommandPlan,
    ) {
        let Some(current) = &state.engagement else {
            return;
        };
        let Some(current_rank) = self.params.priority_of(&current.ship.ship_class) else {
            return;
        };
        let better = threats.targets.iter().find(|(_, ship)| {
            self.params
                .priority_of(&ship.ship_class)
                .is_some_and(|rank| rank < current_rank)
        });
        if let Some((id, ship)) = better {
            info!(
                from = %current.ship_id,
                to = %id,
                class = %ship.ship_class,
                "higher-priority target in range, switching"
            );
            state.engage(id, ship);
            initiate_fighters_attack(roster, id, plan);
        }
    }
}

fn follow(ship_id: &ShipId) -> Command {
    Command::Move {
        destination: Destination::Target(ship_id.clone()),
    }
}

/// Capital attacks; defenders regroup on the capital first.
fn initiate_fleet_attack(
    roster: &Roster,
    capital_id: &ShipId,
    target: &ShipId,
    plan: &mut CommandPlan,
) {
    plan.assign(
        capital_id,
        Command::Attack {
            target: target.clone(),
        },
        Priority::Combat,
    );
    for defender in roster.iter() {
        plan.assign(&defender.ship_id, follow(capital_id), Priority::Combat);
    }
}

/// Every defender attacks `target` directly. The capital's order is left alone.
fn initiate_fighters_attack(roster: &mut Roster, target: &ShipId, plan: &mut CommandPlan) {
    for defender in roster.iter() {
        plan.assign(
            &defender.ship_id,
            Command::Attack {
                target: target.clone(),
            },
            Priority::Combat,
        );
    }
    roster.set_attacking(true);
}
