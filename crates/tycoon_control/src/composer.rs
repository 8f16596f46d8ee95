//! Keeps the defender roster at quota and the fleet repaired.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tycoon_core::{Command, Ship, ShipId, ShipSet};

use crate::plan::{CommandPlan, Priority};
use crate::roster::Roster;
use crate::StrategyParams;

/// Cross-tick fleet bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposerState {
    pub last_capital_repair: Option<u64>,
    /// Latches once the roster has been full; never resets within a season.
    pub build_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposerReport {
    /// Roster still under quota after adoption.
    pub still_building: bool,
    pub construct_issued: bool,
    pub repairs_issued: usize,
}

pub struct FleetComposer<'p> {
    params: &'p StrategyParams,
}

impl<'p> FleetComposer<'p> {
    pub fn new(params: &'p StrategyParams) -> Self {
        Self { params }
    }

    /// Prunes vanished defenders, then adopts unassigned fighters of the
    /// watched class up to quota.
    pub fn reconcile_roster(
        &self,
        state: &mut ComposerState,
        roster: &mut Roster,
        fighters: &ShipSet<'_>,
    ) {
        let quota = self.params.defender_quota;
        for id in roster.prune(fighters) {
            info!(defender = %id, "defender lost, dropped from roster");
        }
        roster.truncate(quota);
        for id in roster.adopt(fighters, quota) {
            info!(defender = %id, "defender adopted into roster");
        }
        if roster.len() >= quota {
            state.build_finished = true;
        }
    }

    /// Construct and repair orders for this tick.
    pub fn issue_orders(
        &self,
        state: &mut ComposerState,
        roster: &Roster,
        capital: Option<(&ShipId, &Ship)>,
        fighters: &ShipSet<'_>,
        tick: u64,
        plan: &mut CommandPlan,
    ) -> ComposerReport {
        let mut report = ComposerReport {
            still_building: roster.len() < self.params.defender_quota,
            ..ComposerReport::default()
        };

        if let Some((capital_id, capital)) = capital {
            // A repairing capital cannot build in the same tick.
            if self.repair_capital(state, capital_id, capital, tick, plan) {
                report.repairs_issued += 1;
            } else if report.still_building {
                report.construct_issued = self.order_construct(capital_id, capital, plan);
            }
        }

        for defender in roster.iter() {
            let Some(ship) = fighters.get(&defender.ship_id) else {
                continue;
            };
            if ship.life <= defender.max_health - self.params.defender_damage_threshold
                && plan.assign(&defender.ship_id, Command::Repair, Priority::Fleet)
            {
                debug!(defender = %defender.ship_id, life = ship.life, "defender repair");
                report.repairs_issued += 1;
            }
        }

        report
    }

    /// Only an idle capital builds; an attack, move or construct already in
    /// flight is left alone.
    fn order_construct(&self, capital_id: &ShipId, capital: &Ship, plan: &mut CommandPlan) -> bool {
        if capital.command.is_some() {
            return false;
        }
        let accepted = plan.assign(
            capital_id,
            Command::Construct {
                ship_class: self.params.classes.defender.clone(),
            },
            Priority::Fleet,
        );
        if accepted {
            debug!(class = %self.params.classes.defender, "constructing defender");
        }
        accepted
    }

    /// Repairs the capital when low, at most once per cooldown window. The
    /// cooldown only starts when the order actually lands in the plan.
    fn repair_capital(
        &self,
        state: &mut ComposerState,
        capital_id: &ShipId,
        capital: &Ship,
        tick: u64,
        plan: &mut CommandPlan,
    ) -> bool {
        if capital.life > self.params.capital_repair_health {
            return false;
        }
        let cooled_down = state
            .last_capital_repair
            .is_none_or(|last| tick.saturating_sub(last) >= self.params.repair_cooldown_ticks);
        if !cooled_down {
            return false;
        }
        if !plan.assign(capital_id, Command::Repair, Priority::Fleet) {
            return false;
        }
        info!(life = capital.life, tick, "capital repair");
        state.last_capital_repair = Some(tick);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tycoon_core::test_fixtures::{add_ship, base_world, ship, BOMBER, CAPITAL, ENEMY, FIGHTER, ME};
    use tycoon_core::{WorldState, WorldView};

    fn fighters(world: &WorldState) -> ShipSet<'_> {
        WorldView::new(world).own_ships(&tycoon_core::ShipClass::new(BOMBER), false)
    }

    #[test]
    fn test_roster_never_exceeds_quota() {
        let mut world = base_world();
        for n in 0..5 {
            add_ship(&mut world, &format!("d{n}"), ship(BOMBER, ME, 0.0, 0.0));
        }
        add_ship(&mut world, "other_class", ship(FIGHTER, ME, 0.0, 0.0));
        add_ship(&mut world, "enemy_bomber", ship(BOMBER, ENEMY, 0.0, 0.0));
        let params = StrategyParams {
            defender_quota: 3,
            ..StrategyParams::default()
        };
        let mut state = ComposerState::default();
        let mut roster = Roster::default();

        FleetComposer::new(&params).reconcile_roster(&mut state, &mut roster, &fighters(&world));

        assert!(state.build_finished);
        let ids: Vec<&str> = roster.iter().map(|d| d.ship_id.0.as_str()).collect();
        assert_eq!(ids, ["d0", "d1", "d2"]);
    }

    #[test]
    fn test_destroyed_defender_is_replaced() {
        let mut world = base_world();
        add_ship(&mut world, "d1", ship(BOMBER, ME, 0.0, 0.0));
        add_ship(&mut world, "d2", ship(BOMBER, ME, 0.0, 0.0));
        let params = StrategyParams::default();
        let composer = FleetComposer::new(&params);
        let mut state = ComposerState::default();
        let mut roster = Roster::default();
        composer.reconcile_roster(&mut state, &mut roster, &fighters(&world));

        world.ships.remove(&ShipId::new("d1"));
        add_ship(&mut world, "d3", ship(BOMBER, ME, 0.0, 0.0));
        composer.reconcile_roster(&mut state, &mut roster, &fighters(&world));

        assert_eq!(roster.len(), 2);
        assert!(!roster.contains(&ShipId::new("d1")));
        assert!(roster.contains(&ShipId::new("d2")));
        assert!(roster.contains(&ShipId::new("d3")));
    }

    #[test]
    fn test_damaged_defender_repaired() {
        let mut world = base_world();
        add_ship(&mut world, "d1", ship(BOMBER, ME, 0.0, 0.0));
        add_ship(&mut world, "d2", ship(BOMBER, ME, 0.0, 0.0));
        let params = StrategyParams::default();
        let composer = FleetComposer::new(&params);
        let mut state = ComposerState::default();
        let mut roster = Roster::default();
        composer.reconcile_roster(&mut state, &mut roster, &fighters(&world));

        // Baseline 1000, threshold 200: 800 repairs, 801 does not.
        world.ships.get_mut(&ShipId::new("d1")).unwrap().life = 800;
        world.ships.get_mut(&ShipId::new("d2")).unwrap().life = 801;
        let mut plan = CommandPlan::new();
        let report = composer.issue_orders(&mut state, &roster, None, &fighters(&world), 1, &mut plan);

        assert_eq!(report.repairs_issued, 1);
        assert_eq!(plan.get(&ShipId::new("d1")), Some(&Command::Repair));
        assert!(!plan.contains(&ShipId::new("d2")));
    }

    #[test]
    fn test_no_duplicate_construct_while_building() {
        let mut world = base_world();
        let mut capital = ship(CAPITAL, ME, 0.0, 0.0);
        capital.command = Some(Command::Construct {
            ship_class: tycoon_core::ShipClass::new(BOMBER),
        });
        let capital_id = add_ship(&mut world, "cap", capital);
        let params = StrategyParams::default();
        let composer = FleetComposer::new(&params);
        let mut state = ComposerState::default();
        let roster = Roster::default();
        let mut plan = CommandPlan::new();

        let report = composer.issue_orders(
            &mut state,
            &roster,
            Some((&capital_id, &world.ships[&capital_id])),
            &fighters(&world),
            0,
            &mut plan,
        );

        assert!(report.still_building);
        assert!(!report.construct_issued);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_busy_capital_does_not_construct() {
        let mut world = base_world();
        let mut capital = ship(CAPITAL, ME, 0.0, 0.0);
        capital.command = Some(Command::Attack {
            target: ShipId::new("raider"),
        });
        let capital_id = add_ship(&mut world, "cap", capital);
        let params = StrategyParams::default();
        let composer = FleetComposer::new(&params);
        let mut state = ComposerState::default();
        let mut plan = CommandPlan::new();

        let report = composer.issue_orders(
            &mut state,
            &Roster::default(),
            Some((&capital_id, &world.ships[&capital_id])),
            &fighters(&world),
            0,
            &mut plan,
        );

        assert!(report.still_building);
        assert!(!report.construct_issued);
        assert!(!plan.contains(&capital_id));
    }

    #[test]
    fn test_capital_repair_blocked_by_combat_does_not_start_cooldown() {
        let mut world = base_world();
        let mut capital = ship(CAPITAL, ME, 0.0, 0.0);
        capital.life = 100;
        let capital_id = add_ship(&mut world, "cap", capital);
        let params = StrategyParams::default();
        let composer = FleetComposer::new(&params);
        let mut state = ComposerState::default();
        let mut plan = CommandPlan::new();
        plan.assign(
            &capital_id,
            Command::Attack {
                target: ShipId::new("enemy"),
            },
            Priority::Combat,
        );

        composer.issue_orders(
            &mut state,
            &Roster::default(),
            Some((&capital_id, &world.ships[&capital_id])),
            &fighters(&world),
            5,
            &mut plan,
        );

        assert_eq!(state.last_capital_repair, None);
        assert!(matches!(plan.get(&capital_id), Some(Command::Attack { .. })));
    }
}
