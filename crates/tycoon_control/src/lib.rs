//! `tycoon_control`: per-tick fleet decisions.
//!
//! Turns a `WorldState` plus retained `FleetState` into one command per
//! ship: home defense, defender roster upkeep, and trade routing.

mod combat;
mod composer;
mod params;
mod plan;
mod roster;
mod trade;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use tycoon_core::{Command, CommandMap, PlayerId, WorldState, WorldView};

pub use combat::{CombatController, CombatPhase, CombatState, EngagementTarget, Threats};
pub use composer::{ComposerReport, ComposerState, FleetComposer};
pub use params::{ClassRoles, ParamsError, StrategyParams};
pub use plan::{CommandPlan, Priority};
pub use roster::{Defender, Roster};
pub use trade::{BuyPlan, SellPlan, TradeReport, TradeRouter};

pub trait CommandSource {
    fn generate_commands(&mut self, state: &WorldState) -> Result<CommandMap, PlanError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("snapshot is owned by unknown player {0}")]
    UnknownPlayer(PlayerId),
}

/// Everything the agent remembers between ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetState {
    pub roster: Roster,
    pub combat: CombatState,
    pub composer: ComposerState,
}

/// What happened in one planned tick, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub phase: CombatPhase,
    pub composer: ComposerReport,
    pub trade: TradeReport,
    pub commands: usize,
}

/// Drives our fleet automatically, one tick at a time:
/// 1. Reconcile the defender roster.
/// 2. Defend the capital's surroundings.
/// 3. Build and repair.
/// 4. Route idle traders.
pub struct FleetAgent {
    params: StrategyParams,
    state: FleetState,
}

impl FleetAgent {
    pub fn new(params: StrategyParams) -> Self {
        Self {
            params,
            state: FleetState::default(),
        }
    }

    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    pub fn state(&self) -> &FleetState {
        &self.state
    }

    /// Plans one tick. Retained state is only updated when planning succeeds.
    pub fn plan_turn(&mut self, world: &WorldState) -> Result<(CommandMap, TurnSummary), PlanError> {
        if !world.players.contains_key(&world.player_id) {
            return Err(PlanError::UnknownPlayer(world.player_id.clone()));
        }
        let mut next = self.state.clone();
        let (commands, summary) = self.decide(world, &mut next);
        self.state = next;
        debug!(
            tick = world.current_tick.tick,
            commands = summary.commands,
            phase = ?summary.phase,
            "turn planned"
        );
        Ok((commands, summary))
    }

    fn decide(&self, world: &WorldState, state: &mut FleetState) -> (CommandMap, TurnSummary) {
        let params = &self.params;
        let view = WorldView::new(world);
        let mut plan = CommandPlan::new();

        let capital = view.capital(&params.classes.capital);
        let fighters = view.own_ships(&params.classes.defender, false);

        let composer = FleetComposer::new(params);
        composer.reconcile_roster(&mut state.composer, &mut state.roster, &fighters);

        let router = TradeRouter::new(params);
        let traders = router.eligible_ships(&view);

        let defending = !params.hold_defense_until_built || state.composer.build_finished;
        let phase = match capital {
            Some((capital_id, capital_ship)) if defending => {
                let threats = Threats::assess(&view, capital_ship.position, params);
                let rally_point =
                    WorldView::centroid_of(&view.own_ships(&params.classes.trader, true));
                CombatController::new(params).step(
                    &mut state.combat,
                    &mut state.roster,
                    capital_id,
                    &threats,
                    rally_point,
                    &mut plan,
                )
            }
            _ => {
                // Nothing to defend from; forget any fight in progress.
                state.combat.engagement = None;
                state.roster.set_attacking(false);
                CombatPhase::Idle
            }
        };

        let composer_report = composer.issue_orders(
            &mut state.composer,
            &state.roster,
            capital,
            &fighters,
            view.tick(),
            &mut plan,
        );

        let trade = if capital.is_none() && params.decommission_orphaned_traders {
            warn!(traders = traders.len(), "capital lost, decommissioning free traders");
            for ship_id in traders.keys() {
                plan.assign(ship_id, Command::Decommission, Priority::Economy);
            }
            TradeReport::default()
        } else {
            router.route(&traders, &world.planets, &mut plan)
        };

        let commands = plan.into_commands();
        let summary = TurnSummary {
            phase,
            composer: composer_report,
            trade,
            commands: commands.len(),
        };
        (commands, summary)
    }
}

impl CommandSource for FleetAgent {
    fn generate_commands(&mut self, state: &WorldState) -> Result<CommandMap, PlanError> {
        self.plan_turn(state).map(|(commands, _)| commands)
    }
}
