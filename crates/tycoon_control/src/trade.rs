//! Greedy trade routing for idle cargo ships.
//!
//! An empty ship is sent to buy the (resource, planet) pair with the best
//! yield per tick over every resale market; a loaded ship is sent to the
//! market with the best price per distance for what it carries.

use std::collections::BTreeMap;

use tracing::debug;
use tycoon_core::{
    distance, Command, Planet, PlanetId, Position, ResourceId, Ship, ShipSet, WorldView,
};

use crate::plan::{CommandPlan, Priority};
use crate::StrategyParams;

/// Route lengths are floored at this so co-located markets stay finite.
const MIN_ROUTE_DISTANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BuyPlan {
    pub resource: ResourceId,
    pub buy_planet: PlanetId,
    /// Where the cargo was scored to be resold; the sell step re-decides.
    pub sell_planet: PlanetId,
    pub amount: i64,
    pub profit_per_tick: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SellPlan {
    pub resource: ResourceId,
    pub planet: PlanetId,
    pub amount: i64,
    pub price_per_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TradeReport {
    pub buys: usize,
    pub sells: usize,
}

pub struct TradeRouter<'p> {
    params: &'p StrategyParams,
}

impl<'p> TradeRouter<'p> {
    pub fn new(params: &'p StrategyParams) -> Self {
        Self { params }
    }

    /// Our traders with no command in flight that did not move last tick.
    pub fn eligible_ships<'a>(&self, view: &WorldView<'a>) -> ShipSet<'a> {
        view.own_ships(&self.params.classes.trader, true)
            .into_iter()
            .filter(|(_, ship)| ship.is_stationary())
            .collect()
    }

    /// Best-yield purchase for an empty ship. Strictly better replaces, so
    /// ties keep the lowest planet id and then the lowest resource id.
    pub fn best_buy(&self, ship: &Ship, planets: &BTreeMap<PlanetId, Planet>) -> Option<BuyPlan> {
        let mut best: Option<BuyPlan> = None;
        for (buy_id, buy_planet) in planets {
            let to_market = distance(ship.position, buy_planet.position);
            for (resource, entry) in &buy_planet.resources {
                let Some(buy_price) = entry.buy_price else {
                    continue;
                };
                if entry.amount <= self.params.min_planet_stock {
                    continue;
                }
                let amount = entry.amount.min(self.params.trade_amount_cap);
                if amount <= 0 {
                    continue;
                }
                for (sell_id, sell_planet) in planets {
                    if sell_id == buy_id {
                        continue;
                    }
                    let Some(sell_price) = sell_planet
                        .resources
                        .get(resource)
                        .and_then(|e| e.sell_price)
                    else {
                        continue;
                    };
                    let profit = (sell_price - buy_price) as f64;
                    if profit <= 0.0 {
                        continue;
                    }
                    let route = to_market + distance(buy_planet.position, sell_planet.position);
                    let profit_per_tick = profit / route.max(MIN_ROUTE_DISTANCE);
                    if best
                        .as_ref()
                        .is_none_or(|b| profit_per_tick > b.profit_per_tick)
                    {
                        best = Some(BuyPlan {
                            resource: resource.clone(),
                            buy_planet: buy_id.clone(),
                            sell_planet: sell_id.clone(),
                            amount,
                            profit_per_tick,
                        });
                    }
                }
            }
        }
        best
    }

    /// Best market for the ship's (single) cargo resource.
    pub fn best_sell(&self, ship: &Ship, planets: &BTreeMap<PlanetId, Planet>) -> Option<SellPlan> {
        let (resource, amount) = ship.first_cargo()?;
        let mut best: Option<SellPlan> = None;
        for (planet_id, planet) in planets {
            let Some(sell_price) = planet.resources.get(resource).and_then(|e| e.sell_price) else {
                continue;
            };
            let price_per_distance = sell_price as f64 / reach(ship.position, planet.position);
            if best
                .as_ref()
                .is_none_or(|b| price_per_distance > b.price_per_distance)
            {
                best = Some(SellPlan {
                    resource: resource.clone(),
                    planet: planet_id.clone(),
                    amount,
                    price_per_distance,
                });
            }
        }
        best
    }

    /// Issues at most one trade per eligible ship, in id order. Buys stop
    /// after `max_buys_per_tick` so ships do not pile onto the same route.
    pub fn route(
        &self,
        traders: &ShipSet<'_>,
        planets: &BTreeMap<PlanetId, Planet>,
        plan: &mut CommandPlan,
    ) -> TradeReport {
        let mut report = TradeReport::default();
        for (ship_id, ship) in traders {
            if ship.has_cargo() {
                let Some(sell) = self.best_sell(ship, planets) else {
                    debug!(ship = %ship_id, "no market for cargo");
                    continue;
                };
                debug!(
                    ship = %ship_id,
                    resource = %sell.resource,
                    planet = %sell.planet,
                    amount = sell.amount,
                    "selling cargo"
                );
                let command = Command::Trade {
                    amount: -sell.amount,
                    resource: sell.resource,
                    target: sell.planet,
                };
                if plan.assign(ship_id, command, Priority::Economy) {
                    report.sells += 1;
                }
                continue;
            }

            if report.buys >= self.params.max_buys_per_tick {
                continue;
            }
            let Some(buy) = self.best_buy(ship, planets) else {
                continue;
            };
            debug!(
                ship = %ship_id,
                resource = %buy.resource,
                planet = %buy.buy_planet,
                resale = %buy.sell_planet,
                ypt = buy.profit_per_tick,
                "buying cargo"
            );
            let command = Command::Trade {
                amount: buy.amount,
                resource: buy.resource,
                target: buy.buy_planet,
            };
            if plan.assign(ship_id, command, Priority::Economy) {
                report.buys += 1;
            }
        }
        report
    }
}

fn reach(from: Position, to: Position) -> f64 {
    distance(from, to).max(MIN_ROUTE_DISTANCE)
}
