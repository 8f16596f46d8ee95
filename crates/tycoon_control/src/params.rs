//! Strategy parameters. One configurable strategy replaces per-variant copies
//! of the decision logic.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tycoon_core::{PlayerId, ScanFilter, ShipClass};

/// Which server class ids play which role in our fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassRoles {
    pub capital: ShipClass,
    pub trader: ShipClass,
    /// The class kept in the defender roster and built by the capital.
    pub defender: ShipClass,
}

impl Default for ClassRoles {
    fn default() -> Self {
        Self {
            capital: ShipClass::new("1"),
            trader: ShipClass::new("3"),
            defender: ShipClass::new("5"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub classes: ClassRoles,
    /// Enemies inside this radius of the capital are intruders.
    pub home_radius: f64,
    /// Intruders inside this radius are engaged by defenders directly.
    pub engage_radius: f64,
    /// Enemy classes, most urgent first.
    pub attack_priorities: Vec<ShipClass>,
    /// Enemy classes never treated as intruders. Defaults to the trader class.
    pub exclude_classes: Vec<ShipClass>,
    pub exclude_players: Vec<PlayerId>,
    pub defender_quota: usize,
    /// A defender this far below its health baseline gets repaired.
    pub defender_damage_threshold: i64,
    pub capital_repair_health: i64,
    pub repair_cooldown_ticks: u64,
    pub trade_amount_cap: i64,
    /// Planets must hold more than this to be bought from.
    pub min_planet_stock: i64,
    pub max_buys_per_tick: usize,
    pub regroup_on_disengage: bool,
    pub hold_defense_until_built: bool,
    pub decommission_orphaned_traders: bool,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            classes: ClassRoles::default(),
            home_radius: 300.0,
            engage_radius: 70.0,
            attack_priorities: ["5", "4", "1"].into_iter().map(ShipClass::new).collect(),
            exclude_classes: vec![ShipClass::new("3")],
            exclude_players: Vec::new(),
            defender_quota: 2,
            defender_damage_threshold: 200,
            capital_repair_health: 500,
            repair_cooldown_ticks: 3,
            trade_amount_cap: 10,
            min_planet_stock: 4,
            max_buys_per_tick: 2,
            regroup_on_disengage: false,
            hold_defense_until_built: false,
            decommission_orphaned_traders: false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be a finite, non-negative distance (got {value})")]
    BadRadius { name: &'static str, value: f64 },
    #[error("engage radius {engage} exceeds home radius {home}")]
    EngageBeyondHome { engage: f64, home: f64 },
    #[error("trade amount cap must be positive (got {0})")]
    BadTradeCap(i64),
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("home_radius", self.home_radius),
            ("engage_radius", self.engage_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::BadRadius { name, value });
            }
        }
        if self.engage_radius > self.home_radius {
            return Err(ParamsError::EngageBeyondHome {
                engage: self.engage_radius,
                home: self.home_radius,
            });
        }
        if self.trade_amount_cap <= 0 {
            return Err(ParamsError::BadTradeCap(self.trade_amount_cap));
        }
        Ok(())
    }

    pub fn scan_filter(&self) -> ScanFilter {
        ScanFilter::new(
            self.exclude_classes.iter().cloned(),
            self.exclude_players.iter().cloned(),
        )
    }

    /// Rank of `class` in the priority list; lower is more urgent.
    pub fn priority_of(&self, class: &ShipClass) -> Option<usize> {
        self.attack_priorities.iter().position(|c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(StrategyParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: StrategyParams =
            serde_json::from_str(r#"{"home_radius": 100, "classes": {"defender": "4"}}"#).unwrap();
        assert!((params.home_radius - 100.0).abs() < f64::EPSILON);
        assert_eq!(params.classes.defender, ShipClass::new("4"));
        assert_eq!(params.classes.capital, ShipClass::new("1"));
        assert_eq!(params.defender_quota, 2);
    }

    #[test]
    fn test_engage_beyond_home_rejected() {
        let params = StrategyParams {
            home_radius: 20.0,
            engage_radius: 70.0,
            ..StrategyParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::EngageBeyondHome { .. })
        ));
    }

    #[test]
    fn test_negative_radius_and_zero_cap_rejected() {
        let params = StrategyParams {
            home_radius: -1.0,
            ..StrategyParams::default()
        };
        assert!(matches!(params.validate(), Err(ParamsError::BadRadius { name: "home_radius", .. })));

        let params = StrategyParams {
            trade_amount_cap: 0,
            ..StrategyParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::BadTradeCap(0)));
    }

    #[test]
    fn test_default_filter_ignores_traders() {
        let filter = StrategyParams::default().scan_filter();
        assert!(!filter.admits_class(&ShipClass::new("3")));
        assert!(filter.admits_class(&ShipClass::new("5")));
    }

    #[test]
    fn test_priority_rank() {
        let params = StrategyParams::default();
        assert_eq!(params.priority_of(&ShipClass::new("5")), Some(0));
        assert_eq!(params.priority_of(&ShipClass::new("1")), Some(2));
        assert_eq!(params.priority_of(&ShipClass::new("3")), None);
    }
}
