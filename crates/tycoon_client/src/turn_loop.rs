use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};
use tycoon_control::{CommandSource, PlanError};
use tycoon_core::{CurrentTick, PlayerId};

use crate::api::{ApiError, Credentials, GameApi};

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    pub error_backoff: Duration,
    /// Stop after this many turn attempts, successful or not.
    pub max_ticks: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            error_backoff: Duration::from_secs(1),
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonEnd {
    /// Server answered 403 or reported no logged-in player.
    Unauthorized,
    TickLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonReport {
    pub end: SeasonEnd,
    pub turns_played: u64,
    pub turns_failed: u64,
    pub last_tick: Option<CurrentTick>,
}

/// Totals over a run of consecutive seasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Seasons started, counting those whose login failed.
    pub seasons: u64,
    pub login_failures: u64,
    pub turns_played: u64,
    pub turns_failed: u64,
}

/// Drives one agent against one server session, a turn at a time.
pub struct TurnLoop<A> {
    api: A,
    options: LoopOptions,
}

impl<A: GameApi> TurnLoop<A> {
    pub fn new(api: A, options: LoopOptions) -> Self {
        Self { api, options }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<PlayerId, ApiError> {
        let player = self.api.login(credentials)?;
        info!(player = %player, user = %credentials.username, "session started");
        Ok(player)
    }

    /// Fetch, decide, submit, end turn. Rejected commands are logged and the
    /// turn is still ended.
    pub fn play_turn(&mut self, agent: &mut impl CommandSource) -> Result<CurrentTick, TurnError> {
        let world = self.api.fetch_world()?;
        let turn = world.current_tick;
        let commands = agent.generate_commands(&world)?;
        info!(
            tick = turn.tick,
            season = turn.season,
            commands = commands.len(),
            "turn planned"
        );

        match self.api.submit_commands(&commands) {
            Ok(()) => {}
            Err(ApiError::Rejected { body }) => {
                warn!(tick = turn.tick, %body, "some commands failed");
            }
            Err(other) => return Err(other.into()),
        }

        Ok(self.api.end_turn(turn)?)
    }

    pub fn run_season(&mut self, agent: &mut impl CommandSource) -> SeasonReport {
        let mut report = SeasonReport {
            end: SeasonEnd::TickLimit,
            turns_played: 0,
            turns_failed: 0,
            last_tick: None,
        };

        loop {
            if self
                .options
                .max_ticks
                .is_some_and(|limit| report.turns_played + report.turns_failed >= limit)
            {
                report.end = SeasonEnd::TickLimit;
                return report;
            }

            match self.play_turn(agent) {
                Ok(next) => {
                    report.turns_played += 1;
                    report.last_tick = Some(next);
                }
                Err(TurnError::Api(err)) if err.is_terminal() => {
                    info!(error = %err, "new season started or login expired");
                    report.end = SeasonEnd::Unauthorized;
                    return report;
                }
                Err(err) => {
                    report.turns_failed += 1;
                    error!(error = %err, "turn failed, retrying");
                    std::thread::sleep(self.options.error_backoff);
                }
            }
        }
    }

    /// Plays season after season until `max_seasons` (unbounded when `None`).
    /// Each season logs in again and plans with a fresh agent from
    /// `new_agent`, so nothing retained survives a season boundary.
    pub fn run_seasons<S: CommandSource>(
        &mut self,
        credentials: &Credentials,
        max_seasons: Option<u64>,
        mut new_agent: impl FnMut() -> S,
    ) -> SessionSummary {
        let mut summary = SessionSummary::default();
        while !max_seasons.is_some_and(|limit| summary.seasons >= limit) {
            summary.seasons += 1;

            if let Err(err) = self.login(credentials) {
                summary.login_failures += 1;
                error!(error = %err, season = summary.seasons, "login failed");
                std::thread::sleep(self.options.error_backoff);
                continue;
            }

            let mut agent = new_agent();
            let report = self.run_season(&mut agent);
            summary.turns_played += report.turns_played;
            summary.turns_failed += report.turns_failed;
            info!(
                season = summary.seasons,
                end = ?report.end,
                played = report.turns_played,
                failed = report.turns_failed,
                "season ended"
            );
        }
        summary
    }
}
