use serde::{Deserialize, Serialize};
use thiserror::Error;
use tycoon_core::{CommandMap, CurrentTick, PlayerId, WorldState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Season over or session expired (HTTP 403).
    #[error("not authorized: {body}")]
    Unauthorized { body: String },
    /// Some submitted commands were invalid (HTTP 400).
    #[error("commands rejected: {body}")]
    Rejected { body: String },
    #[error("snapshot carries no player id; session is not logged in")]
    NotLoggedIn,
    #[error("unexpected HTTP status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("malformed response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Errors after which retrying the session is pointless.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. } | ApiError::NotLoggedIn)
    }
}

/// The server operations one turn needs. Calls are blocking and made in
/// strict sequence.
pub trait GameApi {
    fn login(&mut self, credentials: &Credentials) -> Result<PlayerId, ApiError>;
    fn fetch_world(&mut self) -> Result<WorldState, ApiError>;
    fn submit_commands(&mut self, commands: &CommandMap) -> Result<(), ApiError>;
    /// Ends `turn` and returns the tick the server moved on to.
    fn end_turn(&mut self, turn: CurrentTick) -> Result<CurrentTick, ApiError>;
}
