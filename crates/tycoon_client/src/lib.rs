//! `tycoon_client`: talks to the game server on behalf of a [`CommandSource`].
//!
//! [`GameApi`] is the seam; [`HttpGameApi`] is the live implementation.
//!
//! [`CommandSource`]: tycoon_control::CommandSource

mod api;
mod config;
mod http;
mod turn_loop;

pub use api::{ApiError, Credentials, GameApi};
pub use config::{load_config, AgentConfig};
pub use http::HttpGameApi;
pub use turn_loop::{
    LoopOptions, SeasonEnd, SeasonReport, SessionSummary, TurnError, TurnLoop,
};
