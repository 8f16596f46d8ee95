//! Blocking HTTP implementation of [`GameApi`].
//!
//! The server speaks kebab-case JSON and authenticates by session cookie,
//! which is captured from the login response and replayed on every call.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use tycoon_core::{
    CommandMap, CurrentTick, Planet, PlanetId, Player, PlayerId, Ship, ShipId, WorldState,
};

use crate::api::{ApiError, Credentials, GameApi};

pub struct HttpGameApi {
    client: Client,
    base_url: String,
    cookie: Option<String>,
}

/// `/data` payload. `player-id` is null when the session is not logged in.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DataResponse {
    current_tick: CurrentTick,
    player_id: Option<PlayerId>,
    #[serde(default)]
    ships: BTreeMap<ShipId, Ship>,
    #[serde(default)]
    planets: BTreeMap<PlanetId, Planet>,
    #[serde(default)]
    players: BTreeMap<PlayerId, Player>,
}

impl DataResponse {
    fn into_world(self) -> Result<WorldState, ApiError> {
        let player_id = self.player_id.ok_or(ApiError::NotLoggedIn)?;
        Ok(WorldState {
            current_tick: self.current_tick,
            player_id,
            ships: self.ships,
            planets: self.planets,
            players: self.players,
        })
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    id: PlayerId,
}

impl HttpGameApi {
    pub fn new(host: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: host.trim_end_matches('/').to_string(),
            cookie: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(match status {
            StatusCode::FORBIDDEN => ApiError::Unauthorized { body },
            StatusCode::BAD_REQUEST => ApiError::Rejected { body },
            other => ApiError::Status {
                code: other.as_u16(),
                body,
            },
        })
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport {
        message: error.to_string(),
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|error| ApiError::Decode {
        message: error.to_string(),
    })
}

impl GameApi for HttpGameApi {
    fn login(&mut self, credentials: &Credentials) -> Result<PlayerId, ApiError> {
        self.cookie = None;
        let response = self.send(self.client.post(self.url("/login")).json(credentials))?;
        // Only the `name=value` pair is replayed; attributes are dropped.
        self.cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_string);
        let login: LoginResponse = decode(response)?;
        debug!(player = %login.id, "logged in");
        Ok(login.id)
    }

    fn fetch_world(&mut self) -> Result<WorldState, ApiError> {
        let response = self.send(self.client.get(self.url("/data")))?;
        decode::<DataResponse>(response)?.into_world()
    }

    fn submit_commands(&mut self, commands: &CommandMap) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("/commands")).json(commands))?;
        Ok(())
    }

    fn end_turn(&mut self, turn: CurrentTick) -> Result<CurrentTick, ApiError> {
        let response = self.send(self.client.post(self.url("/end-turn")).json(&turn))?;
        decode(response)
    }
}
