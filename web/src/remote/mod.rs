//! Remote collaborators: the HTTP game service and the push channel.
//! Components receive both behind trait objects so tests can inject
//! fakes instead of real transports.

use futures_util::future::LocalBoxFuture;
use gloo::net::http::{Request, Response};
use js_sys::encode_uri_component;
use marubatsu_core::CellIx;
use marubatsu_protocol::{
    CreateSessionRequest, CreatedSession, ErrorBody, GameSession, MoveRequest, PlayerId,
    PlayerStats, RankedPlayer, SessionId, UserSummary,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use channel::*;

mod channel;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ServiceError {
    /// The service rejected the call and may have attached a message
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Text for a user-facing notification: the service's own message
    /// when it sent one, otherwise the given fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Service { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boxed local future, since wasm futures are not `Send`
pub type ServiceFuture<T> = LocalBoxFuture<'static, ServiceResult<T>>;

/// The operations this client consumes from the backend. Failures are
/// terminal at the call site: surfaced once, never retried.
pub trait GameService {
    fn get_game_session(&self, session_id: &SessionId) -> ServiceFuture<GameSession>;
    fn make_move(&self, session_id: &SessionId, position: CellIx) -> ServiceFuture<()>;
    fn accept_invitation(&self, session_id: &SessionId) -> ServiceFuture<()>;
    fn my_active_games(&self) -> ServiceFuture<Vec<GameSession>>;
    fn create_session(&self, opponent_id: &PlayerId) -> ServiceFuture<CreatedSession>;
    fn search_users(&self, term: &str) -> ServiceFuture<Vec<UserSummary>>;
    fn leaderboard(&self, limit: u32) -> ServiceFuture<Vec<RankedPlayer>>;
    fn player_statistics(&self, player_id: &PlayerId) -> ServiceFuture<PlayerStats>;
}

/// `GameService` over the REST surface rooted at `base`
pub struct HttpGameService {
    base: String,
}

impl HttpGameService {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl GameService for HttpGameService {
    fn get_game_session(&self, session_id: &SessionId) -> ServiceFuture<GameSession> {
        let url = self.url(&format!("/sessions/{}", session_id));
        Box::pin(async move { fetch_json(Request::get(&url)).await })
    }

    fn make_move(&self, session_id: &SessionId, position: CellIx) -> ServiceFuture<()> {
        let url = self.url(&format!("/sessions/{}/moves", session_id));
        Box::pin(async move { post_json(&url, &MoveRequest { position }).await })
    }

    fn accept_invitation(&self, session_id: &SessionId) -> ServiceFuture<()> {
        let url = self.url(&format!("/sessions/{}/accept", session_id));
        Box::pin(async move {
            let resp = Request::post(&url)
                .send()
                .await
                .map_err(|err| ServiceError::Network(err.to_string()))?;
            check_status(&resp).await
        })
    }

    fn my_active_games(&self) -> ServiceFuture<Vec<GameSession>> {
        let url = self.url("/sessions?scope=mine");
        Box::pin(async move { fetch_json(Request::get(&url)).await })
    }

    fn create_session(&self, opponent_id: &PlayerId) -> ServiceFuture<CreatedSession> {
        let url = self.url("/sessions");
        let body = CreateSessionRequest {
            opponent_id: opponent_id.clone(),
        };
        Box::pin(async move {
            let resp = Request::post(&url)
                .json(&body)
                .map_err(|err| ServiceError::Decode(err.to_string()))?
                .send()
                .await
                .map_err(|err| ServiceError::Network(err.to_string()))?;
            check_status(&resp).await?;
            decode_json(resp).await
        })
    }

    fn search_users(&self, term: &str) -> ServiceFuture<Vec<UserSummary>> {
        let encoded: String = encode_uri_component(term).into();
        let url = self.url(&format!("/users?search={}", encoded));
        Box::pin(async move { fetch_json(Request::get(&url)).await })
    }

    fn leaderboard(&self, limit: u32) -> ServiceFuture<Vec<RankedPlayer>> {
        let url = self.url(&format!("/leaderboard?limit={}", limit));
        Box::pin(async move { fetch_json(Request::get(&url)).await })
    }

    fn player_statistics(&self, player_id: &PlayerId) -> ServiceFuture<PlayerStats> {
        let url = self.url(&format!("/players/{}/statistics", player_id));
        Box::pin(async move { fetch_json(Request::get(&url)).await })
    }
}

async fn fetch_json<T: DeserializeOwned>(
    request: gloo::net::http::RequestBuilder,
) -> ServiceResult<T> {
    let resp = request
        .send()
        .await
        .map_err(|err| ServiceError::Network(err.to_string()))?;
    check_status(&resp).await?;
    decode_json(resp).await
}

async fn post_json<B: serde::Serialize>(url: &str, body: &B) -> ServiceResult<()> {
    let resp = Request::post(url)
        .json(body)
        .map_err(|err| ServiceError::Decode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ServiceError::Network(err.to_string()))?;
    check_status(&resp).await
}

/// Map non-2xx responses to `ServiceError::Service`, decoding the
/// service's error payload when one is present
async fn check_status(resp: &Response) -> ServiceResult<()> {
    if resp.ok() {
        return Ok(());
    }
    let status = resp.status();
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => String::new(),
    };
    Err(ServiceError::Service { status, message })
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> ServiceResult<T> {
    resp.json::<T>()
        .await
        .map_err(|err| ServiceError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_service_payload() {
        let err = ServiceError::Service {
            status: 409,
            message: "It is not your turn".to_owned(),
        };
        assert_eq!(err.user_message("Failed to make move"), "It is not your turn");
    }

    #[test]
    fn user_message_falls_back_when_payload_is_empty() {
        let empty = ServiceError::Service {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.user_message("Failed to make move"), "Failed to make move");

        let network = ServiceError::Network("connection refused".to_owned());
        assert_eq!(network.user_message("Failed to load"), "Failed to load");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let service = HttpGameService::new("/api/");
        assert_eq!(service.url("/sessions"), "/api/sessions");
    }
}
