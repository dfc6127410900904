//! Wire types shared with the game service. The client treats every
//! session field as a read-only mirror of server state; the only writes
//! are the move/invitation requests, which the service validates.

use marubatsu_core::{Board, CellIx, Player};
use serde::{Deserialize, Serialize};

/// Identifier of a remote game session
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a player account on the service
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session lifecycle as reported by the service. The wire strings are
/// the service's literal labels, including the embedded space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// A remote-owned record of one multiplayer game between two players
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub session_id: SessionId,
    pub player_x_id: PlayerId,
    pub player_x_name: String,
    pub player_o_id: PlayerId,
    pub player_o_name: String,
    pub board: Board,
    pub current_player: Player,
    pub game_status: GameStatus,
    #[serde(default)]
    pub winner: Option<Player>,
    pub is_my_turn: bool,
    #[serde(default)]
    pub my_symbol: Option<Player>,
}

impl GameSession {
    pub fn is_in_progress(&self) -> bool {
        self.game_status == GameStatus::InProgress
    }

    /// Name of the other player, from the viewer's perspective
    pub fn opponent_name(&self) -> &str {
        match self.my_symbol {
            Some(Player::X) => &self.player_o_name,
            _ => &self.player_x_name,
        }
    }

    /// Identifier of the other player, from the viewer's perspective
    pub fn opponent_id(&self) -> &PlayerId {
        match self.my_symbol {
            Some(Player::X) => &self.player_o_id,
            _ => &self.player_x_id,
        }
    }

    /// An invitation the given player still has to accept
    pub fn is_pending_invitation_for(&self, player: &PlayerId) -> bool {
        self.game_status == GameStatus::Pending && self.player_o_id == *player
    }
}

/// Kind of change announced on the push channel
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    InvitationSent,
    GameStarted,
    MoveMade,
    GameCompleted,
}

/// Push-channel payload; consumed only to decide whether to re-fetch
/// and which transient notification to show, never applied directly
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub session_id: SessionId,
    pub event_type: EventType,
    pub acting_player_id: PlayerId,
}

/// One opponent-search result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: PlayerId,
    pub name: String,
}

/// One leaderboard row, ordered best-first by the service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub win_percentage: f64,
}

/// Aggregate record of one player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub win_percentage: f64,
}

/// Body of a move submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub position: CellIx,
}

/// Body of a session-creation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub opponent_id: PlayerId,
}

/// Response to a session-creation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub session_id: SessionId,
}

/// Error payload the service attaches to failed calls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_session_matches_wire_shape() {
        let session: GameSession = serde_json::from_value(json!({
            "sessionId": "a01",
            "playerXId": "u1",
            "playerXName": "Ada",
            "playerOId": "u2",
            "playerOName": "Grace",
            "board": ["X", null, null, null, "O", null, null, null, null],
            "currentPlayer": "X",
            "gameStatus": "In Progress",
            "isMyTurn": true,
            "mySymbol": "X"
        }))
        .unwrap();

        assert_eq!(session.session_id, SessionId::from("a01"));
        assert_eq!(session.board[0], Some(Player::X));
        assert_eq!(session.board[4], Some(Player::O));
        assert_eq!(session.game_status, GameStatus::InProgress);
        assert_eq!(session.winner, None);
        assert!(session.is_my_turn);
        assert_eq!(session.opponent_name(), "Grace");
        assert_eq!(session.opponent_id(), &PlayerId::from("u2"));
    }

    #[test]
    fn status_labels_keep_the_embedded_space() {
        assert_eq!(
            serde_json::to_value(GameStatus::InProgress).unwrap(),
            json!("In Progress")
        );
        assert_eq!(
            serde_json::to_value(GameStatus::Pending).unwrap(),
            json!("Pending")
        );
        assert_eq!(
            serde_json::to_value(GameStatus::Completed).unwrap(),
            json!("Completed")
        );
    }

    #[test]
    fn event_types_are_screaming_snake_on_the_wire() {
        let event: GameEvent = serde_json::from_value(json!({
            "sessionId": "a01",
            "eventType": "MOVE_MADE",
            "actingPlayerId": "u2"
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::MoveMade);
        assert_eq!(
            serde_json::to_value(EventType::InvitationSent).unwrap(),
            json!("INVITATION_SENT")
        );
        assert_eq!(
            serde_json::to_value(EventType::GameCompleted).unwrap(),
            json!("GAME_COMPLETED")
        );
    }

    #[test]
    fn pending_invitation_is_detected_for_player_o_only() {
        let session: GameSession = serde_json::from_value(json!({
            "sessionId": "a02",
            "playerXId": "u1",
            "playerXName": "Ada",
            "playerOId": "u2",
            "playerOName": "Grace",
            "board": [null, null, null, null, null, null, null, null, null],
            "currentPlayer": "X",
            "gameStatus": "Pending",
            "isMyTurn": false,
            "mySymbol": "O"
        }))
        .unwrap();

        assert!(session.is_pending_invitation_for(&PlayerId::from("u2")));
        assert!(!session.is_pending_invitation_for(&PlayerId::from("u1")));
    }

    #[test]
    fn request_bodies_use_camel_case() {
        assert_eq!(
            serde_json::to_value(MoveRequest { position: 4 }).unwrap(),
            json!({"position": 4})
        );
        assert_eq!(
            serde_json::to_value(CreateSessionRequest {
                opponent_id: PlayerId::from("u2"),
            })
            .unwrap(),
            json!({"opponentId": "u2"})
        );
        let created: CreatedSession =
            serde_json::from_value(json!({"sessionId": "a03"})).unwrap();
        assert_eq!(created.session_id, SessionId::from("a03"));
    }
}
