//! Session mirror state machine. The Yew component feeds it inputs and
//! executes the effects it returns; keeping the transitions here, free
//! of any transport, is what makes the multiplayer flow testable.

use marubatsu_core::CellIx;
use marubatsu_protocol::{EventType, GameEvent, GameSession, PlayerId, SessionId};

use crate::app::toast::Toast;
use crate::remote::ServiceError;

/// Valid transitions:
/// - Loading -> Idle (first fetch settles)
/// - Idle -> Submitting (move or invitation request goes out)
/// - Submitting -> Idle (the follow-up fetch settles)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    Loading,
    Idle,
    Submitting,
}

/// Everything that can happen to a mounted session view
#[derive(Clone, Debug)]
pub enum SyncEvent {
    Mounted,
    FetchResolved {
        seq: u64,
        result: Result<GameSession, ServiceError>,
    },
    MoveRequested(CellIx),
    MoveResolved {
        result: Result<(), ServiceError>,
    },
    AcceptRequested,
    AcceptResolved {
        result: Result<(), ServiceError>,
    },
    PushReceived(GameEvent),
}

/// Work the component has to carry out after a transition
#[derive(Clone, Debug, PartialEq)]
pub enum SyncEffect {
    Fetch { seq: u64 },
    SubmitMove { position: CellIx },
    AcceptInvitation,
    ShowToast(Toast),
}

pub struct SessionSync {
    session_id: SessionId,
    user: PlayerId,
    phase: SyncPhase,
    session: Option<GameSession>,
    error: Option<String>,
    /// Sequence number of the most recently issued fetch. Re-fetches
    /// triggered by submits and by push events can race; only the
    /// response matching this number is applied (latest-issued wins),
    /// which serializes them without any queue.
    seq: u64,
}

impl SessionSync {
    pub fn new(session_id: SessionId, user: PlayerId) -> Self {
        Self {
            session_id,
            user,
            phase: SyncPhase::Loading,
            session: None,
            error: None,
            seq: 0,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The de facto mutual exclusion: while this is true no move
    /// request leaves the client
    pub fn board_disabled(&self) -> bool {
        self.phase != SyncPhase::Idle
            || self
                .session
                .as_ref()
                .is_none_or(|s| !s.is_my_turn || !s.is_in_progress())
    }

    pub fn can_accept(&self) -> bool {
        self.phase == SyncPhase::Idle
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.is_pending_invitation_for(&self.user))
    }

    /// "Your turn" / "<opponent>'s turn", empty unless in progress
    pub fn turn_text(&self) -> String {
        let Some(session) = self.session.as_ref() else {
            return String::new();
        };
        if !session.is_in_progress() {
            return String::new();
        }
        if session.is_my_turn {
            "Your turn".to_owned()
        } else {
            format!("{}'s turn", session.opponent_name())
        }
    }

    pub fn handle(&mut self, event: SyncEvent) -> Vec<SyncEffect> {
        match event {
            SyncEvent::Mounted => {
                self.phase = SyncPhase::Loading;
                self.session = None;
                self.error = None;
                vec![self.next_fetch()]
            }
            SyncEvent::FetchResolved { seq, result } => {
                if seq != self.seq {
                    log::debug!("dropping stale fetch {} (current {})", seq, self.seq);
                    return Vec::new();
                }
                match result {
                    Ok(session) => {
                        self.session = Some(session);
                        self.error = None;
                    }
                    Err(err) => {
                        self.error =
                            Some(err.user_message("Failed to load game session"));
                        self.session = None;
                    }
                }
                self.phase = SyncPhase::Idle;
                Vec::new()
            }
            SyncEvent::MoveRequested(position) => {
                if self.board_disabled() {
                    log::debug!("ignoring move request at {} while disabled", position);
                    return Vec::new();
                }
                self.phase = SyncPhase::Submitting;
                vec![SyncEffect::SubmitMove { position }]
            }
            SyncEvent::MoveResolved { result } => {
                let mut effects = Vec::new();
                if let Err(err) = result {
                    effects.push(SyncEffect::ShowToast(Toast::error(
                        err.user_message("Failed to make move"),
                    )));
                }
                // re-fetch regardless of outcome; authoritative state wins
                effects.push(self.next_fetch());
                effects
            }
            SyncEvent::AcceptRequested => {
                if !self.can_accept() {
                    return Vec::new();
                }
                self.phase = SyncPhase::Submitting;
                vec![SyncEffect::AcceptInvitation]
            }
            SyncEvent::AcceptResolved { result } => {
                let toast = match result {
                    Ok(()) => Toast::success("Game started! Good luck!"),
                    Err(err) => {
                        Toast::error(err.user_message("Failed to accept invitation"))
                    }
                };
                vec![SyncEffect::ShowToast(toast), self.next_fetch()]
            }
            SyncEvent::PushReceived(event) => {
                if event.session_id != self.session_id {
                    return Vec::new();
                }
                let mut effects = vec![self.next_fetch()];
                if let Some(toast) = self.toast_for_event(&event) {
                    effects.push(SyncEffect::ShowToast(toast));
                }
                effects
            }
        }
    }

    fn next_fetch(&mut self) -> SyncEffect {
        self.seq += 1;
        SyncEffect::Fetch { seq: self.seq }
    }

    /// Notifications only for changes the current user did not cause
    fn toast_for_event(&self, event: &GameEvent) -> Option<Toast> {
        if event.acting_player_id == self.user {
            return None;
        }
        match event.event_type {
            EventType::MoveMade => Some(Toast::info("Your opponent made a move!")),
            EventType::GameCompleted => Some(Toast::info("Game completed!")),
            EventType::GameStarted => Some(Toast::success("Game started! Your turn.")),
            EventType::InvitationSent => None,
        }
    }
}
