use futures_channel::oneshot;
use futures_util::{FutureExt, StreamExt};
use gloo::net::websocket::{futures::WebSocket, Message};
use marubatsu_protocol::GameEvent;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

#[derive(Clone, Debug, Error)]
pub enum ChannelError {
    #[error("Could not open push channel: {0}")]
    Connect(String),
    #[error("Push channel closed: {0}")]
    Closed(String),
}

/// A live subscription to the push channel. Dropping it cancels the
/// subscription; events already in flight are discarded.
pub struct Subscription {
    cancel: Option<oneshot::Sender<()>>,
}

impl Subscription {
    pub fn new(cancel: oneshot::Sender<()>) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

/// Publish/subscribe transport delivering session change events.
/// Subscribers get every event on the topic and filter for themselves;
/// delivery errors are reported once and the subscription is not
/// re-established automatically.
pub trait PushChannel {
    fn subscribe(
        &self,
        on_event: Callback<GameEvent>,
        on_error: Callback<ChannelError>,
    ) -> Subscription;
}

/// `PushChannel` over a WebSocket carrying JSON `GameEvent` frames
pub struct WebSocketChannel {
    url: String,
}

impl WebSocketChannel {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl PushChannel for WebSocketChannel {
    fn subscribe(
        &self,
        on_event: Callback<GameEvent>,
        on_error: Callback<ChannelError>,
    ) -> Subscription {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let url = self.url.clone();

        spawn_local(async move {
            let ws = match WebSocket::open(&url) {
                Ok(ws) => ws,
                Err(err) => {
                    on_error.emit(ChannelError::Connect(err.to_string()));
                    return;
                }
            };
            log::debug!("push channel connected: {}", url);

            let mut frames = ws.fuse();
            let mut cancel = cancel_rx.fuse();
            loop {
                futures_util::select! {
                    _ = cancel => {
                        log::debug!("push subscription cancelled");
                        break;
                    }
                    frame = frames.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<GameEvent>(&text) {
                                Ok(event) => on_event.emit(event),
                                Err(err) => {
                                    log::warn!("ignoring malformed push payload: {}", err);
                                }
                            }
                        }
                        Some(Ok(Message::Bytes(_))) => {
                            log::warn!("ignoring binary push frame");
                        }
                        Some(Err(err)) => {
                            on_error.emit(ChannelError::Closed(err.to_string()));
                            break;
                        }
                        None => {
                            on_error.emit(ChannelError::Closed("stream ended".to_owned()));
                            break;
                        }
                    }
                }
            }
            // the socket is dropped here, closing the connection
        });

        Subscription::new(cancel_tx)
    }
}
