use gloo::timers::callback::Timeout;
use marubatsu_protocol::{GameStatus, PlayerId, SessionId};
use yew::prelude::*;

use crate::app::board::BoardView;
use crate::app::sync::{SessionSync, SyncEffect, SyncEvent, SyncPhase};
use crate::app::toast::{Toast, ToastView, TOAST_MS};
use crate::app::{CurrentUser, Services};
use crate::remote::{ChannelError, Subscription};

pub enum Msg {
    Sync(SyncEvent),
    ChannelDown(ChannelError),
    DismissToast,
}

#[derive(Properties, Clone, PartialEq)]
pub struct MultiplayerProps {
    pub session_id: SessionId,
    pub user: CurrentUser,
    pub services: Services,
    #[prop_or_default]
    pub on_back: Callback<()>,
    #[prop_or_default]
    pub on_new_game: Callback<PlayerId>,
}

/// Multiplayer wrapper: a passive mirror of the remote session, kept
/// fresh by re-fetching whenever the push channel announces a change
pub struct MultiplayerView {
    sync: SessionSync,
    toast: Option<Toast>,
    toast_timer: Option<Timeout>,
    _subscription: Subscription,
}

impl MultiplayerView {
    fn subscribe(ctx: &Context<Self>) -> Subscription {
        ctx.props().services.channel.subscribe(
            ctx.link()
                .callback(|event| Msg::Sync(SyncEvent::PushReceived(event))),
            ctx.link().callback(Msg::ChannelDown),
        )
    }

    fn run_effects(&mut self, ctx: &Context<Self>, effects: Vec<SyncEffect>) {
        for effect in effects {
            match effect {
                SyncEffect::Fetch { seq } => {
                    let api = ctx.props().services.api.clone();
                    let session_id = ctx.props().session_id.clone();
                    ctx.link().send_future(async move {
                        let result = api.get_game_session(&session_id).await;
                        Msg::Sync(SyncEvent::FetchResolved { seq, result })
                    });
                }
                SyncEffect::SubmitMove { position } => {
                    let api = ctx.props().services.api.clone();
                    let session_id = ctx.props().session_id.clone();
                    ctx.link().send_future(async move {
                        let result = api.make_move(&session_id, position).await;
                        Msg::Sync(SyncEvent::MoveResolved { result })
                    });
                }
                SyncEffect::AcceptInvitation => {
                    let api = ctx.props().services.api.clone();
                    let session_id = ctx.props().session_id.clone();
                    ctx.link().send_future(async move {
                        let result = api.accept_invitation(&session_id).await;
                        Msg::Sync(SyncEvent::AcceptResolved { result })
                    });
                }
                SyncEffect::ShowToast(toast) => self.show_toast(ctx, toast),
            }
        }
    }

    fn show_toast(&mut self, ctx: &Context<Self>, toast: Toast) {
        self.toast = Some(toast);
        let link = ctx.link().clone();
        // replacing the handle cancels the previous timer
        self.toast_timer = Some(Timeout::new(TOAST_MS, move || {
            link.send_message(Msg::DismissToast);
        }));
    }

    fn view_session(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.sync.session() else {
            return match self.sync.error() {
                Some(error) => html! { <p class="error">{ error }</p> },
                None => html! { <p class="loading">{"Loading game session…"}</p> },
            };
        };

        let on_cell = ctx
            .link()
            .callback(|ix| Msg::Sync(SyncEvent::MoveRequested(ix)));
        let cb_accept = ctx
            .link()
            .callback(|_| Msg::Sync(SyncEvent::AcceptRequested));
        let heading = match session.game_status {
            GameStatus::Pending => "Invitation pending".to_owned(),
            GameStatus::InProgress => self.sync.turn_text(),
            GameStatus::Completed => match session.winner {
                Some(winner) => format!("Player {} wins!", winner),
                None => "Game completed".to_owned(),
            },
        };
        let opponent_id = session.opponent_id().clone();
        let on_new_game = ctx.props().on_new_game.clone();
        let cb_new_game = Callback::from(move |_: MouseEvent| {
            on_new_game.emit(opponent_id.clone());
        });

        html! {
            <>
                <header>
                    <h2>{ format!("vs {}", session.opponent_name()) }</h2>
                    <p class="turn" role="status">{ heading }</p>
                </header>
                <BoardView
                    board={session.board}
                    game_over={self.sync.board_disabled()}
                    on_cell={on_cell}
                />
                {
                    if self.sync.can_accept() {
                        html! { <button class="accept" onclick={cb_accept}>{"Accept Invitation"}</button> }
                    } else {
                        html! {}
                    }
                }
                {
                    if session.game_status == GameStatus::Completed {
                        html! { <button class="rematch" onclick={cb_new_game}>{"New Game"}</button> }
                    } else {
                        html! {}
                    }
                }
            </>
        }
    }
}

impl Component for MultiplayerView {
    type Message = Msg;
    type Properties = MultiplayerProps;

    fn create(ctx: &Context<Self>) -> Self {
        let subscription = Self::subscribe(ctx);
        let mut view = Self {
            sync: SessionSync::new(
                ctx.props().session_id.clone(),
                ctx.props().user.id.clone(),
            ),
            toast: None,
            toast_timer: None,
            _subscription: subscription,
        };
        let effects = view.sync.handle(SyncEvent::Mounted);
        view.run_effects(ctx, effects);
        view
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().session_id != old_props.session_id {
            self.sync = SessionSync::new(
                ctx.props().session_id.clone(),
                ctx.props().user.id.clone(),
            );
            let effects = self.sync.handle(SyncEvent::Mounted);
            self.run_effects(ctx, effects);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Sync(event) => {
                let effects = self.sync.handle(event);
                self.run_effects(ctx, effects);
                true
            }
            Msg::ChannelDown(err) => {
                // logged only; the subscription is not re-established
                log::error!("push channel error: {}", err);
                false
            }
            Msg::DismissToast => {
                self.toast_timer = None;
                self.toast.take().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_back = ctx.props().on_back.clone();
        let busy = self.sync.phase() == SyncPhase::Submitting;

        html! {
            <div class={classes!("marubatsu", "multiplayer", busy.then_some("busy"))}>
                <button class="back" onclick={move |_| on_back.emit(())}>{"Back to Lobby"}</button>
                { self.view_session(ctx) }
                <ToastView
                    toast={self.toast.clone()}
                    on_dismiss={ctx.link().callback(|_| Msg::DismissToast)}
                />
            </div>
        }
    }
}
