use std::rc::Rc;

use marubatsu_protocol::{PlayerId, SessionId};
use yew::prelude::*;

pub use game::GameView;
pub use lobby::Lobby;
pub use session::MultiplayerView;
pub use stats::{Leaderboard, PlayerStatsView};

mod board;
mod game;
mod lobby;
mod search;
mod session;
mod stats;
mod status;
mod sync;
mod toast;

/// The signed-in player, as reported by the host page
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub id: PlayerId,
    pub name: String,
}

/// Remote collaborators shared by every view. Equality is handle
/// identity, so swapping in new services re-renders the tree.
#[derive(Clone)]
pub struct Services {
    pub api: Rc<dyn crate::remote::GameService>,
    pub channel: Rc<dyn crate::remote::PushChannel>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && Rc::ptr_eq(&self.channel, &other.channel)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum View {
    Lobby,
    Session(SessionId),
    Practice,
}

pub enum Msg {
    Play(SessionId),
    BackToLobby,
    NewGameRequest(PlayerId),
    ShowPractice,
    ShowLobby,
}

#[derive(Properties, Clone, PartialEq)]
pub struct AppProps {
    pub user: CurrentUser,
    pub services: Services,
}

/// Top-level view switch between the lobby, one multiplayer session,
/// and the local practice board
pub struct AppShell {
    view: View,
}

impl Component for AppShell {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { view: View::Lobby }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let next = match msg {
            Msg::Play(session_id) => View::Session(session_id),
            Msg::BackToLobby | Msg::ShowLobby => View::Lobby,
            Msg::NewGameRequest(opponent) => {
                // the rematch flow starts back in the lobby, where the
                // opponent can be re-selected and a fresh invitation sent
                log::debug!("new game requested against {}", opponent);
                View::Lobby
            }
            Msg::ShowPractice => View::Practice,
        };
        if next == self.view {
            false
        } else {
            self.view = next;
            true
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let user = ctx.props().user.clone();
        let services = ctx.props().services.clone();

        let nav = {
            let cb_lobby = ctx.link().callback(|_| Msg::ShowLobby);
            let cb_practice = ctx.link().callback(|_| Msg::ShowPractice);
            html! {
                <nav class="tabs">
                    <button
                        class={classes!((self.view == View::Lobby).then_some("active"))}
                        onclick={cb_lobby}
                    >
                        {"Multiplayer"}
                    </button>
                    <button
                        class={classes!((self.view == View::Practice).then_some("active"))}
                        onclick={cb_practice}
                    >
                        {"Practice"}
                    </button>
                </nav>
            }
        };

        let body = match &self.view {
            View::Lobby => html! {
                <>
                    <Lobby
                        user={user.clone()}
                        services={services.clone()}
                        on_play={ctx.link().callback(Msg::Play)}
                    />
                    <Leaderboard services={services.clone()} />
                    <PlayerStatsView player_id={user.id.clone()} services={services} />
                </>
            },
            View::Session(session_id) => html! {
                <MultiplayerView
                    session_id={session_id.clone()}
                    {user}
                    {services}
                    on_back={ctx.link().callback(|()| Msg::BackToLobby)}
                    on_new_game={ctx.link().callback(Msg::NewGameRequest)}
                />
            },
            View::Practice => html! { <GameView /> },
        };

        html! {
            <main class="marubatsu-app">
                <h1>{"Tic-Tac-Toe"}</h1>
                { nav }
                { body }
            </main>
        }
    }
}
