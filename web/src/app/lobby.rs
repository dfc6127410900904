use gloo::timers::callback::Timeout;
use marubatsu_protocol::{
    CreatedSession, EventType, GameEvent, GameSession, GameStatus, PlayerId, SessionId,
    UserSummary,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::search::{OpponentSearch, SEARCH_DEBOUNCE_MS};
use crate::app::toast::{Toast, ToastView, TOAST_MS};
use crate::app::{CurrentUser, Services};
use crate::remote::{ChannelError, ServiceError, Subscription};

/// Badge class for a session status in the active-games list
pub(in crate::app) const fn status_variant(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Pending => "warning",
        GameStatus::InProgress => "success",
        GameStatus::Completed => "inverse",
    }
}

pub enum Msg {
    GamesLoaded(Result<Vec<GameSession>, ServiceError>),
    Refresh,
    SearchInput(String),
    SearchTimer(u64),
    SearchLoaded(Result<Vec<UserSummary>, ServiceError>),
    SelectOpponent(PlayerId),
    RemoveOpponent,
    CreateGame,
    GameCreated {
        opponent_name: String,
        result: Result<CreatedSession, ServiceError>,
    },
    PushReceived(GameEvent),
    ChannelDown(ChannelError),
    DismissToast,
}

#[derive(Properties, Clone, PartialEq)]
pub struct LobbyProps {
    pub user: CurrentUser,
    pub services: Services,
    #[prop_or_default]
    pub on_play: Callback<SessionId>,
}

/// Lobby: the user's active sessions, opponent search, and game
/// creation. The push channel keeps the session list fresh.
pub struct Lobby {
    games: Vec<GameSession>,
    search: OpponentSearch,
    loading: bool,
    creating: bool,
    announce_refresh: bool,
    error: Option<String>,
    toast: Option<Toast>,
    toast_timer: Option<Timeout>,
    /// Replacing the handle cancels the pending timer; dropping the
    /// component cancels it too, so no callback outlives the lobby
    search_timer: Option<Timeout>,
    _subscription: Subscription,
}

impl Lobby {
    fn fetch_games(&mut self, ctx: &Context<Self>) {
        self.loading = true;
        let api = ctx.props().services.api.clone();
        ctx.link()
            .send_future(async move { Msg::GamesLoaded(api.my_active_games().await) });
    }

    fn show_toast(&mut self, ctx: &Context<Self>, toast: Toast) {
        self.toast = Some(toast);
        let link = ctx.link().clone();
        self.toast_timer = Some(Timeout::new(TOAST_MS, move || {
            link.send_message(Msg::DismissToast);
        }));
    }

    fn view_game_row(&self, ctx: &Context<Self>, game: &GameSession) -> Html {
        let me = &ctx.props().user.id;
        let session_id = game.session_id.clone();
        let on_play = ctx.props().on_play.clone();
        let cb_play = Callback::from(move |_: MouseEvent| on_play.emit(session_id.clone()));
        let invitation = game.is_pending_invitation_for(me);

        html! {
            <li class="game-row">
                <span class="opponent">{ game.opponent_name() }</span>
                <span class={classes!("badge", status_variant(game.game_status))}>
                    {
                        match game.game_status {
                            GameStatus::Pending => "Pending",
                            GameStatus::InProgress => "In Progress",
                            GameStatus::Completed => "Completed",
                        }
                    }
                </span>
                {
                    if invitation {
                        html! { <span class="invitation">{"Invitation"}</span> }
                    } else {
                        html! {}
                    }
                }
                <button onclick={cb_play}>{ if invitation { "Respond" } else { "Play" } }</button>
            </li>
        }
    }

    fn view_search(&self, ctx: &Context<Self>) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SearchInput(input.value())
        });
        let cb_create = ctx.link().callback(|_| Msg::CreateGame);

        html! {
            <section class="new-game">
                <h3>{"Start a new game"}</h3>
                <input
                    type="search"
                    placeholder="Search opponents…"
                    value={self.search.term().to_owned()}
                    {oninput}
                />
                {
                    if !self.search.results().is_empty() {
                        html! {
                            <ul class="search-results">
                                {
                                    for self.search.results().iter().map(|user| {
                                        let id = user.id.clone();
                                        let cb_select = ctx
                                            .link()
                                            .callback(move |_| Msg::SelectOpponent(id.clone()));
                                        html! {
                                            <li><button onclick={cb_select}>{ &user.name }</button></li>
                                        }
                                    })
                                }
                            </ul>
                        }
                    } else if self.search.no_results() {
                        html! { <p class="no-results">{"No players found"}</p> }
                    } else {
                        html! {}
                    }
                }
                {
                    if let Some(opponent) = self.search.selected() {
                        let cb_remove = ctx.link().callback(|_| Msg::RemoveOpponent);
                        html! {
                            <p class="selected">
                                { &opponent.name }
                                <button class="remove" onclick={cb_remove}>{"×"}</button>
                            </p>
                        }
                    } else {
                        html! {}
                    }
                }
                <button class="create" disabled={self.creating} onclick={cb_create}>
                    { if self.creating { "Creating…" } else { "Create Game" } }
                </button>
            </section>
        }
    }
}

impl Component for Lobby {
    type Message = Msg;
    type Properties = LobbyProps;

    fn create(ctx: &Context<Self>) -> Self {
        let subscription = ctx.props().services.channel.subscribe(
            ctx.link().callback(Msg::PushReceived),
            ctx.link().callback(Msg::ChannelDown),
        );
        let mut lobby = Self {
            games: Vec::new(),
            search: OpponentSearch::new(),
            loading: false,
            creating: false,
            announce_refresh: false,
            error: None,
            toast: None,
            toast_timer: None,
            search_timer: None,
            _subscription: subscription,
        };
        lobby.fetch_games(ctx);
        lobby
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::GamesLoaded(Ok(games)) => {
                log::debug!("loaded {} active games", games.len());
                self.games = games;
                self.error = None;
                self.loading = false;
                if std::mem::take(&mut self.announce_refresh) {
                    self.show_toast(ctx, Toast::success("Games refreshed"));
                }
                true
            }
            Msg::GamesLoaded(Err(err)) => {
                self.error = Some(err.user_message("Failed to load active games"));
                self.games.clear();
                self.loading = false;
                self.announce_refresh = false;
                true
            }
            Msg::Refresh => {
                self.announce_refresh = true;
                self.fetch_games(ctx);
                true
            }
            Msg::SearchInput(term) => {
                let generation = self.search.input(term);
                let link = ctx.link().clone();
                self.search_timer = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                    link.send_message(Msg::SearchTimer(generation));
                }));
                true
            }
            Msg::SearchTimer(generation) => {
                let Some(term) = self.search.timer_fired(generation) else {
                    return true;
                };
                let api = ctx.props().services.api.clone();
                ctx.link().send_future(async move {
                    Msg::SearchLoaded(api.search_users(&term).await)
                });
                false
            }
            Msg::SearchLoaded(Ok(users)) => {
                self.search.apply_results(users, &ctx.props().user.id);
                true
            }
            Msg::SearchLoaded(Err(err)) => {
                log::error!("search error: {}", err);
                self.search.clear_results();
                true
            }
            Msg::SelectOpponent(id) => self.search.select(&id),
            Msg::RemoveOpponent => self.search.clear_selection(),
            Msg::CreateGame => {
                let Some(opponent) = self.search.selected().cloned() else {
                    // pre-flight check; nothing is sent without a selection
                    self.show_toast(ctx, Toast::warning("Please select an opponent first"));
                    return true;
                };
                self.creating = true;
                let api = ctx.props().services.api.clone();
                ctx.link().send_future(async move {
                    Msg::GameCreated {
                        opponent_name: opponent.name.clone(),
                        result: api.create_session(&opponent.id).await,
                    }
                });
                true
            }
            Msg::GameCreated {
                opponent_name,
                result: Ok(created),
            } => {
                self.creating = false;
                self.search.clear_selection();
                self.show_toast(
                    ctx,
                    Toast::success(format!("Game invitation sent to {}!", opponent_name)),
                );
                self.fetch_games(ctx);
                ctx.props().on_play.emit(created.session_id);
                true
            }
            Msg::GameCreated {
                result: Err(err), ..
            } => {
                self.creating = false;
                self.show_toast(ctx, Toast::error(err.user_message("Failed to create game")));
                true
            }
            Msg::PushReceived(event) => {
                // every event type can change the active-games list
                self.fetch_games(ctx);
                if event.event_type == EventType::InvitationSent
                    && event.acting_player_id != ctx.props().user.id
                {
                    self.show_toast(ctx, Toast::info("You received a new game invitation!"));
                }
                true
            }
            Msg::ChannelDown(err) => {
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
        let cb_refresh = ctx.link().callback(|_| Msg::Refresh);

        html! {
            <div class="marubatsu lobby">
                <section class="active-games">
                    <h3>{"Your games"}</h3>
                    {
                        if let Some(error) = &self.error {
                            html! { <p class="error">{ error }</p> }
                        } else if self.loading && self.games.is_empty() {
                            html! { <p class="loading">{"Loading…"}</p> }
                        } else if self.games.is_empty() {
                            html! { <p class="empty">{"No active games. Start one below!"}</p> }
                        } else {
                            html! {
                                <ul>
                                    { for self.games.iter().map(|game| self.view_game_row(ctx, game)) }
                                </ul>
                            }
                        }
                    }
                    <button class="refresh" onclick={cb_refresh}>{"Refresh"}</button>
                </section>
                { self.view_search(ctx) }
                <ToastView
                    toast={self.toast.clone()}
                    on_dismiss={ctx.link().callback(|_| Msg::DismissToast)}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_variants_match_the_badge_palette() {
        assert_eq!(status_variant(GameStatus::Pending), "warning");
        assert_eq!(status_variant(GameStatus::InProgress), "success");
        assert_eq!(status_variant(GameStatus::Completed), "inverse");
    }
}
