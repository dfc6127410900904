use marubatsu_protocol::{PlayerId, PlayerStats, RankedPlayer};
use yew::prelude::*;

use crate::app::Services;
use crate::remote::ServiceError;

/// Always one decimal; a winless record reads "0.0%"
pub(in crate::app) fn format_win_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

pub(in crate::app) fn medal_icon(rank: usize) -> &'static str {
    match rank {
        1 => "utility:trophy",
        2 => "utility:medal",
        3 => "utility:ribbon",
        _ => "",
    }
}

pub(in crate::app) fn medal_class(rank: usize) -> &'static str {
    match rank {
        1 => "gold",
        2 => "silver",
        3 => "bronze",
        _ => "",
    }
}

/// Bar color for a win percentage
pub(in crate::app) fn progress_variant(percentage: f64) -> &'static str {
    if percentage >= 70.0 {
        "success"
    } else if percentage >= 50.0 {
        "warning"
    } else {
        "error"
    }
}

pub enum LeaderboardMsg {
    Loaded(Result<Vec<RankedPlayer>, ServiceError>),
}

#[derive(Properties, Clone, PartialEq)]
pub struct LeaderboardProps {
    pub services: Services,
    #[prop_or(10)]
    pub limit: u32,
}

/// Top players by win percentage, ranked by the service
pub struct Leaderboard {
    rows: Vec<RankedPlayer>,
    loading: bool,
    error: Option<String>,
}

impl Leaderboard {
    fn fetch(&mut self, ctx: &Context<Self>) {
        self.loading = true;
        let api = ctx.props().services.api.clone();
        let limit = ctx.props().limit;
        ctx.link()
            .send_future(async move { LeaderboardMsg::Loaded(api.leaderboard(limit).await) });
    }

    fn view_row(rank: usize, row: &RankedPlayer) -> Html {
        html! {
            <tr class={classes!(medal_class(rank))}>
                <td class="rank">
                    {
                        if medal_icon(rank).is_empty() {
                            html! { { rank } }
                        } else {
                            html! { <span class="medal" data-icon={medal_icon(rank)}>{ rank }</span> }
                        }
                    }
                </td>
                <td class="name">{ &row.player_name }</td>
                <td class="wins">{ row.wins }</td>
                <td class="games">{ row.total_games }</td>
                <td class="percentage">{ format_win_percentage(row.win_percentage) }</td>
            </tr>
        }
    }
}

impl Component for Leaderboard {
    type Message = LeaderboardMsg;
    type Properties = LeaderboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut board = Self {
            rows: Vec::new(),
            loading: false,
            error: None,
        };
        board.fetch(ctx);
        board
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().limit != old_props.limit {
            self.fetch(ctx);
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LeaderboardMsg::Loaded(Ok(rows)) => {
                self.rows = rows;
                self.error = None;
                self.loading = false;
            }
            LeaderboardMsg::Loaded(Err(err)) => {
                log::error!("leaderboard error: {}", err);
                self.error = Some(err.user_message("Failed to load leaderboard"));
                self.loading = false;
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <section class="leaderboard">
                <h3>{"Leaderboard"}</h3>
                {
                    if let Some(error) = &self.error {
                        html! { <p class="error">{ error }</p> }
                    } else if self.loading && self.rows.is_empty() {
                        html! { <p class="loading">{"Loading…"}</p> }
                    } else if self.rows.is_empty() {
                        html! { <p class="empty">{"No games played yet"}</p> }
                    } else {
                        html! {
                            <table>
                                <thead>
                                    <tr>
                                        <th>{"Rank"}</th>
                                        <th>{"Player"}</th>
                                        <th>{"Wins"}</th>
                                        <th>{"Games"}</th>
                                        <th>{"Win %"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        for self
                                            .rows
                                            .iter()
                                            .enumerate()
                                            .map(|(i, row)| Self::view_row(i + 1, row))
                                    }
                                </tbody>
                            </table>
                        }
                    }
                }
            </section>
        }
    }
}

pub enum StatsMsg {
    Loaded(Result<PlayerStats, ServiceError>),
}

#[derive(Properties, Clone, PartialEq)]
pub struct PlayerStatsProps {
    pub player_id: PlayerId,
    pub services: Services,
}

/// The viewing player's own record
pub struct PlayerStatsView {
    stats: Option<PlayerStats>,
    error: Option<String>,
}

impl PlayerStatsView {
    fn fetch(&mut self, ctx: &Context<Self>) {
        let api = ctx.props().services.api.clone();
        let player_id = ctx.props().player_id.clone();
        ctx.link().send_future(async move {
            StatsMsg::Loaded(api.player_statistics(&player_id).await)
        });
    }
}

impl Component for PlayerStatsView {
    type Message = StatsMsg;
    type Properties = PlayerStatsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            stats: None,
            error: None,
        };
        view.fetch(ctx);
        view
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().player_id != old_props.player_id {
            self.stats = None;
            self.error = None;
            self.fetch(ctx);
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            StatsMsg::Loaded(Ok(stats)) => {
                self.stats = Some(stats);
                self.error = None;
            }
            StatsMsg::Loaded(Err(err)) => {
                log::error!("player statistics error: {}", err);
                self.error = Some(err.user_message("Failed to load your statistics"));
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <section class="player-stats">
                <h3>{"Your record"}</h3>
                {
                    if let Some(error) = &self.error {
                        html! { <p class="error">{ error }</p> }
                    } else if let Some(stats) = &self.stats {
                        if stats.total_games == 0 {
                            html! { <p class="empty">{"No games played yet. Start your first game!"}</p> }
                        } else {
                            html! {
                                <>
                                    <dl>
                                        <dt>{"Wins"}</dt><dd>{ stats.wins }</dd>
                                        <dt>{"Losses"}</dt><dd>{ stats.losses }</dd>
                                        <dt>{"Draws"}</dt><dd>{ stats.draws }</dd>
                                        <dt>{"Games"}</dt><dd>{ stats.total_games }</dd>
                                    </dl>
                                    <div
                                        class={classes!("progress", progress_variant(stats.win_percentage))}
                                        role="progressbar"
                                        aria-valuenow={format!("{:.0}", stats.win_percentage)}
                                        aria-valuemin="0"
                                        aria-valuemax="100"
                                    >
                                        { format_win_percentage(stats.win_percentage) }
                                    </div>
                                </>
                            }
                        }
                    } else {
                        html! { <p class="loading">{"Loading…"}</p> }
                    }
                }
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_percentage_always_carries_one_decimal() {
        assert_eq!(format_win_percentage(0.0), "0.0%");
        assert_eq!(format_win_percentage(33.333), "33.3%");
        assert_eq!(format_win_percentage(100.0), "100.0%");
    }

    #[test]
    fn medals_go_to_the_top_three() {
        assert_eq!(medal_icon(1), "utility:trophy");
        assert_eq!(medal_icon(2), "utility:medal");
        assert_eq!(medal_icon(3), "utility:ribbon");
        assert_eq!(medal_icon(4), "");

        assert_eq!(medal_class(1), "gold");
        assert_eq!(medal_class(2), "silver");
        assert_eq!(medal_class(3), "bronze");
        assert_eq!(medal_class(4), "");
    }

    #[test]
    fn progress_variant_thresholds() {
        assert_eq!(progress_variant(70.0), "success");
        assert_eq!(progress_variant(69.9), "warning");
        assert_eq!(progress_variant(50.0), "warning");
        assert_eq!(progress_variant(49.9), "error");
        assert_eq!(progress_variant(0.0), "error");
    }
}
