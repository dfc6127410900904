use marubatsu_core::{CellIx, Match};
use yew::prelude::*;

use crate::app::board::BoardView;
use crate::app::status::{GameStatus, Scoreboard};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Msg {
    CellActivated(CellIx),
    NewGame,
    ResetScore,
}

/// Local hot-seat game: both players share the screen and all state
/// lives in a single `Match`, rendering as a pure projection of it
pub struct GameView {
    game: Match,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self { game: Match::new() }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::CellActivated(ix) => match self.game.play(ix) {
                Ok(outcome) => {
                    log::debug!("played cell {}: {:?}", ix, outcome);
                    true
                }
                Err(err) => {
                    // occupied cell or finished game: a no-op by contract
                    log::debug!("move rejected at {}: {}", ix, err);
                    false
                }
            },
            Msg::NewGame => {
                log::debug!("new game, scores kept");
                self.game.new_game();
                true
            }
            Msg::ResetScore => {
                log::debug!("score reset");
                self.game.reset_score();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let game = self.game.game();
        let score = self.game.score();
        let on_cell = ctx.link().callback(Msg::CellActivated);
        let cb_new_game = ctx.link().callback(|_| Msg::NewGame);
        let cb_reset_score = ctx.link().callback(|_| Msg::ResetScore);

        html! {
            <div class="marubatsu practice">
                <GameStatus
                    winner={game.winner()}
                    is_draw={game.is_draw()}
                    current={game.current_player()}
                />
                <BoardView
                    board={*game.board()}
                    winning_line={game.winning_line()}
                    game_over={game.is_over()}
                    on_cell={on_cell}
                />
                <Scoreboard
                    x_wins={score.x_wins()}
                    o_wins={score.o_wins()}
                    draws={score.draws()}
                />
                <nav>
                    <button onclick={cb_new_game}>{"New Game"}</button>
                    <button onclick={cb_reset_score}>{"Reset Score"}</button>
                </nav>
            </div>
        }
    }
}
