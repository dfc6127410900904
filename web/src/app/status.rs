use marubatsu_core::Player;
use yew::prelude::*;

/// Derived status line; a winner takes precedence over the draw flag
pub fn status_text(winner: Option<Player>, is_draw: bool, current: Player) -> String {
    if let Some(winner) = winner {
        format!("Player {} wins!", winner)
    } else if is_draw {
        "Game is a draw!".to_owned()
    } else {
        format!("Player {}'s turn", current)
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct GameStatusProps {
    #[prop_or_default]
    pub winner: Option<Player>,
    #[prop_or_default]
    pub is_draw: bool,
    pub current: Player,
}

#[function_component(GameStatus)]
pub fn game_status(props: &GameStatusProps) -> Html {
    html! {
        <p class="game-status" role="status">
            { status_text(props.winner, props.is_draw, props.current) }
        </p>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct ScoreboardProps {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

#[function_component(Scoreboard)]
pub fn scoreboard(props: &ScoreboardProps) -> Html {
    html! {
        <dl class="scoreboard">
            <dt>{"Player X"}</dt>
            <dd>{ props.x_wins }</dd>
            <dt>{"Player O"}</dt>
            <dd>{ props.o_wins }</dd>
            <dt>{"Draws"}</dt>
            <dd>{ props.draws }</dd>
        </dl>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_text_names_the_current_player() {
        assert_eq!(status_text(None, false, Player::X), "Player X's turn");
        assert_eq!(status_text(None, false, Player::O), "Player O's turn");
    }

    #[test]
    fn winner_text_beats_everything_else() {
        assert_eq!(status_text(Some(Player::O), false, Player::X), "Player O wins!");
        assert_eq!(status_text(Some(Player::X), true, Player::X), "Player X wins!");
    }

    #[test]
    fn draw_text_when_no_winner() {
        assert_eq!(status_text(None, true, Player::X), "Game is a draw!");
    }
}
