use marubatsu_core::{col_of, row_of, Board, Cell, CellIx, Line, Player};
use yew::prelude::*;

/// What one cell needs to render itself. The whole projection from
/// board state to cell presentation lives here so it stays testable.
#[derive(Clone, Debug, PartialEq)]
pub struct CellView {
    pub value: Cell,
    pub index: CellIx,
    pub disabled: bool,
    pub winning: bool,
    pub aria_label: String,
}

/// "Row R, Column C, {empty | marked by player V}" with 1-based R/C
pub fn cell_aria_label(ix: CellIx, value: Cell) -> String {
    match value {
        Some(player) => format!(
            "Row {}, Column {}, marked by player {}",
            row_of(ix),
            col_of(ix),
            player
        ),
        None => format!("Row {}, Column {}, empty", row_of(ix), col_of(ix)),
    }
}

pub fn cell_views(board: &Board, winning_line: Option<Line>, game_over: bool) -> Vec<CellView> {
    board
        .iter()
        .enumerate()
        .map(|(ix, &value)| {
            let index = ix as CellIx;
            CellView {
                value,
                index,
                disabled: value.is_some() || game_over,
                winning: winning_line.is_some_and(|line| line.contains(&index)),
                aria_label: cell_aria_label(index, value),
            }
        })
        .collect()
}

#[derive(Properties, Clone, PartialEq)]
pub struct CellProps {
    pub cell: CellView,
    pub on_activate: Callback<CellIx>,
}

#[function_component(BoardCell)]
pub fn board_cell(props: &CellProps) -> Html {
    let CellProps { cell, on_activate } = props.clone();
    let class = classes!("cell", cell.winning.then_some("winning-cell"));
    let index = cell.index;
    let disabled = cell.disabled;

    let onclick = Callback::from(move |_: MouseEvent| {
        // activation is suppressed entirely while disabled
        if !disabled {
            on_activate.emit(index);
        } else {
            log::trace!("ignored click on disabled cell {}", index);
        }
    });

    html! {
        <td>
            <button
                {class}
                disabled={cell.disabled}
                aria-label={cell.aria_label.clone()}
                {onclick}
            >
                { cell.value.map_or("", Player::as_str) }
            </button>
        </td>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct BoardProps {
    pub board: Board,
    #[prop_or_default]
    pub winning_line: Option<Line>,
    #[prop_or_default]
    pub game_over: bool,
    pub on_cell: Callback<CellIx>,
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardProps) -> Html {
    let cells = cell_views(&props.board, props.winning_line, props.game_over);

    html! {
        <table class="board">
            {
                for cells.chunks(3).map(|row| html! {
                    <tr>
                        {
                            for row.iter().map(|cell| html! {
                                <BoardCell cell={cell.clone()} on_activate={props.on_cell.clone()}/>
                            })
                        }
                    </tr>
                })
            }
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: Board = [None; 9];

    #[test]
    fn aria_labels_cover_every_index_and_both_players() {
        let expected_positions = [
            (1, 1), (1, 2), (1, 3),
            (2, 1), (2, 2), (2, 3),
            (3, 1), (3, 2), (3, 3),
        ];

        for (ix, (row, col)) in expected_positions.into_iter().enumerate() {
            let ix = ix as CellIx;
            assert_eq!(
                cell_aria_label(ix, None),
                format!("Row {}, Column {}, empty", row, col)
            );
            assert_eq!(
                cell_aria_label(ix, Some(Player::X)),
                format!("Row {}, Column {}, marked by player X", row, col)
            );
            assert_eq!(
                cell_aria_label(ix, Some(Player::O)),
                format!("Row {}, Column {}, marked by player O", row, col)
            );
        }
    }

    #[test]
    fn occupied_cells_are_disabled() {
        let mut board = EMPTY;
        board[4] = Some(Player::X);

        let views = cell_views(&board, None, false);
        assert!(views[4].disabled);
        assert!(!views[0].disabled);
    }

    #[test]
    fn game_over_disables_every_cell() {
        let views = cell_views(&EMPTY, None, true);
        assert!(views.iter().all(|cell| cell.disabled));
    }

    #[test]
    fn winning_line_members_are_highlighted() {
        let mut board = EMPTY;
        for ix in [0usize, 1, 2] {
            board[ix] = Some(Player::X);
        }

        let views = cell_views(&board, Some([0, 1, 2]), true);
        assert!(views[0].winning);
        assert!(views[1].winning);
        assert!(views[2].winning);
        assert!(views[3..].iter().all(|cell| !cell.winning));
    }
}
