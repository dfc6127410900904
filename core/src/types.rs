use serde::{Deserialize, Serialize};

/// Board position, row-major from the top-left corner
pub type CellIx = u8;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// An ordered triple of board indices forming a completed pattern
pub type Line = [CellIx; 3];

/// The mark a player places on the board; X always moves first
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One board position, empty or marked
pub type Cell = Option<Player>;

/// The whole board as an ordered sequence of cells
pub type Board = [Cell; BOARD_CELLS];

/// All lines that win the game. The scan order (rows, then columns,
/// then diagonals) is part of the engine contract: the first completed
/// pattern in this order is the one reported as the winning line.
pub const WIN_PATTERNS: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 1-based row of a board index
pub const fn row_of(ix: CellIx) -> u8 {
    ix / 3 + 1
}

/// 1-based column of a board index
pub const fn col_of(ix: CellIx) -> u8 {
    ix % 3 + 1
}
