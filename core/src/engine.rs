use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Draw
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves are still being accepted
    InProgress,
    /// A player completed a line
    Won { player: Player, line: Line },
    /// Every cell is occupied and no line was completed
    Draw,
}

impl Outcome {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// What an accepted move did to the game
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NextTurn,
    Won(Line),
    Draw,
}

/// One game of tic-tac-toe from the empty board to a terminal outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    current: Player,
    outcome: Outcome,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: [None; BOARD_CELLS],
            current: Player::X,
            outcome: Outcome::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, ix: CellIx) -> Cell {
        self.board[ix as usize]
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Won { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<Line> {
        match self.outcome {
            Outcome::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self.outcome, Outcome::Draw)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_final()
    }

    /// Place the current player's mark at `ix` and advance the game.
    ///
    /// Rejected moves (out-of-range index, occupied cell, finished
    /// game) leave the board untouched.
    pub fn mark(&mut self, ix: CellIx) -> Result<MoveOutcome> {
        let ix = self.validate_ix(ix)?;
        self.check_not_finished()?;

        if self.board[ix as usize].is_some() {
            return Err(GameError::CellOccupied);
        }

        let player = self.current;
        self.board[ix as usize] = Some(player);
        log::debug!("{} marked cell {}", player, ix);

        Ok(if let Some(line) = self.scan_win() {
            self.outcome = Outcome::Won { player, line };
            log::debug!("{} wins with line {:?}", player, line);
            MoveOutcome::Won(line)
        } else if self.board.iter().all(Option::is_some) {
            self.outcome = Outcome::Draw;
            log::debug!("game is a draw");
            MoveOutcome::Draw
        } else {
            self.current = player.other();
            MoveOutcome::NextTurn
        })
    }

    /// First completed pattern in declared order, if any
    fn scan_win(&self) -> Option<Line> {
        WIN_PATTERNS.into_iter().find(|&[a, b, c]| {
            let first = self.board[a as usize];
            first.is_some() && first == self.board[b as usize] && first == self.board[c as usize]
        })
    }

    fn validate_ix(&self, ix: CellIx) -> Result<CellIx> {
        if (ix as usize) < BOARD_CELLS {
            Ok(ix)
        } else {
            Err(GameError::InvalidCell)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.outcome.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session win/draw tallies, preserved across games
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl ScoreCard {
    pub const fn x_wins(self) -> u32 {
        self.x_wins
    }

    pub const fn o_wins(self) -> u32 {
        self.o_wins
    }

    pub const fn draws(self) -> u32 {
        self.draws
    }

    pub const fn wins_for(self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won { player: Player::X, .. } => self.x_wins += 1,
            Outcome::Won { player: Player::O, .. } => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A run of games against the same opponent: the live game plus the
/// score card that survives "new game" but not "reset score"
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    game: Game,
    score: ScoreCard,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn score(&self) -> ScoreCard {
        self.score
    }

    /// Forward a move to the game, tallying terminal outcomes
    pub fn play(&mut self, ix: CellIx) -> Result<MoveOutcome> {
        let outcome = self.game.mark(ix)?;
        if self.game.is_over() {
            self.score.record(self.game.outcome());
        }
        Ok(outcome)
    }

    /// Fresh board with X to move; tallies are kept
    pub fn new_game(&mut self) {
        self.game = Game::new();
    }

    /// Zero all tallies, then start a fresh board
    pub fn reset_score(&mut self) {
        self.score.reset();
        self.new_game();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(m: &mut Match, moves: &[CellIx]) {
        for &ix in moves {
            m.play(ix).unwrap();
        }
    }

    #[test]
    fn players_alternate_starting_from_x() {
        let mut game = Game::new();
        assert_eq!(game.current_player(), Player::X);

        for (turn, ix) in [4u8, 0, 8, 2, 3].into_iter().enumerate() {
            let expected = if turn % 2 == 0 { Player::X } else { Player::O };
            assert_eq!(game.current_player(), expected);
            game.mark(ix).unwrap();
            assert_eq!(game.cell_at(ix), Some(expected));
        }

        let occupied = game.board().iter().filter(|c| c.is_some()).count();
        assert_eq!(occupied, 5);
    }

    #[test]
    fn occupied_cell_is_rejected_and_board_unchanged() {
        let mut game = Game::new();
        game.mark(4).unwrap();

        let before = game.clone();
        assert_eq!(game.mark(4), Err(GameError::CellOccupied));
        assert_eq!(game, before);
        assert_eq!(game.current_player(), Player::O);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut game = Game::new();
        assert_eq!(game.mark(9), Err(GameError::InvalidCell));
        assert_eq!(game.mark(255), Err(GameError::InvalidCell));
    }

    #[test]
    fn row_win_reports_first_pattern_in_declared_order() {
        let mut m = Match::new();
        play_all(&mut m, &[0, 3, 1, 4, 2]);

        assert_eq!(m.game().winner(), Some(Player::X));
        assert_eq!(m.game().winning_line(), Some([0, 1, 2]));
        assert!(!m.game().is_draw());
        assert_eq!(m.score().x_wins(), 1);
        assert_eq!(m.score().o_wins(), 0);
        assert_eq!(m.score().draws(), 0);
    }

    #[test]
    fn column_win_is_detected() {
        let mut m = Match::new();
        // X: 0, 3, 6 down the left column; O elsewhere
        play_all(&mut m, &[0, 1, 3, 4, 6]);

        assert_eq!(m.game().winner(), Some(Player::X));
        assert_eq!(m.game().winning_line(), Some([0, 3, 6]));
        assert_eq!(m.score().x_wins(), 1);
    }

    #[test]
    fn diagonal_win_is_detected_for_o() {
        let mut m = Match::new();
        // O takes 2, 4, 6; X never completes a line
        play_all(&mut m, &[0, 2, 1, 4, 3, 6]);

        assert_eq!(m.game().winner(), Some(Player::O));
        assert_eq!(m.game().winning_line(), Some([2, 4, 6]));
        assert_eq!(m.score().o_wins(), 1);
        assert_eq!(m.score().x_wins(), 0);
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let mut m = Match::new();
        play_all(&mut m, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert!(m.game().is_draw());
        assert_eq!(m.game().winner(), None);
        assert_eq!(m.game().winning_line(), None);
        assert_eq!(m.score().draws(), 1);
    }

    #[test]
    fn moves_after_game_over_are_rejected() {
        let mut m = Match::new();
        play_all(&mut m, &[0, 3, 1, 4, 2]);

        let before = m.clone();
        assert_eq!(m.play(5), Err(GameError::AlreadyEnded));
        assert_eq!(m, before);
        assert_eq!(m.score().x_wins(), 1);
    }

    #[test]
    fn new_game_clears_board_but_keeps_score() {
        let mut m = Match::new();
        play_all(&mut m, &[0, 3, 1, 4, 2]);
        m.new_game();

        assert!(m.game().board().iter().all(Option::is_none));
        assert_eq!(m.game().current_player(), Player::X);
        assert_eq!(m.game().winner(), None);
        assert!(!m.game().is_draw());
        assert_eq!(m.score().x_wins(), 1);
    }

    #[test]
    fn reset_score_zeroes_all_tallies() {
        let mut m = Match::new();
        play_all(&mut m, &[0, 3, 1, 4, 2]);
        m.new_game();
        play_all(&mut m, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        m.reset_score();

        assert_eq!(m.score(), ScoreCard::default());
        assert!(m.game().board().iter().all(Option::is_none));
        assert_eq!(m.game().current_player(), Player::X);
    }

    #[test]
    fn simultaneous_scan_prefers_rows_over_diagonals() {
        // Filling index 4 completes both the middle row [3,4,5] and
        // the diagonal [0,4,8]; the row is declared first.
        let mut game = Game::new();
        for ix in [3, 1, 5, 2, 0, 6, 8, 7] {
            game.mark(ix).unwrap();
        }
        // X holds 0, 3, 5, 8; O holds 1, 2, 6, 7; X to move at 4
        game.mark(4).unwrap();

        assert_eq!(game.winner(), Some(Player::X));
        assert_eq!(game.winning_line(), Some([3, 4, 5]));
    }
}
