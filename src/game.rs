//! Game logic and game board.

use core::fmt;

use crate::state::GameState;

/// Number of coins in a row to win the game.
pub const SERIES_LEN: usize = 4;

/// Wire value of "no move": the agent had no legal move or ran out of time.
pub const NO_MOVE: i32 = -1;

/// Line directions as `(row step, column step)`: `-`, `|`, `/` and `\`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Encodes an optional column the way tournament harnesses expect it.
#[must_use]
pub fn move_to_wire(column: Option<usize>) -> i32 {
    column.and_then(|col| i32::try_from(col).ok()).unwrap_or(NO_MOVE)
}

#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq, thiserror::Error)]
pub enum GameboardError {
    /// Column is full.
    #[error("column is full")]
    ColumnFull,
    #[error("column does not exist")]
    InvalidColumn,
    /// A player already connected four.
    #[error("game is already decided")]
    GameOver,
}

#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Player1 => 'X',
            Self::Player2 => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "Player 1 ({})", self.symbol()),
            Self::Player2 => write!(f, "Player 2 ({})", self.symbol()),
        }
    }
}

/// Gameboard.
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq, Hash)]
pub struct Gameboard<const W: usize = 7, const H: usize = 6>(
    /*
     * Board: rows --> col --> field
     * (row=0,col=0) <==> bottom left of game board
     */
    [[Option<Player>; W]; H],
);

impl<const W: usize, const H: usize> Default for Gameboard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        assert!(W >= SERIES_LEN);
        assert!(H >= SERIES_LEN);

        Self([[None; W]; H])
    }

    #[must_use]
    pub const fn cells(&self) -> &[[Option<Player>; W]; H] {
        &self.0
    }

    /// Returns the index to the next free slot in the selected column.
    ///
    /// Returns `None` if there are no more free slots.
    fn next_slot_in_column(&self, column_index: usize) -> Option<usize> {
        (0..H).find(|&row_index| self.0[row_index][column_index].is_none())
    }

    /// Emits the column indices where moves are legal, in ascending order.
    pub fn available_columns_iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..W).filter(|&col| self.next_slot_in_column(col).is_some())
    }

    /// Returns the number of free slots in the given column.
    #[must_use]
    pub fn free_slots_in_column(&self, column: usize) -> usize {
        self.next_slot_in_column(column).map_or(0, |row| H - row)
    }

    /// Returns whether every slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.available_columns_iter().next().is_none()
    }

    /// Number of chips `player` has in `column`.
    #[must_use]
    pub fn chips_in_column(&self, column: usize, player: Player) -> usize {
        (0..H).filter(|&row| self.0[row][column] == Some(player)).count()
    }

    pub(crate) fn insert_player_chip(
        &mut self,
        column_index: usize,
        player: Player,
    ) -> Result<(), GameboardError> {
        if column_index >= W {
            return Err(GameboardError::InvalidColumn);
        }

        let row_index = self
            .next_slot_in_column(column_index)
            .ok_or(GameboardError::ColumnFull)?;
        self.0[row_index][column_index] = Some(player);
        Ok(())
    }

    /// The `SERIES_LEN` cells starting at `(row, col)` and walking along
    /// `(dr, dc)`, or `None` if the line leaves the board.
    fn window(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
    ) -> Option<[Option<Player>; SERIES_LEN]> {
        let mut cells = [None; SERIES_LEN];
        for (step, cell) in (0_isize..).zip(cells.iter_mut()) {
            let r = row.checked_add_signed(dr * step)?;
            let c = col.checked_add_signed(dc * step)?;
            if r >= H || c >= W {
                return None;
            }
            *cell = self.0[r][c];
        }
        Some(cells)
    }

    /// Emits every run of `SERIES_LEN` consecutive cells in all four
    /// directions.
    pub fn windows(&self) -> impl Iterator<Item = [Option<Player>; SERIES_LEN]> + '_ {
        DIRECTIONS.into_iter().flat_map(move |direction| {
            (0..H).flat_map(move |row| {
                (0..W).filter_map(move |col| self.window(row, col, direction))
            })
        })
    }

    /// Check if `player` has `SERIES_LEN` chips in a row.
    #[must_use]
    pub fn check_for_winner(&self, player: Player) -> bool {
        self.windows()
            .any(|window| window.iter().all(|&cell| cell == Some(player)))
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }
}

impl<const W: usize, const H: usize> fmt::Display for Gameboard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print rows reverted so that it appears naturally.
        for row in self.0.iter().rev() {
            for cell in row {
                write!(f, "{},", cell.map_or(' ', Player::symbol))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", "--".repeat(W))?;
        for col_id in 1..=W {
            write!(f, "{col_id},")?;
        }
        Ok(())
    }
}

/// Game with all its state.
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq, Hash)]
pub struct Game<const W: usize = 7, const H: usize = 6> {
    board: Gameboard<W, H>,
    round: usize,
    active: Player,
    winner: Option<Player>,
}

impl<const W: usize, const H: usize> Game<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_first_player(Player::Player1)
    }

    #[must_use]
    pub const fn with_first_player(first: Player) -> Self {
        Self {
            board: Gameboard::new(),
            round: 0,
            active: first,
            winner: None,
        }
    }

    /// Replays `columns` from an empty board, players alternating.
    pub fn from_columns(columns: &[usize]) -> Result<Self, GameboardError> {
        let mut game = Self::new();
        for &col in columns {
            game.play(col)?;
        }
        Ok(game)
    }

    /// Drops a chip of the active player into `column_index` and hands the
    /// turn to the opponent.
    pub fn play(&mut self, column_index: usize) -> Result<(), GameboardError> {
        if self.winner.is_some() {
            return Err(GameboardError::GameOver);
        }

        self.board.insert_player_chip(column_index, self.active)?;
        self.round += 1;
        if self.board.check_for_winner(self.active) {
            self.winner = Some(self.active);
        }
        self.active = self.active.opponent();
        Ok(())
    }

    #[must_use]
    pub const fn board(&self) -> &Gameboard<W, H> {
        &self.board
    }

    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub const fn active(&self) -> Player {
        self.active
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The board is full and nobody connected four.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none() && self.board.is_full()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.board.is_full()
    }
}

impl<const W: usize, const H: usize> Default for Game<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> GameState for Game<W, H> {
    type Move = usize;
    type Player = Player;

    fn available_moves(&self) -> Vec<usize> {
        if self.winner.is_some() {
            return Vec::new();
        }
        self.board.available_columns_iter().collect()
    }

    /// # Panics
    ///
    /// Panics if `column` is not a legal move.
    fn apply(&self, column: usize) -> Self {
        let mut next = self.clone();
        if let Err(err) = next.play(column) {
            panic!("illegal move {column}: {err}");
        }
        next
    }

    fn active_player(&self) -> Player {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_column<const W: usize, const H: usize>(board: &mut Gameboard<W, H>, col: usize) {
        for _ in 0..H {
            board.insert_player_chip(col, Player::Player1).unwrap();
        }
    }

    #[test]
    fn test_next_slot_in_column() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(board.next_slot_in_column(0), Some(0));

        for i in 0..board.height() - 1 {
            board.0[i][0] = Some(Player::Player1);
            assert_eq!(board.next_slot_in_column(0), Some(i + 1));
        }

        board.0[board.height() - 1][0] = Some(Player::Player1);
        assert_eq!(board.next_slot_in_column(0), None);
    }

    #[test]
    fn test_free_slots_in_column() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(board.free_slots_in_column(0), 6);

        for i in 0..board.height() {
            board.0[i][0] = Some(Player::Player2);
            assert_eq!(board.free_slots_in_column(0), 6 - i - 1);
        }
        assert_eq!(board.chips_in_column(0, Player::Player2), 6);
        assert_eq!(
            board.insert_player_chip(0, Player::Player1),
            Err(GameboardError::ColumnFull)
        );
        assert_eq!(
            board.insert_player_chip(7, Player::Player1),
            Err(GameboardError::InvalidColumn)
        );
    }

    #[test]
    fn window_count_matches_geometry() {
        // 7x6: 24 horizontal, 21 vertical, 12 per diagonal direction
        assert_eq!(Gameboard::<7, 6>::new().windows().count(), 69);
        // 4x4: 4 rows, 4 columns, 2 diagonals
        assert_eq!(Gameboard::<4, 4>::new().windows().count(), 10);
    }

    #[test]
    fn find_winner_horizontally() {
        let mut board = Gameboard::<7, 6>::new();
        board.0[4][0] = Some(Player::Player1);
        board.0[4][1] = Some(Player::Player1);
        board.0[4][2] = Some(Player::Player1);
        assert!(!board.check_for_winner(Player::Player1));

        board.0[4][3] = Some(Player::Player1);
        assert!(board.check_for_winner(Player::Player1));
        assert!(!board.check_for_winner(Player::Player2));
    }

    #[test]
    fn find_winner_vertically() {
        let mut board = Gameboard::<4, 4>::new();
        for _ in 0..3 {
            board.insert_player_chip(0, Player::Player2).unwrap();
        }
        assert!(!board.check_for_winner(Player::Player2));

        board.insert_player_chip(0, Player::Player2).unwrap();
        assert!(board.check_for_winner(Player::Player2));
        assert!(!board.check_for_winner(Player::Player1));
    }

    #[test]
    fn find_winner_diagonally() {
        // direction=/, gap breaks the line
        {
            let mut board = Gameboard::<7, 6>::new();
            board.0[0][0] = Some(Player::Player1);
            board.0[1][1] = Some(Player::Player1);
            board.0[2][2] = Some(Player::Player1);
            board.0[4][3] = Some(Player::Player1);
            assert!(!board.check_for_winner(Player::Player1));

            board.0[3][3] = Some(Player::Player1);
            assert!(board.check_for_winner(Player::Player1));
        }
        // direction=/, touching the right edge
        {
            let mut board = Gameboard::<7, 6>::new();
            board.0[0][3] = Some(Player::Player1);
            board.0[1][4] = Some(Player::Player1);
            board.0[2][5] = Some(Player::Player1);
            assert!(!board.check_for_winner(Player::Player1));

            board.0[3][6] = Some(Player::Player1);
            assert!(board.check_for_winner(Player::Player1));
        }
        // direction=\
        {
            let mut board = Gameboard::<7, 6>::new();
            board.0[4][3] = Some(Player::Player1);
            board.0[3][4] = Some(Player::Player1);
            board.0[2][5] = Some(Player::Player1);
            assert!(!board.check_for_winner(Player::Player1));

            board.0[1][6] = Some(Player::Player1);
            assert!(board.check_for_winner(Player::Player1));
        }
        // direction=\ on the smallest board
        {
            let mut board = Gameboard::<4, 4>::new();
            board.0[0][3] = Some(Player::Player1);
            board.0[1][2] = Some(Player::Player1);
            board.0[2][1] = Some(Player::Player1);
            board.0[3][0] = Some(Player::Player1);
            assert!(board.check_for_winner(Player::Player1));
        }
    }

    #[test]
    fn test_legal_moves_iter() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(
            board.available_columns_iter().collect::<Vec<_>>(),
            [0, 1, 2, 3, 4, 5, 6]
        );

        fill_column(&mut board, 1);
        fill_column(&mut board, 3);
        fill_column(&mut board, 5);
        fill_column(&mut board, 6);
        assert_eq!(board.available_columns_iter().collect::<Vec<_>>(), [0, 2, 4]);

        fill_column(&mut board, 0);
        fill_column(&mut board, 2);
        fill_column(&mut board, 4);
        assert_eq!(board.available_columns_iter().count(), 0);
        assert!(board.is_full());
    }

    #[test]
    fn game_alternates_players_and_records_winner() {
        let mut game = Game::<7, 6>::from_columns(&[0, 1, 0, 1, 0, 1]).unwrap();
        assert_eq!(game.active(), Player::Player1);
        assert_eq!(game.round(), 6);
        assert_eq!(game.winner(), None);

        game.play(0).unwrap();
        assert_eq!(game.winner(), Some(Player::Player1));
        assert_eq!(game.active(), Player::Player2);
        assert!(game.is_over());
        assert!(!game.is_draw());
        assert_eq!(game.play(2), Err(GameboardError::GameOver));
    }

    #[test]
    fn won_game_has_no_available_moves() {
        let game = Game::<7, 6>::from_columns(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert!(game.available_moves().is_empty());
        assert!(game.is_terminal());
    }

    #[test]
    fn apply_leaves_receiver_untouched() {
        let game = Game::<7, 6>::new();
        let next = game.apply(3);
        assert_eq!(game.round(), 0);
        assert_eq!(game.board().chips_in_column(3, Player::Player1), 0);
        assert_eq!(next.board().chips_in_column(3, Player::Player1), 1);
        assert_eq!(next.active_player(), Player::Player2);
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let columns = [
            2, 4, 0, 3, 2, 3, 3, 6, 5, 6, 2, 0, 4, 3, 1, 1, 3, 2, 4, 2, 6, 3, 2, 5, 6, 6, 0,
            4, 0, 1, 0, 0, 4, 6, 4, 5, 1, 1, 5, 1, 5, 5,
        ];
        let game = Game::<7, 6>::from_columns(&columns).unwrap();
        assert_eq!(game.winner(), None);
        assert!(game.is_draw());
        assert!(game.available_moves().is_empty());
    }

    #[test]
    fn wire_encoding_uses_sentinel() {
        assert_eq!(move_to_wire(Some(4)), 4);
        assert_eq!(move_to_wire(None), NO_MOVE);
    }

    #[test]
    fn display_labels_columns() {
        let game = Game::<4, 4>::from_columns(&[1]).unwrap();
        let rendered = game.board().to_string();
        assert!(rendered.starts_with(" , , , ,\n"));
        assert!(rendered.contains(" ,X, , ,\n"));
        assert!(rendered.ends_with("1,2,3,4,"));
    }
}
