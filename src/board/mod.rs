use crate::prelude::*;

mod checks;
mod history;
mod player;
mod printers;
mod rules;

pub use history::{History, Move};
pub use player::Player;
pub use rules::Rules;

#[derive(Clone, PartialEq, Eq, Hash)]
/// A gravity grid for connected-line games.
///
/// Row `0` is the top of the grid, so pieces dropped into a column settle on the highest-indexed empty row.
pub struct Board
{
    /// The row-major cells of the grid; `None` is an empty cell.
    cells: Vec<Option<Player>>,

    /// The linear history on this board. Its length always equals the number of filled cells.
    history: History,

    /// The geometry this board was built from.
    rules: Rules,
}

impl Default for Board
{
    fn default() -> Self
    {
        Board {
            cells:   vec![None; Rules::default().cells()],
            history: History::default(),
            rules:   Rules::default(),
        }
    }
}

impl std::fmt::Debug for Board
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        if f.alternate()
        {
            self.pretty(f)
        }
        else
        {
            self.debug(f)
        }
    }
}

impl Board
{
    /// Gets the occupant of a cell, if the cell is on the grid and filled.
    pub fn cell(&self, row: usize, col: usize) -> Option<Player>
    {
        if row < self.rules.height && col < self.rules.width
        {
            self.cells[self.index(row, col)]
        }
        else
        {
            None
        }
    }

    /// Gets the history of this game.
    pub fn history(&self) -> &History
    {
        &self.history
    }

    /// Whether every column is full.
    pub fn is_full(&self) -> bool
    {
        self.history.len() == self.rules.cells()
    }

    /// Whether a piece can be dropped into the given column.
    pub fn is_legal(&self, col: usize) -> bool
    {
        self.next_open_row(col).is_some()
    }

    /// Gets the last move played, if one exists.
    pub fn last_move(&self) -> Option<Move>
    {
        self.history.prev()
    }

    /// Iterates the columns that still accept a piece, left to right.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_
    {
        (0..self.rules.width).filter(|col| self.is_legal(*col))
    }

    /// The moves played on this board so far, oldest first.
    pub fn moves(&self) -> &[Move]
    {
        self.history.as_slice()
    }

    /// Creates an empty board, if the rules describe a winnable grid.
    pub fn new(rules: Rules) -> Result<Board>
    {
        rules.validate()?;

        Ok(Board {
            cells: vec![None; rules.cells()],
            history: History::default(),
            rules,
        })
    }

    /// Drops a piece for the given player into a column.
    ///
    /// Fails without touching the board if the column is out of range or full.
    pub fn play(&mut self, col: usize, player: Player) -> Result<Move>
    {
        let Some(row) = self.next_open_row(col)
        else
        {
            let msg = if col >= self.rules.width
            {
                format!("The given column ({}) is out of bounds (width {}).", col, self.rules.width)
            }
            else
            {
                format!("The given column ({}) is full!", col)
            };
            return Err(Error::new(Kind::IllegalMove, msg));
        };

        let mv = Move { player, row, col };
        let index = self.index(row, col);
        self.cells[index] = Some(player);
        self.history.play(mv);

        Ok(mv)
    }

    /// Rebuilds a board by replaying a move list onto an empty grid.
    ///
    /// Every move must land exactly where it was recorded.
    pub fn replay(rules: Rules, moves: &[Move]) -> Result<Board>
    {
        let mut board = Board::new(rules)?;

        for (ply, mv) in moves.iter().enumerate()
        {
            let base = Error::new(Kind::MismatchError, format!("Failed to replay move {} at ply {}.", mv, ply));
            let played = board.play(mv.col, mv.player).map_err(|err| err.chain(base.clone()))?;

            if played.row != mv.row
            {
                return Err(Error::mismatch(mv.row, played.row).chain(base));
            }
        }

        Ok(board)
    }

    /// Gets the rules this board was built from.
    pub fn rules(&self) -> Rules
    {
        self.rules
    }

    /// Undoes the last move, if possible.
    pub fn undo(&mut self) -> Result<Move>
    {
        let Some(mv) = self.history.undo()
        else
        {
            return Err(Error::new(Kind::TooManyUndos, "No move to undo.".into()));
        };

        let index = self.index(mv.row, mv.col);
        self.cells[index] = None;

        Ok(mv)
    }
}

/// Private implementation for this board.
impl Board
{
    /// Row-major index of a cell. Assumes the cell is on the grid.
    fn index(&self, row: usize, col: usize) -> usize
    {
        row * self.rules.width + col
    }

    /// Finds the row a piece dropped into this column would settle on.
    fn next_open_row(&self, col: usize) -> Option<usize>
    {
        if col >= self.rules.width
        {
            return None;
        }

        (0..self.rules.height).rev().find(|row| self.cells[self.index(*row, col)].is_none())
    }
}
