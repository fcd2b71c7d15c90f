use crate::prelude::*;

/// The four axes through a cell, each as a pair of opposing unit steps `(d_row, d_col)`.
const AXES: [[(isize, isize); 2]; 4] = [
    // Vertical.
    [(-1, 0), (1, 0)],
    // Horizontal.
    [(0, -1), (0, 1)],
    // Falling diagonal.
    [(-1, -1), (1, 1)],
    // Rising diagonal.
    [(-1, 1), (1, -1)],
];

impl Board
{
    /// Whether the last move completed a run of the sequence length.
    ///
    /// A move can only complete a run through the cell it filled, so only the most recent move is inspected.
    pub fn is_terminal(&self) -> bool
    {
        if self.history.len() < self.rules.sequence_length
        {
            return false;
        }

        let Some(last) = self.history.prev()
        else
        {
            return false;
        };

        // The anchor cell accounts for the remaining one.
        let needed = self.rules.sequence_length - 1;

        AXES.iter().any(|[forward, backward]| self.run(&last, *forward) + self.run(&last, *backward) >= needed)
    }

    /// Returns the winner of the game so far, if the last move won it.
    pub fn winner(&self) -> Option<Player>
    {
        if self.is_terminal()
        {
            self.history.prev().map(|mv| mv.player)
        }
        else
        {
            None
        }
    }

    /// Determines if the given signed coordinate lies on the grid.
    fn in_bounds(&self, row: isize, col: isize) -> bool
    {
        0 <= row && row < self.rules.height as isize && 0 <= col && col < self.rules.width as isize
    }

    /// Counts consecutive cells owned by the mover, walking away from its cell in one direction.
    ///
    /// The walk stops for good at the first foreign, empty or off-grid cell.
    fn run(&self, from: &Move, (d_row, d_col): (isize, isize)) -> usize
    {
        let mut count = 0;

        for step in 1..=self.rules.sequence_length as isize
        {
            let row = from.row as isize + d_row * step;
            let col = from.col as isize + d_col * step;

            if !self.in_bounds(row, col) || self.cell(row as usize, col as usize) != Some(from.player)
            {
                break;
            }

            count += 1;
        }

        count
    }
}
