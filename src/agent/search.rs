use rand::Rng;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
/// The outcome of a one-ply search: the chosen column, its score, and the depth that produced it.
pub struct Choice
{
    pub score:  f64,
    pub column: Option<usize>,
    pub depth:  i32,
}

impl Choice
{
    fn empty(depth: i32) -> Self
    {
        Choice {
            score: scores::LOSS,
            column: None,
            depth,
        }
    }
}

impl<R: Rng> Searcher<R>
{
    /// Picks the best column for `player` by scoring every legal drop to `depth` plies.
    ///
    /// If every column loses, the search is repeated from scratch at half the depth, in the hope that a shallower
    /// horizon still finds a line worth playing. Ties replace the incumbent column with probability one half.
    ///
    /// `column` is only `None` if the board has no legal column or `depth` is not positive.
    pub fn search(&mut self, board: &mut Board, depth: i32, player: Player, lookup: Option<&LeafLookup<'_>>) -> Choice
    {
        let mut current = depth;
        let mut best = Choice::empty(current);

        while best.score == scores::LOSS && current > 0
        {
            best = Choice::empty(current);

            for col in 0..board.rules().width
            {
                if !board.is_legal(col)
                {
                    continue;
                }

                if let Err(err) = board.play(col, player)
                {
                    panic!("{}", err);
                }

                let score = self.evaluate(board, player, current - 1, lookup);

                if let Err(err) = board.undo()
                {
                    panic!("{}", err);
                }

                log::trace!("column {} scored {: >11.8} at depth {}", col, score, current);

                if best.column.is_none() || score > best.score || (score == best.score && self.rng.gen_bool(0.5))
                {
                    best.score = score;
                    best.column = Some(col);
                }
            }

            if best.score == scores::LOSS && current > 1
            {
                log::debug!("every column loses at depth {}, retrying at depth {}", current, current / 2);
            }

            current /= 2;
        }

        best
    }
}
