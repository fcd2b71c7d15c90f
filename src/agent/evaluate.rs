use rand::Rng;

use super::*;

impl<R: Rng> Searcher<R>
{
    /// Scores a position in `[-1, 1]` from the maximizer's point of view.
    ///
    /// `player` is the player who made the last move; the children are the replies of their opponent. A win is
    /// recognized before the depth limit is, so a winning position scores as such even with no depth remaining.
    ///
    /// Once `depth` reaches the lookup's splice depth, the node's children are scored from the lookup instead of
    /// searched. The board is left exactly as it was given.
    pub fn evaluate(&mut self, board: &mut Board, player: Player, depth: i32, lookup: Option<&LeafLookup<'_>>) -> f64
    {
        if board.is_terminal()
        {
            self.stats.leaves += 1;
            return if player.maximizes() { scores::WIN } else { scores::LOSS };
        }

        // A full board without a winner is a draw.
        if depth <= 0 || board.is_full()
        {
            self.stats.leaves += 1;
            return scores::NEUTRAL;
        }

        let spliced = lookup.and_then(|lookup| lookup.splice(depth, board.moves()));
        match spliced
        {
            | Some(_) => self.stats.spliced += 1,
            | None => self.stats.stems += 1,
        };

        let next = player.flip();

        let (mut total, mut count) = (0.0, 0);
        let (mut all_win, mut all_lose) = (true, true);

        for col in 0..board.rules().width
        {
            if !board.is_legal(col)
            {
                continue;
            }

            count += 1;

            let result = match spliced
            {
                | Some(score) => score,
                | None =>
                {
                    if let Err(err) = board.play(col, next)
                    {
                        panic!("{}", err);
                    }

                    let result = self.evaluate(board, next, depth - 1, lookup);

                    if let Err(err) = board.undo()
                    {
                        panic!("{}", err);
                    }

                    result
                }
            };

            if result < scores::WIN
            {
                all_win = false;
            }

            if result > scores::LOSS
            {
                all_lose = false;
            }

            // The mover of this child will take a certain outcome in their favour.
            if result == scores::WIN && next.maximizes()
            {
                return scores::WIN;
            }

            if result == scores::LOSS && !next.maximizes()
            {
                return scores::LOSS;
            }

            total += result;
        }

        if all_win
        {
            scores::WIN
        }
        else if all_lose
        {
            scores::LOSS
        }
        else
        {
            scores::mean(total, count)
        }
    }
}
