use std::collections::VecDeque;

use fourmind::prelude::*;
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};

/// Builds an empty board, assuming valid rules.
pub fn board(width: usize, height: usize, sequence_length: usize) -> Board
{
    let rules = Rules::new(width, height, sequence_length).unwrap();
    Board::new(rules).unwrap()
}

/// Plays the given (column, player) pairs in order, assuming every drop is legal.
pub fn play_all(board: &mut Board, drops: &[(usize, Player)])
{
    for (col, player) in drops
    {
        let played = board.play(*col, *player);
        assert!(played.is_ok(), "\tdue to {}", played.unwrap_err());
    }
}

/// Scans the whole grid for a run of the sequence length, without looking at the history.
pub fn brute_force_terminal(board: &Board) -> bool
{
    let Rules {
        width,
        height,
        sequence_length,
    } = board.rules();
    let steps: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

    for row in 0..height as isize
    {
        for col in 0..width as isize
        {
            let Some(player) = board.cell(row as usize, col as usize)
            else
            {
                continue;
            };

            for (d_row, d_col) in steps
            {
                let run = (0..sequence_length as isize).all(|k| {
                    let (r, c) = (row + d_row * k, col + d_col * k);
                    0 <= r
                        && r < height as isize
                        && 0 <= c
                        && c < width as isize
                        && board.cell(r as usize, c as usize) == Some(player)
                });

                if run
                {
                    return true;
                }
            }
        }
    }

    false
}

/// Plays random legal drops, alternating players from the human, until the game ends or `plies` drops are made.
pub fn random_game(rules: Rules, plies: usize, seed: u64) -> Board
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(rules).unwrap();
    let mut player = Player::Human;

    for _ in 0..plies
    {
        if board.is_terminal()
        {
            break;
        }

        let Some(col) = board.legal_columns().choose(&mut rng)
        else
        {
            break;
        };

        board.play(col, player).unwrap();
        player = player.flip();
    }

    board
}

#[derive(Debug, Default)]
/// A frontend that plays scripted columns, then the leftmost legal column once the script runs out.
pub struct Scripted
{
    pub columns:  VecDeque<usize>,
    pub renders:  usize,
    pub outcome:  Option<Outcome>,
    pub prompted: usize,
}

impl Scripted
{
    pub fn new(columns: &[usize]) -> Self
    {
        Scripted {
            columns: columns.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl Frontend for Scripted
{
    fn choose(&mut self, board: &Board, _player: Player) -> Result<usize>
    {
        self.prompted += 1;

        if let Some(col) = self.columns.pop_front()
        {
            return Ok(col);
        }

        board
            .legal_columns()
            .next()
            .ok_or(Error::new(Kind::IoError, "The script has no move to make.".into()))
    }

    fn render(&mut self, _board: &Board)
    {
        self.renders += 1;
    }

    fn announce(&mut self, _board: &Board, outcome: Outcome)
    {
        self.outcome = Some(outcome);
    }
}
