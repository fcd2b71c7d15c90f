use std::io::{BufRead, Write};

use regex::Regex;

use crate::prelude::*;

/// A frontend over a line-based reader and writer, usually stdin and stdout.
pub struct Terminal<I: BufRead, O: Write>
{
    input:  I,
    output: O,
    column: Regex,
}

impl Terminal<std::io::StdinLock<'static>, std::io::Stdout>
{
    /// Creates a terminal over the process's standard streams.
    pub fn stdio() -> Self
    {
        Terminal::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<I: BufRead, O: Write> Terminal<I, O>
{
    /// Creates a terminal over the given streams.
    pub fn new(input: I, output: O) -> Self
    {
        Terminal {
            input,
            output,
            column: Regex::new(r"^\s*(?:play\s+)?(?<col>[+-]?[0-9]+)\s*$").unwrap(),
        }
    }

    /// Consumes the terminal, returning its streams.
    pub fn into_inner(self) -> (I, O)
    {
        (self.input, self.output)
    }

    /// Parses a line into a column index on the given board.
    pub fn parse(&self, line: &str, board: &Board) -> Result<usize>
    {
        let Some(caps) = self.column.captures(line)
        else
        {
            return Err(Error::for_parse::<usize>(line.trim().into()));
        };

        let col_str = &caps["col"];
        let Ok(col) = col_str.parse::<i64>()
        else
        {
            return Err(Error::for_parse::<usize>(col_str.into()));
        };

        let width = board.rules().width;
        if col < 0 || col >= width as i64
        {
            return Err(Error::new(
                Kind::IllegalMove,
                format!("Index out of bounds ({} is not in 0..{}).", col, width),
            ));
        }

        let col = col as usize;
        if !board.is_legal(col)
        {
            return Err(Error::new(Kind::IllegalMove, format!("The given column ({}) is full!", col)));
        }

        Ok(col)
    }

    /// Writes a line, ignoring a closed output.
    fn say(&mut self, line: impl std::fmt::Display)
    {
        if let Err(err) = writeln!(self.output, "{}", line).and_then(|_| self.output.flush())
        {
            log::warn!("could not write to the terminal: {}", err);
        }
    }
}

impl<I: BufRead, O: Write> Frontend for Terminal<I, O>
{
    fn choose(&mut self, board: &Board, player: Player) -> Result<usize>
    {
        loop
        {
            write!(self.output, "Player: {}, make your selection: ", player)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0
            {
                return Err(Error::new(Kind::IoError, "The input closed before a move was made.".into()));
            }

            match self.parse(&line, board)
            {
                | Ok(col) => return Ok(col),
                | Err(err) =>
                {
                    log::debug!("rejected input {:?}:\n{}", line.trim(), err);
                    let retry = match err.kind
                    {
                        | Kind::IllegalMove =>
                        {
                            let reason = err.msg.trim_end_matches(|c: char| c == '.' || c == '!');
                            format!("{}, please try again!", reason)
                        }
                        | _ => "Invalid input, please try again!".to_owned(),
                    };
                    self.say(retry);
                }
            }
        }
    }

    fn render(&mut self, board: &Board)
    {
        self.say(format!("{}\n", board));
    }

    fn announce(&mut self, _board: &Board, outcome: Outcome)
    {
        match outcome
        {
            | Outcome::Winner(player) => self.say(format!("Player {} has won the game!", player)),
            | Outcome::Draw => self.say("The board is full, the game is a draw!"),
        }
    }
}
