use std::time::Instant;

use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The states the coordinator moves through over a game.
pub enum Phase
{
    AwaitingHumanMove,
    CheckTerminal,
    Distributing,
    Aggregating,
    Selecting,
    ApplyCpuMove,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a game ended.
pub enum Outcome
{
    Winner(Player),
    Draw,
}

impl std::fmt::Display for Outcome
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            | Self::Winner(player) => write!(f, "{player} wins"),
            | Self::Draw => write!(f, "draw"),
        }
    }
}

/// The coordinator's collaborator for everything a person sees or types.
pub trait Frontend
{
    /// Asks the given player for a column. The column is expected to be legal on the given board.
    fn choose(&mut self, board: &Board, player: Player) -> Result<usize>;

    /// Presents the board.
    fn render(&mut self, board: &Board);

    /// Presents the end of the game.
    fn announce(&mut self, board: &Board, outcome: Outcome);
}

/// The master loop: owns the board, takes human moves, and orchestrates the computer's moves across the workers.
pub struct Coordinator<T: Transport, F: Frontend>
{
    config:    Config,
    board:     Board,
    transport: T,
    frontend:  F,
    searcher:  Searcher,
    phase:     Phase,

    /// Node counters of the last computer move.
    stats: SearchStats,
}

impl<T: Transport, F: Frontend> Coordinator<T, F>
{
    /// Gets the board of the game in progress.
    pub fn board(&self) -> &Board
    {
        &self.board
    }

    /// Computes the computer's move and commits it to the board.
    pub fn cpu_turn(&mut self) -> Result<Move>
    {
        log::info!("CPU turn");
        let start_time = Instant::now();

        let cache = if self.transport.workers() > 0 { Some(self.distribute()?) } else { None };

        self.enter(Phase::Selecting);
        let choice = self.select(cache.as_ref());

        let Some(col) = choice.column
        else
        {
            return Err(Error::new(
                Kind::InternalError,
                format!("The search found no column to play on\n{}", self.board),
            ));
        };

        self.enter(Phase::ApplyCpuMove);
        let mv = self.board.play(col, Player::Cpu)?;

        self.stats = self.searcher.take_stats();
        log::info!("time elapsed: {:.4} seconds", start_time.elapsed().as_secs_f64());
        log::debug!("played {} scored {} at depth {}", mv, choice.score, choice.depth);
        log::debug!(
            "visited {} stems, {} leaves, {} spliced",
            self.stats.stems,
            self.stats.leaves,
            self.stats.spliced
        );

        Ok(mv)
    }

    /// Hands the subtrees below the cutoff to the workers and gathers their scores.
    ///
    /// Returns once every worker has been told to wait.
    pub fn distribute(&mut self) -> Result<ResultCache>
    {
        self.enter(Phase::Distributing);
        self.transport.broadcast(Message::Start)?;

        let tasks = create_tasks(&self.board, self.config.master_depth as usize, Player::Cpu);
        let mut queue = TaskQueue::new(tasks);
        let mut cache = ResultCache::default();
        let mut pending = self.transport.workers();

        log::debug!("distributing {} tasks to {} workers", queue.len(), pending);

        self.enter(Phase::Aggregating);
        while pending > 0
        {
            let Envelope { source, message } = self.transport.recv()?;

            match message
            {
                | Message::Request => match queue.claim()
                {
                    | Some(task) =>
                    {
                        log::trace!("sending rank {} task {}", source, task);
                        self.transport.send(source, Message::Task(task))?;
                    }
                    | None =>
                    {
                        pending -= 1;
                        log::trace!("telling rank {} to wait, {} still working", source, pending);
                        self.transport.send(source, Message::Wait)?;
                    }
                },
                | Message::Result(task) =>
                {
                    let score = queue.complete(&task)?;
                    cache.insert(task.moves, score);
                }
                | other => return Err(Error::protocol(self.transport.rank(), "aggregating", other.tag())),
            };
        }

        // Every worker has been told to wait, so nobody may speak until the next turn starts.
        if self.transport.probe()
        {
            let Envelope { message, .. } = self.transport.recv()?;
            return Err(Error::protocol(self.transport.rank(), "selecting", message.tag()));
        }

        log::debug!("collected {} of {} results", queue.completed(), queue.len());
        Ok(cache)
    }

    /// Gets the frontend this coordinator talks to.
    pub fn frontend(&self) -> &F
    {
        &self.frontend
    }

    /// Places a human move, asking again for as long as the frontend offers illegal columns.
    pub fn human_turn(&mut self) -> Result<Move>
    {
        self.enter(Phase::AwaitingHumanMove);

        loop
        {
            let col = self.frontend.choose(&self.board, Player::Human)?;
            match self.board.play(col, Player::Human)
            {
                | Ok(mv) => return Ok(mv),
                | Err(err) if err.kind == Kind::IllegalMove => log::warn!("rejected human move:\n{err}"),
                | Err(err) => return Err(err),
            }
        }
    }

    /// Creates a coordinator for a fresh game.
    pub fn new(config: Config, transport: T, frontend: F) -> Result<Self>
    {
        let board = Board::new(config.rules)?;
        Self::with_board(config, board, transport, frontend)
    }

    /// Gets the state the coordinator is in.
    pub fn phase(&self) -> Phase
    {
        self.phase
    }

    /// Plays a full game and stops every worker on the way out, however the game ended.
    pub fn run(&mut self) -> Result<Outcome>
    {
        let outcome = self.play();

        self.enter(Phase::GameOver);
        self.stop();

        outcome
    }

    /// Gets the node counters of the last computer move.
    pub fn stats(&self) -> SearchStats
    {
        self.stats
    }

    /// Tells every worker that the game is over.
    pub fn stop(&mut self)
    {
        if let Err(err) = self.transport.broadcast(Message::Stop)
        {
            log::warn!("could not stop every worker:\n{err}");
        }
    }

    /// Creates a coordinator resuming from the given position.
    pub fn with_board(config: Config, board: Board, transport: T, frontend: F) -> Result<Self>
    {
        config.validate()?;

        if board.rules() != config.rules
        {
            return Err(Error::mismatch(config.rules, board.rules()));
        }

        Ok(Coordinator {
            config,
            board,
            transport,
            frontend,
            searcher: Searcher::seeded(config.seed),
            phase: Phase::AwaitingHumanMove,
            stats: SearchStats::default(),
        })
    }
}

/// Private implementation for the coordinator.
impl<T: Transport, F: Frontend> Coordinator<T, F>
{
    /// Checks whether the last move ended the game, and announces it if so.
    fn check_terminal(&mut self) -> Option<Outcome>
    {
        self.enter(Phase::CheckTerminal);

        let outcome = match self.board.winner()
        {
            | Some(player) => Some(Outcome::Winner(player)),
            | None if self.board.is_full() => Some(Outcome::Draw),
            | None => None,
        };

        if let Some(outcome) = outcome
        {
            log::info!("game over: {}", outcome);
            self.frontend.announce(&self.board, outcome);
        }

        outcome
    }

    /// Moves to the given phase.
    fn enter(&mut self, phase: Phase)
    {
        log::debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Alternates human and computer turns until the game ends.
    fn play(&mut self) -> Result<Outcome>
    {
        self.frontend.render(&self.board);

        loop
        {
            self.human_turn()?;
            self.frontend.render(&self.board);

            if let Some(outcome) = self.check_terminal()
            {
                return Ok(outcome);
            }

            self.cpu_turn()?;
            self.frontend.render(&self.board);

            if let Some(outcome) = self.check_terminal()
            {
                return Ok(outcome);
            }
        }
    }

    /// Runs the full-depth search, reading worker results at the cutoff when there are any.
    fn select(&mut self, cache: Option<&ResultCache>) -> Choice
    {
        let lookup = cache.map(|cache| LeafLookup::new(cache, self.config.worker_depth()));
        let choice = self.searcher.search(&mut self.board, self.config.depth, Player::Cpu, lookup.as_ref());

        if scores::decisive(choice.score)
        {
            log::debug!("found a forced line scoring {}", choice.score);
        }

        choice
    }
}
