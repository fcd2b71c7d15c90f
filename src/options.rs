use clap::Parser;

use crate::prelude::*;

#[derive(Clone, Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Options
{
    #[arg(long, default_value_t = 7)]
    /// number of columns on the board
    pub width: usize,

    #[arg(long, default_value_t = 6)]
    /// number of rows on the board
    pub height: usize,

    #[arg(short, long, default_value_t = 4)]
    /// length of the run needed to win
    pub sequence_length: usize,

    #[arg(short, long, default_value_t = 6)]
    /// total search depth in plies for a computer move
    pub depth: i32,

    #[arg(short, long, default_value_t = 2)]
    /// plies searched by the coordinator before handing subtrees to workers
    pub master_depth: i32,

    #[arg(short, long, default_value_t = 0)]
    /// number of worker threads (0 picks one per spare core)
    pub workers: usize,

    #[arg(short, long, default_value = "info")]
    /// lowest log level to show
    pub log_level: String,

    #[arg(long)]
    /// seed for tie-breaking between equally scored columns
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The validated settings shared by every participant of a game.
pub struct Config
{
    pub rules:        Rules,
    pub depth:        i32,
    pub master_depth: i32,
    pub workers:      usize,
    pub seed:         Option<u64>,
}

impl Default for Config
{
    fn default() -> Self
    {
        Config {
            rules:        Rules::default(),
            depth:        6,
            master_depth: 2,
            workers:      0,
            seed:         None,
        }
    }
}

impl TryFrom<&Options> for Config
{
    type Error = Error;
    fn try_from(options: &Options) -> std::result::Result<Self, Self::Error>
    {
        let workers = if options.workers == 0
        {
            std::thread::available_parallelism()
                .map(|nzu| usize::from(nzu).saturating_sub(1))
                .unwrap_or(0)
        }
        else
        {
            options.workers
        };

        let config = Config {
            rules: Rules::new(options.width, options.height, options.sequence_length)?,
            depth: options.depth,
            master_depth: options.master_depth,
            workers,
            seed: options.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config
{
    /// Ensures the depth split leaves work on both sides of the cutoff.
    pub fn validate(&self) -> Result<()>
    {
        self.rules.validate()?;

        if self.master_depth < 1 || self.master_depth >= self.depth
        {
            return Err(Error::new(
                Kind::InvalidConfiguration,
                format!(
                    "The coordinator depth ({}) has to be at least 1 and below the total depth ({}).",
                    self.master_depth, self.depth
                ),
            ));
        }

        Ok(())
    }

    /// The remaining depth at which the coordinator's search switches to worker results.
    pub fn worker_depth(&self) -> i32
    {
        self.depth - self.master_depth
    }
}
