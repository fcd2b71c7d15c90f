pub mod agent;
pub mod board;
pub(crate) mod console;
pub mod distributed;
pub(crate) mod error;
pub(crate) mod options;

#[allow(unused)]
pub mod prelude
{
    pub use std::str::FromStr;

    pub use log::{self};

    pub use crate::{
        agent::{scores, Choice, LeafLookup, ResultCache, SearchStats, Searcher},
        board::*,
        console::Terminal,
        distributed::*,
        error::{Error, Kind, Result},
        options::{Config, Options},
    };
}
