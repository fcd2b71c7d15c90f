use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use fourmind::prelude::*;

fn main() -> Result<()>
{
    // Read the dotenv file.
    dotenvy::dotenv().ok();

    // Parse the cli options.
    let options = Options::parse();

    // Set the logger to write-and-flush so that it doesn't compete with worker threads.
    let _logger = Logger::try_with_env_or_str(options.log_level.clone())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::WithThread)
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    print_header();

    let config = match Config::try_from(&options)
    {
        | Ok(config) => config,
        | Err(err) =>
        {
            log::error!("invalid options: {}", err);
            return Err(err);
        }
    };

    log::info!(
        "playing on {} with depth {} ({} coordinator plies) and {} workers",
        config.rules,
        config.depth,
        config.master_depth,
        config.workers
    );

    // Run the game, with every worker on its own thread.
    if let Err(e) = play(config)
    {
        log::error!("fatal error: {}", e);
    }

    Ok(())
}

fn play(config: Config) -> Result<()>
{
    let mut endpoints = mesh(config.workers + 1).into_iter();
    let Some(coordinator_endpoint) = endpoints.next()
    else
    {
        return Err(Error::new(Kind::InternalError, "The mesh has no coordinator endpoint.".into()));
    };

    let mut handles = Vec::with_capacity(config.workers);
    for endpoint in endpoints
    {
        let name = format!("worker-{}", endpoint.rank());
        let handle = std::thread::Builder::new().name(name).spawn(move || Worker::new(config, endpoint).run())?;
        handles.push(handle);
    }

    let mut coordinator = Coordinator::new(config, coordinator_endpoint, Terminal::stdio())?;
    let outcome = coordinator.run();

    // Hang up, so that any worker still blocked on a receive sees the channel close.
    drop(coordinator);

    for handle in handles
    {
        match handle.join()
        {
            | Ok(Ok(solved)) => log::trace!("worker solved {} tasks", solved),
            | Ok(Err(err)) => log::warn!("worker failed:\n{}", err),
            | Err(_) => log::error!("a worker panicked"),
        }
    }

    outcome.map(|_| ())
}

fn print_header()
{
    log::info!("🔴 starting {} v{} 🟡", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    log::debug!("four in a row, or however many you asked for");
}
