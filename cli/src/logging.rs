use log::Level;
use tracing_subscriber::filter::LevelFilter;

/// Sends `log` records to stderr through the tracing fmt subscriber, which
/// also installs the `log` bridge.
pub fn init(level: Level) -> anyhow::Result<()> {
    let filter = match level {
        Level::Error => LevelFilter::ERROR,
        Level::Warn => LevelFilter::WARN,
        Level::Info => LevelFilter::INFO,
        Level::Debug => LevelFilter::DEBUG,
        Level::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Could not initialize logging: {err}"))
}
