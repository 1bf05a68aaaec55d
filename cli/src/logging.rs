use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// WARN unless configured otherwise, so diagnostics stay out of the palette output
pub const DEFAULT_LEVEL: Level = Level::WARN;

/// Install the global subscriber; logs go to stderr
pub fn init_logging(level: Level) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
