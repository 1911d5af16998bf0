//! Hotel reservation tracker entry point.
use std::io;

use anyhow::{Context, Result};
use hotel_reservations::{AppConfig, ReservationStore, Shell};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let mut manager = config
        .build_manager()
        .context("failed to build room inventory")?;

    let store = ReservationStore::new(&config.reservations_file);
    let outcome = store.load();
    manager.restore(outcome.reservations);

    let stdin = io::stdin();
    let mut shell = Shell::new(manager, store, stdin.lock(), io::stdout());
    shell.run().context("console I/O failed")?;

    Ok(())
}
