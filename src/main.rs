use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use screenmux::{Config, Manager, ManagerConfig, Tui, config};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::screens::{ABOUT, AboutScreen, CLOCK, ClockScreen, MENU, MenuScreen};

mod cli;
mod screens;

/// Clock refresh when neither the command line nor the config sets a rate.
const DEMO_TICK_RATE: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting screenmux");

    let args = cli::Args::parse();
    let config = load_config(&args)?;

    let mut manager = Manager::with_config(Tui::new()?, &config.manager);
    manager.set_tick_rate(tick_rate(&args, &config.manager));
    if let Some(path) = args.heartbeat {
        manager.set_heartbeat_path(path);
    }

    manager.add_screen(MenuScreen::new());
    manager.add_screen(ClockScreen::new());
    manager.add_screen(AboutScreen::new());
    for (id, name) in [(MENU, "menu"), (CLOCK, "clock"), (ABOUT, "about")] {
        manager.initialize_screen(id, &config.bundle(name))?;
    }

    manager.run().await?;
    info!("Exiting screenmux");
    Ok(())
}

fn load_config(args: &cli::Args) -> Result<Config> {
    match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

/// `--tick-rate-ms 0` disables ticking. A config rate of 0 is the library
/// default, so the demo treats it as unset.
fn tick_rate(args: &cli::Args, config: &ManagerConfig) -> Duration {
    match args.tick_rate_ms {
        Some(rate) => Duration::from_millis(rate),
        None if config.tick_rate_ms > 0 => config.tick_rate(),
        None => DEMO_TICK_RATE,
    }
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("screenmux").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "screenmux.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
