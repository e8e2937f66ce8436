use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "screenmux", version, about = "Demo of the screenmux screen router")]
pub struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Milliseconds between tick events; 0 disables ticking
    #[arg(short, long)]
    pub tick_rate_ms: Option<u64>,

    /// Write a timestamp to this file on every tick
    #[arg(long)]
    pub heartbeat: Option<PathBuf>,
}
