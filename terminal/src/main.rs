use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use booking_widget_backend::{Backend, BookingConfig};
use clap::Parser;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

mod app;
mod commands;
mod render;

use app::{Reply, TerminalApp};

#[derive(Debug, Parser)]
#[command(name = "booking-widget")]
#[command(about = "Book an appointment from the terminal")]
struct Args {
    /// YAML booking config (defaults are used when omitted)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Seconds between clock updates while waiting for input
    #[arg(long, default_value_t = 60)]
    clock_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    info!("🚀 Starting booking widget terminal");

    let config = BookingConfig::load_or_default(args.config.as_deref())?;
    let backend = Backend::new(config)?;
    let mut app = TerminalApp::new(backend.new_wizard()?);

    println!("{}\n\nType 'help' for commands.", app.screen());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_secs(args.clock_interval.max(1)));
    // The first tick fires immediately
    clock.tick().await;

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match app.handle_line(&line) {
                    Reply::Print(text) if text.is_empty() => {}
                    Reply::Print(text) => println!("{}\n", text),
                    Reply::Quit => break,
                }
            }
            _ = clock.tick() => {
                println!("\r🕒 {}", app.tick());
            }
        }
    }

    info!("👋 Booking widget terminal closed");
    Ok(())
}
