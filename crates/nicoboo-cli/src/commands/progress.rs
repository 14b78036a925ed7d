use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use nicoboo_core::Event;
use tokio::time::MissedTickBehavior;

use crate::session::{no_profile, Engine, Session};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Tick once and print the progress snapshot plus any unlocks
    Status,
    /// Tick on the configured interval, printing one JSON event per line
    Watch {
        /// Stop after this many ticks (runs until interrupted otherwise)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn emit(events: &[Event]) -> Result<(), serde_json::Error> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

async fn watch(
    engine: &mut Engine,
    interval_ms: u64,
    ticks: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut count = 0u64;
    loop {
        interval.tick().await;
        emit(&engine.tick(Utc::now()))?;
        count += 1;
        if ticks.is_some_and(|limit| count >= limit) {
            break;
        }
    }
    Ok(())
}

pub fn run(action: ProgressAction, user: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(user)?;
    if session.engine.profile().is_none() {
        return Err(no_profile());
    }

    match action {
        ProgressAction::Status => {
            let events = session.engine.tick(Utc::now());
            for event in &events {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
        }
        ProgressAction::Watch { ticks } => {
            let interval_ms = session.config.tick.interval_ms;
            tracing::info!(interval_ms, partition = %session.partition(), "watching progress");
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            rt.block_on(watch(&mut session.engine, interval_ms, ticks))?;
        }
    }
    Ok(())
}
