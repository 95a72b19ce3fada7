//! Transfer window demo
//!
//! Three clubs with equal budgets bid on each other's star players over a
//! caller-chosen number of turns. Run with `RUST_LOG=info` to watch the
//! headlines, dropped proposals, and resolved transfers go by:
//!
//! ```text
//! cargo run --example transfer_window -- 5
//! ```

use agora_core::{AssetId, ParticipantId};
use agora_runner::{
    HeadlineFeed, HeadlineFeedConfig, ImpulsiveBidder, LogAudit, SimulationConfig,
    SimulationRunner,
};
use std::io::{self, Write};
use std::sync::Arc;

const STARTING_BUDGET: i64 = 100_000_000;

/// Iteration count is a caller-side concern: first CLI argument, or an
/// interactive prompt when absent.
fn read_turns() -> u64 {
    if let Some(arg) = std::env::args().nth(1) {
        if let Ok(n) = arg.parse() {
            return n;
        }
    }
    print!("Enter the number of simulation turns: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        if let Ok(n) = line.trim().parse() {
            return n;
        }
    }
    5
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let turns = read_turns();
    let clubs = ["hawks", "comets", "wolves"];
    let stars = [("d-carver", "hawks"), ("l-ito", "comets"), ("m-santos", "wolves")];

    let mut config = SimulationConfig::default().with_max_turns(turns);
    for club in clubs {
        config = config.with_participant(club, STARTING_BUDGET);
    }
    for (star, club) in stars {
        config = config.with_asset(star, club);
    }

    let feed = HeadlineFeed::with_seed(HeadlineFeedConfig::default(), 42);
    let mut runner = SimulationRunner::new(config, Box::new(feed))?
        .with_audit(Arc::new(LogAudit::new()));

    // Each club bids on the market as it stood at kickoff; bids that go
    // stale after a transfer are dropped at collection.
    let targets: Vec<(AssetId, ParticipantId)> = stars
        .iter()
        .map(|(star, club)| (AssetId::new(*star), ParticipantId::new(*club)))
        .collect();
    for (seed, club) in clubs.iter().enumerate() {
        runner.register_decider(
            *club,
            Box::new(ImpulsiveBidder::with_seed(*club, targets.clone(), seed as u64 + 1)),
        );
    }

    let result = runner.run().await?;
    let summary = result.state.summary();

    println!("\nFinal balances after {} turns:", result.turns_executed);
    for (club, balance) in &summary.balances {
        println!("  {:<8} ${}", club.as_str(), balance);
    }

    println!("\nHoldings:");
    for (star, club) in &summary.holdings {
        println!("  {:<10} held by {}", star.as_str(), club);
    }

    println!("\nTransfers:");
    for transfer in &result.state.transfers {
        println!("  turn {}: {}", transfer.turn, transfer);
    }

    println!("\nEvents:");
    for (turn, event) in result.state.event_log.iter().enumerate() {
        println!("  {}. {}", turn, event);
    }

    Ok(())
}
