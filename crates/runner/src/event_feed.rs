//! Event Feed - per-turn headline generation
//!
//! Simulated stand-ins for the external event generator:
//! - `HeadlineFeed` produces randomized news-like headlines about the
//!   current holdings (seedable for reproducible runs)
//! - `ScriptedEvents` replays a fixed sequence, for tests and demos

use agora_core::StateSummary;
use agora_ports::{EventSource, EventSourceError};
use async_trait::async_trait;
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Configuration for headline generation
#[derive(Debug, Clone)]
pub struct HeadlineFeedConfig {
    /// Probability that a headline is a transfer rumor (0.0 to 1.0)
    pub rumor_probability: f64,
}

impl Default for HeadlineFeedConfig {
    fn default() -> Self {
        Self {
            rumor_probability: 0.3,
        }
    }
}

/// Generates simulated headlines from the current world digest
pub struct HeadlineFeed {
    config: HeadlineFeedConfig,
    /// Random generator, seedable for reproducibility
    rng: StdRng,
}

impl HeadlineFeed {
    pub fn new(config: HeadlineFeedConfig) -> Self {
        Self {
            config,
            rng: rand::SeedableRng::from_entropy(),
        }
    }

    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(config: HeadlineFeedConfig, seed: u64) -> Self {
        Self {
            config,
            rng: rand::SeedableRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl EventSource for HeadlineFeed {
    async fn produce_event(
        &mut self,
        summary: &StateSummary,
    ) -> Result<String, EventSourceError> {
        // Holdings in the summary are sorted, so a seeded feed is
        // deterministic for a given world.
        if summary.holdings.is_empty() {
            return Ok("A quiet day on the market; nothing draws attention.".to_string());
        }
        let (asset, owner) = &summary.holdings[self.rng.gen_range(0..summary.holdings.len())];

        let headline = if self.rng.gen_bool(self.config.rumor_probability) {
            format!("Rumor: {} is said to be open to offers for {}.", owner, asset)
        } else if self.rng.gen_bool(0.5) {
            format!(
                "{} delivers a standout performance, and {}'s rivals take notice.",
                asset, owner
            )
        } else {
            format!(
                "{} faces mounting pressure to shake up its holdings after a rough stretch.",
                owner
            )
        };

        Ok(headline)
    }

    fn name(&self) -> &str {
        "HeadlineFeed"
    }
}

/// Replays a fixed sequence of events, then reports exhaustion
pub struct ScriptedEvents {
    events: VecDeque<String>,
}

impl ScriptedEvents {
    pub fn new<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: events.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedEvents {
    async fn produce_event(
        &mut self,
        _summary: &StateSummary,
    ) -> Result<String, EventSourceError> {
        self.events.pop_front().ok_or(EventSourceError::Exhausted)
    }

    fn name(&self) -> &str {
        "ScriptedEvents"
    }
}
