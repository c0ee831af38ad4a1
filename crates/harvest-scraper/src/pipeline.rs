//! Sequential harvest driver shared by every [`Source`].
//!
//! One round per key: build the request, perform it, extract records, hand
//! them to the [`Aggregator`], then ask the [`PaginationController`] whether
//! to go on. Exactly one request is in flight at a time.
//!
//! Rounds never fail the run. A transport or parse error is logged and
//! counted as zero records for that key; what happens next is up to the
//! source's pagination policy.

use std::fmt;

use tracing::Instrument;

use crate::error::ScraperError;
use crate::pagination::{PaginationController, RoundOutcome, Step, StopReason};
use crate::sources::Source;
use crate::transport::HttpTransport;

/// The key a round was run for and what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub key: String,
    pub outcome: RoundOutcome,
}

/// Accumulates records across rounds in the order keys were visited.
#[derive(Debug)]
pub struct Aggregator<R> {
    records: Vec<R>,
    rounds: Vec<RoundReport>,
}

impl<R> Aggregator<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            rounds: Vec::new(),
        }
    }

    /// Appends a successful round's records.
    pub fn extend(&mut self, key: impl fmt::Display, records: Vec<R>) -> RoundOutcome {
        let outcome = RoundOutcome::Records(records.len());
        self.records.extend(records);
        self.rounds.push(RoundReport {
            key: key.to_string(),
            outcome,
        });
        outcome
    }

    /// Notes a failed round; it contributes no records.
    pub fn fail(&mut self, key: impl fmt::Display, error: &ScraperError) -> RoundOutcome {
        let outcome = if error.is_transport() {
            RoundOutcome::TransportFailed
        } else {
            RoundOutcome::Malformed
        };
        self.rounds.push(RoundReport {
            key: key.to_string(),
            outcome,
        });
        outcome
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn finish(self, stop: StopReason) -> Harvest<R> {
        Harvest {
            records: self.records,
            rounds: self.rounds,
            stop,
        }
    }
}

impl<R> Default for Aggregator<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Final result of one pipeline run.
#[derive(Debug)]
pub struct Harvest<R> {
    /// Every extracted record, in discovery order.
    pub records: Vec<R>,
    /// One entry per key visited, in visit order.
    pub rounds: Vec<RoundReport>,
    pub stop: StopReason,
}

impl<R> Harvest<R> {
    /// Keys whose round failed, in visit order.
    #[must_use]
    pub fn failed_keys(&self) -> Vec<&str> {
        self.rounds
            .iter()
            .filter(|round| round.outcome.is_failure())
            .map(|round| round.key.as_str())
            .collect()
    }
}

/// Runs `source` to completion and returns everything it yielded.
pub async fn run<S: Source>(transport: &HttpTransport, source: &S) -> Harvest<S::Record> {
    let span = tracing::info_span!("harvest", source = source.name());
    drive(transport, source).instrument(span).await
}

async fn drive<S: Source>(transport: &HttpTransport, source: &S) -> Harvest<S::Record> {
    let mut controller = PaginationController::new(source.pagination());
    let mut aggregator = Aggregator::new();
    let mut keys = source.keys();

    let stop = loop {
        let Some(key) = keys.next() else {
            break StopReason::KeysExhausted;
        };

        if let Some(delay) = controller.throttle() {
            tokio::time::sleep(delay).await;
        }

        let outcome = match run_round(transport, source, key).await {
            Ok(records) => {
                let count = records.len();
                tracing::info!(%key, count, "round succeeded");
                aggregator.extend(key, records)
            }
            Err(error) => {
                tracing::error!(%key, %error, "round failed; no records for this key");
                aggregator.fail(key, &error)
            }
        };

        if let Step::Stop(reason) = controller.after_round(outcome) {
            break reason;
        }
    };

    tracing::info!(
        stop = %stop,
        rounds = controller.rounds(),
        records = aggregator.len(),
        "harvest finished"
    );
    aggregator.finish(stop)
}

async fn run_round<S: Source>(
    transport: &HttpTransport,
    source: &S,
    key: S::Key,
) -> Result<Vec<S::Record>, ScraperError> {
    let request = source.request(key);
    tracing::debug!(%key, url = %request.url, method = ?request.method, "sending request");
    let body = transport.execute(&request).await?;
    source.extract(key, &body)
}
