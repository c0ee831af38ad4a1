//! Continue/stop decisions between pipeline rounds.
//!
//! Two policies exist:
//!
//! - [`PaginationPolicy::Bounded`] walks a finite key sequence to the end.
//!   Per-key failures never end the run early.
//! - [`PaginationPolicy::UntilEmpty`] walks an open-ended page sequence and
//!   stops at the first page that yields nothing. A failed page ends the run
//!   the same way, since an error cannot be told apart from the end of the
//!   catalog without a retry policy. An optional page cap stops the run even
//!   when the last page still had items.
//!
//! The controller is a pure state machine; the pipeline driver feeds it one
//! [`RoundOutcome`] per round and sleeps for [`PaginationController::throttle`]
//! before each request.

use std::fmt;
use std::time::Duration;

/// How a pipeline decides when to stop requesting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPolicy {
    Bounded,
    UntilEmpty {
        /// Stop after this many pages even if the last one was non-empty.
        max_pages: Option<u32>,
        /// Delay inserted before every page request except the first.
        delay: Duration,
    },
}

/// What a single round produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The round succeeded and extracted this many records.
    Records(usize),
    /// The request failed or returned a non-2xx status.
    TransportFailed,
    /// The response arrived but could not be parsed.
    Malformed,
}

impl RoundOutcome {
    #[must_use]
    pub fn record_count(self) -> usize {
        match self {
            RoundOutcome::Records(n) => n,
            RoundOutcome::TransportFailed | RoundOutcome::Malformed => 0,
        }
    }

    #[must_use]
    pub fn is_failure(self) -> bool {
        !matches!(self, RoundOutcome::Records(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop(StopReason),
}

/// Why a pipeline run reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every key in a bounded sequence was visited.
    KeysExhausted,
    /// A page yielded no items.
    EmptyPage,
    /// A page request failed or its body could not be parsed.
    RoundFailed,
    /// The configured page cap was reached.
    MaxPagesReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::KeysExhausted => write!(f, "keys exhausted"),
            StopReason::EmptyPage => write!(f, "empty page"),
            StopReason::RoundFailed => write!(f, "round failed"),
            StopReason::MaxPagesReached => write!(f, "max pages reached"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    policy: PaginationPolicy,
    rounds: u32,
}

impl PaginationController {
    #[must_use]
    pub fn new(policy: PaginationPolicy) -> Self {
        Self { policy, rounds: 0 }
    }

    /// Rounds completed so far.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Delay to wait before issuing the next request, if any.
    ///
    /// Only the page policy throttles, and never before the first page.
    #[must_use]
    pub fn throttle(&self) -> Option<Duration> {
        match self.policy {
            PaginationPolicy::UntilEmpty { delay, .. } if self.rounds > 0 && !delay.is_zero() => {
                Some(delay)
            }
            _ => None,
        }
    }

    /// Records the outcome of the round just finished and decides whether
    /// another round should follow.
    pub fn after_round(&mut self, outcome: RoundOutcome) -> Step {
        self.rounds = self.rounds.saturating_add(1);

        match self.policy {
            PaginationPolicy::Bounded => Step::Continue,
            PaginationPolicy::UntilEmpty { max_pages, .. } => match outcome {
                RoundOutcome::TransportFailed | RoundOutcome::Malformed => {
                    Step::Stop(StopReason::RoundFailed)
                }
                RoundOutcome::Records(0) => Step::Stop(StopReason::EmptyPage),
                RoundOutcome::Records(_) => match max_pages {
                    Some(max) if self.rounds >= max => Step::Stop(StopReason::MaxPagesReached),
                    _ => Step::Continue,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn until_empty(max_pages: Option<u32>) -> PaginationController {
        PaginationController::new(PaginationPolicy::UntilEmpty {
            max_pages,
            delay: Duration::from_millis(1000),
        })
    }

    #[test]
    fn bounded_continues_through_failures() {
        let mut ctl = PaginationController::new(PaginationPolicy::Bounded);
        assert_eq!(ctl.after_round(RoundOutcome::Records(12)), Step::Continue);
        assert_eq!(ctl.after_round(RoundOutcome::TransportFailed), Step::Continue);
        assert_eq!(ctl.after_round(RoundOutcome::Malformed), Step::Continue);
        assert_eq!(ctl.after_round(RoundOutcome::Records(0)), Step::Continue);
        assert_eq!(ctl.rounds(), 4);
    }

    #[test]
    fn bounded_never_throttles() {
        let mut ctl = PaginationController::new(PaginationPolicy::Bounded);
        assert!(ctl.throttle().is_none());
        ctl.after_round(RoundOutcome::Records(3));
        assert!(ctl.throttle().is_none());
    }

    #[test]
    fn until_empty_continues_on_non_empty_page() {
        let mut ctl = until_empty(None);
        assert_eq!(ctl.after_round(RoundOutcome::Records(24)), Step::Continue);
        assert_eq!(ctl.after_round(RoundOutcome::Records(1)), Step::Continue);
    }

    #[test]
    fn until_empty_stops_on_empty_page() {
        let mut ctl = until_empty(None);
        assert_eq!(ctl.after_round(RoundOutcome::Records(24)), Step::Continue);
        assert_eq!(
            ctl.after_round(RoundOutcome::Records(0)),
            Step::Stop(StopReason::EmptyPage)
        );
    }

    #[test]
    fn until_empty_stops_on_failed_page() {
        let mut ctl = until_empty(None);
        assert_eq!(
            ctl.after_round(RoundOutcome::TransportFailed),
            Step::Stop(StopReason::RoundFailed)
        );

        let mut ctl = until_empty(None);
        assert_eq!(
            ctl.after_round(RoundOutcome::Malformed),
            Step::Stop(StopReason::RoundFailed)
        );
    }

    #[test]
    fn until_empty_stops_at_page_cap_even_when_page_was_full() {
        let mut ctl = until_empty(Some(2));
        assert_eq!(ctl.after_round(RoundOutcome::Records(24)), Step::Continue);
        assert_eq!(
            ctl.after_round(RoundOutcome::Records(24)),
            Step::Stop(StopReason::MaxPagesReached)
        );
    }

    #[test]
    fn empty_page_wins_over_page_cap() {
        let mut ctl = until_empty(Some(1));
        assert_eq!(
            ctl.after_round(RoundOutcome::Records(0)),
            Step::Stop(StopReason::EmptyPage)
        );
    }

    #[test]
    fn throttle_applies_between_pages_only() {
        let mut ctl = until_empty(None);
        assert!(ctl.throttle().is_none(), "no delay before the first page");
        ctl.after_round(RoundOutcome::Records(24));
        assert_eq!(ctl.throttle(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn zero_delay_disables_throttle() {
        let mut ctl = PaginationController::new(PaginationPolicy::UntilEmpty {
            max_pages: None,
            delay: Duration::ZERO,
        });
        ctl.after_round(RoundOutcome::Records(24));
        assert!(ctl.throttle().is_none());
    }

    #[test]
    fn failures_count_as_zero_records() {
        assert_eq!(RoundOutcome::TransportFailed.record_count(), 0);
        assert_eq!(RoundOutcome::Malformed.record_count(), 0);
        assert_eq!(RoundOutcome::Records(7).record_count(), 7);
        assert!(RoundOutcome::Malformed.is_failure());
        assert!(!RoundOutcome::Records(0).is_failure());
    }
}
