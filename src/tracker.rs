//! Per-host connection tracking and the VPN-suspicion decision procedure.
//!
//! The ordered collection of internal hosts is the one piece of mutable
//! state in the whole crate. The source's hand-rolled sorted doubly-linked
//! list is replaced by a [`BTreeMap`], which gives ascending iteration and
//! duplicate rejection for free instead of relying on the source's
//! insert-between-neighbors routine.

use std::collections::BTreeMap;

use crate::config::TrackerConfig;
use crate::error::PacketAnalyzerError;
use crate::sink::ReportSink;

/// Per-host connection state: the currently dominant destination and the
/// two-window sliding packet counter used by the suspicion predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionState {
    /// The external address currently considered this host's dominant
    /// destination. Zero until the first packet.
    pub peer: u32,
    /// Timestamp at which the current measurement window opened.
    pub window_start: i64,
    /// Packets observed to `peer` since `window_start`.
    pub count_current: u32,
    /// `count_current` snapshot from the immediately preceding window.
    pub count_previous: u32,
}

/// Whether an `observe` call produced a VPN-suspicion report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// No window rollover occurred, or the predicate did not hold.
    NoReport,
    /// A window rollover occurred and the suspicion predicate held; the
    /// configured [`ReportSink`] has already been notified.
    Reported,
}

/// Maintains the ordered collection of internal hosts and applies the
/// VPN-suspicion predicate at each window rollover.
///
/// `HostTracker` holds the only mutable state in this crate. It is `Send`
/// but carries no internal synchronization: the single-writer assumption
/// means the capture collaborator must serialize calls to `observe` itself
/// (see the crate-level concurrency notes in DESIGN.md).
pub struct HostTracker<S: ReportSink> {
    hosts: BTreeMap<u32, ConnectionState>,
    config: TrackerConfig,
    sink: S,
}

impl<S: ReportSink> HostTracker<S> {
    pub fn new(config: TrackerConfig, sink: S) -> Self {
        Self {
            hosts: BTreeMap::new(),
            config,
            sink,
        }
    }

    /// Number of distinct internal hosts currently tracked.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Read-only, allocation-free iteration over tracked addresses in
    /// ascending order. The Rust analogue of the source's
    /// `debug_print_all_hosts`.
    pub fn addresses(&self) -> impl Iterator<Item = u32> + '_ {
        self.hosts.keys().copied()
    }

    /// Current connection state for a host, if tracked.
    pub fn state_of(&self, internal: u32) -> Option<&ConnectionState> {
        self.hosts.get(&internal)
    }

    /// Removes a host's entry if present, returning whether one was removed.
    /// Exposed for test harnesses and future idle-eviction policies; the
    /// core itself never calls this.
    pub fn remove(&mut self, internal: u32) -> bool {
        self.hosts.remove(&internal).is_some()
    }

    /// Record one observed packet from `internal` to `external` at
    /// `timestamp`. This is the tracker's single entry point, invoked by the
    /// ingress filter for every packet it decides to analyze.
    pub fn observe(&mut self, internal: u32, external: u32, timestamp: i64) -> ObserveOutcome {
        let state = self.hosts.entry(internal).or_default();

        if timestamp < state.window_start {
            // TimestampRegression: open a new window instead of letting the
            // rollover check underflow. Snapshot whatever had accumulated in
            // the regressed window into count_previous, same as a normal
            // rollover, before this packet is folded into the fresh window.
            log_timestamp_regression(internal, timestamp, state.window_start);
            state.window_start = timestamp;
            state.count_previous = state.count_current;
            state.count_current = 0;
        }

        if external != state.peer {
            // New dominant connection: discard whatever was accumulated for
            // the previous peer (documented limitation, carried over
            // unchanged from the source).
            state.peer = external;
            state.window_start = timestamp;
            state.count_current = 1;
        } else {
            state.count_current = state.count_current.saturating_add(1);
        }

        if timestamp - state.window_start > self.config.time_window_sec {
            let outcome = if is_suspected_vpn(state, &self.config) {
                self.sink.report(internal, external, timestamp);
                ObserveOutcome::Reported
            } else {
                ObserveOutcome::NoReport
            };

            state.window_start = timestamp;
            state.count_previous = state.count_current;
            state.count_current = 0;
            return outcome;
        }

        ObserveOutcome::NoReport
    }
}

fn log_timestamp_regression(internal: u32, timestamp: i64, window_start: i64) {
    let err = PacketAnalyzerError::TimestampRegression {
        internal,
        timestamp,
        window_start,
    };
    tracing::debug!(error = %err, "timestamp regression, opening new window");
}

/// True iff either disjunct of the VPN-suspicion predicate holds:
/// a single window exceeding the absolute rate cap, or sustained activity
/// straddling a window boundary.
fn is_suspected_vpn(state: &ConnectionState, config: &TrackerConfig) -> bool {
    state.count_current > config.count_packets
        || state.count_previous.saturating_add(state.count_current) > config.window_overlap_threshold
}
