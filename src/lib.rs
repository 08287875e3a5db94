//! A passive, in-path analyzer that flags internal endpoints whose outbound
//! behavior looks like a VPN tunnel: a single long-lived connection to one
//! external peer carrying an unusually high packet rate.
//!
//! This crate is the core decision procedure only. The packet-capture hook,
//! kernel-module lifecycle, and command dispatch that would drive it on a
//! real gateway are external collaborators — see [`PacketAnalyzer::on_packet`]
//! for the one entry point a capture loop needs to call.

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod sink;
pub mod tracker;

use config::{FilterConfig, TrackerConfig};
use filter::{IngressFilter, Verdict};
use sink::{ReportSink, TracingReportSink};
use tracker::{HostTracker, ObserveOutcome};

/// What the capture collaborator should do with the packet. Always `Accept`
/// — the core never drops or modifies packets, it only decides whether and
/// how to track them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketAction {
    Accept,
}

/// Wires the [`IngressFilter`] and [`HostTracker`] together behind the single
/// `on_packet` entry point a capture loop is expected to call.
pub struct PacketAnalyzer<S: ReportSink = TracingReportSink> {
    filter: IngressFilter,
    tracker: HostTracker<S>,
}

impl PacketAnalyzer<TracingReportSink> {
    /// Build an analyzer with default thresholds and orientation, reporting
    /// suspicions via `tracing::warn!`.
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default(), TrackerConfig::default(), TracingReportSink)
    }
}

impl Default for PacketAnalyzer<TracingReportSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ReportSink> PacketAnalyzer<S> {
    /// Build an analyzer with explicit configuration and report sink.
    pub fn with_config(filter_config: FilterConfig, tracker_config: TrackerConfig, sink: S) -> Self {
        Self {
            filter: IngressFilter::new(filter_config),
            tracker: HostTracker::new(tracker_config, sink),
        }
    }

    /// Entry point invoked once per forwarded IPv4 packet by the capture
    /// collaborator. Addresses are host-byte-order 32-bit integers; the
    /// capture collaborator is responsible for converting out of network
    /// byte order before calling this.
    ///
    /// Always returns [`PacketAction::Accept`] — the core never drops or
    /// modifies packets.
    pub fn on_packet(&mut self, src_addr: u32, dst_addr: u32, ts_seconds: i64) -> PacketAction {
        if let Verdict::Analyze { internal, external } = self.filter.classify(src_addr, dst_addr) {
            let _: ObserveOutcome = self.tracker.observe(internal, external, ts_seconds);
        }
        PacketAction::Accept
    }

    /// Number of distinct internal hosts currently tracked.
    pub fn tracked_host_count(&self) -> usize {
        self.tracker.len()
    }

    /// Read-only, ascending iteration over tracked internal addresses.
    pub fn tracked_addresses(&self) -> impl Iterator<Item = u32> + '_ {
        self.tracker.addresses()
    }
}
