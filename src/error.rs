//! Local error kinds for the analyzer core.
//!
//! None of these ever propagate out of [`crate::tracker::HostTracker::observe`]
//! or [`crate::PacketAnalyzer::on_packet`] — the capture collaborator always
//! sees [`crate::PacketAction::Accept`]. They exist so the three failure
//! modes the original design calls out are named, logged, and unit-testable
//! instead of silently swallowed.

/// Local, non-propagating failure kinds recognized by the tracker.
#[derive(Debug, thiserror::Error)]
pub enum PacketAnalyzerError {
    /// A new [`crate::tracker::ConnectionState`] could not be created for a
    /// previously-unseen internal address.
    #[error("failed to allocate host entry for {internal:08x}")]
    AllocationFailed {
        /// The internal address that could not be tracked.
        internal: u32,
    },

    /// A host that the caller expected to exist could not be found in the
    /// ordered collection. This should be unreachable in a correct
    /// implementation; see the source's "could not find an IP that should
    /// exist" comment.
    #[error("invariant violated: host {internal:08x} expected but not found")]
    InvariantViolation {
        /// The internal address that was expected to already be tracked.
        internal: u32,
    },

    /// A packet arrived with a timestamp earlier than the host's current
    /// `window_start`. Handled by opening a new window rather than
    /// underflowing, but still recorded for visibility into clock skew.
    #[error("timestamp regression for {internal:08x}: {timestamp} < window_start {window_start}")]
    TimestampRegression {
        /// The internal address whose window was affected.
        internal: u32,
        /// The out-of-order timestamp that triggered the reset.
        timestamp: i64,
        /// The window_start the timestamp regressed behind.
        window_start: i64,
    },
}

impl PacketAnalyzerError {
    /// Returns the error kind as a short string, mirroring the three failure
    /// domains named in the design: `"AllocationFailed"`,
    /// `"InvariantViolation"`, `"TimestampRegression"`.
    pub fn kind(&self) -> &'static str {
        match self {
            PacketAnalyzerError::AllocationFailed { .. } => "AllocationFailed",
            PacketAnalyzerError::InvariantViolation { .. } => "InvariantViolation",
            PacketAnalyzerError::TimestampRegression { .. } => "TimestampRegression",
        }
    }
}
