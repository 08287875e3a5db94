//! The `ReportSink` collaborator: notified synchronously when a host's
//! traffic crosses the VPN-suspicion thresholds at a window rollover.

/// Receives VPN-suspicion reports from [`crate::tracker::HostTracker`].
///
/// Called synchronously from within `observe`; implementations must not
/// call back into the tracker and must not block — there is no suspension
/// point in the hot path this sink is invoked from.
pub trait ReportSink {
    fn report(&self, internal: u32, external: u32, ts_seconds: i64);
}

impl<T: ReportSink + ?Sized> ReportSink for std::sync::Arc<T> {
    fn report(&self, internal: u32, external: u32, ts_seconds: i64) {
        (**self).report(internal, external, ts_seconds)
    }
}

/// Default production sink: logs a structured warning via `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReportSink;

impl ReportSink for TracingReportSink {
    fn report(&self, internal: u32, external: u32, ts_seconds: i64) {
        tracing::warn!(
            internal = format!("{:08x}", internal),
            external = format!("{:08x}", external),
            ts_seconds,
            "host shows VPN-tunnel-like traffic pattern"
        );
    }
}

#[cfg(any(test, feature = "testing"))]
mod testing {
    use super::ReportSink;
    use std::sync::Mutex;

    /// A report recorded by [`RecordingReportSink`], in emission order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordedReport {
        pub internal: u32,
        pub external: u32,
        pub ts_seconds: i64,
    }

    /// Test-support sink that records every report for assertions instead of
    /// logging it.
    #[derive(Debug, Default)]
    pub struct RecordingReportSink {
        reports: Mutex<Vec<RecordedReport>>,
    }

    impl RecordingReportSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a snapshot of all reports recorded so far, in emission
        /// order.
        pub fn reports(&self) -> Vec<RecordedReport> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl ReportSink for RecordingReportSink {
        fn report(&self, internal: u32, external: u32, ts_seconds: i64) {
            self.reports.lock().unwrap().push(RecordedReport {
                internal,
                external,
                ts_seconds,
            });
        }
    }
}

#[cfg(any(test, feature = "testing"))]
pub use testing::{RecordedReport, RecordingReportSink};
