//! Construction-time configuration for the classifier, filter, and tracker.
//!
//! Every tunable here is a constructor parameter, not a runtime-reloadable
//! setting — the analyzer has no configuration file or environment to read;
//! the hosting application decides these once at startup.

/// Per-window absolute packet-count cap. Above this, a single window is
/// suspicious on its own.
pub const DEFAULT_COUNT_PACKETS: u32 = 10_000;

/// Length of a measurement window, in seconds.
pub const DEFAULT_TIME_WINDOW_SEC: i64 = 20 * 60;

/// Cap on `count_previous + count_current` used to catch sustained activity
/// straddling a window boundary. Defaults to 75% of `DEFAULT_COUNT_PACKETS`.
pub const DEFAULT_WINDOW_OVERLAP_THRESHOLD: u32 = (DEFAULT_COUNT_PACKETS * 3) / 4;

/// Thresholds driving the VPN-suspicion predicate in [`crate::tracker::HostTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Absolute per-window packet cap.
    pub count_packets: u32,
    /// Window length in seconds.
    pub time_window_sec: i64,
    /// Straddling-window cap.
    pub window_overlap_threshold: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            count_packets: DEFAULT_COUNT_PACKETS,
            time_window_sec: DEFAULT_TIME_WINDOW_SEC,
            window_overlap_threshold: DEFAULT_WINDOW_OVERLAP_THRESHOLD,
        }
    }
}

impl TrackerConfig {
    /// Build a config with overridden thresholds, leaving the window length
    /// at its default. Mainly useful for tests that need a low `count_packets`
    /// to exercise the absolute-rate breach without generating thousands of
    /// packets.
    pub fn with_thresholds(count_packets: u32, window_overlap_threshold: u32) -> Self {
        Self {
            count_packets,
            window_overlap_threshold,
            ..Self::default()
        }
    }
}

/// Orientation and scope settings for [`crate::filter::IngressFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// When true, packets where neither endpoint is private are skipped.
    pub filter_internal_only: bool,
    /// When true, the internal (private) address is normalized into the
    /// "internal" slot regardless of which side of the packet it arrived on.
    pub orient_internal_as_source: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_internal_only: true,
            orient_internal_as_source: true,
        }
    }
}
