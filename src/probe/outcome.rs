//! Probe result type and its JSON encoding.

use serde::{Serialize, Serializer};

/// Outcome of a single reachability probe.
///
/// Per-host failures are data points, not errors: an unreachable host is a
/// valid observation and never aborts the batch it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// Echo reply received; round-trip time in seconds.
    Latency(f64),
    /// No reply within the timeout, or the hostname did not resolve.
    Unreachable,
    /// The probe itself failed unexpectedly (e.g. ICMP socket unavailable).
    Error,
}

impl ProbeOutcome {
    /// Whether the probe produced a measured latency.
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Latency(_))
    }
}

impl Serialize for ProbeOutcome {
    /// `Latency` encodes as a bare number, `Unreachable` as `null`,
    /// `Error` as the string `"error"`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Latency(secs) => serializer.serialize_f64(*secs),
            Self::Unreachable => serializer.serialize_unit(),
            Self::Error => serializer.serialize_str("error"),
        }
    }
}
