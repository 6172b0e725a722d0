//! ICMP echo probing.
//!
//! [`Pinger`] is the seam between the worker pool and the network: the real
//! implementation sends ICMP echo requests via `surge-ping`, tests substitute
//! a stub.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use tokio::time::timeout;

use crate::probe::ProbeOutcome;

/// A single reachability check against one host.
#[async_trait::async_trait]
pub trait Pinger: Send + Sync + 'static {
    /// Probe `host` once, waiting at most `probe_timeout` for a reply.
    ///
    /// Never fails: resolution failures and timeouts fold into
    /// [`ProbeOutcome::Unreachable`], unexpected probe failures into
    /// [`ProbeOutcome::Error`].
    async fn ping(&self, host: &str, probe_timeout: Duration) -> ProbeOutcome;
}

/// Resolve hostname to IP address.
async fn resolve_host(host: &str) -> Result<IpAddr, std::io::Error> {
    // First, try to parse as an IP address directly
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    // Otherwise, resolve the hostname using tokio's DNS lookup
    let addrs = tokio::net::lookup_host(format!("{host}:0")).await?;
    addrs
        .into_iter()
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"))
}

/// ICMP echo prober backed by `surge-ping`.
///
/// A fresh ICMP client is created per probe, matching the IP version of the
/// resolved target.
#[derive(Debug, Default)]
pub struct IcmpPinger;

impl IcmpPinger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Pinger for IcmpPinger {
    async fn ping(&self, host: &str, probe_timeout: Duration) -> ProbeOutcome {
        // Resolve hostname to IP address
        let ip_addr = match resolve_host(host).await {
            Ok(ip) => ip,
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Failed to resolve hostname");
                return ProbeOutcome::Unreachable;
            }
        };

        // Create ICMP client based on IP version
        let client = match ip_addr {
            IpAddr::V4(_) => Client::new(&Config::default()),
            IpAddr::V6(_) => Client::new(&Config::builder().kind(ICMP::V6).build()),
        };

        let client = match client {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Failed to create ICMP client");
                return ProbeOutcome::Error;
            }
        };

        let mut pinger = client.pinger(ip_addr, PingIdentifier(rand::random())).await;
        pinger.timeout(probe_timeout);

        // Single echo request; one timeout is final, no retry.
        let result = timeout(probe_timeout, pinger.ping(PingSequence(0), &[])).await;

        match result {
            Ok(Ok((_, rtt))) => {
                let secs = rtt.as_secs_f64();
                tracing::debug!(host = %host, latency_s = secs, "Ping probe successful");
                ProbeOutcome::Latency(secs)
            }
            Ok(Err(e)) => {
                tracing::debug!(host = %host, error = %e, "Ping probe failed");
                ProbeOutcome::Unreachable
            }
            Err(_) => {
                tracing::debug!(
                    host = %host,
                    timeout_ms = probe_timeout.as_millis(),
                    "Ping probe timed out"
                );
                ProbeOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_host_ipv4() {
        let ip = resolve_host("127.0.0.1").await.unwrap();
        assert_eq!(ip, IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)));
    }

    #[tokio::test]
    async fn test_resolve_host_ipv6() {
        let ip = resolve_host("::1").await.unwrap();
        assert_eq!(ip, IpAddr::V6(std::net::Ipv6Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_blank_host_is_unreachable() {
        let pinger = IcmpPinger::new();
        let outcome = pinger.ping("", Duration::from_secs(1)).await;
        assert_eq!(outcome, ProbeOutcome::Unreachable);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_unreachable() {
        let pinger = IcmpPinger::new();
        let outcome = pinger
            .ping("definitely-not-a-real-host.invalid", Duration::from_secs(1))
            .await;
        assert_eq!(outcome, ProbeOutcome::Unreachable);
    }
}
