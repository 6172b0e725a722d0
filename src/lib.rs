//! Panoptes - Host Reachability Service
//!
//! Reports reachability of a configured host list by issuing ICMP echo
//! probes concurrently through a bounded worker pool and serving the results
//! over HTTP.
//!
//! # Architecture
//!
//! - **Hosts**: newline-delimited host list, read fresh per request
//! - **Probe**: bounded fan-out/fan-in ICMP probing ([`ProbePool`])
//! - **Server**: three read-only JSON endpoints (`/`, `/hosts`, `/pings`)

pub mod config;
pub mod error;
pub mod hosts;
pub mod probe;
pub mod server;

pub use config::{AppConfig, ConfigError, ProbeConfig, ServerConfig};
pub use error::ApiError;
pub use hosts::load_hosts;
pub use probe::{IcmpPinger, Pinger, ProbeOutcome, ProbePool};
pub use server::{AppState, create_router};
