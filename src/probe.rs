//! Parallel reachability probing.
//!
//! - [`ProbeOutcome`]: result of one probe (latency, unreachable, or error)
//! - [`Pinger`]: probe implementation seam; [`IcmpPinger`] is the real one
//! - [`ProbePool`]: bounded fan-out/fan-in over a host list

mod outcome;
mod pinger;
mod pool;

pub use outcome::ProbeOutcome;
pub use pinger::{IcmpPinger, Pinger};
pub use pool::ProbePool;
