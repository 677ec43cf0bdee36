//! Stream Module
//!
//! Turns repeated sensor reads into a paced, bounded-or-unbounded sequence of deliveries,
//! retrying transient delivery failures with a fixed backoff.

mod policy;
mod session;
mod sink;

pub use policy::RetryPolicy;
pub use session::{SessionState, SessionSummary, StreamSession};
pub use sink::{ChannelSink, DeliveryError, ReadingSink, StreamEvent, TransportCode};
