//! Stream Session
//!
//! Drives one streaming call end to end: reads the sensor on a paced loop and hands each
//! reading to a sink, retrying transient delivery failures.
//!
//! # Sample Count
//! - `< 0`: no reads, completes immediately
//! - `= 0`: streams until a fatal error or an external stop
//! - `> 0`: streams exactly that many readings
//!
//! # Suspension Points
//! The pacing wait and the retry backoff are the only places a session sleeps. Both are
//! plain `tokio::time::sleep` awaits, so dropping the session future (or racing it against
//! a stop signal with `run_until`) aborts the session at either of them.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::device::Sensor;
use crate::error::{Result, ZephyrusError};
use crate::models::{StreamRequest, TemperatureResponse};
use crate::stream::{ReadingSink, RetryPolicy};

// == Session State ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Streaming,
    Completed,
    /// Stopped from outside before reaching its sample count
    Cancelled,
    Failed,
}

// == Session Summary ==
/// Outcome of a session that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub state: SessionState,
    pub samples_sent: u64,
}

// == Stream Session ==
#[derive(Debug)]
pub struct StreamSession {
    requested_samples: i32,
    sample_period: Option<Duration>,
    policy: RetryPolicy,
    state: SessionState,
    samples_sent: u64,
    consecutive_failures: u32,
}

impl StreamSession {
    /// Creates a session for `request`, rejecting malformed parameters up front.
    pub fn new(request: &StreamRequest, policy: RetryPolicy) -> Result<Self> {
        if let Some(error_msg) = request.validate() {
            return Err(ZephyrusError::InvalidRequest(error_msg));
        }

        Ok(Self {
            requested_samples: request.samples,
            sample_period: request.sample_period(),
            policy,
            state: SessionState::Idle,
            samples_sent: 0,
            consecutive_failures: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            samples_sent: self.samples_sent,
        }
    }

    // == Run ==
    /// Runs the session to completion against `sensor`, delivering into `sink`.
    ///
    /// Only the final outcome is returned: intermediate retries never surface as errors.
    /// A sensor read failure is fatal and is never retried here.
    pub async fn run<S, K>(&mut self, sensor: &S, sink: &mut K) -> Result<SessionSummary>
    where
        S: Sensor + ?Sized,
        K: ReadingSink + ?Sized,
    {
        if self.state != SessionState::Idle {
            return Err(ZephyrusError::Internal(format!(
                "stream session already ran (state {:?})",
                self.state
            )));
        }

        if self.requested_samples < 0 {
            debug!(samples = self.requested_samples, "negative sample count, nothing to stream");
            self.state = SessionState::Completed;
            return Ok(self.summary());
        }

        self.state = SessionState::Streaming;
        info!(
            samples = self.requested_samples,
            period_ms = self.sample_period.map(|p| p.as_millis() as u64),
            "stream session started"
        );

        match self.stream(sensor, sink).await {
            Ok(()) => {
                self.state = SessionState::Completed;
                info!(samples_sent = self.samples_sent, "stream session completed");
                Ok(self.summary())
            }
            Err(err) => {
                self.state = SessionState::Failed;
                warn!(samples_sent = self.samples_sent, error = %err, "stream session failed");
                Err(err)
            }
        }
    }

    /// Runs the session until it finishes or `stop` resolves, whichever comes first.
    ///
    /// A stopped session reports `SessionState::Cancelled` along with the readings
    /// delivered so far.
    pub async fn run_until<S, K, F>(
        &mut self,
        sensor: &S,
        sink: &mut K,
        stop: F,
    ) -> Result<SessionSummary>
    where
        S: Sensor + ?Sized,
        K: ReadingSink + ?Sized,
        F: Future<Output = ()>,
    {
        let finished = tokio::select! {
            biased;
            _ = stop => None,
            outcome = self.run(sensor, sink) => Some(outcome),
        };

        match finished {
            Some(outcome) => outcome,
            None => {
                self.state = SessionState::Cancelled;
                info!(samples_sent = self.samples_sent, "stream session stopped");
                Ok(self.summary())
            }
        }
    }

    async fn stream<S, K>(&mut self, sensor: &S, sink: &mut K) -> Result<()>
    where
        S: Sensor + ?Sized,
        K: ReadingSink + ?Sized,
    {
        loop {
            let temperature = sensor.temperature().await?;
            self.deliver(sink, &TemperatureResponse::new(temperature))
                .await?;
            self.samples_sent += 1;

            if self.requested_samples > 0 && self.samples_sent == self.requested_samples as u64 {
                return Ok(());
            }

            match self.sample_period {
                Some(period) => tokio::time::sleep(period).await,
                // Unpaced sessions still yield so a stop signal gets a chance to run
                None => tokio::task::yield_now().await,
            }
        }
    }

    /// Delivers one reading, retrying the same reading on transient failures.
    async fn deliver<K>(&mut self, sink: &mut K, reading: &TemperatureResponse) -> Result<()>
    where
        K: ReadingSink + ?Sized,
    {
        loop {
            let err = match sink.send(reading).await {
                Ok(()) => {
                    self.consecutive_failures = 0;
                    debug!(temperature = reading.temperature, "reading delivered");
                    return Ok(());
                }
                Err(err) => err,
            };

            if !self.policy.is_retryable(err.code) {
                return Err(ZephyrusError::Delivery(err));
            }

            if self.consecutive_failures >= self.policy.max_retries {
                return Err(ZephyrusError::RetriesExhausted {
                    attempts: self.consecutive_failures + 1,
                    source: err,
                });
            }

            self.consecutive_failures += 1;
            warn!(
                code = ?err.code,
                retry = self.consecutive_failures,
                max_retries = self.policy.max_retries,
                "transient delivery failure, retrying"
            );
            tokio::time::sleep(self.policy.delay).await;
        }
    }
}
