//! Fault injection
//!
//! Before every read or write the store asks its injector for a delay and
//! whether to fail. The injector is supplied at construction, so tests can
//! pin the seed, disable latency, or script failures.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Kind of operation about to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockOp {
    Read,
    /// Non-zero write
    Write,
    /// Zero-block write
    Delete,
}

impl fmt::Display for BlockOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockOp::Read => f.write_str("read"),
            BlockOp::Write => f.write_str("write"),
            BlockOp::Delete => f.write_str("delete"),
        }
    }
}

/// Strategy consulted before every block I/O
pub trait FaultInjector: Send + Sync + fmt::Debug {
    /// Simulated latency for this call
    fn delay(&self, op: BlockOp) -> Duration;

    /// Whether this call fails with a transient error instead of running
    fn should_fail(&self, op: BlockOp) -> bool;
}

/// Never delays, never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn delay(&self, _op: BlockOp) -> Duration {
        Duration::ZERO
    }

    fn should_fail(&self, _op: BlockOp) -> bool {
        false
    }
}

/// Fault injection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultConfig {
    /// Upper bound (exclusive) of the uniform delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Probability in `[0, 1]` that a call fails with a transient error
    #[serde(default)]
    pub failure_rate: f64,

    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_delay_ms() -> u64 {
    200
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            max_delay_ms: default_max_delay_ms(),
            failure_rate: 0.0,
            seed: None,
        }
    }
}

impl FaultConfig {
    /// No latency and no failures
    pub fn disabled() -> Self {
        Self {
            max_delay_ms: 0,
            failure_rate: 0.0,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(format!(
                "failure_rate must be within [0, 1], got {}",
                self.failure_rate
            ));
        }
        Ok(())
    }
}

/// Uniform random latency plus probabilistic failure
pub struct RandomFaults {
    max_delay: Duration,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl RandomFaults {
    pub fn new(max_delay: Duration, failure_rate: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        Self {
            max_delay,
            failure_rate,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &FaultConfig) -> Self {
        Self::new(
            Duration::from_millis(config.max_delay_ms),
            config.failure_rate,
            config.seed,
        )
    }
}

impl fmt::Debug for RandomFaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomFaults")
            .field("max_delay", &self.max_delay)
            .field("failure_rate", &self.failure_rate)
            .finish()
    }
}

impl FaultInjector for RandomFaults {
    fn delay(&self, _op: BlockOp) -> Duration {
        let max_ms = self.max_delay.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        match self.rng.lock() {
            Ok(mut rng) => Duration::from_millis(rng.gen_range(0..max_ms)),
            Err(_) => Duration::ZERO,
        }
    }

    fn should_fail(&self, _op: BlockOp) -> bool {
        if self.failure_rate <= 0.0 {
            return false;
        }
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(self.failure_rate),
            Err(_) => false,
        }
    }
}

/// Fails a fixed number of calls of one kind, then succeeds
///
/// Useful for driving retry logic deterministically.
#[derive(Debug)]
pub struct FailFirst {
    op: BlockOp,
    remaining: AtomicU64,
}

impl FailFirst {
    pub fn new(op: BlockOp, count: u64) -> Self {
        Self {
            op,
            remaining: AtomicU64::new(count),
        }
    }
}

impl FaultInjector for FailFirst {
    fn delay(&self, _op: BlockOp) -> Duration {
        Duration::ZERO
    }

    fn should_fail(&self, op: BlockOp) -> bool {
        if op != self.op {
            return false;
        }
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}
