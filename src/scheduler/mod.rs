pub mod fcfs;
pub mod fifo;
pub mod round_robin;
pub mod sjf;

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::core::{
    Ticks,
    state::{ProcessState, SimCtx, Slot},
};
use crate::error::ConfigError;
pub use fcfs::FcfsScheduler;
pub use fifo::FifoQueue;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

pub type EnqueueFlags = u64;

pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
pub const ENQ_REQUEUE: EnqueueFlags = 1 << 1;

/// A dispatch policy over the processes that have arrived.
///
/// The simulation loop owns the process table and the memory pool; a
/// policy only keeps its own queue of slots and reads the table through
/// `SimCtx` when it needs burst or arrival data.
pub trait Scheduler {
    fn enqueue(&mut self, ctx: &SimCtx, slot: Slot, flags: EnqueueFlags);

    /// Best queued candidate that is not currently deferred for memory.
    fn select(&self, ctx: &SimCtx) -> Option<Slot>;

    /// Removes `slot` from the queue once it has been dispatched.
    fn take(&mut self, slot: Slot) -> bool;

    /// Queued slots in dispatch preference order.
    fn queued(&self, ctx: &SimCtx) -> Vec<Slot>;

    fn is_empty(&self) -> bool;

    /// CPU time granted to `slot` for one dispatch. Runs to completion by default.
    fn slice(&self, ctx: &SimCtx, slot: Slot) -> Ticks {
        ctx.process(slot).remaining_time
    }
}

pub(crate) fn is_eligible(ctx: &SimCtx, slot: Slot) -> bool {
    ctx.state(slot) == ProcessState::Ready
}

/// Policy chosen by the caller at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    RoundRobin { quantum: NonZeroU64 },
}

impl Policy {
    pub fn round_robin(quantum: u64) -> Result<Self, ConfigError> {
        NonZeroU64::new(quantum)
            .map(|quantum| Self::RoundRobin { quantum })
            .ok_or(ConfigError::ZeroQuantum)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "fcfs"),
            Self::Sjf => write!(f, "sjf"),
            Self::RoundRobin { quantum } => write!(f, "rr:{quantum}"),
        }
    }
}

// fcfs | sjf | rr:<quantum>
impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            None if lower == "fcfs" => Ok(Self::Fcfs),
            None if lower == "sjf" => Ok(Self::Sjf),
            Some(("rr", quantum)) => {
                let quantum = quantum.parse().map_err(|_| ConfigError::Parse {
                    input: s.to_owned(),
                    reason: "quantum must be a non-negative integer",
                })?;
                Self::round_robin(quantum)
            }
            _ => Err(ConfigError::Parse {
                input: s.to_owned(),
                reason: "expected fcfs, sjf or rr:<quantum>",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policies() {
        assert_eq!("fcfs".parse::<Policy>(), Ok(Policy::Fcfs));
        assert_eq!("SJF".parse::<Policy>(), Ok(Policy::Sjf));
        assert_eq!("rr:4".parse::<Policy>(), Policy::round_robin(4));
        assert_eq!("rr:0".parse::<Policy>(), Err(ConfigError::ZeroQuantum));
        assert!(matches!("rr".parse::<Policy>(), Err(ConfigError::Parse { .. })));
        assert!(matches!("lottery".parse::<Policy>(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let policy = Policy::round_robin(3).unwrap();
        assert_eq!(policy.to_string(), "rr:3");
        assert_eq!(policy.to_string().parse::<Policy>(), Ok(policy));
    }
}
